//! Snapdrag Core Library
//!
//! Drag-and-snap positioning for UI components: a position cache persisted on
//! the component's root node, integer snap decisions against configured
//! targets, and a per-gesture drag state machine.

pub mod cache;
pub mod component;
pub mod config;
pub mod element;
pub mod manager;
pub mod position;
pub mod session;
pub mod snap;

pub use component::{Component, LayoutApplier, Panel};
pub use config::{
    Axis, Bounds, ConfigError, SnapConfig, SnapConfigBuilder, SnapReleasePolicy, SnapTarget,
    TriggerRegion,
};
pub use element::Element;
pub use manager::{ComponentId, DragManager, RegistryError};
pub use position::{PositionCoordinates, format_px, parse_px};
pub use session::{DragSession, DragState, GestureEvent, GestureResponse, reset, snap_to};
pub use snap::{SnapDecision, decide, find_target};
