//! Component seams used by the drag subsystem.

use crate::element::Element;
use crate::position::PositionCoordinates;
use serde::{Deserialize, Serialize};

/// Anything with a durable root node.
pub trait Component {
    /// The root node holding persisted attributes.
    fn element(&self) -> &Element;

    /// Mutable access to the root node.
    fn element_mut(&mut self) -> &mut Element;
}

/// Applies a visual position to a component.
///
/// Implementations must apply the position synchronously; a drag calls this on
/// every move.
pub trait LayoutApplier {
    /// The position the component is currently rendered at.
    fn rendered_position(&self) -> PositionCoordinates;

    /// Render the component at `position`.
    fn apply_position(&mut self, position: PositionCoordinates);
}

/// A plain draggable component: a root node plus its rendered position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    #[serde(default)]
    pub element: Element,
    #[serde(default)]
    pub position: PositionCoordinates,
}

impl Panel {
    /// Create a panel rendered at `position` with an empty root node.
    pub fn new(position: PositionCoordinates) -> Self {
        Self {
            element: Element::new(),
            position,
        }
    }

    /// Rebuild the panel around an existing root node.
    ///
    /// Models a re-render: the node survives, the rendered position is reset.
    pub fn rebuild(element: Element, position: PositionCoordinates) -> Self {
        Self { element, position }
    }
}

impl Component for Panel {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl LayoutApplier for Panel {
    fn rendered_position(&self) -> PositionCoordinates {
        self.position
    }

    fn apply_position(&mut self, position: PositionCoordinates) {
        self.position = position;
    }
}
