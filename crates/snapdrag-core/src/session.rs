//! Drag gesture state machine.
//!
//! A [`DragSession`] lives for exactly one gesture: `Start`, any number of
//! `Move`s, then `End` or `Cancel`. Events that arrive out of order are logged
//! and ignored so pointer delivery races never disturb the component.

use crate::cache;
use crate::component::{Component, LayoutApplier};
use crate::config::{SnapConfig, SnapReleasePolicy};
use crate::position::PositionCoordinates;
use crate::snap::{self, SnapDecision};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Normalized gesture events from the pointer translation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    Start { pointer: Point },
    Move { pointer: Point },
    End,
    Cancel,
}

/// Lifecycle of a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// Created but no gesture has started.
    #[default]
    Idle,
    /// Between `Start` and `End`/`Cancel`.
    Dragging,
    /// Terminal. Later events are ignored.
    Released,
}

/// What a gesture event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureResponse {
    /// The drag began from `origin`.
    Started { origin: PositionCoordinates },
    /// A move applied this decision to the component.
    Moved(SnapDecision),
    /// A move found no target and the component held its position.
    Held(PositionCoordinates),
    /// The drag ended free and the position was cached.
    Committed(PositionCoordinates),
    /// The drag ended locked onto a target.
    ReleasedSnapped { target: usize },
    /// The drag ended without any applied move.
    ReleasedUnmoved,
    /// The drag was cancelled and the component put back.
    Restored(PositionCoordinates),
    /// The event did not fit the session state.
    Ignored,
}

/// Controller for a single drag gesture on one component.
#[derive(Debug, Clone)]
pub struct DragSession {
    config: Rc<SnapConfig>,
    state: DragState,
    /// Position pointer deltas are applied to.
    origin: PositionCoordinates,
    /// Rendered position when the gesture began, used by cancel.
    restore: PositionCoordinates,
    pointer_start: PositionCoordinates,
    /// Decision applied by the most recent move.
    last: Option<SnapDecision>,
}

impl DragSession {
    /// Create an idle session for a component with the given config.
    pub fn new(config: Rc<SnapConfig>) -> Self {
        Self {
            config,
            state: DragState::Idle,
            origin: PositionCoordinates::ZERO,
            restore: PositionCoordinates::ZERO,
            pointer_start: PositionCoordinates::ZERO,
            last: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// The config this session evaluates against.
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Decision applied by the most recent move, if any.
    pub fn last_decision(&self) -> Option<SnapDecision> {
        self.last
    }

    /// Check if the most recent move locked onto a target.
    pub fn is_snapped(&self) -> bool {
        self.last.is_some_and(|d| d.is_snapped())
    }

    /// Route a gesture event to the matching transition.
    pub fn handle<C>(&mut self, component: &mut C, event: &GestureEvent) -> GestureResponse
    where
        C: Component + LayoutApplier + ?Sized,
    {
        match *event {
            GestureEvent::Start { pointer } => self.start(component, pointer),
            GestureEvent::Move { pointer } => self.drag_to(component, pointer),
            GestureEvent::End => self.end(component),
            GestureEvent::Cancel => self.cancel(component),
        }
    }

    /// Begin the gesture.
    ///
    /// The origin comes from the cached free position when there is one,
    /// otherwise from where the component is currently rendered.
    pub fn start<C>(&mut self, component: &mut C, pointer: Point) -> GestureResponse
    where
        C: Component + LayoutApplier + ?Sized,
    {
        if self.state != DragState::Idle {
            log::debug!("Ignoring drag start in state {:?}", self.state);
            return GestureResponse::Ignored;
        }

        self.restore = component.rendered_position();
        self.origin = cache::get(component, &self.config).unwrap_or(self.restore);
        self.pointer_start = PositionCoordinates::from_point(pointer);
        self.last = None;
        self.state = DragState::Dragging;

        log::debug!("Drag started from {:?}", self.origin);
        GestureResponse::Started {
            origin: self.origin,
        }
    }

    /// Move the component to follow the pointer, snapping if a target is in range.
    pub fn drag_to<C>(&mut self, component: &mut C, pointer: Point) -> GestureResponse
    where
        C: Component + LayoutApplier + ?Sized,
    {
        if self.state != DragState::Dragging {
            log::debug!("Ignoring drag move in state {:?}", self.state);
            return GestureResponse::Ignored;
        }

        let (dx, dy) = PositionCoordinates::from_point(pointer).delta_from(self.pointer_start);
        let proposed = self.origin.translate(dx, dy);
        let decision = snap::decide(proposed, &self.config);

        if self.config.must_snap() && !decision.is_snapped() {
            // Hold where the component is shown. `last` stays as it was, so a
            // gesture that never snaps releases without a cache write.
            let held = self.last.map_or(self.restore, |d| d.position);
            component.apply_position(held);
            return GestureResponse::Held(held);
        }

        component.apply_position(decision.position);
        self.last = Some(decision);
        GestureResponse::Moved(decision)
    }

    /// Finish the gesture.
    ///
    /// A free result is written to the position cache. A snapped result is not
    /// cached; the release policy decides whether an older free position is
    /// forgotten.
    pub fn end<C>(&mut self, component: &mut C) -> GestureResponse
    where
        C: Component + LayoutApplier + ?Sized,
    {
        if self.state != DragState::Dragging {
            log::debug!("Ignoring drag end in state {:?}", self.state);
            return GestureResponse::Ignored;
        }
        self.state = DragState::Released;

        match self.last {
            None => GestureResponse::ReleasedUnmoved,
            Some(SnapDecision {
                target: Some(target),
                ..
            }) => {
                apply_release_policy(component, &self.config);
                log::debug!("Drag released onto target {}", target);
                GestureResponse::ReleasedSnapped { target }
            }
            Some(SnapDecision { position, .. }) => {
                cache::set(component, &self.config, position);
                log::debug!("Drag released free at {:?}", position);
                GestureResponse::Committed(position)
            }
        }
    }

    /// Abort the gesture, putting the component back where it started.
    /// Never touches the position cache.
    pub fn cancel<C>(&mut self, component: &mut C) -> GestureResponse
    where
        C: Component + LayoutApplier + ?Sized,
    {
        if self.state != DragState::Dragging {
            log::debug!("Ignoring drag cancel in state {:?}", self.state);
            return GestureResponse::Ignored;
        }
        self.state = DragState::Released;

        component.apply_position(self.restore);
        log::debug!("Drag cancelled, restored to {:?}", self.restore);
        GestureResponse::Restored(self.restore)
    }
}

fn apply_release_policy<C>(component: &mut C, config: &SnapConfig)
where
    C: Component + ?Sized,
{
    match config.release_policy() {
        SnapReleasePolicy::ClearCache => cache::clear(component, config),
        SnapReleasePolicy::KeepCache => {}
    }
}

/// Lock a component onto a target without a gesture.
///
/// Returns `false` when `index` does not name a target.
pub fn snap_to<C>(component: &mut C, config: &SnapConfig, index: usize) -> bool
where
    C: Component + LayoutApplier + ?Sized,
{
    let Some(target) = config.targets().get(index) else {
        log::warn!("No snap target at index {}", index);
        return false;
    };
    component.apply_position(target.output);
    apply_release_policy(component, config);
    true
}

/// Forget the cached position and put the component at `default`.
pub fn reset<C>(component: &mut C, config: &SnapConfig, default: PositionCoordinates)
where
    C: Component + LayoutApplier + ?Sized,
{
    cache::clear(component, config);
    component.apply_position(default);
}
