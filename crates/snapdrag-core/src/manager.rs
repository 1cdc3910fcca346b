//! Registry of draggable components and their active gestures.

use crate::component::{Component, LayoutApplier};
use crate::config::SnapConfig;
use crate::session::{DragSession, DragState, GestureEvent, GestureResponse};
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use uuid::Uuid;

/// Identifier handed out when a component is registered.
pub type ComponentId = Uuid;

/// Registry errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Attribute {name} is already used by another component")]
    AttributeCollision { name: String },
    #[error("Unknown component: {0}")]
    UnknownComponent(ComponentId),
}

#[derive(Debug)]
struct Registration {
    config: Rc<SnapConfig>,
    session: Option<DragSession>,
}

/// Tracks which components are draggable and routes gesture events to them.
///
/// Each registration owns its config. Attribute names are checked against all
/// other registrations so two components never share a cache slot. At most one
/// session is active per component.
#[derive(Debug, Default)]
pub struct DragManager {
    registrations: HashMap<ComponentId, Registration>,
}

impl DragManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a component draggable with `config`.
    pub fn register(&mut self, config: SnapConfig) -> Result<ComponentId, RegistryError> {
        for registration in self.registrations.values() {
            for name in [config.left_attr(), config.top_attr()] {
                if registration.config.owns_attr(name) {
                    return Err(RegistryError::AttributeCollision {
                        name: name.to_string(),
                    });
                }
            }
        }

        let id = Uuid::new_v4();
        self.registrations.insert(
            id,
            Registration {
                config: Rc::new(config),
                session: None,
            },
        );
        log::debug!("Registered draggable component {}", id);
        Ok(id)
    }

    /// Stop tracking a component, dropping any gesture in progress.
    pub fn unregister(&mut self, id: ComponentId) -> Result<(), RegistryError> {
        self.registrations
            .remove(&id)
            .map(|_| ())
            .ok_or(RegistryError::UnknownComponent(id))
    }

    /// Config for a registered component.
    pub fn config(&self, id: ComponentId) -> Option<&SnapConfig> {
        self.registrations.get(&id).map(|r| r.config.as_ref())
    }

    /// Check if a component has a gesture in progress.
    pub fn is_dragging(&self, id: ComponentId) -> bool {
        self.registrations
            .get(&id)
            .and_then(|r| r.session.as_ref())
            .is_some_and(|s| s.state() == DragState::Dragging)
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Check if no components are registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Deliver a gesture event for a registered component.
    ///
    /// `Start` opens a fresh session. `End` and `Cancel` close it. Events with
    /// no open session are ignored.
    pub fn dispatch<C>(
        &mut self,
        id: ComponentId,
        component: &mut C,
        event: &GestureEvent,
    ) -> Result<GestureResponse, RegistryError>
    where
        C: Component + LayoutApplier + ?Sized,
    {
        let registration = self
            .registrations
            .get_mut(&id)
            .ok_or(RegistryError::UnknownComponent(id))?;

        if matches!(event, GestureEvent::Start { .. }) && registration.session.is_none() {
            registration.session = Some(DragSession::new(registration.config.clone()));
        }

        let Some(session) = registration.session.as_mut() else {
            log::debug!("Ignoring {:?} for {} with no active drag", event, id);
            return Ok(GestureResponse::Ignored);
        };

        let response = session.handle(component, event);
        if session.state() == DragState::Released {
            registration.session = None;
        }
        Ok(response)
    }
}
