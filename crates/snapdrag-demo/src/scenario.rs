//! Scenario files: a component, its snap config and a stream of gestures.

use serde::{Deserialize, Serialize};
use snapdrag_core::{
    DragManager, GestureEvent, GestureResponse, Panel, PositionCoordinates, RegistryError,
    SnapConfig, cache,
};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors while loading or replaying a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// A replayable drag scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub config: SnapConfig,
    #[serde(default)]
    pub panel: Panel,
    #[serde(default)]
    pub events: Vec<GestureEvent>,
}

impl Scenario {
    /// Parse a scenario from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scenario from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Replay all events against the panel.
    pub fn run(self) -> Result<Report, ScenarioError> {
        let mut manager = DragManager::new();
        let mut panel = self.panel;
        let id = manager.register(self.config)?;

        let mut responses = Vec::with_capacity(self.events.len());
        for event in &self.events {
            responses.push(manager.dispatch(id, &mut panel, event)?);
        }

        let cached = manager
            .config(id)
            .and_then(|config| cache::get(&panel, config));
        let attributes = panel
            .element
            .attributes()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Ok(Report {
            responses,
            position: panel.position,
            cached,
            attributes,
        })
    }
}

/// Outcome of a replayed scenario.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub responses: Vec<GestureResponse>,
    pub position: PositionCoordinates,
    pub cached: Option<PositionCoordinates>,
    pub attributes: BTreeMap<String, String>,
}
