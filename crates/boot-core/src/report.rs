//! Reporte serializable del estado de una sesión de bootstrap.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::context::ErrorSurface;
use crate::phase::PhaseIndex;

/// Estado observable de una fase dentro de la sesión.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    /// Aún no validada.
    Pending,
    /// Validada pero no alcanzada.
    Validated,
    /// Validación fallida (permanente en la sesión).
    Failed,
    /// Alcanzada (`current_phase >= index`).
    Reached,
    /// Alcanzada sin ejecutar por errores previos.
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseReport {
    pub index: PhaseIndex,
    pub name: String,
    pub anchor: bool,
    pub status: PhaseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapReport {
    pub engine_version: String,
    pub session_id: Uuid,
    pub current_phase: Option<PhaseIndex>,
    pub validated_phase: Option<PhaseIndex>,
    pub phases: Vec<PhaseReport>,
    pub errors: ErrorSurface,
    pub values: IndexMap<String, Value>,
}

impl BootstrapReport {
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn status_of(&self, index: PhaseIndex) -> Option<PhaseStatus> {
        self.phases.iter().find(|p| p.index == index).map(|p| p.status)
    }
}
