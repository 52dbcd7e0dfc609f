//! Tipos de evento del bootstrap y estructura `BootEvent`.
//!
//! Rol en el motor:
//! - Cada validación, ejecución o bloqueo de una fase emite un evento a un
//!   `EventStore` append-only.
//! - Los eventos son diagnóstico: el estado autoritativo vive en el
//!   `ContextStore`, no se reconstruye por replay.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BootErrorKind;
use crate::phase::PhaseIndex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BootEventKind {
    /// Primer evento de una sesión.
    SessionStarted { phase_count: usize },
    /// Resultado (calculado, no cacheado) de la validación de una fase.
    PhaseValidated { index: PhaseIndex, name: String, ok: bool },
    /// El `execute` de la fase terminó bien.
    PhaseExecuted { index: PhaseIndex, name: String },
    /// El `execute` de la fase devolvió error.
    PhaseExecuteFailed { index: PhaseIndex, name: String, code: String },
    /// La fase validó pero su `execute` no corrió.
    PhaseSkipped { index: PhaseIndex, name: String, reason: BootErrorKind },
    /// `current_phase` avanzó hasta `index`.
    PhaseReached { index: PhaseIndex },
    /// Un hook de descubrimiento falló (no afecta la superficie de errores).
    HookFailed { index: PhaseIndex, message: String },
    /// La sesión anterior se descartó.
    SessionReset { previous: Uuid },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootEvent {
    pub seq: u64, // asignado por el EventStore (orden append)
    pub session_id: Uuid,
    pub kind: BootEventKind,
    pub ts: DateTime<Utc>,
}
