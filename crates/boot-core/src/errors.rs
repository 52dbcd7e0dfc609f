//! Errores del core.
//!
//! `CoreBootError` cubre lo que sí es fatal (tabla de fases mal formada,
//! índices desconocidos): es el error de configuración y nunca llega a la
//! superficie de errores. Los fallos de una fase no son errores de Rust: se
//! acumulan como datos en la superficie de errores y se clasifican con
//! `BootErrorKind`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::phase::PhaseIndex;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreBootError {
    #[error("phase table is empty")] EmptyPhaseTable,
    #[error("duplicate phase index {0}")] DuplicatePhaseIndex(PhaseIndex),
    #[error("unknown phase index {0}")] UnknownPhase(PhaseIndex),
}

/// Clasificación de los problemas que puede registrar un bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BootErrorKind {
    /// Las precondiciones de una fase no se cumplen.
    ValidationFailure,
    /// La fase validó pero no se ejecutó porque ya había un error registrado.
    PriorErrorBlock,
    /// El paso `execute` de una fase devolvió `Err`.
    ExecuteFailure,
    /// Error registrado por un colaborador externo vía `set_error`.
    External,
}

/// Fallo devuelto por el paso `execute` de una fase.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct PhaseFailure {
    pub code: String,
    pub message: String,
}

impl PhaseFailure {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(),
               message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(CoreBootError::DuplicatePhaseIndex(3).to_string(), "duplicate phase index 3");
        assert_eq!(PhaseFailure::new("E_X", "boom").to_string(), "E_X: boom");
    }
}
