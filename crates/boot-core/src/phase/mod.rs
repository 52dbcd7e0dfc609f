//! Definiciones relacionadas a fases.
//!
//! Una fase es un paso ordenado de preparación del proceso con una
//! precondición (`validate`, memoizada por el motor) y una acción con efectos
//! (`execute`, a lo sumo una vez por sesión). Este módulo define:
//! - `Phase`: descriptor inmutable con sus capacidades.
//! - `PhaseHandler`: interfaz para handlers basados en structs.
//! - `Validation`: resultado de `validate` (ok, errores, valores publicados).
//! - `PhaseScope`: vista del contexto entregada a los handlers.
//! - `PhaseTable`: tabla ordenada y validada de fases.

pub mod definition;
mod scope;
pub mod table;
mod validation;

pub use definition::{ExecuteFn, Phase, PhaseHandler, PhaseIndex, ValidateFn};
pub use scope::PhaseScope;
pub use table::{PhaseInfo, PhaseTable, PhaseTableBuilder};
pub use validation::Validation;
