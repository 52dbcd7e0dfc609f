use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::phase::PhaseIndex;

/// Estado mutable del bootstrap durante una sesión.
///
/// Invariantes:
/// - `current_phase` y `validated_phase` sólo avanzan.
/// - Una entrada de `validation_cache` nunca se recalcula dentro de la misma
///   sesión.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapState {
    /// Fase más alta cuyo `execute` terminó. `None` = ninguna.
    pub current_phase: Option<PhaseIndex>,
    /// Fase más alta cuya validación ya se intentó.
    pub validated_phase: Option<PhaseIndex>,
    pub validation_cache: BTreeMap<PhaseIndex, bool>,
    /// `true` sólo mientras el driver está corriendo fases.
    pub bootstrapping: bool,
}

impl BootstrapState {
    /// Avanza `current_phase` sin retroceder nunca.
    pub(crate) fn advance_current(&mut self, index: PhaseIndex) {
        if self.current_phase.map_or(true, |c| index > c) {
            self.current_phase = Some(index);
        }
    }

    pub(crate) fn advance_validated(&mut self, index: PhaseIndex) {
        if self.validated_phase.map_or(true, |v| index > v) {
            self.validated_phase = Some(index);
        }
    }

    pub fn has_reached(&self, index: PhaseIndex) -> bool {
        self.current_phase.is_some_and(|c| c >= index)
    }

    pub fn cached(&self, index: PhaseIndex) -> Option<bool> {
        self.validation_cache.get(&index).copied()
    }
}
