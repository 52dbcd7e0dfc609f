//! Estrategias de progresión construidas sobre el driver y la cache de
//! validación. No llevan contabilidad propia.

use log::{debug, info};

use super::BootstrapEngine;
use crate::constants::LOG_TARGET;
use crate::event::EventStore;
use crate::phase::PhaseIndex;

/// Fase objetivo de `bootstrap_to_phase`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Phase(PhaseIndex),
    /// La fase más alta alcanzable; nunca es un error.
    Max,
}

impl From<PhaseIndex> for Target {
    fn from(index: PhaseIndex) -> Self {
        Target::Phase(index)
    }
}

impl std::str::FromStr for Target {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            return Ok(Target::Max);
        }
        s.parse::<PhaseIndex>().map(Target::Phase)
    }
}

impl<E> BootstrapEngine<E> where E: EventStore
{
    /// Modo estricto: alcanza exactamente `target` o falla.
    ///
    /// La primera validación fallida corta el recorrido, copia sus errores a
    /// la superficie de errores y devuelve `false`.
    pub fn bootstrap_to_phase(&mut self, target: impl Into<Target>) -> bool {
        let target = match target.into() {
            Target::Max => {
                self.bootstrap_max(None);
                return true;
            }
            Target::Phase(index) => index,
        };

        self.begin_invocation();
        info!(target: LOG_TARGET, "Bootstrap to phase {target}.");

        let mut result = true;
        for index in self.table.indices() {
            if index > target {
                break;
            }
            if !self.validate_cached(index) {
                self.store.surface_validation_errors(index);
                return false;
            }
            if !self.has_reached(index) {
                result &= self.drive_to(index, target);
            }
        }
        result
    }

    /// Modo best-effort: avanza hasta la fase más alta alcanzable sin
    /// registrar errores. `ceiling` limita el recorrido.
    ///
    /// Devuelve la fase alcanzada (`current_phase`).
    pub fn bootstrap_max(&mut self, ceiling: Option<PhaseIndex>) -> Option<PhaseIndex> {
        self.begin_invocation();
        let ceiling = ceiling.unwrap_or_else(|| self.table.max_index());

        for index in self.table.indices() {
            if index > ceiling {
                break;
            }
            if !self.validate_cached(index) {
                debug!(target: LOG_TARGET, "Bootstrap max stopped before phase {index}");
                break;
            }
            if !self.has_reached(index) {
                self.drive_to(index, ceiling);
            }
        }

        let reached = self.current_phase();
        info!(target: LOG_TARGET, "Bootstrap max reached phase {:?}", reached);
        reached
    }
}
