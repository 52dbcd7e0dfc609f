//! Driver de bootstrap: valida y ejecuta fases en orden de tabla.

use log::{debug, warn};

use super::BootstrapEngine;
use crate::constants::LOG_TARGET;
use crate::errors::{BootErrorKind, PhaseFailure};
use crate::event::{BootEventKind, EventStore};
use crate::phase::{PhaseIndex, PhaseScope};

impl<E> BootstrapEngine<E> where E: EventStore
{
    /// Ejecuta fases desde la primera no intentada hasta `index` inclusive.
    ///
    /// Se detiene en la primera validación fallida, copiando sus errores a la
    /// superficie de errores. Devuelve `true` si la superficie de errores
    /// queda vacía. Si `index` ya fue alcanzado es un no-op que devuelve
    /// `true`.
    pub fn run_to(&mut self, index: PhaseIndex) -> bool {
        self.begin_invocation();
        self.drive_to(index, index)
    }

    pub(super) fn drive_to(&mut self, index: PhaseIndex, ceiling: PhaseIndex) -> bool {
        if self.store.state().has_reached(index) {
            return true;
        }

        self.store.state_mut().bootstrapping = true;
        let completed = self.drive(index, ceiling);
        self.store.state_mut().bootstrapping = false;

        completed && self.store.errors().is_empty()
    }

    /// Devuelve `false` si se detuvo en una validación fallida.
    fn drive(&mut self, index: PhaseIndex, ceiling: PhaseIndex) -> bool {
        // Una fase fallida bloquea todas las siguientes durante la sesión.
        if let Some(failed) = self.halted_at {
            let copied = self.store.surface_validation_errors(failed);
            warn!(target: LOG_TARGET,
                  "Bootstrap halted at phase {failed}: {copied} validation error(s)");
            return false;
        }

        while let Some(phase) = self.table.get(self.driver_cursor) {
            let current = phase.index();
            if current > index {
                break;
            }
            let name = phase.name().to_string();
            let has_execute = phase.has_execute();
            let pos = self.driver_cursor;
            // La fase se consume aunque falle: no se reintenta en esta sesión.
            self.driver_cursor += 1;

            if !self.validate_cached(current) {
                self.halted_at = Some(current);
                let copied = self.store.surface_validation_errors(current);
                warn!(target: LOG_TARGET,
                      "Bootstrap stopped at phase {current} ({name}): {copied} validation error(s)");
                return false;
            }

            if has_execute {
                self.execute_phase(pos, current, &name, ceiling);
            }

            self.store.state_mut().advance_current(current);
            self.emit(BootEventKind::PhaseReached { index: current });
        }
        true
    }

    fn execute_phase(&mut self, pos: usize, index: PhaseIndex, name: &str, ceiling: PhaseIndex) {
        if !self.store.errors().is_empty() {
            warn!(target: LOG_TARGET,
                  "Skipping phase {index} ({name}): errors already recorded ({})",
                  self.store.errors().codes().join(", "));
            self.blocked.insert(index);
            self.emit(BootEventKind::PhaseSkipped { index,
                                                    name: name.to_string(),
                                                    reason: BootErrorKind::PriorErrorBlock });
            return;
        }

        debug!(target: LOG_TARGET, "Bootstrap phase: {name}()");
        let outcome = match self.table.get_mut(pos) {
            Some(phase) => {
                let mut scope = PhaseScope::new(&mut self.store, index, name);
                phase.run_execute(&mut scope)
            }
            None => None,
        };

        match outcome {
            Some(Ok(())) => {
                self.emit(BootEventKind::PhaseExecuted { index,
                                                         name: name.to_string() });
                self.fire_hooks(index, ceiling);
            }
            Some(Err(PhaseFailure { code, message })) => {
                warn!(target: LOG_TARGET, "Phase {index} ({name}) failed: {code}: {message}");
                self.store.errors_mut().set_error(code.clone(), message, BootErrorKind::ExecuteFailure);
                self.emit(BootEventKind::PhaseExecuteFailed { index,
                                                              name: name.to_string(),
                                                              code });
            }
            None => {}
        }
    }

    fn fire_hooks(&mut self, index: PhaseIndex, ceiling: PhaseIndex) {
        let mut failures = Vec::new();
        for hook in self.hooks.iter_mut() {
            if let Err(message) = hook.on_phase_advanced(index, ceiling, &self.store) {
                failures.push(message);
            }
        }
        for message in failures {
            warn!(target: LOG_TARGET, "Discovery hook failed after phase {index}: {message}");
            self.emit(BootEventKind::HookFailed { index, message });
        }
    }
}
