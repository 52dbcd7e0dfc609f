//! Cache de validación.
//!
//! Cada fase se valida a lo sumo una vez por sesión. Validar la fase `i`
//! obliga a validar antes todas las fases previas aún no validadas, en orden
//! de tabla.

use log::debug;

use super::BootstrapEngine;
use crate::constants::{GENERIC_VALIDATION_CODE, LOG_TARGET, NS_BOOTSTRAP_ERRORS, NS_BOOTSTRAP_VALUES};
use crate::event::{BootEventKind, EventStore};
use crate::phase::{PhaseIndex, PhaseScope, Validation};

impl<E> BootstrapEngine<E> where E: EventStore
{
    /// Valida la fase `index` (y las previas pendientes) usando la cache.
    ///
    /// Un índice que no existe en la tabla devuelve `false`.
    pub fn validate(&mut self, index: PhaseIndex) -> bool {
        self.begin_invocation();
        self.validate_cached(index)
    }

    pub(super) fn validate_cached(&mut self, index: PhaseIndex) -> bool {
        if let Some(ok) = self.store.state().cached(index) {
            return ok;
        }

        if self.fresh_pass {
            self.store.clear_namespace(NS_BOOTSTRAP_ERRORS);
            if self.store.state().validated_phase.is_none() {
                self.store.clear_namespace(NS_BOOTSTRAP_VALUES);
            }
            self.fresh_pass = false;
        }

        while let Some(phase) = self.table.get_mut(self.validation_cursor) {
            let current = phase.index();
            if current > index {
                break;
            }
            let name = phase.name().to_string();
            let outcome = {
                let mut scope = PhaseScope::new(&mut self.store, current, &name);
                phase.run_validate(&mut scope)
            };
            let ok = match outcome {
                Some(validation) => self.record_validation(current, &name, validation),
                // Sin capacidad `validate`: válida por vacuidad.
                None => true,
            };

            let state = self.store.state_mut();
            state.validation_cache.insert(current, ok);
            state.advance_validated(current);
            self.validation_cursor += 1;

            debug!(target: LOG_TARGET, "Validated phase {current} ({name}): {ok}");
            self.emit(BootEventKind::PhaseValidated { index: current, name, ok });
        }

        self.store.state().cached(index).unwrap_or(false)
    }

    /// Publica valores y acumula errores de una validación. Devuelve si fue
    /// exitosa.
    fn record_validation(&mut self, index: PhaseIndex, name: &str, validation: Validation) -> bool {
        let Validation { ok, mut errors, values } = validation;
        for (key, value) in values {
            self.store.set(NS_BOOTSTRAP_VALUES, key, value);
        }
        if !ok && errors.is_empty() {
            errors.insert(GENERIC_VALIDATION_CODE.to_string(),
                          format!("Phase {name} ({index}) failed validation"));
        }
        let pending = self.store.namespace_mut(NS_BOOTSTRAP_ERRORS);
        for (code, message) in errors.iter() {
            pending.insert(code.clone(), message.clone().into());
        }
        if !ok {
            self.store.record_failure(index, errors);
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use serde_json::json;

    use crate::constants::NS_BOOTSTRAP_ERRORS;
    use crate::phase::{Phase, PhaseTable, Validation};
    use crate::BootstrapEngine;

    fn counted(index: u32, ok: bool, calls: &Rc<Cell<u32>>) -> Phase {
        let c = Rc::clone(calls);
        Phase::new(index, format!("p{index}")).validate(move |_| {
                                                  c.set(c.get() + 1);
                                                  Validation::from(ok)
                                              })
    }

    #[test]
    fn validates_lower_phases_first_and_only_once() {
        let calls: Vec<Rc<Cell<u32>>> = (0..3).map(|_| Rc::new(Cell::new(0))).collect();
        let table = PhaseTable::new((0..3).map(|i| counted(i, true, &calls[i as usize])).collect()).unwrap();
        let mut engine = BootstrapEngine::new(table);

        assert!(engine.validate(1));
        assert_eq!(calls[0].get(), 1);
        assert_eq!(calls[1].get(), 1);
        assert_eq!(calls[2].get(), 0);
        assert_eq!(engine.validated_phase(), Some(1));

        assert!(engine.validate(2));
        assert!(engine.validate(0));
        assert!(engine.validate(2));
        assert_eq!(calls.iter().map(|c| c.get()).collect::<Vec<_>>(), vec![1, 1, 1]);
    }

    #[test]
    fn cached_result_is_never_recomputed() {
        let flag = Rc::new(Cell::new(false));
        let f = Rc::clone(&flag);
        let table = PhaseTable::new(vec![Phase::new(0, "flaky").validate(move |_| Validation::from(f.get()))]).unwrap();
        let mut engine = BootstrapEngine::new(table);
        assert!(!engine.validate(0));
        flag.set(true);
        assert!(!engine.validate(0));
    }

    #[test]
    fn phase_without_validate_is_vacuously_valid() {
        let table = PhaseTable::new(vec![Phase::new(0, "core")]).unwrap();
        let mut engine = BootstrapEngine::new(table);
        assert!(engine.validate(0));
        assert_eq!(engine.state().cached(0), Some(true));
    }

    #[test]
    fn unknown_index_is_invalid() {
        let table = PhaseTable::new(vec![Phase::new(0, "core"), Phase::new(4, "full")]).unwrap();
        let mut engine = BootstrapEngine::new(table);
        assert!(!engine.validate(2));
        // la fase 0 sí se validó en el recorrido
        assert_eq!(engine.state().cached(0), Some(true));
        assert_eq!(engine.state().cached(4), None);
    }

    #[test]
    fn failure_without_errors_gets_generic_code() {
        let table = PhaseTable::new(vec![Phase::new(0, "site").validate(|_| Validation::from(false))]).unwrap();
        let mut engine = BootstrapEngine::new(table);
        assert!(!engine.validate(0));
        let pending = engine.context().namespace(NS_BOOTSTRAP_ERRORS).cloned().unwrap_or_default();
        assert!(pending.contains_key(crate::constants::GENERIC_VALIDATION_CODE));
        // validar no toca la superficie de errores
        assert!(engine.errors().is_empty());
    }

    #[test]
    fn published_values_are_visible_to_later_validations() {
        let table = PhaseTable::new(vec![
            Phase::new(0, "root").validate(|_| Validation::valid().with_value("root", json!("/srv"))),
            Phase::new(1, "site").validate(|scope| match scope.value("root") {
                Some(v) if v == &json!("/srv") => Validation::valid(),
                _ => Validation::invalid("E_NO_ROOT", "root missing"),
            }),
        ]).unwrap();
        let mut engine = BootstrapEngine::new(table);
        assert!(engine.validate(1));
        assert_eq!(engine.phase_value("root", None), Some(json!("/srv")));
    }
}
