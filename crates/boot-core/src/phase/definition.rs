use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::{PhaseScope, Validation};
use crate::errors::PhaseFailure;

/// Índice de una fase. El orden de la tabla define la secuencia; puede haber
/// huecos entre índices.
pub type PhaseIndex = u32;

pub type ValidateFn = Box<dyn FnMut(&mut PhaseScope<'_>) -> Validation>;
pub type ExecuteFn = Box<dyn FnMut(&mut PhaseScope<'_>) -> Result<(), PhaseFailure>>;

/// Trait para handlers de fase implementados como struct.
///
/// Los métodos `has_validate`/`has_execute` declaran las capacidades: una
/// fase sin `validate` es válida por vacuidad, una fase sin `execute` avanza
/// sin efectos (y sin disparar los hooks de descubrimiento).
pub trait PhaseHandler {
    /// Precondición de la fase. No debe tener efectos fuera de lo que publica.
    fn validate(&mut self, _scope: &mut PhaseScope<'_>) -> Validation {
        Validation::valid()
    }

    /// Acción de la fase.
    fn execute(&mut self, _scope: &mut PhaseScope<'_>) -> Result<(), PhaseFailure> {
        Ok(())
    }

    fn has_validate(&self) -> bool {
        true
    }

    fn has_execute(&self) -> bool {
        true
    }
}

/// Descriptor de una fase.
pub struct Phase {
    index: PhaseIndex,
    name: String,
    anchor: bool,
    validate: Option<ValidateFn>,
    execute: Option<ExecuteFn>,
}

impl Phase {
    /// Fase sin capacidades: válida por vacuidad y sin efectos.
    pub fn new(index: PhaseIndex, name: impl Into<String>) -> Self {
        Self { index,
               name: name.into(),
               anchor: false,
               validate: None,
               execute: None }
    }

    /// Construye la fase a partir de un handler. El handler queda compartido
    /// entre las dos capacidades.
    pub fn from_handler<H>(index: PhaseIndex, name: impl Into<String>, handler: H) -> Self
        where H: PhaseHandler + 'static
    {
        let has_validate = handler.has_validate();
        let has_execute = handler.has_execute();
        let shared = Rc::new(RefCell::new(handler));
        let mut phase = Self::new(index, name);
        if has_validate {
            let h = Rc::clone(&shared);
            phase.validate = Some(Box::new(move |scope| h.borrow_mut().validate(scope)));
        }
        if has_execute {
            let h = Rc::clone(&shared);
            phase.execute = Some(Box::new(move |scope| h.borrow_mut().execute(scope)));
        }
        phase
    }

    /// Declara la capacidad `validate` con un closure.
    pub fn validate<F>(mut self, f: F) -> Self
        where F: FnMut(&mut PhaseScope<'_>) -> Validation + 'static
    {
        self.validate = Some(Box::new(f));
        self
    }

    /// Declara la capacidad `execute` con un closure.
    pub fn execute<F>(mut self, f: F) -> Self
        where F: FnMut(&mut PhaseScope<'_>) -> Result<(), PhaseFailure> + 'static
    {
        self.execute = Some(Box::new(f));
        self
    }

    /// Marca la fase como ancla (aparece en la vista restringida).
    pub fn anchor(mut self) -> Self {
        self.anchor = true;
        self
    }

    pub fn index(&self) -> PhaseIndex {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_anchor(&self) -> bool {
        self.anchor
    }

    pub fn has_validate(&self) -> bool {
        self.validate.is_some()
    }

    pub fn has_execute(&self) -> bool {
        self.execute.is_some()
    }

    /// Invoca `validate`. `None` si la fase no declara la capacidad.
    pub(crate) fn run_validate(&mut self, scope: &mut PhaseScope<'_>) -> Option<Validation> {
        self.validate.as_mut().map(|f| f(scope))
    }

    /// Invoca `execute`. `None` si la fase no declara la capacidad.
    pub(crate) fn run_execute(&mut self, scope: &mut PhaseScope<'_>) -> Option<Result<(), PhaseFailure>> {
        self.execute.as_mut().map(|f| f(scope))
    }
}

impl fmt::Debug for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Phase")
         .field("index", &self.index)
         .field("name", &self.name)
         .field("anchor", &self.anchor)
         .field("validate", &self.has_validate())
         .field("execute", &self.has_execute())
         .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ValidateOnly;

    impl PhaseHandler for ValidateOnly {
        fn validate(&mut self, _scope: &mut PhaseScope<'_>) -> Validation {
            Validation::invalid("E_NOPE", "never")
        }

        fn has_execute(&self) -> bool {
            false
        }
    }

    #[test]
    fn capabilities_follow_the_handler() {
        let p = Phase::from_handler(3, "v", ValidateOnly);
        assert!(p.has_validate());
        assert!(!p.has_execute());
        assert_eq!(p.index(), 3);
    }

    #[test]
    fn bare_phase_has_no_capabilities() {
        let p = Phase::new(0, "core").anchor();
        assert!(!p.has_validate());
        assert!(!p.has_execute());
        assert!(p.is_anchor());
        assert!(format!("{:?}", p).contains("core"));
    }
}
