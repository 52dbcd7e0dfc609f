//! Vista del contexto entregada a `validate`/`execute`.

use serde_json::Value;

use super::PhaseIndex;
use crate::constants::NS_BOOTSTRAP_VALUES;
use crate::context::ContextStore;

/// Contexto de ejecución de una fase.
///
/// Es el único canal sancionado para pasar datos hacia fases posteriores:
/// `phase_value` escribe en el namespace de valores de bootstrap del
/// `ContextStore`.
pub struct PhaseScope<'a> {
    store: &'a mut ContextStore,
    index: PhaseIndex,
    name: &'a str,
}

impl<'a> PhaseScope<'a> {
    pub(crate) fn new(store: &'a mut ContextStore, index: PhaseIndex, name: &'a str) -> Self {
        Self { store, index, name }
    }

    pub fn phase_index(&self) -> PhaseIndex {
        self.index
    }

    pub fn phase_name(&self) -> &str {
        self.name
    }

    /// Con `Some(value)` sobrescribe y devuelve el valor; con `None` lee.
    pub fn phase_value(&mut self, key: &str, value: Option<Value>) -> Option<Value> {
        match value {
            Some(v) => {
                self.store.set(NS_BOOTSTRAP_VALUES, key, v.clone());
                Some(v)
            }
            None => self.store.bootstrap_value(key).cloned(),
        }
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.store.bootstrap_value(key)
    }

    pub fn get(&self, namespace: &str, key: &str, default: Value) -> Value {
        self.store.get(namespace, key, default)
    }

    pub fn set(&mut self, namespace: &str, key: impl Into<String>, value: Value) -> Option<Value> {
        self.store.set(namespace, key, value)
    }

    pub fn has_reached(&self, index: PhaseIndex) -> bool {
        self.store.state().has_reached(index)
    }

    pub fn is_bootstrapping(&self) -> bool {
        self.store.state().bootstrapping
    }
}
