//! Almacén de contexto con namespaces.
//!
//! Un único `ContextStore` por sesión de bootstrap. No hay locking: el motor
//! toma `&mut self` en todas las operaciones que mutan estado.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use serde_json::Value;

use super::{BootstrapState, ErrorSurface};
use crate::constants::NS_BOOTSTRAP_VALUES;
use crate::errors::BootErrorKind;
use crate::phase::PhaseIndex;

#[derive(Debug, Default)]
pub struct ContextStore {
    namespaces: HashMap<String, IndexMap<String, Value>>,
    state: BootstrapState,
    errors: ErrorSurface,
    /// Errores propios de cada fase cuya validación falló.
    failures: BTreeMap<PhaseIndex, IndexMap<String, String>>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lee `key` dentro de `namespace`, devolviendo `default` si no existe.
    pub fn get(&self, namespace: &str, key: &str, default: Value) -> Value {
        self.namespaces
            .get(namespace)
            .and_then(|ns| ns.get(key))
            .cloned()
            .unwrap_or(default)
    }

    /// Escribe `value` y devuelve el valor anterior, si lo había.
    pub fn set(&mut self, namespace: &str, key: impl Into<String>, value: Value) -> Option<Value> {
        self.namespace_mut(namespace).insert(key.into(), value)
    }

    /// Acceso mutable al mapa de un namespace, creándolo vacío si hace falta.
    pub fn namespace_mut(&mut self, namespace: &str) -> &mut IndexMap<String, Value> {
        self.namespaces.entry(namespace.to_string()).or_default()
    }

    pub fn namespace(&self, namespace: &str) -> Option<&IndexMap<String, Value>> {
        self.namespaces.get(namespace)
    }

    pub fn clear_namespace(&mut self, namespace: &str) {
        if let Some(ns) = self.namespaces.get_mut(namespace) {
            ns.clear();
        }
    }

    pub fn state(&self) -> &BootstrapState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut BootstrapState {
        &mut self.state
    }

    pub fn errors(&self) -> &ErrorSurface {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut ErrorSurface {
        &mut self.errors
    }

    /// Valor publicado por una fase.
    pub fn bootstrap_value(&self, key: &str) -> Option<&Value> {
        self.namespaces.get(NS_BOOTSTRAP_VALUES).and_then(|ns| ns.get(key))
    }

    /// Guarda los errores con los que falló la validación de `index`.
    pub(crate) fn record_failure(&mut self, index: PhaseIndex, errors: IndexMap<String, String>) {
        self.failures.insert(index, errors);
    }

    /// Copia a la superficie de errores los errores con los que falló la
    /// fase `index`. Devuelve cuántos se copiaron.
    ///
    /// No depende del namespace de errores pendientes, que una pasada
    /// posterior pudo haber limpiado.
    pub(crate) fn surface_validation_errors(&mut self, index: PhaseIndex) -> usize {
        let Some(pending) = self.failures.get(&index) else {
            return 0;
        };
        for (code, msg) in pending.iter() {
            self.errors.set_error(code.clone(), msg.clone(), BootErrorKind::ValidationFailure);
        }
        pending.len()
    }

    /// Descarta todo: namespaces, estado y errores.
    pub(crate) fn reset(&mut self) {
        self.namespaces.clear();
        self.state = BootstrapState::default();
        self.errors.clear();
        self.failures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NS_BOOTSTRAP_ERRORS;
    use serde_json::json;

    #[test]
    fn get_returns_default_when_missing() {
        let store = ContextStore::new();
        assert_eq!(store.get("ns", "k", json!("dflt")), json!("dflt"));
    }

    #[test]
    fn set_returns_previous_value() {
        let mut store = ContextStore::new();
        assert_eq!(store.set("ns", "k", json!(1)), None);
        assert_eq!(store.set("ns", "k", json!(2)), Some(json!(1)));
        assert_eq!(store.get("ns", "k", Value::Null), json!(2));
    }

    #[test]
    fn namespace_mut_initializes_lazily() {
        let mut store = ContextStore::new();
        assert!(store.namespace("lazy").is_none());
        store.namespace_mut("lazy").insert("a".into(), json!(true));
        assert_eq!(store.namespace("lazy").map(|n| n.len()), Some(1));
        store.clear_namespace("lazy");
        assert_eq!(store.namespace("lazy").map(|n| n.len()), Some(0));
    }

    #[test]
    fn validation_errors_are_copied_in_order() {
        let mut store = ContextStore::new();
        let errors: IndexMap<String, String> =
            [("E_B", "b"), ("E_A", "a")].into_iter().map(|(c, m)| (c.to_string(), m.to_string())).collect();
        store.record_failure(2, errors);
        // la pasada siguiente puede limpiar los pendientes sin perder los de la fase
        store.clear_namespace(NS_BOOTSTRAP_ERRORS);
        assert_eq!(store.surface_validation_errors(1), 0);
        assert_eq!(store.surface_validation_errors(2), 2);
        assert_eq!(store.errors().codes(), vec!["E_B", "E_A"]);
        assert_eq!(store.errors().entry("E_A").map(|e| e.kind), Some(BootErrorKind::ValidationFailure));
    }
}
