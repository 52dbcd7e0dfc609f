use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resultado de la capacidad `validate` de una fase.
///
/// Registrar un error marca la validación como fallida.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub ok: bool,
    pub errors: IndexMap<String, String>,
    pub values: IndexMap<String, Value>,
}

impl Validation {
    pub fn valid() -> Self {
        Self { ok: true,
               errors: IndexMap::new(),
               values: IndexMap::new() }
    }

    pub fn invalid(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::valid().with_error(code, message)
    }

    /// Publica un valor de bootstrap para esta fase y las siguientes.
    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn with_error(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.ok = false;
        self.errors.insert(code.into(), message.into());
        self
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }
}

impl From<bool> for Validation {
    fn from(ok: bool) -> Self {
        Self { ok, ..Self::valid() }
    }
}
