//! Superficie de errores del proceso: mapa ordenado código → mensaje.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::BootErrorKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub message: String,
    pub kind: BootErrorKind,
}

/// Errores visibles para cualquier llamador tras una estrategia.
///
/// Registrar un código ya presente reemplaza el mensaje pero conserva la
/// posición original.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorSurface {
    entries: IndexMap<String, ErrorEntry>,
}

impl ErrorSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_error(&mut self, code: impl Into<String>, message: impl Into<String>, kind: BootErrorKind) {
        self.entries.insert(code.into(),
                            ErrorEntry { message: message.into(),
                                         kind });
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(|e| e.message.as_str())
    }

    pub fn entry(&self, code: &str) -> Option<&ErrorEntry> {
        self.entries.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.entries.keys().map(|k| k.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
