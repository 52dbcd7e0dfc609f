//! ConfigFilePhase: exige el archivo de configuración bajo la raíz y lo
//! carga (formato dotenv) en `host.config`.

use std::path::PathBuf;

use boot_core::{PhaseFailure, PhaseHandler, PhaseScope, Validation};
use log::debug;
use serde_json::{json, Value};

use super::{CODE_BAD_CONFIG, CODE_NO_CONFIG, CODE_NO_ROOT, NS_HOST_CONFIG};

#[derive(Debug, Clone)]
pub struct ConfigFilePhase {
    file_name: String,
}

impl ConfigFilePhase {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self { file_name: file_name.into() }
    }
}

impl PhaseHandler for ConfigFilePhase {
    fn validate(&mut self, scope: &mut PhaseScope<'_>) -> Validation {
        let Some(root) = scope.value("root").and_then(Value::as_str).map(PathBuf::from) else {
            return Validation::invalid(CODE_NO_ROOT, "Configuration requires a discovered root");
        };
        let path = root.join(&self.file_name);
        if path.is_file() {
            Validation::valid().with_value("config_path", json!(path.display().to_string()))
        } else {
            Validation::invalid(CODE_NO_CONFIG, format!("Configuration file {} not found", path.display()))
        }
    }

    fn execute(&mut self, scope: &mut PhaseScope<'_>) -> Result<(), PhaseFailure> {
        let path = scope.value("config_path")
                        .and_then(Value::as_str)
                        .map(PathBuf::from)
                        .ok_or_else(|| PhaseFailure::new(CODE_NO_CONFIG, "config_path was not published"))?;
        let entries = dotenvy::from_path_iter(&path).map_err(|e| {
                                                       PhaseFailure::new(CODE_BAD_CONFIG,
                                                                         format!("{}: {e}", path.display()))
                                                   })?;
        let mut loaded = 0usize;
        for item in entries {
            let (key, value) = item.map_err(|e| PhaseFailure::new(CODE_BAD_CONFIG, format!("{}: {e}", path.display())))?;
            scope.set(NS_HOST_CONFIG, key, json!(value));
            loaded += 1;
        }
        debug!(target: "bootstrap", "Loaded {loaded} configuration entries from {}", path.display());
        Ok(())
    }
}
