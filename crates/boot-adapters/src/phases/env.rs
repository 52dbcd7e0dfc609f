//! EnvRequirementPhase: exige variables de entorno.
//!
//! Una variable cuenta como presente si está en el entorno del proceso o en
//! `host.config` (cargado por la fase de configuración, que en un recorrido
//! secuencial ya se ejecutó al validar esta fase).

use std::env;

use boot_core::{PhaseFailure, PhaseHandler, PhaseScope, Validation};
use serde_json::{json, Value};

use super::{CODE_MISSING_ENV, NS_HOST_CONFIG, NS_HOST_ENV};

#[derive(Debug, Clone, Default)]
pub struct EnvRequirementPhase {
    required: Vec<String>,
}

impl EnvRequirementPhase {
    pub fn new(required: Vec<String>) -> Self {
        Self { required }
    }

    fn lookup(scope: &PhaseScope<'_>, name: &str) -> Option<String> {
        env::var(name).ok().or_else(|| match scope.get(NS_HOST_CONFIG, name, Value::Null) {
                                        Value::String(s) => Some(s),
                                        _ => None,
                                    })
    }
}

impl PhaseHandler for EnvRequirementPhase {
    fn validate(&mut self, scope: &mut PhaseScope<'_>) -> Validation {
        let mut validation = Validation::valid();
        let mut missing = Vec::new();
        for name in self.required.iter() {
            match Self::lookup(scope, name) {
                Some(value) => validation = validation.with_value(format!("env.{name}"), json!(value)),
                None => missing.push(name.as_str()),
            }
        }
        if missing.is_empty() {
            validation
        } else {
            validation.with_error(CODE_MISSING_ENV,
                                  format!("Missing environment variables: {}", missing.join(", ")))
        }
    }

    fn execute(&mut self, scope: &mut PhaseScope<'_>) -> Result<(), PhaseFailure> {
        for name in self.required.iter() {
            let value = scope.value(&format!("env.{name}")).cloned().unwrap_or(Value::Null);
            scope.set(NS_HOST_ENV, name.clone(), value);
        }
        Ok(())
    }

    fn has_execute(&self) -> bool {
        !self.required.is_empty()
    }
}
