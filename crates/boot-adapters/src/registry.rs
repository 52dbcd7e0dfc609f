//! Registro de comandos descubiertos durante el bootstrap.
//!
//! Cada comando declara la fase mínima a partir de la cual existe. El
//! `RegistryHook` conecta el registro al engine: cada vez que una fase se
//! ejecuta, los comandos con `min_phase <= fase` pasan a estar disponibles.

use std::cell::RefCell;
use std::rc::Rc;

use boot_core::{ContextStore, DiscoveryHook, PhaseIndex};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::AdapterError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    pub min_phase: PhaseIndex,
    pub description: String,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>, min_phase: PhaseIndex, description: impl Into<String>) -> Self {
        Self { name: name.into(),
               min_phase,
               description: description.into() }
    }
}

#[derive(Debug, Default)]
pub struct CommandRegistry {
    specs: Vec<CommandSpec>,
    available: IndexMap<String, CommandSpec>,
    /// Última fase informada por un hook.
    last_phase: Option<PhaseIndex>,
}

impl CommandRegistry {
    pub fn new(specs: Vec<CommandSpec>) -> Self {
        Self { specs,
               ..Self::default() }
    }

    /// Marca como disponibles los comandos cuya fase mínima ya se alcanzó.
    /// Devuelve cuántos comandos nuevos aparecieron.
    pub fn discover(&mut self, phase: PhaseIndex, ceiling: PhaseIndex) -> usize {
        let before = self.available.len();
        for spec in self.specs.iter().filter(|s| s.min_phase <= phase) {
            if !self.available.contains_key(&spec.name) {
                self.available.insert(spec.name.clone(), spec.clone());
            }
        }
        self.last_phase = Some(phase);
        let added = self.available.len() - before;
        debug!(target: "bootstrap", "Discovered {added} commands at phase {phase} (ceiling {ceiling})");
        added
    }

    /// Busca un comando. `reached` es la fase actual del engine.
    pub fn lookup(&self, name: &str, reached: Option<PhaseIndex>) -> Result<&CommandSpec, AdapterError> {
        let spec = self.specs
                       .iter()
                       .find(|s| s.name == name)
                       .ok_or_else(|| AdapterError::UnknownCommand(name.to_string()))?;
        match reached {
            Some(current) if current >= spec.min_phase && self.available.contains_key(name) => Ok(spec),
            _ => Err(AdapterError::CommandUnavailable { name: name.to_string(),
                                                        needs: spec.min_phase }),
        }
    }

    pub fn available(&self) -> impl Iterator<Item = &CommandSpec> {
        self.available.values()
    }

    pub fn specs(&self) -> &[CommandSpec] {
        &self.specs
    }

    pub fn last_phase(&self) -> Option<PhaseIndex> {
        self.last_phase
    }
}

/// Adaptador `DiscoveryHook` sobre un registro compartido.
#[derive(Debug, Clone)]
pub struct RegistryHook(pub Rc<RefCell<CommandRegistry>>);

impl DiscoveryHook for RegistryHook {
    fn on_phase_advanced(&mut self, phase: PhaseIndex, ceiling: PhaseIndex, _ctx: &ContextStore) -> Result<(), String> {
        let mut registry = self.0
                               .try_borrow_mut()
                               .map_err(|e| format!("command registry is busy: {e}"))?;
        registry.discover(phase, ceiling);
        Ok(())
    }
}
