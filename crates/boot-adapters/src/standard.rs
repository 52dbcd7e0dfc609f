//! Tabla de fases estándar para una herramienta de línea de comandos.
//!
//! core -> root -> config -> env -> full. `core` y `full` son anclas.
//! Todas las fases con comandos asociados tienen `execute`, así el registro
//! los descubre apenas se alcanza la fase.

use boot_core::constants::ENGINE_VERSION;
use boot_core::{Phase, PhaseIndex, PhaseTable, Validation};
use serde_json::json;

use crate::config::BootConfig;
use crate::error::AdapterError;
use crate::phases::{ConfigFilePhase, EnvRequirementPhase, RootDiscoveryPhase, NS_HOST};
use crate::registry::CommandSpec;

pub const PHASE_CORE: PhaseIndex = 0;
pub const PHASE_ROOT: PhaseIndex = 1;
pub const PHASE_CONFIG: PhaseIndex = 2;
pub const PHASE_ENV: PhaseIndex = 3;
pub const PHASE_FULL: PhaseIndex = 4;

/// Construye la tabla estándar a partir de la configuración.
pub fn standard_table(config: &BootConfig) -> Result<PhaseTable, AdapterError> {
    let table = PhaseTable::builder().phase(Phase::new(PHASE_CORE, "core").anchor()
                                                                          .execute(|scope| {
                                                                              scope.set(NS_HOST,
                                                                                        "engine",
                                                                                        json!(ENGINE_VERSION));
                                                                              Ok(())
                                                                          }))
                                     .phase(Phase::from_handler(PHASE_ROOT,
                                                                "root",
                                                                RootDiscoveryPhase::new(&config.start_dir,
                                                                                        config.marker.clone())))
                                     .phase(Phase::from_handler(PHASE_CONFIG,
                                                                "config",
                                                                ConfigFilePhase::new(config.marker.clone())))
                                     .phase(Phase::from_handler(PHASE_ENV,
                                                                "env",
                                                                EnvRequirementPhase::new(config.required_env.clone())))
                                     .phase(Phase::new(PHASE_FULL, "full").anchor()
                                                                          .validate(|_| Validation::valid())
                                                                          .execute(|scope| {
                                                                              scope.set(NS_HOST, "ready", json!(true));
                                                                              Ok(())
                                                                          }))
                                     .build()?;
    Ok(table)
}

/// Comandos conocidos por la CLI con la fase mínima que requieren.
pub fn standard_commands() -> Vec<CommandSpec> {
    vec![CommandSpec::new("version", PHASE_CORE, "Print the engine version"),
         CommandSpec::new("phases", PHASE_CORE, "List the phase table"),
         CommandSpec::new("root", PHASE_ROOT, "Print the discovered root"),
         CommandSpec::new("config", PHASE_CONFIG, "Print the loaded configuration"),
         CommandSpec::new("env", PHASE_ENV, "Print the required environment"),
         CommandSpec::new("run", PHASE_FULL, "Run with a fully bootstrapped host")]
}
