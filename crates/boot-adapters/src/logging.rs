//! Inicialización de logs para binarios del workspace.
//!
//! El código usa la fachada `log`; el subscriber de `tracing` recoge esos
//! registros (puente `tracing-log`) y los escribe a stderr.

use log::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::AdapterError;

/// Instala el subscriber global. Falla si ya había uno instalado.
pub fn init(level: LevelFilter) -> Result<(), AdapterError> {
    tracing_subscriber::fmt().with_target(true)
                             .with_writer(std::io::stderr)
                             .with_env_filter(EnvFilter::new(level.to_string().to_lowercase()))
                             .try_init()
                             .map_err(|e| AdapterError::Config(format!("logger: {e}")))
}
