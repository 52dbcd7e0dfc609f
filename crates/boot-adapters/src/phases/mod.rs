//! Handlers de fase concretos.
//!
//! Cada handler implementa `boot_core::PhaseHandler`. Las validaciones sólo
//! leen el sistema de archivos / entorno y publican valores; los efectos van
//! en `execute` y se guardan en namespaces `host.*` del `ContextStore`.

mod config_file;
mod env;
mod root;

pub use config_file::ConfigFilePhase;
pub use env::EnvRequirementPhase;
pub use root::RootDiscoveryPhase;

/// Namespace con los hechos del host (raíz, estado final).
pub const NS_HOST: &str = "host";
/// Namespace con las entradas del archivo de configuración.
pub const NS_HOST_CONFIG: &str = "host.config";
/// Namespace con las variables de entorno requeridas.
pub const NS_HOST_ENV: &str = "host.env";

pub const CODE_NO_ROOT: &str = "BOOT_NO_ROOT";
pub const CODE_NO_CONFIG: &str = "BOOT_NO_CONFIG";
pub const CODE_BAD_CONFIG: &str = "BOOT_BAD_CONFIG";
pub const CODE_MISSING_ENV: &str = "BOOT_MISSING_ENV";
