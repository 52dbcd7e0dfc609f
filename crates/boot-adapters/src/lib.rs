//! boot-adapters: colaboradores del host para `boot-core`.
//!
//! Este crate provee:
//! - Handlers de fase concretos (descubrimiento de raíz, archivo de
//!   configuración, requisitos de entorno) y la tabla estándar que los une.
//! - `CommandRegistry`, que actúa como hook de descubrimiento: los comandos
//!   sólo quedan disponibles cuando se alcanza la fase que requieren.
//! - Carga de configuración desde variables de entorno / `.env` y la
//!   instalación del subscriber de logs.
//!
//! Nota: el core no conoce el significado de ninguna fase; todo lo específico
//! vive aquí.

pub mod config;
pub mod error;
pub mod logging;
pub mod phases;
pub mod registry;
pub mod standard;

pub use config::BootConfig;
pub use error::AdapterError;
pub use registry::{CommandRegistry, CommandSpec, RegistryHook};
pub use standard::{standard_commands, standard_table};
