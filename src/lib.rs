//! Bootflow Rust Library
//!
//! Fachada sobre los crates del workspace:
//! - Expone `errors` con el error de aplicación que agrega los de `boot-core`
//!   y `boot-adapters`.
//! - `Bootflow` arma el engine estándar con su registro de comandos.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

use std::cell::RefCell;
use std::rc::Rc;

use boot_adapters::{standard_commands, standard_table, BootConfig, CommandRegistry, RegistryHook};
use boot_core::{BootstrapEngine, Target};

pub mod errors;

pub use errors::AppError;

/// Engine estándar junto con el registro de comandos que alimenta.
pub struct Bootflow {
    pub engine: BootstrapEngine,
    pub registry: Rc<RefCell<CommandRegistry>>,
}

impl Bootflow {
    pub fn new(config: &BootConfig) -> Result<Self, AppError> {
        let table = standard_table(config)?;
        let registry = Rc::new(RefCell::new(CommandRegistry::new(standard_commands())));
        let engine = BootstrapEngine::builder(table).with_hook(RegistryHook(Rc::clone(&registry)))
                                                    .build();
        Ok(Self { engine, registry })
    }

    /// Bootstrap estricto; convierte la superficie de errores en `AppError`.
    pub fn require(&mut self, target: impl Into<Target>) -> Result<(), AppError> {
        if self.engine.bootstrap_to_phase(target) {
            return Ok(());
        }
        Err(AppError::Incomplete(self.engine.errors().codes().join(", ")))
    }
}
