//! Motor de bootstrap por fases.
//!
//! Provee el engine, su builder, la cache de validación, el driver y las dos
//! estrategias de progresión (estricta y best-effort).

mod builder;
pub mod core;
mod driver;
mod hook;
mod strategy;
mod validation;

pub use builder::EngineBuilder;
pub use self::core::BootstrapEngine;
pub use hook::DiscoveryHook;
pub use strategy::Target;
