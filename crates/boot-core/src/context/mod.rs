//! Context Store: estado de proceso con namespaces, estado de bootstrap y
//! superficie de errores.

mod state;
mod store;
mod surface;

pub use state::BootstrapState;
pub use store::ContextStore;
pub use surface::{ErrorEntry, ErrorSurface};
