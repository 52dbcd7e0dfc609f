//! boot-core: motor de bootstrap por fases.
//!
//! Lleva un proceso desde "nada inicializado" hasta un nivel de preparación
//! recorriendo una tabla ordenada de fases. Cada fase tiene una validación
//! memoizada y un `execute` que corre a lo sumo una vez por sesión.
pub mod constants;
pub mod context;
pub mod engine;
pub mod errors;
pub mod event;
pub mod phase;
pub mod report;

pub use context::{BootstrapState, ContextStore, ErrorEntry, ErrorSurface};
pub use engine::{BootstrapEngine, DiscoveryHook, EngineBuilder, Target};
pub use errors::{BootErrorKind, CoreBootError, PhaseFailure};
pub use event::{BootEvent, BootEventKind, EventStore, InMemoryEventStore};
pub use phase::{Phase, PhaseHandler, PhaseIndex, PhaseInfo, PhaseScope, PhaseTable, Validation};
pub use report::{BootstrapReport, PhaseReport, PhaseStatus};
