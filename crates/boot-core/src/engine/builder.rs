//! Builder para `BootstrapEngine`.
//!
//! Permite fijar el store de eventos y registrar hooks de descubrimiento
//! antes de la primera invocación.
//!
//! ```ignore
//! let engine = BootstrapEngine::builder(table)
//!     .with_hook(registry.hook())
//!     .on_phase_advanced(|phase, _, _| { println!("{phase}"); Ok(()) })
//!     .build();
//! ```

use super::{BootstrapEngine, DiscoveryHook};
use crate::context::ContextStore;
use crate::event::EventStore;
use crate::phase::{PhaseIndex, PhaseTable};

pub struct EngineBuilder<E: EventStore> {
    table: PhaseTable,
    events: E,
    hooks: Vec<Box<dyn DiscoveryHook>>,
}

impl<E: EventStore> EngineBuilder<E> {
    pub(super) fn new(table: PhaseTable, events: E) -> Self {
        Self { table,
               events,
               hooks: Vec::new() }
    }

    /// Reemplaza el store de eventos.
    pub fn event_store<E2: EventStore>(self, events: E2) -> EngineBuilder<E2> {
        EngineBuilder { table: self.table,
                        events,
                        hooks: self.hooks }
    }

    /// Registra un hook implementado como struct.
    #[inline]
    pub fn with_hook<H>(mut self, hook: H) -> Self
        where H: DiscoveryHook + 'static
    {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Registra un hook como closure.
    #[inline]
    pub fn on_phase_advanced<F>(self, f: F) -> Self
        where F: FnMut(PhaseIndex, PhaseIndex, &ContextStore) -> Result<(), String> + 'static
    {
        self.with_hook(f)
    }

    pub fn build(self) -> BootstrapEngine<E> {
        let mut engine = BootstrapEngine::with_event_store(self.table, self.events);
        for hook in self.hooks {
            engine.add_hook(hook);
        }
        engine
    }
}
