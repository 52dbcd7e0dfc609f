//! Core BootstrapEngine implementation

use std::collections::BTreeSet;

use log::warn;
use serde_json::Value;
use uuid::Uuid;

use crate::constants::{LOG_TARGET, NS_BOOTSTRAP_VALUES};
use crate::context::{BootstrapState, ContextStore, ErrorSurface};
use crate::engine::{DiscoveryHook, EngineBuilder};
use crate::errors::BootErrorKind;
use crate::event::{BootEvent, BootEventKind, EventStore, InMemoryEventStore};
use crate::phase::{PhaseIndex, PhaseTable};
use crate::report::{BootstrapReport, PhaseReport, PhaseStatus};

/// Motor de bootstrap por fases.
///
/// Posee la tabla de fases, el `ContextStore` de la sesión y los cursores de
/// validación y ejecución. Todas las operaciones que mutan estado toman
/// `&mut self`: no hay locking interno.
pub struct BootstrapEngine<E = InMemoryEventStore>
    where E: EventStore
{
    pub(super) table: PhaseTable,
    pub(super) store: ContextStore,
    pub(super) events: E,
    pub(super) hooks: Vec<Box<dyn DiscoveryHook>>,
    pub(super) session_id: Uuid,
    /// Próxima posición de la tabla a validar.
    pub(super) validation_cursor: usize,
    /// Próxima posición de la tabla que intentará el driver.
    pub(super) driver_cursor: usize,
    /// Pendiente de limpiar el namespace de errores en esta invocación.
    pub(super) fresh_pass: bool,
    pub(super) blocked: BTreeSet<PhaseIndex>,
    /// Fase cuya validación detuvo al driver.
    pub(super) halted_at: Option<PhaseIndex>,
}

impl BootstrapEngine<InMemoryEventStore> {
    /// Crea un engine con store de eventos en memoria.
    pub fn new(table: PhaseTable) -> Self {
        Self::with_event_store(table, InMemoryEventStore::default())
    }

    /// Crea un builder para configurar hooks y store de eventos.
    #[inline]
    pub fn builder(table: PhaseTable) -> EngineBuilder<InMemoryEventStore> {
        EngineBuilder::new(table, InMemoryEventStore::default())
    }
}

impl<E> BootstrapEngine<E> where E: EventStore
{
    pub fn with_event_store(table: PhaseTable, events: E) -> Self {
        let mut engine = Self { table,
                                store: ContextStore::new(),
                                events,
                                hooks: Vec::new(),
                                session_id: Uuid::new_v4(),
                                validation_cursor: 0,
                                driver_cursor: 0,
                                fresh_pass: true,
                                blocked: BTreeSet::new(),
                                halted_at: None };
        engine.emit(BootEventKind::SessionStarted { phase_count: engine.table.len() });
        engine
    }

    /// Añade un hook de descubrimiento.
    pub fn add_hook(&mut self, hook: Box<dyn DiscoveryHook>) {
        self.hooks.push(hook);
    }

    pub fn table(&self) -> &PhaseTable {
        &self.table
    }

    pub fn context(&self) -> &ContextStore {
        &self.store
    }

    pub fn context_mut(&mut self) -> &mut ContextStore {
        &mut self.store
    }

    pub fn state(&self) -> &BootstrapState {
        self.store.state()
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn current_phase(&self) -> Option<PhaseIndex> {
        self.store.state().current_phase
    }

    pub fn validated_phase(&self) -> Option<PhaseIndex> {
        self.store.state().validated_phase
    }

    /// `true` si `current_phase >= index`. No dispara bootstrap.
    pub fn has_reached(&self, index: PhaseIndex) -> bool {
        self.store.state().has_reached(index)
    }

    pub fn is_bootstrapping(&self) -> bool {
        self.store.state().bootstrapping
    }

    /// Con `Some(value)` sobrescribe y devuelve el valor; con `None` lee el
    /// valor publicado (o `None` si nunca se publicó).
    pub fn phase_value(&mut self, key: &str, value: Option<Value>) -> Option<Value> {
        match value {
            Some(v) => {
                self.store.set(NS_BOOTSTRAP_VALUES, key, v.clone());
                Some(v)
            }
            None => self.store.bootstrap_value(key).cloned(),
        }
    }

    pub fn errors(&self) -> &ErrorSurface {
        self.store.errors()
    }

    /// Registra un error externo. Bloquea el `execute` de las fases
    /// siguientes hasta que se limpie.
    pub fn set_error(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.store.errors_mut().set_error(code, message, BootErrorKind::External);
    }

    pub fn clear_errors(&mut self) {
        self.store.errors_mut().clear();
    }

    /// Descarta la sesión: estado, valores, errores y cursores. Las fases
    /// podrán validarse y ejecutarse de nuevo.
    pub fn reset(&mut self) {
        let previous = self.session_id;
        warn!(target: LOG_TARGET, "Resetting bootstrap session {previous}");
        self.emit(BootEventKind::SessionReset { previous });
        self.store.reset();
        self.session_id = Uuid::new_v4();
        self.validation_cursor = 0;
        self.driver_cursor = 0;
        self.fresh_pass = true;
        self.blocked.clear();
        self.halted_at = None;
        self.emit(BootEventKind::SessionStarted { phase_count: self.table.len() });
    }

    pub fn event_store(&self) -> &E {
        &self.events
    }

    /// Eventos de la sesión actual.
    pub fn events(&self) -> Vec<BootEvent> {
        self.events.list(self.session_id)
    }

    /// Variante compacta de eventos para la sesión actual.
    pub fn event_variants(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .map(|e| match e.kind {
                BootEventKind::SessionStarted { .. } => "I",
                BootEventKind::PhaseValidated { .. } => "V",
                BootEventKind::PhaseExecuted { .. } => "E",
                BootEventKind::PhaseExecuteFailed { .. } => "X",
                BootEventKind::PhaseSkipped { .. } => "K",
                BootEventKind::PhaseReached { .. } => "R",
                BootEventKind::HookFailed { .. } => "H",
                BootEventKind::SessionReset { .. } => "Z",
            })
            .collect()
    }

    /// Foto serializable del estado de la sesión.
    pub fn report(&self) -> BootstrapReport {
        let state = self.store.state();
        let phases = self.table
                         .iter()
                         .map(|p| {
                             let index = p.index();
                             let status = if self.blocked.contains(&index) {
                                 PhaseStatus::Blocked
                             } else if state.has_reached(index) {
                                 PhaseStatus::Reached
                             } else {
                                 match state.cached(index) {
                                     Some(true) => PhaseStatus::Validated,
                                     Some(false) => PhaseStatus::Failed,
                                     None => PhaseStatus::Pending,
                                 }
                             };
                             PhaseReport { index,
                                           name: p.name().to_string(),
                                           anchor: p.is_anchor(),
                                           status }
                         })
                         .collect();
        BootstrapReport { engine_version: crate::constants::ENGINE_VERSION.to_string(),
                          session_id: self.session_id,
                          current_phase: state.current_phase,
                          validated_phase: state.validated_phase,
                          phases,
                          errors: self.store.errors().clone(),
                          values: self.store.namespace(NS_BOOTSTRAP_VALUES).cloned().unwrap_or_default() }
    }

    pub(super) fn emit(&mut self, kind: BootEventKind) -> BootEvent {
        self.events.append_kind(self.session_id, kind)
    }

    /// Marca el inicio de una invocación pública: la primera validación no
    /// cacheada limpiará el namespace de errores.
    pub(super) fn begin_invocation(&mut self) {
        self.fresh_pass = true;
    }
}
