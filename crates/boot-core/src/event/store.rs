use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::{BootEvent, BootEventKind};

/// Destino append-only de los eventos de bootstrap.
///
/// `seq` es por sesión: un `reset()` abre una sesión nueva que vuelve a
/// empezar en 0, pero los eventos de las sesiones anteriores se conservan.
pub trait EventStore {
    fn append_kind(&mut self, session_id: Uuid, kind: BootEventKind) -> BootEvent;
    /// Eventos de una sesión en orden de append.
    fn list(&self, session_id: Uuid) -> Vec<BootEvent>;
}

/// Log único en memoria, compartido por todas las sesiones del engine.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    log: Vec<BootEvent>,
    next_seq: HashMap<Uuid, u64>,
}

impl InMemoryEventStore {
    /// Sesiones con eventos, en el orden en que aparecieron.
    pub fn sessions(&self) -> Vec<Uuid> {
        let mut seen = Vec::new();
        for ev in self.log.iter() {
            if !seen.contains(&ev.session_id) {
                seen.push(ev.session_id);
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, session_id: Uuid, kind: BootEventKind) -> BootEvent {
        let next = self.next_seq.entry(session_id).or_insert(0);
        let ev = BootEvent { seq: *next,
                             session_id,
                             kind,
                             ts: Utc::now() };
        *next += 1;
        self.log.push(ev.clone());
        ev
    }

    fn list(&self, session_id: Uuid) -> Vec<BootEvent> {
        self.log.iter().filter(|ev| ev.session_id == session_id).cloned().collect()
    }
}
