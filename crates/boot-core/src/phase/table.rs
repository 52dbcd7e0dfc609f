//! Tabla de fases: secuencia inmutable, ordenada y única por índice.

use serde::{Deserialize, Serialize};

use super::{Phase, PhaseIndex};
use crate::errors::CoreBootError;

/// Resumen de una fase para listados y ayuda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseInfo {
    pub index: PhaseIndex,
    pub name: String,
    pub anchor: bool,
    pub has_validate: bool,
    pub has_execute: bool,
}

impl From<&Phase> for PhaseInfo {
    fn from(p: &Phase) -> Self {
        Self { index: p.index(),
               name: p.name().to_string(),
               anchor: p.is_anchor(),
               has_validate: p.has_validate(),
               has_execute: p.has_execute() }
    }
}

#[derive(Debug)]
pub struct PhaseTable {
    phases: Vec<Phase>,
}

impl PhaseTable {
    /// Ordena las fases por índice y rechaza tablas vacías o con índices
    /// duplicados.
    pub fn new(mut phases: Vec<Phase>) -> Result<Self, CoreBootError> {
        if phases.is_empty() {
            return Err(CoreBootError::EmptyPhaseTable);
        }
        phases.sort_by_key(|p| p.index());
        if let Some(w) = phases.windows(2).find(|w| w[0].index() == w[1].index()) {
            return Err(CoreBootError::DuplicatePhaseIndex(w[0].index()));
        }
        Ok(Self { phases })
    }

    #[inline]
    pub fn builder() -> PhaseTableBuilder {
        PhaseTableBuilder { phases: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Fase en la posición `pos` de la tabla (no confundir con el índice).
    pub fn get(&self, pos: usize) -> Option<&Phase> {
        self.phases.get(pos)
    }

    pub(crate) fn get_mut(&mut self, pos: usize) -> Option<&mut Phase> {
        self.phases.get_mut(pos)
    }

    /// Posición de la fase con índice `index`.
    pub fn position(&self, index: PhaseIndex) -> Option<usize> {
        self.phases.binary_search_by_key(&index, |p| p.index()).ok()
    }

    pub fn find(&self, index: PhaseIndex) -> Option<&Phase> {
        self.position(index).map(|pos| &self.phases[pos])
    }

    pub fn require(&self, index: PhaseIndex) -> Result<&Phase, CoreBootError> {
        self.find(index).ok_or(CoreBootError::UnknownPhase(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Phase> {
        self.phases.iter()
    }

    pub fn indices(&self) -> Vec<PhaseIndex> {
        self.phases.iter().map(|p| p.index()).collect()
    }

    /// Vista restringida: sólo las fases ancla.
    pub fn anchors(&self) -> impl Iterator<Item = &Phase> {
        self.phases.iter().filter(|p| p.is_anchor())
    }

    pub fn max_index(&self) -> PhaseIndex {
        self.phases.last().map(|p| p.index()).unwrap_or_default()
    }

    pub fn info(&self) -> Vec<PhaseInfo> {
        self.phases.iter().map(PhaseInfo::from).collect()
    }

    pub fn anchor_info(&self) -> Vec<PhaseInfo> {
        self.anchors().map(PhaseInfo::from).collect()
    }
}

/// Builder de `PhaseTable`; la validación ocurre en `build`.
#[derive(Debug)]
pub struct PhaseTableBuilder {
    phases: Vec<Phase>,
}

impl PhaseTableBuilder {
    #[inline]
    pub fn phase(mut self, phase: Phase) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn build(self) -> Result<PhaseTable, CoreBootError> {
        PhaseTable::new(self.phases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_by_index_and_allows_gaps() {
        let table = PhaseTable::builder().phase(Phase::new(5, "full").anchor())
                                         .phase(Phase::new(0, "core").anchor())
                                         .phase(Phase::new(2, "site"))
                                         .build()
                                         .unwrap();
        assert_eq!(table.indices(), vec![0, 2, 5]);
        assert_eq!(table.position(2), Some(1));
        assert_eq!(table.position(1), None);
        assert_eq!(table.max_index(), 5);
        let anchors: Vec<&str> = table.anchors().map(|p| p.name()).collect();
        assert_eq!(anchors, vec!["core", "full"]);
    }

    #[test]
    fn rejects_duplicates() {
        let err = PhaseTable::new(vec![Phase::new(1, "a"), Phase::new(1, "b")]).unwrap_err();
        assert_eq!(err, CoreBootError::DuplicatePhaseIndex(1));
    }

    #[test]
    fn rejects_empty_table() {
        assert_eq!(PhaseTable::new(vec![]).unwrap_err(), CoreBootError::EmptyPhaseTable);
    }

    #[test]
    fn require_reports_unknown_phase() {
        let table = PhaseTable::new(vec![Phase::new(0, "core")]).unwrap();
        assert!(table.require(0).is_ok());
        assert_eq!(table.require(9).unwrap_err(), CoreBootError::UnknownPhase(9));
    }

    #[test]
    fn info_lists_capabilities() {
        let table = PhaseTable::new(vec![Phase::new(0, "core").execute(|_| Ok(()))]).unwrap();
        let info = table.info();
        assert!(info[0].has_execute);
        assert!(!info[0].has_validate);
        assert!(table.anchor_info().is_empty());
    }
}
