//! RootDiscoveryPhase: busca hacia arriba un directorio con el archivo
//! marcador y publica `root`.

use std::path::{Path, PathBuf};

use boot_core::{PhaseFailure, PhaseHandler, PhaseScope, Validation};
use serde_json::json;

use super::{CODE_NO_ROOT, NS_HOST};

#[derive(Debug, Clone)]
pub struct RootDiscoveryPhase {
    start: PathBuf,
    marker: String,
}

impl RootDiscoveryPhase {
    pub fn new(start: impl Into<PathBuf>, marker: impl Into<String>) -> Self {
        Self { start: start.into(),
               marker: marker.into() }
    }

    /// Primer ancestro de `start` (incluido) que contiene el marcador.
    pub fn find_root(&self) -> Option<&Path> {
        self.start.ancestors().find(|dir| dir.join(&self.marker).is_file())
    }
}

impl PhaseHandler for RootDiscoveryPhase {
    fn validate(&mut self, _scope: &mut PhaseScope<'_>) -> Validation {
        match self.find_root() {
            Some(root) => Validation::valid().with_value("root", json!(root.display().to_string())),
            None => Validation::invalid(CODE_NO_ROOT,
                                        format!("No directory containing {} found from {}",
                                                self.marker,
                                                self.start.display())),
        }
    }

    fn execute(&mut self, scope: &mut PhaseScope<'_>) -> Result<(), PhaseFailure> {
        let root = scope.value("root")
                        .cloned()
                        .ok_or_else(|| PhaseFailure::new(CODE_NO_ROOT, "root was not published"))?;
        scope.set(NS_HOST, "root", root);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn finds_marker_in_an_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("bootflow.env"), "").unwrap();

        let phase = RootDiscoveryPhase::new(&nested, "bootflow.env");
        assert_eq!(phase.find_root(), Some(dir.path()));
    }

    #[test]
    fn missing_marker_has_no_root() {
        let dir = tempfile::tempdir().unwrap();
        let phase = RootDiscoveryPhase::new(dir.path(), "definitely-not-here.marker");
        assert_eq!(phase.find_root(), None);
    }
}
