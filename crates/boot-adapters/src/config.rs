//! Carga de configuración desde variables de entorno.
//! Usa la convención `BOOTFLOW_*` y lee `.env` una sola vez si existe.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use dotenvy::dotenv;
use log::LevelFilter;
use once_cell::sync::Lazy;

use crate::error::AdapterError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const DEFAULT_MARKER: &str = "bootflow.env";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootConfig {
    /// Directorio desde el que se busca la raíz hacia arriba.
    pub start_dir: PathBuf,
    /// Archivo que marca una raíz (y que se carga como configuración).
    pub marker: String,
    /// Variables de entorno exigidas por la fase de entorno.
    pub required_env: Vec<String>,
    pub log_level: LevelFilter,
}

impl BootConfig {
    pub fn from_env() -> Result<Self, AdapterError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración con una función de búsqueda arbitraria
    /// (útil en tests para no tocar el entorno del proceso).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdapterError>
        where F: Fn(&str) -> Option<String>
    {
        let start_dir = match lookup("BOOTFLOW_START_DIR") {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => env::current_dir()?,
        };
        let marker = lookup("BOOTFLOW_MARKER").filter(|m| !m.trim().is_empty())
                                              .unwrap_or_else(|| DEFAULT_MARKER.to_string());
        if marker.contains('/') || marker.contains('\\') {
            return Err(AdapterError::Config(format!("BOOTFLOW_MARKER must be a file name, got '{marker}'")));
        }
        let required_env = lookup("BOOTFLOW_REQUIRED_ENV").map(|v| {
                                                              v.split(',')
                                                               .map(str::trim)
                                                               .filter(|s| !s.is_empty())
                                                               .map(String::from)
                                                               .collect()
                                                          })
                                                          .unwrap_or_default();
        let log_level = match lookup("BOOTFLOW_LOG") {
            Some(level) => LevelFilter::from_str(level.trim()).map_err(|_| {
                                                                  AdapterError::Config(format!("invalid BOOTFLOW_LOG '{level}'"))
                                                              })?,
            None => LevelFilter::Info,
        };
        Ok(Self { start_dir,
                  marker,
                  required_env,
                  log_level })
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = BootConfig::from_lookup(lookup_from(&[("BOOTFLOW_START_DIR", "/tmp")])).unwrap();
        assert_eq!(cfg.start_dir, PathBuf::from("/tmp"));
        assert_eq!(cfg.marker, DEFAULT_MARKER);
        assert!(cfg.required_env.is_empty());
        assert_eq!(cfg.log_level, LevelFilter::Info);
    }

    #[test]
    fn parses_required_env_and_level() {
        let cfg = BootConfig::from_lookup(lookup_from(&[("BOOTFLOW_START_DIR", "/srv"),
                                                        ("BOOTFLOW_REQUIRED_ENV", " DB_URL, ,API_KEY "),
                                                        ("BOOTFLOW_LOG", "debug")])).unwrap();
        assert_eq!(cfg.required_env, vec!["DB_URL".to_string(), "API_KEY".to_string()]);
        assert_eq!(cfg.log_level, LevelFilter::Debug);
    }

    #[test]
    fn rejects_bad_values() {
        let bad_level = BootConfig::from_lookup(lookup_from(&[("BOOTFLOW_START_DIR", "/"), ("BOOTFLOW_LOG", "loud")]));
        assert!(matches!(bad_level, Err(AdapterError::Config(_))));
        let bad_marker = BootConfig::from_lookup(lookup_from(&[("BOOTFLOW_START_DIR", "/"), ("BOOTFLOW_MARKER", "a/b")]));
        assert!(matches!(bad_marker, Err(AdapterError::Config(_))));
    }
}
