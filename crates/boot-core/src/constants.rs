//! Constantes del motor de bootstrap.
//!
//! Agrupa los nombres de namespaces reservados en el `ContextStore` y el
//! target de logging. Los handlers externos no deben escribir en los
//! namespaces reservados salvo a través de `PhaseScope`.

/// Versión lógica del motor. Se expone en el reporte para diagnóstico.
pub const ENGINE_VERSION: &str = "B1.0";

/// Namespace donde viven los valores publicados por las fases
/// (`phase_value`).
pub const NS_BOOTSTRAP_VALUES: &str = "bootstrap.values";

/// Namespace con los errores acumulados durante la pasada de validación en
/// curso. Se copian a la superficie de errores sólo cuando el driver (o la
/// estrategia estricta) decide detenerse.
pub const NS_BOOTSTRAP_ERRORS: &str = "bootstrap.errors";

/// Target usado en todas las llamadas a `log`.
pub const LOG_TARGET: &str = "bootstrap";

/// Código usado cuando una fase falla su validación sin declarar errores.
pub const GENERIC_VALIDATION_CODE: &str = "BOOT_PHASE_INVALID";
