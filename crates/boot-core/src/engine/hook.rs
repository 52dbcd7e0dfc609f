//! Hook de descubrimiento invocado tras cada fase ejecutada.

use crate::context::ContextStore;
use crate::phase::PhaseIndex;

/// Colaborador que reacciona al avance del bootstrap, por ejemplo para
/// registrar comandos que sólo existen a partir de cierta fase.
///
/// `ceiling` es la fase más alta que la llamada en curso intentará alcanzar.
/// Un `Err` se registra en el log y en los eventos, nunca en la superficie de
/// errores.
pub trait DiscoveryHook {
    fn on_phase_advanced(&mut self, phase: PhaseIndex, ceiling: PhaseIndex, ctx: &ContextStore) -> Result<(), String>;
}

impl<F> DiscoveryHook for F where F: FnMut(PhaseIndex, PhaseIndex, &ContextStore) -> Result<(), String>
{
    fn on_phase_advanced(&mut self, phase: PhaseIndex, ceiling: PhaseIndex, ctx: &ContextStore) -> Result<(), String> {
        self(phase, ceiling, ctx)
    }
}
