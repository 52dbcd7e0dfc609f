use boot_core::{CoreBootError, PhaseIndex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error(transparent)]
    Core(#[from] CoreBootError),
    #[error("Comando desconocido: {0}")]
    UnknownCommand(String),
    #[error("El comando {name} requiere la fase {needs}")]
    CommandUnavailable { name: String, needs: PhaseIndex },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = AdapterError::CommandUnavailable { name: "serve".into(),
                                                     needs: 4 };
        assert_eq!(err.to_string(), "El comando serve requiere la fase 4");
        let core: AdapterError = CoreBootError::EmptyPhaseTable.into();
        assert_eq!(core.to_string(), "phase table is empty");
    }
}
