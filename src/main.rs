use bootflow_rust::{AppError, Bootflow};
use boot_adapters::{logging, BootConfig};
use boot_core::Target;

/// Demo: bootstrap best-effort desde el directorio actual e imprime el
/// reporte y la secuencia compacta de eventos.
fn run() -> Result<(), AppError> {
    let config = BootConfig::from_env()?;
    logging::init(config.log_level)?;

    let mut flow = Bootflow::new(&config)?;
    let reached = flow.engine.bootstrap_max(None);
    println!("Fase alcanzada: {:?}", reached);
    println!("Eventos: {}", flow.engine.event_variants().join(""));
    let report = serde_json::to_string_pretty(&flow.engine.report())?;
    println!("{report}");

    let available: Vec<_> = flow.registry.borrow().available().map(|c| c.name.clone()).collect();
    println!("Comandos disponibles: {}", available.join(", "));

    flow.require(Target::Max)
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
