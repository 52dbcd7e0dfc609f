use std::cell::RefCell;
use std::rc::Rc;

use boot_adapters::{logging, standard_commands, standard_table, AdapterError, BootConfig, CommandRegistry,
                    RegistryHook};
use boot_core::constants::ENGINE_VERSION;
use boot_core::{BootstrapEngine, PhaseIndex, Target};
use serde::Serialize;
use serde_json::json;

const USAGE: &str = "Uso: boot-cli <phases [--anchors] | status | to <N|max> | max [--ceiling N] | commands | version>";

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("[boot-cli] serialization error: {e}");
            std::process::exit(5);
        }
    }
}

fn fail(e: AdapterError) -> ! {
    eprintln!("[boot-cli] {e}");
    std::process::exit(5);
}

/// Lee `--ceiling N`. Un valor ausente o no numérico es un error.
fn parse_ceiling(args: &[String]) -> Result<Option<PhaseIndex>, String> {
    let mut ceiling = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--ceiling" => {
                i += 1;
                let value = args.get(i).ok_or("--ceiling requiere un valor")?;
                let n = value.parse::<PhaseIndex>()
                             .map_err(|_| format!("--ceiling inválido: {value}"))?;
                ceiling = Some(n);
            }
            other => return Err(format!("argumento desconocido: {other}")),
        }
        i += 1;
    }
    Ok(ceiling)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("{USAGE}");
        std::process::exit(2);
    }

    let config = BootConfig::from_env().unwrap_or_else(|e| fail(e));
    if let Err(e) = logging::init(config.log_level) {
        eprintln!("[boot-cli] logger: {e}");
    }
    let table = standard_table(&config).unwrap_or_else(|e| fail(e));
    let registry = Rc::new(RefCell::new(CommandRegistry::new(standard_commands())));
    let mut engine = BootstrapEngine::builder(table).with_hook(RegistryHook(Rc::clone(&registry)))
                                                    .build();

    match args[1].as_str() {
        "version" => println!("{ENGINE_VERSION}"),
        "phases" => {
            let anchors = args.iter().skip(2).any(|a| a == "--anchors");
            let listing = if anchors { engine.table().anchor_info() } else { engine.table().info() };
            print_json(&listing);
        }
        "status" => {
            engine.bootstrap_max(None);
            print_json(&engine.report());
        }
        "to" => {
            let Some(target) = args.get(2).and_then(|a| a.parse::<Target>().ok()) else {
                eprintln!("Uso: boot-cli to <N|max>");
                std::process::exit(2);
            };
            let ok = engine.bootstrap_to_phase(target);
            print_json(&engine.report());
            if !ok {
                eprintln!("[boot-cli to] bootstrap failed");
                for (code, entry) in engine.errors().iter() {
                    eprintln!("  {code} ({:?}): {}", entry.kind, entry.message);
                }
                std::process::exit(1);
            }
        }
        "max" => {
            let ceiling = parse_ceiling(&args[2..]).unwrap_or_else(|e| {
                                                       eprintln!("[boot-cli max] {e}");
                                                       eprintln!("Uso: boot-cli max [--ceiling N]");
                                                       std::process::exit(2);
                                                   });
            let reached = engine.bootstrap_max(ceiling);
            print_json(&json!({ "reached": reached, "report": engine.report() }));
        }
        "commands" => {
            engine.bootstrap_max(None);
            let reached = engine.current_phase();
            let registry = registry.borrow();
            let listing: Vec<_> = registry.specs()
                                          .iter()
                                          .map(|spec| match registry.lookup(&spec.name, reached) {
                                              Ok(_) => json!({ "name": spec.name, "available": true,
                                                               "description": spec.description }),
                                              Err(e) => json!({ "name": spec.name, "available": false,
                                                                "reason": e.to_string() }),
                                          })
                                          .collect();
            print_json(&listing);
        }
        other => {
            eprintln!("[boot-cli] comando desconocido: {other}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ceiling_is_optional() {
        assert_eq!(parse_ceiling(&args(&[])), Ok(None));
        assert_eq!(parse_ceiling(&args(&["--ceiling", "2"])), Ok(Some(2)));
    }

    #[test]
    fn bad_ceiling_is_rejected() {
        assert!(parse_ceiling(&args(&["--ceiling", "abc"])).is_err());
        assert!(parse_ceiling(&args(&["--ceiling"])).is_err());
        assert!(parse_ceiling(&args(&["--cieling", "2"])).is_err());
    }
}
