use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use boot_adapters::phases::{CODE_BAD_CONFIG, CODE_MISSING_ENV, CODE_NO_CONFIG, CODE_NO_ROOT, NS_HOST, NS_HOST_CONFIG,
                            NS_HOST_ENV};
use boot_adapters::standard::{PHASE_CONFIG, PHASE_CORE, PHASE_ENV, PHASE_FULL, PHASE_ROOT};
use boot_adapters::{standard_commands, standard_table, AdapterError, BootConfig, CommandRegistry, RegistryHook};
use boot_core::{BootErrorKind, BootstrapEngine, PhaseStatus, Target};
use log::LevelFilter;
use serde_json::{json, Value};

const MARKER: &str = "bootflow.env";

fn config(start: &Path, required: &[&str]) -> BootConfig {
    BootConfig { start_dir: start.to_path_buf(),
                 marker: MARKER.to_string(),
                 required_env: required.iter().map(|s| s.to_string()).collect(),
                 log_level: LevelFilter::Off }
}

fn project(contents: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(MARKER), contents).unwrap();
    dir
}

#[test]
fn boots_fully_from_a_nested_directory() {
    let dir = project("BOOTFLOW_IT_TOKEN_FULL=abc\nOTHER=1\n");
    let nested = dir.path().join("src/deep");
    fs::create_dir_all(&nested).unwrap();

    let table = standard_table(&config(&nested, &["BOOTFLOW_IT_TOKEN_FULL"])).unwrap();
    let mut engine = BootstrapEngine::new(table);

    assert!(engine.bootstrap_to_phase(PHASE_FULL));
    assert!(engine.errors().is_empty());
    assert_eq!(engine.current_phase(), Some(PHASE_FULL));

    let root = dir.path().display().to_string();
    assert_eq!(engine.phase_value("root", None), Some(json!(root)));
    let ctx = engine.context();
    assert_eq!(ctx.get(NS_HOST, "root", Value::Null), json!(root));
    assert_eq!(ctx.get(NS_HOST_CONFIG, "OTHER", Value::Null), json!("1"));
    assert_eq!(ctx.get(NS_HOST_ENV, "BOOTFLOW_IT_TOKEN_FULL", Value::Null), json!("abc"));
    assert_eq!(ctx.get(NS_HOST, "ready", Value::Null), json!(true));
}

#[test]
fn missing_root_stops_after_core() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path(), &[]);
    cfg.marker = "bootflow-it-absent.marker".to_string();
    let mut engine = BootstrapEngine::new(standard_table(&cfg).unwrap());

    assert!(!engine.bootstrap_to_phase(PHASE_FULL));
    assert_eq!(engine.current_phase(), Some(PHASE_CORE));
    let entry = engine.errors().entry(CODE_NO_ROOT).unwrap();
    assert_eq!(entry.kind, BootErrorKind::ValidationFailure);
    assert!(!engine.errors().contains(CODE_NO_CONFIG));
}

#[test]
fn missing_env_is_best_effort_ceiling() {
    let dir = project("UNRELATED=1\n");
    let table = standard_table(&config(dir.path(), &["BOOTFLOW_IT_NEVER_SET_X"])).unwrap();
    let mut engine = BootstrapEngine::new(table);

    assert_eq!(engine.bootstrap_max(None), Some(PHASE_CONFIG));
    assert!(engine.errors().is_empty());

    assert!(!engine.bootstrap_to_phase(PHASE_ENV));
    let message = engine.errors().get(CODE_MISSING_ENV).unwrap();
    assert!(message.contains("BOOTFLOW_IT_NEVER_SET_X"));
    assert_eq!(engine.current_phase(), Some(PHASE_CONFIG));
}

#[test]
fn malformed_config_is_an_execute_failure() {
    let dir = project("this line is not dotenv\n");
    let mut engine = BootstrapEngine::new(standard_table(&config(dir.path(), &[])).unwrap());

    assert!(!engine.bootstrap_to_phase(PHASE_FULL));
    let entry = engine.errors().entry(CODE_BAD_CONFIG).unwrap();
    assert_eq!(entry.kind, BootErrorKind::ExecuteFailure);
    // El execute de `full` queda bloqueado por el error previo.
    let report = engine.report();
    assert_eq!(report.status_of(PHASE_FULL), Some(PhaseStatus::Blocked));
    assert_eq!(engine.context().get(NS_HOST, "ready", Value::Null), Value::Null);
}

#[test]
fn registry_follows_reached_phases() {
    let dir = project("");
    let registry = Rc::new(RefCell::new(CommandRegistry::new(standard_commands())));
    let mut engine = BootstrapEngine::builder(standard_table(&config(dir.path(), &[])).unwrap())
        .with_hook(RegistryHook(Rc::clone(&registry)))
        .build();

    assert!(engine.bootstrap_to_phase(PHASE_ROOT));
    {
        let reg = registry.borrow();
        assert!(reg.lookup("root", engine.current_phase()).is_ok());
        assert!(matches!(reg.lookup("run", engine.current_phase()),
                         Err(AdapterError::CommandUnavailable { needs: PHASE_FULL, .. })));
    }

    assert!(engine.bootstrap_to_phase(Target::Max));
    let reg = registry.borrow();
    assert!(reg.lookup("run", engine.current_phase()).is_ok());
    assert_eq!(reg.available().count(), standard_commands().len());
}

#[test]
fn core_commands_are_available_without_a_root() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path(), &[]);
    cfg.marker = "bootflow-it-no-root.marker".to_string();
    let registry = Rc::new(RefCell::new(CommandRegistry::new(standard_commands())));
    let mut engine = BootstrapEngine::builder(standard_table(&cfg).unwrap())
        .with_hook(RegistryHook(Rc::clone(&registry)))
        .build();

    assert_eq!(engine.bootstrap_max(None), Some(PHASE_CORE));
    let reg = registry.borrow();
    assert!(reg.lookup("version", engine.current_phase()).is_ok());
    assert!(reg.lookup("phases", engine.current_phase()).is_ok());
    assert!(matches!(reg.lookup("root", engine.current_phase()),
                     Err(AdapterError::CommandUnavailable { needs: PHASE_ROOT, .. })));
    assert!(engine.context().get(NS_HOST, "engine", Value::Null).is_string());
}
