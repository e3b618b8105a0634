//! Tests for benchmark configuration loading.

use std::fs;
use tempfile::TempDir;

use tictactoe_bench::{BenchConfig, OpponentKind};
use tictactoe_engine::Strategy;

#[test]
fn test_defaults() {
    let config = BenchConfig::default();
    assert_eq!(*config.match_count(), 3);
    assert_eq!(config.strategies(), &vec![Strategy::Exhaustive, Strategy::Pruned]);
    assert_eq!(*config.opponent(), OpponentKind::Perfect);
}

#[test]
fn test_from_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("bench.toml");
    fs::write(
        &path,
        r#"match_count = 10
strategies = ["alpha-beta"]
opponent = "first-free"
"#,
    )
    .expect("Failed to write TOML");

    let config = BenchConfig::from_file(&path).expect("Config loads");
    assert_eq!(*config.match_count(), 10);
    assert_eq!(config.strategies(), &vec![Strategy::Pruned]);
    assert_eq!(*config.opponent(), OpponentKind::FirstFree);
}

#[test]
fn test_missing_fields_use_defaults() {
    let config = BenchConfig::from_toml("match_count = 7").expect("Config parses");
    assert_eq!(*config.match_count(), 7);
    assert_eq!(config.strategies().len(), 2);
    assert_eq!(*config.opponent(), OpponentKind::Perfect);
}

#[test]
fn test_strategy_names() {
    let config =
        BenchConfig::from_toml(r#"strategies = ["minimax", "alpha-beta"]"#).expect("Config parses");
    assert_eq!(config.strategies(), &vec![Strategy::Exhaustive, Strategy::Pruned]);
}

#[test]
fn test_strategy_aliases_match_command_line() {
    let config = BenchConfig::from_toml(r#"strategies = ["exhaustive", "alphabeta", "pruned"]"#)
        .expect("Config parses");
    assert_eq!(
        config.strategies(),
        &vec![Strategy::Exhaustive, Strategy::Pruned, Strategy::Pruned]
    );
    for name in ["exhaustive", "alphabeta", "pruned"] {
        let parsed: Strategy = name.parse().expect("Command-line name parses");
        assert!(config.strategies().contains(&parsed));
    }
}

#[test]
fn test_load_or_default_without_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = BenchConfig::load_or_default(dir.path().join("absent.toml")).expect("Defaults");
    assert_eq!(config, BenchConfig::default());
}

#[test]
fn test_invalid_configs_rejected() {
    let err = BenchConfig::from_toml("match_count = 0").unwrap_err();
    assert!(err.message.contains("match_count"));

    let err = BenchConfig::from_toml("strategies = []").unwrap_err();
    assert!(err.message.contains("strategies"));

    let err = BenchConfig::from_toml(r#"opponent = "oracle""#).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "this is not valid toml !!!@@@").expect("Write failed");
    assert!(BenchConfig::from_file(&path).is_err());
}

#[test]
fn test_overrides() {
    let config = BenchConfig::default()
        .with_overrides(Some(5), Some(OpponentKind::FirstFree), Some(vec![Strategy::Pruned]))
        .expect("Overrides valid");
    assert_eq!(*config.match_count(), 5);
    assert_eq!(*config.opponent(), OpponentKind::FirstFree);
    assert_eq!(config.strategies(), &vec![Strategy::Pruned]);

    let untouched = BenchConfig::default()
        .with_overrides(None, None, None)
        .expect("No overrides");
    assert_eq!(untouched, BenchConfig::default());

    assert!(BenchConfig::default().with_overrides(Some(0), None, None).is_err());
    assert!(
        BenchConfig::default()
            .with_overrides(None, None, Some(Vec::new()))
            .is_err()
    );
}

#[test]
fn test_error_records_location() {
    let err = BenchConfig::from_toml("match_count = 0").unwrap_err();
    assert!(err.file.ends_with("config.rs"));
    assert!(err.line > 0);
    assert!(err.to_string().starts_with("Config error: match_count"));
}
