//! End-to-end alteration tests: validate, merge, publish, persist.

use std::collections::HashSet;
use std::sync::Arc;

use traffic_rule::alter::PersistStatus;
use tokio::sync::{broadcast, mpsc};
use traffic_rule::config::watcher::apply_reloads;
use traffic_rule::config::AppConfig;
use traffic_rule::lifecycle::bootstrap;
use traffic_rule::persist::FilePersister;
use traffic_rule::rule::AlgorithmConfig;
use traffic_rule::AlterError;

mod common;

use common::{current_config, handler_with, segment, RecordingPersister};

#[test]
fn test_replace_strategy_and_collect_load_balancer() {
    let persister = Arc::new(RecordingPersister::default());
    let handler = handler_with(persister.clone());

    let outcome = handler
        .execute(&[segment("s1", "SQL_REGEX", Some("ROUND_ROBIN"))])
        .unwrap();
    assert_eq!(outcome.version, 2);
    assert_eq!(outcome.persisted, PersistStatus::Written);

    let config = handler.registry().configuration();
    let names: Vec<_> = config.strategies.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["s2", "s1"]);

    let s1 = config.strategy("s1").unwrap();
    assert_eq!(s1.algorithm_name, "s1_sql_regex");
    assert_eq!(s1.load_balancer(), Some("s1_round_robin"));

    // Old algorithms stay, the old load balancer is collected.
    let algorithms: Vec<_> = config.algorithms.keys().map(String::as_str).collect();
    assert_eq!(algorithms, vec!["a1", "a2", "s1_sql_regex"]);
    let load_balancers: Vec<_> = config.load_balancers.keys().map(String::as_str).collect();
    assert_eq!(load_balancers, vec!["s1_round_robin"]);
    assert_eq!(
        config.load_balancers["s1_round_robin"],
        AlgorithmConfig::new("ROUND_ROBIN")
    );

    // The full configuration was persisted with overwrite.
    let writes = persister.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(&writes[0].0, &*config);
    assert!(writes[0].1);
}

#[test]
fn test_missing_strategy_touches_nothing() {
    let persister = Arc::new(RecordingPersister::default());
    let handler = handler_with(persister.clone());

    let err = handler
        .execute(&[segment("s2", "SQL_MATCH", None), segment("s9", "NOPE", None)])
        .unwrap_err();
    assert_eq!(
        err,
        AlterError::MissingStrategy {
            names: vec!["s9".into()]
        }
    );

    let snapshot = handler.registry().load();
    assert_eq!(snapshot.version, 1);
    assert_eq!(**snapshot.configuration(), current_config());
    assert!(persister.writes().is_empty());
}

#[test]
fn test_missing_strategies_reported_as_a_set() {
    let handler = handler_with(Arc::new(RecordingPersister::default()));

    let err = handler
        .execute(&[
            segment("x", "SQL_MATCH", None),
            segment("s1", "SQL_MATCH", None),
            segment("y", "SQL_MATCH", None),
            segment("x", "SQL_MATCH", None),
        ])
        .unwrap_err();
    let names: HashSet<_> = err.names().iter().cloned().collect();
    assert_eq!(names, HashSet::from(["x".to_string(), "y".to_string()]));
    assert_eq!(err.names().len(), 2);
}

#[test]
fn test_invalid_algorithm_touches_nothing() {
    let persister = Arc::new(RecordingPersister::default());
    let handler = handler_with(persister.clone());

    let err = handler
        .execute(&[segment("s1", "SQL_MATCH", Some("LEAST_LATENCY"))])
        .unwrap_err();
    assert_eq!(
        err,
        AlterError::InvalidAlgorithmConfiguration {
            names: vec!["LEAST_LATENCY".into()]
        }
    );
    assert_eq!(handler.registry().load().version, 1);
    assert!(persister.writes().is_empty());
}

#[test]
fn test_persist_failure_keeps_publish() {
    let persister = Arc::new(RecordingPersister::failing());
    let handler = handler_with(persister.clone());

    let outcome = handler.execute(&[segment("s2", "FIRST_SQL", None)]).unwrap();
    assert!(matches!(outcome.persisted, PersistStatus::Failed(ref reason) if reason.contains("unavailable")));

    let snapshot = handler.registry().load();
    assert_eq!(snapshot.version, 2);
    assert_eq!(
        snapshot.rule().strategy("s2").unwrap().algorithm.as_ref().unwrap().type_name,
        "FIRST_SQL"
    );
}

#[test]
fn test_same_delta_twice_is_stable() {
    let handler = handler_with(Arc::new(RecordingPersister::default()));
    let delta = [segment("s2", "SQL_MATCH", Some("RANDOM"))];

    handler.execute(&delta).unwrap();
    let once = handler.registry().configuration();
    let outcome = handler.execute(&delta).unwrap();
    let twice = handler.registry().configuration();

    assert_eq!(outcome.version, 3);
    assert_eq!(*once, *twice);
}

#[test]
fn test_untouched_strategies_and_reference_invariant() {
    let handler = handler_with(Arc::new(RecordingPersister::default()));
    let untouched = current_config().strategy("s1").cloned().unwrap();

    handler.execute(&[segment("s2", "TRANSACTION", Some("RANDOM"))]).unwrap();
    handler.execute(&[segment("s2", "TRANSACTION", None)]).unwrap();

    let config = handler.registry().configuration();
    assert_eq!(config.strategy("s1"), Some(&untouched));

    let keys: HashSet<&str> = config.load_balancers.keys().map(String::as_str).collect();
    let referenced: HashSet<&str> = config.referenced_load_balancers().into_iter().collect();
    assert_eq!(keys, referenced);
    assert_eq!(keys, HashSet::from(["lb1"]));
}

#[test]
fn test_labels_flow_into_rule() {
    let handler = handler_with(Arc::new(RecordingPersister::default()));

    handler
        .execute(&[segment("s2", "SQL_HINT", None).with_labels(["OLTP", "BATCH"])])
        .unwrap();

    let rule = handler.registry().rule();
    let oltp: Vec<_> = rule.strategies_with_label("OLTP").into_iter().map(|s| s.name.as_str()).collect();
    assert_eq!(oltp, vec!["s1", "s2"]);
    assert!(rule.strategies_with_label("OLAP").is_empty());
}

#[test]
fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.traffic = current_config();
    config.persistence.enabled = true;
    config.persistence.path = dir.path().join("traffic.toml").display().to_string();

    let runtime = bootstrap(config.clone()).unwrap();
    let outcome = runtime
        .handler()
        .execute(&[segment("s1", "SQL_HINT", None)])
        .unwrap();
    assert_eq!(outcome.persisted, PersistStatus::Written);
    let altered = runtime.registry.configuration();

    let restarted = bootstrap(config).unwrap();
    assert_eq!(*restarted.registry.configuration(), *altered);
    assert!(restarted.registry.configuration().load_balancers.is_empty());
}

#[tokio::test]
async fn test_config_reload_keeps_stored_alteration() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("traffic.toml");
    let mut config = AppConfig::default();
    config.traffic = current_config();
    config.persistence.enabled = true;
    config.persistence.path = store.display().to_string();

    bootstrap(config.clone())
        .unwrap()
        .handler()
        .execute(&[segment("s1", "SQL_HINT", None)])
        .unwrap();

    let restarted = bootstrap(config.clone()).unwrap();
    assert_eq!(restarted.registry.configuration().strategy("s1").unwrap().algorithm_name, "s1_sql_hint");

    let (tx, rx) = mpsc::unbounded_channel();
    let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let reloads = tokio::spawn(apply_reloads(
        rx,
        restarted.config.traffic.clone(),
        restarted.registry.clone(),
        restarted.persister.is_some(),
        shutdown_rx,
    ));

    let mut edited = config;
    edited
        .traffic
        .algorithms
        .insert("a2".into(), AlgorithmConfig::new("SQL_HINT").with_prop("sql", "SELECT 2"));
    tx.send(edited).unwrap();
    drop(tx);
    reloads.await.unwrap();

    let live = restarted.registry.configuration();
    assert_eq!(live.strategy("s1").unwrap().algorithm_name, "s1_sql_hint");
    assert_eq!(restarted.registry.load().version, 1);

    let stored = FilePersister::new(&store).load().unwrap().unwrap();
    assert_eq!(stored.strategy("s1").unwrap().algorithm_name, "s1_sql_hint");
}
