// tests/ingest_config.rs
use deepwater_news_collector::classify::SourceType;
use deepwater_news_collector::config::{CollectorConfig, ENV_CONFIG_PATH};
use std::path::PathBuf;
use std::{env, fs};

#[test]
fn parse_full_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("collector.toml");
    fs::write(
        &p,
        r#"
output_csv = "out/news.csv"
history_file = "out/history.txt"
mirror_paths = []
feeds = ["https://www.boem.gov/newsroom/rss.xml"]
relevance_keywords = ["rig"]
industry_terms = ["drilling"]
default_category = "other"
feed_delay_secs = 0

[[categories]]
tag = "lng"
keywords = ["lng"]

[[categories]]
tag = "rigs"
keywords = ["rig"]

[[source_types]]
kind = "Government Data"
domain_markers = ["boem"]
"#,
    )
    .unwrap();

    let cfg = CollectorConfig::load_from(&p).unwrap();
    assert_eq!(cfg.output_csv, PathBuf::from("out/news.csv"));
    assert_eq!(cfg.status_path(), PathBuf::from("out/last_update.json"));
    assert!(cfg.mirror_paths.is_empty());
    assert!(cfg.feed_delay().is_zero());

    // Table order comes from the file, not from the defaults.
    let c = cfg.classifier();
    assert_eq!(c.tags().collect::<Vec<_>>(), vec!["lng", "rigs"]);
    assert_eq!(c.classify("LNG rig"), "lng");
    assert_eq!(c.classify("tanker"), "other");

    assert_eq!(
        cfg.source_type_rules().source_type_for("boem.gov"),
        SourceType::GovernmentData
    );
}

#[test]
fn unknown_source_type_is_rejected() {
    let err = CollectorConfig::from_toml_str(
        r#"
[[source_types]]
kind = "Blog"
domain_markers = ["blogspot"]
"#,
    );
    assert!(err.is_err());
}

#[serial_test::serial]
#[test]
fn load_uses_env_then_fallbacks() {
    // Isolate cwd so the repo's own config/ is not picked up
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_CONFIG_PATH);

    // 1) Nothing on disk → built-in defaults
    let v = CollectorConfig::load().unwrap();
    assert_eq!(v.feeds.len(), 24);

    // 2) ./config/collector.toml
    fs::create_dir_all(tmp.path().join("config")).unwrap();
    fs::write(
        tmp.path().join("config/collector.toml"),
        r#"feeds = ["https://a.test/rss"]"#,
    )
    .unwrap();
    let vt = CollectorConfig::load().unwrap();
    assert_eq!(vt.feeds, vec!["https://a.test/rss".to_string()]);

    // 3) Env var wins
    let p_env = tmp.path().join("other.toml");
    fs::write(&p_env, r#"feeds = ["https://b.test/rss"]"#).unwrap();
    env::set_var(ENV_CONFIG_PATH, p_env.display().to_string());
    let ve = CollectorConfig::load().unwrap();
    assert_eq!(ve.feeds, vec!["https://b.test/rss".to_string()]);

    // 4) Env var pointing nowhere is an error
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("missing.toml").display().to_string());
    assert!(CollectorConfig::load().is_err());

    env::remove_var(ENV_CONFIG_PATH);
    env::set_current_dir(&old).unwrap();
}
