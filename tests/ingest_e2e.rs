// tests/ingest_e2e.rs
// Full collection passes over fixture feeds in an isolated directory.

use chrono::{DateTime, TimeZone};
use chrono_tz::{America::Chicago, Tz};
use deepwater_news_collector::dataset::read_existing;
use deepwater_news_collector::ingest::providers::FixtureFeedSource;
use deepwater_news_collector::status::read_status;
use deepwater_news_collector::{collect_news, CollectorConfig};
use std::fs;
use std::path::Path;

const OFFSHORE_URL: &str = "https://www.offshore-mag.com/rss/";
const REGULATOR_URL: &str = "https://www.bsee.gov/newsroom/atom.xml";
const DOWN_URL: &str = "https://unreachable.example.test/rss";

const RSS: &str = include_str!("fixtures/offshore_rss.xml");
const ATOM: &str = include_str!("fixtures/regulator_atom.xml");

fn cfg_in(dir: &Path) -> CollectorConfig {
    CollectorConfig {
        output_csv: dir.join("docs/data/deepwater_news.csv"),
        history_file: dir.join("article_history.txt"),
        mirror_paths: vec![dir.join("web_app/data/deepwater_news.csv")],
        feed_delay_secs: 0,
        feeds: vec![
            OFFSHORE_URL.to_string(),
            DOWN_URL.to_string(),
            REGULATOR_URL.to_string(),
        ],
        ..CollectorConfig::default()
    }
}

fn now() -> DateTime<Tz> {
    Chicago.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
}

fn fixtures() -> FixtureFeedSource {
    FixtureFeedSource::new()
        .with_feed(OFFSHORE_URL, RSS)
        .with_feed(REGULATOR_URL, ATOM)
}

#[tokio::test]
async fn first_run_builds_sorted_enriched_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = cfg_in(dir.path());

    let s = collect_news(&cfg, &fixtures(), now()).await.unwrap();
    assert_eq!(s.new_articles, 4);
    assert_eq!(s.total_articles, 4);
    assert_eq!(s.feeds_processed, 3);
    assert_eq!(s.feeds_failed, 0);
    assert!(s.dataset_written);
    assert!(s.mirrors.is_consistent());

    let ds = read_existing(&cfg.output_csv);
    let urls: Vec<_> = ds.records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://news.example.test/a3",     // 2024-03-20 (undated → today)
            "https://news.example.test/a1",     // 2024-03-15
            "https://news.example.test/a4",     // 2024-03-10
            "https://regulator.example.test/b1", // 2024-02-01
        ]
    );

    let a1 = &ds.records[1];
    assert_eq!(a1.source, "offshore-mag.com");
    assert_eq!(a1.category, "deepwater drilling");
    assert_eq!(a1.source_type, "Industry News");
    assert_eq!(a1.insights, "Shell said production will start in 2027.");

    assert_eq!(ds.records[0].category, "lng & integrated gas");
    assert_eq!(ds.records[2].category, "subsea & pipelines");

    let b1 = &ds.records[3];
    assert_eq!(b1.source, "bsee.gov");
    assert_eq!(b1.source_type, "Government Agency");
    assert_eq!(b1.insights, "Inspectors reviewed the blowout preventer.");

    // Header line is fixed
    let text = fs::read_to_string(&cfg.output_csv).unwrap();
    assert!(text.starts_with("date,title,description,source,url,category,source_type,insights\n"));

    // Mirror is byte-identical
    assert_eq!(fs::read(&cfg.mirror_paths[0]).unwrap(), text.into_bytes());

    // History holds exactly the accepted ids
    let history = fs::read_to_string(&cfg.history_file).unwrap();
    assert_eq!(history.lines().count(), 4);

    let status = read_status(&cfg.status_path()).unwrap();
    assert_eq!(status.last_updated, "2024-03-20");
    assert!(status.timestamp.ends_with("-05:00"));
}

#[tokio::test]
async fn second_run_without_new_content_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = cfg_in(dir.path());

    collect_news(&cfg, &fixtures(), now()).await.unwrap();
    let before = fs::read(&cfg.output_csv).unwrap();
    let history_before = fs::read_to_string(&cfg.history_file).unwrap();

    let s = collect_news(&cfg, &fixtures(), now()).await.unwrap();
    assert_eq!(s.new_articles, 0);
    assert_eq!(s.total_articles, 4);
    assert!(!s.dataset_written);
    assert_eq!(fs::read(&cfg.output_csv).unwrap(), before);
    assert_eq!(fs::read_to_string(&cfg.history_file).unwrap(), history_before);
}

#[tokio::test]
async fn history_alone_blocks_reprocessing() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = cfg_in(dir.path());

    // Seen in a run that crashed before merging: in history, not in the dataset.
    fs::write(&cfg.history_file, "https://news.example.test/a1\n").unwrap();

    let s = collect_news(&cfg, &fixtures(), now()).await.unwrap();
    assert_eq!(s.new_articles, 3);
    let ds = read_existing(&cfg.output_csv);
    assert!(!ds.urls.contains("https://news.example.test/a1"));
}

#[tokio::test]
async fn later_run_appends_only_new_urls() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = cfg_in(dir.path());
    collect_news(&cfg, &fixtures(), now()).await.unwrap();

    let updated_atom = ATOM.replace(
        "</feed>",
        r#"  <entry>
    <title>Lease sale results posted</title>
    <id>urn:example:regulator:b2</id>
    <link href="https://regulator.example.test/b2"/>
    <updated>2024-03-18T00:00:00Z</updated>
    <summary>High bids totaled 300 million dollars.</summary>
  </entry>
</feed>"#,
    );
    let src = FixtureFeedSource::new()
        .with_feed(OFFSHORE_URL, RSS)
        .with_feed(REGULATOR_URL, &updated_atom);

    let s = collect_news(&cfg, &src, now()).await.unwrap();
    assert_eq!(s.new_articles, 1);
    assert_eq!(s.total_articles, 5);

    let ds = read_existing(&cfg.output_csv);
    assert_eq!(ds.records.len(), 5);
    assert_eq!(ds.urls.len(), 5);
    assert_eq!(ds.records[1].url, "https://regulator.example.test/b2");
    assert_eq!(ds.records[1].insights, "High bids totaled 300 million dollars.");
}

#[tokio::test]
async fn existing_duplicates_and_bad_rows_are_cleaned_on_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = cfg_in(dir.path());
    fs::create_dir_all(cfg.output_csv.parent().unwrap()).unwrap();
    fs::write(
        &cfg.output_csv,
        "date,title,description,source,url,category,source_type,insights\n\
         03/01/2024,Old,,x.test,https://x.test/1,oil & gas,Industry News,\n\
         03/01/2024,Old again,,x.test,https://x.test/1,oil & gas,Industry News,\n\
         broken row with too few fields\n",
    )
    .unwrap();

    let s = collect_news(&cfg, &fixtures(), now()).await.unwrap();
    assert_eq!(s.total_articles, 5);

    let ds = read_existing(&cfg.output_csv);
    let old: Vec<_> = ds.records.iter().filter(|r| r.url == "https://x.test/1").collect();
    assert_eq!(old.len(), 1);
    assert_eq!(old[0].title, "Old");
    // 03/01/2024 sorts between a4 (03-10) and b1 (02-01)
    assert_eq!(ds.records[3].url, "https://x.test/1");
}
