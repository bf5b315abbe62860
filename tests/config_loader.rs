// tests/config_loader.rs
//
// File discovery for source lists and keyword tables. Tests touch CWD and
// process env, so they run serially.

use std::{env, fs};

use news_digest::classify::keywords::{SportsKeywords, ENV_SPORTS_KEYWORDS_PATH};
use news_digest::config::sources::{NewsConfig, ENV_NEWS_SOURCES_PATH};
use news_digest::config::AppConfig;
use news_digest::ingest::types::FeedSource;
use news_digest::Category;

struct CwdGuard(std::path::PathBuf);

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.0);
        env::remove_var(ENV_NEWS_SOURCES_PATH);
        env::remove_var(ENV_SPORTS_KEYWORDS_PATH);
    }
}

fn isolate() -> (tempfile::TempDir, CwdGuard) {
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_NEWS_SOURCES_PATH);
    env::remove_var(ENV_SPORTS_KEYWORDS_PATH);
    (tmp, CwdGuard(old))
}

#[serial_test::serial]
#[test]
fn no_files_means_builtin_seed() {
    let (_tmp, _guard) = isolate();
    assert_eq!(NewsConfig::load_default().unwrap(), NewsConfig::default_seed());
    assert_eq!(SportsKeywords::load_default().unwrap(), SportsKeywords::default());
    assert!(AppConfig::from_env().is_ok());
}

#[serial_test::serial]
#[test]
fn config_dir_files_are_picked_up() {
    let (tmp, _guard) = isolate();
    fs::create_dir(tmp.path().join("config")).unwrap();
    fs::write(
        tmp.path().join("config/sources.json"),
        r#"{"local": {"sources": [{"name": "Daily Star", "url": "https://ds.test/rss"}]}}"#,
    )
    .unwrap();
    fs::write(
        tmp.path().join("config/sports_keywords.toml"),
        r#"celebrity = ["Podcast"]"#,
    )
    .unwrap();

    let cfg = NewsConfig::load_default().unwrap();
    assert_eq!(
        cfg.category(Category::Local).unwrap().sources,
        vec![FeedSource::new("Daily Star", "https://ds.test/rss")]
    );
    assert_eq!(
        cfg.category(Category::Tech),
        NewsConfig::default_seed().category(Category::Tech)
    );

    let kw = SportsKeywords::load_default().unwrap();
    assert!(kw.celebrity.matches("Weekly podcast"));
    assert!(!kw.celebrity.matches("Coach sacked"));
}

#[serial_test::serial]
#[test]
fn toml_wins_over_json_and_env_wins_over_both() {
    let (tmp, _guard) = isolate();
    fs::create_dir(tmp.path().join("config")).unwrap();
    fs::write(tmp.path().join("config/sources.toml"), "[tech]\nlimit = 2\n").unwrap();
    fs::write(tmp.path().join("config/sources.json"), r#"{"tech": {"limit": 4}}"#).unwrap();
    let cfg = NewsConfig::load_default().unwrap();
    assert_eq!(cfg.category(Category::Tech).unwrap().limit, 2);

    let custom = tmp.path().join("custom.toml");
    fs::write(&custom, "[tech]\nlimit = 7\n").unwrap();
    env::set_var(ENV_NEWS_SOURCES_PATH, custom.display().to_string());
    let cfg = NewsConfig::load_default().unwrap();
    assert_eq!(cfg.category(Category::Tech).unwrap().limit, 7);
}

#[serial_test::serial]
#[test]
fn env_pointing_nowhere_is_an_error() {
    let (tmp, _guard) = isolate();
    env::set_var(ENV_NEWS_SOURCES_PATH, tmp.path().join("missing.toml").display().to_string());
    assert!(NewsConfig::load_default().is_err());
    env::set_var(ENV_SPORTS_KEYWORDS_PATH, tmp.path().join("missing.toml").display().to_string());
    assert!(SportsKeywords::load_default().is_err());
}
