// src/classify/keywords.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use super::KeywordTable;

pub const ENV_SPORTS_KEYWORDS_PATH: &str = "SPORTS_KEYWORDS_PATH";
pub const DEFAULT_SPORTS_KEYWORDS_PATH: &str = "config/sports_keywords.toml";

const FOOTBALL: &[&str] = &[
    "football", "soccer", "fifa", "uefa", "champions league", "premier league", "la liga",
    "bundesliga", "serie a", "euro", "world cup", "goal", "match", "fixture", "score", "draw",
    "win", "penalty", "final", "quarterfinal", "semifinal", "tournament", "cup", "league",
    "ronaldo", "messi", "mbappe", "haaland", "bellingham", "live", "vs", "minute", "kick-off",
    "halftime", "fulltime", "result", "update", "lineup", "stadium", "group", "knockout",
];

const CRICKET: &[&str] = &[
    "cricket", "icc", "t20", "odi", "test", "ipl", "bpl", "psl", "cpl", "big bash", "wicket",
    "run", "six", "four", "over", "innings", "batsman", "bowler", "all-rounder", "match",
    "score", "result", "final", "semi-final", "quarter-final", "world cup", "asia cup", "shakib",
    "kohli", "rohit", "babar", "warner", "root", "williamson", "smith", "starc", "rashid", "live",
    "vs", "innings break", "powerplay", "chase", "target", "runs", "wickets", "umpire", "no-ball",
    "wide", "out", "not out", "review", "super over", "rain", "dl method", "points table",
    "series", "trophy", "stadium", "captain", "squad", "team", "playing xi", "update",
    "scorecard", "highlights", "stream", "broadcast", "telecast", "coverage", "commentary",
    "fixture", "schedule", "venue", "fans", "crowd", "tickets", "pitch", "toss", "bat", "bowl",
    "field", "catch", "drop", "boundary", "partnership", "century", "fifty", "duck", "debut",
    "retire", "injury", "suspension", "ban", "controversy", "award", "record", "milestone",
    "legend", "icon", "star", "hero", "superstar", "profile", "tribute", "obituary", "death",
    "birthday", "marriage", "divorce",
];

const CELEBRITY: &[&str] = &[
    "star", "legend", "coach", "manager", "transfer", "sign", "deal", "injury", "scandal",
    "award", "record", "retire", "comeback", "controversy", "ban", "suspension", "mvp", "gold",
    "silver", "bronze", "medal", "olympic", "world record", "breaking", "exclusive", "statement",
    "announcement", "trending", "viral", "hot", "player", "celebrity", "icon", "hero", "captain",
    "superstar", "profile", "tribute", "obituary", "death", "birthday", "marriage", "divorce",
];

/// Keyword tables for the sports composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SportsKeywords {
    pub football: KeywordTable,
    pub cricket: KeywordTable,
    pub celebrity: KeywordTable,
}

impl Default for SportsKeywords {
    fn default() -> Self {
        Self {
            football: KeywordTable::new(FOOTBALL),
            cricket: KeywordTable::new(CRICKET),
            celebrity: KeywordTable::new(CELEBRITY),
        }
    }
}

/// On-disk shape; any table left out keeps its built-in words.
#[derive(Debug, Deserialize)]
struct KeywordsFile {
    football: Option<Vec<String>>,
    cricket: Option<Vec<String>>,
    celebrity: Option<Vec<String>>,
}

impl SportsKeywords {
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading sports keywords from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing sports keywords in {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: KeywordsFile = toml::from_str(s)?;
        let mut out = Self::default();
        if let Some(v) = file.football {
            out.football = KeywordTable::new(v);
        }
        if let Some(v) = file.cricket {
            out.cricket = KeywordTable::new(v);
        }
        if let Some(v) = file.celebrity {
            out.celebrity = KeywordTable::new(v);
        }
        Ok(out)
    }

    /// Load using env var + fallbacks:
    /// 1) $SPORTS_KEYWORDS_PATH
    /// 2) config/sports_keywords.toml
    /// 3) built-in tables
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_SPORTS_KEYWORDS_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("{ENV_SPORTS_KEYWORDS_PATH} points to non-existent path"));
        }
        let p = PathBuf::from(DEFAULT_SPORTS_KEYWORDS_PATH);
        if p.exists() {
            return Self::load_from(&p);
        }
        Ok(Self::default())
    }
}
