// Test utility module for issuefeat integration tests
#![allow(dead_code)]

use issuefeat::classify::{FixedLanguage, IssueFilter};
use issuefeat::config::{FilterConfig, IssueFeatConfig, ReloadPolicy};
use issuefeat::{BotClassifier, BugLabelMatcher, GroundTruthBots, Issue, IssueAnalyzer};
use serde_json::json;
use std::path::PathBuf;
use whatlang::Lang;

/// Ground-truth rows used across tests; the first row mimics the dataset header
pub const BOT_TABLE: &str = "\
account,type_of_account,classification
travis-ci,App,Bot
k8s-ci-robot,User,Bot
octocat,User,Human
";

// Helper to write the ground-truth table into a temp dir
pub fn write_bot_table(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("groundtruthbots.csv");
    std::fs::write(&path, contents).expect("Failed to write bot table");
    (temp_dir, path)
}

pub fn config_with_table(path: PathBuf, reload: ReloadPolicy) -> IssueFeatConfig {
    let mut config = IssueFeatConfig::default();
    config.bots.ground_truth = path;
    config.bots.reload = reload;
    config
}

/// Analyzer whose language identifier always answers English
pub fn english_analyzer() -> IssueAnalyzer {
    let table = GroundTruthBots::from_reader(
        BOT_TABLE.as_bytes(),
        std::path::Path::new("inline"),
        "Bot",
    )
    .expect("inline bot table parses");
    IssueAnalyzer::from_parts(
        BotClassifier::with_table(table),
        IssueFilter::from_config(
            &FilterConfig::default(),
            Box::new(FixedLanguage(Some(Lang::Eng))),
        )
        .expect("default filter config is valid"),
        BugLabelMatcher::default(),
    )
}

/// The reporter/developer issue used as the worked example
pub fn sample_issue_json() -> serde_json::Value {
    json!({
        "user": {"login": "reporter"},
        "body": "Hello! In m_fonts.cpp:330 (tag handler for BIG and SMALL)\r\n```\r\nint oldsize = m_WParser->GetFontSize();\r\nint sz = (tag.GetName() == wxT(\"BIG\")) ? +1 : -1;\r\nm_WParser->SetFontSize(sz);\r\n```\r\nThat results in SetFontSize(1) for BIG and SetFontSize(-1) for SMALL.\r\nLooking at SetFontSize() in winpars.cpp:535:\r\n```\r\nif (s < 1)\r\n    s = 1;\r\nelse if (s > 7)\r\n    s = 7;\r\nm_FontSize = s;\r\n```\r\nso both 1 and -1 result in m_FontSize = 1, the smallest font.Best Regards:\r\nZsolt",
        "labels": [{"name": "bug"}],
        "created_at": "2022-01-10T10:00:00Z",
        "closed_at": "2022-01-13T10:00:00Z",
        "comments": 2,
        "comments_dict": {
            "1th comment": {"created_at": "2022-01-11T10:00:00Z", "user": {"login": "reporter"}},
            "2th comment": {"created_at": "2022-01-13T09:00:00Z", "user": {"login": "developer"}}
        }
    })
}

pub fn sample_issue() -> Issue {
    Issue::from_value(sample_issue_json()).expect("sample issue deserializes")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
