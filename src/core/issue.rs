//! Issue records as produced by the issue crawler.
//!
//! The crawler stores comments in a `comments_dict` object keyed by strings such as
//! `"3th comment"`, with a lone `"Error"` key when the comments could not be fetched.
//! That mapping is converted at the serde boundary into a [`CommentThread`] of explicit
//! [`CommentEntry`] variants keyed by integer ordinal.

use super::timestamp::Timestamp;
use crate::errors::{IssueError, Result};
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Legacy key marking a thread whose comments could not be retrieved
pub const FETCH_ERROR_KEY: &str = "Error";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

impl User {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub created_at: Timestamp,
    pub user: User,
}

impl Comment {
    pub fn new(login: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            created_at,
            user: User::new(login),
        }
    }

    pub fn author(&self) -> &str {
        &self.user.login
    }
}

/// One slot of a comment thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentEntry {
    Posted {
        ordinal: u32,
        comment: Comment,
        /// Crawler key, kept only when it is not `legacy_comment_key(ordinal)`
        irregular_key: Option<String>,
    },
    /// Comments for the issue could not be retrieved by the crawler
    FetchError,
}

/// Comments of an issue in crawler order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentThread {
    entries: Vec<CommentEntry>,
}

impl CommentThread {
    pub fn new() -> Self {
        Self::default()
    }

    /// A thread holding only the fetch-error marker
    pub fn unavailable() -> Self {
        Self {
            entries: vec![CommentEntry::FetchError],
        }
    }

    pub fn push(&mut self, ordinal: u32, comment: Comment) {
        self.entries.push(CommentEntry::Posted {
            ordinal,
            comment,
            irregular_key: None,
        });
    }

    /// Push a comment read under a crawler key, which may not be in `"<n>th comment"` form
    pub fn push_keyed(&mut self, key: &str, ordinal: u32, comment: Comment) {
        let irregular_key = (key != legacy_comment_key(ordinal)).then(|| key.to_string());
        self.entries.push(CommentEntry::Posted {
            ordinal,
            comment,
            irregular_key,
        });
    }

    pub fn with_comment(mut self, ordinal: u32, comment: Comment) -> Self {
        self.push(ordinal, comment);
        self
    }

    pub fn push_fetch_error(&mut self) {
        self.entries.push(CommentEntry::FetchError);
    }

    pub fn entries(&self) -> &[CommentEntry] {
        &self.entries
    }

    /// Posted comments with their ordinals, skipping fetch-error markers
    pub fn posted(&self) -> impl Iterator<Item = (u32, &Comment)> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            CommentEntry::Posted {
                ordinal, comment, ..
            } => Some((*ordinal, comment)),
            CommentEntry::FetchError => None,
        })
    }

    pub fn has_fetch_error(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, CommentEntry::FetchError))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a posted comment by ordinal.
    ///
    /// Returns `Ok(None)` when no comment has the ordinal. Several comments with the
    /// ordinal, or a single one stored under a key other than `"<n>th comment"`, are errors.
    pub fn by_ordinal(&self, ordinal: u32) -> Result<Option<&Comment>> {
        let mut matches = self.entries.iter().filter_map(|entry| match entry {
            CommentEntry::Posted {
                ordinal: candidate,
                comment,
                irregular_key,
            } if *candidate == ordinal => Some((comment, irregular_key)),
            _ => None,
        });

        let first = matches.next();
        if matches.next().is_some() {
            return Err(IssueError::AmbiguousCommentOrdinal { ordinal });
        }
        match first {
            Some((_, Some(key))) => Err(IssueError::IrregularCommentKey {
                key: key.clone(),
                expected: legacy_comment_key(ordinal),
            }),
            Some((comment, None)) => Ok(Some(comment)),
            None => Ok(None),
        }
    }
}

/// Legacy key for a posted comment; the suffix is always "th"
pub fn legacy_comment_key(ordinal: u32) -> String {
    format!("{ordinal}th comment")
}

/// First run of decimal digits in a legacy comment key
fn parse_ordinal(key: &str) -> Option<u32> {
    let start = key.find(|c: char| c.is_ascii_digit())?;
    let digits: String = key[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

impl Serialize for CommentThread {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            match entry {
                CommentEntry::Posted {
                    irregular_key: Some(key),
                    comment,
                    ..
                } => map.serialize_entry(key, comment)?,
                CommentEntry::Posted {
                    ordinal, comment, ..
                } => map.serialize_entry(&legacy_comment_key(*ordinal), comment)?,
                CommentEntry::FetchError => {
                    map.serialize_entry(FETCH_ERROR_KEY, &serde_json::Map::new())?
                }
            }
        }
        map.end()
    }
}

struct CommentThreadVisitor;

impl<'de> Visitor<'de> for CommentThreadVisitor {
    type Value = CommentThread;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of \"<n>th comment\" keys to comments, or an \"Error\" key")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut thread = CommentThread::new();
        while let Some(key) = access.next_key::<String>()? {
            if key == FETCH_ERROR_KEY {
                access.next_value::<IgnoredAny>()?;
                thread.push_fetch_error();
                continue;
            }
            let ordinal = parse_ordinal(&key).ok_or_else(|| {
                serde::de::Error::custom(format!("comment key {key:?} has no ordinal"))
            })?;
            let comment = access.next_value::<Comment>()?;
            thread.push_keyed(&key, ordinal, comment);
        }
        Ok(thread)
    }

    fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(CommentThread::new())
    }
}

impl<'de> Deserialize<'de> for CommentThread {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(CommentThreadVisitor)
    }
}

/// A single crawled issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub user: User,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub closed_at: Option<Timestamp>,
    #[serde(default, rename = "comments_dict")]
    pub comments: CommentThread,
}

impl Issue {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            user: User::new(author),
            body: None,
            labels: Vec::new(),
            created_at: None,
            closed_at: None,
            comments: CommentThread::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn author(&self) -> &str {
        &self.user.login
    }

    /// Body text, with a null or absent body read as empty
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    pub fn created(&self) -> Result<Timestamp> {
        self.created_at.ok_or(IssueError::missing("created_at"))
    }

    pub fn closed(&self) -> Result<Timestamp> {
        self.closed_at.ok_or(IssueError::missing("closed_at"))
    }

    pub fn label_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(|label| label.name.as_str())
    }
}
