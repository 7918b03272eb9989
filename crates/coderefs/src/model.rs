//! # Domain Model: Reference Records
//!
//! A [`ReferenceRecord`] is a single bookmarked entity. Its [`ReferenceKind`] decides
//! which optional fields it carries:
//!
//! | Kind            | `filePath` | `snippet` | Notes                               |
//! |-----------------|------------|-----------|-------------------------------------|
//! | `file`          | yes        | no        | jump opens the file                 |
//! | `file-snippet`  | yes        | yes       | snippet is searched inside the file |
//! | `global-snippet`| no         | yes       | snippet is searched in the corpus   |
//! | `comment`       | no         | no        | the title carries the content       |
//!
//! ## Identity
//!
//! Ids are a base-36 millisecond timestamp followed by a random suffix taken from a
//! v4 UUID. Uniqueness is probabilistic: fine for a single-user, single-process
//! store, not for several writers generating ids against the same file.
//!
//! `id` and `kind` never change after creation. Every mutation refreshes `updatedAt`.
//!
//! ## Wire Format
//!
//! Records serialize to camelCase JSON with the kind under the `type` key:
//!
//! ```json
//! {
//!   "id": "m1x2y3z4-9f8e7d6c5b4a",
//!   "type": "file-snippet",
//!   "title": "parser entry",
//!   "filePath": "/work/src/parser.rs",
//!   "snippet": "fn parse(",
//!   "createdAt": "2024-05-01T10:00:00Z",
//!   "updatedAt": "2024-05-01T10:00:00Z"
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const ID_SUFFIX_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    File,
    FileSnippet,
    GlobalSnippet,
    Comment,
}

impl ReferenceKind {
    pub fn carries_file_path(self) -> bool {
        matches!(self, ReferenceKind::File | ReferenceKind::FileSnippet)
    }

    pub fn carries_snippet(self) -> bool {
        matches!(
            self,
            ReferenceKind::FileSnippet | ReferenceKind::GlobalSnippet
        )
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::File => "file",
            ReferenceKind::FileSnippet => "file-snippet",
            ReferenceKind::GlobalSnippet => "global-snippet",
            ReferenceKind::Comment => "comment",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReferenceRecord {
    /// Builds a fresh record. Fields the kind does not carry are dropped, so a
    /// `File` handed a snippet stores only its path. Missing fields are not an error.
    pub fn new(
        kind: ReferenceKind,
        title: String,
        file_path: Option<String>,
        snippet: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(now),
            kind,
            title,
            file_path: file_path.filter(|_| kind.carries_file_path()),
            snippet: snippet.filter(|_| kind.carries_snippet()),
            created_at: now,
            updated_at: now,
        }
    }

    /// True when optional field presence matches the kind exactly.
    pub fn is_consistent(&self) -> bool {
        self.file_path.is_some() == self.kind.carries_file_path()
            && self.snippet.is_some() == self.kind.carries_snippet()
    }

    pub fn rename(&mut self, title: String) {
        self.title = title;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Time-ordered prefix plus random suffix, e.g. `lx3k9a2b-4f1c0d9e8a7b`.
pub fn generate_id(now: DateTime<Utc>) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}", to_base36(millis), &random[..ID_SUFFIX_LEN])
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
