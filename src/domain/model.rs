use crate::core::ledger::SectionLedger;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque section identifier, unique for the lifetime of a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(Uuid);

impl SectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SectionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A titled block of report content.
///
/// `order` is owned by the [`SectionLedger`]; it can be read but never set
/// from outside the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub(crate) id: SectionId,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) order: usize,
}

impl Section {
    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn order(&self) -> usize {
        self.order
    }
}

/// Title and content of a section that has not been placed in a ledger yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionDraft {
    pub title: String,
    pub content: String,
}

impl<T: Into<String>, C: Into<String>> From<(T, C)> for SectionDraft {
    fn from((title, content): (T, C)) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

// 從其他報告複製時丟棄原本的 id
impl From<&Section> for SectionDraft {
    fn from(section: &Section) -> Self {
        Self {
            title: section.title.clone(),
            content: section.content.clone(),
        }
    }
}

impl From<ParsedSection> for SectionDraft {
    fn from(parsed: ParsedSection) -> Self {
        Self {
            title: parsed.title,
            content: parsed.content,
        }
    }
}

/// One boundary-delimited block produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSection {
    pub title: String,
    pub content: String,
    pub order: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub sections: SectionLedger,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            title: title.into(),
            description: String::new(),
            attachments: Vec::new(),
            sections: SectionLedger::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub source_names: Vec<String>,
    pub sections_added: usize,
    pub total_sections: usize,
    pub output_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadResult {
    pub sections_added: usize,
    pub total_sections: usize,
    pub output_path: String,
}
