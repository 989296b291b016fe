//! Core data types for parsed records.
//!
//! Field names follow the JSON interchange format read by the importer, so
//! several fields carry a serde rename.

use serde::{Deserialize, Serialize};

use crate::hansard::HansardSection;

/// A person mentioned in a roster, as a speaker or as an inquiry party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    /// Display name.
    pub name: String,

    /// Label as printed, used for speaker matching.
    #[serde(rename = "raw")]
    pub raw_label: Option<String>,

    /// Honorifics and titles following the name.
    #[serde(rename = "title", default)]
    pub titles: Vec<String>,

    /// Constituency.
    #[serde(rename = "area")]
    pub constituency: Option<String>,

    pub role: Option<String>,
}

impl PersonRef {
    /// Create a person whose name doubles as the raw label.
    #[must_use]
    pub fn labelled(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            name: label.clone(),
            raw_label: Some(label),
            ..Self::default()
        }
    }

    /// Create a person with a name only.
    #[cfg(test)]
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Label used for speaker matching, falling back to the name.
    #[must_use]
    pub fn label(&self) -> &str {
        self.raw_label.as_deref().unwrap_or(&self.name)
    }

    /// Deduplication key: the label lowercased, letters only.
    ///
    /// # Examples
    /// ```
    /// use legisdata::types::PersonRef;
    ///
    /// let person = PersonRef::labelled("Y.B. Dato' Ahmad bin Ali");
    /// assert_eq!(person.identifier(), "ybdatoahmadbinali");
    /// ```
    #[must_use]
    pub fn identifier(&self) -> String {
        self.label()
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .collect()
    }
}

/// Atomic unit of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentElement {
    /// Lowercased partitioner category name.
    #[serde(rename = "type")]
    pub kind: String,

    /// Rendered HTML when available, otherwise the plain text.
    pub value: String,

    /// Base64 image payload.
    pub image: Option<String>,
}

/// Provenance carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(rename = "source")]
    pub source_path: String,
    pub year: u16,
    pub session: u16,
    #[serde(rename = "dun")]
    pub assembly_id: String,
    #[serde(rename = "parse_time")]
    pub parse_timestamp: String,
}

impl Meta {
    /// Create metadata stamped with the current local time.
    #[must_use]
    pub fn new(
        source_path: impl Into<String>,
        year: u16,
        session: u16,
        assembly_id: impl Into<String>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            year,
            session,
            assembly_id: assembly_id.into(),
            parse_timestamp: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S%.6f")
                .to_string(),
        }
    }
}

/// One oral or written question-and-answer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryRecord {
    pub meta: Meta,
    pub is_oral: bool,
    pub inquirer: Option<PersonRef>,
    pub respondent: Option<PersonRef>,
    pub number: Option<u32>,
    pub title: Option<String>,
    #[serde(rename = "inquiries")]
    pub inquiry_groups: Vec<Vec<ContentElement>>,
    #[serde(rename = "responds")]
    pub respond_groups: Vec<Vec<ContentElement>>,
    #[serde(rename = "akn")]
    pub markup: Option<String>,
}

impl InquiryRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new(meta: Meta, is_oral: bool) -> Self {
        Self {
            meta,
            is_oral,
            inquirer: None,
            respondent: None,
            number: None,
            title: None,
            inquiry_groups: Vec::new(),
            respond_groups: Vec::new(),
            markup: None,
        }
    }

    /// Groups on the question side (`true`) or the answer side (`false`).
    pub fn groups_mut(&mut self, question_side: bool) -> &mut Vec<Vec<ContentElement>> {
        if question_side {
            &mut self.inquiry_groups
        } else {
            &mut self.respond_groups
        }
    }
}

/// Speech made outside a question block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speech {
    #[serde(rename = "by")]
    pub speaker: PersonRef,
    pub role: Option<String>,
    pub content: Vec<ContentElement>,
}

/// Question read into the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub inquirer: PersonRef,
    pub role: Option<String>,
    pub content: Vec<ContentElement>,
    #[serde(default)]
    pub is_oral: bool,
}

/// Answer to the question block it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub respondent: PersonRef,
    pub role: Option<String>,
    pub content: Vec<ContentElement>,
}

/// Item inside a question block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QaItem {
    Question(Question),
    Answer(Answer),
}

impl QaItem {
    /// The person asking or answering.
    #[must_use]
    pub fn person(&self) -> &PersonRef {
        match self {
            Self::Question(question) => &question.inquirer,
            Self::Answer(answer) => &answer.respondent,
        }
    }

    #[must_use]
    pub fn content(&self) -> &[ContentElement] {
        match self {
            Self::Question(question) => &question.content,
            Self::Answer(answer) => &answer.content,
        }
    }
}

/// Question block: a question followed by its answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBlock {
    #[serde(rename = "content")]
    pub items: Vec<QaItem>,
}

/// Entry in the debate sequence.
///
/// Serialized untagged: a speech has `by`, a question block only `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DebateEntry {
    Speech(Speech),
    QuestionBlock(QuestionBlock),
}

/// Transcript of one sitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HansardRecord {
    pub meta: Meta,
    pub present: Vec<PersonRef>,
    pub absent: Vec<PersonRef>,
    pub guest: Vec<PersonRef>,
    pub officer: Vec<PersonRef>,
    pub debate: Vec<DebateEntry>,
    #[serde(rename = "akn")]
    pub markup: Option<String>,
}

impl HansardRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new(meta: Meta) -> Self {
        Self {
            meta,
            present: Vec::new(),
            absent: Vec::new(),
            guest: Vec::new(),
            officer: Vec::new(),
            debate: Vec::new(),
            markup: None,
        }
    }
}

/// Utterance being accumulated before it is committed to the debate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerBuffer {
    pub speaker: PersonRef,
    pub role: Option<String>,
    pub content: Vec<ContentElement>,
    pub is_question: bool,
    pub is_oral: bool,
}

impl SpeakerBuffer {
    /// Open a buffer with the first content element of the utterance.
    #[must_use]
    pub fn open(speaker: PersonRef, role: Option<String>, first: ContentElement) -> Self {
        Self {
            speaker,
            role,
            content: vec![first],
            is_question: false,
            is_oral: false,
        }
    }
}

/// A node that no rule claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Position in the scanned sequence.
    pub index: usize,
    /// Section at the time (Hansard only).
    pub section: Option<HansardSection>,
    pub text: String,
}

/// Apply `update` to the last element, if any.
///
/// Returns `false` when the sequence is empty.
pub fn replace_last<T>(items: &mut [T], update: impl FnOnce(&mut T)) -> bool {
    match items.last_mut() {
        Some(last) => {
            update(last);
            true
        }
        None => false,
    }
}
