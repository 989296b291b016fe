//! Boundary-detection predicates shared by the Hansard and inquiry drivers.
//!
//! Every predicate is a literal prefix or substring test. Case handling is
//! part of each rule: headings compare uppercased text, the start-of-sitting
//! marker compares lowercased text, role markers are case-sensitive.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{
    HANSARD_ROLES, NAME_HONORIFICS, ORAL_INQUIRY_HEADING, WRITTEN_INQUIRY_HEADING,
};
use crate::hansard::HansardSection;
use crate::node::SourceNode;
use crate::types::HansardRecord;

/// Leading inquiry number, e.g. `"12. "`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*\.").expect("valid regex"));

/// Maximum character offset of the respondent phrase from the search position.
const MENTION_WINDOW: usize = 6;

/// Maximum token index of a standalone `:` on an unlabelled speakline.
const SPEAKLINE_COLON_WINDOW: usize = 10;

fn upper(node: &SourceNode) -> String {
    node.text.trim().to_uppercase()
}

// --- Inquiry headings -------------------------------------------------------

/// Title opening an oral inquiry.
#[must_use]
pub fn is_oral_inquiry_heading(node: &SourceNode) -> bool {
    node.is_title() && upper(node).starts_with(ORAL_INQUIRY_HEADING)
}

/// Title opening a written inquiry.
#[must_use]
pub fn is_written_inquiry_heading(node: &SourceNode) -> bool {
    node.is_title() && upper(node).starts_with(WRITTEN_INQUIRY_HEADING)
}

#[must_use]
pub fn is_inquiry_heading(node: &SourceNode) -> bool {
    is_oral_inquiry_heading(node) || is_written_inquiry_heading(node)
}

/// Title introducing the answer ("JAWAPAN").
#[must_use]
pub fn is_inquiry_answer(node: &SourceNode) -> bool {
    node.is_title() && upper(node).starts_with("JAWAPAN")
}

/// Title carrying the inquiry subject ("TAJUK").
#[must_use]
pub fn is_inquiry_title(node: &SourceNode) -> bool {
    node.is_title() && upper(node).starts_with("TAJUK")
}

/// Leading inquiry number and the byte offset just past its dot.
#[must_use]
pub fn number_prefix(text: &str) -> Option<(Option<u32>, usize)> {
    let captures = NUMBER_PREFIX.captures(text)?;
    let end = captures.get(0)?.end();
    let number = captures.get(1).and_then(|m| m.as_str().parse().ok());
    Some((number, end))
}

/// Line naming who the question is put to ("bertanya kepada").
///
/// The phrase must start within a few characters of the search position,
/// which is just past a leading `"<n>."` number, or the start of the text.
#[must_use]
pub fn is_respondent_mention(node: &SourceNode) -> bool {
    let start = number_prefix(&node.text).map_or(0, |(_, end)| end);
    let lower = node.text[start..].to_lowercase();

    lower
        .find("bertanya kepada")
        .is_some_and(|idx| lower[..idx].chars().count() < MENTION_WINDOW)
}

// --- Hansard section headers ------------------------------------------------

#[must_use]
pub fn is_section_present(node: &SourceNode, section: HansardSection) -> bool {
    section == HansardSection::DocumentStart && node.is_title() && upper(node) == "YANG HADIR"
}

#[must_use]
pub fn is_section_absent(node: &SourceNode, section: HansardSection) -> bool {
    section == HansardSection::Present
        && node.is_title()
        && upper(node).starts_with("TIDAK HADIR")
}

#[must_use]
pub fn is_section_guest(node: &SourceNode, section: HansardSection) -> bool {
    section == HansardSection::Absent && node.is_title() && upper(node) == "TURUT HADIR"
}

#[must_use]
pub fn is_section_officer(node: &SourceNode, section: HansardSection) -> bool {
    section == HansardSection::Guest && node.is_title() && upper(node) == "PEGAWAI BERTUGAS"
}

/// The chair taking the floor opens the debate.
#[must_use]
pub fn is_section_start(node: &SourceNode, section: HansardSection) -> bool {
    section == HansardSection::Officer
        && node.is_title()
        && node.text.to_lowercase().contains("mempengerusikan mesyuarat")
}

/// Adjournment marker, optionally parenthesized.
#[must_use]
pub fn is_section_end(node: &SourceNode, section: HansardSection) -> bool {
    section.is_debate()
        && node.is_title()
        && node
            .text
            .to_uppercase()
            .trim_matches(['(', ' ', ')'])
            .starts_with("DEWAN DITANGGUHKAN")
}

// --- Hansard body -----------------------------------------------------------

/// Stage direction such as "(Tepuk meja)".
///
/// The text up to and including the first `)`, first line only, must
/// start with `(`.
#[must_use]
pub fn is_event(node: &SourceNode, section: HansardSection) -> bool {
    if !section.is_debate() {
        return false;
    }
    let Some(close) = node.text.find(')') else {
        return false;
    };
    node.text[..=close]
        .lines()
        .next()
        .is_some_and(|line| line.starts_with('('))
}

/// Member entry in the present or absent roster.
#[must_use]
pub fn is_assembly_person(node: &SourceNode, section: HansardSection) -> bool {
    let text = upper(node);
    section.is_member_roster() && (text.starts_with("Y.B") || text.starts_with("Y.A.B"))
}

/// Parenthesized role continuing the previous present entry.
#[must_use]
pub fn is_assembly_role(node: &SourceNode, section: HansardSection) -> bool {
    let text = node.text.trim();
    section == HansardSection::Present && text.starts_with('(') && text.ends_with(')')
}

#[must_use]
pub fn is_guest(node: &SourceNode, section: HansardSection) -> bool {
    section == HansardSection::Guest && upper(node).starts_with("Y.B")
}

/// Officer entry.
///
/// Without `strict`, the "puan" prefix is accepted in every section. This
/// reproduces the historical precedence `(officer and encik) or puan`.
#[must_use]
pub fn is_officer(node: &SourceNode, section: HansardSection, strict: bool) -> bool {
    let text = node.text.trim().to_lowercase();
    let in_section = section == HansardSection::Officer;

    if strict {
        in_section && (text.starts_with("encik") || text.starts_with("puan"))
    } else {
        (in_section && text.starts_with("encik")) || text.starts_with("puan")
    }
}

/// Speaker label recognised at the start of a speakline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerMatch {
    /// Uppercased label as matched.
    pub label: String,
    /// Role of the roster person or officer the label belongs to.
    pub role: Option<String>,
}

/// Find the known speaker label the node starts with.
///
/// Lookup order: present and guest rosters, fixed chair and clerk labels,
/// officer roles.
#[must_use]
pub fn match_speaker(node: &SourceNode, record: &HansardRecord) -> Option<SpeakerMatch> {
    let text = upper(node);

    let roster = record
        .present
        .iter()
        .chain(&record.guest)
        .filter_map(|person| {
            let raw = person.raw_label.as_deref()?.to_uppercase();
            (!raw.is_empty() && text.starts_with(&raw)).then(|| SpeakerMatch {
                label: raw,
                role: person.role.clone(),
            })
        })
        .next();
    if roster.is_some() {
        return roster;
    }

    if let Some(role) = HANSARD_ROLES.iter().find(|role| text.starts_with(*role)) {
        return Some(SpeakerMatch {
            label: (*role).to_string(),
            role: None,
        });
    }

    record.officer.iter().find_map(|person| {
        let role = person.role.as_deref()?;
        let label = role.to_uppercase();
        (!label.is_empty() && text.starts_with(&label)).then(|| SpeakerMatch {
            label,
            role: Some(role.to_string()),
        })
    })
}

#[must_use]
pub fn is_speakline(node: &SourceNode, section: HansardSection, record: &HansardRecord) -> bool {
    section.is_debate() && match_speaker(node, record).is_some()
}

/// Speakline with an unknown speaker: `"<label> : <content>"`.
#[must_use]
pub fn is_speakline_alternative(node: &SourceNode, section: HansardSection) -> bool {
    if !section.is_debate() {
        return false;
    }
    let text = upper(node);
    if text.starts_with("TAJUK") || text.starts_with("JAWAPAN") {
        return false;
    }

    node.text
        .split(' ')
        .position(|token| token == ":")
        .is_some_and(|idx| idx < SPEAKLINE_COLON_WINDOW)
}

/// Further content for the open utterance.
#[must_use]
pub fn is_continuation(node: &SourceNode, section: HansardSection, buffer_open: bool) -> bool {
    section.is_debate() && buffer_open && !is_inquiry_answer(node)
}

// --- Text helpers -----------------------------------------------------------

/// Remove one leading honorific from a display name.
///
/// Returns the input unchanged when nothing would remain.
///
/// # Examples
/// ```
/// use legisdata::predicates::strip_honorific;
///
/// assert_eq!(strip_honorific("Y.B AHMAD"), "AHMAD");
/// assert_eq!(strip_honorific("EN. ALI"), "ALI");
/// assert_eq!(strip_honorific("ENCIK ALI"), "ENCIK ALI");
/// ```
#[must_use]
pub fn strip_honorific(name: &str) -> &str {
    let name = name.trim();

    for honorific in NAME_HONORIFICS {
        let Some(prefix) = name.get(..honorific.len()) else {
            continue;
        };
        if !prefix.eq_ignore_ascii_case(honorific) {
            continue;
        }
        let rest = &name[honorific.len()..];
        if !(honorific.ends_with('.') || rest.starts_with(char::is_whitespace)) {
            continue;
        }
        let rest = rest.trim_start();
        if !rest.is_empty() {
            return rest;
        }
    }

    name
}

/// Byte span of the first `open` and the first `close` following it, inclusive.
#[must_use]
pub fn delimited_span(text: &str, open: char, close: char) -> Option<(usize, usize)> {
    let start = text.find(open)?;
    let end = start + text[start..].find(close)?;
    Some((start, end + close.len_utf8()))
}

/// Text following the first `count` characters.
#[must_use]
pub fn skip_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}
