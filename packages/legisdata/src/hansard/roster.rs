//! Attendance roster extraction: members, guests and officers.
//!
//! Extraction is best effort. Missing delimiters leave the corresponding
//! field empty instead of failing the document.

use crate::config::{GUEST_ROLE_MARKERS, OFFICER_NAME_TOKENS, OFFICER_ROLE_MARKERS};
use crate::predicates::{delimited_span, strip_honorific};
use crate::types::PersonRef;

/// Trim and drop empty strings.
fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Split `"<name>, <title>, <title>"` into a person without area or role.
fn name_with_titles(text: &str) -> PersonRef {
    let mut parts = text.split(',');
    let raw = parts.next().unwrap_or_default().trim();

    PersonRef {
        name: strip_honorific(raw).to_string(),
        raw_label: non_empty(raw),
        titles: parts.filter_map(non_empty).collect(),
        constituency: None,
        role: None,
    }
}

/// Parse a member line: `"Y.B <name>, <titles> (<area>) <role>"`.
///
/// # Examples
/// ```
/// use legisdata::hansard::roster::parse_assembly_person;
///
/// let person = parse_assembly_person("Y.B AHMAD (Kg A)");
/// assert_eq!(person.name, "AHMAD");
/// assert_eq!(person.constituency.as_deref(), Some("Kg A"));
/// ```
#[must_use]
pub fn parse_assembly_person(text: &str) -> PersonRef {
    let text = text.trim();

    let (before, area, after) = match delimited_span(text, '(', ')') {
        Some((start, end)) => (&text[..start], &text[start..end], &text[end..]),
        None => (text, "", ""),
    };

    let mut person = name_with_titles(before);
    person.raw_label = non_empty(before);
    person.constituency = non_empty(area.trim_matches(['(', ')']));
    person.role = non_empty(after.trim().trim_matches(['(', ')']));
    person
}

/// Role from a parenthesized continuation line, if non-empty.
#[must_use]
pub fn parse_role_continuation(text: &str) -> Option<String> {
    non_empty(text.trim_matches(['(', ' ', ')']))
}

/// Parse a guest line: `"Y.B <name>, <titles> <role>"`.
///
/// The role starts at the last occurrence among the guest role markers.
#[must_use]
pub fn parse_guest(text: &str) -> PersonRef {
    let text = text.trim();

    let role_start = GUEST_ROLE_MARKERS
        .iter()
        .filter_map(|marker| text.find(marker))
        .max();

    match role_start {
        Some(idx) => {
            let mut person = name_with_titles(&text[..idx]);
            person.role = non_empty(&text[idx..]);
            person
        }
        None => name_with_titles(text),
    }
}

/// Parse an officer line into one person per name.
///
/// All names on the line share the role that starts at the earliest
/// officer role marker found after the first character.
#[must_use]
pub fn parse_officers(text: &str) -> Vec<PersonRef> {
    let text = text.trim();

    let role_start = OFFICER_ROLE_MARKERS
        .iter()
        .filter_map(|marker| text.find(marker))
        .filter(|idx| *idx > 0)
        .min();

    let (names, role) = match role_start {
        Some(idx) => (&text[..idx], non_empty(&text[idx..])),
        None => (text, None),
    };

    split_officer_names(names)
        .into_iter()
        .map(|name| PersonRef {
            role: role.clone(),
            ..PersonRef::labelled(name)
        })
        .collect()
}

/// Split before every name token ("Encik", "Puan").
fn split_officer_names(text: &str) -> Vec<String> {
    let mut cuts: Vec<usize> = OFFICER_NAME_TOKENS
        .iter()
        .flat_map(|token| text.match_indices(token).map(|(idx, _)| idx))
        .collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut bounds = vec![0];
    bounds.extend(cuts.into_iter().filter(|idx| *idx > 0));
    bounds.push(text.len());

    bounds
        .windows(2)
        .map(|pair| text[pair[0]..pair[1]].trim_matches(|c: char| c.is_whitespace() || c == ','))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
