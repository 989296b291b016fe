//! Inquiry driver.
//!
//! An inquiry document holds one or more oral or written question records.
//! Each heading starts a new record; the nodes that follow fill in its title,
//! respondent, question groups and answer groups.

use crate::akn::render_inquiry;
use crate::batch::CancelToken;
use crate::config::ParseOptions;
use crate::error::{ParserError, Result};
use crate::node::SourceNode;
use crate::predicates::{
    delimited_span, is_inquiry_answer, is_inquiry_title, is_oral_inquiry_heading,
    is_respondent_mention, is_written_inquiry_heading, number_prefix, skip_chars, strip_honorific,
};
use crate::types::{ContentElement, Diagnostic, InquiryRecord, Meta, PersonRef};

/// How a node is handled, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryNode {
    OralHeading,
    WrittenHeading,
    Title,
    RespondentMention,
    AnswerHeading,
    Content,
}

impl InquiryNode {
    /// Classify a node. Every node falls into exactly one class.
    #[must_use]
    pub fn classify(node: &SourceNode) -> Self {
        if is_oral_inquiry_heading(node) {
            Self::OralHeading
        } else if is_written_inquiry_heading(node) {
            Self::WrittenHeading
        } else if is_inquiry_title(node) {
            Self::Title
        } else if is_respondent_mention(node) {
            Self::RespondentMention
        } else if is_inquiry_answer(node) {
            Self::AnswerHeading
        } else {
            Self::Content
        }
    }
}

/// Result of scanning one inquiry document.
#[derive(Debug, Clone)]
pub struct InquiryParse {
    /// One record per heading, in document order.
    pub records: Vec<InquiryRecord>,
    /// Respondent lines without a readable number. Only collected with
    /// [`ParseOptions::debug`].
    pub diagnostics: Vec<Diagnostic>,
}

/// Inquirer from a heading: `"... DARIPADA <name> (<area>)"`.
#[must_use]
pub fn parse_inquirer(text: &str) -> PersonRef {
    let start = text
        .to_ascii_uppercase()
        .rfind("DARIPADA")
        .map_or(0, |idx| idx + "DARIPADA".len());
    let rest = &text[start..];

    let (label, constituency) = match delimited_span(rest, '(', ')') {
        Some((open, close)) => (&rest[..open], Some(rest[open + 1..close - 1].trim())),
        None => (rest, None),
    };
    let label = label.trim();

    PersonRef {
        name: strip_honorific(label).to_string(),
        raw_label: (!label.is_empty()).then(|| label.to_string()),
        titles: Vec::new(),
        constituency: constituency
            .filter(|area| !area.is_empty())
            .map(str::to_string),
        role: None,
    }
}

/// Parts of a respondent line: `"<n>. <who> bertanya kepada <respondent>: <question>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondentMention {
    pub number: Option<u32>,
    pub respondent: String,
    /// Question text on the same line, if any.
    pub remainder: Option<String>,
}

/// Split a respondent line.
///
/// # Examples
/// ```
/// use legisdata::inquiry::parse_respondent_mention;
///
/// let mention = parse_respondent_mention("1. Ali bertanya kepada Menteri: Apa?");
/// assert_eq!(mention.number, Some(1));
/// assert_eq!(mention.respondent, "Menteri");
/// assert_eq!(mention.remainder.as_deref(), Some("Apa?"));
/// ```
#[must_use]
pub fn parse_respondent_mention(text: &str) -> RespondentMention {
    let number = number_prefix(text).and_then(|(number, _)| number);

    let after = text
        .to_ascii_lowercase()
        .find("kepada")
        .map_or("", |idx| &text[idx + "kepada".len()..]);

    let (respondent, remainder) = after.split_once(':').unwrap_or((after, ""));
    let respondent = respondent.trim_matches([' ', ':', '-']);
    let remainder = remainder.trim_start_matches([':', '-']).trim();

    RespondentMention {
        number,
        respondent: respondent.to_string(),
        remainder: (!remainder.is_empty()).then(|| remainder.to_string()),
    }
}

/// Subject text after the `TAJUK` marker.
fn parse_title(text: &str) -> String {
    skip_chars(text.trim(), "TAJUK".len())
        .trim_matches([' ', ':'])
        .to_string()
}

/// Append to the last group of the active side, or open a new group.
fn push_content(
    record: &mut InquiryRecord,
    question_side: bool,
    new_group: bool,
    item: ContentElement,
) {
    let groups = record.groups_mut(question_side);
    match groups.last_mut() {
        Some(group) if !new_group => group.push(item),
        _ => groups.push(vec![item]),
    }
}

/// Attach markup and move the record to the output list.
fn finalize(mut record: InquiryRecord, records: &mut Vec<InquiryRecord>) -> Result<()> {
    record.markup = render_inquiry(&record)?;
    records.push(record);
    Ok(())
}

/// Parse one partitioned inquiry document.
pub fn parse_inquiry(
    nodes: &[SourceNode],
    meta: Meta,
    options: ParseOptions,
) -> Result<InquiryParse> {
    parse_inquiry_with_cancel(nodes, meta, options, &CancelToken::new())
}

/// Parse one partitioned inquiry document, checking `cancel` between nodes.
///
/// Fails with [`ParserError::MissingInquiryHeading`] when the first node is
/// not an oral or written heading.
pub fn parse_inquiry_with_cancel(
    nodes: &[SourceNode],
    meta: Meta,
    options: ParseOptions,
    cancel: &CancelToken,
) -> Result<InquiryParse> {
    let Some(first) = nodes.first() else {
        return Err(ParserError::EmptyDocument {
            source_path: meta.source_path,
        });
    };
    if !matches!(
        InquiryNode::classify(first),
        InquiryNode::OralHeading | InquiryNode::WrittenHeading
    ) {
        return Err(ParserError::MissingInquiryHeading {
            source_path: meta.source_path,
        });
    }

    let mut records = Vec::new();
    let mut diagnostics = Vec::new();
    let mut current: Option<InquiryRecord> = None;
    // Not reset by a new heading.
    let mut is_question = false;

    for (index, node) in nodes.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(ParserError::Cancelled);
        }

        let class = InquiryNode::classify(node);
        tracing::trace!(index, ?class, "Classified inquiry node");

        if let InquiryNode::OralHeading | InquiryNode::WrittenHeading = class {
            if let Some(done) = current.take() {
                finalize(done, &mut records)?;
            }
            let mut record =
                InquiryRecord::new(meta.clone(), class == InquiryNode::OralHeading);
            record.inquirer = Some(parse_inquirer(&node.text));
            current = Some(record);
            continue;
        }

        // The first node is a heading, so a record is always open here.
        let Some(record) = current.as_mut() else {
            continue;
        };

        match class {
            InquiryNode::Title => record.title = Some(parse_title(&node.text)),
            InquiryNode::RespondentMention => {
                is_question = true;
                let mention = parse_respondent_mention(&node.text);
                if mention.number.is_none() && options.debug {
                    diagnostics.push(Diagnostic {
                        index,
                        section: None,
                        text: node.text.clone(),
                    });
                }
                record.number = mention.number;
                record.respondent = Some(PersonRef::labelled(mention.respondent));
                if let Some(remainder) = mention.remainder {
                    push_content(record, true, true, node.content_element_with(remainder));
                }
            }
            InquiryNode::AnswerHeading => is_question = false,
            InquiryNode::Content => {
                let new_group =
                    node.is_list_item() || record.groups_mut(is_question).is_empty();
                push_content(record, is_question, new_group, node.content_element());
            }
            InquiryNode::OralHeading | InquiryNode::WrittenHeading => {}
        }
    }

    if let Some(done) = current.take() {
        finalize(done, &mut records)?;
    }

    Ok(InquiryParse {
        records,
        diagnostics,
    })
}
