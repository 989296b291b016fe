//! Ordered rule table for Hansard scanning.
//!
//! Each node is offered to the rules top to bottom. The first rule whose
//! `matches` returns true handles the node; a node no rule claims is skipped.

use std::fmt;

use crate::config::ParseOptions;
use crate::node::SourceNode;
use crate::predicates::{
    is_assembly_person, is_assembly_role, is_continuation, is_event, is_guest,
    is_oral_inquiry_heading, is_officer, is_section_absent, is_section_end, is_section_guest,
    is_section_officer, is_section_present, is_section_start, is_speakline,
    is_speakline_alternative, is_written_inquiry_heading, match_speaker, skip_chars,
};
use crate::types::{replace_last, HansardRecord, PersonRef, SpeakerBuffer};

use super::commit::{commit, section_after_commit};
use super::roster::{parse_assembly_person, parse_guest, parse_officers, parse_role_continuation};
use super::section::HansardSection;

/// Mutable state threaded through one document scan.
#[derive(Debug)]
pub struct ScanState {
    pub section: HansardSection,
    pub record: HansardRecord,
    pub buffer: Option<SpeakerBuffer>,
    pub options: ParseOptions,
}

impl ScanState {
    #[must_use]
    pub fn new(record: HansardRecord, options: ParseOptions) -> Self {
        Self {
            section: HansardSection::DocumentStart,
            record,
            buffer: None,
            options,
        }
    }

    /// Commit the open buffer and move to the section the debate implies.
    pub fn commit_buffer(&mut self) {
        if commit(&mut self.buffer, &mut self.record) {
            if let Some(section) = section_after_commit(&self.record) {
                self.section = section;
            }
        }
    }

    /// Commit the previous utterance and open a new one.
    fn open_buffer(&mut self, buffer: SpeakerBuffer) {
        self.commit_buffer();
        self.buffer = Some(buffer);
    }
}

/// A single classification rule.
pub trait NodeRule: Send + Sync {
    /// Stable rule name, used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Check if this rule claims the node in the current state.
    fn matches(&self, node: &SourceNode, state: &ScanState) -> bool;

    /// Apply the rule's effect.
    fn apply(&self, node: &SourceNode, state: &mut ScanState);
}

/// Rules in evaluation order.
pub struct RuleRegistry {
    rules: Vec<Box<dyn NodeRule>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. Rules registered earlier take precedence.
    pub fn register(&mut self, rule: impl NodeRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// First rule that claims the node.
    #[must_use]
    pub fn find(&self, node: &SourceNode, state: &ScanState) -> Option<&dyn NodeRule> {
        self.rules
            .iter()
            .find(|rule| rule.matches(node, state))
            .map(|rule| rule.as_ref())
    }

    /// Rule names in evaluation order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rule_names()).finish()
    }
}

/// Section header moving the scan to `target`.
pub struct SectionTransition {
    name: &'static str,
    target: HansardSection,
    predicate: fn(&SourceNode, HansardSection) -> bool,
}

impl NodeRule for SectionTransition {
    fn name(&self) -> &'static str {
        self.name
    }

    fn matches(&self, node: &SourceNode, state: &ScanState) -> bool {
        (self.predicate)(node, state.section)
    }

    fn apply(&self, _node: &SourceNode, state: &mut ScanState) {
        state.section = self.target;
    }
}

/// Adjournment: flush the open utterance and stop.
pub struct SectionEndRule;

impl NodeRule for SectionEndRule {
    fn name(&self) -> &'static str {
        "section_end"
    }

    fn matches(&self, node: &SourceNode, state: &ScanState) -> bool {
        is_section_end(node, state.section)
    }

    fn apply(&self, _node: &SourceNode, state: &mut ScanState) {
        state.commit_buffer();
        state.section = HansardSection::End;
    }
}

/// Stage direction: ends the current utterance, its own text is dropped.
pub struct EventRule;

impl NodeRule for EventRule {
    fn name(&self) -> &'static str {
        "event"
    }

    fn matches(&self, node: &SourceNode, state: &ScanState) -> bool {
        is_event(node, state.section)
    }

    fn apply(&self, _node: &SourceNode, state: &mut ScanState) {
        state.commit_buffer();
    }
}

pub struct AssemblyPersonRule;

impl NodeRule for AssemblyPersonRule {
    fn name(&self) -> &'static str {
        "assembly_person"
    }

    fn matches(&self, node: &SourceNode, state: &ScanState) -> bool {
        is_assembly_person(node, state.section)
    }

    fn apply(&self, node: &SourceNode, state: &mut ScanState) {
        let person = parse_assembly_person(&node.text);
        if state.section == HansardSection::Present {
            state.record.present.push(person);
        } else {
            state.record.absent.push(person);
        }
    }
}

/// Role printed on its own line under a present member.
pub struct AssemblyRoleRule;

impl NodeRule for AssemblyRoleRule {
    fn name(&self) -> &'static str {
        "assembly_role"
    }

    fn matches(&self, node: &SourceNode, state: &ScanState) -> bool {
        is_assembly_role(node, state.section)
    }

    fn apply(&self, node: &SourceNode, state: &mut ScanState) {
        if let Some(role) = parse_role_continuation(&node.text) {
            replace_last(&mut state.record.present, |last| last.role = Some(role));
        }
    }
}

pub struct GuestRule;

impl NodeRule for GuestRule {
    fn name(&self) -> &'static str {
        "guest"
    }

    fn matches(&self, node: &SourceNode, state: &ScanState) -> bool {
        is_guest(node, state.section)
    }

    fn apply(&self, node: &SourceNode, state: &mut ScanState) {
        state.record.guest.push(parse_guest(&node.text));
    }
}

pub struct OfficerRule;

impl NodeRule for OfficerRule {
    fn name(&self) -> &'static str {
        "officer"
    }

    fn matches(&self, node: &SourceNode, state: &ScanState) -> bool {
        is_officer(node, state.section, state.options.strict_officer_section)
    }

    fn apply(&self, node: &SourceNode, state: &mut ScanState) {
        state.record.officer.extend(parse_officers(&node.text));
    }
}

/// Utterance opened by a known speaker label.
pub struct SpeaklineRule;

impl NodeRule for SpeaklineRule {
    fn name(&self) -> &'static str {
        "speakline"
    }

    fn matches(&self, node: &SourceNode, state: &ScanState) -> bool {
        is_speakline(node, state.section, &state.record)
    }

    fn apply(&self, node: &SourceNode, state: &mut ScanState) {
        let Some(speaker) = match_speaker(node, &state.record) else {
            return;
        };

        let remainder = skip_chars(node.text.trim(), speaker.label.chars().count());
        let content = remainder.trim_start_matches([':', '-', ' ']).trim_end();

        state.open_buffer(SpeakerBuffer::open(
            PersonRef::labelled(speaker.label),
            speaker.role,
            node.content_element_with(content),
        ));
    }
}

/// Utterance opened by an unknown label followed by a standalone colon.
pub struct SpeaklineAlternativeRule;

impl NodeRule for SpeaklineAlternativeRule {
    fn name(&self) -> &'static str {
        "speakline_alternative"
    }

    fn matches(&self, node: &SourceNode, state: &ScanState) -> bool {
        is_speakline_alternative(node, state.section)
    }

    fn apply(&self, node: &SourceNode, state: &mut ScanState) {
        let (speaker, content) = node.text.split_once(':').unwrap_or((&node.text, ""));

        state.open_buffer(SpeakerBuffer::open(
            PersonRef::labelled(speaker.trim()),
            None,
            node.content_element_with(content.trim()),
        ));
    }
}

/// Further content of the open utterance.
pub struct ContinuationRule;

impl NodeRule for ContinuationRule {
    fn name(&self) -> &'static str {
        "continuation"
    }

    fn matches(&self, node: &SourceNode, state: &ScanState) -> bool {
        is_continuation(node, state.section, state.buffer.is_some())
    }

    fn apply(&self, node: &SourceNode, state: &mut ScanState) {
        let Some(buffer) = state.buffer.as_mut() else {
            return;
        };

        let oral = is_oral_inquiry_heading(node);
        if oral || is_written_inquiry_heading(node) {
            buffer.is_question = true;
            buffer.is_oral |= oral;
            state.section = HansardSection::Question;
        }
        buffer.content.push(node.content_element());
    }
}

/// Create the Hansard rule table.
///
/// The order is significant: section headers first, then stage directions,
/// roster entries, speaklines and finally continuation content.
#[must_use]
pub fn create_hansard_registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();

    registry.register(SectionTransition {
        name: "section_present",
        target: HansardSection::Present,
        predicate: is_section_present,
    });
    registry.register(SectionTransition {
        name: "section_absent",
        target: HansardSection::Absent,
        predicate: is_section_absent,
    });
    registry.register(SectionTransition {
        name: "section_guest",
        target: HansardSection::Guest,
        predicate: is_section_guest,
    });
    registry.register(SectionTransition {
        name: "section_officer",
        target: HansardSection::Officer,
        predicate: is_section_officer,
    });
    registry.register(SectionTransition {
        name: "section_start",
        target: HansardSection::Start,
        predicate: is_section_start,
    });
    registry.register(SectionEndRule);
    registry.register(EventRule);
    registry.register(AssemblyPersonRule);
    registry.register(AssemblyRoleRule);
    registry.register(GuestRule);
    registry.register(OfficerRule);
    registry.register(SpeaklineRule);
    registry.register(SpeaklineAlternativeRule);
    registry.register(ContinuationRule);

    registry
}
