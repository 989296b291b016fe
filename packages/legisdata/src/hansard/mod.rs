//! Hansard driver.
//!
//! A transcript is scanned once, left to right. The section state and the open
//! speaker buffer are threaded through the [`rules`] table; the finished record
//! gets its markup attached after the last node.
//!
//! # Example
//!
//! ```
//! use legisdata::config::ParseOptions;
//! use legisdata::hansard::parse_hansard;
//! use legisdata::node::SourceNode;
//! use legisdata::types::Meta;
//!
//! let nodes = vec![
//!     SourceNode::title("DEWAN NEGERI SELANGOR"),
//!     SourceNode::title("YANG HADIR"),
//!     SourceNode::narrative("Y.B AHMAD (Kg A)"),
//!     SourceNode::narrative("(Exco)"),
//! ];
//! let meta = Meta::new("sitting.pdf.json", 2024, 1, "selangor");
//! let parsed = parse_hansard(&nodes, meta, ParseOptions::default()).unwrap();
//!
//! assert_eq!(parsed.record.present[0].name, "AHMAD");
//! assert_eq!(parsed.record.present[0].role.as_deref(), Some("Exco"));
//! ```

pub mod commit;
pub mod roster;
pub mod rules;
mod section;

use std::sync::LazyLock;

pub use section::HansardSection;

use crate::akn::render_hansard;
use crate::batch::CancelToken;
use crate::config::ParseOptions;
use crate::error::{ParserError, Result};
use crate::node::{filter_nodes, SourceNode};
use crate::types::{Diagnostic, HansardRecord, Meta};
use rules::{create_hansard_registry, RuleRegistry, ScanState};

static REGISTRY: LazyLock<RuleRegistry> = LazyLock::new(create_hansard_registry);

/// Result of scanning one transcript.
#[derive(Debug, Clone)]
pub struct HansardParse {
    pub record: HansardRecord,
    /// Nodes no rule claimed. Only collected with [`ParseOptions::debug`].
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse one partitioned transcript.
pub fn parse_hansard(
    nodes: &[SourceNode],
    meta: Meta,
    options: ParseOptions,
) -> Result<HansardParse> {
    parse_hansard_with_cancel(nodes, meta, options, &CancelToken::new())
}

/// Parse one partitioned transcript, checking `cancel` between nodes.
///
/// A cancelled scan returns [`ParserError::Cancelled`] and no partial record.
pub fn parse_hansard_with_cancel(
    nodes: &[SourceNode],
    meta: Meta,
    options: ParseOptions,
    cancel: &CancelToken,
) -> Result<HansardParse> {
    if nodes.is_empty() {
        return Err(ParserError::EmptyDocument {
            source_path: meta.source_path,
        });
    }

    let nodes = filter_nodes(nodes);
    let mut state = ScanState::new(HansardRecord::new(meta), options);
    let mut diagnostics = Vec::new();

    for (index, node) in nodes.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(ParserError::Cancelled);
        }

        let rule = if state.section == HansardSection::End {
            None
        } else {
            REGISTRY.find(node, &state)
        };

        match rule {
            Some(rule) => {
                tracing::trace!(
                    index,
                    section = %state.section,
                    rule = rule.name(),
                    "Applying rule"
                );
                rule.apply(node, &mut state);
            }
            None if options.debug => diagnostics.push(Diagnostic {
                index,
                section: Some(state.section),
                text: node.text.clone(),
            }),
            None => {}
        }
    }

    state.commit_buffer();

    let mut record = state.record;
    record.markup = Some(render_hansard(&record)?);

    Ok(HansardParse {
        record,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DebateEntry, QaItem};
    use pretty_assertions::assert_eq;

    const HEADER: &str = "DEWAN NEGERI SELANGOR";

    fn meta() -> Meta {
        Meta::new("sitting.pdf.json", 2024, 1, "selangor")
    }

    fn parse(nodes: Vec<SourceNode>) -> HansardParse {
        let mut all = vec![SourceNode::title(HEADER)];
        all.extend(nodes);
        parse_hansard(&all, meta(), ParseOptions::default().with_debug(true)).unwrap()
    }

    fn opening() -> Vec<SourceNode> {
        vec![
            SourceNode::title("YANG HADIR"),
            SourceNode::narrative("Y.B AHMAD (Kg A)"),
            SourceNode::narrative("(Exco)"),
            SourceNode::title("TIDAK HADIR"),
            SourceNode::narrative("Y.B TUAN BAKAR (Kg B)"),
            SourceNode::title("TURUT HADIR"),
            SourceNode::narrative("Y.B. Dato' Haris Kasim, Setiausaha Kerajaan Negeri"),
            SourceNode::title("PEGAWAI BERTUGAS"),
            SourceNode::narrative("Encik Rahman Bentara Mesyuarat"),
            SourceNode::title("(Tuan Speaker mempengerusikan Mesyuarat)"),
        ]
    }

    #[test]
    fn test_empty_document() {
        let err = parse_hansard(&[], meta(), ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ParserError::EmptyDocument { .. }));
    }

    #[test]
    fn test_roster() {
        let parsed = parse(opening());
        let record = &parsed.record;

        assert_eq!(record.present.len(), 1);
        assert_eq!(record.present[0].name, "AHMAD");
        assert_eq!(record.present[0].constituency.as_deref(), Some("Kg A"));
        assert_eq!(record.present[0].role.as_deref(), Some("Exco"));
        assert_eq!(record.absent[0].name, "TUAN BAKAR");
        assert_eq!(record.guest[0].name, "Dato' Haris Kasim");
        assert_eq!(record.officer[0].name, "Encik Rahman");
        assert_eq!(record.officer[0].role.as_deref(), Some("Bentara Mesyuarat"));
        assert!(record.debate.is_empty());
    }

    #[test]
    fn test_speech_then_end() {
        let mut nodes = opening();
        nodes.extend([
            SourceNode::narrative("Y.B AHMAD: Terima kasih Tuan Speaker."),
            SourceNode::title("(DEWAN DITANGGUHKAN PADA JAM 5.00 PETANG)"),
            SourceNode::narrative("TUAN SPEAKER: tidak dikira"),
        ]);

        let parsed = parse(nodes);
        let debate = &parsed.record.debate;

        assert_eq!(debate.len(), 1);
        let DebateEntry::Speech(speech) = &debate[0] else {
            panic!("expected a speech");
        };
        assert_eq!(speech.speaker.name, "Y.B AHMAD");
        assert_eq!(speech.role.as_deref(), Some("Exco"));
        assert_eq!(speech.content[0].value, "Terima kasih Tuan Speaker.");

        // The node after the adjournment is reported, not parsed.
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].section, Some(HansardSection::End));
    }

    #[test]
    fn test_question_block_and_events() {
        let mut nodes = opening();
        nodes.extend([
            SourceNode::narrative("TUAN SPEAKER: Soalan seterusnya."),
            SourceNode::title("PERTANYAAN-PERTANYAAN MULUT DARIPADA Y.B AHMAD (Kg A)"),
            SourceNode::narrative("Y.A.B. DATO' MENTERI BESAR: Jawapan saya."),
            SourceNode::narrative("(Tepuk meja)"),
            SourceNode::narrative("TUAN SPEAKER: Terima kasih."),
        ]);

        let parsed = parse(nodes);
        let debate = &parsed.record.debate;

        assert_eq!(debate.len(), 2);
        let DebateEntry::QuestionBlock(block) = &debate[0] else {
            panic!("expected a question block");
        };
        assert_eq!(block.items.len(), 2);
        let QaItem::Question(question) = &block.items[0] else {
            panic!("expected a question");
        };
        assert!(question.is_oral);
        assert_eq!(question.content.len(), 2);
        assert_eq!(block.items[1].person().name, "Y.A.B. DATO' MENTERI BESAR");
        assert!(matches!(debate[1], DebateEntry::Speech(_)));
    }

    #[test]
    fn test_open_buffer_flushed_at_end_of_input() {
        let mut nodes = opening();
        nodes.extend([
            SourceNode::narrative("TUAN SPEAKER: Bismillah."),
            SourceNode::narrative("Sambungan ucapan."),
        ]);

        let parsed = parse(nodes);

        assert_eq!(parsed.record.debate.len(), 1);
        let DebateEntry::Speech(speech) = &parsed.record.debate[0] else {
            panic!("expected a speech");
        };
        assert_eq!(speech.content.len(), 2);
        assert!(parsed.record.markup.as_deref().unwrap().contains("<speech>"));
    }

    #[test]
    fn test_headers_and_page_numbers_filtered() {
        let parsed = parse(vec![
            SourceNode::title("YANG HADIR"),
            SourceNode::narrative("12"),
            SourceNode::title("Dewan Negeri Selangor "),
            SourceNode::narrative("Y.B AHMAD (Kg A)"),
        ]);

        assert_eq!(parsed.record.present.len(), 1);
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_unclaimed_nodes_without_debug() {
        let nodes = vec![SourceNode::title(HEADER), SourceNode::narrative("Pendahuluan")];

        let parsed = parse_hansard(&nodes, meta(), ParseOptions::default()).unwrap();
        assert!(parsed.diagnostics.is_empty());

        let parsed = parse_hansard(&nodes, meta(), ParseOptions::default().with_debug(true)).unwrap();
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].index, 0);
        assert_eq!(parsed.diagnostics[0].text, "Pendahuluan");
    }

    #[test]
    fn test_cancelled_scan() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = parse_hansard_with_cancel(
            &[SourceNode::title(HEADER), SourceNode::title("YANG HADIR")],
            meta(),
            ParseOptions::default(),
            &cancel,
        )
        .unwrap_err();
        assert!(matches!(err, ParserError::Cancelled));
    }
}
