//! Commit of finished utterances into the debate sequence.

use crate::config::CHAIR_LABELS;
use crate::types::{
    Answer, DebateEntry, HansardRecord, QaItem, Question, QuestionBlock, SpeakerBuffer, Speech,
};

use super::section::HansardSection;

/// Whether the next utterance answers the open question block.
///
/// A block accepts answers while its last item is the question itself or an
/// interjection by the chair. The first answer from anyone else closes it.
#[must_use]
pub fn is_answer(record: &HansardRecord) -> bool {
    let Some(DebateEntry::QuestionBlock(block)) = record.debate.last() else {
        return false;
    };

    match block.items.last() {
        Some(QaItem::Answer(answer)) => CHAIR_LABELS.contains(&answer.respondent.name.as_str()),
        _ => true,
    }
}

/// Commit the open buffer, if any, and leave it empty.
///
/// Returns `true` when an entry was added or extended.
pub fn commit(buffer: &mut Option<SpeakerBuffer>, record: &mut HansardRecord) -> bool {
    let Some(buffer) = buffer.take() else {
        return false;
    };
    if buffer.content.is_empty() {
        return false;
    }

    if buffer.is_question {
        record
            .debate
            .push(DebateEntry::QuestionBlock(QuestionBlock {
                items: vec![QaItem::Question(Question {
                    inquirer: buffer.speaker,
                    role: buffer.role,
                    content: buffer.content,
                    is_oral: buffer.is_oral,
                })],
            }));
        return true;
    }

    if is_answer(record) {
        if let Some(DebateEntry::QuestionBlock(block)) = record.debate.last_mut() {
            block.items.push(QaItem::Answer(Answer {
                respondent: buffer.speaker,
                role: buffer.role,
                content: buffer.content,
            }));
            return true;
        }
    }

    record.debate.push(DebateEntry::Speech(Speech {
        speaker: buffer.speaker,
        role: buffer.role,
        content: buffer.content,
    }));
    true
}

/// Debate section implied by the last committed entry.
#[must_use]
pub fn section_after_commit(record: &HansardRecord) -> Option<HansardSection> {
    match record.debate.last()? {
        DebateEntry::Speech(_) => Some(HansardSection::Speech),
        DebateEntry::QuestionBlock(block) => match block.items.last() {
            Some(QaItem::Answer(_)) => Some(HansardSection::Answer),
            _ => Some(HansardSection::Question),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentElement, Meta, PersonRef};

    fn record() -> HansardRecord {
        HansardRecord::new(Meta::new("a.pdf.json", 2024, 1, "selangor"))
    }

    fn buffer(speaker: &str, text: &str, is_question: bool) -> Option<SpeakerBuffer> {
        let mut buffer = SpeakerBuffer::open(
            PersonRef::labelled(speaker),
            None,
            ContentElement {
                kind: "narrativetext".to_string(),
                value: text.to_string(),
                image: None,
            },
        );
        buffer.is_question = is_question;
        Some(buffer)
    }

    fn block_len(record: &HansardRecord) -> usize {
        match record.debate.last() {
            Some(DebateEntry::QuestionBlock(block)) => block.items.len(),
            _ => 0,
        }
    }

    #[test]
    fn test_commit_empty_is_noop() {
        let mut record = record();
        let mut empty = None;

        assert!(!commit(&mut empty, &mut record));
        assert!(!commit(&mut empty, &mut record));
        assert!(record.debate.is_empty());
    }

    #[test]
    fn test_commit_takes_buffer() {
        let mut record = record();
        let mut open = buffer("TUAN SPEAKER", "Sila", false);

        assert!(commit(&mut open, &mut record));
        assert!(open.is_none());
        assert!(!commit(&mut open, &mut record));
        assert_eq!(record.debate.len(), 1);
        assert_eq!(section_after_commit(&record), Some(HansardSection::Speech));
    }

    #[test]
    fn test_chair_interjections_keep_block_open() {
        let mut record = record();

        commit(&mut buffer("Y.B AHMAD", "Soalan", true), &mut record);
        assert_eq!(section_after_commit(&record), Some(HansardSection::Question));

        commit(&mut buffer("TUAN SPEAKER", "Sila jawab", false), &mut record);
        assert_eq!(block_len(&record), 2);
        assert!(is_answer(&record));

        commit(&mut buffer("Y.A.B. DATO' MENTERI BESAR", "Jawapan", false), &mut record);
        assert_eq!(block_len(&record), 3);
        assert_eq!(section_after_commit(&record), Some(HansardSection::Answer));
        assert!(!is_answer(&record));

        // The block is closed, the next utterance is a speech.
        commit(&mut buffer("TUAN SPEAKER", "Terima kasih", false), &mut record);
        assert_eq!(record.debate.len(), 2);
        assert!(matches!(record.debate.last(), Some(DebateEntry::Speech(_))));
        assert_eq!(section_after_commit(&record), Some(HansardSection::Speech));
    }

    #[test]
    fn test_new_question_opens_new_block() {
        let mut record = record();

        commit(&mut buffer("Y.B AHMAD", "Soalan 1", true), &mut record);
        commit(&mut buffer("Y.B SITI", "Soalan 2", true), &mut record);

        assert_eq!(record.debate.len(), 2);
        assert_eq!(block_len(&record), 1);
    }

    #[test]
    fn test_speech_without_block() {
        let mut record = record();
        commit(&mut buffer("Y.B AHMAD", "Ucapan", false), &mut record);
        commit(&mut buffer("Y.B AHMAD", "Lagi", false), &mut record);

        assert_eq!(record.debate.len(), 2);
        assert!(!is_answer(&record));
    }
}
