//! Structural phases of a Hansard transcript.

use std::fmt;

/// Section the scan is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HansardSection {
    /// Before the attendance roster.
    #[default]
    DocumentStart,
    /// Members present ("YANG HADIR").
    Present,
    /// Members absent ("TIDAK HADIR").
    Absent,
    /// Guests in attendance ("TURUT HADIR").
    Guest,
    /// Officers on duty ("PEGAWAI BERTUGAS").
    Officer,
    /// The chair has opened the sitting.
    Start,
    /// Last committed entry was a speech.
    Speech,
    /// Last committed entry opened a question block.
    Question,
    /// Last committed entry answered a question block.
    Answer,
    /// The sitting was adjourned.
    End,
}

impl HansardSection {
    /// Whether debate rules (speaklines, events, continuation) apply.
    #[must_use]
    pub fn is_debate(&self) -> bool {
        matches!(
            self,
            Self::Start | Self::Speech | Self::Question | Self::Answer
        )
    }

    /// Whether roster rules for members apply.
    #[must_use]
    pub fn is_member_roster(&self) -> bool {
        matches!(self, Self::Present | Self::Absent)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentStart => "DOCUMENT_START",
            Self::Present => "PRESENT",
            Self::Absent => "ABSENT",
            Self::Guest => "GUEST",
            Self::Officer => "OFFICER",
            Self::Start => "START",
            Self::Speech => "SPEECH",
            Self::Question => "QUESTION",
            Self::Answer => "ANSWER",
            Self::End => "END",
        }
    }
}

impl fmt::Display for HansardSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debate_sections() {
        assert!(HansardSection::Start.is_debate());
        assert!(HansardSection::Answer.is_debate());
        assert!(!HansardSection::Officer.is_debate());
        assert!(!HansardSection::End.is_debate());
    }

    #[test]
    fn test_default_is_document_start() {
        assert_eq!(HansardSection::default(), HansardSection::DocumentStart);
        assert_eq!(HansardSection::default().to_string(), "DOCUMENT_START");
    }
}
