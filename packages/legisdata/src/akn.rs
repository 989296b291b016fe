//! Akoma Ntoso style markup for finished records.
//!
//! The element names and nesting are an interchange contract with downstream
//! consumers. Rendering is a pure function of the record.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;
use crate::types::{ContentElement, DebateEntry, HansardRecord, InquiryRecord, QaItem};

/// Indented XML document builder.
struct AknWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl AknWriter {
    fn new() -> Result<Self> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        Ok(Self { writer })
    }

    fn start(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        Ok(())
    }

    fn start_named(&mut self, name: &str, value: &str) -> Result<()> {
        let mut start = BytesStart::new(name);
        start.push_attribute(("name", value));
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// `<name>text</name>` on one line, also when `text` is empty.
    fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    /// `<from>label</from>` followed by one `<div>` of paragraphs.
    fn utterance(&mut self, speaker: &str, content: &[ContentElement]) -> Result<()> {
        self.text_element("from", speaker)?;
        self.paragraphs(content)
    }

    fn paragraphs(&mut self, content: &[ContentElement]) -> Result<()> {
        self.start("div")?;
        for item in content {
            self.text_element("p", &item.value)?;
        }
        self.end("div")
    }

    fn finish(self) -> String {
        let bytes = self.writer.into_inner().into_inner();
        let mut xml = String::from_utf8_lossy(&bytes).into_owned();
        xml.push('\n');
        xml
    }
}

/// Render a transcript: one `speech` or `questions` element per debate entry.
pub fn render_hansard(record: &HansardRecord) -> Result<String> {
    let mut xml = AknWriter::new()?;

    xml.start("akomaNtoso")?;
    xml.start_named("debate", "hansard")?;
    xml.start("debateBody")?;
    xml.start("debateSection")?;

    for entry in &record.debate {
        match entry {
            DebateEntry::Speech(speech) => {
                xml.start("speech")?;
                xml.utterance(&speech.speaker.name, &speech.content)?;
                xml.end("speech")?;
            }
            DebateEntry::QuestionBlock(block) => {
                xml.start("questions")?;
                for item in &block.items {
                    let tag = match item {
                        QaItem::Question(_) => "question",
                        QaItem::Answer(_) => "answer",
                    };
                    xml.start(tag)?;
                    xml.utterance(&item.person().name, item.content())?;
                    xml.end(tag)?;
                }
                xml.end("questions")?;
            }
        }
    }

    xml.end("debateSection")?;
    xml.end("debateBody")?;
    xml.end("debate")?;
    xml.end("akomaNtoso")?;

    Ok(xml.finish())
}

/// Render an inquiry, or `None` when the inquirer or respondent is unknown.
///
/// Each content group becomes its own `div`. The `answer` element is left out
/// when there are no answer groups.
pub fn render_inquiry(record: &InquiryRecord) -> Result<Option<String>> {
    let (Some(inquirer), Some(respondent)) = (&record.inquirer, &record.respondent) else {
        return Ok(None);
    };
    let statement = if record.is_oral {
        "oralStatement"
    } else {
        "writtenStatement"
    };

    let mut xml = AknWriter::new()?;

    xml.start("akomaNtoso")?;
    xml.start("debate")?;
    xml.start("debateBody")?;
    xml.start("debateSection")?;
    xml.start(statement)?;

    xml.start("question")?;
    xml.text_element("from", &inquirer.name)?;
    for group in &record.inquiry_groups {
        xml.paragraphs(group)?;
    }
    xml.end("question")?;

    if !record.respond_groups.is_empty() {
        xml.start("answer")?;
        xml.text_element("from", &respondent.name)?;
        for group in &record.respond_groups {
            xml.paragraphs(group)?;
        }
        xml.end("answer")?;
    }

    xml.end(statement)?;
    xml.end("debateSection")?;
    xml.end("debateBody")?;
    xml.end("debate")?;
    xml.end("akomaNtoso")?;

    Ok(Some(xml.finish()))
}
