//! End-to-end tests for the parser pipeline.
//!
//! Runs the complete pipeline from partitioned JSON to written records using
//! fixture documents under `tests/fixtures`.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use legisdata::batch::{collect_inputs, run_batch, BatchOptions, CancelToken};
use legisdata::config::{ListingType, ParseOptions};
use legisdata::hansard::parse_hansard;
use legisdata::inquiry::parse_inquiry;
use legisdata::node::load_nodes;
use legisdata::types::{DebateEntry, HansardRecord, InquiryRecord, Meta, QaItem};

/// Path of a fixture file.
fn fixture(listing: &str, name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(listing)
        .join(name)
}

fn meta(path: &Path) -> Meta {
    Meta::new(path.display().to_string(), 2024, 1, "selangor")
}

fn parse_sitting() -> HansardRecord {
    let path = fixture("hansard", "sitting-1.pdf.json");
    let nodes = load_nodes(&path).unwrap();
    parse_hansard(&nodes, meta(&path), ParseOptions::default())
        .unwrap()
        .record
}

fn options(listing: ListingType, output_dir: &Path) -> BatchOptions {
    BatchOptions {
        listing,
        output_dir: output_dir.to_path_buf(),
        year: 2024,
        session: 1,
        dun: "selangor".to_string(),
        parse: ParseOptions::default(),
        jobs: None,
    }
}

#[test]
fn test_hansard_roster() {
    let record = parse_sitting();

    let names: Vec<&str> = record.present.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "DATO' TENG CHANG KHIM",
            "DATO' AMIRUDIN BIN SHARI",
            "TUAN AHMAD BIN ALI"
        ]
    );

    let speaker = &record.present[0];
    assert_eq!(speaker.titles, vec!["D.P.M.S."]);
    assert_eq!(speaker.constituency.as_deref(), Some("Sungai Pinang"));
    assert_eq!(speaker.role.as_deref(), Some("Speaker"));

    // Role from the continuation line, the empty one is ignored
    assert_eq!(record.present[1].role.as_deref(), Some("Menteri Besar"));
    assert!(record.present[2].role.is_none());

    assert_eq!(record.absent.len(), 1);
    assert_eq!(record.absent[0].name, "PUAN LIM SIEW");

    assert_eq!(record.guest.len(), 1);
    assert_eq!(
        record.guest[0].role.as_deref(),
        Some("Setiausaha Kerajaan Negeri")
    );

    let officers: Vec<&str> = record.officer.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(officers, vec!["Encik Rahman bin Musa", "Puan Aminah binti Said"]);
}

#[test]
fn test_hansard_debate() {
    let record = parse_sitting();
    assert_eq!(record.debate.len(), 4);

    let DebateEntry::Speech(opening) = &record.debate[0] else {
        panic!("expected opening speech");
    };
    assert_eq!(opening.speaker.name, "TUAN SPEAKER");
    assert_eq!(opening.content.len(), 2);
    assert_eq!(
        opening.content[0].value,
        "Assalamualaikum. Ahli-ahli Yang Berhormat, kita mulakan."
    );

    let DebateEntry::QuestionBlock(block) = &record.debate[1] else {
        panic!("expected question block");
    };
    let speakers: Vec<&str> = block.items.iter().map(|i| i.person().name.as_str()).collect();
    assert_eq!(
        speakers,
        vec![
            "Y.B. TUAN AHMAD BIN ALI",
            "TUAN SPEAKER",
            "Y.A.B. DATO' AMIRUDIN BIN SHARI"
        ]
    );

    let QaItem::Question(question) = &block.items[0] else {
        panic!("expected question");
    };
    assert!(question.is_oral);
    assert_eq!(question.content.len(), 3);
    assert_eq!(question.content[2].kind, "table");
    assert!(question.content[2].value.starts_with("<table>"));

    let QaItem::Answer(answer) = &block.items[2] else {
        panic!("expected answer");
    };
    assert_eq!(answer.role.as_deref(), Some("Menteri Besar"));

    // The minister's answer closes the block
    let DebateEntry::Speech(officer) = &record.debate[2] else {
        panic!("expected officer speech");
    };
    assert_eq!(officer.speaker.name, "BENTARA MESYUARAT");
    assert_eq!(officer.role.as_deref(), Some("Bentara Mesyuarat"));

    let DebateEntry::Speech(unknown) = &record.debate[3] else {
        panic!("expected speech by unlisted speaker");
    };
    assert_eq!(unknown.speaker.name, "Dato' Seri Rahim");
    assert_eq!(unknown.content[0].value, "Bolehkah saya mencelah?");
}

#[test]
fn test_hansard_markup() {
    let record = parse_sitting();
    let akn = record.markup.as_deref().unwrap();

    assert!(akn.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(akn.contains("<debate name=\"hansard\">"));
    assert_eq!(akn.matches("<speech>").count(), 3);
    assert_eq!(akn.matches("<questions>").count(), 1);
    assert_eq!(akn.matches("<answer>").count(), 2);
    assert!(!akn.contains("selepas penangguhan"));
}

#[test]
fn test_inquiry_records() {
    let path = fixture("inquiry", "soalan-mulut.pdf.json");
    let nodes = load_nodes(&path).unwrap();
    let parsed = parse_inquiry(&nodes, meta(&path), ParseOptions::default()).unwrap();

    assert_eq!(parsed.records.len(), 2);

    let first = &parsed.records[0];
    assert!(first.is_oral);
    assert_eq!(first.number, Some(12));
    assert_eq!(first.title.as_deref(), Some("BANJIR KILAT DI KOTA ANGGERIK"));
    let inquirer = first.inquirer.as_ref().unwrap();
    assert_eq!(inquirer.name, "TUAN AHMAD BIN ALI");
    assert_eq!(inquirer.constituency.as_deref(), Some("KOTA ANGGERIK"));
    assert_eq!(
        first.respondent.as_ref().unwrap().name,
        "Y.A.B. Dato' Menteri Besar"
    );
    assert_eq!(first.inquiry_groups.len(), 2);
    assert_eq!(first.respond_groups.len(), 1);
    assert_eq!(first.respond_groups[0].len(), 2);
    assert!(first.markup.as_deref().unwrap().contains("<answer>"));

    let second = &parsed.records[1];
    assert_eq!(second.number, Some(13));
    assert_eq!(second.inquirer.as_ref().unwrap().name, "PUAN LIM SIEW");
    assert_eq!(
        second.inquiry_groups[0][0].value,
        "Bilakah jalan akan dibaiki?"
    );
    assert_eq!(
        second.respond_groups[0][0].value,
        "Kerja pembaikan bermula bulan hadapan."
    );
}

#[test]
fn test_batch_writes_json_documents() {
    let output = tempdir().unwrap();
    let inputs = collect_inputs(&[fixture("inquiry", "")]).unwrap();
    assert_eq!(inputs.len(), 2);

    let report = run_batch(
        &inputs,
        &options(ListingType::Inquiry, output.path()),
        &CancelToken::new(),
        |_| {},
    )
    .unwrap();

    assert_eq!(
        report.written,
        vec![
            output.path().join("soalan-mulut.pdf.12.json"),
            output.path().join("soalan-mulut.pdf.13.json"),
        ]
    );
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0]
        .path
        .ends_with("bukan-pertanyaan.pdf.json"));

    let json = fs::read_to_string(&report.written[0]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for key in [
        "meta",
        "is_oral",
        "inquirer",
        "respondent",
        "number",
        "title",
        "inquiries",
        "responds",
        "akn",
    ] {
        assert!(value.get(key).is_some(), "missing field {key}");
    }
    assert_eq!(value["meta"]["dun"], "selangor");
    assert_eq!(value["inquirer"]["area"], "KOTA ANGGERIK");

    let record: InquiryRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(record.number, Some(12));
}

#[test]
fn test_batch_hansard_round_trip() {
    let output = tempdir().unwrap();
    let input = fixture("hansard", "sitting-1.pdf.json");

    let report = run_batch(
        &[input],
        &options(ListingType::Hansard, output.path()),
        &CancelToken::new(),
        |_| {},
    )
    .unwrap();

    assert_eq!(report.written, vec![output.path().join("sitting-1.pdf.json")]);

    let json = fs::read_to_string(&report.written[0]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["debate"][0]["by"]["name"], "TUAN SPEAKER");
    assert_eq!(value["debate"][1]["content"][0]["inquirer"]["raw"], "Y.B. TUAN AHMAD BIN ALI");
    assert_eq!(value["present"][0]["title"][0], "D.P.M.S.");

    let record: HansardRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(record.debate, parse_sitting().debate);
}
