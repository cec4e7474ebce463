//! Every hosts file under `test-fixtures/hosts` must survive parsing.

use std::path::PathBuf;

use hosts_dom::{Block, Document, FormatMode, LineEnding};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn fixture(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/hosts")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|_| panic!("Could not read fixture {}", path.display()))
}

#[rstest]
#[case("annotated.hosts")]
#[case("windows.hosts")]
#[case("messy.hosts")]
#[case("no-newline.hosts")]
#[case("latin1.hosts")]
fn test_fixture_round_trips(#[case] name: &str) {
    let source = fixture(name);
    assert_eq!(Document::from_bytes(&source).to_bytes(FormatMode::Keep), source);
}

#[rstest]
#[case("annotated.hosts")]
#[case("windows.hosts")]
#[case("messy.hosts")]
#[case("no-newline.hosts")]
#[case("latin1.hosts")]
fn test_fixture_reformat_is_stable(#[case] name: &str) {
    let once = Document::from_bytes(&fixture(name)).to_bytes(FormatMode::ReFormat);
    let twice = Document::from_bytes(&once).to_bytes(FormatMode::ReFormat);
    assert_eq!(once, twice);
}

#[test]
fn test_annotated_blocks() {
    let doc = Document::from_bytes(&fixture("annotated.hosts"));
    let blocks: Vec<_> = doc
        .alias_blocks()
        .map(|(_, b)| (b.id(), b.effective_id(), b.name().map(str::to_string)))
        .collect();
    assert_eq!(
        blocks,
        vec![
            (Some(1), Some(1), Some("system".to_string())),
            (Some(20), Some(20), Some("lab".to_string())),
            (None, Some(2), Some("staging".to_string())),
        ]
    );

    let lab = doc.alias_block(doc.find_alias_blocks(Some(20), None)[0]).unwrap();
    assert!(lab.note().starts_with("machines in the lab"));
    assert!(lab.note().ends_with("second floor rack"));

    let staging = doc.alias_block(doc.find_alias_blocks(None, Some("staging"))[0]).unwrap();
    assert!(staging.has_placeholder());
    assert_eq!(staging.alias_count(), 0);

    assert!(matches!(doc.blocks().last(), Some(Block::Blank(_))));
    assert!(doc.blocks().iter().any(|b| matches!(b, Block::Unrecognized(_))));
}

#[test]
fn test_windows_fixture() {
    let doc = Document::from_bytes(&fixture("windows.hosts"));
    assert_eq!(doc.line_ending(), LineEnding::CrLf);

    let office = doc.alias_block(doc.find_alias_blocks(None, Some("office"))[0]).unwrap();
    assert_eq!(office.id(), Some(2));
    assert_eq!(office.note(), "windows boxes");
    let entry = office.alias_entries().next().unwrap();
    assert_eq!(entry.aliases(), ["fileserver", "fs"]);
    assert_eq!(entry.note(), "smb");
}

#[test]
fn test_messy_fixture_keeps_unknown_lines() {
    let doc = Document::from_bytes(&fixture("messy.hosts"));
    let unrecognized: Vec<&str> = doc
        .blocks()
        .iter()
        .filter_map(|b| match b {
            Block::Unrecognized(run) => Some(run.lines().collect::<Vec<_>>()),
            _ => None,
        })
        .flatten()
        .collect();
    assert!(unrecognized.contains(&"garbage line without ip"));
}

#[test]
fn test_latin1_fixture() {
    let doc = Document::from_bytes(&fixture("latin1.hosts"));
    assert_eq!(doc.line_ending(), LineEnding::CrLf);

    let block = doc.alias_block(doc.find_alias_blocks(Some(3), None)[0]).unwrap();
    assert_eq!(block.alias_count(), 2);
    let hosts: Vec<&str> = block.alias_entries().map(|e| e.aliases()[0].as_str()).collect();
    assert_eq!(hosts, ["caisse.local", "borne.local"]);
    assert!(doc.blocks().iter().any(|b| matches!(b, Block::Unrecognized(_))));
}
