//! Load, edit and save hosts files through `hosts-fs`.

use hosts_dom::{AliasEntry, FormatMode};
use hosts_fs::{Error, HostsFile, Settings};
use hosts_test_utils::{TestHosts, fixtures};
use pretty_assertions::assert_eq;

#[test]
fn test_fill_placeholder_block() {
    let source = format!("{}\n# [*] staging\n# <<placeholder>>\n", fixtures::ANNOTATED);
    let hosts = TestHosts::new(&source);
    let mut file = HostsFile::new(hosts.path());

    let mut doc = file.load().unwrap();
    let idx = doc.find_alias_blocks(None, Some("staging"))[0];
    doc.alias_block_mut(idx)
        .unwrap()
        .add_entry(AliasEntry::with_aliases("10.1.0.1", ["app.staging"]).unwrap());
    doc.normalize();
    file.save(&doc, FormatMode::Keep).unwrap();

    let expected = format!("{}\n# [*] staging\n10.1.0.1        app.staging\n", fixtures::ANNOTATED);
    assert_eq!(hosts.read(), expected);

    let reloaded = file.load().unwrap();
    let staging = reloaded.alias_block(idx).unwrap();
    assert!(!staging.has_placeholder());
    assert_eq!(staging.alias_count(), 1);
}

#[test]
fn test_external_edit_blocks_save() {
    let hosts = TestHosts::new(fixtures::PLAIN);
    let mut file = HostsFile::new(hosts.path());
    let doc = file.load().unwrap();

    hosts.write("127.0.0.1 localhost\n10.7.7.7 someone-else\n");
    assert!(matches!(
        file.save(&doc, FormatMode::ReFormat),
        Err(Error::Modified { .. })
    ));

    let doc = file.load().unwrap();
    file.save(&doc, FormatMode::ReFormat).unwrap();
    hosts.assert_contains("someone-else");
}

#[test]
fn test_non_utf8_file_can_be_edited() {
    let hosts = TestHosts::new("");
    std::fs::write(hosts.path(), b"# caf\xe9\r\n127.0.0.1 localhost\r\n").unwrap();
    let mut file = HostsFile::new(hosts.path());
    let mut doc = file.load().unwrap();

    let mut block = hosts_dom::AliasBlock::new().with_name("dev");
    block.add_entry(AliasEntry::with_aliases("10.0.0.1", ["dev.local"]).unwrap());
    doc.push_alias_block(block);
    file.save(&doc, FormatMode::Keep).unwrap();

    assert_eq!(
        std::fs::read(hosts.path()).unwrap(),
        b"# caf\xe9\r\n127.0.0.1 localhost\r\n\r\n# [*] dev\r\n10.0.0.1        dev.local\r\n".to_vec()
    );
}

#[test]
fn test_crlf_file_keeps_line_endings_after_edit() {
    let hosts = TestHosts::new(fixtures::CRLF);
    let mut file = HostsFile::new(hosts.path());
    let mut doc = file.load().unwrap();

    let idx = doc.find_alias_blocks(Some(1), None)[0];
    doc.alias_block_mut(idx)
        .unwrap()
        .add_entry(AliasEntry::with_aliases("10.0.0.1", ["box"]).unwrap());
    file.save(&doc, FormatMode::Keep).unwrap();

    assert_eq!(
        hosts.read(),
        "# [1] base\r\n127.0.0.1 localhost\r\n10.0.0.1  box\r\n"
    );
}

#[test]
fn test_in_place_backup_restore_cycle() {
    let hosts = TestHosts::new(fixtures::ANNOTATED);
    let mut file = HostsFile::with_settings(Settings {
        hosts_file: Some(hosts.path().to_path_buf()),
        atomic_writes: false,
        ..Settings::default()
    });

    let backup = file.backup(None, false).unwrap();
    assert_eq!(backup.to_native(), hosts.backup_path());

    let mut doc = file.load().unwrap();
    let idx = doc.find_alias_blocks(None, Some("lab"))[0];
    doc.alias_block_mut(idx).unwrap().clear_aliases();
    doc.normalize();
    file.save(&doc, FormatMode::Keep).unwrap();
    hosts.assert_not_contains("printer.lab");

    file.restore(None).unwrap();
    assert_eq!(hosts.read(), fixtures::ANNOTATED);
}
