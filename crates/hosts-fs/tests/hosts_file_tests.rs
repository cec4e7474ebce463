//! Tests for loading, saving, backing up and restoring hosts files.

use std::fs;

use hosts_dom::{AliasEntry, FormatMode};
use hosts_fs::{Error, HostsFile, Settings};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

const HOSTS: &str = "\
# [1] system
127.0.0.1 localhost

# [2] dev - local services
10.0.0.5  api.dev   # rest
";

fn hosts_in(temp: &TempDir) -> std::path::PathBuf {
    let path = temp.path().join("hosts");
    fs::write(&path, HOSTS).unwrap();
    path
}

#[test]
fn test_load_then_save_unchanged_is_identity() {
    let temp = TempDir::new().unwrap();
    let path = hosts_in(&temp);

    let mut file = HostsFile::new(&path);
    let doc = file.load().unwrap();
    file.save(&doc, FormatMode::Keep).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), HOSTS);
}

#[rstest]
#[case::atomic(true)]
#[case::in_place(false)]
fn test_save_writes_edit(#[case] atomic_writes: bool) {
    let temp = TempDir::new().unwrap();
    let path = hosts_in(&temp);
    let settings = Settings {
        hosts_file: Some(path.clone()),
        atomic_writes,
        ..Settings::default()
    };

    let mut file = HostsFile::with_settings(settings);
    let mut doc = file.load().unwrap();
    let idx = doc.find_alias_blocks(None, Some("dev"))[0];
    doc.alias_block_mut(idx)
        .unwrap()
        .add_entry(AliasEntry::with_aliases("10.0.0.6", ["db.dev"]).unwrap());
    file.save(&doc, FormatMode::Keep).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.ends_with("10.0.0.5  api.dev   # rest\n10.0.0.6  db.dev\n"));
}

#[test]
fn test_save_refuses_when_file_changed() {
    let temp = TempDir::new().unwrap();
    let path = hosts_in(&temp);

    let mut file = HostsFile::new(&path);
    let doc = file.load().unwrap();
    fs::write(&path, "127.0.0.1 localhost\n10.9.9.9 intruder\n").unwrap();

    let err = file.save(&doc, FormatMode::Keep).unwrap_err();
    assert!(matches!(err, Error::Modified { .. }));
    assert!(fs::read_to_string(&path).unwrap().contains("intruder"));
}

#[test]
fn test_consecutive_saves_succeed() {
    let temp = TempDir::new().unwrap();
    let path = hosts_in(&temp);

    let mut file = HostsFile::new(&path);
    let doc = file.load().unwrap();
    file.save(&doc, FormatMode::ReFormat).unwrap();
    file.save(&doc, FormatMode::Keep).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), HOSTS);
}

#[test]
fn test_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let mut file = HostsFile::new(temp.path().join("nope"));
    assert!(matches!(file.load().unwrap_err(), Error::Io { .. }));
}

#[test]
fn test_backup_default_path_and_force() {
    let temp = TempDir::new().unwrap();
    let path = hosts_in(&temp);
    let file = HostsFile::new(&path);

    let target = file.backup(None, false).unwrap();
    assert_eq!(target.file_name(), Some("hosts.bak"));
    assert_eq!(fs::read_to_string(target.to_native()).unwrap(), HOSTS);

    let err = file.backup(None, false).unwrap_err();
    assert!(matches!(err, Error::BackupExists { .. }));
    assert!(file.backup(None, true).is_ok());
}

#[test]
fn test_backup_to_explicit_target() {
    let temp = TempDir::new().unwrap();
    let path = hosts_in(&temp);
    let target = temp.path().join("saved").join("hosts.orig");

    HostsFile::new(&path).backup(Some(&target), false).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), HOSTS);
}

#[test]
fn test_restore_replaces_contents() {
    let temp = TempDir::new().unwrap();
    let path = hosts_in(&temp);
    let mut file = HostsFile::new(&path);
    file.backup(None, false).unwrap();
    fs::write(&path, "broken\n").unwrap();

    file.restore(None).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), HOSTS);
}

#[test]
fn test_restore_without_backup_fails() {
    let temp = TempDir::new().unwrap();
    let path = hosts_in(&temp);
    let err = HostsFile::new(&path).restore(None).unwrap_err();
    assert!(matches!(err, Error::BackupNotFound { .. }));
}

#[test]
fn test_custom_backup_suffix() {
    let temp = TempDir::new().unwrap();
    let path = hosts_in(&temp);
    let file = HostsFile::with_settings(Settings {
        hosts_file: Some(path),
        backup_suffix: ".orig".into(),
        ..Settings::default()
    });
    assert_eq!(file.backup_path().file_name(), Some("hosts.orig"));
}
