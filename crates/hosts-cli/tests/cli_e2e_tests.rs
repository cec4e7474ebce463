//! End-to-end tests that invoke the compiled `hostsctl` binary against
//! temporary hosts files.

use assert_cmd::Command;
use hosts_test_utils::{TestHosts, fixtures};
use predicates::prelude::*;
use pretty_assertions::assert_eq;

/// `hostsctl` pointed at `hosts`, isolated from the user's settings.
fn hostsctl(hosts: &TestHosts) -> Command {
    let config = hosts.write_config("config.toml", "");
    let mut cmd = Command::cargo_bin("hostsctl").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("HOSTSCTL_LOG")
        .env_remove("HOSTSCTL_HOSTS_FILE")
        .env("HOSTSCTL_CONFIG", config)
        .arg("--hosts-file")
        .arg(hosts.path());
    cmd
}

#[test]
fn test_help_lists_command_groups() {
    Command::cargo_bin("hostsctl")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("block"))
        .stdout(predicate::str::contains("alias"))
        .stdout(predicate::str::contains("database"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("hostsctl")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hostsctl"));
}

#[test]
fn test_block_list() {
    let hosts = TestHosts::new(fixtures::ANNOTATED);
    let out = hostsctl(&hosts).args(["block", "list"]).output().unwrap();
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "ID   SYS   NAME\n1    +     system\n20         lab\n"
    );
}

#[test]
fn test_block_list_json() {
    let hosts = TestHosts::new(fixtures::ANNOTATED);
    let out = hostsctl(&hosts)
        .args(["block", "list", "-o", "json"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value[1]["name"], "lab");
    assert_eq!(value[1]["aliases"], 2);
    assert_eq!(value[0]["system_aliases"], 4);
}

#[test]
fn test_alias_add_aligns_with_block() {
    let hosts = TestHosts::new(fixtures::ANNOTATED);
    hostsctl(&hosts)
        .args(["alias", "add", "10.0.0.13", "scanner.lab", "--block", "lab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 alias(es) to block lab"));

    hosts.assert_contains("# 10.0.0.12     old-nas.lab\n10.0.0.13       scanner.lab\n");
    hosts.assert_contains("# Static table lookup for hostnames.\n# See hosts(5) for details.\n");
}

#[test]
fn test_alias_add_from_stdin_creates_block() {
    let hosts = TestHosts::new(fixtures::ANNOTATED);
    hostsctl(&hosts)
        .args(["alias", "add"])
        .write_stdin("# from a script\n10.9.9.9 stdin.host\n")
        .assert()
        .success();

    assert!(hosts
        .read()
        .ends_with("not a hosts line\n\n10.9.9.9        stdin.host\n"));
}

#[test]
fn test_alias_add_rejects_bad_input() {
    let hosts = TestHosts::new(fixtures::PLAIN);
    hostsctl(&hosts)
        .args(["alias", "add"])
        .write_stdin("definitely not hosts\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error in input line 1"));
    assert_eq!(hosts.read(), fixtures::PLAIN);
}

#[test]
fn test_alias_add_unknown_block() {
    let hosts = TestHosts::new(fixtures::PLAIN);
    hostsctl(&hosts)
        .args(["alias", "add", "10.0.0.1", "x", "--block", "missing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("aliases block 'missing' was not found"));
}

#[test]
fn test_alias_delete_refuses_system_aliases() {
    let hosts = TestHosts::new(fixtures::ANNOTATED);
    hostsctl(&hosts)
        .args(["alias", "delete", "localhost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 of 2 entries is system"));
    assert_eq!(hosts.read(), fixtures::ANNOTATED);
}

#[test]
fn test_alias_delete_single_alias() {
    let hosts = TestHosts::new(fixtures::PLAIN);
    hostsctl(&hosts)
        .args(["alias", "delete", "api.local"])
        .assert()
        .success();
    assert_eq!(hosts.read(), "127.0.0.1 localhost\n10.1.1.1  web.local\n");
}

#[test]
fn test_alias_list_plain_grouped() {
    let hosts = TestHosts::new("10.0.0.1 a\n10.0.0.1 b\n10.0.0.2 c\n");
    hostsctl(&hosts)
        .args(["alias", "list", "-o", "plain", "-g", "group"])
        .assert()
        .success()
        .stdout("10.0.0.1\ta b\n10.0.0.2\tc\n");
}

#[test]
fn test_alias_list_short_for_block() {
    let hosts = TestHosts::new(fixtures::ANNOTATED);
    hostsctl(&hosts)
        .args(["alias", "list", "-o", "short", "--block", "20", "--no-headers"])
        .assert()
        .success()
        .stdout("10.0.0.10   printer.lab\n10.0.0.11   nas.lab\n");
}

#[test]
fn test_block_add_then_delete() {
    let hosts = TestHosts::new(fixtures::PLAIN);
    hostsctl(&hosts)
        .args(["block", "add", "dev", "--note", "local services"])
        .assert()
        .success();
    assert_eq!(
        hosts.read(),
        "127.0.0.1 localhost\n10.1.1.1 web.local api.local\n\n# [*] dev - local services\n# <<placeholder>>\n"
    );

    hostsctl(&hosts)
        .args(["block", "delete", "dev"])
        .assert()
        .success();
    assert_eq!(hosts.read(), fixtures::PLAIN);
}

#[test]
fn test_block_delete_non_empty_needs_force() {
    let hosts = TestHosts::new(fixtures::ANNOTATED);
    hostsctl(&hosts)
        .args(["block", "delete", "lab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has aliases"));

    hostsctl(&hosts)
        .args(["block", "delete", "lab", "--force"])
        .assert()
        .success();
    hosts.assert_not_contains("lab");
    hosts.assert_contains("ip6-loopback\n\nnot a hosts line\n");
}

#[test]
fn test_block_clear() {
    let hosts = TestHosts::new(fixtures::ANNOTATED);
    hostsctl(&hosts)
        .args(["block", "clear", "system"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("the block has system aliases"));

    hostsctl(&hosts)
        .args(["block", "clear", "lab"])
        .assert()
        .success();
    hosts.assert_contains("# [20] lab - machines in the lab\n# <<placeholder>>\n\nnot a hosts line");
}

#[test]
fn test_database_format_diff_leaves_file() {
    let hosts = TestHosts::new(fixtures::PLAIN);
    hostsctl(&hosts)
        .args(["database", "format", "--diff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-127.0.0.1 localhost"))
        .stdout(predicate::str::contains("+127.0.0.1        localhost"));
    assert_eq!(hosts.read(), fixtures::PLAIN);
}

#[test]
fn test_database_format_rewrites_file() {
    let hosts = TestHosts::new(fixtures::PLAIN);
    hostsctl(&hosts)
        .args(["database", "format"])
        .assert()
        .success();
    assert_eq!(
        hosts.read(),
        "127.0.0.1        localhost\n10.1.1.1         web.local  api.local\n"
    );
}

#[test]
fn test_database_print_is_verbatim() {
    let hosts = TestHosts::new(fixtures::CRLF);
    hostsctl(&hosts)
        .args(["database", "print"])
        .assert()
        .success()
        .stdout(fixtures::CRLF);
}

#[test]
fn test_database_print_keeps_undecodable_bytes() {
    let hosts = TestHosts::new("");
    let source: &[u8] = b"# caf\xe9\n127.0.0.1 localhost\n";
    std::fs::write(hosts.path(), source).unwrap();
    hostsctl(&hosts)
        .args(["database", "print"])
        .assert()
        .success()
        .stdout(source.to_vec());
}

#[test]
fn test_database_backup_and_restore() {
    let hosts = TestHosts::new(fixtures::PLAIN);
    hostsctl(&hosts)
        .args(["database", "backup"])
        .assert()
        .success();
    assert!(hosts.backup_path().exists());

    hostsctl(&hosts)
        .args(["database", "backup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    hosts.write("garbage\n");
    hostsctl(&hosts)
        .args(["database", "restore"])
        .assert()
        .success();
    assert_eq!(hosts.read(), fixtures::PLAIN);
}

#[test]
fn test_database_location() {
    let hosts = TestHosts::new(fixtures::PLAIN);
    hostsctl(&hosts)
        .args(["database", "location"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("hosts\n"));
}

#[test]
fn test_settings_format_applies_to_edits() {
    let hosts = TestHosts::new(fixtures::PLAIN);
    let config = hosts.write_config("reformat.toml", "format = \"reformat\"\n");
    hostsctl(&hosts)
        .arg("--config")
        .arg(&config)
        .args(["alias", "add", "10.1.1.2", "db.local"])
        .assert()
        .success();
    assert_eq!(
        hosts.read(),
        "127.0.0.1        localhost\n10.1.1.1         web.local  api.local\n10.1.1.2         db.local\n"
    );
}

#[test]
fn test_hosts_file_from_environment() {
    let hosts = TestHosts::new(fixtures::PLAIN);
    let config = hosts.write_config("config.toml", "");
    Command::cargo_bin("hostsctl")
        .unwrap()
        .env("NO_COLOR", "1")
        .env("HOSTSCTL_CONFIG", config)
        .env("HOSTSCTL_HOSTS_FILE", hosts.path())
        .args(["alias", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("127.0.0.1\tlocalhost\n10.1.1.1\tweb.local api.local\n");
}

#[test]
fn test_missing_hosts_file_is_an_error() {
    let hosts = TestHosts::new("");
    let missing = hosts.dir().join("nope");
    Command::cargo_bin("hostsctl")
        .unwrap()
        .env("NO_COLOR", "1")
        .env("HOSTSCTL_CONFIG", hosts.write_config("config.toml", ""))
        .arg("--hosts-file")
        .arg(&missing)
        .args(["block", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: "));
}

#[test]
fn test_completions_bash() {
    Command::cargo_bin("hostsctl")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hostsctl"));
}
