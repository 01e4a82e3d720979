use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn care(dir: &Path) -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("care");
    cmd.current_dir(dir);
    cmd
}

fn workspace_with_starter() -> TempDir {
    let dir = tempdir().unwrap();
    care(dir.path()).args(["init", "config.json"]).assert().success();
    dir
}

fn keys(dir: &Path) -> (String, String) {
    let output = care(dir).arg("keygen").assert().success().get_output().stdout.clone();
    let text = String::from_utf8(output).unwrap();
    let quoted = |prefix: &str| {
        text.lines()
            .find(|line| line.starts_with(prefix))
            .and_then(|line| line.split('"').nth(1))
            .unwrap()
            .to_owned()
    };
    (quoted("The public key"), quoted("The private key"))
}

#[test]
fn no_arguments_prints_help() {
    let dir = tempdir().unwrap();
    care(dir.path()).assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = tempdir().unwrap();

    care(dir.path())
        .args(["init", "config.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("This configuration is created."));
    assert!(dir.path().join("config.json").exists());

    care(dir.path())
        .args(["init", "config.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    care(dir.path()).args(["init", "config.json", "--force"]).assert().success();
}

#[test]
fn verify_accepts_the_starter() {
    let dir = workspace_with_starter();

    care(dir.path())
        .args(["verify", "config.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("This configuration is valid."))
        .stdout(predicate::str::contains("[HINT]"));
}

#[test]
fn verify_reports_errors_and_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), r#"{ "meta": [] }"#).unwrap();

    care(dir.path())
        .args(["verify", "broken.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("This configuration has 2 issue(s)."))
        .stdout(predicate::str::contains("[ERROR] Missing settings. - /"))
        .stdout(predicate::str::contains("[ERROR] Expected a dictionary with string keys. - /meta"));
}

#[test]
fn resolve_walks_through_scheduled_changes() {
    let dir = workspace_with_starter();

    care(dir.path())
        .args([
            "resolve",
            "config.json",
            "--date",
            "2024-06-01T00:00:00Z",
            "--platform",
            "Android",
            "--app-version",
            "0.9.0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("  platform            : Android"))
        .stdout(predicate::str::contains("Settings on 2024-06-01T00:00:00+00:00:"))
        .stdout(predicate::str::contains("  bar                 : [deprecated] -> \"low\""))
        .stdout(predicate::str::contains("  coolFeature         : false\n"))
        .stdout(predicate::str::contains("Settings on 2024-12-31T00:00:00+00:00:"))
        .stdout(predicate::str::contains("  coolFeature         : false -> true"))
        .stdout(predicate::str::ends_with("No further overrides scheduled.\n"));
}

#[test]
fn resolve_rejects_bad_dates() {
    let dir = workspace_with_starter();

    care(dir.path())
        .args(["resolve", "config.json", "--date", "next week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date 'next week'"));
}

#[test]
fn prepare_without_key_writes_canonical_json() {
    let dir = workspace_with_starter();

    care(dir.path())
        .args(["prepare", "config.json", "published.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("This configuration is prepared."))
        .stdout(predicate::str::contains("[INFO] The configuration is not signed."));

    let published = fs::read_to_string(dir.path().join("published.json")).unwrap();
    assert!(published.starts_with(r#"{"deprecatedKeys":["bar"],"meta":{"author":"Your Name"},"overrides":"#));
    assert!(!published.contains('\n'));
}

#[test]
fn signed_documents_resolve_only_with_the_matching_key() {
    let dir = workspace_with_starter();
    let (public_key, private_key) = keys(dir.path());

    care(dir.path())
        .args(["prepare", "config.json", "signed.json", "--private-key", private_key.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("not signed").not());

    let envelope = fs::read_to_string(dir.path().join("signed.json")).unwrap();
    assert!(envelope.starts_with(r#"{"d":""#));

    care(dir.path())
        .args(["resolve", "signed.json", "--date", "2025-01-01T00:00:00Z", "--public-key", public_key.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("  coolFeature         : false -> true"));

    let (stranger, _) = keys(dir.path());
    care(dir.path())
        .args(["resolve", "signed.json", "--public-key", stranger.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Signature verification failed"));
}

#[test]
fn configured_public_key_still_resolves_drafts() {
    let dir = workspace_with_starter();
    let (public_key, private_key) = keys(dir.path());
    fs::write(dir.path().join("care.toml"), format!("[keys]\npublic_key = \"{public_key}\"\n")).unwrap();

    care(dir.path())
        .args(["resolve", "config.json", "--date", "2024-06-01T00:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings on 2024-06-01T00:00:00+00:00:"));

    care(dir.path())
        .args(["prepare", "config.json", "signed.json", "--private-key", private_key.as_str()])
        .assert()
        .success();

    care(dir.path())
        .args(["resolve", "signed.json", "--date", "2025-01-01T00:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  coolFeature         : false -> true"));
}

#[test]
fn signed_documents_need_a_key() {
    let dir = workspace_with_starter();
    let (_, private_key) = keys(dir.path());

    care(dir.path())
        .args(["prepare", "config.json", "signed.json", "--private-key", private_key.as_str()])
        .assert()
        .success();

    care(dir.path())
        .args(["resolve", "signed.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("The document is signed"));
}
