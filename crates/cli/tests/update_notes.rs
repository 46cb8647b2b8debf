use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn wikifmt(config_home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wikifmt"));
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

#[test]
fn update_adds_bibliography_and_orders_keys() {
    let tmp = tempdir().unwrap();
    let notes = tmp.path().join("notes");
    fs::create_dir(&notes).unwrap();
    fs::write(notes.join("idea.md"), "---\nupdated: 2\nid: abc\ntitle: Idea\n---\n\n# Idea\n")
        .unwrap();
    fs::write(notes.join("readme.txt"), "---\nleft: alone\n---\n").unwrap();

    wikifmt(tmp.path())
        .arg("update")
        .arg(&notes)
        .assert()
        .success()
        .stdout(predicate::str::contains("updated"))
        .stdout(predicate::str::contains("1 of 1 note(s) updated"));

    assert_eq!(
        fs::read_to_string(notes.join("idea.md")).unwrap(),
        "---\ntitle: Idea\nid: abc\nupdated: 2\nbibliography: [../refs.bib]\n---\n# Idea\n"
    );
    assert_eq!(fs::read_to_string(notes.join("readme.txt")).unwrap(), "---\nleft: alone\n---\n");
}

#[test]
fn update_with_filters_rule() {
    let tmp = tempdir().unwrap();
    let note = tmp.path().join("a.md");
    fs::write(&note, "---\ntitle: A\n---\nbody").unwrap();

    wikifmt(tmp.path())
        .arg("update")
        .arg(tmp.path())
        .args(["--rule", "filters"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&note).unwrap(),
        "---\ntitle: A\n__defaults__:\n  filters: [$FILTERS$/get_markdown_links.py]\n---\nbody"
    );
}

#[test]
fn update_uses_configured_values() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    fs::write(
        &cfg,
        "version = 1\n[frontmatter]\nbibliography = [\"refs/main.bib\"]\nrules = [\"bibliography\"]\n",
    )
    .unwrap();
    let notes = tmp.path().join("notes");
    fs::create_dir(&notes).unwrap();
    let note = notes.join("a.md");
    fs::write(&note, "---\nbibliography: [old.bib]\n---\nbody").unwrap();

    wikifmt(tmp.path()).arg("--config").arg(&cfg).arg("update").arg(&notes).assert().success();

    assert_eq!(
        fs::read_to_string(&note).unwrap(),
        "---\nbibliography: [old.bib, refs/main.bib]\n---\nbody"
    );
}

#[test]
fn dry_run_leaves_files_alone() {
    let tmp = tempdir().unwrap();
    let note = tmp.path().join("a.md");
    let text = "---\ntitle: A\n---\nbody";
    fs::write(&note, text).unwrap();

    wikifmt(tmp.path())
        .arg("update")
        .arg(tmp.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("would update"))
        .stdout(predicate::str::contains("1 of 1 note(s) would change"));

    assert_eq!(fs::read_to_string(&note).unwrap(), text);
}

#[test]
fn malformed_note_fails_the_run() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("plain.md"), "just text, no header\n").unwrap();

    wikifmt(tmp.path())
        .arg("update")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("plain.md"));
}

#[test]
fn missing_directory_fails() {
    let tmp = tempdir().unwrap();
    wikifmt(tmp.path())
        .arg("update")
        .arg(tmp.path().join("nowhere"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}
