// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Annexport Contributors

//! CLI end-to-end tests

use annexport_git::git2::{Repository, Signature};
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::File;
use std::io::Read;
use tempfile::TempDir;

/// Initializes a repository with a single committed file.
fn simple_repo() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let repo = Repository::init(tmp.path()).unwrap();
    let blob = repo.blob(b"hello archive\n").unwrap();
    let root = {
        let mut builder = repo.treebuilder(None).unwrap();
        builder.insert("hello.txt", blob, 0o100644).unwrap();
        builder.write().unwrap()
    };
    let tree = repo.find_tree(root).unwrap();
    let sig = Signature::now("test", "test@example.com").unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
        .unwrap();
    tmp
}

#[test]
fn exports_zip_to_explicit_output() {
    let repo = simple_repo();
    let out = TempDir::new().unwrap();
    let target = out.path().join("export.zip");

    Command::cargo_bin("annexport")
        .unwrap()
        .arg(repo.path())
        .args(["--format", "zip"])
        .arg("--output")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote"));

    let mut archive = zip::ZipArchive::new(File::open(&target).unwrap()).unwrap();
    let mut file = archive.by_name("hello.txt").unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    assert_eq!(content, "hello archive\n");
}

#[test]
fn exports_tar_to_explicit_output() {
    let repo = simple_repo();
    let out = TempDir::new().unwrap();
    let target = out.path().join("export.tar.gz");

    Command::cargo_bin("annexport")
        .unwrap()
        .arg(repo.path())
        .args(["--format", "tar"])
        .arg("--output")
        .arg(&target)
        .assert()
        .success();

    assert!(target.exists());
    assert!(target.metadata().unwrap().len() > 0);
}

#[test]
fn default_output_lands_next_to_repository() {
    let parent = TempDir::new().unwrap();
    let repo_path = parent.path().join("dataset");
    std::fs::create_dir(&repo_path).unwrap();
    {
        let repo = Repository::init(&repo_path).unwrap();
        let blob = repo.blob(b"data").unwrap();
        let root = {
            let mut builder = repo.treebuilder(None).unwrap();
            builder.insert("d.txt", blob, 0o100644).unwrap();
            builder.write().unwrap()
        };
        let tree = repo.find_tree(root).unwrap();
        let sig = Signature::now("test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
    }

    Command::cargo_bin("annexport")
        .unwrap()
        .arg(&repo_path)
        .assert()
        .success();

    let archives: Vec<_> = std::fs::read_dir(parent.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .ends_with(".zip")
        })
        .collect();
    assert_eq!(archives.len(), 1, "expected one zip next to the repo");
}

#[test]
fn verbose_mode_logs_resolved_target() {
    let repo = simple_repo();
    let out = TempDir::new().unwrap();
    let target = out.path().join("export.zip");

    Command::cargo_bin("annexport")
        .unwrap()
        .env_remove("RUST_LOG")
        .arg(repo.path())
        .arg("--verbose")
        .arg("--output")
        .arg(&target)
        .assert()
        .success()
        .stderr(predicate::str::contains("resolved export target"));

    assert!(target.exists());
}

#[test]
fn fails_on_missing_repository() {
    Command::cargo_bin("annexport")
        .unwrap()
        .arg("/nonexistent/repository")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open repository"));
}

#[test]
fn fails_on_unknown_revision() {
    let repo = simple_repo();
    Command::cargo_bin("annexport")
        .unwrap()
        .arg(repo.path())
        .args(["--rev", "no-such-branch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-branch"));
}
