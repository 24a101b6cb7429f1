use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn quill() -> Command {
    Command::cargo_bin("quill").unwrap()
}

#[test]
fn test_help() {
    quill()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE"))
        .stdout(predicate::str::contains("--find"));
}

#[test]
fn test_version() {
    quill()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("quill "));
}

#[test]
fn test_find_literal_non_overlapping() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("a.txt");
    fs::write(&file_path, "aaaa").unwrap();

    quill()
        .arg("--find")
        .arg("aa")
        .arg(&file_path)
        .assert()
        .success()
        .stdout("0..2\taa\n2..4\taa\n")
        .stderr(predicate::str::contains("2 matches"));
}

#[test]
fn test_find_regex() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("animals.txt");
    fs::write(&file_path, "cat hat bat").unwrap();

    quill()
        .args(["--regex", "--find", "[ch]at"])
        .arg(&file_path)
        .assert()
        .success()
        .stdout("0..3\tcat\n4..7\that\n");
}

#[test]
fn test_find_literal_treats_metacharacters_literally() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("animals.txt");
    fs::write(&file_path, "cat hat bat").unwrap();

    quill()
        .args(["--find", "[ch]at"])
        .arg(&file_path)
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("0 matches"));
}

#[test]
fn test_find_invalid_regex() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("a.txt");
    fs::write(&file_path, "text [").unwrap();

    quill()
        .args(["-r", "-f", "["])
        .arg(&file_path)
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("error: Invalid regex '['"));
}

#[test]
fn test_find_reports_char_offsets() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("unicode.txt");
    fs::write(&file_path, "世界 hello\nhello").unwrap();

    quill()
        .args(["--find", "hello"])
        .arg(&file_path)
        .assert()
        .success()
        .stdout("3..8\thello\n9..14\thello\n");
}

#[test]
fn test_find_escapes_newlines_in_output() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("lines.txt");
    fs::write(&file_path, "one\ntwo").unwrap();

    quill()
        .args(["--regex", "--find", r"e\nt"])
        .arg(&file_path)
        .assert()
        .success()
        .stdout("2..5\te\\nt\n");
}

#[test]
fn test_find_reads_stdin() {
    quill()
        .args(["--find", "one"])
        .write_stdin("one two one")
        .assert()
        .success()
        .stdout("0..3\tone\n8..11\tone\n");
}

#[test]
fn test_find_with_encoding() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("gbk.txt");
    let (bytes, _, _) = encoding_rs::GBK.encode("你好，世界");
    fs::write(&file_path, &bytes).unwrap();

    quill()
        .args(["--encoding", "gbk", "--find", "世界"])
        .arg(&file_path)
        .assert()
        .success()
        .stdout("3..5\t世界\n");
}

#[test]
fn test_unknown_encoding_fails() {
    quill()
        .args(["--encoding", "no-such-encoding", "--find", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown encoding"));
}

#[test]
fn test_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    quill()
        .args(["--find", "x"])
        .arg(temp_dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_unexpected_arguments() {
    quill()
        .args(["a.txt", "b.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unexpected arguments"));
}
