use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RESPONSE: &str = r#"{
  "software": {"name": "LanguageTool", "version": "6.4"},
  "language": {"name": "English (US)", "code": "en-US"},
  "matches": [
    {
      "message": "Possible spelling mistake found.",
      "shortMessage": "Spelling mistake",
      "replacements": [{"value": "test"}, {"value": "text"}, {"value": "set"}, {"value": "tet"}],
      "offset": 10,
      "length": 4,
      "context": {"text": "This is a tset.", "offset": 10, "length": 4},
      "rule": {"id": "MORFOLOGIK_RULE_EN_US", "description": "Possible spelling mistake", "issueType": "misspelling"}
    }
  ]
}"#;

fn ltpretty() -> Command {
    let mut cmd = Command::cargo_bin("ltpretty").unwrap();
    cmd.env_remove("LTPRETTY_ENGINE")
        .env_remove("LTPRETTY_LANGUAGE")
        .env("NO_COLOR", "1");
    cmd
}

fn missing_engine(dir: &TempDir) -> PathBuf {
    dir.path().join("no-such-languagetool")
}

#[test]
fn test_missing_engine_exits_with_error() {
    let dir = TempDir::new().unwrap();
    ltpretty()
        .args(["check", "-t", "Some text", "--engine"])
        .arg(missing_engine(&dir))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("command not found"));
}

#[test]
fn test_empty_text_exits_with_error() {
    let dir = TempDir::new().unwrap();
    ltpretty()
        .args(["check", "-t", "   ", "--engine"])
        .arg(missing_engine(&dir))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No text provided"));
}

#[test]
fn test_empty_stdin_exits_with_error() {
    let dir = TempDir::new().unwrap();
    ltpretty()
        .args(["check", "--engine"])
        .arg(missing_engine(&dir))
        .write_stdin("\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Reading from stdin"))
        .stderr(predicate::str::contains("No text provided"));
}

#[test]
fn test_missing_file_exits_with_error() {
    let dir = TempDir::new().unwrap();
    ltpretty()
        .args(["check", "-f"])
        .arg(dir.path().join("absent.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_text_and_file_conflict() {
    ltpretty()
        .args(["check", "-t", "text", "-f", "notes.txt"])
        .assert()
        .failure();
}

#[test]
fn test_completion_script() {
    ltpretty()
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ltpretty"));
}

#[cfg(unix)]
mod with_fake_engine {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Write an executable shell script standing in for languagetool.
    fn fake_engine(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("languagetool");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Engine that records its arguments and input, then replies with RESPONSE.
    fn recording_engine(dir: &Path) -> PathBuf {
        fs::write(dir.join("response.json"), RESPONSE).unwrap();
        let shown = dir.display();
        fake_engine(
            dir,
            &format!(
                "echo \"$@\" > '{shown}/args.txt'\ncat > '{shown}/stdin.txt'\ncat '{shown}/response.json'"
            ),
        )
    }

    #[test]
    fn test_report_is_rendered() {
        let dir = TempDir::new().unwrap();
        let engine = recording_engine(dir.path());

        ltpretty()
            .args(["check", "-t", "This is a tset.", "--no-color", "--engine"])
            .arg(&engine)
            .assert()
            .success()
            .stdout(predicate::str::contains("LanguageTool Report"))
            .stdout(predicate::str::contains("Total issues found: 1"))
            .stdout(predicate::str::contains("1:11"))
            .stdout(predicate::str::contains("misspelling"))
            .stdout(predicate::str::contains("This is a [tset]."))
            .stdout(predicate::str::contains("tset → test"))
            .stdout(predicate::str::contains("     → set"))
            .stdout(predicate::str::contains("tet").not());
    }

    #[test]
    fn test_engine_receives_text_and_language() {
        let dir = TempDir::new().unwrap();
        let engine = recording_engine(dir.path());

        ltpretty()
            .args(["check", "-l", "de-DE", "-t", "Das ist ein Tset.", "--engine"])
            .arg(&engine)
            .assert()
            .success();

        let args = fs::read_to_string(dir.path().join("args.txt")).unwrap();
        assert_eq!(args.trim(), "-l de-DE --json");
        let stdin = fs::read_to_string(dir.path().join("stdin.txt")).unwrap();
        assert_eq!(stdin, "Das ist ein Tset.");
    }

    #[test]
    fn test_language_and_engine_from_environment() {
        let dir = TempDir::new().unwrap();
        let engine = recording_engine(dir.path());

        ltpretty()
            .env("LTPRETTY_ENGINE", &engine)
            .env("LTPRETTY_LANGUAGE", "fr")
            .args(["check", "-t", "Bonjour"])
            .assert()
            .success();

        let args = fs::read_to_string(dir.path().join("args.txt")).unwrap();
        assert_eq!(args.trim(), "-l fr --json");
    }

    #[test]
    fn test_stdin_and_file_inputs() {
        let dir = TempDir::new().unwrap();
        let engine = recording_engine(dir.path());

        ltpretty()
            .args(["check", "--engine"])
            .arg(&engine)
            .write_stdin("piped text")
            .assert()
            .success();
        let stdin = fs::read_to_string(dir.path().join("stdin.txt")).unwrap();
        assert_eq!(stdin, "piped text");

        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "line one\nline two\n").unwrap();
        ltpretty()
            .args(["check", "--engine"])
            .arg(&engine)
            .arg("-f")
            .arg(&notes)
            .assert()
            .success();
        let stdin = fs::read_to_string(dir.path().join("stdin.txt")).unwrap();
        assert_eq!(stdin, "line one\nline two\n");
    }

    #[test]
    fn test_json_output() {
        let dir = TempDir::new().unwrap();
        let engine = recording_engine(dir.path());

        let output = ltpretty()
            .args(["check", "-t", "This is a tset.", "-o", "json", "--engine"])
            .arg(&engine)
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["matches"][0]["line"], 1);
        assert_eq!(value["matches"][0]["column"], 11);
    }

    #[test]
    fn test_invalid_json_exits_with_error() {
        let dir = TempDir::new().unwrap();
        let engine = fake_engine(dir.path(), "cat > /dev/null\necho 'This is not JSON!'");

        ltpretty()
            .args(["check", "-t", "text", "--engine"])
            .arg(&engine)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Failed to parse LanguageTool output"));
    }

    #[test]
    fn test_engine_failure_reports_its_stderr() {
        let dir = TempDir::new().unwrap();
        let engine = fake_engine(
            dir.path(),
            "cat > /dev/null\necho 'Unknown language: xx-XX' >&2\nexit 3",
        );

        ltpretty()
            .args(["check", "-l", "xx-XX", "-t", "text", "--engine"])
            .arg(&engine)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("exit code 3"))
            .stderr(predicate::str::contains("Unknown language: xx-XX"));
    }

    #[test]
    fn test_list_is_passed_through() {
        let dir = TempDir::new().unwrap();
        let engine = fake_engine(
            dir.path(),
            "[ \"$1\" = \"--list\" ] || exit 9\nprintf 'en-US English (US)\\nde-DE German\\n'",
        );

        // --list wins over everything else, including empty input
        ltpretty()
            .args(["check", "--list", "-t", "  ", "--engine"])
            .arg(&engine)
            .assert()
            .success()
            .stdout("en-US English (US)\nde-DE German\n");
    }
}
