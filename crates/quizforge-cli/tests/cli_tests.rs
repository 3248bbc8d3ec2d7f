//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizforge() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizforge").unwrap()
}

#[test]
fn validate_fixture_quiz() {
    quizforge()
        .arg("validate")
        .arg("--source")
        .arg("../../quizzes/web-deployment.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 questions"))
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn validate_directory() {
    quizforge()
        .arg("validate")
        .arg("--source")
        .arg("../../quizzes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Web deployment basics"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let quiz = r#"{
        "meta": { "title": "Broken" },
        "questions": [
            {
                "id": "b1",
                "type": "single",
                "question": "No right answer here",
                "options": [
                    { "text": "a", "correct": false },
                    { "text": "b", "correct": false }
                ]
            }
        ]
    }"#;
    let path = dir.path().join("broken.json");
    std::fs::write(&path, quiz).unwrap();

    quizforge()
        .arg("validate")
        .arg("--source")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[b1]"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    quizforge()
        .arg("validate")
        .arg("--source")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizforge.toml"))
        .stdout(predicate::str::contains("Created quizzes/example.json"));

    assert!(dir.path().join("quizforge.toml").exists());
    assert!(dir.path().join("quizzes/example.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_example_quiz_validates() {
    let dir = TempDir::new().unwrap();

    quizforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizforge()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--source")
        .arg("quizzes/example.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn export_roundtrip() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("exported.json");

    quizforge()
        .arg("export")
        .arg("--source")
        .arg("../../quizzes/web-deployment.json")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 5 questions"));

    // The exported file is itself a loadable quiz.
    quizforge()
        .arg("validate")
        .arg("--source")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn generate_from_study_text() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.txt");
    let output = dir.path().join("generated.json");

    let text = "A reverse proxy is a server that sits in front of application servers \
        and forwards client requests to them. Load balancing is a technique that \
        distributes incoming traffic across several backend instances to improve \
        availability. A container image is a packaged filesystem snapshot that \
        bundles an application together with its runtime dependencies.";
    std::fs::write(&input, text).unwrap();

    quizforge()
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--topic")
        .arg("Deployment")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated"));

    quizforge()
        .arg("validate")
        .arg("--source")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn generate_rejects_short_text() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("short.txt");
    let output = dir.path().join("generated.json");
    std::fs::write(&input, "Too short.").unwrap();

    quizforge()
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--topic")
        .arg("Anything")
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("too short"));
}

#[test]
fn help_output() {
    quizforge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Self-grading quiz runner"));
}

#[test]
fn version_output() {
    quizforge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizforge"));
}
