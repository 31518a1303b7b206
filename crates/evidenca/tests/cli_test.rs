//! Integration tests for the `evidenca` binary.
//!
//! Argument parsing, help, completions and error exits run without a back
//! end; the session flows run against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// `evidenca` with every config and data dir under `home`, no keyring and
/// no `EVIDENCA_*` variables leaking in from the caller.
fn evidenca_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("evidenca");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("EVIDENCA_NO_KEYRING", "1")
        .env_remove("EVIDENCA_CONFIG")
        .env_remove("EVIDENCA_PROFILE")
        .env_remove("EVIDENCA_API_URL")
        .env_remove("EVIDENCA_OUTPUT")
        .env_remove("EVIDENCA_INSECURE")
        .env_remove("EVIDENCA_TIMEOUT")
        .env_remove("EVIDENCA_TOKEN")
        .env_remove("EVIDENCA_EMAIL")
        .env_remove("EVIDENCA_PASSWORD")
        .env_remove("RUST_LOG")
        .write_stdin("");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn mock_login(server: &MockServer, role: &str) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": false,
            "token": "tok-9",
            "data": { "id": 4, "email": "ana@example.com", "name": "Ana",
                      "surname": "Novak", "role": role }
        })))
        .mount(server)
        .await;
}

fn login(home: &Path, server: &MockServer) {
    evidenca_cmd(home)
        .args(["--api-url", &server.uri()])
        .args(["login", "--email", "ana@example.com", "--password", "hunter2"])
        .assert()
        .success();
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = evidenca_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn help_lists_command_groups() {
    let home = tempfile::tempdir().unwrap();
    evidenca_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("events")
                .and(predicate::str::contains("projects"))
                .and(predicate::str::contains("vehicles"))
                .and(predicate::str::contains("login")),
        );
}

#[test]
fn version_flag() {
    let home = tempfile::tempdir().unwrap();
    evidenca_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("evidenca"));
}

#[test]
fn completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    evidenca_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn completions_bash() {
    let home = tempfile::tempdir().unwrap();
    evidenca_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn events_without_session_exits_with_auth_code() {
    let home = tempfile::tempdir().unwrap();
    evidenca_cmd(home.path())
        .args(["events", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
fn unknown_bay_is_rejected_by_parser() {
    let home = tempfile::tempdir().unwrap();
    let output = evidenca_cmd(home.path())
        .args(["events", "list", "--calendar", "Bay-9"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Bay-1"));
}

#[test]
fn progress_above_hundred_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    evidenca_cmd(home.path())
        .args(["projects", "update", "1", "--progress", "150"])
        .assert()
        .code(2);
}

#[test]
fn config_show_without_file_prints_defaults() {
    let home = tempfile::tempdir().unwrap();
    evidenca_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn config_path_honours_override() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("custom.toml");
    evidenca_cmd(home.path())
        .env("EVIDENCA_CONFIG", &file)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn missing_profile_is_reported() {
    let home = tempfile::tempdir().unwrap();
    evidenca_cmd(home.path())
        .args(["--profile", "garage", "login", "--email", "a@b.c", "--password", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("garage"));
}

// ── Session flows ───────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn login_stores_session_for_whoami() {
    let server = MockServer::start().await;
    mock_login(&server, "admin").await;
    let home = tempfile::tempdir().unwrap();

    evidenca_cmd(home.path())
        .args(["--api-url", &server.uri()])
        .args(["login", "--email", "ana@example.com", "--password", "hunter2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Signed in as Ana Novak (admin)"));

    evidenca_cmd(home.path())
        .args(["-o", "json", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"first_name\": \"Ana\""));

    evidenca_cmd(home.path()).arg("logout").assert().success();
    evidenca_cmd(home.path()).arg("whoami").assert().code(3);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_login_shows_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": true,
            "message": "Wrong password"
        })))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    evidenca_cmd(home.path())
        .args(["--api-url", &server.uri()])
        .args(["login", "--email", "ana@example.com", "--password", "nope"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Wrong password"));
}

#[tokio::test(flavor = "multi_thread")]
async fn events_list_shows_the_requested_month_only() {
    let server = MockServer::start().await;
    mock_login(&server, "admin").await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("calendar", "Bay-2"))
        .and(header("authorization", "Bearer tok-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": false,
            "data": [
                { "id": 1, "title": "Oil change", "start": "2024-05-02T09:00:00Z",
                  "end": "2024-05-02T10:00:00Z", "calendar": "Bay-2",
                  "first_name": "Ana", "last_name": "Novak", "user_id": 4 },
                { "id": 2, "title": "Tyre swap", "start": "2024-06-12T09:00:00Z",
                  "end": "2024-06-12T10:00:00Z", "calendar": "Bay-2" }
            ]
        })))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();
    login(home.path(), &server);

    evidenca_cmd(home.path())
        .args(["--api-url", &server.uri(), "-o", "plain"])
        .args(["events", "list", "--calendar", "Bay-2", "--date", "2024-05-20"])
        .assert()
        .success()
        .stdout(predicate::eq("1\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn regular_users_cannot_book() {
    let server = MockServer::start().await;
    mock_login(&server, "user").await;
    let home = tempfile::tempdir().unwrap();
    login(home.path(), &server);

    evidenca_cmd(home.path())
        .args(["--api-url", &server.uri()])
        .args(["events", "add", "--calendar", "Bay-1", "--title", "Brakes"])
        .args(["--start", "2024-05-02T09:00", "--end", "2024-05-02T10:00"])
        .assert()
        .code(5);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_needs_yes_without_a_terminal() {
    let server = MockServer::start().await;
    mock_login(&server, "admin").await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": false,
            "data": [{ "id": 7, "title": "Alignment", "start": "2024-05-02T09:00:00Z",
                       "end": "2024-05-02T10:00:00Z", "calendar": "Bay-1" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/delete-event/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": false })))
        .expect(1)
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();
    login(home.path(), &server);

    evidenca_cmd(home.path())
        .args(["--api-url", &server.uri()])
        .args(["events", "delete", "7", "--calendar", "Bay-1"])
        .assert()
        .code(2);

    evidenca_cmd(home.path())
        .args(["--api-url", &server.uri(), "--yes"])
        .args(["events", "delete", "7", "--calendar", "Bay-1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Reservation canceled"));
}

#[tokio::test(flavor = "multi_thread")]
async fn plain_users_cannot_register_vehicles_for_others() {
    let server = MockServer::start().await;
    mock_login(&server, "user").await;
    Mock::given(method("GET"))
        .and(path("/vehicle-brands"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": false,
            "data": [{ "id": 1, "name": "Volkswagen" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vehicle-models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": false,
            "data": [{ "id": 10, "brand_id": 1, "model_name": "Golf" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vehicles/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": false, "data": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/add-vehicle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": false })))
        .expect(0)
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();
    login(home.path(), &server);

    evidenca_cmd(home.path())
        .args(["--api-url", &server.uri()])
        .args(["vehicles", "add", "-b", "1", "-m", "10", "--year", "2021"])
        .args(["--plate", "KR 12-ABC", "--user", "7"])
        .assert()
        .code(5);
}
