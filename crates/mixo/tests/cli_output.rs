//! Integration tests for CLI output behavior
//!
//! The default behavior is quiet (no logs). Use -v/--verbose to enable logs.
//! Every run gets an isolated HOME and working directory so local config
//! files cannot leak in.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{Value, json};

/// Nothing listens on the discard port.
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn mixo(args: &[&str], stdin: Option<&str>) -> Output {
    let home = tempfile::tempdir().expect("Failed to create temp dir");

    let mut child = Command::new(env!("CARGO_BIN_EXE_mixo"))
        .args(args)
        .current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("MIXO_API_URL")
        .env_remove("MIXO_CSRF_TOKEN")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute mixo");

    {
        let mut handle = child.stdin.take().expect("stdin is piped");
        if let Some(input) = stdin {
            handle
                .write_all(input.as_bytes())
                .expect("Failed to write stdin");
        }
    }

    child.wait_with_output().expect("Failed to wait for mixo")
}

fn recipe_json(id: i64, name: &str, is_favorite: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "Fresh and bright",
        "ingredients": "5 cl rum\n2 cl lime\nMint",
        "musical_ambiance": "Bossa nova",
        "user_request": "Something fresh for a summer evening",
        "created_at": "2024-05-01T18:30:00Z",
        "is_favorite": is_favorite
    })
}

async fn spawn_server() -> String {
    let app = Router::new()
        .route(
            "/api/cocktails/",
            get(|| async {
                Json(json!([
                    recipe_json(2, "Mojito", true),
                    recipe_json(1, "Caipirinha", false),
                ]))
            }),
        )
        .route(
            "/api/cocktail/{id}/delete/",
            delete(|Path(id): Path<i64>| async move {
                if id == 7 {
                    StatusCode::INTERNAL_SERVER_ERROR
                } else {
                    StatusCode::NO_CONTENT
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", address)
}

/// Run mixo off the async runtime so the server keeps serving.
async fn mixo_async(args: Vec<String>, stdin: Option<&'static str>) -> Output {
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        mixo(&args, stdin)
    })
    .await
    .unwrap()
}

fn assert_no_json_logs(stdout: &str) {
    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
}

#[test]
fn test_short_request_is_rejected_locally() {
    let output = mixo(&["generate", "short", "--server", UNREACHABLE], None);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("at least 10 characters"),
        "Expected validation message, got: {}",
        stderr
    );
    assert!(
        !stderr.contains("Connection error"),
        "Validation must happen before any request, got: {}",
        stderr
    );
}

#[test]
fn test_declined_delete_makes_no_request() {
    let output = mixo(&["delete", "7", "--server", UNREACHABLE], Some("n\n"));

    assert!(
        output.status.success(),
        "declined delete should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[y/N]"));
    assert!(stdout.contains("Aborted."));
}

#[test]
fn test_closed_stdin_declines_delete() {
    let output = mixo(&["delete", "7", "--server", UNREACHABLE], None);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Aborted."));
}

#[test]
fn test_unreachable_server_reports_connection_error() {
    let output = mixo(&["list", "--server", UNREACHABLE], None);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Connection error: unable to reach the server"),
        "Expected connection error, got: {}",
        stderr
    );
    assert!(stderr.contains("retry"));
}

#[test]
fn test_invalid_server_url_is_rejected() {
    let output = mixo(&["list", "--server", "ftp://mixo.example.com"], None);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid base URL"));
}

#[test]
fn test_invalid_config_warns_and_falls_back() {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    let config_dir = home.path().join(".mixo");
    std::fs::create_dir_all(&config_dir).expect("Failed to create .mixo dir");
    std::fs::write(config_dir.join("config.toml"), "invalid toml [[[")
        .expect("Failed to write invalid config");

    let output = Command::new(env!("CARGO_BIN_EXE_mixo"))
        .args(["delete", "1", "--server", UNREACHABLE])
        .current_dir(home.path())
        .env("HOME", home.path())
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute mixo");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Warning: Could not load config"),
        "Expected warning in stderr, got: {}",
        stderr
    );
    assert!(stderr.contains("Tip: Check"));
}

#[test]
fn test_completions_bash() {
    let output = mixo(&["completions", "bash"], None);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("mixo"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_prints_table() {
    let server = spawn_server().await;

    let output = mixo_async(vec!["list".into(), "--server".into(), server], None).await;

    assert!(
        output.status.success(),
        "mixo list failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cocktails (2):"));
    assert!(stdout.contains("Mojito"));
    assert!(stdout.contains("Caipirinha"));
    assert!(stdout.contains("2 shown · 2 total · 1 favorite"));
    assert_no_json_logs(&stdout);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should not emit INFO logs, got: {}",
        stderr
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_favorites_json() {
    let server = spawn_server().await;

    let output = mixo_async(
        vec![
            "list".into(),
            "--filter".into(),
            "favorites".into(),
            "--json".into(),
            "--server".into(),
            server,
        ],
        None,
    )
    .await;

    assert!(output.status.success());
    let recipes: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["name"], "Mojito");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_search_without_matches() {
    let server = spawn_server().await;

    let output = mixo_async(
        vec![
            "list".into(),
            "--search".into(),
            "negroni".into(),
            "--server".into(),
            server,
        ],
        None,
    )
    .await;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No cocktails match"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_verbose_logs_go_to_stderr() {
    let server = spawn_server().await;

    let output = mixo_async(vec!["-v".into(), "list".into(), "--server".into(), server], None).await;

    assert!(output.status.success());
    assert_no_json_logs(&String::from_utf8_lossy(&output.stdout));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("core.api.request_completed"),
        "Verbose mode should log requests, got: {}",
        stderr
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_forced_delete_reports_server_failure() {
    let server = spawn_server().await;

    let deleted = mixo_async(
        vec!["delete".into(), "3".into(), "--force".into(), "--server".into(), server.clone()],
        None,
    )
    .await;
    assert!(deleted.status.success());
    assert!(String::from_utf8_lossy(&deleted.stdout).contains("Cocktail #3 deleted"));

    let failed = mixo_async(
        vec!["delete".into(), "7".into(), "--force".into(), "--server".into(), server],
        None,
    )
    .await;
    assert!(!failed.status.success());
    assert!(String::from_utf8_lossy(&failed.stderr).contains("Failed to delete cocktail"));
}
