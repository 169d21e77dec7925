//! End-to-end CLI tests for the freepik-dl binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_URL: &str = "https://www.freepik.com/free-photo/cat_123.htm";

/// Runs the binary in an empty directory with provider/bot variables cleared,
/// so a developer's `.env` or shell environment cannot leak in.
fn isolated_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("freepik-dl").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("FREEPIK_API_KEY")
        .env_remove("FREEPIK_API_BASE")
        .env_remove("TELEGRAM_BOT_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_binary_help_displays_usage() {
    let dir = TempDir::new().unwrap();
    isolated_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetch Freepik resources"));
}

#[test]
fn test_binary_version_displays_version() {
    let dir = TempDir::new().unwrap();
    isolated_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("freepik-dl"));
}

#[test]
fn test_binary_invalid_flag_returns_error() {
    let dir = TempDir::new().unwrap();
    isolated_cmd(&dir)
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_id_prints_extracted_resource_id() {
    let dir = TempDir::new().unwrap();
    isolated_cmd(&dir)
        .args(["id", "https://x.com/a_b_c.jpg?x=1"])
        .assert()
        .success()
        .stdout("b\n");
}

#[test]
fn test_fetch_without_api_key_fails_with_hint() {
    let dir = TempDir::new().unwrap();
    isolated_cmd(&dir)
        .args(["-q", "fetch", "https://www.freepik.com/free-photo/cat_123.htm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FREEPIK_API_KEY"));
}

#[test]
fn test_bot_without_token_fails() {
    let dir = TempDir::new().unwrap();
    isolated_cmd(&dir)
        .args(["bot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--token"));
}

/// Stubs the lookup and the signed file for resource `123`.
async fn mount_provider(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/resources/123/download"))
        .and(header("x-freepik-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "filename": "f.png", "url": format!("{}/cdn/f.png?sig=1", server.uri()) }
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cdn/f.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PNGDATA".to_vec()))
        .expect(1)
        .mount(server)
        .await;
}

// The mock server must keep serving while the test thread blocks on the child.
#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_memory_mode_writes_bytes_to_stdout() {
    let server = MockServer::start().await;
    mount_provider(&server).await;
    let dir = TempDir::new().unwrap();

    isolated_cmd(&dir)
        .args(["-q", "--api-key", "test-key", "--api-base"])
        .arg(format!("{}/v1", server.uri()))
        .args(["fetch", "--mode", "memory", PAGE_URL])
        .assert()
        .success()
        .stdout(predicate::eq(&b"PNGDATA"[..]));

    assert!(!dir.path().join("f.png").exists(), "memory mode must not write files");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_disk_mode_prints_written_path() {
    let server = MockServer::start().await;
    mount_provider(&server).await;
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let expected = out.path().join("f.png");

    isolated_cmd(&dir)
        .args(["-q", "--api-key", "test-key", "--api-base"])
        .arg(format!("{}/v1", server.uri()))
        .arg("fetch")
        .arg("--output-dir")
        .arg(out.path())
        .arg(PAGE_URL)
        .assert()
        .success()
        .stdout(format!("{}\n", expected.display()));

    assert_eq!(std::fs::read(&expected).unwrap(), b"PNGDATA");
}
