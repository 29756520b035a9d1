//! CLI subprocess integration tests.
//!
//! These tests invoke the `mediawall` binary as a subprocess against a
//! local mock manifest server and verify exit codes, stdout content, and
//! JSON output stability.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::process::Command;

fn mediawall_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mediawall"));
    // Point HOME away from any real config so resolution is hermetic.
    cmd.env("HOME", std::env::temp_dir());
    cmd
}

/// Serves a fixed status/body for every request on a background thread.
fn mock_server(status: u16, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).is_err() || line.trim().is_empty() {
                    break;
                }
            }
            let reason = if status == 200 { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });
    addr
}

const TREE_BODY: &str = r#"
{
  "tree": {
    "type": "folder",
    "name": "root",
    "children": [
      {
        "type": "img",
        "name": "sunset",
        "filename": "sunset.jpg",
        "url": "https://cdn.example.com/sunset.jpg",
        "thumburl": "https://cdn.example.com/t/sunset.jpg",
        "resolution": "1920x1080",
        "size": 204800
      },
      {
        "type": "folder",
        "name": "nested",
        "children": [
          {
            "type": "img",
            "name": "harbor",
            "filename": "harbor.jpg",
            "url": "https://cdn.example.com/harbor.jpg",
            "thumburl": "https://cdn.example.com/t/harbor.jpg"
          }
        ]
      }
    ]
  }
}
"#;

#[test]
fn list_json_outputs_flattened_entries() {
    let addr = mock_server(200, TREE_BODY);
    let output = mediawall_bin()
        .args([
            "--manifest-url",
            &format!("{addr}/gallery.json"),
            "--json",
            "list",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["filename"], "sunset.jpg");
    assert_eq!(entries[1]["filename"], "harbor.jpg");
}

#[test]
fn list_human_output_contains_urls() {
    let addr = mock_server(200, TREE_BODY);
    let output = mediawall_bin()
        .args(["--manifest-url", &format!("{addr}/gallery.json"), "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("https://cdn.example.com/sunset.jpg"));
    assert!(stdout.contains("1920x1080"));
}

#[test]
fn list_transport_failure_exits_3() {
    let addr = mock_server(503, "overloaded");
    let output = mediawall_bin()
        .args(["--manifest-url", &format!("{addr}/gallery.json"), "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("503"), "{stderr}");
}

#[test]
fn list_parse_failure_exits_2() {
    let addr = mock_server(200, "<html>not a manifest</html>");
    let output = mediawall_bin()
        .args(["--manifest-url", &format!("{addr}/gallery.json"), "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn list_from_local_manifest_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    std::fs::write(&path, r#"["2024/a.jpg", "2024/b.jpg"]"#).unwrap();

    let output = mediawall_bin()
        .args([
            "--manifest-file",
            path.to_str().unwrap(),
            "--image-base",
            "https://img.example.com",
            "--json",
            "list",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries[0]["url"], "https://img.example.com/2024/a.jpg");
}

#[test]
fn render_writes_standalone_gallery() {
    let addr = mock_server(200, TREE_BODY);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("gallery.html");

    let output = mediawall_bin()
        .args([
            "--manifest-url",
            &format!("{addr}/gallery.json"),
            "render",
            "--out",
            out.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let html = std::fs::read_to_string(&out).unwrap();
    assert_eq!(html.matches("class=\"media-item\"").count(), 2);
    assert!(html.contains("data-url=\"https://cdn.example.com/sunset.jpg\""));
    assert!(html.contains("loading=\"lazy\""));
}

#[test]
fn render_grid_layout() {
    let addr = mock_server(200, TREE_BODY);
    let output = mediawall_bin()
        .args([
            "--manifest-url",
            &format!("{addr}/gallery.json"),
            "render",
            "--layout",
            "grid",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("class=\"media-grid\""));
}

#[test]
fn render_text_dump() {
    let addr = mock_server(200, TREE_BODY);
    let output = mediawall_bin()
        .args([
            "--manifest-url",
            &format!("{addr}/gallery.json"),
            "render",
            "--text",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "sunset.jpg\thttps://cdn.example.com/sunset.jpg\nharbor.jpg\thttps://cdn.example.com/harbor.jpg\n"
    );
}

#[test]
fn render_failure_writes_error_page_and_exits_3() {
    let addr = mock_server(500, "boom");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("gallery.html");

    let output = mediawall_bin()
        .args([
            "--manifest-url",
            &format!("{addr}/gallery.json"),
            "render",
            "--out",
            out.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let html = std::fs::read_to_string(&out).unwrap();
    assert_eq!(html.matches("class=\"error-message\"").count(), 1);
    assert_eq!(html.matches("<img").count(), 0);
}

#[test]
fn render_into_page_shell() {
    let addr = mock_server(200, TREE_BODY);
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("shell.html");
    let out = dir.path().join("result.html");
    std::fs::write(
        &page,
        "<html><body><div id=\"wall\"><p>loading</p></div></body></html>",
    )
    .unwrap();

    let output = mediawall_bin()
        .args([
            "--manifest-url",
            &format!("{addr}/gallery.json"),
            "render",
            "--page",
            page.to_str().unwrap(),
            "--target",
            "wall",
            "--out",
            out.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<html><body><div id=\"wall\">"));
    assert!(!html.contains("loading</p>"));
    assert_eq!(html.matches("class=\"media-item\"").count(), 2);
}

#[test]
fn render_missing_target_aborts_before_fetch() {
    // Dead manifest endpoint: a fetch attempt would fail differently
    // (exit 3), so exit 1 proves the abort happened at binding time.
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("shell.html");
    std::fs::write(&page, "<html><body><div id=\"other\"></div></body></html>").unwrap();

    let output = mediawall_bin()
        .args([
            "--manifest-url",
            "http://127.0.0.1:1/gallery.json",
            "render",
            "--page",
            page.to_str().unwrap(),
            "--target",
            "wall",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("wall"), "{stderr}");
}

#[test]
fn render_empty_manifest_shows_placeholder() {
    let addr = mock_server(200, r#"{"tree": {"type": "folder", "children": []}}"#);
    let output = mediawall_bin()
        .args(["--manifest-url", &format!("{addr}/gallery.json"), "render"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("class=\"gallery-notice\"").count(), 1);
    assert_eq!(stdout.matches("<img").count(), 0);
}

#[test]
fn missing_manifest_source_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let output = mediawall_bin()
        .env("HOME", dir.path())
        .args(["list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no --manifest-url"), "{stderr}");
}

#[test]
fn completions_generate() {
    let output = mediawall_bin()
        .args(["completions", "bash"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(!output.stdout.is_empty());
}
