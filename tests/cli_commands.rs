mod schema_server;

use std::path::Path;

use predicates::prelude::*;
use schema_server::{LOGIN, ORDERS, SUMMARY, SchemaServer};

fn write_output_dir(root: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(root.join("pages"))?;
    std::fs::write(root.join("summary.json"), SUMMARY)?;
    std::fs::write(root.join("login.json"), LOGIN)?;
    std::fs::write(root.join("pages").join("orders.json"), ORDERS)?;
    Ok(())
}

#[test]
fn list_prints_index_rows_from_directory() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let root = temp.path().join("output");
    write_output_dir(&root)?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("schema-browser");
    cmd.args(["list", "--dir"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("generated at 2024-05-01 10:20:30 UTC"))
        .stdout(predicate::str::contains("4 pages"))
        .stdout(predicate::str::contains("* login [success: HIGH]"))
        .stdout(predicate::str::contains(
            "1 forms · 2 fields · 0 outputs · 0 frames · 0 nav",
        ))
        .stdout(predicate::str::contains("Confidence score: 0.91"))
        .stdout(predicate::str::contains("  missing [warning: low]"))
        .stdout(predicate::str::contains("0 frames").and(predicate::str::contains(
            "2 frames (layout)",
        )))
        .stdout(predicate::str::contains("(no pageId) [neutral: UNKNOWN]"));
    Ok(())
}

#[test]
fn show_prints_first_page_by_default() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let root = temp.path().join("output");
    write_output_dir(&root)?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("schema-browser");
    cmd.args(["show", "--dir"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# login\nSign in\n"))
        .stdout(predicate::str::contains("- loginForm\n  (POST → /login.do)"))
        .stdout(predicate::str::contains("text · required · max 32"))
        .stdout(predicate::str::contains("No outputs detected."));
    Ok(())
}

#[test]
fn show_unknown_page_prints_prompt() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let root = temp.path().join("output");
    write_output_dir(&root)?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("schema-browser");
    cmd.args(["show", "--page", "nope", "--dir"])
        .arg(&root)
        .assert()
        .success()
        .stdout("Select a page to view its schema.\n");
    Ok(())
}

#[test]
fn show_json_over_http() {
    let server = SchemaServer::spawn(&[
        ("/schemas/summary.json", 200, SUMMARY),
        ("/schemas/login.json", 200, LOGIN),
        ("/schemas/pages/orders.json", 200, ORDERS),
    ]);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("schema-browser");
    cmd.args(["show", "--format", "json", "--page", "orders", "--base"])
        .arg(format!("{}/schemas", server.base_url))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pageId\": \"orders\""))
        .stdout(predicate::str::contains("\"frameName\": \"top\""));
}

#[test]
fn unreachable_base_fails_with_message() {
    let server = SchemaServer::spawn(&[]);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("schema-browser");
    cmd.args(["list", "--base"])
        .arg(format!("{}/missing", server.base_url))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to load summary at"));
}

#[test]
fn base_defaults_to_environment() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let root = temp.path().join("output");
    write_output_dir(&root)?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("schema-browser");
    cmd.env("SCHEMA_BROWSER_BASE", &root)
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pageCount\": 3"));
    Ok(())
}

#[test]
fn rust_log_debug_emits_debug_line_to_stderr() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let root = temp.path().join("output");
    write_output_dir(&root)?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("schema-browser");
    cmd.env("RUST_LOG", "debug")
        .args(["list", "--dir"])
        .arg(&root)
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed cli"));
    Ok(())
}

#[test]
fn default_log_level_is_info() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let root = temp.path().join("output");
    write_output_dir(&root)?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("schema-browser");
    cmd.env_remove("RUST_LOG")
        .args(["list", "--dir"])
        .arg(&root)
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded schemas from local files"))
        .stderr(predicate::str::contains("parsed cli").not());
    Ok(())
}

#[test]
fn skipped_page_is_warned_once() {
    let server = SchemaServer::spawn(&[
        ("/schemas/summary.json", 200, SUMMARY),
        ("/schemas/login.json", 200, LOGIN),
        ("/schemas/pages/orders.json", 200, ORDERS),
    ]);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("schema-browser");
    let output = cmd
        .env_remove("RUST_LOG")
        .args(["list", "--base"])
        .arg(format!("{}/schemas", server.base_url))
        .output()
        .expect("run schema-browser");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let warnings = stderr
        .lines()
        .filter(|line| line.contains("missing.json"))
        .count();
    assert_eq!(warnings, 1, "stderr: {stderr}");
}
