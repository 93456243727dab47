//! Integration tests for the CLI pipeline, driven through [`modeld2_cli::run`].

use std::{fs, path::Path};

use clap::Parser;
use tempfile::TempDir;

use modeld2::ModelD2Error;
use modeld2_cli::{Args, error_adapter::to_reportables, run};

const SNAPSHOT: &str = r#"{
  "apps": {
    "admin": {
      "module": {"path": "/venv/lib/python3.12/site-packages/django/contrib/admin/__init__.py"},
      "models": {
        "LogEntry": {
          "fields": [
            {"name": "id", "type": "AutoField"},
            {"name": "user", "type": "ForeignKey", "to": "users.User"}
          ]
        }
      }
    },
    "users": {
      "module": {"path": "/srv/project/apps/users/__init__.py"},
      "models": {
        "User": {
          "fields": [
            {"name": "id", "type": "AutoField"},
            {"name": "username", "type": "CharField"}
          ]
        }
      }
    },
    "blog": {
      "module": {"path": "/srv/project/apps/blog/__init__.py"},
      "models": {
        "Post": {
          "fields": [
            {"name": "id", "type": "AutoField"},
            {"name": "author", "type": "ForeignKey", "to": "users.User", "null": true}
          ]
        }
      }
    }
  }
}"#;

fn write_snapshot(dir: &TempDir, source: &str) -> String {
    let path = dir.path().join("registry.json");
    fs::write(&path, source).unwrap();
    path.display().to_string()
}

fn write_config(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

fn parse(args: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("modeld2").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_default_run_skips_third_party_apps() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, SNAPSHOT);
    let config = write_config(&dir, "");

    let output = run(&parse(&[&input, "--config", &config])).unwrap();

    assert!(output.starts_with("# Models:\n\n"));
    assert!(output.contains("\"users.User\": {"));
    assert!(output.contains("\"blog.Post\": {"));
    assert!(!output.contains("admin.LogEntry"));
    assert!(output.contains(
        "\"blog.Post\".\"author\" <-> \"users.User\".\"id\" \
         {source-arrowhead.shape: cf-many; target-arrowhead.shape: cf-one}"
    ));
}

#[test]
fn test_flag_includes_third_party_apps() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, SNAPSHOT);
    let config = write_config(&dir, "");

    let output = run(&parse(&[
        &input,
        "--config",
        &config,
        "--user-apps-only",
        "false",
    ]))
    .unwrap();

    assert!(output.contains("\"admin.LogEntry\": {"));
    assert!(output.contains("\"admin.LogEntry\".\"user\" <-> \"users.User\".\"id\""));
}

#[test]
fn test_config_file_applies_and_flags_win() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, SNAPSHOT);
    let config = write_config(
        &dir,
        "[export]\nexclude_apps = [\"users\"]\nshow_ref = true\n",
    );

    let with_refs = run(&parse(&[&input, "--config", &config])).unwrap();
    assert!(!with_refs.contains("\"users.User\": {"));
    assert!(with_refs.contains("\"blog.Post\".\"author\" <-> \"users.User\".\"id\""));

    let without_refs = run(&parse(&[&input, "--config", &config, "--show-ref", "false"])).unwrap();
    assert!(!without_refs.contains("users.User"));
    assert!(without_refs.contains("\"blog.Post\": {"));
}

#[test]
fn test_vendor_markers_from_config() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, SNAPSHOT);
    let config = write_config(&dir, "[origin]\nvendor_markers = [\"/srv/project/apps/blog\"]\n");

    let output = run(&parse(&[&input, "--config", &config])).unwrap();

    assert!(output.contains("\"admin.LogEntry\": {"));
    assert!(!output.contains("\"blog.Post\": {"));
}

#[test]
fn test_malformed_snapshot_reports_diagnostics() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, "{\"apps\": [");
    let config = write_config(&dir, "");

    let err = run(&parse(&[&input, "--config", &config])).unwrap_err();
    assert!(matches!(err, ModelD2Error::Load { .. }));

    let reportables = to_reportables(&err);
    assert!(!reportables.is_empty());
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");
    let missing = Path::new("/nonexistent/registry.json").display().to_string();

    let err = run(&parse(&[&missing, "--config", &config])).unwrap_err();
    assert!(matches!(err, ModelD2Error::Io(_)));
    assert!(to_reportables(&err)[0].to_string().starts_with("I/O error"));
}

#[test]
fn test_missing_config_is_config_error() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir, SNAPSHOT);

    let err = run(&parse(&[&input, "--config", "/nonexistent/config.toml"])).unwrap_err();
    assert!(matches!(err, ModelD2Error::Config(_)));
}
