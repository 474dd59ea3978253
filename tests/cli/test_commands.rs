use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BIN: &str = "mediatag";

const EVENTS_SCHEMA: &str = r#"
tags:
  dance_style:
    req: 'action == "dancing"'
    values:
      - freestyle
      - value: swing
        req: "guys > 0 and girls > 0"
  participants:
    type: int
  girls:
    req: "participants >= 1"
    type: int
  guys:
    req: "participants - girls > 0"
    type: int
  action:
    values: [dancing, singing]
  scene: {}
"#;

const CYCLIC_SCHEMA: &str = r#"
tags:
  tag1: { req: "tag2" }
  tag2: { req: "tag3" }
  tag3: { req: "tag1" }
"#;

fn workspace_with(schema: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("events_tags.yaml"), schema).unwrap();
    temp_dir
}

fn mediatag(workspace: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("--workspace")
        .arg(workspace)
        .env_remove("RUST_LOG")
        .env_remove("MEDIATAG_SCHEMA_PATH")
        .env_remove("MEDIATAG_OUTPUT_FORMAT")
        .env_remove("MEDIATAG_ORDERING_CHECK_CYCLES")
        .env_remove("MEDIATAG_ORDERING_MAX_MOVES");
    cmd
}

#[test]
fn help_lists_schema_commands() {
    Command::cargo_bin(BIN)
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SCHEMA COMMANDS"))
        .stdout(predicate::str::contains("order"))
        .stdout(predicate::str::contains("lint"));
}

#[test]
fn order_uses_declared_order_by_default() {
    let workspace = workspace_with(EVENTS_SCHEMA);
    mediatag(workspace.path())
        .arg("order")
        .assert()
        .success()
        .stdout("participants\ngirls\nguys\naction\ndance_style\nscene\n");
}

#[test]
fn order_accepts_explicit_tags_and_json() {
    let workspace = workspace_with(EVENTS_SCHEMA);
    let output = mediatag(workspace.path())
        .args(["order", "--tags", "guys,girls,scene", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let ordered: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ordered, vec!["girls", "guys", "scene"]);
}

#[test]
fn deps_prints_one_line_per_tag() {
    let workspace = workspace_with(EVENTS_SCHEMA);
    mediatag(workspace.path())
        .arg("deps")
        .assert()
        .success()
        .stdout(predicate::str::contains("dance_style: action, guys, girls\n"))
        .stdout(predicate::str::contains("participants: (none)\n"))
        .stdout(predicate::str::contains("guys: participants, girls\n"));
}

#[test]
fn cycles_fail_when_the_schema_is_cyclic() {
    let workspace = workspace_with(CYCLIC_SCHEMA);
    mediatag(workspace.path())
        .arg("cycles")
        .assert()
        .failure()
        .stdout(predicate::str::contains("tag1 -> tag2 -> tag3 -> tag1"))
        .stderr(predicate::str::contains("TAG-CHECK-001"));
}

#[test]
fn cycles_succeed_on_acyclic_schema() {
    let workspace = workspace_with(EVENTS_SCHEMA);
    mediatag(workspace.path())
        .arg("cycles")
        .assert()
        .success()
        .stdout("no circular dependencies found\n");
}

#[test]
fn order_rejects_cyclic_lists() {
    let workspace = workspace_with(CYCLIC_SCHEMA);
    mediatag(workspace.path())
        .arg("order")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TAG-ORDER-001"));
}

#[test]
fn lint_exit_status_follows_error_findings() {
    let clean = workspace_with(EVENTS_SCHEMA);
    mediatag(clean.path())
        .arg("lint")
        .assert()
        .success()
        .stdout("no issues found\n");

    let cyclic = workspace_with(CYCLIC_SCHEMA);
    mediatag(cyclic.path())
        .arg("lint")
        .assert()
        .failure()
        .stdout(predicate::str::contains("[Error] TAG-LINT-001 tag1"))
        .stderr(predicate::str::contains("TAG-CHECK-002"));
}

#[test]
fn explain_marks_moved_tags() {
    let workspace = workspace_with(EVENTS_SCHEMA);
    mediatag(workspace.path())
        .arg("explain")
        .assert()
        .success()
        .stdout(predicate::str::contains("5. dance_style (moved from 1)"))
        .stdout(predicate::str::contains("   depends on: action, guys, girls"))
        .stdout(predicate::str::contains("6. scene\n"));
}

#[test]
fn dot_writes_graphviz() {
    let workspace = workspace_with(EVENTS_SCHEMA);
    mediatag(workspace.path())
        .arg("dot")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph {"))
        .stdout(predicate::str::contains("value:swing"));
}

#[test]
fn missing_schema_reports_read_error() {
    let workspace = TempDir::new().unwrap();
    mediatag(workspace.path())
        .args(["deps", "absent.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TAG-SCHEMA-001"));
}

#[test]
fn config_file_selects_schema_and_format() {
    let workspace = TempDir::new().unwrap();
    fs::create_dir_all(workspace.path().join("schemas")).unwrap();
    fs::write(workspace.path().join("schemas/tags.yaml"), EVENTS_SCHEMA).unwrap();
    fs::write(
        workspace.path().join("mediatag.toml"),
        "[schema]\npath = \"schemas/tags.yaml\"\n\n[output]\nformat = \"json\"\n",
    )
    .unwrap();

    let output = mediatag(workspace.path()).arg("deps").output().unwrap();
    assert!(output.status.success());
    let deps: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(deps["girls"], serde_json::json!(["participants"]));
}

#[test]
fn invalid_config_is_rejected() {
    let workspace = workspace_with(EVENTS_SCHEMA);
    fs::write(
        workspace.path().join("mediatag.toml"),
        "[ordering]\nmax_moves = 0\n",
    )
    .unwrap();
    mediatag(workspace.path())
        .arg("order")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CFG-002"));
}
