use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the workspace root (two levels up from CARGO_MANIFEST_DIR of formdown-cli)
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent() // crates/
        .unwrap()
        .parent() // workspace root
        .unwrap()
        .to_path_buf()
}

fn formdown_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_formdown"));
    cmd.current_dir(workspace_root());
    cmd
}

#[test]
fn cli_help() {
    let output = formdown_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Markdown form preprocessor"));
}

#[test]
fn cli_version() {
    let output = formdown_bin()
        .arg("--version")
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.1.0"));
}

#[test]
fn cli_parse_single_file() {
    let output = formdown_bin()
        .args(["parse", "samples/forms/registration.md"])
        .output()
        .expect("failed to run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    let definition: serde_json::Value =
        serde_json::from_str(&stdout).expect("invalid JSON output");
    assert_eq!(definition["name"]["required"], true);
    assert_eq!(definition["name"]["specific"]["kind"], "string");
    assert_eq!(definition["name"]["specific"]["length"], 40);
    assert_eq!(definition["e_mail"]["specific"]["kind"], "email");
    assert_eq!(definition["notes"]["original_label"], "_notes");
    assert_eq!(definition["job_title"]["specific"]["kind"], "string");
    assert_eq!(definition["job_salary"]["specific"]["max"], 100000);
    assert_eq!(definition["plan"]["specific"]["collapse_on"], "~pro");
    assert_eq!(definition["coupon"]["specific"]["length"], 12);
}

#[test]
fn cli_parse_directory() {
    let output = formdown_bin()
        .args(["parse", "samples/forms"])
        .output()
        .expect("failed to run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    let reports: serde_json::Value = serde_json::from_str(&stdout).expect("invalid JSON output");
    let reports = reports.as_array().expect("expected a JSON array");
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r["fields"].is_object()));
}

#[test]
fn cli_rewrite() {
    let output = formdown_bin()
        .args(["rewrite", "samples/forms/registration.md"])
        .output()
        .expect("failed to run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("{{ form.name }}"));
    assert!(stdout.contains("{{ form.job_salary }}"));
    assert!(stdout.contains("<div id=\"accordion-pro\">"));
    assert!(stdout.contains("</div>"));
    // Declarations and section markers are gone.
    assert!(!stdout.contains("___"));
    assert!(!stdout.contains("[section"));
    // Surrounding prose is untouched.
    assert!(stdout.contains("Please fill in your details."));
}

#[test]
fn cli_duplicate_name_fails() {
    let output = formdown_bin()
        .args(["parse", "samples/invalid/duplicate.md"])
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duplicate variable name"));
}

#[test]
fn cli_missing_path_fails() {
    let output = formdown_bin()
        .args(["parse", "samples/does-not-exist.md"])
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
}
