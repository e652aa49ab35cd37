//! Exit-code and one-shot output checks against the built binary.

use std::process::Command;

#[test]
fn no_arguments_exits_nonzero_with_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_demma"))
        .output()
        .expect("run binary");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No report bundle specified"));
    assert!(stderr.contains("Usage examples"));
}

#[test]
fn sample_json_mode_exits_zero_with_report() {
    let output = Command::new(env!("CARGO_BIN_EXE_demma"))
        .args(["--sample", "--json"])
        .output()
        .expect("run binary");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("classification_report"));
    assert!(stdout.contains("insights_markdown"));
}
