use anyhow::Result;
use bookboard::Config;
use pretty_assertions::assert_eq;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn integration_test_failed_command_reports_once() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.toml");
    let mut config = Config::default();
    config.storage.data_dir = Some(temp_dir.path().join("board"));
    config.save_to(&config_path)?;

    let output = Command::new(env!("CARGO_BIN_EXE_bookboard"))
        .arg("--config")
        .arg(&config_path)
        .args(["delete", "E2024060109000000"])
        .env("RUST_LOG", "error")
        .output()?;

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Event 'E2024060109000000' not found").count(), 1, "stderr was {}", stderr);
    Ok(())
}
