use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    let actions = parsed
        .get("actions")
        .and_then(Value::as_array)
        .context("Config should have an 'actions' array")?;
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0]["name"], "close");
    assert_eq!(
        actions[0]["keywords"].as_array().map(Vec::len),
        Some(9),
        "Default close action should list every keyword spelling"
    );

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "\u{2713} Created .issuerefsrc.json\n");
    assert!(test.root().join(".issuerefsrc.json").exists());

    let content = test.read_file(".issuerefsrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".issuerefsrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: .issuerefsrc.json already exists\n");
    assert_eq!(test.read_file(".issuerefsrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("body.md", "Resolved #3")?;

    let output = test.parse_command().arg("body.md").output()?;
    assert!(
        output.status.success(),
        "Parse command should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("close    #3"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage: issue-refs"));

    Ok(())
}
