use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_parse_file_text_output() -> Result<()> {
    let test = CliTest::with_file(
        "body.md",
        "Thanks @alice!\n\nFixes #12, related to octo/tools#3.\n\n```\nfixes #99\n```\n",
    )?;

    let output = test.parse_command().arg("body.md").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "body.md\n  mention  @alice\n  close    #12\n  ref      octo/tools#3\n\u{2713} Parsed 1 input: 1 reference, 1 action, 1 mention\n"
    );

    Ok(())
}

#[test]
fn test_parse_multiple_files_keeps_argument_order() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("b.md", "see #2")?;
    test.write_file("a.md", "see #1")?;
    test.write_file("c.md", "nothing to see")?;

    let output = test
        .parse_command()
        .args(["b.md", "a.md", "c.md"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "b.md\n  ref      #2\na.md\n  ref      #1\nc.md\n  no references or mentions\n\u{2713} Parsed 3 inputs: 2 references, 0 actions, 0 mentions\n"
    );

    Ok(())
}

#[test]
fn test_parse_json_output() -> Result<()> {
    let test = CliTest::with_file(
        "body.md",
        "Closes [the crash](https://github.com/octo/app/issues/7)",
    )?;

    let output = test
        .parse_command()
        .args(["--format", "json", "body.md"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value[0]["source"], "body.md");
    assert_eq!(
        value[0]["result"]["fragments"],
        serde_json::json!([
            { "type": "action", "slug": "octo/app", "issue_number": 7, "action": "close" }
        ])
    );

    Ok(())
}

#[test]
fn test_parse_reads_stdin() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run_with_stdin(test.parse_command(), "resolves gh-5\n")?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "<stdin>\n  close    #5\n\u{2713} Parsed 1 input: 0 references, 1 action, 0 mentions\n"
    );

    Ok(())
}

#[test]
fn test_parse_with_title() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.parse_command();
    cmd.args(["--title", "Fix #1"]);
    let output = test.run_with_stdin(cmd, "Also mentions #2")?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "<stdin>\n  close    #1\n  ref      #2\n\u{2713} Parsed 1 input: 1 reference, 1 action, 0 mentions\n"
    );

    Ok(())
}

#[test]
fn test_parse_title_rejects_multiple_inputs() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("a.md", "")?;
    test.write_file("b.md", "")?;

    let output = test
        .parse_command()
        .args(["--title", "Fix #1", "a.md", "b.md"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--title can only be used with a single input"));

    Ok(())
}

#[test]
fn test_parse_missing_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.parse_command().arg("missing.md").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read input file"));

    Ok(())
}

#[test]
fn test_parse_uses_discovered_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".issuerefsrc.json",
        r#"{ "actions": [ { "name": "reopen", "keywords": ["reopens"] } ] }"#,
    )?;
    test.write_file("docs/body.md", "Reopens #4, fixes #5")?;

    let mut cmd = test.parse_command();
    cmd.current_dir(test.root().join("docs"));
    let output = cmd.arg("body.md").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "body.md\n  reopen   #4\n  ref      #5\n\u{2713} Parsed 1 input: 1 reference, 1 action, 0 mentions\n"
    );

    Ok(())
}

#[test]
fn test_parse_explicit_config_flag() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "settings/refs.json",
        r#"{ "actions": [ { "name": "close", "keywords": ["kills"] } ] }"#,
    )?;
    test.write_file("body.md", "kills #8, fixes #9")?;

    let output = test
        .parse_command()
        .args(["--config", "settings/refs.json", "body.md"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "body.md\n  close    #8\n  ref      #9\n\u{2713} Parsed 1 input: 1 reference, 1 action, 0 mentions\n"
    );

    Ok(())
}

#[test]
fn test_parse_invalid_config() -> Result<()> {
    let test = CliTest::with_file(
        ".issuerefsrc.json",
        r#"{ "actions": [ { "name": "close", "keywords": [] } ] }"#,
    )?;
    test.write_file("body.md", "fixes #1")?;

    let output = test.parse_command().arg("body.md").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Invalid 'actions' in config"));

    Ok(())
}

#[test]
fn test_parse_verbose_logs_to_stderr() -> Result<()> {
    let test = CliTest::with_file("body.md", "see #1")?;

    let output = test.parse_command().args(["-v", "body.md"]).output()?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("parsed input"));
    assert!(!stdout(&output).contains("parsed input"));

    Ok(())
}
