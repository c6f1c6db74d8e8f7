// ABOUTME: Integration tests for the CLI application
// ABOUTME: Runs the built binary against temporary template directories

use std::fs;
use std::process::Command;

mod common;
use common::TemplateDirBuilder;

fn routeview() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_routeview"));
    command.env_remove("RUST_LOG");
    command
}

#[test]
fn test_cli_help_command() {
    let output = routeview()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("render"));
    assert!(stdout.contains("serve"));
}

#[test]
fn test_cli_version_command() {
    let output = routeview()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(routeview::VERSION));
}

#[test]
fn test_cli_render_with_variables() {
    let dir = TemplateDirBuilder::new()
        .with_template("greet.hbs", "Hello, {{name}} from {{place}}!")
        .build();

    let output = routeview()
        .arg("render")
        .arg("greet.hbs")
        .args(["--templates", dir.path().to_str().unwrap()])
        .args(["--var", "name=Ada", "--var", "place=London"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Hello, Ada from London!"
    );
}

#[test]
fn test_cli_render_with_tera() {
    let dir = TemplateDirBuilder::new()
        .with_template("greet.txt", "{{ name | upper }}")
        .build();

    let output = routeview()
        .args(["render", "greet.txt", "--engine", "tera", "--var", "name=ada"])
        .args(["--templates", dir.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "ADA");
}

#[test]
fn test_cli_render_unknown_template() {
    let dir = TemplateDirBuilder::new()
        .with_template("greet.hbs", "Hello")
        .build();

    let output = routeview()
        .args(["render", "missing.hbs"])
        .args(["--templates", dir.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.hbs"));
}

#[test]
fn test_cli_render_strict_missing_variable() {
    let dir = TemplateDirBuilder::new()
        .with_template("greet.hbs", "Hello, {{name}}!")
        .build();

    let output = routeview()
        .args(["render", "greet.hbs", "--strict"])
        .args(["--templates", dir.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn test_cli_check_lists_templates() {
    let dir = TemplateDirBuilder::new()
        .with_template("a.hbs", "A")
        .with_template("nested/b.hbs", "B")
        .build();

    let output = routeview()
        .args(["check", "--templates", dir.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 handlebars templates OK"));
    assert!(stdout.contains("nested/b.hbs"));
}

#[test]
fn test_cli_check_reports_broken_template() {
    let dir = TemplateDirBuilder::new()
        .with_template("broken.hbs", "{{#if x}}never closed")
        .build();

    let output = routeview()
        .args(["check", "--templates", dir.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("broken.hbs"));
}

#[test]
fn test_cli_config_file() {
    let dir = TemplateDirBuilder::new()
        .with_template("site.tera", "{{ site }}")
        .build();

    let config_path = dir.parent().join("routeview.yaml");
    let config = format!(
        "templates:\n  directory: {}\n  engine: tera\ntemplate_vars:\n  site: example.org\n",
        dir.path().display()
    );
    fs::write(&config_path, config).unwrap();

    let output = routeview()
        .args(["--config", config_path.to_str().unwrap(), "render", "site.tera"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "example.org");
}
