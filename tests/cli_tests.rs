mod common;

use common::{run_maqal, TestEnv};

#[test]
fn maqal_help_shows_usage() {
    let output = run_maqal(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("process"));
}

#[test]
fn maqal_version_shows_version() {
    let output = run_maqal(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--version should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("maqal "));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_maqal(&["completions", "bash"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(
        stdout.contains("maqal"),
        "expected completion output to reference command name\nstdout:\n{}",
        stdout
    );
}

#[test]
fn completions_ignore_broken_config() {
    let env = TestEnv::new();
    env.write_config("[llm\nthis is not toml");

    let output = env.run(&["completions", "zsh"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions should not read the config file\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("maqal"));

    let show = env.run(&["config", "show"]);
    assert!(!show.status.success());
}

#[test]
fn config_show_works() {
    let output = run_maqal(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config show should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("[general]"));
    assert!(stdout.contains("output_dir"));
    assert!(stdout.contains("[llm]"));
}

#[test]
fn config_path_returns_valid_path() {
    let output = run_maqal(&["config", "path"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config path should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let env = TestEnv::new();

    let first = env.run(&["config", "init"]);
    assert!(
        first.status.success(),
        "config init should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&first.stderr)
    );
    assert!(env.config_path().exists());

    let second = env.run(&["config", "init"]);
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("--force"));

    let forced = env.run(&["config", "init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn config_values_are_loaded() {
    let env = TestEnv::new();
    env.write_config("[llm]\nmodel = \"gemini-custom\"\napi_key = \"hidden-value\"\n");

    let output = env.run(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("gemini-custom"));
    assert!(!stdout.contains("hidden-value"));
}
