//! 命令行集成测试
//!
//! 只覆盖无需访问网络的命令路径

use std::path::Path;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

const TRANSLATOR_ENV: &[&str] = &[
    "AI_TRANSLATOR_LOG_LEVEL",
    "AI_TRANSLATOR_SETTINGS",
    "AI_TRANSLATOR_PROVIDER",
    "AI_TRANSLATOR_API_KEY",
    "GEMINI_API_KEY",
    "AI_TRANSLATOR_MODEL",
    "AI_TRANSLATOR_TARGET_LANG",
    "AI_TRANSLATOR_OLLAMA_HOST",
    "AI_TRANSLATOR_OLLAMA_MODEL",
];

/// 在临时目录中运行，不受外部环境变量和 .env 文件影响
fn cli(workdir: &Path) -> Command {
    let mut command = Command::cargo_bin("ai-translator").unwrap();
    command.current_dir(workdir);
    for name in TRANSLATOR_ENV {
        command.env_remove(name);
    }
    command
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_languages_lists_targets_and_presets() {
    let dir = TempDir::new().unwrap();
    let output = cli(dir.path()).arg("languages").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("zh-CN"));
    assert!(stdout.contains("简体中文"));
    assert!(stdout.contains("gemini-2.5-flash"));
}

#[test]
fn test_config_show_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.toml");

    let output = cli(dir.path())
        .args(["config", "show", "--settings"])
        .arg(&settings)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["provider"], "gemini");
    assert_eq!(json["targetLanguage"], "zh-CN");
    assert_eq!(json["apiKey"], "");
    assert!(!settings.exists(), "reading settings never creates the file");
}

#[test]
fn test_config_set_persists_and_masks_key() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("nested").join("settings.toml");

    let output = cli(dir.path())
        .args(["--settings"])
        .arg(&settings)
        .args([
            "config",
            "set",
            "--api-key",
            "  AIzaSecretValue  ",
            "--target-language",
            "ja",
            "--ollama-host",
            "http://localhost:11434///",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(settings.exists());

    let output = cli(dir.path())
        .args(["config", "show", "--settings"])
        .arg(&settings)
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["apiKey"], "AIza****");
    assert_eq!(json["targetLanguage"], "ja");
    assert_eq!(json["languageName"], "Japanese");
    assert_eq!(json["ollamaHost"], "http://localhost:11434");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("SecretValue"));
}

#[test]
fn test_env_override_wins_over_settings_file() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.toml");

    cli(dir.path())
        .args(["config", "set", "--target-language", "fr", "--settings"])
        .arg(&settings)
        .assert()
        .success();

    let output = cli(dir.path())
        .env("AI_TRANSLATOR_TARGET_LANG", "de")
        .args(["config", "show", "--settings"])
        .arg(&settings)
        .output()
        .unwrap();

    assert_eq!(stdout_json(&output)["targetLanguage"], "de");
}

#[test]
fn test_empty_text_input_fails() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.toml");

    let output = cli(dir.path())
        .args(["text", "-", "--settings"])
        .arg(&settings)
        .write_stdin("   \n")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "No text to translate");
}

#[test]
fn test_html_without_paragraphs_fails() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.toml");
    let input = dir.path().join("mail.html");
    std::fs::write(&input, "<p>  </p><img src=\"a.png\">").unwrap();

    let output = cli(dir.path())
        .arg("html")
        .arg(&input)
        .arg("--settings")
        .arg(&settings)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["error"], "No translatable paragraphs found");
}

#[test]
fn test_missing_input_file_reports_error() {
    let dir = TempDir::new().unwrap();

    let output = cli(dir.path())
        .args(["text", "does-not-exist.txt", "--settings"])
        .arg(dir.path().join("settings.toml"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does-not-exist.txt"));
}
