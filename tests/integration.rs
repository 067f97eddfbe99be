use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn gdork_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("gdork");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[output]
dir = "{}/dorks"
retention_days = 30

[compiler]
duckduckgo_mode = "combined"
validate = true

[repair]
max_retries = 3

[server]
bind = "127.0.0.1:7341"
"#,
        root.display()
    );

    let config_path = config_dir.join("gdork.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_gdork(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = gdork_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run gdork binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_generate_prints_all_engines() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_gdork(
        &config_path,
        &["generate", "rural broadband", "--location", "Ohio"],
    );
    assert!(success, "generate failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("=== Google ==="));
    assert!(stdout.contains("=== Bing ==="));
    assert!(stdout.contains("=== DuckDuckGo ==="));
    assert!(stdout.contains("loc:\"Ohio\""));
    assert!(stdout.contains("Location: Ohio"));
}

#[test]
fn test_generate_reports_duckduckgo_or_error() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_gdork(&config_path, &["generate", "arts"]);
    assert!(success);
    assert!(stdout.contains("INVALID"));
    assert!(stdout.contains("DuckDuckGo has unreliable OR support"));
}

#[test]
fn test_generate_json_split_mode() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_gdork(
        &config_path,
        &[
            "generate",
            "tribal education",
            "--location",
            "Michigan, Minnesota",
            "--ddg-mode",
            "split",
            "--json",
        ],
    );
    assert!(success, "stderr={}", stderr);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["topic"], "tribal education");
    assert_eq!(report["duckduckgo_mode"], "split");
    let dorks = report["dorks"].as_array().unwrap();
    assert_eq!(dorks.len(), 3);
    for dork in dorks {
        assert_eq!(dork["validation"]["is_valid"], true, "{}", dork);
    }
    assert_eq!(dorks[2]["query"].as_array().unwrap().len(), 8);
}

#[test]
fn test_generate_without_validation_is_marked() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("gdork.toml");
    fs::write(
        &path,
        format!(
            "[output]\ndir = \"{}/dorks\"\n\n[compiler]\nvalidate = false\n",
            tmp.path().display()
        ),
    )
    .unwrap();

    let (stdout, stderr, success) = run_gdork(&path, &["generate", "arts", "--engine", "bing"]);
    assert!(success, "stderr={}", stderr);
    assert!(stdout.contains("NOT VALIDATED"), "stdout={}", stdout);
    assert!(stdout.contains("gdork validate bing"));
    assert!(!stdout.contains("  valid"));

    let (stdout, _, success) = run_gdork(&path, &["generate", "arts", "--json"]);
    assert!(success);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    for dork in report["dorks"].as_array().unwrap() {
        assert_eq!(dork["validated"], false);
    }
}

#[test]
fn test_generate_single_engine() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) =
        run_gdork(&config_path, &["generate", "arts", "--engine", "bing"]);
    assert!(success);
    assert!(stdout.contains("=== Bing ==="));
    assert!(!stdout.contains("=== Google ==="));
}

#[test]
fn test_generate_blank_topic_fails() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_gdork(&config_path, &["generate", "   "]);
    assert!(!success);
    assert!(stderr.contains("topic must not be empty"), "stderr={}", stderr);
}

#[test]
fn test_generate_save_then_list_and_cleanup() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_gdork(
        &config_path,
        &["generate", "Arts & Culture", "--save"],
    );
    assert!(success, "stderr={}", stderr);
    assert!(stdout.contains("Saved to"));

    let saved: Vec<_> = fs::read_dir(tmp.path().join("dorks"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].ends_with("_dorks_arts___culture.json"), "{:?}", saved);

    let (stdout, _, success) = run_gdork(&config_path, &["files", "list"]);
    assert!(success);
    assert!(stdout.contains("_dorks_arts___culture.json"));
    assert!(stdout.contains("1 file(s)"));

    let (stdout, _, success) = run_gdork(&config_path, &["files", "cleanup", "--days", "1"]);
    assert!(success);
    assert!(stdout.contains("Removed 0 file(s)"));
}

#[test]
fn test_validate_valid_and_invalid() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) =
        run_gdork(&config_path, &["validate", "google", "site:grants.gov"]);
    assert!(success);
    assert!(stdout.contains("valid"));

    let (stdout, _, success) =
        run_gdork(&config_path, &["validate", "google", "site: grants.gov"]);
    assert!(!success);
    assert!(stdout.contains("No space allowed after operator colon"));
}

#[test]
fn test_validate_fix_repairs_bing_intext() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_gdork(
        &config_path,
        &["validate", "bing", "intext:nonprofit \"grant\"", "--fix"],
    );
    assert!(success, "stderr={}", stderr);
    assert!(stdout.contains("inbody:nonprofit \"grant\""));
    assert!(stdout.contains("intext_to_inbody"));
}

#[test]
fn test_validate_fix_gives_up_on_structural_errors() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) =
        run_gdork(&config_path, &["validate", "google", "(grant OR funding", "--fix"]);
    assert!(!success);
    assert!(stderr.contains("Unbalanced parentheses"));
}

#[test]
fn test_unknown_engine_fails() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_gdork(&config_path, &["validate", "yahoo", "grant"]);
    assert!(!success);
    assert!(stderr.contains("unsupported engine"));
}

#[test]
fn test_rules_and_guidance() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_gdork(&config_path, &["rules", "bing"]);
    assert!(success);
    assert!(stdout.contains("inbody:"));
    assert!(stdout.contains("[no ] intext:"));

    let (stdout, _, success) = run_gdork(&config_path, &["rules", "duckduckgo", "--json"]);
    assert!(success);
    let rules: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(rules.as_array().unwrap().iter().any(|r| r["key"] == "OR" && r["supported"] == false));

    let (stdout, _, success) = run_gdork(&config_path, &["guidance", "google"]);
    assert!(success);
    assert!(stdout.starts_with("# Google dork guidance"));
}

#[test]
fn test_missing_config_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");

    let (stdout, stderr, success) = run_gdork(&missing, &["generate", "arts", "--engine", "google"]);
    assert!(success, "stderr={}", stderr);
    assert!(stdout.contains("intext:grant"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("gdork.toml");
    fs::write(&path, "[repair]\nmax_retries = 0\n").unwrap();

    let (_, stderr, success) = run_gdork(&path, &["generate", "arts"]);
    assert!(!success);
    assert!(stderr.contains("max_retries"));
}
