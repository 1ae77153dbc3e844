use std::fs;
use std::path::Path;
use std::process::Command;

fn scout(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_scout"))
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

fn write_fixture_repo(dir: &Path) {
    fs::write(
        dir.join("simple.py"),
        "def first():\n    return 1\n\ndef second():\n    return 2\n",
    )
    .unwrap();
    fs::write(dir.join("main.py"), "import simple\n\ndef run():\n    return simple.first()\n")
        .unwrap();
}

#[test]
fn deps_reports_single_edge_between_main_and_simple() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_repo(dir.path());

    let output = scout(dir.path(), &["deps", "--format", "json"]);
    assert!(
        output.status.success(),
        "scout deps failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["totalModules"], 2);
    assert_eq!(report["circularDependencies"], 0);
    // main.py has no dependents, so it is the only leaf
    assert_eq!(report["leafModulesCount"], 1);
}

#[test]
fn deps_reports_an_explicit_cycle() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "import b\n").unwrap();
    fs::write(dir.path().join("b.py"), "import a\n").unwrap();

    let output = scout(dir.path(), &["deps", "--format", "json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["circularDependencies"], 1);
    let chain = report["circularDependencyChains"][0].as_array().unwrap();
    let members: Vec<&str> = chain.iter().filter_map(|v| v.as_str()).collect();
    assert!(members.contains(&"a.py"));
    assert!(members.contains(&"b.py"));
}

#[test]
fn complexity_classifies_simple_functions() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_repo(dir.path());

    let output = scout(dir.path(), &["complexity", "--format", "json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["totalFiles"], 2);
    let simple = report["simpleFiles"].as_array().unwrap();
    assert_eq!(simple.len(), 2);
    assert!(report["highRiskFiles"].as_array().unwrap().is_empty());
}

#[test]
fn entry_suggests_matching_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_repo(dir.path());

    let output = scout(dir.path(), &["entry", "simple helper", "--format", "json"]);
    assert!(output.status.success());

    let suggestions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let first = &suggestions[0];
    assert_eq!(first["file"], "simple.py");
}

#[test]
fn reports_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_repo(dir.path());

    let first = scout(dir.path(), &["core"]);
    let second = scout(dir.path(), &["core"]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn invalid_config_file_is_a_clean_error() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_repo(dir.path());
    fs::write(dir.path().join("broken.toml"), "[analysis\ncore_modules = 5\n").unwrap();

    let output = scout(dir.path(), &["--config", "broken.toml", "core"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loading config"), "stderr: {stderr}");
}

#[test]
fn history_requires_a_git_repository() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_repo(dir.path());

    let output = scout(dir.path(), &["history"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not a git repository"));
}
