mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn caliper() -> Command {
    assert_cmd::cargo_bin_cmd!("caliper")
}

// --- compare subcommand ---

#[test]
fn compare_produces_overview_and_packages() {
    let p = common::StatsPair::new();
    caliper()
        .args(["compare", "--no-cache"])
        .arg(&p.old)
        .arg(&p.new)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overview:"))
        .stdout(predicate::str::contains("lodash"))
        .stdout(predicate::str::contains("@scope/newpkg"));
}

#[test]
fn compare_lists_changed_modules() {
    let p = common::StatsPair::new();
    caliper()
        .args(["compare", "--no-cache"])
        .arg(&p.old)
        .arg(&p.new)
        .assert()
        .success()
        .stdout(predicate::str::contains("./src/legacy.js"))
        .stdout(predicate::str::contains("./src/fresh.js"));
}

#[test]
fn compare_json_produces_valid_json() {
    let p = common::StatsPair::new();
    let output = caliper()
        .args(["compare", "--json", "--no-cache"])
        .arg(&p.old)
        .arg(&p.new)
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(v["overview"]["total_chunk_size_bytes"]["delta"].is_number());
    assert!(v["overview"]["tree_shakable_percent"]["to"].is_number());
    assert!(v["suggestions"].is_array());
    assert!(v["packages"].is_array());
    assert!(v["modules"].is_array());
}

#[test]
fn compare_json_package_statuses() {
    let p = common::StatsPair::new();
    let output = caliper()
        .args(["compare", "--json", "--no-cache"])
        .arg(&p.old)
        .arg(&p.new)
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let packages = v["packages"].as_array().unwrap();
    let status_of = |name: &str| {
        packages
            .iter()
            .find(|p| p["name"] == name)
            .map(|p| p["status"].as_str().unwrap().to_string())
            .unwrap()
    };
    assert_eq!(status_of("@scope/newpkg"), "added");
    assert_eq!(status_of("lodash"), "changed");
}

#[test]
fn compare_emits_suggestions() {
    let p = common::StatsPair::new();
    // Fixture: node modules grew, the entry chunk is the majority, and
    // only half the packages are tree shakable.
    caliper()
        .args(["compare", "--no-cache"])
        .arg(&p.old)
        .arg(&p.new)
        .assert()
        .success()
        .stdout(predicate::str::contains("node modules grew"))
        .stdout(predicate::str::contains("majority"))
        .stdout(predicate::str::contains("tree shaken"));
}

#[test]
fn compare_top_zero_hides_module_list() {
    let p = common::StatsPair::new();
    let output = caliper()
        .args(["compare", "--top", "0", "--no-cache"])
        .arg(&p.old)
        .arg(&p.new)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Modules by size change"));
}

#[test]
fn compare_chunk_filter_narrows_packages() {
    let p = common::StatsPair::new();
    let output = caliper()
        .args(["compare", "--chunk", "0", "--json", "--no-cache"])
        .arg(&p.old)
        .arg(&p.new)
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // The node modules all live in chunk 1.
    assert_eq!(v["overview"]["package_count"]["to"], 0);
}

// --- overview subcommand ---

#[test]
fn overview_prints_metrics() {
    let p = common::StatsPair::new();
    caliper()
        .args(["overview", "--no-cache"])
        .arg(&p.new)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total chunk size"))
        .stdout(predicate::str::contains("Tree shakable"));
}

#[test]
fn overview_json_schema() {
    let p = common::StatsPair::new();
    let output = caliper()
        .args(["overview", "--json", "--no-cache"])
        .arg(&p.new)
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["chunk_count"], 2);
    assert_eq!(v["total_chunk_size_bytes"], 406_000);
    assert_eq!(v["entry_chunk_size_bytes"], 280_000);
    assert_eq!(v["module_count"], 6);
    assert_eq!(v["package_count"], 2);
    assert!((v["tree_shakable_percent"].as_f64().unwrap() - 0.5).abs() < 1e-9);
}

#[test]
fn overview_of_empty_document_reports_na_average() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    std::fs::write(&path, "{}").unwrap();
    caliper()
        .args(["overview", "--no-cache"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("n/a"));
}

// --- packages subcommand ---

#[test]
fn packages_lists_import_kinds() {
    let p = common::StatsPair::new();
    caliper()
        .args(["packages", "--no-cache"])
        .arg(&p.new)
        .assert()
        .success()
        .stdout(predicate::str::contains("lodash"))
        .stdout(predicate::str::contains("cjs"))
        .stdout(predicate::str::contains("esm"));
}

#[test]
fn packages_json_schema() {
    let p = common::StatsPair::new();
    let output = caliper()
        .args(["packages", "--json", "--no-cache"])
        .arg(&p.new)
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["package_count"], 2);
    let pkg = &v["packages"][0];
    assert!(pkg["name"].is_string());
    assert!(pkg["total_size_bytes"].is_number());
    assert!(pkg["module_count"].is_number());
    assert!(pkg["import_kinds"].is_string());
}

// --- graph subcommand ---

#[test]
fn graph_expands_importers() {
    let p = common::StatsPair::new();
    caliper()
        .args(["graph", "--focus", "./src/util.js", "--no-cache"])
        .arg(&p.old)
        .arg(&p.new)
        .assert()
        .success()
        .stdout(predicate::str::contains("entry point"))
        .stdout(predicate::str::contains("./src/app.js"))
        .stdout(predicate::str::contains("./src/index.js"));
}

#[test]
fn graph_json_schema() {
    let p = common::StatsPair::new();
    let output = caliper()
        .args(["graph", "--focus", "./src/util.js", "--json", "--no-cache"])
        .arg(&p.old)
        .arg(&p.new)
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(v["nodes"].is_array());
    assert!(v["edges"].is_array());
    assert_eq!(v["entries"].as_array().unwrap().len(), 1);
    let node = &v["nodes"][0];
    assert!(node["id"].is_string());
    assert!(node["depth"].is_number());
    assert!(node["area"].is_number());
}

#[test]
fn graph_max_depth_limits_nodes() {
    let p = common::StatsPair::new();
    let output = caliper()
        .args([
            "graph",
            "--focus",
            "./src/util.js",
            "--max-depth",
            "1",
            "--json",
            "--no-cache",
        ])
        .arg(&p.old)
        .arg(&p.new)
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    for node in v["nodes"].as_array().unwrap() {
        assert!(node["depth"].as_u64().unwrap() <= 1);
    }
}

#[test]
fn graph_unknown_focus_fails_with_hint() {
    let p = common::StatsPair::new();
    caliper()
        .args(["graph", "--focus", "./src/nope.js", "--no-cache"])
        .arg(&p.old)
        .arg(&p.new)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found in the comparison"))
        .stderr(predicate::str::contains("hint:"));
}

// --- loading ---

#[test]
fn gzipped_stats_are_accepted() {
    use std::io::Write;

    let p = common::StatsPair::new();
    let gz = p.root().join("old.json.gz");
    let file = std::fs::File::create(&gz).unwrap();
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::fast());
    encoder.write_all(common::OLD_STATS.as_bytes()).unwrap();
    encoder.finish().unwrap();

    caliper()
        .args(["overview", "--no-cache"])
        .arg(&gz)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total chunk size"));
}

#[test]
fn sidecar_cache_is_written_and_reused() {
    let p = common::StatsPair::new();
    caliper()
        .args(["overview"])
        .arg(&p.old)
        .assert()
        .success();
    assert!(p.root().join("old.json.cache").exists());

    // Second run is served from the sidecar.
    caliper()
        .args(["overview"])
        .arg(&p.old)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total chunk size"));
}

#[test]
fn missing_stats_file_fails() {
    caliper()
        .args(["overview", "/nonexistent/stats.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read stats file"));
}

#[test]
fn malformed_stats_file_fails_with_hint() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "not json at all").unwrap();
    caliper()
        .args(["overview", "--no-cache"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid stats file"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn missing_top_level_arrays_behave_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sparse.json");
    std::fs::write(&path, r#"{"hash": "abc"}"#).unwrap();
    let output = caliper()
        .args(["overview", "--json", "--no-cache"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["module_count"], 0);
    assert_eq!(v["total_chunk_size_bytes"], 0);
    assert_eq!(v["tree_shakable_percent"], 1.0);
}
