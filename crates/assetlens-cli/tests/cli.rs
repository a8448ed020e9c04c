//! End-to-end tests for the `assetlens` binary.

mod common;

use common::{json, TestContext};
use predicates::prelude::*;

fn branded() -> TestContext {
    let ctx = TestContext::new();
    ctx.catalog
        .namespace_folder("Brand")
        .image_set("Brand/Logo.imageset", &[("logo.png", 100), ("logo@2x.png", 250)])
        .image_set("Brand/LogoMark.imageset", &[("mark.png", 10)])
        .color_set("Brand/Accent.colorset", ["0xFF", "0x80", "0x00"])
        .app_icon_set("AppIcon.appiconset", &[("icon.png", 64)])
        .data_set(
            "Intro.dataset",
            "intro.json",
            r#"{"v":"5.5.2","fr":30,"w":100,"h":100,"layers":[]}"#,
        );
    ctx
}

#[test]
fn tree_lists_nodes_in_natural_order() {
    let ctx = TestContext::new();
    ctx.catalog.folder("B").folder("a").folder("10").folder("2");

    let output = ctx.command().arg("tree").arg(ctx.root()).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<_> = stdout
        .lines()
        .skip(1)
        .map(|line| line.trim().split_whitespace().nth(1).unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["2", "10", "a", "B"]);
}

#[test]
fn tree_json_includes_kind_tags() {
    let ctx = branded();
    let output = ctx
        .command()
        .args(["tree", "--format", "json"])
        .arg(ctx.root())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value = json::parse_output(&output.stdout);
    assert_eq!(json::child_names(&value["tree"]), vec!["AppIcon", "Brand", "Intro"]);
    assert_eq!(value["tree"]["children"][0]["kind"], "app-icon-set");
    assert_eq!(value["tree"]["children"][1]["provides_namespace"], true);
    assert_eq!(value["diagnostics"], serde_json::json!([]));
}

#[test]
fn show_prints_asset_details() {
    let ctx = branded();
    ctx.command()
        .arg("show")
        .arg(ctx.root())
        .arg("Brand/Logo")
        .assert()
        .success()
        .stdout(predicate::str::contains("resource: Brand/Logo"))
        .stdout(predicate::str::contains("size: 350 B"))
        .stdout(predicate::str::contains("logo@2x.png  2x universal"));
}

#[test]
fn show_color_as_hex() {
    let ctx = branded();
    ctx.command()
        .arg("show")
        .arg(ctx.root())
        .arg("Brand/Accent")
        .assert()
        .success()
        .stdout(predicate::str::contains("srgb #FF8000"));
}

#[test]
fn show_missing_asset_exits_with_not_found() {
    let ctx = branded();
    ctx.command()
        .arg("show")
        .arg(ctx.root())
        .arg("Logo")
        .assert()
        .code(6)
        .stderr(predicate::str::contains("error[E005]: asset not found: Logo"))
        .stderr(predicate::str::contains("  - Brand/Logo"));
}

#[test]
fn missing_catalog_exits_with_3() {
    let ctx = TestContext::new();
    ctx.command()
        .arg("tree")
        .arg(ctx.catalog.path("Nope.xcassets"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("error[E003]"));
}

#[test]
fn diagnostics_go_to_stderr() {
    let ctx = TestContext::new();
    ctx.catalog.folder("Icon.appiconset").folder("Plain");

    ctx.command()
        .arg("tree")
        .arg(ctx.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Plain"))
        .stdout(predicate::str::contains("Icon").not())
        .stderr(predicate::str::contains("warning:"))
        .stderr(predicate::str::contains("[manifest-missing]"));
}

#[test]
fn quiet_hides_diagnostics() {
    let ctx = TestContext::new();
    ctx.catalog.folder("Icon.appiconset");

    ctx.command()
        .args(["-q", "tree"])
        .arg(ctx.root())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn project_config_can_hide_diagnostics() {
    let ctx = TestContext::new().with_project_config("output:\n  show_diagnostics: false\n");
    ctx.catalog.folder("Icon.appiconset");

    ctx.command()
        .arg("tree")
        .arg(ctx.root())
        .assert()
        .success()
        .stderr(predicate::str::contains("manifest-missing").not());
}

#[test]
fn explicit_config_limits_depth() {
    let ctx = TestContext::new();
    ctx.catalog.folder("A/B/C");
    let config = ctx.config_file("parser:\n  max_depth: 1\n");

    let output = ctx
        .command()
        .arg("--config")
        .arg(&config)
        .args(["list", "--format", "json"])
        .arg(ctx.root())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value = json::parse_output(&output.stdout);
    let paths: Vec<_> = value["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["logical_path"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(paths, vec!["A", "A/B"]);
}

#[test]
fn invalid_config_exits_with_2() {
    let ctx = TestContext::new().with_project_config("parser:\n  max_concurrency: 0\n");
    ctx.command()
        .arg("tree")
        .arg(ctx.root())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("max_concurrency"));
}

#[test]
fn filter_keeps_matching_branches() {
    let ctx = branded();
    ctx.command()
        .arg("filter")
        .arg(ctx.root())
        .arg("mark")
        .assert()
        .success()
        .stdout(predicate::str::contains("Brand"))
        .stdout(predicate::str::contains("LogoMark"))
        .stdout(predicate::str::contains("AppIcon").not())
        .stdout(predicate::str::contains("Accent").not());
}

#[test]
fn list_filters_by_kind() {
    let ctx = branded();
    let output = ctx
        .command()
        .args(["list", "--kind", "image", "--format", "json"])
        .arg(ctx.root())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value = json::parse_output(&output.stdout);
    let nodes = value["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0]["logical_path"], "Brand/Logo");
    assert_eq!(nodes[0]["size"], 350);
    assert_eq!(nodes[1]["resource_name"], "Brand/LogoMark");
}

#[test]
fn stats_summarizes_catalog() {
    let ctx = branded();
    let output = ctx
        .command()
        .args(["stats", "--format", "json"])
        .arg(ctx.root())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value = json::parse_output(&output.stdout);
    let summary = &value["summary"];
    assert_eq!(summary["folders"], 1);
    assert_eq!(summary["image_sets"], 2);
    assert_eq!(summary["app_icon_sets"], 1);
    assert_eq!(summary["color_sets"], 1);
    assert_eq!(summary["data_sets"], 1);
    assert_eq!(summary["total_size"], 100 + 250 + 10 + 64 + 49);
}

#[test]
fn stats_text_output() {
    let ctx = branded();
    ctx.command()
        .arg("stats")
        .arg(ctx.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("image sets      2"))
        .stdout(predicate::str::contains("diagnostics     0"));
}

#[test]
fn completions_are_generated() {
    let ctx = TestContext::new();
    ctx.command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("assetlens"));
}

#[test]
fn init_writes_project_config() {
    let ctx = TestContext::new();
    ctx.command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let written = ctx.work_dir.path().join(".assetlens/config.yaml");
    let yaml = std::fs::read_to_string(&written).unwrap();
    assert!(yaml.contains("max_depth: 10"));

    ctx.command()
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    ctx.command()
        .args(["init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Replaced"));
}

#[test]
fn variant_outside_catalog_is_not_shown() {
    let ctx = TestContext::new();
    std::fs::write(ctx.catalog.outside().join("secret.txt"), "secret").unwrap();
    ctx.catalog.raw_manifest(
        "Leak.dataset",
        r#"{"data": [{"filename": "../../secret.txt"}]}"#,
    );

    ctx.command()
        .arg("show")
        .arg(ctx.root())
        .arg("Leak")
        .assert()
        .success()
        .stdout(predicate::str::contains("size: 0 B"))
        .stdout(predicate::str::contains("text,").not());
}
