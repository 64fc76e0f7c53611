use std::path::PathBuf;
use std::process::Command;

use assert_cmd::prelude::*;
use serde_json::Value;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../onenote-hierarchy/tests/data")
        .join(name)
}

fn run_json(args: &[&str]) -> Value {
    let output = Command::new(env!("CARGO_BIN_EXE_onenote-hierarchy"))
        .args(args)
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("command printed valid JSON")
}

#[test]
fn info_counts_with_both_parsers() {
    let file = fixture("Notebooks.xml");
    for strategy in ["tree", "stream"] {
        let info = run_json(&[
            "info",
            file.to_str().unwrap(),
            "--format",
            "json",
            "--strategy",
            strategy,
        ]);
        assert_eq!(info["notebooks"], 4, "{strategy}");
        assert_eq!(info["section_groups"], 7, "{strategy}");
        assert_eq!(info["sections"], 20, "{strategy}");
        assert_eq!(info["pages"], 28, "{strategy}");
        assert_eq!(info["unread_pages"], 4, "{strategy}");
        assert_eq!(info["locked_sections"], 1, "{strategy}");
        assert_eq!(info["recycle_bin_items"], 7, "{strategy}");
    }
}

#[test]
fn pages_query() {
    let file = fixture("Notebooks.xml");
    let pages = run_json(&["pages", file.to_str().unwrap(), "-f", "json", "-q", "IDEA"]);
    let paths: Vec<_> = pages
        .as_array()
        .unwrap()
        .iter()
        .map(|page| page["relative_path"].as_str().unwrap())
        .collect();
    assert_eq!(
        paths,
        [
            r"Personal\Projects\Archive\Deep\Notes\Idea",
            r"Personal\Projects\Archive\Deep\Notes\Sub idea",
        ]
    );
}

#[test]
fn pages_hide_recycle_bin_by_default() {
    let file = fixture("Notebooks.xml");
    let visible = run_json(&["pages", file.to_str().unwrap(), "-f", "json"]);
    let all = run_json(&[
        "pages",
        file.to_str().unwrap(),
        "-f",
        "json",
        "--include-recycle-bin",
    ]);
    assert_eq!(visible.as_array().unwrap().len(), 25);
    assert_eq!(all.as_array().unwrap().len(), 28);
}

#[test]
fn tree_json_depth() {
    let file = fixture("OneLevel.xml");
    let tree = run_json(&["tree", file.to_str().unwrap(), "-f", "json", "--depth", "1"]);
    let travel = &tree[0];
    assert_eq!(travel["kind"], "Notebook");
    let children: Vec<_> = travel["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|child| child["name"].as_str().unwrap())
        .collect();
    assert_eq!(children, ["Packing", "Budget", "Europe", "Asia"]);
    assert!(travel["children"][2].get("children").is_none());
}

#[test]
fn missing_file_fails() {
    Command::new(env!("CARGO_BIN_EXE_onenote-hierarchy"))
        .args(["info", "no-such-file.xml"])
        .assert()
        .failure();
}

#[test]
fn malformed_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xml");
    std::fs::write(&path, "<Notebooks><Notebook>").unwrap();

    for strategy in ["tree", "stream"] {
        Command::new(env!("CARGO_BIN_EXE_onenote-hierarchy"))
            .arg("info")
            .arg(&path)
            .args(["--strategy", strategy])
            .assert()
            .failure();
    }
}
