//! Integration tests for the modkit library API, run against real
//! temporary directories.

use modkit::bundle;
use modkit::cli::MigrateArgs;
use modkit::commands::cmd_migrate_with_fs;
use modkit::fs::RealFs;
use modkit::migrate::{MigrateError, Migration};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LEGACY: &str = r#"const BASE = "https://example.org";

async function searchResults(keyword) {
    const res = await fetchPage(BASE + "/search?q=" + keyword);
    return parseList(res);
}

function parseList(html) {
    return html.split("\n");
}

async function extractDetails(id) {
    return fetchPage(BASE + "/title/" + id);
}

function parseList(html) {
    return [];
}

async function fetchPage(url) {
    return fetch(url).then(r => r.text());
}
"#;

fn write_legacy(dir: &TempDir) -> std::path::PathBuf {
    let file = dir.path().join("old_module.js");
    fs::write(&file, LEGACY).unwrap();
    file
}

#[test]
fn test_full_migration_on_disk() {
    let dir = TempDir::new().unwrap();
    let file = write_legacy(&dir);

    let report = Migration::load(&RealFs, &file)
        .unwrap()
        .extract(&RealFs, dir.path())
        .unwrap();

    assert_eq!(report.migrated, 4);
    assert_eq!(report.api_count(), 2);
    assert_eq!(report.util_count(), 2);
    assert_eq!(report.skipped_duplicates, ["parseList"]);

    let src = dir.path().join("src");
    assert!(src.join("searchresults.js").is_file());
    assert!(src.join("extractdetails.js").is_file());
    assert!(src.join("utils/parselist.js").is_file());
    assert!(src.join("utils/fetchpage.js").is_file());

    // First declaration wins on the duplicate name.
    let parselist = fs::read_to_string(src.join("utils/parselist.js")).unwrap();
    assert!(parselist.contains("html.split"));
    assert!(parselist.starts_with("export function parseList"));

    let fetchpage = fs::read_to_string(src.join("utils/fetchpage.js")).unwrap();
    assert!(fetchpage.starts_with("export async function fetchPage"));

    assert_eq!(
        fs::read_to_string(src.join("index.js")).unwrap(),
        "export { searchResults } from \"./searchresults.js\";\n\
         export { extractDetails } from \"./extractdetails.js\";\n\
         export * from \"./utils/index.js\";\n"
    );
    assert_eq!(
        fs::read_to_string(src.join("utils/index.js")).unwrap(),
        "export { parseList } from \"./parselist.js\";\n\
         export { fetchPage } from \"./fetchpage.js\";\n"
    );
}

#[test]
fn test_migrated_tree_bundles() {
    let dir = TempDir::new().unwrap();
    let file = write_legacy(&dir);

    Migration::load(&RealFs, &file)
        .unwrap()
        .extract(&RealFs, dir.path())
        .unwrap();

    let bundle = bundle::bundle_project(&RealFs, dir.path()).unwrap();
    assert_eq!(
        bundle.exports,
        ["searchResults", "extractDetails", "parseList", "fetchPage"]
    );
    assert!(bundle.script.contains("Object.assign(globalThis, _);"));
    assert!(!bundle.script.contains("export "));
}

#[test]
fn test_cmd_migrate_exit_codes() {
    let dir = TempDir::new().unwrap();
    let file = write_legacy(&dir);

    let ok = cmd_migrate_with_fs(
        MigrateArgs {
            file,
            path: dir.path().to_path_buf(),
        },
        &RealFs,
    );
    assert_eq!(ok, 0);

    let missing = cmd_migrate_with_fs(
        MigrateArgs {
            file: dir.path().join("absent.js"),
            path: dir.path().to_path_buf(),
        },
        &RealFs,
    );
    assert_eq!(missing, 1);
}

#[test]
fn test_no_functions_leaves_no_src_files() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("vars_only.js");
    fs::write(&file, "const a = 1;\nlet b = a + 1;\n").unwrap();

    let err = Migration::load(&RealFs, &file)
        .unwrap()
        .extract(&RealFs, dir.path())
        .unwrap_err();
    assert!(matches!(err, MigrateError::NoFunctionsMigrated));

    // The utils directory is created up front, but no file was written.
    let entries: Vec<_> = walk_files(&dir.path().join("src"));
    assert!(entries.is_empty(), "unexpected files: {entries:?}");
}

#[test]
fn test_parse_error_is_fatal_before_any_write() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("broken.js");
    fs::write(&file, "function oops( {\n").unwrap();

    let err = Migration::load(&RealFs, &file).unwrap_err();
    assert!(matches!(err, MigrateError::Parse(_)));
    assert!(!dir.path().join("src").exists());
}

fn walk_files(root: &Path) -> Vec<std::path::PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else {
                out.push(path);
            }
        }
    }
    out
}
