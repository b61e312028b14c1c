//! Bundle a structured module's `src/` tree into one self-registering script.
//!
//! The entry point is `src/index.js`. Aggregator re-export lines (the exact
//! shape the migration synthesizes) are followed and flattened; every other
//! line is inlined with its `export ` marker stripped. The result is wrapped
//! so all exports land on `globalThis`, the flat surface the host app loads.

use crate::fs::FileSystem;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("Missing required src/ directory")]
    MissingSrc,
    #[error("Missing src/index.js entry point")]
    MissingEntry,
    #[error("Project must contain exactly one lowercase *.json file (e.g. source.json), found {0}")]
    DescriptorCount(usize),
    #[error("Cannot resolve re-export \"{0}\"")]
    Unresolved(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A finished bundle: the wrapped script plus the names it registers.
#[derive(Debug)]
pub struct Bundle {
    pub script: String,
    pub exports: Vec<String>,
}

enum ReExport {
    Named(Vec<String>, String),
    All(String),
}

/// Bundle the project at `root` into a single script.
pub fn bundle_project(fs: &dyn FileSystem, root: &Path) -> Result<Bundle, BundleError> {
    let src = root.join("src");
    if !fs.is_dir(&src) {
        return Err(BundleError::MissingSrc);
    }
    if !fs.exists(&src.join("index.js")) {
        return Err(BundleError::MissingEntry);
    }

    let mut seen = HashSet::new();
    let mut body = Vec::new();
    let mut exports = Vec::new();
    inline_file(fs, &src, "index.js", &mut body, &mut exports, &mut seen)?;

    let script = wrap_global(&body.join("\n"), &exports);
    Ok(Bundle { script, exports })
}

/// Find the module descriptor file name: exactly one lowercase `*.json`
/// directly inside the project root.
pub fn find_descriptor(fs: &dyn FileSystem, root: &Path) -> Result<String, BundleError> {
    let mut names: Vec<String> = fs
        .read_dir_files(root)?
        .into_iter()
        .filter(|n| is_descriptor_name(n))
        .collect();
    if names.len() != 1 {
        return Err(BundleError::DescriptorCount(names.len()));
    }
    Ok(names.remove(0))
}

fn is_descriptor_name(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(".json") else {
        return false;
    };
    !stem.is_empty()
        && stem
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

fn inline_file(
    fs: &dyn FileSystem,
    dir: &Path,
    rel: &str,
    body: &mut Vec<String>,
    exports: &mut Vec<String>,
    seen: &mut HashSet<PathBuf>,
) -> Result<(), BundleError> {
    let path = dir.join(rel.trim_start_matches("./"));
    if !seen.insert(path.clone()) {
        return Ok(());
    }

    let text = fs
        .read_to_string(&path)
        .map_err(|_| BundleError::Unresolved(rel.to_string()))?;
    let parent = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.to_path_buf());

    for line in text.lines() {
        match parse_reexport(line) {
            Some(ReExport::Named(names, target)) => {
                inline_file(fs, &parent, &target, body, exports, seen)?;
                for name in names {
                    if !exports.contains(&name) {
                        exports.push(name);
                    }
                }
            }
            Some(ReExport::All(target)) => {
                inline_file(fs, &parent, &target, body, exports, seen)?;
            }
            None => {
                let stripped = line.strip_prefix("export ").unwrap_or(line);
                if !stripped.trim().is_empty() {
                    body.push(stripped.trim_end().to_string());
                }
            }
        }
    }
    Ok(())
}

/// Recognize `export { A, B } from "./x.js";` and `export * from "./x.js";`.
fn parse_reexport(line: &str) -> Option<ReExport> {
    let rest = line.trim().strip_prefix("export")?.trim_start();

    if let Some(rest) = rest.strip_prefix('*') {
        return Some(ReExport::All(from_path(rest)?));
    }

    let rest = rest.strip_prefix('{')?;
    let (names, rest) = rest.split_once('}')?;
    let path = from_path(rest)?;
    let names: Vec<String> = names
        .split(',')
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    Some(ReExport::Named(names, path))
}

fn from_path(rest: &str) -> Option<String> {
    let rest = rest.trim_start().strip_prefix("from")?.trim_start();
    let rest = rest
        .strip_prefix('"')
        .or_else(|| rest.strip_prefix('\''))?;
    let (path, _) = rest.split_once('"').or_else(|| rest.split_once('\''))?;
    Some(path.to_string())
}

fn wrap_global(body: &str, exports: &[String]) -> String {
    format!(
        "const _ = (() => {{\n{body}\nreturn {{ {} }};\n}})();\nObject.assign(globalThis, _);\n",
        exports.join(", ")
    )
}
