//! Legacy module migration.
//!
//! Splits a single-file legacy script into a `src/` tree: one exported file
//! per top-level function, API entry points at the module root, helpers under
//! `src/utils/`, plus synthesized index aggregators re-exporting everything.

use crate::fs::FileSystem;
use crate::parser::{self, ParseError, TopLevel};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The six entry points a content module exposes to the host app.
/// Case-sensitive; anything else is routed to utils.
pub const API_FUNCTIONS: [&str; 6] = [
    "searchResults",
    "extractDetails",
    "extractEpisodes",
    "extractStreamUrl",
    "extractChapters",
    "extractImages",
];

/// Extension used for every emitted script file.
pub const SCRIPT_EXT: &str = "js";

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to parse JS")]
    Parse(#[source] ParseError),
    #[error("No functions migrated")]
    NoFunctionsMigrated,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ParseError> for MigrateError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

/// Names claimed by extracted functions, split by destination role.
///
/// A name lives in at most one side; insertion order is preserved and drives
/// the synthesis order of the index files.
#[derive(Debug, Default)]
pub struct Registry {
    api: Vec<String>,
    utils: Vec<String>,
}

impl Registry {
    pub fn contains(&self, name: &str) -> bool {
        self.api.iter().any(|n| n == name) || self.utils.iter().any(|n| n == name)
    }

    pub fn api(&self) -> &[String] {
        &self.api
    }

    pub fn utils(&self) -> &[String] {
        &self.utils
    }
}

/// Outcome of a migration run, consumed by the command layer for reporting.
#[derive(Debug)]
pub struct MigrateReport {
    /// Number of declarations extracted into their own files.
    pub migrated: usize,
    /// Final registry state; drives the index files.
    pub registry: Registry,
    /// Names dropped because an earlier declaration already claimed them.
    pub skipped_duplicates: Vec<String>,
}

impl MigrateReport {
    pub fn api_count(&self) -> usize {
        self.registry.api().len()
    }

    pub fn util_count(&self) -> usize {
        self.registry.utils().len()
    }
}

/// A loaded and parsed legacy script, ready for extraction.
#[derive(Debug)]
pub struct Migration {
    source: String,
    body: Vec<TopLevel>,
}

impl Migration {
    /// Read the legacy script at `file` and parse it as a plain script body.
    /// No filesystem writes happen here.
    pub fn load(fs: &dyn FileSystem, file: &Path) -> Result<Self, MigrateError> {
        if !fs.exists(file) {
            return Err(MigrateError::NotFound(file.to_path_buf()));
        }
        let source = fs.read_to_string(file)?;
        Self::from_source(source)
    }

    /// Parse an in-memory script without touching the filesystem.
    pub fn from_source(source: impl Into<String>) -> Result<Self, MigrateError> {
        let source = source.into();
        let body = parser::parse_script(&source)?;
        Ok(Self { source, body })
    }

    /// Extract every accepted top-level function into its own exported file
    /// under `project/src/`, then synthesize the index aggregators.
    ///
    /// Walk order follows the source top-to-bottom; on a name collision the
    /// first declaration wins and the later one is recorded as skipped.
    /// Fails with [`MigrateError::NoFunctionsMigrated`] when nothing was
    /// extracted; files written before that point are not rolled back.
    pub fn extract(
        &self,
        fs: &dyn FileSystem,
        project: &Path,
    ) -> Result<MigrateReport, MigrateError> {
        let src_dir = project.join("src");
        let util_dir = src_dir.join("utils");

        // Created up front, even if no utility ends up in it.
        fs.create_dir_all(&util_dir)?;

        let mut registry = Registry::default();
        let mut skipped_duplicates = Vec::new();
        let mut migrated = 0;

        for node in &self.body {
            let TopLevel::Function(decl) = node else {
                continue;
            };
            let Some(name) = decl.name.as_deref() else {
                continue;
            };

            if registry.contains(name) {
                skipped_duplicates.push(name.to_string());
                continue;
            }

            let raw = &self.source[decl.start..decl.end];
            let exported = rewrite_exported(raw, decl.is_async);

            let is_api = API_FUNCTIONS.contains(&name);
            let out_dir = if is_api { &src_dir } else { &util_dir };
            let out_path = out_dir.join(format!("{}.{SCRIPT_EXT}", name.to_lowercase()));
            fs.write(&out_path, &format!("{exported}\n"))?;

            if is_api {
                registry.api.push(name.to_string());
            } else {
                registry.utils.push(name.to_string());
            }
            migrated += 1;
        }

        if migrated == 0 {
            return Err(MigrateError::NoFunctionsMigrated);
        }

        if !registry.utils.is_empty() {
            fs.write(
                &util_dir.join(format!("index.{SCRIPT_EXT}")),
                &utils_index(registry.utils()),
            )?;
        }
        fs.write(
            &src_dir.join(format!("index.{SCRIPT_EXT}")),
            &module_index(registry.api(), !registry.utils.is_empty()),
        )?;

        Ok(MigrateReport {
            migrated,
            registry,
            skipped_duplicates,
        })
    }
}

/// Prefix a declaration slice with the export keyword.
///
/// The slice begins with either `async` or `function`, so only the first
/// keyword is touched; the rest of the declaration, body included, is
/// preserved byte-for-byte.
fn rewrite_exported(raw: &str, is_async: bool) -> String {
    if is_async {
        raw.replacen("async", "export async", 1)
    } else {
        raw.replacen("function", "export function", 1)
    }
}

fn export_line(name: &str) -> String {
    format!(
        "export {{ {name} }} from \"./{}.{SCRIPT_EXT}\";",
        name.to_lowercase()
    )
}

/// Aggregator body for `src/utils/index.js`: one re-export per utility, in
/// extraction order, with a trailing newline.
pub fn utils_index(names: &[String]) -> String {
    let mut out = names
        .iter()
        .map(|n| export_line(n))
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

/// Aggregator body for `src/index.js`: API re-exports in extraction order,
/// then a wildcard re-export of the utils index when any utilities exist.
pub fn module_index(api: &[String], has_utils: bool) -> String {
    let mut lines: Vec<String> = api.iter().map(|n| export_line(n)).collect();
    if has_utils {
        lines.push(format!("export * from \"./utils/index.{SCRIPT_EXT}\";"));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
