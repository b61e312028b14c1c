use crate::cli::MigrateArgs;
use crate::fs::{FileSystem, default_fs};
use crate::migrate::{MigrateError, Migration};
use crate::style;
use std::time::Instant;

pub fn cmd_migrate(args: MigrateArgs) -> i32 {
    cmd_migrate_with_fs(args, default_fs())
}

pub fn cmd_migrate_with_fs(args: MigrateArgs, fs: &dyn FileSystem) -> i32 {
    let start = Instant::now();

    let basename = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    if !fs.exists(&args.file) {
        style::error(&format!("File not found: {}", style::path(&args.file)));
        return 1;
    }

    style::header(&format!("Migrating {basename}..."));

    let migration = match Migration::load(fs, &args.file) {
        Ok(migration) => migration,
        Err(MigrateError::NotFound(_)) => {
            style::error(&format!("File not found: {}", style::path(&args.file)));
            return 1;
        }
        Err(MigrateError::Parse(e)) => {
            style::error("Failed to parse JS");
            style::hint(&e.to_string());
            return 1;
        }
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    };

    style::step("Parsed source file");

    let report = match migration.extract(fs, &args.path) {
        Ok(report) => report,
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    };

    for name in &report.skipped_duplicates {
        style::step(&format!("Skipping duplicate {name}"));
    }
    style::step(&format!("Extracted {} functions", report.migrated));

    style::success(&format!(
        "Migration complete in {}ms",
        start.elapsed().as_millis()
    ));
    style::success(&format!("{} API functions", report.api_count()));
    style::success(&format!("{} utils", report.util_count()));
    0
}
