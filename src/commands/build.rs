use crate::bundle;
use crate::cli::BuildArgs;
use crate::fs::{FileSystem, default_fs};
use crate::style;
use std::path::{Component, Path};
use std::time::Instant;

pub fn cmd_build(args: BuildArgs) -> i32 {
    cmd_build_with_fs(args, default_fs())
}

pub fn cmd_build_with_fs(args: BuildArgs, fs: &dyn FileSystem) -> i32 {
    let start = Instant::now();

    if !fs.is_dir(&args.path.join("src")) {
        style::error("Missing required src/ directory");
        return 1;
    }

    if let Err(e) = bundle::find_descriptor(fs, &args.path) {
        style::error(&e.to_string());
        return 1;
    }

    // The artifact is named after the project directory, like the descriptor.
    let project_name = match project_name(&args.path) {
        Some(name) => name,
        None => {
            style::error(&format!("Could not resolve path: {}", style::path(&args.path)));
            return 1;
        }
    };

    style::header(&format!("Building module {project_name}..."));

    let bundle = match bundle::bundle_project(fs, &args.path) {
        Ok(bundle) => bundle,
        Err(e) => {
            style::error("Build failed");
            style::hint(&e.to_string());
            return 1;
        }
    };

    let out = args.path.join(format!("{project_name}.js"));
    if let Err(e) = fs.write(&out, &bundle.script) {
        style::error(&format!("Failed to write {}: {e}", style::path(&out)));
        return 1;
    }

    style::success(&format!("Built in {}ms", start.elapsed().as_millis()));
    style::success(&format!("{} exports on globalThis", bundle.exports.len()));
    0
}

/// Last real component of the project path, resolved against the working
/// directory for relative paths like `.` without touching the filesystem.
fn project_name(path: &Path) -> Option<String> {
    let absolute = std::path::absolute(path).ok()?;
    absolute.components().rev().find_map(|c| match c {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;
    use std::path::PathBuf;

    fn migrated_project() -> MockFs {
        let fs = MockFs::with_files([
            (
                "proj/src/index.js",
                "export { searchResults } from \"./searchresults.js\";\n",
            ),
            (
                "proj/src/searchresults.js",
                "export function searchResults(q) { return []; }\n",
            ),
            ("proj/source.json", "{}"),
        ]);
        fs.create_dir_all(Path::new("proj/src")).unwrap();
        fs
    }

    fn build_args(path: &str) -> BuildArgs {
        BuildArgs {
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_cmd_build_writes_artifact_through_fs_seam() {
        let fs = migrated_project();
        assert_eq!(cmd_build_with_fs(build_args("proj"), &fs), 0);

        let artifact = fs.read_to_string(Path::new("proj/proj.js")).unwrap();
        assert!(artifact.contains("function searchResults(q)"));
        assert!(artifact.ends_with("Object.assign(globalThis, _);\n"));
    }

    #[test]
    fn test_cmd_build_requires_src_directory() {
        let fs = MockFs::new();
        assert_eq!(cmd_build_with_fs(build_args("proj"), &fs), 1);
    }

    #[test]
    fn test_cmd_build_requires_one_descriptor() {
        let fs = migrated_project();
        fs.write(Path::new("proj/other.json"), "{}").unwrap();
        assert_eq!(cmd_build_with_fs(build_args("proj"), &fs), 1);
    }

    #[test]
    fn test_project_name_from_relative_and_dot_paths() {
        assert_eq!(project_name(Path::new("some/proj")).as_deref(), Some("proj"));
        // `.` resolves to the working directory's own name.
        let cwd_name = project_name(Path::new("."));
        assert!(cwd_name.is_some());
        assert_ne!(cwd_name.as_deref(), Some("."));
    }
}
