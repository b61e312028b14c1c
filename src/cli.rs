use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modkit")]
#[command(about = "Scaffold, migrate, and bundle content-source modules")]
#[command(version)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Scaffold a new module using an interactive template
    Create(CreateArgs),

    /// Convert a legacy single-file module into a modern src/ structure
    Migrate(MigrateArgs),

    /// Bundle the src/ directory into a compact production module
    Build(BuildArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct CreateArgs {
    /// Directory the new module folder is created in (defaults to current directory)
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateArgs {
    /// Legacy script to migrate (e.g. old_module.js)
    pub file: PathBuf,

    /// Project directory receiving the src/ tree (defaults to current directory)
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Project directory containing src/ and the module descriptor
    #[arg(default_value = ".")]
    pub path: PathBuf,
}
