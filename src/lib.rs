pub mod bundle;
pub mod cli;
pub mod commands;
pub mod descriptor;
pub mod fs;
pub mod migrate;
pub mod parser;
pub mod scaffold;
pub mod style;

pub use cli::Cli;
pub use commands::{cmd_build, cmd_create, cmd_migrate};
pub use descriptor::ModuleDescriptor;
pub use migrate::{MigrateError, MigrateReport, Migration};
