mod build;
mod create;
mod migrate;

pub use build::{cmd_build, cmd_build_with_fs};
pub use create::cmd_create;
pub use migrate::{cmd_migrate, cmd_migrate_with_fs};
