use clap::Parser;
use clap::error::ErrorKind;
use modkit::cli::{Cli, Command};
use modkit::{cmd_build, cmd_create, cmd_migrate};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Help and version are not failures; everything else (missing
            // argument, unknown command) exits 1.
            let code = match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    let exit_code = match cli.command {
        Command::Create(args) => cmd_create(args),
        Command::Migrate(args) => cmd_migrate(args),
        Command::Build(args) => cmd_build(args),
    };

    std::process::exit(exit_code);
}
