use crate::cli::CreateArgs;
use crate::fs::default_fs;
use crate::scaffold::{self, Prompter};
use crate::style;
use std::io;

pub fn cmd_create(args: CreateArgs) -> i32 {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let (name, descriptor) = match scaffold::collect(&mut prompter) {
        Ok(answers) => answers,
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    };

    let dest = args.path.join(&name);
    if let Err(e) = scaffold::write_project(default_fs(), &dest, &name, &descriptor) {
        style::error(&e.to_string());
        return 1;
    }

    style::success(&format!(
        "Module '{name}' created at {}",
        style::path(&dest)
    ));
    0
}
