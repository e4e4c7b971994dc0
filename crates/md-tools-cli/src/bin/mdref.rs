use std::process::ExitCode;

use md_tools_cli::{Tool, run};

fn main() -> ExitCode {
    run(Tool::Ref)
}
