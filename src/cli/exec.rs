//! Interpreter passthrough: `ht exec` and the `ht shell` REPL.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::interp;
use crate::output::{emit_success, OutputOptions};
use crate::store::TaskStore;

const SHELL_BANNER: &str = "> HACKER TASK MANAGER v2.0 INITIALIZED\n> Type \"help\" for available commands";
const SHELL_PROMPT: &str = "$ ";

pub struct ExecOptions {
    pub line: String,
    pub store: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShellOptions {
    pub store: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct ExecOutput<'a> {
    result: &'a str,
}

pub fn run_exec(options: ExecOptions) -> Result<()> {
    let config = Config::load_default()?;
    let path = config.store_path(options.store)?;
    let mut store = TaskStore::open(path);

    let result = interp::execute(&options.line, &mut store);

    if options.json {
        return emit_success(
            OutputOptions {
                json: true,
                quiet: options.quiet,
            },
            "exec",
            &ExecOutput { result: &result },
            None,
        );
    }

    if !options.quiet && !result.is_empty() {
        println!("{result}");
    }
    Ok(())
}

/// Read-eval-print loop over stdin. `exit`/`quit` (and EOF) leave the
/// session; everything else goes to the interpreter verbatim.
pub fn run_shell(options: ShellOptions) -> Result<()> {
    let config = Config::load_default()?;
    let path = config.store_path(options.store)?;
    let mut store = TaskStore::open(path);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{SHELL_BANNER}");

    loop {
        print!("{SHELL_PROMPT}");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        let result = interp::execute(line, &mut store);
        if !result.is_empty() {
            println!("{result}");
        }
    }

    Ok(())
}
