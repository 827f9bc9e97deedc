use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use github_env::{execute, logging, Config, Outcome, GITHUB_ENV_VAR};

const EXPRESSIONS_HELP: &str = "Variable modification expressions: \
VAR=value to add or rewrite a variable, \
VAR+=value to append a value to a variable, \
VAR++=value to prepend a value to a variable, \
VAR-=value to remove a value from a variable, \
!VAR to undefine a variable.";

#[derive(Parser)]
#[command(name = "github_env")]
#[command(about = "Modify GITHUB_ENV file in a flexible way")]
#[command(version)]
struct Cli {
    /// Path to variables file (by default take from $GITHUB_ENV)
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Apply condition: only run if argument is "true"
    #[arg(short = 'i', long = "if", value_name = "COND")]
    condition: Option<String>,

    /// Be verbose, show changes done to env file
    #[arg(short, long)]
    verbose: bool,

    #[arg(value_name = "EXPR", required = true, num_args = 1.., help = EXPRESSIONS_HELP)]
    modifications: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    logging::init();

    if let Err(e) = run(cli) {
        eprintln!("FATAL: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // 环境变量只在入口处读取一次
    let config = Config::resolve(
        cli.file,
        std::env::var_os(GITHUB_ENV_VAR),
        cli.condition,
        cli.verbose,
    )?;

    let mut stderr = std::io::stderr().lock();
    let outcome = match execute(&config, cli.modifications.as_slice(), &mut stderr) {
        Ok(outcome) => outcome,
        Err(e) if e.is_invocation() => return Err(e.into()),
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Cannot update variables file {}", config.file.display())
            })
        }
    };

    if let Outcome::Applied { changed } = outcome {
        tracing::debug!(path = %config.file.display(), changed, "variables file updated");
    }

    Ok(())
}
