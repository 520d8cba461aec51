//! minilisp: run Lisp source files or start an interactive REPL
//!
//! Log output goes to stderr and is controlled by `RUST_LOG`
//! (e.g. `RUST_LOG=minilisp=trace`) or `-v`/`-vv`.

mod repl;
mod style;

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use minilisp::context::DEFAULT_MAX_EVAL_DEPTH;
use minilisp::{read_all, Env, Environment, EvalContext, Evaluate};
use tracing_subscriber::EnvFilter;

use style::Style;

#[derive(Debug, Parser)]
#[command(name = "minilisp", version, about = "A small Lisp interpreter")]
struct Cli {
    /// Source files to run in order; starts a REPL when none are given
    files: Vec<PathBuf>,

    /// Evaluate an expression (after any files) and print its value
    #[arg(short, long, value_name = "EXPR")]
    eval: Option<String>,

    /// Start without the std macros (builtins and `defmacro` only)
    #[arg(long)]
    no_prelude: bool,

    /// Maximum evaluation depth before reporting a stack overflow
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_EVAL_DEPTH)]
    max_depth: usize,

    /// Disable colored output (also honors NO_COLOR)
    #[arg(long)]
    no_color: bool,

    /// More log output: -v for debug, -vv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let style = Style::detect(cli.no_color);

    match run(&cli, style) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{}: {:#}", style.error("error"), err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "minilisp=debug",
        _ => "minilisp=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Returns false when any top-level form failed.
fn run(cli: &Cli, style: Style) -> Result<bool> {
    let ctx = EvalContext::with_max_eval_depth(cli.max_depth);
    let env = if cli.no_prelude {
        Environment::with_builtins()
    } else {
        Environment::with_prelude(&ctx)
    }
    .context("failed to initialize the global environment")?;

    let mut ok = true;
    for path in &cli.files {
        ok &= run_file(path, &env, &ctx, style)?;
    }

    if let Some(src) = &cli.eval {
        ok &= run_source("<eval>", src, &env, &ctx, style, true);
    } else if cli.files.is_empty() {
        if std::io::stdin().is_terminal() {
            repl::run(&env, &ctx, style)?;
        } else {
            let mut src = String::new();
            std::io::stdin()
                .read_to_string(&mut src)
                .context("failed to read stdin")?;
            ok &= run_source("<stdin>", &src, &env, &ctx, style, false);
        }
    }

    Ok(ok)
}

fn run_file(path: &Path, env: &Env, ctx: &EvalContext, style: Style) -> Result<bool> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    tracing::debug!(path = %path.display(), "running file");
    Ok(run_source(&path.display().to_string(), &src, env, ctx, style, false))
}

/// Evaluate every form in `src`. A failing form is reported and the
/// remaining forms still run.
fn run_source(
    origin: &str,
    src: &str,
    env: &Env,
    ctx: &EvalContext,
    style: Style,
    print_result: bool,
) -> bool {
    let forms = match read_all(src) {
        Ok(forms) => forms,
        Err(err) => {
            eprintln!("{}: {}: {}", style.error("error"), origin, err);
            return false;
        }
    };

    let mut ok = true;
    let mut last = None;
    for form in &forms {
        match form.eval(env, ctx) {
            Ok(value) => last = Some(value),
            Err(err) => {
                eprintln!("{}: {}: {}", style.error("error"), origin, err);
                ok = false;
            }
        }
    }

    if print_result {
        if let Some(value) = last {
            println!("{}", value);
        }
    }
    ok
}
