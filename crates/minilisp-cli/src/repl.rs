//! Interactive read-eval-print loop

use std::path::PathBuf;

use anyhow::Result;
use minilisp::{expand, read, read_all, Env, EvalContext, Evaluate, SpecialForm};
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Editor, Helper};

use crate::style::Style;

const HISTORY_FILE: &str = ".minilisp_history";

const HELP: &str = "\
Commands:
  :help           Show this message
  :env            List global bindings
  :expand <form>  Show the macro expansion of a form
  :quit, :exit    Leave the REPL (or Ctrl-D)

Special forms: quote if define begin lambda macro load
Std macros:    defmacro defn when unless cond let -> ->>

Unbalanced input continues on the next line.";

/// Run the REPL until `:quit` or end of input.
pub fn run(env: &Env, ctx: &EvalContext, style: Style) -> Result<()> {
    let mut rl: Editor<ReplHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ReplHelper { env: Env::clone(env) }));

    let history = history_path();
    if let Some(path) = &history {
        // no history yet on first run
        let _ = rl.load_history(path);
    }

    println!("minilisp {}  (:help for commands, Ctrl-D to exit)", minilisp::VERSION);
    let prompt = style.prompt("minilisp> ");

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                if let Some(command) = input.strip_prefix(':') {
                    if !run_command(command, env, ctx, style) {
                        break;
                    }
                    continue;
                }
                eval_and_print(input, env, ctx, style);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(path) = &history {
        if let Err(err) = rl.save_history(path) {
            tracing::warn!(error = %err, "could not save history");
        }
    }
    Ok(())
}

fn eval_and_print(input: &str, env: &Env, ctx: &EvalContext, style: Style) {
    let forms = match read_all(input) {
        Ok(forms) => forms,
        Err(err) => {
            eprintln!("{}: {}", style.error("error"), err);
            return;
        }
    };
    for form in &forms {
        match form.eval(env, ctx) {
            Ok(value) => println!("{} {}", style.dim("=>"), style.value(&value.to_string())),
            Err(err) => {
                eprintln!("{}: {}", style.error("error"), err);
                return;
            }
        }
    }
}

/// Returns false when the REPL should exit.
fn run_command(command: &str, env: &Env, ctx: &EvalContext, style: Style) -> bool {
    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(name, arg)| (name, arg.trim()));

    match name {
        "quit" | "exit" | "q" => return false,
        "help" | "h" => println!("{}", HELP),
        "env" => {
            let names = env.names_in_current_scope();
            println!("{} bindings:", names.len());
            println!("{}", names.join(" "));
        }
        "expand" => match read(arg).map_err(Into::into).and_then(|form| expand(&form, env, ctx)) {
            Ok(expansion) => println!("{}", expansion),
            Err(err) => eprintln!("{}: {}", style.error("error"), err),
        },
        _ => eprintln!(
            "{}: unknown command `:{}` (try :help)",
            style.error("error"),
            name
        ),
    }
    true
}

fn history_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(HISTORY_FILE))
}

// ═══════════════════════════════════════════════════════════════════════
// Line Editor Helper
// ═══════════════════════════════════════════════════════════════════════

struct ReplHelper {
    env: Env,
}

fn is_token_boundary(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | ')' | '\'' | '"')
}

/// Byte offset where the token ending at the end of `line` begins.
fn token_start(line: &str) -> usize {
    line.char_indices()
        .rev()
        .find(|&(_, ch)| is_token_boundary(ch))
        .map_or(0, |(i, ch)| i + ch.len_utf8())
}

impl Completer for ReplHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let start = token_start(&line[..pos]);
        let prefix = &line[start..pos];
        if prefix.is_empty() {
            return Ok((pos, Vec::new()));
        }

        let mut candidates: Vec<String> = self
            .env
            .all_names()
            .into_iter()
            .chain(SpecialForm::ALL.iter().map(|form| form.name().to_string()))
            .filter(|name| name.starts_with(prefix))
            .collect();
        candidates.sort();
        candidates.dedup();
        Ok((start, candidates))
    }
}

impl Validator for ReplHelper {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        let input = ctx.input();
        if input.trim_start().starts_with(':') {
            return Ok(ValidationResult::Valid(None));
        }
        match read_all(input) {
            Err(err) if err.is_incomplete() => Ok(ValidationResult::Incomplete),
            _ => Ok(ValidationResult::Valid(None)),
        }
    }
}

impl Hinter for ReplHelper {
    type Hint = String;
}

impl Highlighter for ReplHelper {}

impl Helper for ReplHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_start() {
        let line = "(define x (ma";
        assert_eq!(&line[token_start(line)..], "ma");
        assert_eq!(token_start("hash-g"), 0);
        assert_eq!(token_start("'sym"), 1);
    }
}
