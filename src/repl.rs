use std::io::BufRead;

use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::debug;

use crate::{
    diagnostics::{Result, TsapaError},
    macros::VERSION,
    runtime::Interpreter,
};

pub const PROMPT: &str = "§ ";
pub const FAREWELL: &str = "Bye!";

/// What a single input line produced at the session boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Value(String),
    Error(String),
    Exit,
}

pub struct Repl {
    interpreter: Interpreter,
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

impl Repl {
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
        }
    }

    pub fn banner() -> String {
        format!("This is Tsapa v.{VERSION}")
    }

    /// Evaluates one line; every failure stops here and becomes a report.
    pub fn process_line(&mut self, line: &str) -> LineOutcome {
        let line = line.trim_end_matches(['\r', '\n']);
        match self.interpreter.eval_source(line) {
            Ok(value) => LineOutcome::Value(value.to_string()),
            Err(TsapaError::Exit) => LineOutcome::Exit,
            Err(err) => {
                debug!(%err, line, "statement failed");
                LineOutcome::Error(format!("Achtung! {err}\n\t-> \"{line}\""))
            }
        }
    }

    pub fn run(&mut self, banner: bool) -> Result<()> {
        let mut editor = DefaultEditor::new().map_err(|err| {
            TsapaError::from(std::io::Error::new(std::io::ErrorKind::Other, err))
        })?;
        if banner {
            println!("{}", Self::banner());
        }
        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        editor.add_history_entry(line.as_str()).ok();
                    }
                    if self.report(&line) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    return Err(TsapaError::from(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        err,
                    )));
                }
            }
        }
        Ok(())
    }

    /// Feeds every line of `reader` through the session boundary.
    pub fn run_lines<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for line in reader.lines() {
            if self.report(&line?) {
                break;
            }
        }
        Ok(())
    }

    /// Prints the outcome of `line`; returns true once the session should end.
    fn report(&mut self, line: &str) -> bool {
        match self.process_line(line) {
            LineOutcome::Value(text) => {
                println!("{text}");
                false
            }
            LineOutcome::Error(report) => {
                eprintln!("{report}");
                false
            }
            LineOutcome::Exit => {
                println!("{FAREWELL}");
                true
            }
        }
    }
}
