use std::{fmt, io};
use io::{BufRead, Write};

use ansi_term::Colour::{Blue, Red};
use tagmatch::sexpr::{self, Env};

// ----------------------------------------------------------------------------

/// The name bound to the result of the previous command.
const LAST: &str = "_";

#[derive(Default)]
pub struct Repl {
    /// Bindings that persist between commands.
    pub env: Env,

    /// `true` once the input is exhausted.
    pub is_complete: bool,
}

impl Repl {
    /// Returns `true` if `command` has encountered the end of the input.
    pub fn is_complete(&self) -> bool { self.is_complete }

    /// Prompt for a command, then read and evaluate it.
    pub fn command(&mut self, input: &mut impl BufRead, output: &mut impl Write)
    -> io::Result<()> {
        write!(output, "> ")?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            self.is_complete = true;
            return writeln!(output);
        }
        if line.trim().is_empty() { return Ok(()); }
        let result = sexpr::read(&line).map_err(|e| e.to_string())
            .and_then(|expr| sexpr::evaluate(&expr, &self.env).map_err(|e| e.to_string()));
        match result {
            Ok(value) => {
                self.env.insert(LAST.into(), value);
                writeln!(output, "{}", Blue.paint(value.to_string()))
            },
            Err(msg) => {
                log::debug!("Rejected {:?}", line.trim());
                writeln!(output, "{}", Red.paint(msg))
            },
        }
    }
}

impl fmt::Debug for Repl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Repl").field("bindings", &self.env.len()).finish()
    }
}

// ----------------------------------------------------------------------------

fn main() -> std::io::Result<()> {
    env_logger::init();
    let mut input = io::stdin().lock();
    let mut output = io::stdout();
    let mut repl = Repl::default();
    while !repl.is_complete() {
        repl.command(&mut input, &mut output)?;
    }
    Ok(())
}

// ----------------------------------------------------------------------------
