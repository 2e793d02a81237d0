use rustyline::{DefaultEditor, error::ReadlineError};

use crate::{
    diagnostics::{NatRegError, Result},
    runtime::Compiler,
};

/// Interactive session. Definitions persist across lines.
pub struct Repl {
    compiler: Compiler,
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

impl Repl {
    pub fn new() -> Self {
        Self {
            compiler: Compiler::new(),
        }
    }

    pub fn with_compiler(compiler: Compiler) -> Self {
        Self { compiler }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new().map_err(readline_error)?;
        loop {
            match editor.readline("natreg> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed == ":quit" || trimmed == ":exit" {
                        break;
                    }
                    if trimmed.is_empty() {
                        continue;
                    }
                    editor.add_history_entry(trimmed).ok();
                    match self.compiler.compile_source(trimmed) {
                        Ok(regex) if regex.is_empty() => {}
                        Ok(regex) => println!("{regex}"),
                        Err(err) => eprintln!("[{}]: {err}", err.label()),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(readline_error(err)),
            }
        }
        Ok(())
    }
}

fn readline_error(err: ReadlineError) -> NatRegError {
    NatRegError::from(std::io::Error::new(std::io::ErrorKind::Other, err))
}
