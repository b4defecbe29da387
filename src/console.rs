use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Context, Result};

use crate::Word;

/// External I/O used by `INP` and `OUT`.
pub trait Console {
    fn input(&mut self) -> Result<Word>;
    fn output(&mut self, val: Word) -> Result<()>;
}

/// Prompting console over stdin/stdout.
pub struct StdConsole<R = io::StdinLock<'static>, W = io::Stdout> {
    reader: R,
    writer: W,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            reader: io::stdin().lock(),
            writer: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn with_io(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn input(&mut self) -> Result<Word> {
        write!(self.writer, "Input:")?;
        self.writer.flush()?;
        let mut line = String::new();
        let n = self.reader.read_line(&mut line)?;
        if n == 0 {
            return Err(anyhow!("end of input while waiting for INP"));
        }
        let text = line.trim();
        text.parse::<Word>()
            .with_context(|| format!("input {text:?} is not an integer"))
    }

    fn output(&mut self, val: Word) -> Result<()> {
        writeln!(self.writer, "Out: {val}")?;
        Ok(())
    }
}

/// Console fed from a queue, recording everything written.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    pub inputs: VecDeque<Word>,
    pub outputs: Vec<Word>,
}

impl ScriptedConsole {
    pub fn new(inputs: impl IntoIterator<Item = Word>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            outputs: Vec::new(),
        }
    }
}

impl Console for ScriptedConsole {
    fn input(&mut self) -> Result<Word> {
        self.inputs
            .pop_front()
            .ok_or_else(|| anyhow!("scripted input exhausted"))
    }

    fn output(&mut self, val: Word) -> Result<()> {
        self.outputs.push(val);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_console_prompts_and_labels_output() {
        let mut con = StdConsole::with_io(&b" 42\nnope\n"[..], Vec::new());
        assert_eq!(con.input().unwrap(), 42);
        assert!(con.input().is_err());
        assert!(con.input().is_err());
        con.output(-3).unwrap();
        let text = String::from_utf8(con.into_writer()).unwrap();
        assert_eq!(text, "Input:Input:Input:Out: -3\n");
    }

    #[test]
    fn scripted_console_runs_dry() {
        let mut con = ScriptedConsole::new([1]);
        assert_eq!(con.input().unwrap(), 1);
        assert!(con.input().is_err());
    }
}
