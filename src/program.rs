use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::console::Console;
use crate::decoder::Decoder;
use crate::exec::Executor;
use crate::labels::Search;
use crate::machine::{Fault, Machine, Step};

/// Ordered, zero-indexed program lines, each trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines processed, including those only scanned during a label search.
    pub steps: u64,
    /// False when execution ran past the last line without HALT.
    pub halted: bool,
}

impl Program {
    pub fn parse(src: &str) -> Self {
        Self {
            lines: src.lines().map(|l| l.trim().to_string()).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("reading program {}", path.display()))?;
        Ok(Self::parse(&src))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Step `m` from line 0 until HALT or the end of the program.
    pub fn run<D: Decoder, X: Executor, C: Console>(
        &self,
        m: &mut Machine,
        dec: &D,
        exec: &X,
        io: &mut C,
    ) -> Result<RunSummary, Fault> {
        let mut index = 0usize;
        let mut steps = 0u64;
        loop {
            let Some(line) = self.lines.get(index) else {
                if let Search::Searching { target, origin } = &m.search {
                    return Err(Fault::LabelNotFound {
                        label: target.clone(),
                        origin: *origin,
                    });
                }
                warn!(index, steps, "ran past the last line without HALT");
                return Ok(RunSummary {
                    steps,
                    halted: false,
                });
            };
            if let Some(limit) = m.cfg.max_steps {
                if steps >= limit {
                    return Err(Fault::StepLimit { limit });
                }
            }
            let next = m.step(line, index, dec, exec, io)?;
            steps += 1;
            match next {
                Step::Next(n) => index = n,
                Step::Halt => {
                    debug!(index, steps, "halted");
                    return Ok(RunSummary {
                        steps,
                        halted: true,
                    });
                }
            }
        }
    }
}
