use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::console::Console;
use crate::decoder::{Cond, DecodeError, Decoded, Decoder};
use crate::disasm::fmt_decoded;
use crate::exec::Executor;
use crate::labels::{resolve, LabelTable, Search};
use crate::memory::Store;
use crate::operand::OperandError;
use crate::token;
use crate::Word;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Abort the run after this many executed lines.
    pub max_steps: Option<u64>,
    /// Let a label definition overwrite an earlier one at another index.
    pub allow_label_redefinition: bool,
    /// Treat a conditional branch before any CMP as comparing (0, 0).
    pub lenient_compare: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum Fault {
    #[error("Unrecognised instruction at line {index}: {line:?}")]
    UnrecognizedInstruction { index: usize, line: String },
    #[error("Instruction {line:?} at line {index} requires pattern {expected}")]
    PatternMismatch {
        index: usize,
        line: String,
        expected: String,
    },
    #[error("Value not recognisable as a reference at line {index}: {token}")]
    UnrecognizedReference { index: usize, token: String },
    #[error("Actual value not recognised at line {index}: {token}")]
    UnrecognizedValue { index: usize, token: String },
    #[error("Label {label:?} not found (searched from line {origin})")]
    LabelNotFound { label: String, origin: usize },
    #[error("Conditional branch at line {index} before any CMP")]
    UninitializedComparison { index: usize },
    #[error("Label {label:?} redefined at line {index} (already resolves to {first}, now {second})")]
    LabelRedefined {
        index: usize,
        label: String,
        first: usize,
        second: usize,
    },
    #[error("Shift amount {amount} out of range at line {index}")]
    ShiftOutOfRange { index: usize, amount: Word },
    #[error("I/O failed at line {index}: {source}")]
    Io {
        index: usize,
        #[source]
        source: anyhow::Error,
    },
    #[error("Step limit of {limit} reached")]
    StepLimit { limit: u64 },
}

impl Fault {
    pub(crate) fn operand(index: usize, err: OperandError) -> Self {
        match err {
            OperandError::UnrecognizedReference(token) => Fault::UnrecognizedReference { index, token },
            OperandError::UnrecognizedValue(token) => Fault::UnrecognizedValue { index, token },
        }
    }

    fn decode(index: usize, line: &str, err: DecodeError) -> Self {
        let line = line.to_string();
        match err {
            DecodeError::Unrecognized => Fault::UnrecognizedInstruction { index, line },
            DecodeError::PatternMismatch { expected, .. } => Fault::PatternMismatch {
                index,
                line,
                expected,
            },
        }
    }
}

/// Outcome of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next(usize),
    Halt,
}

/// Complete interpreter state for one program run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Machine {
    pub regs: Store,
    pub mem: Store,
    pub labels: LabelTable,
    /// Last `(left, right)` pair from CMP.
    pub latch: Option<(Word, Word)>,
    pub search: Search,
    pub halted: bool,
    pub cfg: MachineConfig,
}

impl Machine {
    pub fn new(cfg: MachineConfig) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    /// Clear all state, keeping the configuration.
    pub fn reset(&mut self) {
        *self = Self::new(self.cfg.clone());
    }

    /// Process `line`, found at `index`, and report where to go next.
    pub fn step<D: Decoder, X: Executor, C: Console>(
        &mut self,
        line: &str,
        index: usize,
        dec: &D,
        exec: &X,
        io: &mut C,
    ) -> Result<Step, Fault> {
        if self.halted {
            return Ok(Step::Halt);
        }

        if let Some(target) = self.search.target().map(str::to_owned) {
            // Only label definitions matter while searching.
            let words = token::split_line(line);
            if let Some(name) = words.first().and_then(|w| token::label_name(w)) {
                self.define_label(name, index, words.len() > 1)?;
            }
            return Ok(Step::Next(resolve(&self.labels, &mut self.search, &target, index)));
        }

        let d = dec.decode(line).map_err(|e| Fault::decode(index, line, e))?;
        trace!(index, insn = %fmt_decoded(&d), "exec");
        self.apply(d, index, exec, io)
    }

    fn apply<X: Executor, C: Console>(
        &mut self,
        d: Decoded,
        index: usize,
        exec: &X,
        io: &mut C,
    ) -> Result<Step, Fault> {
        match d {
            Decoded::Blank => Ok(Step::Next(index + 1)),
            Decoded::Instr { op, operands } => {
                exec.exec(self, io, index, op, &operands)?;
                if self.halted {
                    Ok(Step::Halt)
                } else {
                    Ok(Step::Next(index + 1))
                }
            }
            Decoded::Branch { cond, target } => {
                if cond.holds(self.latch_for(cond, index)?) {
                    Ok(Step::Next(resolve(&self.labels, &mut self.search, &target, index)))
                } else {
                    Ok(Step::Next(index + 1))
                }
            }
            Decoded::Label { name, inline } => {
                self.define_label(&name, index, inline.is_some())?;
                match inline {
                    Some(inner) => self.apply(*inner, index, exec, io),
                    None => Ok(Step::Next(index + 1)),
                }
            }
        }
    }

    fn latch_for(&self, cond: Cond, index: usize) -> Result<(Word, Word), Fault> {
        match (cond, self.latch) {
            (Cond::Always, _) => Ok((0, 0)),
            (_, Some(latch)) => Ok(latch),
            (_, None) if self.cfg.lenient_compare => Ok((0, 0)),
            (_, None) => Err(Fault::UninitializedComparison { index }),
        }
    }

    /// A bare label resolves to the following line; one carrying an inline
    /// instruction resolves to its own line so the instruction runs.
    fn define_label(&mut self, name: &str, index: usize, inline: bool) -> Result<(), Fault> {
        let target = if inline { index } else { index + 1 };
        self.labels
            .define(name, target, self.cfg.allow_label_redefinition)
            .map_err(|r| Fault::LabelRedefined {
                index,
                label: name.to_string(),
                first: r.first,
                second: r.second,
            })
    }
}
