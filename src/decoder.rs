use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pattern::{self, fmt_signature};
use crate::token::{self, Token};

/// Normal (non-branch) opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Ldr,
    Str,
    Add,
    Sub,
    Mov,
    Cmp,
    And,
    Orr,
    Eor,
    Mvn,
    Lsl,
    Lsr,
    Inp,
    Out,
    Halt,
}

/// Branch relations over the comparison latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cond {
    Eq,
    Ne,
    Gt,
    Lt,
    Always,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decoded {
    Blank,
    /// `name:` optionally followed by an instruction on the same line.
    Label {
        name: String,
        inline: Option<Box<Decoded>>,
    },
    Instr {
        op: Op,
        operands: Vec<Token>,
    },
    Branch {
        cond: Cond,
        target: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unrecognised instruction")]
    Unrecognized,
    #[error("Instruction {mnemonic} requires pattern {expected}")]
    PatternMismatch {
        mnemonic: &'static str,
        expected: String,
    },
}

pub trait Decoder {
    fn decode(&self, line: &str) -> Result<Decoded, DecodeError>;
}

/// Decodes the textual line syntax: `OPCODE op, op ...`, `BRANCH label`,
/// `label:` with an optional instruction after it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineDecoder;

impl LineDecoder {
    pub fn new() -> Self {
        Self
    }

    fn decode_words(&self, words: &[&str], allow_label: bool) -> Result<Decoded, DecodeError> {
        let Some((&first, rest)) = words.split_first() else {
            return Ok(Decoded::Blank);
        };

        if let Some(op) = Op::from_mnemonic(first) {
            let operands: Vec<Token> = rest.iter().map(|w| Token::lex(w)).collect();
            check(op.mnemonic(), &operands, op.signature())?;
            return Ok(Decoded::Instr { op, operands });
        }

        if let Some(cond) = Cond::from_mnemonic(first) {
            let operands: Vec<Token> = rest.iter().map(|w| Token::lex(w)).collect();
            check(cond.mnemonic(), &operands, Cond::SIGNATURE)?;
            // Matched against an `L` slot, so exactly one word is present.
            return Ok(Decoded::Branch {
                cond,
                target: rest[0].to_string(),
            });
        }

        match token::label_name(first) {
            Some(name) if allow_label => {
                let inline = if rest.is_empty() {
                    None
                } else {
                    Some(Box::new(self.decode_words(rest, false)?))
                };
                Ok(Decoded::Label {
                    name: name.to_string(),
                    inline,
                })
            }
            _ => Err(DecodeError::Unrecognized),
        }
    }
}

fn check(
    mnemonic: &'static str,
    operands: &[Token],
    sig: pattern::Signature,
) -> Result<(), DecodeError> {
    if pattern::matches(operands, sig) {
        Ok(())
    } else {
        Err(DecodeError::PatternMismatch {
            mnemonic,
            expected: fmt_signature(sig),
        })
    }
}

impl Decoder for LineDecoder {
    fn decode(&self, line: &str) -> Result<Decoded, DecodeError> {
        self.decode_words(&token::split_line(line), true)
    }
}
