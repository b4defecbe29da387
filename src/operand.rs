use thiserror::Error;

use crate::memory::Store;
use crate::token::Token;
use crate::Word;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperandError {
    #[error("Value not recognisable as a reference: {0}")]
    UnrecognizedReference(String),
    #[error("Actual value not recognised: {0}")]
    UnrecognizedValue(String),
}

/// Index named by an operand that must address a cell (register or memory).
pub fn reference(tok: &Token) -> Result<u32, OperandError> {
    match tok {
        Token::Register(i) => Ok(*i),
        Token::Address(a) => Ok(*a),
        other => Err(OperandError::UnrecognizedReference(other.to_string())),
    }
}

/// Runtime value produced by an operand.
pub fn value(tok: &Token, regs: &Store, mem: &Store) -> Result<Word, OperandError> {
    match tok {
        Token::Register(i) => Ok(regs.read(*i)),
        Token::Immediate(v) => Ok(*v),
        Token::Address(a) => Ok(mem.read(*a)),
        other => Err(OperandError::UnrecognizedValue(other.to_string())),
    }
}
