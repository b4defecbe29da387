use crate::decoder::{Cond, Op};
use crate::pattern::{OperandKind::*, Signature};
use crate::Word;

impl Op {
    pub const ALL: [Op; 15] = [
        Op::Ldr,
        Op::Str,
        Op::Add,
        Op::Sub,
        Op::Mov,
        Op::Cmp,
        Op::And,
        Op::Orr,
        Op::Eor,
        Op::Mvn,
        Op::Lsl,
        Op::Lsr,
        Op::Inp,
        Op::Out,
        Op::Halt,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            Op::Ldr => "LDR",
            Op::Str => "STR",
            Op::Add => "ADD",
            Op::Sub => "SUB",
            Op::Mov => "MOV",
            Op::Cmp => "CMP",
            Op::And => "AND",
            Op::Orr => "ORR",
            Op::Eor => "EOR",
            Op::Mvn => "MVN",
            Op::Lsl => "LSL",
            Op::Lsr => "LSR",
            Op::Inp => "INP",
            Op::Out => "OUT",
            Op::Halt => "HALT",
        }
    }

    pub fn signature(self) -> Signature {
        match self {
            Op::Ldr | Op::Str => &[R, M],
            Op::Add | Op::Sub | Op::And | Op::Orr | Op::Eor | Op::Lsl | Op::Lsr => &[R, R, O],
            Op::Mov | Op::Cmp | Op::Mvn => &[R, O],
            Op::Inp | Op::Out => &[R, A],
            Op::Halt => &[],
        }
    }

    pub fn from_mnemonic(word: &str) -> Option<Op> {
        Op::ALL.into_iter().find(|op| op.mnemonic() == word)
    }
}

impl Cond {
    pub const ALL: [Cond; 5] = [Cond::Eq, Cond::Ne, Cond::Gt, Cond::Lt, Cond::Always];

    pub const SIGNATURE: Signature = &[L];

    pub fn mnemonic(self) -> &'static str {
        match self {
            Cond::Eq => "BEQ",
            Cond::Ne => "BNE",
            Cond::Gt => "BGT",
            Cond::Lt => "BLT",
            Cond::Always => "B",
        }
    }

    pub fn from_mnemonic(word: &str) -> Option<Cond> {
        Cond::ALL.into_iter().find(|c| c.mnemonic() == word)
    }

    /// Whether the branch is taken for a latch holding `(left, right)`.
    pub fn holds(self, (left, right): (Word, Word)) -> bool {
        match self {
            Cond::Eq => left == right,
            Cond::Ne => left != right,
            Cond::Gt => left > right,
            Cond::Lt => left < right,
            Cond::Always => true,
        }
    }
}
