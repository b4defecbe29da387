use crate::decoder::{Decoded, Op};
use crate::token::Token;

pub fn fmt_decoded(d: &Decoded) -> String {
    match d {
        Decoded::Blank => String::new(),
        Decoded::Label { name, inline: None } => format!("{name}:"),
        Decoded::Label {
            name,
            inline: Some(inner),
        } => format!("{name}: {}", fmt_decoded(inner)),
        Decoded::Instr { op, operands } => fmt_instr(*op, operands),
        Decoded::Branch { cond, target } => format!("{} {target}", cond.mnemonic()),
    }
}

pub fn fmt_instr(op: Op, operands: &[Token]) -> String {
    if operands.is_empty() {
        return op.mnemonic().to_string();
    }
    let ops: Vec<String> = operands.iter().map(Token::to_string).collect();
    format!("{} {}", op.mnemonic(), ops.join(", "))
}
