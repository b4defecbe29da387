use serde::{Deserialize, Serialize};

use crate::token::{Token, TokenClass};

/// Operand kind of one position in an instruction signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperandKind {
    /// Register only.
    R,
    /// Register or immediate.
    O,
    /// Plain numeric memory address.
    M,
    /// Immediate only.
    N,
    /// I/O target name, accepted unconditionally and may be omitted.
    A,
    /// Branch target label; any word is taken verbatim as the label name.
    L,
}

impl OperandKind {
    /// Token classes accepted in this position. Sigil-less identifiers pass
    /// the shape check everywhere and are rejected by the operand resolver
    /// instead.
    pub fn accepts(self) -> TokenClass {
        match self {
            OperandKind::R => TokenClass::REGISTER | TokenClass::IDENT,
            OperandKind::O => TokenClass::REGISTER | TokenClass::IMMEDIATE | TokenClass::IDENT,
            OperandKind::M => TokenClass::ADDRESS | TokenClass::IDENT,
            OperandKind::N => TokenClass::IMMEDIATE | TokenClass::IDENT,
            OperandKind::A | OperandKind::L => TokenClass::all(),
        }
    }

    pub fn letter(self) -> char {
        match self {
            OperandKind::R => 'R',
            OperandKind::O => 'O',
            OperandKind::M => 'M',
            OperandKind::N => 'N',
            OperandKind::A => 'A',
            OperandKind::L => 'L',
        }
    }
}

pub type Signature = &'static [OperandKind];

/// Check `operands` positionally against `sig`.
pub fn matches(operands: &[Token], sig: Signature) -> bool {
    if operands.len() > sig.len() {
        return false;
    }
    // Trailing A slots are optional.
    let required = sig
        .iter()
        .rposition(|k| *k != OperandKind::A)
        .map_or(0, |p| p + 1);
    if operands.len() < required {
        return false;
    }
    operands
        .iter()
        .zip(sig)
        .all(|(tok, kind)| kind.accepts().contains(tok.class()))
}

/// Render a signature for diagnostics, e.g. `[R, R, O]`.
pub fn fmt_signature(sig: Signature) -> String {
    let letters: Vec<String> = sig.iter().map(|k| k.letter().to_string()).collect();
    format!("[{}]", letters.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use OperandKind::*;

    fn toks(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| Token::lex(w)).collect()
    }

    #[test]
    fn o_slot_takes_register_or_immediate() {
        assert!(matches(&toks(&["R0", "R1", "#2"]), &[R, R, O]));
        assert!(matches(&toks(&["R0", "R1", "R2"]), &[R, R, O]));
        assert!(!matches(&toks(&["R0", "R1", "5"]), &[R, R, O]));
    }

    #[test]
    fn shapes_only_fit_their_own_kind() {
        assert!(matches(&toks(&["R0", "100"]), &[R, M]));
        assert!(!matches(&toks(&["R0", "#100"]), &[R, M]));
        assert!(!matches(&toks(&["#1", "100"]), &[R, M]));
        assert!(matches(&toks(&["#1"]), &[N]));
        assert!(!matches(&toks(&["R1"]), &[N]));
    }

    #[test]
    fn arity_is_checked() {
        assert!(!matches(&toks(&["R0", "5"]), &[R, R, O]));
        assert!(!matches(&toks(&["R0", "R1", "#1", "#2"]), &[R, R, O]));
        assert!(matches(&[], &[]));
    }

    #[test]
    fn trailing_a_slot_is_optional_and_unchecked() {
        assert!(matches(&toks(&["R0"]), &[R, A]));
        assert!(matches(&toks(&["R0", "4"]), &[R, A]));
        assert!(matches(&toks(&["R0", "screen"]), &[R, A]));
    }

    #[test]
    fn identifiers_defer_to_the_resolver() {
        assert!(matches(&toks(&["foo", "R1", "#1"]), &[R, R, O]));
        assert!(matches(&toks(&["anything"]), &[L]));
    }

    #[test]
    fn malformed_sigil_words_only_fit_their_sigil_kind() {
        assert!(!matches(&toks(&["R0", "#x"]), &[R, M]));
        assert!(!matches(&toks(&["#q", "R0", "#1"]), &[R, R, O]));
        assert!(!matches(&toks(&["R0", "R1x"]), &[R, M]));
        assert!(!matches(&toks(&["#x"]), &[R, A]));
        // Still shaped right for their slot; the resolver rejects them.
        assert!(matches(&toks(&["R0", "#0x10"]), &[R, O]));
        assert!(matches(&toks(&["R1x", "100"]), &[R, M]));
        assert!(matches(&toks(&["#x"]), &[N]));
    }

    #[test]
    fn signature_rendering() {
        assert_eq!(fmt_signature(&[R, R, O]), "[R, R, O]");
        assert_eq!(fmt_signature(&[]), "[]");
    }
}
