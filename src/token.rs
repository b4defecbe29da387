use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::Word;

/// Register sigil (`R0`, `R12`).
pub const REGISTER_SIGIL: char = 'R';
/// Immediate sigil (`#5`, `#-3`).
pub const IMMEDIATE_SIGIL: char = '#';
/// Suffix of a label definition (`loop:`).
pub const LABEL_TERMINATOR: char = ':';

/// A single operand after lexing. Shapes that fail to parse stay `Ident`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Register(u32),
    Immediate(Word),
    Address(u32),
    Ident(String),
}

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClass: u8 {
const REGISTER = 1 << 0;
const IMMEDIATE = 1 << 1;
const ADDRESS = 1 << 2;
const IDENT = 1 << 3;
}
}

impl Token {
    pub fn lex(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix(REGISTER_SIGIL) {
            if let Some(idx) = parse_digits(rest) {
                return Token::Register(idx);
            }
        } else if let Some(rest) = raw.strip_prefix(IMMEDIATE_SIGIL) {
            let digits = rest.strip_prefix('-').unwrap_or(rest);
            if is_digits(digits) {
                if let Ok(v) = rest.parse::<Word>() {
                    return Token::Immediate(v);
                }
            }
        } else if let Some(addr) = parse_digits(raw) {
            return Token::Address(addr);
        }
        Token::Ident(raw.to_string())
    }

    /// Shape class for pattern validation. A word that fails to parse is
    /// still classified by its leading sigil (`#x` is immediate-shaped,
    /// `R1x` register-shaped); only sigil-less words are `IDENT`.
    pub fn class(&self) -> TokenClass {
        match self {
            Token::Register(_) => TokenClass::REGISTER,
            Token::Immediate(_) => TokenClass::IMMEDIATE,
            Token::Address(_) => TokenClass::ADDRESS,
            Token::Ident(s) if s.starts_with(REGISTER_SIGIL) => TokenClass::REGISTER,
            Token::Ident(s) if s.starts_with(IMMEDIATE_SIGIL) => TokenClass::IMMEDIATE,
            // Digits too large for an address.
            Token::Ident(s) if is_digits(s) => TokenClass::ADDRESS,
            Token::Ident(_) => TokenClass::IDENT,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Register(i) => write!(f, "{REGISTER_SIGIL}{i}"),
            Token::Immediate(v) => write!(f, "{IMMEDIATE_SIGIL}{v}"),
            Token::Address(a) => write!(f, "{a}"),
            Token::Ident(s) => f.write_str(s),
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_digits(s: &str) -> Option<u32> {
    if is_digits(s) {
        s.parse().ok()
    } else {
        None
    }
}

/// Commas separate operands the same way spaces do.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Split a raw line into its words.
pub fn split_line(line: &str) -> Vec<&str> {
    line.split(is_separator).filter(|w| !w.is_empty()).collect()
}

/// Name of the label defined by `word`, if it is a definition.
pub fn label_name(word: &str) -> Option<&str> {
    word.strip_suffix(LABEL_TERMINATOR).filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_operand_shapes() {
        assert_eq!(Token::lex("R0"), Token::Register(0));
        assert_eq!(Token::lex("R15"), Token::Register(15));
        assert_eq!(Token::lex("#42"), Token::Immediate(42));
        assert_eq!(Token::lex("#-7"), Token::Immediate(-7));
        assert_eq!(Token::lex("100"), Token::Address(100));
        assert_eq!(Token::lex("loop"), Token::Ident("loop".into()));
    }

    #[test]
    fn malformed_shapes_stay_identifiers() {
        for raw in ["R", "#", "#-", "#x1", "R1a", "R-1", "R99999999999", "12ab"] {
            assert_eq!(Token::lex(raw), Token::Ident(raw.into()), "{raw}");
        }
    }

    #[test]
    fn malformed_words_keep_their_sigil_class() {
        assert_eq!(Token::lex("#x").class(), TokenClass::IMMEDIATE);
        assert_eq!(Token::lex("#0x10").class(), TokenClass::IMMEDIATE);
        assert_eq!(Token::lex("R1x").class(), TokenClass::REGISTER);
        assert_eq!(Token::lex("RESULT").class(), TokenClass::REGISTER);
        assert_eq!(Token::lex("99999999999").class(), TokenClass::ADDRESS);
        assert_eq!(Token::lex("loop").class(), TokenClass::IDENT);
    }

    #[test]
    fn commas_and_runs_of_spaces_split_words() {
        assert_eq!(split_line("ADD R0,  R1 ,#2"), vec!["ADD", "R0", "R1", "#2"]);
        assert!(split_line("   ").is_empty());
    }

    #[test]
    fn label_definitions_need_a_name() {
        assert_eq!(label_name("loop:"), Some("loop"));
        assert_eq!(label_name(":"), None);
        assert_eq!(label_name("loop"), None);
    }

    #[test]
    fn display_round_trips_canonical_text() {
        assert_eq!(Token::Register(3).to_string(), "R3");
        assert_eq!(Token::Immediate(-1).to_string(), "#-1");
        assert_eq!(Token::Address(8).to_string(), "8");
    }
}
