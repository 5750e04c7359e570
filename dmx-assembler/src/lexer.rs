//! # Lexer for DMX instruction text
//!
//! Works on one instruction (label prefix and comment already removed).
//! Commas and whitespace both separate tokens.

use logos::Logos;

fn parse_decimal(lex: &mut logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

fn parse_hex(lex: &mut logos::Lexer<Token>) -> Option<i64> {
    let slice = lex.slice();
    let (negative, digits) = match slice.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, slice),
    };
    let value = i64::from_str_radix(&digits[2..], 16).ok()?;
    Some(if negative { -value } else { value })
}

/// Tokens for DMX assembly
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t,]+")]
pub enum Token {
    /// Register (R0-R7)
    #[regex(r"R[0-7]", callback = |lex| lex.slice()[1..].parse::<u8>().ok(), priority = 5)]
    Register(u8),

    /// Identifier (mnemonics, label references)
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", callback = |lex| lex.slice().to_string(), priority = 3)]
    Identifier(String),

    /// Decimal or `0x` hexadecimal, optionally negative
    #[regex(r"-?[0-9]+", callback = parse_decimal, priority = 3)]
    #[regex(r"-?0x[0-9a-fA-F]+", callback = parse_hex, priority = 3)]
    Number(i64),

    /// Anything else up to the next separator
    #[regex(r"[^ \t,]+", callback = |lex| lex.slice().to_string(), priority = 1)]
    Unknown(String),
}

/// Tokenize an instruction. Numbers that overflow `i64` come back as
/// [`Token::Unknown`] carrying their source text.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut lexer = Token::lexer(text);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => tokens.push(Token::Unknown(lexer.slice().to_string())),
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_registers() {
        let mut lex = Token::lexer("R0 R7");
        assert_eq!(lex.next(), Some(Ok(Token::Register(0))));
        assert_eq!(lex.next(), Some(Ok(Token::Register(7))));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_lexer_register_lookalikes() {
        assert_eq!(tokenize("R8"), vec![Token::Identifier("R8".to_string())]);
        assert_eq!(tokenize("R70"), vec![Token::Identifier("R70".to_string())]);
        assert_eq!(tokenize("r1"), vec![Token::Identifier("r1".to_string())]);
    }

    #[test]
    fn test_lexer_numbers() {
        let mut lex = Token::lexer("42 -10 0x1A -0x80");
        assert_eq!(lex.next(), Some(Ok(Token::Number(42))));
        assert_eq!(lex.next(), Some(Ok(Token::Number(-10))));
        assert_eq!(lex.next(), Some(Ok(Token::Number(0x1A))));
        assert_eq!(lex.next(), Some(Ok(Token::Number(-0x80))));
    }

    #[test]
    fn test_lexer_instruction() {
        let tokens = tokenize("add R1, R2,R3");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("add".to_string()),
                Token::Register(1),
                Token::Register(2),
                Token::Register(3),
            ]
        );
    }

    #[test]
    fn test_lexer_unknown() {
        assert_eq!(tokenize("3.14"), vec![Token::Unknown("3.14".to_string())]);
        assert_eq!(tokenize("0x1G"), vec![Token::Unknown("0x1G".to_string())]);
    }

    #[test]
    fn test_lexer_overflow_is_unknown() {
        let text = "99999999999999999999";
        assert_eq!(tokenize(text), vec![Token::Unknown(text.to_string())]);
    }
}
