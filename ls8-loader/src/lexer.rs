//! # Lexer for LS-8 Program Text

use logos::Logos;

/// Tokens within a single source line
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")] // Skip whitespace
#[logos(skip r"#[^\n]*")] // Skip comments
pub enum Token {
    /// Base-2 number, optionally `0b`-prefixed and `_`-separated
    #[regex(r"(0[bB])?[01]+(_[01]+)*", |lex| parse_binary(lex.slice()))]
    Binary(u64),

    /// Newline
    #[regex(r"\n")]
    Newline,
}

// Values too wide for u64 saturate; the parser rejects them as out of range.
fn parse_binary(slice: &str) -> u64 {
    let digits: String = slice
        .trim_start_matches("0b")
        .trim_start_matches("0B")
        .chars()
        .filter(|&c| c != '_')
        .collect();
    u64::from_str_radix(&digits, 2).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_binary() {
        let mut lex = Token::lexer("10000010 0b1010 1_0000");
        assert_eq!(lex.next(), Some(Ok(Token::Binary(0b1000_0010))));
        assert_eq!(lex.next(), Some(Ok(Token::Binary(0b1010))));
        assert_eq!(lex.next(), Some(Ok(Token::Binary(0b1_0000))));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_lexer_skips_comments() {
        let mut lex = Token::lexer("00000001 # HLT\n# only a comment\n");
        assert_eq!(lex.next(), Some(Ok(Token::Binary(1))));
        assert_eq!(lex.next(), Some(Ok(Token::Newline)));
        assert_eq!(lex.next(), Some(Ok(Token::Newline)));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_lexer_rejects_non_binary() {
        let mut lex = Token::lexer("LDI");
        assert_eq!(lex.next(), Some(Err(())));
    }

    #[test]
    fn test_lexer_saturates_wide_values() {
        let wide = "1".repeat(80);
        let mut lex = Token::lexer(&wide);
        assert_eq!(lex.next(), Some(Ok(Token::Binary(u64::MAX))));
    }
}
