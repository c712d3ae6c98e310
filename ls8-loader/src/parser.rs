//! Line parser

use crate::error::{LoaderError, MalformedReason, Result};
use crate::lexer::Token;
use logos::Logos;

/// Parse one source line.
///
/// Returns `Ok(None)` for blank and comment-only lines. `line` is 1-based and
/// only used for error reporting.
pub fn parse_line(text: &str, line: usize) -> Result<Option<u8>> {
    let malformed = |reason| LoaderError::MalformedLine {
        line,
        text: text.trim().to_string(),
        reason,
    };

    let mut lex = Token::lexer(text);
    let mut value = None;

    while let Some(token) = lex.next() {
        match token {
            Ok(Token::Binary(v)) => {
                if value.is_some() {
                    return Err(malformed(MalformedReason::ExtraTokens));
                }
                value = Some(v);
            }
            Ok(Token::Newline) => break,
            Err(()) => {
                let column = lex.span().start + 1;
                return Err(malformed(MalformedReason::InvalidToken { column }));
            }
        }
    }

    match value {
        None => Ok(None),
        Some(v) => u8::try_from(v)
            .map(Some)
            .map_err(|_| malformed(MalformedReason::OutOfRange)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_byte() {
        assert_eq!(parse_line("10000010", 1).unwrap(), Some(0b1000_0010));
        assert_eq!(parse_line("00000000", 1).unwrap(), Some(0));
        assert_eq!(parse_line("11111111", 1).unwrap(), Some(255));
    }

    #[test]
    fn test_parse_with_comment_and_whitespace() {
        assert_eq!(parse_line("  10000010 # LDI R0,8  ", 1).unwrap(), Some(0b1000_0010));
        assert_eq!(parse_line("\t00000001\r", 1).unwrap(), Some(1));
        assert_eq!(parse_line("1#no space before comment", 1).unwrap(), Some(1));
    }

    #[test]
    fn test_parse_blank_and_comment_only() {
        assert_eq!(parse_line("", 1).unwrap(), None);
        assert_eq!(parse_line("    ", 1).unwrap(), None);
        assert_eq!(parse_line("# print8.ls8", 1).unwrap(), None);
        assert_eq!(parse_line("   # indented comment", 1).unwrap(), None);
    }

    #[test]
    fn test_parse_short_values() {
        // Leading zeros are optional
        assert_eq!(parse_line("1000", 1).unwrap(), Some(8));
        assert_eq!(parse_line("0b1000", 1).unwrap(), Some(8));
    }

    #[test]
    fn test_parse_invalid_token() {
        let err = parse_line("LDI R0", 4).unwrap_err();
        match err {
            LoaderError::MalformedLine { line, text, reason } => {
                assert_eq!(line, 4);
                assert_eq!(text, "LDI R0");
                assert_eq!(reason, MalformedReason::InvalidToken { column: 1 });
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_non_binary_digit() {
        let err = parse_line("10000012", 1).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::MalformedLine {
                reason: MalformedReason::InvalidToken { column: 8 },
                ..
            }
        ));
    }

    #[test]
    fn test_parse_extra_tokens() {
        let err = parse_line("0001 0001", 1).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::MalformedLine {
                reason: MalformedReason::ExtraTokens,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_out_of_range() {
        let err = parse_line("100000000", 1).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::MalformedLine {
                reason: MalformedReason::OutOfRange,
                ..
            }
        ));
    }
}
