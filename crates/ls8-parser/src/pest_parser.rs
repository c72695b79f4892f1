//! Pest-based parser for the LS-8 program text format

use crate::error::ParseError;
use crate::program::Program;
use pest::error::LineColLocation;
use pest::Parser;
use pest_derive::Parser;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Parser)]
#[grammar = "ls8.pest"]
pub struct Ls8Parser;

/// Parse program text into a byte image
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let pairs = Ls8Parser::parse(Rule::program, source)
        .map_err(|err| invalid_line(&err, source))?;

    let mut program = Program::new();
    for pair in pairs.flatten() {
        if pair.as_rule() != Rule::byte {
            continue;
        }
        let (line, column) = pair.as_span().start_pos().line_col();
        let value = u8::from_str_radix(pair.as_str(), 2).map_err(|_| ParseError::InvalidLine {
            line,
            column,
            text: pair.as_str().to_string(),
        })?;
        program.push(value, line);
    }

    Ok(program)
}

/// Read and parse a program file
pub fn load_file(path: impl AsRef<Path>) -> Result<Program, ParseError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ParseError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ParseError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    parse(&source)
}

fn invalid_line(err: &pest::error::Error<Rule>, source: &str) -> ParseError {
    let (line, column) = match err.line_col {
        LineColLocation::Pos(pos) => pos,
        LineColLocation::Span(start, _) => start,
    };
    let text = source
        .lines()
        .nth(line.saturating_sub(1))
        .unwrap_or_default()
        .trim()
        .to_string();
    ParseError::InvalidLine { line, column, text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print8() {
        let source = "\
# print8.ls8
10000010 # LDI R0,8
00000000
00001000
01000111 # PRN R0
00000000
00000001 # HLT
";
        let program = parse(source).unwrap();
        assert_eq!(
            program.bytes(),
            &[0b1000_0010, 0b0000_0000, 0b0000_1000, 0b0100_0111, 0b0000_0000, 0b0000_0001]
        );
        assert_eq!(program.line_of(0), Some(2));
        assert_eq!(program.line_of(5), Some(7));
    }

    #[test]
    fn test_blank_and_comment_lines() {
        let program = parse("\n   \n# only a comment\n\t00000001\t# HLT\n\n").unwrap();
        assert_eq!(program.bytes(), &[1]);
        assert_eq!(program.line_of(0), Some(4));
    }

    #[test]
    fn test_empty_source() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let program = parse("10000010\r\n00000001\r\n00000010\r\n").unwrap();
        assert_eq!(program.bytes(), &[0b1000_0010, 1, 2]);
    }

    #[test]
    fn test_comment_without_space() {
        let program = parse("01000111#PRN\n").unwrap();
        assert_eq!(program.bytes(), &[0b0100_0111]);
    }

    #[test]
    fn test_rejects_non_binary_digit() {
        let err = parse("00000001\n10000012\n").unwrap_err();
        match err {
            ParseError::InvalidLine { line, text, .. } => {
                assert_eq!(line, 2);
                assert_eq!(text, "10000012");
            }
            other => panic!("Expected InvalidLine, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_wrong_width() {
        assert_eq!(parse("1000001\n").unwrap_err().line(), Some(1));
        assert_eq!(parse("100000101\n").unwrap_err().line(), Some(1));
    }

    #[test]
    fn test_rejects_two_bytes_on_one_line() {
        assert!(parse("00000001 00000001\n").is_err());
    }
}
