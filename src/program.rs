use std::fs;
use std::path::Path;

use thiserror::Error;

/// A failure to turn a program source into memory.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("token {index} ('{token}') is not an integer")]
    BadToken { index: usize, token: String },

    #[error("program is empty")]
    Empty,
}

/// Parse program source — one line of comma-separated signed integers —
/// into initial memory. Whitespace around tokens (including the trailing
/// newline) is ignored.
pub fn parse(src: &str) -> Result<Vec<i64>, ParseError> {
    let src = src.trim();
    if src.is_empty() {
        return Err(ParseError::Empty);
    }
    src.split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            token.parse::<i64>().map_err(|_| ParseError::BadToken {
                index,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Read and parse a program file.
pub fn load(path: &Path) -> Result<Vec<i64>, ParseError> {
    let src = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        assert_eq!(parse("1,0,0,0,99").unwrap(), vec![1, 0, 0, 0, 99]);
    }

    #[test]
    fn test_parse_trailing_newline_and_spaces() {
        assert_eq!(parse(" 1, 2 ,3\n").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_negative_values() {
        assert_eq!(parse("-1,2,-99").unwrap(), vec![-1, 2, -99]);
    }

    #[test]
    fn test_parse_bad_token() {
        match parse("1,x,3") {
            Err(ParseError::BadToken { index, token }) => {
                assert_eq!(index, 1);
                assert_eq!(token, "x");
            }
            other => panic!("expected BadToken, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_missing_token() {
        // "1,,3" has an empty second token, which is not an integer.
        assert!(matches!(
            parse("1,,3"),
            Err(ParseError::BadToken { index: 1, .. })
        ));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse("  \n"), Err(ParseError::Empty)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/program")).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
