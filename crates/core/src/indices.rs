//! Parsing of comma-separated slide index lists.

use crate::{Error, Result};

/// Parse a list such as `"0, 2,2,1"` into zero-based slide indices.
///
/// Whitespace around tokens is ignored and repeats are kept. An empty list,
/// an empty token, a negative number or any non-numeric token is rejected.
pub fn parse_indices(list: &str) -> Result<Vec<usize>> {
    if list.trim().is_empty() {
        return Err(Error::EmptyIndexList);
    }

    list.split(',')
        .map(|token| {
            let token = token.trim();
            if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidIndex(token.to_string()));
            }
            token
                .parse::<usize>()
                .map_err(|_| Error::InvalidIndex(token.to_string()))
        })
        .collect()
}

/// Check every index against the number of slides in the source presentation.
pub fn check_indices(indices: &[usize], slide_count: usize) -> Result<()> {
    if indices.is_empty() {
        return Err(Error::EmptyIndexList);
    }
    match indices.iter().find(|&&i| i >= slide_count) {
        Some(&index) => Err(Error::IndexOutOfRange {
            index,
            count: slide_count,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_list() {
        assert_eq!(parse_indices("0,2,4").unwrap(), vec![0, 2, 4]);
        assert_eq!(parse_indices("3").unwrap(), vec![3]);
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        assert_eq!(parse_indices("0, 1, 2").unwrap(), parse_indices("0,1,2").unwrap());
        assert_eq!(parse_indices("  4 ,3 ").unwrap(), vec![4, 3]);
    }

    #[test]
    fn test_repeats_and_order_kept() {
        assert_eq!(parse_indices("0,1,1,2,2,2").unwrap(), vec![0, 1, 1, 2, 2, 2]);
        assert_eq!(parse_indices("4,3,2,1,0").unwrap(), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(matches!(parse_indices(""), Err(Error::EmptyIndexList)));
        assert!(matches!(parse_indices("   "), Err(Error::EmptyIndexList)));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert!(matches!(parse_indices("0,-1,2"), Err(Error::InvalidIndex(t)) if t == "-1"));
        assert!(matches!(parse_indices("0,a"), Err(Error::InvalidIndex(_))));
        assert!(matches!(parse_indices("0,,1"), Err(Error::InvalidIndex(_))));
        assert!(matches!(parse_indices("+1"), Err(Error::InvalidIndex(_))));
        assert!(matches!(parse_indices("1.5"), Err(Error::InvalidIndex(_))));
    }

    #[test]
    fn test_check_indices() {
        assert!(check_indices(&[0, 1, 2], 3).is_ok());
        assert!(matches!(
            check_indices(&[0, 1, 99], 3),
            Err(Error::IndexOutOfRange { index: 99, count: 3 })
        ));
        assert!(matches!(check_indices(&[], 3), Err(Error::EmptyIndexList)));
    }
}
