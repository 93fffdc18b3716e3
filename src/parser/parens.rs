//! Single-pass paren-matching map (spec §4.2.1): `map[i]` gives the index of
//! the `)` matching the `(` at `i`, so the grammar never re-scans to find a
//! balance point.

use super::diagnostics::{ParseError, ParseErrorKind};

/// Build the paren-matching table for `chars`. Entries at non-`(` positions
/// are unused and left at 0.
pub fn build_paren_map(chars: &[char]) -> Result<Vec<usize>, ParseError> {
    let mut map = vec![0usize; chars.len()];
    let mut stack = Vec::new();

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '(' => stack.push(i),
            ')' => match stack.pop() {
                Some(open) => map[open] = i,
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnbalancedParenExpectedOpen,
                        &chars.iter().collect::<String>(),
                        i,
                    )
                    .with_underline(0, i + 1));
                }
            },
            _ => {}
        }
    }

    if let Some(&pos) = stack.last() {
        return Err(ParseError::new(
            ParseErrorKind::UnbalancedParenExpectedClose,
            &chars.iter().collect::<String>(),
            pos,
        )
        .with_underline(pos, chars.len()));
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn matches_nested_parens() {
        let c = chars("((p0)&(p1))");
        let map = build_paren_map(&c).unwrap();
        assert_eq!(map[0], 10);
        assert_eq!(map[1], 4);
        assert_eq!(map[6], 9);
    }

    #[test]
    fn rejects_unmatched_open() {
        let c = chars("(p0&p1");
        assert!(build_paren_map(&c).is_err());
    }

    #[test]
    fn rejects_unmatched_close() {
        let c = chars("p0&p1)");
        assert!(build_paren_map(&c).is_err());
    }
}
