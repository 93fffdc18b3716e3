//! Recursive-descent grammar (spec §4.2.1–§4.2.3), a direct idiomatic port of
//! the original tool's `parse_single_stmt`/`parse_compound_stmt` split: try
//! the single-statement productions first, fall back to splitting on the
//! lowest-precedence binary operator outside any parens.

use std::sync::Arc;

use super::diagnostics::{ParseError, ParseErrorKind};
use crate::ast::{Bounds, Formula};

/* Precedence (lower value = binds tighter):
 *   0 : true false p#
 *   1 : F G ~
 *   2 : U R
 *   3 : &
 *   4 : ^
 *   5 : |
 *   6 : ->
 *   7 : <->
 */
const UNTIL_PREC: i32 = 2;
const RELEASE_PREC: i32 = 2;
const AND_PREC: i32 = 3;
const XOR_PREC: i32 = 4;
const OR_PREC: i32 = 5;
const IMPLIES_PREC: i32 = 6;
const EQUIV_PREC: i32 = 7;

pub struct Source<'a> {
    pub chars: &'a [char],
    pub text: String,
    pub paren_map: &'a [usize],
}

impl<'a> Source<'a> {
    fn err(&self, kind: ParseErrorKind, pos: usize) -> ParseError {
        ParseError::new(kind, &self.text, pos)
    }

    fn err_span(&self, kind: ParseErrorKind, pos: usize, begin: usize, end: usize) -> ParseError {
        self.err(kind, pos).with_underline(begin, end)
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_valid_num(chars: &[char], pos: usize, len: usize) -> bool {
    if len == 0 {
        return false;
    }
    chars[pos..pos + len].iter().all(|&c| is_digit(c))
}

/// Parse the `[lb,ub]` subscript starting at `pos`, spanning at most `len`
/// characters. Returns the bounds plus the index just past the closing `]`.
fn find_bounds(src: &Source, pos: usize, len: usize) -> Result<(Bounds, usize), ParseError> {
    let end = pos + len;
    let window = &src.chars[pos..end];
    let lbrace = window.iter().position(|&c| c == '[').map(|i| pos + i);
    let comma = window.iter().position(|&c| c == ',').map(|i| pos + i);
    let rbrace = window.iter().position(|&c| c == ']').map(|i| pos + i);

    let (lbrace, comma, rbrace) = match (lbrace, comma, rbrace) {
        (Some(l), Some(c), Some(r)) if l < end && c < end && r < end => (l, c, r),
        _ => {
            return Err(src.err_span(ParseErrorKind::MissingBoundsSubscript, pos, pos, end));
        }
    };

    let lb_str: String = src.chars[lbrace + 1..comma].iter().collect();
    let ub_str: String = src.chars[comma + 1..rbrace].iter().collect();
    let (lb, ub) = match (lb_str.parse::<usize>(), ub_str.parse::<usize>()) {
        (Ok(lb), Ok(ub)) => (lb, ub),
        _ => {
            return Err(src.err_span(ParseErrorKind::IllegalBoundsSubscript, pos, pos, rbrace + 1));
        }
    };
    let bounds = Bounds::new(lb, ub)
        .map_err(|_| src.err_span(ParseErrorKind::IllegalBoundsSubscript, pos, pos, rbrace + 1))?;
    Ok((bounds, rbrace + 1))
}

/// Index of the binary operator with the lowest precedence in `[pos, pos+len)`,
/// skipping over anything inside balanced parens.
fn find_lowest_prec_binary_op(src: &Source, pos: usize, len: usize) -> Result<usize, ParseError> {
    let chars = src.chars;
    let begin = pos;
    let end = pos + len;
    let mut lowest_prec_pos: Option<usize> = None;
    let mut lowest_prec = -1i32;

    let mut i = pos;
    while i < end {
        if chars[i] == '(' {
            i = src.paren_map[i];
            i += 1;
            continue;
        }
        let mut candidate: Option<i32> = None;
        match chars[i] {
            'U' => candidate = Some(UNTIL_PREC),
            'R' => candidate = Some(RELEASE_PREC),
            '&' => candidate = Some(AND_PREC),
            '^' => candidate = Some(XOR_PREC),
            '|' => candidate = Some(OR_PREC),
            '-' => {
                if begin < i && i + 1 < end && chars[i - 1] != '<' && chars[i + 1] == '>' {
                    candidate = Some(IMPLIES_PREC);
                }
            }
            '<' => {
                if i + 2 < end && chars[i + 1] == '-' && chars[i + 2] == '>' {
                    candidate = Some(EQUIV_PREC);
                }
            }
            _ => {}
        }
        if let Some(prec) = candidate {
            if prec > lowest_prec {
                lowest_prec = prec;
                lowest_prec_pos = Some(i);
            }
        }
        i += 1;
    }

    lowest_prec_pos.ok_or_else(|| src.err_span(ParseErrorKind::UnexpectedToken, begin, begin, end))
}

pub fn parse_range(src: &Source, pos: usize, len: usize) -> Result<Arc<Formula>, ParseError> {
    if let Some(ast) = parse_single_stmt(src, pos, len)? {
        return Ok(ast);
    }
    if let Some(ast) = parse_compound_stmt(src, pos, len)? {
        return Ok(ast);
    }
    Err(src.err_span(ParseErrorKind::UnexpectedToken, pos, pos, pos + len))
}

fn parse_single_stmt(src: &Source, pos: usize, len: usize) -> Result<Option<Arc<Formula>>, ParseError> {
    let chars = src.chars;
    let end = pos + len;

    match chars[pos] {
        't' if len == 1
            || (len == 2 && chars[pos + 1] == 't')
            || (len == 4 && chars[pos + 1] == 'r' && chars[pos + 2] == 'u' && chars[pos + 3] == 'e') =>
        {
            Ok(Some(Formula::constant(true)))
        }
        'f' if len == 1
            || (len == 2 && chars[pos + 1] == 'f')
            || (len == 5
                && chars[pos + 1] == 'a'
                && chars[pos + 2] == 'l'
                && chars[pos + 3] == 's'
                && chars[pos + 4] == 'e') =>
        {
            Ok(Some(Formula::constant(false)))
        }
        'p' if is_valid_num(chars, pos + 1, len - 1) => {
            let id_str: String = chars[pos + 1..end].iter().collect();
            let id: u32 = id_str
                .parse()
                .map_err(|_| src.err_span(ParseErrorKind::UnexpectedToken, pos, pos, end))?;
            Ok(Some(Formula::variable(id)))
        }
        '(' => {
            let captured_length = src.paren_map[pos] - pos - 1;
            if captured_length + 2 == len {
                Ok(Some(parse_range(src, pos + 1, captured_length)?))
            } else {
                Ok(None)
            }
        }
        '~' | '!' => match parse_single_stmt(src, pos + 1, len - 1)? {
            Some(operand) => Ok(Some(Formula::negation(operand))),
            None => Ok(None),
        },
        'F' => {
            let (bounds, end_subscript) = find_bounds(src, pos + 1, len - 1)?;
            match parse_single_stmt(src, end_subscript, end - end_subscript)? {
                Some(operand) => Ok(Some(Formula::finally(bounds, operand))),
                None => Ok(None),
            }
        }
        'G' => {
            let (bounds, end_subscript) = find_bounds(src, pos + 1, len - 1)?;
            match parse_single_stmt(src, end_subscript, end - end_subscript)? {
                Some(operand) => Ok(Some(Formula::globally(bounds, operand))),
                None => Ok(None),
            }
        }
        _ => Ok(None),
    }
}

fn parse_compound_stmt(src: &Source, pos: usize, len: usize) -> Result<Option<Arc<Formula>>, ParseError> {
    let chars = src.chars;
    let end = pos + len;
    let op_pos = find_lowest_prec_binary_op(src, pos, len)?;

    match chars[op_pos] {
        'U' => {
            let (bounds, end_subscript) = find_bounds(src, op_pos + 1, len - 1)?;
            let left = parse_range(src, pos, op_pos - pos)?;
            let right = parse_range(src, end_subscript, end - end_subscript)?;
            Ok(Some(Formula::until(bounds, left, right)))
        }
        'R' => {
            let (bounds, end_subscript) = find_bounds(src, op_pos + 1, len - 1)?;
            let left = parse_range(src, pos, op_pos - pos)?;
            let right = parse_range(src, end_subscript, end - end_subscript)?;
            Ok(Some(Formula::release(bounds, left, right)))
        }
        '&' => {
            let left = parse_range(src, pos, op_pos - pos)?;
            let right = parse_range(src, op_pos + 1, end - op_pos - 1)?;
            Ok(Some(Formula::and(left, right)))
        }
        '^' => {
            let left = parse_range(src, pos, op_pos - pos)?;
            let right = parse_range(src, op_pos + 1, end - op_pos - 1)?;
            Ok(Some(Formula::xor(left, right)))
        }
        '|' => {
            let left = parse_range(src, pos, op_pos - pos)?;
            let right = parse_range(src, op_pos + 1, end - op_pos - 1)?;
            Ok(Some(Formula::or(left, right)))
        }
        '-' if pos < op_pos && op_pos + 1 < end && chars[op_pos - 1] != '<' && chars[op_pos + 1] == '>' => {
            let left = parse_range(src, pos, op_pos - pos)?;
            let right = parse_range(src, op_pos + 2, end - op_pos - 2)?;
            Ok(Some(Formula::implies(left, right)))
        }
        '<' | '=' => {
            let left = parse_range(src, pos, op_pos - pos)?;
            let right = parse_range(src, op_pos + 3, end - op_pos - 3)?;
            Ok(Some(Formula::equiv(left, right)))
        }
        _ => Ok(None),
    }
}
