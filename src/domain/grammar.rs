// Algebraic constraint grammar: `<term>(+<term>|-<term>)* <comparator> <number>`
//
// Variable names are positional separators only. The k-th coefficient belongs
// to the k-th variable token, whatever its name.

use tracing::debug;

use super::solver_service::{Result, SolverError};
use super::value_objects::Comparison;

/// Split a constraint into coefficients, comparator and right-hand side.
pub fn parse_constraint(text: &str) -> Result<(Vec<f64>, Comparison, f64)> {
    let text = text.trim();
    let tokens = comparator_tokens(text);

    let &(start, len) = match tokens.as_slice() {
        [single] => single,
        _ => {
            return Err(SolverError::InvalidFormat(format!(
                "expected exactly one of '<=', '=', '>=' in '{}', found {}",
                text,
                tokens.len()
            )))
        }
    };

    let coefficients = parse_coefficients(&text[..start]);
    let comparison = parse_comparison(&text[start..start + len]);
    let value = lenient_number(&text[start + len..]);

    Ok((coefficients, comparison, value))
}

/// Positions and lengths of every comparator token, left to right.
fn comparator_tokens(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' | b'>' if bytes.get(i + 1) == Some(&b'=') => {
                tokens.push((i, 2));
                i += 2;
            }
            b'=' => {
                tokens.push((i, 1));
                i += 1;
            }
            _ => i += 1,
        }
    }
    tokens
}

/// Parse the left-hand side of a constraint into positional coefficients.
///
/// A segment reduced to a bare sign counts as magnitude 1. Text after the
/// last variable token is discarded. An expression without variable tokens
/// yields no coefficients.
pub fn parse_coefficients(expression: &str) -> Vec<f64> {
    let mut expression: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    if !expression.is_empty() && !expression.starts_with(['+', '-']) {
        expression.insert(0, '+');
    }

    let mut coefficients = Vec::new();
    let mut segment = String::new();
    let mut chars = expression.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_ascii_alphabetic() {
            segment.push(c);
            continue;
        }

        // Variable token: letters followed by optional digits
        while chars.next_if(|next| next.is_ascii_alphabetic()).is_some() {}
        while chars.next_if(|next| next.is_ascii_digit()).is_some() {}

        coefficients.push(segment_coefficient(&segment));
        segment.clear();
    }

    if !segment.is_empty() {
        debug!(
            component = "grammar",
            operation = "parse_coefficients",
            trailing = %segment,
            "Discarding text after the last variable"
        );
    }

    coefficients
}

fn segment_coefficient(segment: &str) -> f64 {
    if segment.is_empty() || segment.ends_with(['+', '-']) {
        let sign = if segment.ends_with('-') { -1.0 } else { 1.0 };
        // "+" or "-" alone means unit magnitude; anything longer is malformed
        // and is parsed leniently with a trailing 1.
        if segment.len() <= 1 {
            return sign;
        }
        return lenient_number(&format!("{}1", segment));
    }
    lenient_number(segment)
}

pub fn parse_comparison(token: &str) -> Comparison {
    match token {
        "<=" => Comparison::LessOrEqual,
        ">=" => Comparison::GreaterOrEqual,
        _ => Comparison::Equal,
    }
}

/// Loose numeric coercion: the longest leading number in `text`, or zero.
///
/// Leading whitespace is skipped and anything after the number is ignored,
/// so `"12abc"` is 12 and `"abc"` is 0. Malformed input is not rejected.
pub fn lenient_number(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().unwrap_or(0.0)
}
