//! Python source spelling of constant payloads.

use std::fmt::Write;

use super::Literal;

/// Returns the literal as Python would print it with `repr`.
///
/// A misplaced node payload falls back to the node's own source text.
pub(crate) fn literal_repr(literal: &Literal) -> String {
    match literal {
        Literal::Bool(true) => "True".to_string(),
        Literal::Bool(false) => "False".to_string(),
        Literal::Int(value) => value.to_string(),
        Literal::Float(value) => float_repr(*value),
        Literal::Str(value) => str_repr(value),
        Literal::Node(node) => node.to_string(),
    }
}

fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "float('nan')".to_string();
    }
    if value.is_infinite() {
        let sign = if value.is_sign_negative() { "-" } else { "" };
        return format!("{sign}float('inf')");
    }

    // `{:?}` already picks the shortest round-trip digits and switches to
    // scientific notation at the same magnitudes Python does; only the
    // exponent spelling differs (`1e16` versus `1e+16`, `1e-5` versus `1e-05`).
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

fn str_repr(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch == quote => {
                out.push('\\');
                out.push(ch);
            }
            ch if ch.is_control() => {
                let code = u32::from(ch);
                // Writing into a String cannot fail.
                let _ = match code {
                    0..=0xff => write!(out, "\\x{code:02x}"),
                    0x100..=0xffff => write!(out, "\\u{code:04x}"),
                    _ => write!(out, "\\U{code:08x}"),
                };
            }
            ch => out.push(ch),
        }
    }
    out.push(quote);
    out
}
