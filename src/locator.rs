//! XPath locator templates.
//!
//! Page objects keep their locators as templates such as
//! `//table[@id='%s']//td[%s]` and fill the placeholders at call time.
//! `%s` consumes the next value, `%2$s` refers to the second value and `%%`
//! produces a literal percent sign.

use crate::errors::{PageError, Result};

/// Substitute `values` into the placeholders of `template`.
///
/// Fails with [`PageError::LocatorFormat`] when the template consumes a
/// different number of values than provided or contains an unknown `%`
/// conversion.
pub fn resolve(template: &str, values: &[&str]) -> Result<String> {
    let mut resolved = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    let mut next_sequential = 0usize;
    let mut highest_positional = 0usize;

    let format_error = |reason: String| PageError::LocatorFormat {
        locator: template.to_string(),
        reason,
    };

    while let Some((offset, c)) = chars.next() {
        if c != '%' {
            resolved.push(c);
            continue;
        }

        match chars.next() {
            Some((_, '%')) => resolved.push('%'),
            Some((_, 's')) => {
                let value = values.get(next_sequential).ok_or_else(|| {
                    format_error(format!(
                        "placeholder #{} has no value ({} provided)",
                        next_sequential + 1,
                        values.len()
                    ))
                })?;
                resolved.push_str(value);
                next_sequential += 1;
            }
            Some((_, d)) if d.is_ascii_digit() => {
                let mut digits = String::from(d);
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_ascii_digit() {
                        digits.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let terminated = matches!(chars.next(), Some((_, '$')))
                    && matches!(chars.next(), Some((_, 's')));
                if !terminated {
                    return Err(format_error(format!(
                        "malformed positional placeholder at offset {}",
                        offset
                    )));
                }
                let index: usize = digits
                    .parse()
                    .map_err(|_| format_error(format!("invalid placeholder index '{}'", digits)))?;
                if index == 0 {
                    return Err(format_error("placeholder indexes start at 1".to_string()));
                }
                let value = values.get(index - 1).ok_or_else(|| {
                    format_error(format!(
                        "placeholder %{}$s has no value ({} provided)",
                        index,
                        values.len()
                    ))
                })?;
                resolved.push_str(value);
                highest_positional = highest_positional.max(index);
            }
            Some((_, other)) => {
                return Err(format_error(format!(
                    "unsupported conversion '%{}' at offset {}",
                    other, offset
                )));
            }
            None => {
                return Err(format_error("dangling '%' at end of locator".to_string()));
            }
        }
    }

    let consumed = next_sequential.max(highest_positional);
    if consumed != values.len() {
        return Err(format_error(format!(
            "expected {} value(s), got {}",
            consumed,
            values.len()
        )));
    }

    Ok(resolved)
}

/// Quote `text` as an XPath string literal.
///
/// XPath 1.0 has no escape sequences, so text holding both quote kinds is
/// spliced together with `concat()`.
pub fn xpath_literal(text: &str) -> String {
    if !text.contains('"') {
        return format!("\"{}\"", text);
    }
    if !text.contains('\'') {
        return format!("'{}'", text);
    }

    let mut parts = Vec::new();
    for (i, chunk) in text.split('"').enumerate() {
        if i > 0 {
            parts.push("'\"'".to_string());
        }
        if !chunk.is_empty() {
            parts.push(format!("\"{}\"", chunk));
        }
    }
    format!("concat({})", parts.join(", "))
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod locator_test;
