use crate::error::{Error, Result};
use crate::planner::ValueSequence;

/// Upper bound on the cards one deck may expand to.
pub const MAX_DECK_CARDS: usize = 10_000;

/// Parses a deck listing into the card order.
///
/// Each line holds whitespace separated hex codes. A code may carry a
/// quantity prefix, attached (`3x41`) or as its own token (`3x 41`), which
/// repeats it. Empty lines and `#` or `//` comments are
/// skipped.
pub fn parse_deck(input: &str) -> Result<ValueSequence> {
    let mut values = Vec::new();

    for (number, line) in input.lines().enumerate() {
        let line = strip_comment(line).trim();

        // blank once comments are stripped
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        while let Some(token) = tokens.next() {
            let (quantity, code) = match split_quantity(token) {
                Some((quantity, "")) => {
                    let code = tokens.next().ok_or_else(|| Error::Parse {
                        line: number + 1,
                        message: format!("quantity {quantity} is not followed by a value"),
                    })?;
                    (quantity, code)
                }
                Some((quantity, code)) => (quantity, code),
                None => (1, token),
            };

            if quantity == 0 {
                return Err(Error::Parse {
                    line: number + 1,
                    message: format!("zero quantity for {code:?}"),
                });
            }
            if code.is_empty() || !code.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(Error::Parse {
                    line: number + 1,
                    message: format!("{code:?} is not a hex code"),
                });
            }
            match values.len().checked_add(quantity) {
                Some(total) if total <= MAX_DECK_CARDS => {}
                _ => {
                    return Err(Error::Parse {
                        line: number + 1,
                        message: format!("{quantity}x{code} exceeds the {MAX_DECK_CARDS} card limit"),
                    });
                }
            }
            values.extend(std::iter::repeat_n(code.to_ascii_uppercase(), quantity));
        }
    }

    Ok(ValueSequence::new(values))
}

fn strip_comment(line: &str) -> &str {
    let cut = [line.find('#'), line.find("//")].into_iter().flatten().min();
    match cut {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Splits `3x41` into `(3, "41")` and `3x` into `(3, "")`. Anything
/// without the `x` marker is a plain code, so `20` stays a value.
fn split_quantity(token: &str) -> Option<(usize, &str)> {
    let split_idx = token.find(|c: char| !c.is_ascii_digit())?;
    if split_idx == 0 {
        return None;
    }
    let (qty_str, rest) = token.split_at(split_idx);
    let rest = rest.strip_prefix(['x', 'X'])?;
    qty_str.parse().ok().map(|qty| (qty, rest))
}
