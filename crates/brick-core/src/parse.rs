//! Parsers for user-entered brick designations and colors.
//!
//! Built on `winnow` 0.7. Designations look like `2x4` (studs across ×
//! studs deep); colors are `#rgb`, `#rrggbb`, or `rgb(r, g, b)`.

use winnow::ascii::{Caseless, dec_uint, multispace0};
use winnow::combinator::{alt, delimited, preceded, separated_pair};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid color `{0}` (expected #rgb, #rrggbb or rgb(r, g, b))")]
    Color(String),
    #[error("invalid brick designation `{0}` (expected WxH, e.g. 2x4)")]
    Designation(String),
}

/// Parse a `WxH` designation into its stud counts.
pub fn parse_designation(input: &str) -> Result<(u32, u32), ParseError> {
    designation
        .parse(input.trim())
        .map_err(|_| ParseError::Designation(input.to_string()))
}

/// Parse a color string into RGB channels.
pub fn parse_color(input: &str) -> Result<[u8; 3], ParseError> {
    alt((hex_color, rgb_function))
        .parse(input.trim())
        .map_err(|_| ParseError::Color(input.to_string()))
}

fn designation(input: &mut &str) -> ModalResult<(u32, u32)> {
    separated_pair(dec_uint, one_of(['x', 'X']), dec_uint).parse_next(input)
}

fn hex_color(input: &mut &str) -> ModalResult<[u8; 3]> {
    preceded('#', take_while(1.., |c: char| c.is_ascii_hexdigit()))
        .verify_map(expand_hex)
        .parse_next(input)
}

fn rgb_function(input: &mut &str) -> ModalResult<[u8; 3]> {
    let _ = (Caseless("rgb"), multispace0, '(').parse_next(input)?;
    let (r, _, g, _, b) = (channel, ',', channel, ',', channel).parse_next(input)?;
    let _ = ')'.parse_next(input)?;
    Ok([r, g, b])
}

fn channel(input: &mut &str) -> ModalResult<u8> {
    delimited(multispace0, dec_uint, multispace0).parse_next(input)
}

fn expand_hex(digits: &str) -> Option<[u8; 3]> {
    let nibbles: Vec<u8> = digits
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    match nibbles[..] {
        [r, g, b] => Some([r * 17, g * 17, b * 17]),
        [r1, r2, g1, g2, b1, b2] => Some([r1 << 4 | r2, g1 << 4 | g2, b1 << 4 | b2]),
        _ => None,
    }
}
