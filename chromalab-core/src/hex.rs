use crate::color::Rgb;
use crate::error::ColorError;

/// Format as `#RRGGBB` with upper-case digits.
pub fn to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// Parse `#RGB` or `#RRGGBB` (the `#` is optional, case-insensitive).
///
/// Shorthand digits are doubled, so `#abc` is `#aabbcc`.
pub fn parse_hex(input: &str) -> crate::Result<Rgb> {
    let invalid = || ColorError::InvalidFormat {
        input: input.to_string(),
    };

    let digits = input.trim_start_matches('#');
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(invalid()),
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}
