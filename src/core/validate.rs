use crate::core::constants::{
    ENCODING_BASE, LATITUDE_MAX, LONGITUDE_MAX, PADDING_CHARACTER, SEPARATOR, SEPARATOR_POSITION,
    digit_value,
};

/// Checks whether a string is a well-formed plus code.
///
/// A well-formed code has exactly one separator at an even index no later
/// than position 8, an optional single run of padding filling a full code
/// out to a trailing separator, never exactly one character after the
/// separator, and nothing but alphabet characters otherwise. Comparison is
/// case-insensitive.
///
/// # Example
/// ```
/// use pluscode_rs::is_valid;
///
/// assert!(is_valid("8FWC2345+G6"));
/// assert!(is_valid("8FWCX400+"));
/// assert!(!is_valid("8FWC2345+G"));
/// ```
pub fn is_valid(code: &str) -> bool {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() < 2 {
        return false;
    }

    let mut separators = chars.iter().enumerate().filter(|&(_, &c)| c == SEPARATOR);
    let sep = match separators.next() {
        Some((i, _)) => i,
        None => return false,
    };
    if separators.next().is_some() {
        return false;
    }
    if sep > SEPARATOR_POSITION || sep % 2 == 1 {
        return false;
    }

    if let Some(pad_start) = chars.iter().position(|&c| c == PADDING_CHARACTER) {
        // Short codes are never padded.
        if sep < SEPARATOR_POSITION {
            return false;
        }
        if pad_start == 0 {
            return false;
        }
        let pad_end = match chars.iter().rposition(|&c| c == PADDING_CHARACTER) {
            Some(i) => i + 1,
            None => return false,
        };
        let run = &chars[pad_start..pad_end];
        if run.iter().any(|&c| c != PADDING_CHARACTER) {
            return false;
        }
        if run.len() % 2 == 1 || run.len() > SEPARATOR_POSITION - 2 {
            return false;
        }
        // The run fills the code up to a trailing separator.
        if pad_end != sep || sep != chars.len() - 1 {
            return false;
        }
    }

    // A single character after the separator is not decodable.
    if chars.len() - sep - 1 == 1 {
        return false;
    }

    chars
        .iter()
        .enumerate()
        .all(|(i, &c)| i == sep || c == PADDING_CHARACTER || digit_value(c).is_some())
}

/// Checks whether a string is a well-formed short code.
///
/// Short codes have fewer than 8 digits before the separator and need a
/// reference location to be recovered into a full code.
///
/// # Example
/// ```
/// use pluscode_rs::is_short;
///
/// assert!(is_short("WC2345+G6"));
/// assert!(!is_short("8FWC2345+G6"));
/// ```
pub fn is_short(code: &str) -> bool {
    if !is_valid(code) {
        return false;
    }
    match code.chars().position(|c| c == SEPARATOR) {
        Some(sep) => sep < SEPARATOR_POSITION,
        None => false,
    }
}

/// Checks whether a string is a well-formed full code.
///
/// On top of validity, the leading latitude digit must stay below the pole
/// and the leading longitude digit below the antimeridian wrap, so the code
/// denotes a decodable area.
///
/// # Example
/// ```
/// use pluscode_rs::is_full;
///
/// assert!(is_full("8FWC2345+G6"));
/// assert!(!is_full("WC2345+G6"));
/// ```
pub fn is_full(code: &str) -> bool {
    if !is_valid(code) || is_short(code) {
        return false;
    }
    let mut chars = code.chars();

    let lat_digit = match chars.next().and_then(digit_value) {
        Some(d) => d,
        None => return false,
    };
    if (lat_digit * ENCODING_BASE) as f64 >= LATITUDE_MAX * 2.0 {
        return false;
    }

    if let Some(c) = chars.next() {
        let lng_digit = match digit_value(c) {
            Some(d) => d,
            None => return false,
        };
        if (lng_digit * ENCODING_BASE) as f64 >= LONGITUDE_MAX * 2.0 {
            return false;
        }
    }
    true
}
