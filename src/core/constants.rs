/// Character set used to encode coordinate digits.
///
/// The 20 symbols avoid look-alike pairs (no `0`/`O`, no `1`/`I`) and
/// accidental words. Codes compare case-insensitively.
pub const CODE_ALPHABET: &str = "23456789CFGHJMPQRVWX";

/// Number of symbols in the alphabet, i.e. the encoding base.
pub const ENCODING_BASE: usize = 20;

/// Character marking the end of the leading digits.
pub const SEPARATOR: char = '+';

/// Number of significant digits before the separator in a full code.
pub const SEPARATOR_POSITION: usize = 8;

/// Character used to pad a full code out to the separator position.
pub const PADDING_CHARACTER: char = '0';

/// Maximum absolute latitude in degrees.
pub const LATITUDE_MAX: f64 = 90.0;

/// Maximum absolute longitude in degrees.
pub const LONGITUDE_MAX: f64 = 180.0;

/// Number of significant digits encoded as latitude/longitude pairs.
pub const PAIR_CODE_LENGTH: usize = 10;

/// Degrees covered per digit pair at positions 0-4.
pub const PAIR_RESOLUTIONS: [f64; 5] = [20.0, 1.0, 0.05, 0.0025, 0.000125];

/// Columns in the refinement grid used for digits past the pair stage.
pub const GRID_COLUMNS: usize = 4;

/// Rows in the refinement grid used for digits past the pair stage.
pub const GRID_ROWS: usize = 5;

/// Size in degrees of the cell refined by the first grid digit.
pub const GRID_SIZE_DEGREES: f64 = 0.000125;

/// Significant digits beyond this count carry no extra precision.
pub const MAX_DIGIT_COUNT: usize = 15;

/// Shortest code that `shorten` will trim.
pub const MIN_TRIMMABLE_CODE_LENGTH: usize = 6;

/// Returns the digit value of an alphabet character, case-insensitively.
pub(crate) fn digit_value(c: char) -> Option<usize> {
    CODE_ALPHABET.find(c.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_length_matches_base() {
        assert_eq!(CODE_ALPHABET.len(), ENCODING_BASE);
    }

    #[test]
    fn test_digit_value_case_insensitive() {
        assert_eq!(digit_value('2'), Some(0));
        assert_eq!(digit_value('X'), Some(19));
        assert_eq!(digit_value('x'), Some(19));
        assert_eq!(digit_value('c'), Some(8));
    }

    #[test]
    fn test_digit_value_rejects_non_alphabet() {
        assert_eq!(digit_value('0'), None);
        assert_eq!(digit_value('1'), None);
        assert_eq!(digit_value('A'), None);
        assert_eq!(digit_value('+'), None);
    }

    #[test]
    fn test_resolutions_shrink_by_base() {
        for pair in PAIR_RESOLUTIONS.windows(2) {
            assert!((pair[0] / pair[1] - ENCODING_BASE as f64).abs() < 1e-9);
        }
        assert_eq!(PAIR_RESOLUTIONS[4], GRID_SIZE_DEGREES);
    }
}
