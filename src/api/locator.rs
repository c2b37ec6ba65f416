use std::collections::HashSet;

use geo_types::LineString;

use crate::api::code_area::CodeArea;
use crate::core::constants::{
    ENCODING_BASE, LATITUDE_MAX, MAX_DIGIT_COUNT, MIN_TRIMMABLE_CODE_LENGTH, PADDING_CHARACTER,
    PAIR_CODE_LENGTH, PAIR_RESOLUTIONS, SEPARATOR, SEPARATOR_POSITION, digit_value,
};
use crate::core::grid::{decode_grid, encode_grid, latitude_precision};
use crate::core::pair::{decode_pairs, encode_pairs};
use crate::core::validate::{is_full, is_short};
use crate::util::coord::{Coordinate, clip_latitude, normalize_longitude};
use crate::util::error::PlusCodeError;

/// Encodes a coordinate into a plus code of the requested length.
///
/// Lengths below 2, or odd lengths inside the pair stage, are rejected;
/// lengths above 15 are clamped. Latitude is clipped to the poles and
/// longitude wrapped into range first, so any finite coordinate encodes.
///
/// # Example
/// ```
/// use pluscode_rs::encode;
/// use geo_types::point;
///
/// # fn main() -> Result<(), pluscode_rs::PlusCodeError> {
/// // x is longitude, y is latitude.
/// let code = encode(&(2.775, 20.375), 6)?;
/// assert_eq!(code, "7FG49Q00+");
///
/// let pt = point! { x: -1.217765625, y: 51.3701125 };
/// assert_eq!(encode(&pt, 11)?, "9C3W9QCJ+2VX");
/// # Ok(())
/// # }
/// ```
pub fn encode(coord: &impl Coordinate, code_length: usize) -> Result<String, PlusCodeError> {
    if code_length < 2 || (code_length < PAIR_CODE_LENGTH && code_length % 2 == 1) {
        return Err(PlusCodeError::InvalidCodeLength(code_length));
    }
    let code_length = code_length.min(MAX_DIGIT_COUNT);

    let mut latitude = clip_latitude(coord.y());
    let longitude = normalize_longitude(coord.x());

    // A code must denote a box strictly below the pole.
    if latitude == LATITUDE_MAX {
        latitude -= latitude_precision(code_length);
    }

    let mut code = encode_pairs(latitude, longitude, code_length.min(PAIR_CODE_LENGTH));
    if code_length > PAIR_CODE_LENGTH {
        code.push_str(&encode_grid(
            latitude,
            longitude,
            code_length - PAIR_CODE_LENGTH,
        ));
    }
    Ok(code)
}

/// Decodes a full plus code into the area it denotes.
///
/// Significant digits past the 15th are accepted but carry no further
/// precision and are ignored.
///
/// # Example
/// ```
/// use pluscode_rs::decode;
///
/// # fn main() -> Result<(), pluscode_rs::PlusCodeError> {
/// let area = decode("7FG49Q00+")?;
/// assert!((area.south - 20.35).abs() < 1e-10);
/// assert!((area.west - 2.75).abs() < 1e-10);
/// assert!((area.north - 20.4).abs() < 1e-10);
/// assert!((area.east - 2.8).abs() < 1e-10);
/// assert_eq!(area.code_length, 6);
/// # Ok(())
/// # }
/// ```
pub fn decode(code: &str) -> Result<CodeArea, PlusCodeError> {
    if !is_full(code) {
        return Err(PlusCodeError::NotFullCode(code.to_string()));
    }

    let digits: Vec<usize> = code
        .chars()
        .filter(|&c| c != SEPARATOR && c != PADDING_CHARACTER)
        .map(|c| digit_value(c).ok_or_else(|| PlusCodeError::NotFullCode(code.to_string())))
        .collect::<Result<_, _>>()?;

    let pair_count = digits.len().min(PAIR_CODE_LENGTH);
    let (south, west, north, east) = decode_pairs(&digits[..pair_count]);
    if digits.len() <= PAIR_CODE_LENGTH {
        return Ok(CodeArea::new(south, west, north, east, pair_count));
    }

    let grid_digits = &digits[PAIR_CODE_LENGTH..digits.len().min(MAX_DIGIT_COUNT)];
    let (grid_south, grid_west, grid_north, grid_east) = decode_grid(grid_digits);
    Ok(CodeArea::new(
        south + grid_south,
        west + grid_west,
        south + grid_north,
        west + grid_east,
        pair_count + grid_digits.len(),
    ))
}

/// Removes as many leading digits from a full code as a nearby reference
/// point allows.
///
/// The reference must sit well inside the trimmed cell: a 0.3 factor of the
/// cell resolution is used instead of the 0.5 half-cell bound, so the
/// result stays recoverable from reference points that are merely close,
/// not exact. Returns the code unchanged (uppercased) when no trim
/// qualifies.
///
/// # Example
/// ```
/// use pluscode_rs::shorten;
///
/// # fn main() -> Result<(), pluscode_rs::PlusCodeError> {
/// let short = shorten("9C3W9QCJ+2VX", &(-1.217765625, 51.3852125))?;
/// assert_eq!(short, "9QCJ+2VX");
/// # Ok(())
/// # }
/// ```
pub fn shorten(code: &str, reference: &impl Coordinate) -> Result<String, PlusCodeError> {
    if !is_full(code) {
        return Err(PlusCodeError::NotFullCode(code.to_string()));
    }
    if code.contains(PADDING_CHARACTER) {
        return Err(PlusCodeError::PaddedCode(code.to_string()));
    }
    let code = code.to_uppercase();
    let code_area = decode(&code)?;
    if code_area.code_length < MIN_TRIMMABLE_CODE_LENGTH {
        return Err(PlusCodeError::CodeTooShort(code));
    }

    let latitude = clip_latitude(reference.y());
    let longitude = normalize_longitude(reference.x());
    let range = (code_area.latitude_center() - latitude)
        .abs()
        .max((code_area.longitude_center() - longitude).abs());

    // Scan from the second-finest pair resolution down to the coarsest
    // trimmable one.
    for i in (1..PAIR_RESOLUTIONS.len() - 1).rev() {
        if range < PAIR_RESOLUTIONS[i] * 0.3 {
            return Ok(code[(i + 1) * 2..].to_string());
        }
    }
    Ok(code)
}

/// Recovers the nearest full code matching a short code, relative to a
/// reference point.
///
/// A full input is returned unchanged apart from case. The recovered cell
/// is the one closest to the reference, which may lie on the other side of
/// a grid boundary from the naive prefix guess; in that case the center is
/// shifted one resolution step toward the reference before re-encoding.
///
/// # Example
/// ```
/// use pluscode_rs::recover_nearest;
///
/// # fn main() -> Result<(), pluscode_rs::PlusCodeError> {
/// let full = recover_nearest("9QCJ+2VX", &(-1.217765625, 51.3852125))?;
/// assert_eq!(full, "9C3W9QCJ+2VX");
/// # Ok(())
/// # }
/// ```
pub fn recover_nearest(
    short_code: &str,
    reference: &impl Coordinate,
) -> Result<String, PlusCodeError> {
    if !is_short(short_code) {
        if is_full(short_code) {
            return Ok(short_code.to_uppercase());
        }
        return Err(PlusCodeError::InvalidShortCode(short_code.to_string()));
    }

    let reference_latitude = clip_latitude(reference.y());
    let reference_longitude = normalize_longitude(reference.x());
    let short_code = short_code.to_uppercase();

    let sep = short_code
        .find(SEPARATOR)
        .ok_or_else(|| PlusCodeError::InvalidShortCode(short_code.clone()))?;
    let padding_length = SEPARATOR_POSITION - sep;
    let resolution = (ENCODING_BASE as f64).powi(2 - (padding_length / 2) as i32);
    let half_resolution = resolution / 2.0;

    let reference_code = encode(
        &(reference_longitude, reference_latitude),
        PAIR_CODE_LENGTH,
    )?;
    let code_area = decode(&format!("{}{}", &reference_code[..padding_length], short_code))?;

    let mut latitude_center = code_area.latitude_center();
    let mut longitude_center = code_area.longitude_center();

    // Move the cell one resolution step toward the reference when the
    // prefix guess landed on the wrong side of a grid boundary, keeping
    // latitude inside the poles.
    if reference_latitude + half_resolution < latitude_center
        && latitude_center - resolution >= -LATITUDE_MAX
    {
        latitude_center -= resolution;
    } else if reference_latitude - half_resolution > latitude_center
        && latitude_center + resolution <= LATITUDE_MAX
    {
        latitude_center += resolution;
    }

    if reference_longitude + half_resolution < longitude_center {
        longitude_center -= resolution;
    } else if reference_longitude - half_resolution > longitude_center {
        longitude_center += resolution;
    }

    encode(
        &(longitude_center, latitude_center),
        code_area.code_length,
    )
}

/// Returns the deduplicated codes covering a line.
///
/// Samples each segment at half a cell height and encodes every sample,
/// keeping first-seen order.
pub fn codes_along_line(
    line: &LineString<f64>,
    code_length: usize,
) -> Result<Vec<String>, PlusCodeError> {
    let step_size = latitude_precision(code_length) * 0.5;

    let mut seen: HashSet<String> = HashSet::new();
    let mut codes: Vec<String> = Vec::new();

    for window in line.0.windows(2) {
        let start = &window[0];
        let end = &window[1];

        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let segment_length = (dx * dx + dy * dy).sqrt();
        let steps = (segment_length / step_size).ceil() as usize;

        for i in 0..=steps {
            let t = if steps == 0 {
                0.0
            } else {
                i as f64 / steps as f64
            };
            let code = encode(&(start.x + t * dx, start.y + t * dy), code_length)?;
            if seen.insert(code.clone()) {
                codes.push(code);
            }
        }
    }
    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{line_string, point};

    #[test]
    fn test_encode_literals() -> Result<(), PlusCodeError> {
        assert_eq!(encode(&(2.775, 20.375), 6)?, "7FG49Q00+");
        assert_eq!(encode(&(2.7821875, 20.3700625), 10)?, "7FG49QCJ+2V");
        assert_eq!(encode(&(-1.217765625, 51.3701125), 11)?, "9C3W9QCJ+2VX");
        assert_eq!(encode(&(8.0000625, 47.0000625), 10)?, "8FVC2222+22");
        assert_eq!(encode(&(-179.5, -89.5), 4)?, "22220000+");
        assert_eq!(encode(&(0.0, 0.0), 10)?, "6FG22222+22");
        Ok(())
    }

    #[test]
    fn test_encode_rejects_bad_lengths() {
        for length in [0, 1, 3, 5, 7, 9] {
            assert_eq!(
                encode(&(0.0, 0.0), length),
                Err(PlusCodeError::InvalidCodeLength(length)),
                "length {}",
                length
            );
        }
    }

    #[test]
    fn test_encode_odd_lengths_legal_past_pair_stage() -> Result<(), PlusCodeError> {
        let code = encode(&(8.0000625, 47.0000625), 11)?;
        assert_eq!(decode(&code)?.code_length, 11);
        Ok(())
    }

    #[test]
    fn test_encode_clamps_length_at_fifteen() -> Result<(), PlusCodeError> {
        let code = encode(&(0.0, 0.0), 20)?;
        assert_eq!(code, "6FG22222+2222222");
        assert_eq!(decode(&code)?.code_length, 15);
        Ok(())
    }

    #[test]
    fn test_encode_clips_latitude() -> Result<(), PlusCodeError> {
        assert_eq!(encode(&(1.0, 90.0), 4)?, "CFX30000+");
        assert_eq!(encode(&(1.0, 95.0), 4)?, encode(&(1.0, 90.0), 4)?);
        assert_eq!(encode(&(1.0, -95.0), 4)?, encode(&(1.0, -90.0), 4)?);
        Ok(())
    }

    #[test]
    fn test_encode_normalizes_longitude() -> Result<(), PlusCodeError> {
        assert_eq!(encode(&(180.0, 0.5), 4)?, encode(&(-180.0, 0.5), 4)?);
        assert_eq!(encode(&(540.0, 0.5), 4)?, encode(&(-180.0, 0.5), 4)?);
        assert_eq!(encode(&(190.25, 0.5), 4)?, encode(&(-169.75, 0.5), 4)?);
        Ok(())
    }

    #[test]
    fn test_encode_at_pole_stays_decodable() -> Result<(), PlusCodeError> {
        let code = encode(&(0.0, 90.0), 10)?;
        let area = decode(&code)?;
        assert!((area.north - 90.0).abs() < 1e-9);
        assert!(area.latitude_center() < 90.0);
        Ok(())
    }

    #[test]
    fn test_decode_literal_box() -> Result<(), PlusCodeError> {
        let area = decode("7FG49Q00+")?;
        assert!((area.latitude_center() - 20.375).abs() < 1e-10);
        assert!((area.longitude_center() - 2.775).abs() < 1e-10);
        assert_eq!(area.code_length, 6);
        Ok(())
    }

    #[test]
    fn test_decode_grid_refined_code() -> Result<(), PlusCodeError> {
        let area = decode("9C3W9QCJ+2VX")?;
        assert_eq!(area.code_length, 11);
        assert!(area.contains(&(-1.217765625, 51.3701125)));
        assert!((area.north - area.south - 0.000025).abs() < 1e-12);
        assert!((area.east - area.west - 0.00003125).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_decode_accepts_lowercase_and_padding() -> Result<(), PlusCodeError> {
        let area = decode("8fvc2222+22")?;
        assert!(area.contains(&(8.0000625, 47.0000625)));

        let padded = decode("7FG40000+")?;
        assert_eq!(padded.code_length, 4);
        assert!(padded.contains(&(2.5, 20.5)));
        Ok(())
    }

    #[test]
    fn test_decode_ignores_digits_past_fifteen() -> Result<(), PlusCodeError> {
        let area = decode("6FG22222+2222222222")?;
        assert_eq!(area.code_length, 15);
        Ok(())
    }

    #[test]
    fn test_decode_rejects_non_full_codes() {
        for code in ["WC2345+G6", "+G6", "8FWC2345+G", "garbage", ""] {
            assert_eq!(
                decode(code),
                Err(PlusCodeError::NotFullCode(code.to_string())),
                "{:?}",
                code
            );
        }
    }

    #[test]
    fn test_shorten_literal() -> Result<(), PlusCodeError> {
        // Far enough from the center to trim only four characters, not six.
        assert_eq!(
            shorten("9C3W9QCJ+2VX", &(-1.217765625, 51.3852125))?,
            "9QCJ+2VX"
        );
        // Closer references allow deeper trims.
        assert_eq!(
            shorten("9C3W9QCJ+2VX", &(-1.217765625, 51.3708675))?,
            "CJ+2VX"
        );
        assert_eq!(
            shorten("9C3W9QCJ+2VX", &(-1.217765625, 51.3701125))?,
            "+2VX"
        );
        Ok(())
    }

    #[test]
    fn test_shorten_returns_code_for_distant_reference() -> Result<(), PlusCodeError> {
        assert_eq!(shorten("9C3W9QCJ+2VX", &(100.0, -40.0))?, "9C3W9QCJ+2VX");
        Ok(())
    }

    #[test]
    fn test_shorten_preconditions() {
        assert_eq!(
            shorten("9QCJ+2VX", &(0.0, 0.0)),
            Err(PlusCodeError::NotFullCode("9QCJ+2VX".to_string()))
        );
        assert_eq!(
            shorten("7FG40000+", &(0.0, 0.0)),
            Err(PlusCodeError::PaddedCode("7FG40000+".to_string()))
        );
        assert_eq!(
            shorten("not a code", &(0.0, 0.0)),
            Err(PlusCodeError::NotFullCode("not a code".to_string()))
        );
    }

    #[test]
    fn test_recover_literal() -> Result<(), PlusCodeError> {
        assert_eq!(
            recover_nearest("9QCJ+2VX", &(-1.217765625, 51.3852125))?,
            "9C3W9QCJ+2VX"
        );
        Ok(())
    }

    #[test]
    fn test_recover_crosses_grid_boundary_near_pole() -> Result<(), PlusCodeError> {
        // The prefix guess puts the cell a full degree south of the
        // reference; the shift toward it is suppressed at the pole.
        assert_eq!(recover_nearest("2222+22", &(0.0, 89.6))?, "CFX22222+22");
        Ok(())
    }

    #[test]
    fn test_recover_passes_full_codes_through() -> Result<(), PlusCodeError> {
        assert_eq!(
            recover_nearest("8fvc2222+22", &(0.0, 0.0))?,
            "8FVC2222+22"
        );
        Ok(())
    }

    #[test]
    fn test_recover_rejects_invalid_input() {
        assert_eq!(
            recover_nearest("8FWC2345+G", &(0.0, 0.0)),
            Err(PlusCodeError::InvalidShortCode("8FWC2345+G".to_string()))
        );
    }

    #[test]
    fn test_shorten_then_recover_is_identity() -> Result<(), PlusCodeError> {
        let points = [
            point! { x: 8.6, y: 47.4 },
            point! { x: -122.084, y: 37.422 },
            point! { x: 174.78, y: -41.27 },
        ];
        for pt in points {
            let code = encode(&pt, 10)?;
            let short = shorten(&code, &pt)?;
            assert!(short.len() < code.len());
            assert_eq!(recover_nearest(&short, &pt)?, code);
        }
        Ok(())
    }

    #[test]
    fn test_codes_along_line_covers_endpoints() -> Result<(), PlusCodeError> {
        let line = line_string![
            (x: 8.54, y: 47.36),
            (x: 8.55, y: 47.37),
        ];
        let codes = codes_along_line(&line, 10)?;
        assert!(codes.contains(&encode(&(8.54, 47.36), 10)?));
        assert!(codes.contains(&encode(&(8.55, 47.37), 10)?));
        // Deduplicated: every code appears once.
        let unique: HashSet<&String> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
        Ok(())
    }

    #[test]
    fn test_codes_along_empty_line() -> Result<(), PlusCodeError> {
        let line = LineString::new(vec![]);
        assert!(codes_along_line(&line, 10)?.is_empty());
        Ok(())
    }
}
