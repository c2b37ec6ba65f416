pub mod constants;
pub mod grid;
pub mod pair;
pub mod validate;

pub use constants::{
    CODE_ALPHABET, ENCODING_BASE, GRID_COLUMNS, GRID_ROWS, GRID_SIZE_DEGREES, LATITUDE_MAX,
    LONGITUDE_MAX, MAX_DIGIT_COUNT, MIN_TRIMMABLE_CODE_LENGTH, PADDING_CHARACTER, PAIR_CODE_LENGTH,
    PAIR_RESOLUTIONS, SEPARATOR, SEPARATOR_POSITION,
};
pub use grid::latitude_precision;
pub use validate::{is_full, is_short, is_valid};
