//! # pluscode-rs
//!
//! There are three main entry points.
//!
//! ### 1. Encoding and decoding
//!
//! ```
//! use pluscode_rs::{decode, encode};
//!
//! # fn main() -> Result<(), pluscode_rs::PlusCodeError> {
//! // x is longitude, y is latitude.
//! let code = encode(&(2.775, 20.375), 6)?;
//! assert_eq!(code, "7FG49Q00+");
//!
//! let area = decode(&code)?;
//! assert!((area.latitude_center() - 20.375).abs() < 1e-10);
//! assert!((area.longitude_center() - 2.775).abs() < 1e-10);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. Shortening codes against a reference location
//!
//! ```
//! use pluscode_rs::{recover_nearest, shorten};
//! use geo_types::point;
//!
//! # fn main() -> Result<(), pluscode_rs::PlusCodeError> {
//! let reference = point! { x: -1.217765625, y: 51.3852125 };
//!
//! let short = shorten("9C3W9QCJ+2VX", &reference)?;
//! assert_eq!(short, "9QCJ+2VX");
//! assert_eq!(recover_nearest(&short, &reference)?, "9C3W9QCJ+2VX");
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToCode` - CSV File Conversion
//!
//! Convert CSV files with coordinate or geometry columns (WKT or GeoJSON)
//! to plus-code-keyed CSVs:
//!
//! ```no_run
//! use pluscode_rs::{CsvCodeConfig, CsvToCode, GeometryFormat};
//!
//! let config = CsvCodeConfig::from_coords("Longitude", "Latitude", 10)
//!     .with_code_geometry(GeometryFormat::Wkt);
//!
//! "input.csv".to_code_csv("output.csv", &config).unwrap();
//! ```

pub mod api;
pub mod core;
pub mod util;

pub use api::{
    CodeArea, CoordinateSource, CsvCodeConfig, CsvToCode, GeometryFormat, codes_along_line,
    csv_to_code_csv, decode, encode, recover_nearest, shorten,
};
pub use core::{
    CODE_ALPHABET, ENCODING_BASE, GRID_COLUMNS, GRID_ROWS, GRID_SIZE_DEGREES, LATITUDE_MAX,
    LONGITUDE_MAX, MAX_DIGIT_COUNT, MIN_TRIMMABLE_CODE_LENGTH, PADDING_CHARACTER, PAIR_CODE_LENGTH,
    PAIR_RESOLUTIONS, SEPARATOR, SEPARATOR_POSITION, is_full, is_short, is_valid,
    latitude_precision,
};
pub use util::{Coordinate, PlusCodeError, clip_latitude, normalize_longitude};

pub use geo_types;
