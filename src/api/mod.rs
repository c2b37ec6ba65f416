pub mod code_area;
pub mod code_csv;
pub mod locator;

pub use code_area::CodeArea;
pub use code_csv::{
    CoordinateSource, CsvCodeConfig, CsvToCode, GeometryFormat, csv_to_code_csv,
};
pub use locator::{codes_along_line, decode, encode, recover_nearest, shorten};
