use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use geo::Centroid;
use geo_types::Geometry;
use geojson::GeoJson;
use wkt::Wkt;

use crate::api::locator::{codes_along_line, decode, encode};
use crate::util::error::PlusCodeError;

/// For the type of location source in the file
enum SourceIndices {
    Geometry(usize),
    Coordinates { lng_idx: usize, lat_idx: usize },
}

/// Output format for code area geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Specifies how to extract location data from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry
    GeometryColumn(String),
    /// Separate longitude and latitude columns, in degrees
    CoordinateColumns {
        lng_column: String,
        lat_column: String,
    },
}

/// Configuration for CSV to plus code conversion.
#[derive(Debug, Clone)]
pub struct CsvCodeConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub code_length: usize,
    pub include_code_geometry: Option<GeometryFormat>,
}

impl CsvCodeConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use pluscode_rs::CsvCodeConfig;
    ///
    /// let config = CsvCodeConfig::new("geometry", 10);
    /// ```
    pub fn new(geometry_column: impl Into<String>, code_length: usize) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            code_length,
            include_code_geometry: None,
        }
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use pluscode_rs::CsvCodeConfig;
    ///
    /// let config = CsvCodeConfig::from_coords("Longitude", "Latitude", 10);
    /// ```
    pub fn from_coords(
        lng_column: impl Into<String>,
        lat_column: impl Into<String>,
        code_length: usize,
    ) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lng_column: lng_column.into(),
                lat_column: lat_column.into(),
            },
            exclude_columns: Vec::new(),
            code_length,
            include_code_geometry: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Include the code area polygon in the output.
    pub fn with_code_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_code_geometry = Some(format);
        self
    }
}

pub trait CsvToCode {
    fn to_code_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvCodeConfig,
    ) -> Result<(), PlusCodeError>;
}

impl<P: AsRef<Path>> CsvToCode for P {
    fn to_code_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvCodeConfig,
    ) -> Result<(), PlusCodeError> {
        csv_to_code_csv(self, output_path, config)
    }
}

fn parse_geometry(s: &str) -> Result<Geometry<f64>, PlusCodeError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

fn parse_geojson(s: &str) -> Result<Geometry<f64>, PlusCodeError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| PlusCodeError::GeometryParseError(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => Geometry::try_from(geom)
            .map_err(|e| PlusCodeError::GeometryParseError(e.to_string())),
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| {
                PlusCodeError::GeometryParseError("Feature has no geometry".to_string())
            })
            .and_then(|g| {
                Geometry::try_from(g).map_err(|e| PlusCodeError::GeometryParseError(e.to_string()))
            }),
        GeoJson::FeatureCollection(_) => Err(PlusCodeError::GeometryParseError(
            "FeatureCollection not supported, use individual geometries".to_string(),
        )),
    }
}

fn parse_wkt(s: &str) -> Result<Geometry<f64>, PlusCodeError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| PlusCodeError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        PlusCodeError::GeometryParseError("Failed to convert WKT to geometry".to_string())
    })
}

fn polygon_to_wkt(polygon: &geo_types::Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &geo_types::Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

/// Encodes every location a geometry denotes.
///
/// Points encode directly, lines through the cells they cross, and areal
/// geometries through their centroid.
fn geometry_to_codes(
    geom: Geometry<f64>,
    code_length: usize,
) -> Result<Vec<String>, PlusCodeError> {
    match geom {
        Geometry::Point(pt) => Ok(vec![encode(&pt, code_length)?]),
        Geometry::MultiPoint(mp) => {
            let mut codes = Vec::with_capacity(mp.0.len());
            for pt in mp.0 {
                codes.push(encode(&pt, code_length)?);
            }
            Ok(codes)
        }
        Geometry::LineString(line) => codes_along_line(&line, code_length),
        Geometry::MultiLineString(mls) => {
            let mut all_codes = Vec::new();
            for line in mls.0 {
                all_codes.extend(codes_along_line(&line, code_length)?);
            }
            Ok(all_codes)
        }
        Geometry::Polygon(poly) => match poly.centroid() {
            Some(centroid) => Ok(vec![encode(&centroid, code_length)?]),
            None => Ok(vec![]),
        },
        Geometry::MultiPolygon(mp) => {
            let mut codes = Vec::new();
            for poly in mp.0 {
                if let Some(centroid) = poly.centroid() {
                    codes.push(encode(&centroid, code_length)?);
                }
            }
            Ok(codes)
        }
        Geometry::GeometryCollection(gc) => {
            let mut all_codes = Vec::new();
            for g in gc.0 {
                all_codes.extend(geometry_to_codes(g, code_length)?);
            }
            Ok(all_codes)
        }
        _ => Err(PlusCodeError::GeometryParseError(
            "Unsupported geometry type".to_string(),
        )),
    }
}

/// Converts a CSV file with geometry or coordinate columns to a CSV file
/// keyed by plus code.
///
/// Streams output to minimize memory usage for large files.
///
/// # Example with geometry column (WKT or GeoJSON)
///
/// ```no_run
/// use pluscode_rs::{csv_to_code_csv, CsvCodeConfig};
///
/// let config = CsvCodeConfig::new("Geo Shape", 10)
///     .exclude(vec!["Geo Point".into()]);
///
/// csv_to_code_csv("input.csv", "output.csv", &config).unwrap();
/// ```
///
/// # Example with coordinate columns
///
/// ```no_run
/// use pluscode_rs::{csv_to_code_csv, CsvCodeConfig};
///
/// let config = CsvCodeConfig::from_coords("Longitude", "Latitude", 10);
///
/// csv_to_code_csv("bus_stops.csv", "output.csv", &config).unwrap();
/// ```
pub fn csv_to_code_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvCodeConfig,
) -> Result<(), PlusCodeError> {
    let file = File::open(csv_path).map_err(|e| PlusCodeError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| PlusCodeError::CsvError(e.to_string()))?
        .clone();

    // Determine which columns to exclude based on source type
    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = headers.iter().position(|h| h == col).ok_or_else(|| {
                PlusCodeError::CsvError(format!("Geometry column '{}' not found", col))
            })?;
            let mut exclude = HashSet::new();
            exclude.insert(idx);
            (SourceIndices::Geometry(idx), exclude)
        }
        CoordinateSource::CoordinateColumns {
            lng_column,
            lat_column,
        } => {
            let lng_idx = headers.iter().position(|h| h == lng_column).ok_or_else(|| {
                PlusCodeError::CsvError(format!("Longitude column '{}' not found", lng_column))
            })?;
            let lat_idx = headers.iter().position(|h| h == lat_column).ok_or_else(|| {
                PlusCodeError::CsvError(format!("Latitude column '{}' not found", lat_column))
            })?;
            let mut exclude = HashSet::new();
            exclude.insert(lng_idx);
            exclude.insert(lat_idx);
            (SourceIndices::Coordinates { lng_idx, lat_idx }, exclude)
        }
    };

    // Add user-specified exclusions
    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| PlusCodeError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    // Write header row
    let mut header_row: Vec<&str> = vec!["plus_code"];
    if config.include_code_geometry.is_some() {
        header_row.push("code_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| PlusCodeError::CsvError(e.to_string()))?;

    // Process rows
    for result in reader.records() {
        let record = result.map_err(|e| PlusCodeError::CsvError(e.to_string()))?;

        let codes = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom_str = record.get(*idx).ok_or_else(|| {
                    PlusCodeError::CsvError(format!("Missing geometry column at index {}", idx))
                })?;
                let geom = parse_geometry(geom_str)?;
                geometry_to_codes(geom, config.code_length)?
            }
            SourceIndices::Coordinates { lng_idx, lat_idx } => {
                let lng_str = record
                    .get(*lng_idx)
                    .ok_or_else(|| {
                        PlusCodeError::CsvError(format!(
                            "Missing longitude column at index {}",
                            lng_idx
                        ))
                    })?
                    .trim();
                let lat_str = record
                    .get(*lat_idx)
                    .ok_or_else(|| {
                        PlusCodeError::CsvError(format!(
                            "Missing latitude column at index {}",
                            lat_idx
                        ))
                    })?
                    .trim();

                let lng: f64 = lng_str.parse().map_err(|_| {
                    PlusCodeError::CsvError(format!("Invalid longitude: '{}'", lng_str))
                })?;
                let lat: f64 = lat_str.parse().map_err(|_| {
                    PlusCodeError::CsvError(format!("Invalid latitude: '{}'", lat_str))
                })?;

                vec![encode(&(lng, lat), config.code_length)?]
            }
        };

        for code in codes {
            let mut row: Vec<String> = vec![code.clone()];

            if let Some(format) = config.include_code_geometry {
                let polygon = decode(&code)?.to_polygon();
                let geom_str = match format {
                    GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                    GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
                };
                row.push(geom_str);
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer
                .write_record(&row)
                .map_err(|e| PlusCodeError::CsvError(e.to_string()))?;
        }
    }

    writer
        .flush()
        .map_err(|e| PlusCodeError::CsvError(e.to_string()))?;

    Ok(())
}
