use geo_types::{Point, Polygon, Rect, coord};
use serde::Serialize;

use crate::core::constants::{LATITUDE_MAX, LONGITUDE_MAX};
use crate::util::coord::Coordinate;

/// The area on the ground denoted by a plus code.
///
/// Decoding a code yields the bounding box of its cell in degrees, the cell
/// center, and the number of significant digits that produced it. Box
/// dimensions are a function of `code_length` alone.
///
/// # Example
///
/// ```
/// use pluscode_rs::decode;
///
/// # fn main() -> Result<(), pluscode_rs::PlusCodeError> {
/// let area = decode("8FVC2222+22")?;
/// assert_eq!(area.code_length, 10);
/// assert!(area.contains(&(8.0000625, 47.0000625)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CodeArea {
    /// Southern latitude of the bounding box, inclusive.
    pub south: f64,
    /// Western longitude of the bounding box, inclusive.
    pub west: f64,
    /// Northern latitude of the bounding box, exclusive.
    pub north: f64,
    /// Eastern longitude of the bounding box, exclusive.
    pub east: f64,
    /// Center of the box, clamped to the 90/180 degree maxima.
    pub center: Point<f64>,
    /// Number of significant digits decoded.
    pub code_length: usize,
}

impl CodeArea {
    pub(crate) fn new(south: f64, west: f64, north: f64, east: f64, code_length: usize) -> Self {
        let latitude_center = (south + (north - south) / 2.0).min(LATITUDE_MAX);
        let longitude_center = (west + (east - west) / 2.0).min(LONGITUDE_MAX);
        Self {
            south,
            west,
            north,
            east,
            center: Point::new(longitude_center, latitude_center),
            code_length,
        }
    }

    /// Returns the center latitude in degrees.
    pub fn latitude_center(&self) -> f64 {
        self.center.y()
    }

    /// Returns the center longitude in degrees.
    pub fn longitude_center(&self) -> f64 {
        self.center.x()
    }

    /// Checks whether a coordinate lies inside the box.
    ///
    /// The box is half-open: the south and west edges are inside, the north
    /// and east edges are not.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        coord.y() >= self.south
            && coord.y() < self.north
            && coord.x() >= self.west
            && coord.x() < self.east
    }

    /// Returns the bounding box as a `geo_types::Rect`.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.west, y: self.south },
            coord! { x: self.east, y: self.north },
        )
    }

    /// Converts the bounding box to a polygon, suitable for spatial
    /// operations or GeoJSON export.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}
