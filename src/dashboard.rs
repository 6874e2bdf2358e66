//! Dashboard readout
//!
//! Plain display strings pushed to the page after every tick.

use serde::Serialize;

use crate::format_number;
use crate::sim::Dimensions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardReadout {
    pub length: String,
    pub thickness: String,
    pub angle: String,
}

impl DashboardReadout {
    pub fn new(dimensions: Dimensions, angle: f64) -> Self {
        Self {
            length: format_number(dimensions.length),
            thickness: format_number(dimensions.thickness),
            angle: format_number(angle),
        }
    }

    /// `(element id, text)` pairs for the dashboard fields
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("length", self.length.as_str()),
            ("thickness", self.thickness.as_str()),
            ("angle", self.angle.as_str()),
        ]
    }
}

impl std::fmt::Display for DashboardReadout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "length {} | thickness {} | angle {}°",
            self.length, self.thickness, self.angle
        )
    }
}
