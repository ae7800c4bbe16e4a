pub mod area_points;

pub use area_points::{AreaParseError, encode_area_points, parse_area_points};
