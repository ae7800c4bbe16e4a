//! teamzones - find which team territory contains a map point

pub mod codec;
pub mod config;
pub mod domain;
pub mod geometry;
pub mod locator;

pub use domain::{Label, TeamArea, TeamRecord};
pub use geometry::Territory;
pub use locator::{LoadReport, TerritoryLocator};
