use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::codec::{AreaParseError, parse_area_points};
use crate::geometry::Territory;

#[derive(Debug, Error)]
pub enum TeamFileError {
    #[error("failed to read team file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse team file {path:?}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Fill used for teams that never picked a color: 0x55 alpha over #6750A4
pub const DEFAULT_FILL_COLOR: i32 = 0x556750A4;

/// A cached team row, as stored locally and served by the teams endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub id: String,
    pub name: String,
    /// Packed ARGB fill color; 0 means unset, see [`TeamArea::fill_color`]
    #[serde(default)]
    pub color: i32,
    /// Serialized territory vertices
    pub area_points: String,
    /// Team score
    #[serde(default)]
    pub points: i32,
}

/// A team resolved for the map: decoded territory plus display data
#[derive(Debug, Clone, PartialEq)]
pub struct TeamArea {
    pub team_id: String,
    pub team_name: String,
    pub territory: Territory,
    pub color: i32,
}

/// Where to draw a team's name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub team_id: String,
    pub team_name: String,
    pub lat: f64,
    pub lon: f64,
}

impl TeamArea {
    pub fn new(
        team_id: impl Into<String>,
        team_name: impl Into<String>,
        territory: Territory,
    ) -> Self {
        Self {
            team_id: team_id.into(),
            team_name: team_name.into(),
            territory,
            color: 0,
        }
    }

    /// Fill color for drawing, substituting `default` for an unset color
    pub fn fill_color(&self, default: i32) -> i32 {
        if self.color != 0 {
            self.color
        } else {
            default
        }
    }

    pub fn from_record(record: &TeamRecord) -> Result<Self, AreaParseError> {
        let points = parse_area_points(&record.area_points)?;
        Ok(Self {
            team_id: record.id.clone(),
            team_name: record.name.clone(),
            territory: Territory::new(points),
            color: record.color,
        })
    }

    /// Label anchored at the territory's vertex mean
    pub fn label(&self) -> Option<Label> {
        let (lat, lon) = self.territory.center()?;
        Some(Label {
            team_id: self.team_id.clone(),
            team_name: self.team_name.clone(),
            lat,
            lon,
        })
    }
}

/// Read a JSON array of team records
pub fn load_team_records(path: &Path) -> Result<Vec<TeamRecord>, TeamFileError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TeamFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| TeamFileError::Json {
        path: path.to_path_buf(),
        source,
    })
}
