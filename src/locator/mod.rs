//! Territory lookup for map taps
//!
//! Given team areas and a tapped (lat, lon) point, find the team whose
//! territory contains the point. Areas are scanned in the order they were
//! supplied and the first hit wins, so overlapping territories resolve to
//! whichever team comes first. Reordering the input can change the answer.

use tracing::{debug, warn};

use crate::domain::{Label, TeamArea, TeamRecord};
use crate::geometry::Bounds;

/// Counts from building a locator out of cached team rows
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped_degenerate: usize,
    pub skipped_unparseable: usize,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.skipped_degenerate + self.skipped_unparseable
    }
}

struct IndexedArea {
    area: TeamArea,
    bounds: Bounds,
}

pub struct TerritoryLocator {
    areas: Vec<IndexedArea>,
}

impl TerritoryLocator {
    /// Build a locator, dropping areas with fewer than 3 vertices
    pub fn new(areas: Vec<TeamArea>) -> Self {
        let (locator, _) = Self::index(areas);
        locator
    }

    /// Decode team rows and build a locator from the usable ones
    ///
    /// Rows whose coordinate string fails to decode are skipped, as are
    /// degenerate territories. Neither is treated as an error.
    pub fn from_records(records: &[TeamRecord]) -> (Self, LoadReport) {
        let mut areas = Vec::with_capacity(records.len());
        let mut unparseable = 0;

        for record in records {
            match TeamArea::from_record(record) {
                Ok(area) => areas.push(area),
                Err(e) => {
                    warn!(
                        team_id = %record.id,
                        error = %e,
                        "skipping team with unreadable area"
                    );
                    unparseable += 1;
                }
            }
        }

        let (locator, mut report) = Self::index(areas);
        report.skipped_unparseable = unparseable;

        debug!(
            loaded = report.loaded,
            skipped = report.skipped(),
            "built territory locator"
        );

        (locator, report)
    }

    fn index(areas: Vec<TeamArea>) -> (Self, LoadReport) {
        let mut report = LoadReport::default();
        let mut indexed = Vec::with_capacity(areas.len());

        for area in areas {
            let bounds = match area.territory.bounding_box() {
                Some(b) if area.territory.is_valid() => b,
                _ => {
                    warn!(
                        team_id = %area.team_id,
                        vertices = area.territory.len(),
                        "skipping degenerate territory"
                    );
                    report.skipped_degenerate += 1;
                    continue;
                }
            };
            indexed.push(IndexedArea { area, bounds });
        }

        report.loaded = indexed.len();
        (Self { areas: indexed }, report)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn areas(&self) -> impl Iterator<Item = &TeamArea> {
        self.areas.iter().map(|a| &a.area)
    }

    /// First area, in input order, whose territory contains `point`
    pub fn locate(&self, point: (f64, f64)) -> Option<&TeamArea> {
        self.candidates(point).next()
    }

    /// Every area containing `point`, in input order
    pub fn locate_all(&self, point: (f64, f64)) -> Vec<&TeamArea> {
        self.candidates(point).collect()
    }

    /// Label anchors for every area
    pub fn labels(&self) -> Vec<Label> {
        self.areas().filter_map(TeamArea::label).collect()
    }

    fn candidates(&self, point: (f64, f64)) -> impl Iterator<Item = &TeamArea> {
        self.areas
            .iter()
            .filter(move |a| a.bounds.contains_point(point) && a.area.territory.contains(point))
            .map(|a| &a.area)
    }
}
