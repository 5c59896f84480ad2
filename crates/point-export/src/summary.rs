//! JSON summary of a sampling run.

use std::fs;
use std::path::Path;

use sample_types::{BoundingBox, SampleResult};
use serde::{Deserialize, Serialize};

use crate::errors::ExportError;

/// Current summary format version.
pub const SUMMARY_VERSION: u32 = 1;

/// Per-solid figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidSummary {
    /// 1-based position of the solid in its source.
    pub index: usize,
    pub name: String,
    pub draws: usize,
    pub accepted: usize,
    pub acceptance_ratio: f64,
    pub estimated_volume: f64,
    /// Sampling volume actually used.
    pub bounds: BoundingBox,
    /// Point table for this solid, if one was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stl_file: Option<String>,
}

impl SolidSummary {
    pub fn from_result(index: usize, name: impl Into<String>, result: &SampleResult) -> Self {
        Self {
            index,
            name: name.into(),
            draws: result.draws(),
            accepted: result.accepted(),
            acceptance_ratio: result.acceptance_ratio(),
            estimated_volume: result.estimated_volume(),
            bounds: *result.bounds(),
            points_file: None,
            stl_file: None,
        }
    }
}

/// The whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Format identifier.
    pub format: String,
    pub version: u32,
    pub seed: u64,
    pub parallel: bool,
    /// Combined point table, if one was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_file: Option<String>,
    pub solids: Vec<SolidSummary>,
}

impl RunSummary {
    pub fn new(seed: u64, parallel: bool) -> Self {
        Self {
            format: "solid-sampler-summary".to_string(),
            version: SUMMARY_VERSION,
            seed,
            parallel,
            combined_file: None,
            solids: Vec::new(),
        }
    }

    pub fn push(&mut self, solid: SolidSummary) {
        self.solids.push(solid);
    }

    pub fn total_accepted(&self) -> usize {
        self.solids.iter().map(|s| s.accepted).sum()
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_json_file(&self, path: &Path) -> Result<(), ExportError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ExportError::Create {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sample_types::Point3d;

    fn result() -> SampleResult {
        let bounds = BoundingBox::new(Point3d::ORIGIN, Point3d::new(2.0, 2.0, 2.0));
        SampleResult::new(vec![Point3d::new(1.0, 1.0, 1.0); 3], 4, bounds)
    }

    #[test]
    fn test_solid_summary_figures() {
        let s = SolidSummary::from_result(1, "part_1", &result());
        assert_eq!(s.draws, 4);
        assert_eq!(s.accepted, 3);
        assert_eq!(s.acceptance_ratio, 0.75);
        assert_eq!(s.estimated_volume, 6.0);
    }

    #[test]
    fn test_json_fields() {
        let mut run = RunSummary::new(42, false);
        let mut solid = SolidSummary::from_result(1, "part_1", &result());
        solid.points_file = Some("solid_1.csv".into());
        run.push(solid);

        let json = run.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["format"], "solid-sampler-summary");
        assert_eq!(value["seed"], 42);
        assert_eq!(value["solids"][0]["points_file"], "solid_1.csv");
        assert!(value["solids"][0].get("stl_file").is_none());
        assert!(value.get("combined_file").is_none());

        assert_eq!(RunSummary::from_json(&json).unwrap(), run);
        assert_eq!(run.total_accepted(), 3);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            RunSummary::from_json("{not json"),
            Err(ExportError::Serialize(_))
        ));
    }
}
