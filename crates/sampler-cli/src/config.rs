//! TOML run configuration.
//!
//! ```toml
//! [geometry]
//! filename = "part.step"      # or a [geometry.primitive] table
//! tolerance = 0.01
//!
//! [sampling]
//! target_draws = 100000
//! seed = 42
//! parallel = false
//! bounding_box = { min = [0, 0, 0], max = [20, 20, 20] }
//!
//! [output]
//! directory = "out"
//! combined = "all_points.csv"
//! summary = true
//! stl = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use geometry_backend::truck_backend::DEFAULT_TOLERANCE;
use sample_types::{BoundingBox, Point3d};
use sampler::{ConfigurationError, SamplerConfig};
use serde::Deserialize;

/// Errors in the run configuration.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config is missing the [{section}] section")]
    MissingSection { section: &'static str },

    #[error("[{section}] needs {key}")]
    MissingKey {
        section: &'static str,
        key: &'static str,
    },

    #[error("[{section}] sets both {first} and {second}")]
    ConflictingKeys {
        section: &'static str,
        first: &'static str,
        second: &'static str,
    },

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Config file contents as written.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub geometry: Option<GeometrySection>,
    #[serde(default)]
    pub sampling: SamplingSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometrySection {
    /// STEP file; relative paths are taken from the config file's directory.
    pub filename: Option<PathBuf>,
    pub primitive: Option<PrimitiveSpec>,
    pub tolerance: Option<f64>,
}

/// A solid built in place of a loaded file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PrimitiveSpec {
    Box {
        #[serde(default)]
        origin: [f64; 3],
        size: [f64; 3],
    },
    Cylinder {
        #[serde(default)]
        base_center: [f64; 3],
        radius: f64,
        height: f64,
    },
    Sphere {
        #[serde(default)]
        center: [f64; 3],
        radius: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxSpec {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingSection {
    /// Signed so a negative count reaches validation instead of the parser.
    pub target_draws: i64,
    pub seed: u64,
    pub parallel: bool,
    pub chunk_size: Option<usize>,
    pub bounding_box: Option<BoxSpec>,
}

impl Default for SamplingSection {
    fn default() -> Self {
        let defaults = SamplerConfig::default();
        Self {
            target_draws: defaults.target_draws as i64,
            seed: defaults.seed,
            parallel: false,
            chunk_size: None,
            bounding_box: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub directory: PathBuf,
    /// File receiving every solid's points; empty to skip.
    pub combined: String,
    pub summary: bool,
    pub stl: bool,
    pub stl_ascii: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("out"),
            combined: "all_points.csv".to_string(),
            summary: true,
            stl: false,
            stl_ascii: false,
        }
    }
}

/// Command-line values that replace config entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub draws: Option<i64>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub parallel: bool,
}

/// Where the solids come from.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometrySource {
    Step(PathBuf),
    Primitive(PrimitiveSpec),
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub source: GeometrySource,
    pub tolerance: f64,
    pub sampler: SamplerConfig,
    pub parallel: bool,
    pub output: OutputSection,
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(text)?)
    }

    /// Read `path`, resolving a relative geometry filename against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if let (Some(geometry), Some(dir)) = (config.geometry.as_mut(), path.parent()) {
            if let Some(filename) = geometry.filename.as_mut() {
                if filename.is_relative() {
                    *filename = dir.join(&*filename);
                }
            }
        }
        Ok(config)
    }

    /// Apply overrides and check everything the run depends on.
    pub fn resolve(self, overrides: &Overrides) -> Result<Settings, CliError> {
        let geometry = self.geometry.ok_or(CliError::MissingSection {
            section: "geometry",
        })?;
        let source = match (geometry.filename, geometry.primitive) {
            (Some(path), None) => GeometrySource::Step(path),
            (None, Some(primitive)) => GeometrySource::Primitive(primitive),
            (None, None) => {
                return Err(CliError::MissingKey {
                    section: "geometry",
                    key: "a filename or a [geometry.primitive] table",
                })
            }
            (Some(_), Some(_)) => {
                return Err(CliError::ConflictingKeys {
                    section: "geometry",
                    first: "filename",
                    second: "primitive",
                })
            }
        };

        let tolerance = geometry.tolerance.unwrap_or(DEFAULT_TOLERANCE);
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(CliError::InvalidValue {
                key: "geometry.tolerance",
                reason: format!("must be positive, got {}", tolerance),
            });
        }

        let sampling = self.sampling;
        let draws = overrides.draws.unwrap_or(sampling.target_draws);
        let mut sampler = SamplerConfig::from_signed_draws(draws)?
            .with_seed(overrides.seed.unwrap_or(sampling.seed));
        if let Some(chunk_size) = sampling.chunk_size {
            sampler = sampler.with_chunk_size(chunk_size);
        }
        if let Some(bb) = sampling.bounding_box {
            sampler = sampler.with_bounding_box(BoundingBox::new(
                Point3d::from_array(bb.min),
                Point3d::from_array(bb.max),
            ));
        }
        sampler.validate()?;

        let mut output = self.output;
        if let Some(dir) = &overrides.output {
            output.directory = dir.clone();
        }

        Ok(Settings {
            source,
            tolerance,
            sampler,
            parallel: overrides.parallel || sampling.parallel,
            output,
        })
    }
}
