//! One sampling run: load solids, sample each, write the outputs.

use std::fs::{self, File};
use std::io::BufWriter;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use geometry_backend::{ShapeLoader, TruckBackend, TruckSolid};
use point_export::{
    write_csv_file, write_stl_file, PointTableWriter, RunSummary, SolidSummary, StlFormat,
};
use sampler::Sampler;

use crate::config::{GeometrySource, PrimitiveSpec, Settings};

/// Name of the summary file inside the output directory.
pub const SUMMARY_FILE: &str = "summary.json";

fn load_solids(backend: &TruckBackend, source: &GeometrySource) -> Result<Vec<TruckSolid>> {
    match source {
        GeometrySource::Step(path) => backend
            .load_solids(path)
            .with_context(|| format!("Failed to load {}", path.display())),
        GeometrySource::Primitive(spec) => {
            let solid = match *spec {
                PrimitiveSpec::Box { origin, size } => backend.make_box(origin, size),
                PrimitiveSpec::Cylinder {
                    base_center,
                    radius,
                    height,
                } => backend.make_cylinder(base_center, radius, height),
                PrimitiveSpec::Sphere { center, radius } => backend.make_sphere(center, radius),
            }
            .context("Failed to build primitive")?;
            Ok(vec![solid])
        }
    }
}

/// Sample every solid named by `settings` and write its outputs.
///
/// Solid `i` (1-based) gets `solid_<i>.csv` and, when enabled,
/// `solid_<i>.stl`. The first failure stops the run.
#[instrument(skip_all, fields(output = %settings.output.directory.display()))]
pub fn run(settings: &Settings) -> Result<RunSummary> {
    let backend = TruckBackend::with_tolerance(settings.tolerance);
    let solids = load_solids(&backend, &settings.source)?;
    info!(solids = solids.len(), "geometry ready");

    let out = &settings.output;
    fs::create_dir_all(&out.directory)
        .with_context(|| format!("Failed to create {}", out.directory.display()))?;

    let sampler = Sampler::new(settings.sampler.clone())?;
    let mut summary = RunSummary::new(settings.sampler.seed, settings.parallel);

    let mut combined = if out.combined.is_empty() {
        None
    } else {
        let path = out.directory.join(&out.combined);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        Some(PointTableWriter::new(BufWriter::new(file))?)
    };

    for (i, solid) in solids.iter().enumerate() {
        let index = i + 1;
        info!(index, name = solid.name(), "sampling solid");

        let result = if settings.parallel {
            sampler.sample_parallel(&backend, solid)
        } else {
            sampler.sample(&backend, solid)
        }
        .with_context(|| format!("Sampling solid {} ({}) failed", index, solid.name()))?;

        let points_file = format!("solid_{}.csv", index);
        write_csv_file(&out.directory.join(&points_file), result.points())?;
        if let Some(table) = combined.as_mut() {
            table.write_points(result.points())?;
        }

        let mut entry = SolidSummary::from_result(index, solid.name(), &result);
        entry.points_file = Some(points_file);

        if out.stl {
            let stl_file = format!("solid_{}.stl", index);
            let format = if out.stl_ascii {
                StlFormat::Ascii
            } else {
                StlFormat::Binary
            };
            write_stl_file(
                &out.directory.join(&stl_file),
                solid.mesh(),
                solid.name(),
                format,
            )?;
            entry.stl_file = Some(stl_file);
        }

        info!(
            index,
            accepted = result.accepted(),
            draws = result.draws(),
            volume = result.estimated_volume(),
            "solid sampled"
        );
        summary.push(entry);
    }

    if let Some(table) = combined {
        table.finish()?;
        summary.combined_file = Some(out.combined.clone());
    }

    if out.summary {
        summary.write_json_file(&out.directory.join(SUMMARY_FILE))?;
    }

    Ok(summary)
}
