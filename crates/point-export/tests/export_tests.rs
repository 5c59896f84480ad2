//! Tests for point tables, STL export and run summaries on disk.

use std::fs;
use std::io::BufReader;
use std::path::PathBuf;

use geometry_backend::TruckBackend;
use geometry_backend::TriangleMesh;
use point_export::{
    export_ascii_stl, export_binary_stl, read_rows, write_csv_file, write_stl_file, ExportError,
    RunSummary, SolidSummary, StlFormat,
};
use sample_types::{BoundingBox, Point3d, SampleResult};

fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("point-export-{}-{}", test, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn triangle_mesh() -> TriangleMesh {
    TriangleMesh {
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        triangles: vec![[0, 1, 2]],
    }
}

fn box_mesh() -> TriangleMesh {
    TriangleMesh {
        positions: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ],
        triangles: vec![
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [2, 3, 7],
            [2, 7, 6],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ],
    }
}

#[test]
fn binary_stl_header_names_solid() {
    let stl = export_binary_stl(&triangle_mesh(), "test").unwrap();
    let header = String::from_utf8_lossy(&stl[..80]);
    assert!(header.contains("test"));
}

#[test]
fn binary_stl_file_size_formula() {
    let mesh = box_mesh();
    let stl = export_binary_stl(&mesh, "box").unwrap();
    assert_eq!(stl.len(), 80 + 4 + mesh.triangle_count() * 50);
    let count = u32::from_le_bytes([stl[80], stl[81], stl[82], stl[83]]);
    assert_eq!(count as usize, 12);
}

#[test]
fn binary_stl_first_facet_normal() {
    let stl = export_binary_stl(&triangle_mesh(), "t").unwrap();
    let nz = f32::from_le_bytes([stl[92], stl[93], stl[94], stl[95]]);
    assert_eq!(nz, 1.0);
}

#[test]
fn ascii_stl_has_correct_keywords() {
    let stl = export_ascii_stl(&triangle_mesh(), "test_solid").unwrap();
    assert!(stl.starts_with("solid test_solid\n"));
    assert!(stl.ends_with("endsolid test_solid\n"));
    assert!(stl.contains("facet normal 0 0 1"));
    assert!(stl.contains("outer loop"));
    assert!(stl.contains("vertex 1 0 0"));
    assert_eq!(stl.matches("endfacet").count(), 1);
}

#[test]
fn empty_mesh_returns_error() {
    let mesh = TriangleMesh::default();
    assert!(matches!(
        export_binary_stl(&mesh, "empty"),
        Err(ExportError::EmptyMesh { .. })
    ));
    assert!(matches!(
        export_ascii_stl(&mesh, "empty"),
        Err(ExportError::EmptyMesh { .. })
    ));
}

#[test]
fn invalid_index_returns_error() {
    let mesh = TriangleMesh {
        positions: vec![[0.0, 0.0, 0.0]],
        triangles: vec![[0, 1, 2]],
    };
    assert!(matches!(
        export_binary_stl(&mesh, "bad"),
        Err(ExportError::InvalidMesh { .. })
    ));
    assert!(export_ascii_stl(&mesh, "bad").is_err());
}

#[test]
fn truck_box_exports() {
    let kb = TruckBackend::new();
    let solid = kb.make_box([0.0; 3], [2.0, 3.0, 4.0]).unwrap();
    let stl = export_binary_stl(solid.mesh(), solid.name()).unwrap();
    assert!(stl.len() > 84);
}

#[test]
fn csv_file_round_trip() {
    let dir = scratch_dir("csv");
    let path = dir.join("solid_1.csv");
    let pts = vec![Point3d::new(1.5, -2.0, 0.125), Point3d::new(3.0, 4.0, 5.0)];
    assert_eq!(write_csv_file(&path, &pts).unwrap(), 2);

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("x,y,z\n"));
    let back = read_rows(BufReader::new(fs::File::open(&path).unwrap())).unwrap();
    assert_eq!(back, pts);
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn csv_into_missing_directory_fails() {
    let path = std::env::temp_dir()
        .join("point-export-does-not-exist")
        .join("nested")
        .join("a.csv");
    let err = write_csv_file(&path, &[]).unwrap_err();
    assert!(matches!(err, ExportError::Create { .. }));
}

#[test]
fn stl_and_summary_files() {
    let dir = scratch_dir("files");
    let mesh = box_mesh();
    write_stl_file(&dir.join("a.stl"), &mesh, "a", StlFormat::Ascii).unwrap();
    write_stl_file(&dir.join("b.stl"), &mesh, "b", StlFormat::Binary).unwrap();
    assert!(fs::read_to_string(dir.join("a.stl")).unwrap().starts_with("solid a"));
    assert_eq!(fs::read(dir.join("b.stl")).unwrap().len(), 84 + 12 * 50);

    let bounds = BoundingBox::new(Point3d::ORIGIN, Point3d::new(1.0, 1.0, 1.0));
    let result = SampleResult::new(vec![Point3d::ORIGIN], 2, bounds);
    let mut run = RunSummary::new(7, true);
    run.push(SolidSummary::from_result(1, "a", &result));
    let path = dir.join("summary.json");
    run.write_json_file(&path).unwrap();
    let back = RunSummary::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, run);
    fs::remove_dir_all(&dir).ok();
}
