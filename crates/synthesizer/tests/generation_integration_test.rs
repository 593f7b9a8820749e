use annotation::{AnnotationReader, RecordKind};
use image::{Rgb, RgbImage};
use std::fs;
use std::path::Path;
use synthesizer::{SynthesisError, SynthesisService, SynthesizerConfig, config::Environment};
use tempfile::{TempDir, tempdir};

fn write_shapes(dir: &Path, shapes: &[(&str, u32, u32, [u8; 3])]) {
    fs::create_dir_all(dir).unwrap();
    for &(name, w, h, color) in shapes {
        RgbImage::from_pixel(w, h, Rgb(color))
            .save(dir.join(name))
            .unwrap();
    }
}

fn config(root: &TempDir, nout: u32, out_dims: u32) -> SynthesizerConfig {
    SynthesizerConfig {
        input_folder: root.path().join("shapes"),
        output_folder: root.path().join("out/images"),
        annotation_folder: root.path().join("out/labels"),
        nout,
        out_dims,
        shape_percent: 16,
        max_attempts: 10_000,
        seed: Some(1234),
        environment: Environment::Development,
    }
}

/// End-to-end generation writes one image and one annotation file per index
///
/// Tests:
/// - Output folders are created
/// - Image dimensions and annotation counts
/// - Class ids follow sorted shape file names
/// - Normalized values stay in [0, 1]
#[test]
fn test_generates_images_and_annotations() {
    let root = tempdir().unwrap();
    write_shapes(
        &root.path().join("shapes"),
        &[
            ("b_square.png", 16, 16, [0, 255, 0]),
            ("a_circle.png", 16, 16, [255, 0, 0]),
        ],
    );
    let config = config(&root, 3, 128);

    let report = SynthesisService::new(config.clone()).run().unwrap();

    assert!(report.is_complete(), "failures: {:?}", report.failures);
    assert_eq!(report.images_written, 3);
    // 128² · 0.16 / 512 = 5.12 -> 5 copies of each of the 2 shapes
    assert_eq!(report.shapes_per_image, 10);

    let reader = AnnotationReader::new(RecordKind::GroundTruth).with_num_classes(2);
    for index in 0..3 {
        let image = image::open(config.image_path(index)).unwrap();
        assert_eq!((image.width(), image.height()), (128, 128));

        let records = reader.read(&config.annotation_path(index)).unwrap();
        assert_eq!(records.len(), 10);

        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.class_id, (i % 2) as u32);
            let b = record.bbox;
            for v in [b.center_x, b.center_y, b.width, b.height] {
                assert!((0.0..=1.0).contains(&v), "{v} outside [0, 1]");
            }
            let (x1, y1, x2, y2) = b.corners();
            assert!(x1 >= -1e-9 && y1 >= -1e-9 && x2 <= 1.0 + 1e-9 && y2 <= 1.0 + 1e-9);
        }
    }
}

/// The same seed reproduces byte-identical annotation files
#[test]
fn test_seed_makes_runs_reproducible() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    for root in [&first, &second] {
        write_shapes(&root.path().join("shapes"), &[("s.png", 10, 20, [9, 9, 9])]);
        SynthesisService::new(config(root, 2, 64)).run().unwrap();
    }

    for index in 0..2 {
        let a = fs::read_to_string(config(&first, 2, 64).annotation_path(index)).unwrap();
        let b = fs::read_to_string(config(&second, 2, 64).annotation_path(index)).unwrap();
        assert_eq!(a, b);
    }
}

/// Infeasible layouts fail per image instead of looping forever
#[test]
fn test_infeasible_layout_is_reported_per_image() {
    let root = tempdir().unwrap();
    write_shapes(&root.path().join("shapes"), &[("s.png", 11, 11, [255, 255, 255])]);
    let mut config = config(&root, 2, 20);
    // Two 11x11 slots can never both fit on a 20x20 canvas
    config.shape_percent = 100;
    config.max_attempts = 100;

    let report = SynthesisService::new(config).run().unwrap();

    assert_eq!(report.images_written, 0);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[1].index, 1);
    assert!(matches!(
        report.failures[0].error,
        SynthesisError::PlacementInfeasible { .. }
    ));
}

/// A failed encode leaves neither an image nor an annotation for that index
///
/// Tests:
/// - The encode error is reported for the blocked index only
/// - No annotation file is written for the failed image
/// - Later indices are still generated
#[test]
fn test_failed_encode_leaves_no_annotation() {
    let root = tempdir().unwrap();
    write_shapes(&root.path().join("shapes"), &[("s.png", 8, 8, [200, 0, 0])]);
    let config = config(&root, 2, 64);
    fs::create_dir_all(config.image_path(0)).unwrap();

    let report = SynthesisService::new(config.clone()).run().unwrap();

    assert_eq!(report.images_written, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 0);
    assert!(matches!(
        report.failures[0].error,
        SynthesisError::Encode { .. }
    ));
    assert!(!config.annotation_path(0).exists());
    assert!(config.image_path(1).is_file());
    assert!(config.annotation_path(1).is_file());
}

/// Outputs left by an earlier run are removed when that index fails
#[test]
fn test_failed_image_removes_stale_outputs() {
    let root = tempdir().unwrap();
    write_shapes(&root.path().join("shapes"), &[("s.png", 11, 11, [255, 255, 255])]);
    let mut config = config(&root, 1, 20);
    config.shape_percent = 100;
    config.max_attempts = 100;

    fs::create_dir_all(&config.output_folder).unwrap();
    fs::create_dir_all(&config.annotation_folder).unwrap();
    RgbImage::new(20, 20).save(config.image_path(0)).unwrap();
    fs::write(config.annotation_path(0), "0 0.5 0.5 0.5 0.5\n").unwrap();

    let report = SynthesisService::new(config.clone()).run().unwrap();

    assert_eq!(report.failures.len(), 1);
    assert!(!config.image_path(0).exists());
    assert!(!config.annotation_path(0).exists());
}

/// A folder without shapes aborts the run
#[test]
fn test_empty_shape_folder_aborts() {
    let root = tempdir().unwrap();
    fs::create_dir_all(root.path().join("shapes")).unwrap();

    let err = SynthesisService::new(config(&root, 1, 64)).run().unwrap_err();
    let source = err
        .downcast_ref::<SynthesisError>()
        .expect("setup failure should carry a SynthesisError");
    assert!(matches!(source, SynthesisError::NoShapes { .. }));
}

/// An undecodable shape file is named in the error
#[test]
fn test_corrupt_shape_is_reported_with_path() {
    let root = tempdir().unwrap();
    let shapes = root.path().join("shapes");
    fs::create_dir_all(&shapes).unwrap();
    fs::write(shapes.join("broken.png"), b"not a png").unwrap();

    let err = SynthesisService::new(config(&root, 1, 64)).run().unwrap_err();
    match err.downcast_ref::<SynthesisError>() {
        Some(SynthesisError::FileAccess { path, .. }) => {
            assert_eq!(path, &shapes.join("broken.png"));
        }
        other => panic!("Expected FileAccess, got {other:?}"),
    }
}
