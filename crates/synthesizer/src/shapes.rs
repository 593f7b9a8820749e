use crate::errors::SynthesisError;
use image::RgbImage;
use std::io;
use std::path::Path;

pub struct Shape {
    pub name: String,
    pub class_id: u32,
    pub image: RgbImage,
}

impl Shape {
    pub fn area(&self) -> u64 {
        u64::from(self.image.width()) * u64::from(self.image.height())
    }
}

/// Shape cutouts indexed by class id.
///
/// Class ids follow the sorted file names of the source folder.
pub struct ShapeLibrary {
    shapes: Vec<Shape>,
}

impl ShapeLibrary {
    pub fn load(dir: &Path) -> Result<Self, SynthesisError> {
        if !dir.is_dir() {
            return Err(SynthesisError::Io {
                path: dir.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
            });
        }

        let pattern = format!("{}/*", glob::Pattern::escape(&dir.to_string_lossy()));
        let entries = glob::glob(&pattern).map_err(|e| SynthesisError::Io {
            path: dir.to_path_buf(),
            source: io::Error::other(e.to_string()),
        })?;

        let mut images = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| SynthesisError::Io {
                path: e.path().to_path_buf(),
                source: e.into(),
            })?;
            if !path.is_file() {
                continue;
            }

            let image = image::open(&path)
                .map_err(|source| SynthesisError::FileAccess {
                    path: path.clone(),
                    source,
                })?
                .to_rgb8();

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            tracing::debug!(
                shape = %name,
                width = image.width(),
                height = image.height(),
                "Loaded shape"
            );
            images.push((name, image));
        }

        if images.is_empty() {
            return Err(SynthesisError::NoShapes {
                dir: dir.to_path_buf(),
            });
        }

        Ok(Self::from_images(images))
    }

    /// Build from decoded images; class ids follow the given order.
    pub fn from_images(images: Vec<(String, RgbImage)>) -> Self {
        let shapes = images
            .into_iter()
            .enumerate()
            .map(|(class_id, (name, image))| Shape {
                name,
                class_id: class_id as u32,
                image,
            })
            .collect();
        Self { shapes }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn total_area(&self) -> u64 {
        self.shapes.iter().map(Shape::area).sum()
    }

    /// How many copies of every shape go on one canvas so that the shapes
    /// cover about `shape_percent` of it.
    pub fn copies_per_image(&self, canvas: u32, shape_percent: u32) -> u32 {
        let total_area = self.total_area();
        if total_area == 0 {
            return 0;
        }
        let canvas_area = f64::from(canvas) * f64::from(canvas);
        (canvas_area * (f64::from(shape_percent) / 100.0) / total_area as f64).floor() as u32
    }
}
