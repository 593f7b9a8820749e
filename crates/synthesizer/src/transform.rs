use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

pub const MIN_SCALE: f64 = 0.75;
pub const MAX_ROTATION_DEGREES: u32 = 90;

/// Random shrink and rotation applied to a shape after its slot is fixed.
///
/// Scaling never enlarges and rotation keeps the original frame, so the
/// transformed shape always fits inside the slot reserved for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeTransform {
    /// In `[MIN_SCALE, 1.0]`.
    pub scale: f64,
    /// Counter-clockwise, in `[0, MAX_ROTATION_DEGREES]`.
    pub rotation_degrees: u32,
}

impl ShapeTransform {
    pub fn sample(rng: &mut fastrand::Rng) -> Self {
        Self {
            scale: MIN_SCALE + (1.0 - MIN_SCALE) * rng.f64(),
            rotation_degrees: rng.u32(0..=MAX_ROTATION_DEGREES),
        }
    }

    pub fn scaled_size(&self, width: u32, height: u32) -> (u32, u32) {
        let scale = self.scale.clamp(0.0, 1.0);
        (
            ((f64::from(width) * scale) as u32).max(1),
            ((f64::from(height) * scale) as u32).max(1),
        )
    }

    pub fn apply(&self, shape: &RgbImage) -> RgbImage {
        let (width, height) = self.scaled_size(shape.width(), shape.height());
        let resized = imageops::resize(shape, width, height, FilterType::Triangle);

        if self.rotation_degrees == 0 {
            return resized;
        }

        // imageproc rotates clockwise for positive angles
        let theta = -(self.rotation_degrees as f32).to_radians();
        rotate_about_center(&resized, theta, Interpolation::Nearest, Rgb([0, 0, 0]))
    }
}
