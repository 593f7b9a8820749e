use crate::errors::SynthesisError;
use crate::planner::{Placement, PlacementPlanner};
use crate::shapes::ShapeLibrary;
use crate::transform::ShapeTransform;
use annotation::{Annotation, BoundingBox};
use image::{Rgb, RgbImage, imageops};

/// One generated image with its ground truth.
pub struct ComposedImage {
    pub image: RgbImage,
    pub annotations: Vec<Annotation>,
    /// Reserved slots, in placement order.
    pub placements: Vec<Placement>,
}

pub struct Compositor<'a> {
    library: &'a ShapeLibrary,
    canvas: u32,
    copies_per_image: u32,
    max_attempts: u32,
}

impl<'a> Compositor<'a> {
    pub fn new(
        library: &'a ShapeLibrary,
        canvas: u32,
        copies_per_image: u32,
        max_attempts: u32,
    ) -> Self {
        Self {
            library,
            canvas,
            copies_per_image,
            max_attempts,
        }
    }

    pub fn shapes_per_image(&self) -> usize {
        self.copies_per_image as usize * self.library.len()
    }

    /// Paste `copies_per_image` copies of every shape onto a black canvas.
    ///
    /// Each copy gets a free slot sized by the untransformed shape, is then
    /// shrunk and rotated, and is pasted centered in that slot.
    pub fn compose(&self, rng: &mut fastrand::Rng) -> Result<ComposedImage, SynthesisError> {
        let _s = common::span_debug!("compose");

        let mut canvas = RgbImage::from_pixel(self.canvas, self.canvas, Rgb([0, 0, 0]));
        let mut planner = PlacementPlanner::new(self.canvas, self.max_attempts);
        let mut annotations = Vec::with_capacity(self.shapes_per_image());
        let side = f64::from(self.canvas);

        for _ in 0..self.copies_per_image {
            for shape in self.library.shapes() {
                let slot = planner.place(shape.image.width(), shape.image.height(), rng)?;

                let transform = ShapeTransform::sample(rng);
                let transformed = transform.apply(&shape.image);
                let (width, height) = transformed.dimensions();

                let paste_x = slot.x + (slot.width - width) / 2;
                let paste_y = slot.y + (slot.height - height) / 2;
                imageops::replace(&mut canvas, &transformed, i64::from(paste_x), i64::from(paste_y));

                let center_x = f64::from(paste_x) + f64::from(width) / 2.0;
                let center_y = f64::from(paste_y) + f64::from(height) / 2.0;
                annotations.push(Annotation::ground_truth(
                    shape.class_id,
                    BoundingBox::new(
                        center_x / side,
                        center_y / side,
                        f64::from(width) / side,
                        f64::from(height) / side,
                    ),
                ));
            }
        }

        Ok(ComposedImage {
            image: canvas,
            annotations,
            placements: planner.placements().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> ShapeLibrary {
        ShapeLibrary::from_images(vec![
            ("circle.png".to_string(), RgbImage::from_pixel(20, 20, Rgb([255, 0, 0]))),
            ("square.png".to_string(), RgbImage::from_pixel(12, 30, Rgb([0, 255, 0]))),
        ])
    }

    #[test]
    fn test_annotation_per_placed_shape() {
        let lib = library();
        let compositor = Compositor::new(&lib, 128, 3, 10_000);
        let mut rng = fastrand::Rng::with_seed(42);

        let composed = compositor.compose(&mut rng).unwrap();

        assert_eq!(compositor.shapes_per_image(), 6);
        assert_eq!(composed.annotations.len(), 6);
        assert_eq!(composed.placements.len(), 6);
        assert_eq!(composed.image.dimensions(), (128, 128));

        // Outer loop over copies, inner loop over shapes
        let classes: Vec<u32> = composed.annotations.iter().map(|a| a.class_id).collect();
        assert_eq!(classes, vec![0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_annotations_stay_inside_their_slot() {
        let lib = library();
        let compositor = Compositor::new(&lib, 200, 4, 10_000);
        let mut rng = fastrand::Rng::with_seed(5);

        let composed = compositor.compose(&mut rng).unwrap();

        for (a, slot) in composed.annotations.iter().zip(&composed.placements) {
            let (x1, y1, x2, y2) = a.bbox.corners();
            let eps = 1e-9;
            assert!(x1 * 200.0 >= f64::from(slot.x) - eps, "{a:?} left of {slot:?}");
            assert!(y1 * 200.0 >= f64::from(slot.y) - eps, "{a:?} above {slot:?}");
            assert!(x2 * 200.0 <= f64::from(slot.x + slot.width) + eps);
            assert!(y2 * 200.0 <= f64::from(slot.y + slot.height) + eps);

            for v in [a.bbox.center_x, a.bbox.center_y, a.bbox.width, a.bbox.height] {
                assert!((0.0..=1.0).contains(&v), "{v} not normalized");
            }
            assert!(a.bbox.width * 200.0 >= f64::from(slot.width) * 0.75 - 1.0);
        }
    }

    #[test]
    fn test_zero_copies_gives_blank_canvas() {
        let lib = library();
        let compositor = Compositor::new(&lib, 64, 0, 10);
        let mut rng = fastrand::Rng::with_seed(1);

        let composed = compositor.compose(&mut rng).unwrap();
        assert!(composed.annotations.is_empty());
        assert!(composed.image.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn test_overcrowded_canvas_fails() {
        let lib = library();
        let compositor = Compositor::new(&lib, 40, 10, 200);
        let mut rng = fastrand::Rng::with_seed(9);

        assert!(matches!(
            compositor.compose(&mut rng),
            Err(SynthesisError::PlacementInfeasible { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_output() {
        let lib = library();
        let compositor = Compositor::new(&lib, 128, 2, 10_000);

        let a = compositor.compose(&mut fastrand::Rng::with_seed(8)).unwrap();
        let b = compositor.compose(&mut fastrand::Rng::with_seed(8)).unwrap();
        assert_eq!(a.placements, b.placements);
        assert_eq!(a.annotations, b.annotations);
        assert_eq!(a.image, b.image);
    }
}
