use annotation::BoundingBox;

/// Intersection over Union of two center-form boxes.
///
/// Returns 0.0 when the union is empty (both boxes degenerate), so the result
/// is always in `[0, 1]` and never NaN.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let (ax1, ay1, ax2, ay2) = a.corners();
    let (bx1, by1, bx2, by2) = b.corners();

    let inter_w = (ax2.min(bx2) - ax1.max(bx1)).max(0.0);
    let inter_h = (ay2.min(by2) - ay1.max(by1)).max(0.0);
    let intersection = inter_w * inter_h;

    let union = a.area() + b.area() - intersection;
    if union <= 0.0 {
        return 0.0;
    }

    intersection / union
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_overlap_is_total() {
        for b in [
            BoundingBox::new(0.5, 0.5, 0.2, 0.2),
            BoundingBox::new(0.1, 0.9, 0.05, 0.3),
            BoundingBox::new(0.5, 0.5, 1.0, 1.0),
        ] {
            assert!((iou(&b, &b) - 1.0).abs() < 1e-12, "IoU(b, b) for {b:?}");
        }
    }

    #[test]
    fn test_disjoint_boxes_have_zero_iou() {
        let a = BoundingBox::new(0.2, 0.2, 0.1, 0.1);
        let b = BoundingBox::new(0.8, 0.8, 0.1, 0.1);
        assert_eq!(iou(&a, &b), 0.0);

        // Overlapping on x only
        let c = BoundingBox::new(0.2, 0.8, 0.1, 0.1);
        assert_eq!(iou(&a, &c), 0.0);
    }

    #[test]
    fn test_touching_edges_have_zero_iou() {
        let a = BoundingBox::new(0.25, 0.5, 0.5, 0.5);
        let b = BoundingBox::new(0.75, 0.5, 0.5, 0.5);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn test_partial_overlap_known_value() {
        // Two unit squares offset by half a side: inter = 0.5, union = 1.5
        let a = BoundingBox::new(0.5, 0.5, 1.0, 1.0);
        let b = BoundingBox::new(1.0, 0.5, 1.0, 1.0);
        assert!((iou(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_contained_box() {
        let outer = BoundingBox::new(0.5, 0.5, 0.4, 0.4);
        let inner = BoundingBox::new(0.5, 0.5, 0.2, 0.2);
        assert!((iou(&outer, &inner) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_iou_is_symmetric() {
        let pairs = [
            (
                BoundingBox::new(0.3, 0.4, 0.2, 0.3),
                BoundingBox::new(0.35, 0.45, 0.25, 0.1),
            ),
            (
                BoundingBox::new(0.5, 0.5, 0.6, 0.6),
                BoundingBox::new(0.6, 0.6, 0.2, 0.5),
            ),
        ];
        for (a, b) in pairs {
            assert_eq!(iou(&a, &b), iou(&b, &a));
        }
    }

    #[test]
    fn test_degenerate_boxes_yield_zero() {
        let point = BoundingBox::new(0.5, 0.5, 0.0, 0.0);
        assert_eq!(iou(&point, &point), 0.0);

        let line = BoundingBox::new(0.5, 0.5, 0.0, 0.4);
        let b = BoundingBox::new(0.5, 0.5, 0.2, 0.2);
        assert_eq!(iou(&line, &b), 0.0);
    }
}
