use serde::{Deserialize, Serialize};

/// Axis-aligned box in center form, normalized to the image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        Self {
            center_x,
            center_y,
            width,
            height,
        }
    }

    /// Corner form `(x1, y1, x2, y2)`.
    #[inline]
    pub fn corners(&self) -> (f64, f64, f64, f64) {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        (
            self.center_x - half_w,
            self.center_y - half_h,
            self.center_x + half_w,
            self.center_y + half_h,
        )
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Which side of an evaluation a file belongs to. Inference records carry a
/// trailing confidence, ground-truth records do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    GroundTruth,
    Inference,
}

impl RecordKind {
    pub fn field_count(self) -> usize {
        match self {
            RecordKind::GroundTruth => 5,
            RecordKind::Inference => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub class_id: u32,
    pub bbox: BoundingBox,
    pub confidence: Option<f64>,
}

impl Annotation {
    pub fn ground_truth(class_id: u32, bbox: BoundingBox) -> Self {
        Self {
            class_id,
            bbox,
            confidence: None,
        }
    }

    pub fn inference(class_id: u32, bbox: BoundingBox, confidence: f64) -> Self {
        Self {
            class_id,
            bbox,
            confidence: Some(confidence),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self.confidence {
            Some(_) => RecordKind::Inference,
            None => RecordKind::GroundTruth,
        }
    }
}
