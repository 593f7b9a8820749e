//! Rejection sampling of non-overlapping shape slots on a square canvas.

use crate::errors::SynthesisError;

/// Reserved slot in pixel coordinates, covering `[x, x + width) × [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Placement {
    pub fn x_range(&self) -> (u32, u32) {
        (self.x, self.x + self.width)
    }

    pub fn y_range(&self) -> (u32, u32) {
        (self.y, self.y + self.height)
    }

    /// True when the two slots share interior area on both axes.
    pub fn overlaps(&self, other: &Placement) -> bool {
        intervals_overlap(self.x_range(), other.x_range())
            && intervals_overlap(self.y_range(), other.y_range())
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

#[inline]
fn intervals_overlap(a: (u32, u32), b: (u32, u32)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Places shapes one at a time, never overlapping an earlier placement.
pub struct PlacementPlanner {
    canvas: u32,
    max_attempts: u32,
    placed: Vec<Placement>,
}

impl PlacementPlanner {
    pub fn new(canvas: u32, max_attempts: u32) -> Self {
        Self {
            canvas,
            max_attempts,
            placed: Vec::new(),
        }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placed
    }

    /// Sample a free slot for a `width × height` shape.
    ///
    /// Gives up with `PlacementInfeasible` after `max_attempts` rejected samples.
    pub fn place(
        &mut self,
        width: u32,
        height: u32,
        rng: &mut fastrand::Rng,
    ) -> Result<Placement, SynthesisError> {
        if width > self.canvas || height > self.canvas {
            return Err(SynthesisError::ShapeExceedsCanvas {
                width,
                height,
                canvas: self.canvas,
            });
        }

        for attempt in 0..self.max_attempts {
            let candidate = Placement {
                x: rng.u32(0..=self.canvas - width),
                y: rng.u32(0..=self.canvas - height),
                width,
                height,
            };

            if self.placed.iter().all(|p| !p.overlaps(&candidate)) {
                tracing::trace!(
                    x = candidate.x,
                    y = candidate.y,
                    attempts = attempt + 1,
                    "Placed shape"
                );
                self.placed.push(candidate);
                return Ok(candidate);
            }
        }

        Err(SynthesisError::PlacementInfeasible {
            width,
            height,
            placed: self.placed.len(),
            attempts: self.max_attempts,
        })
    }
}
