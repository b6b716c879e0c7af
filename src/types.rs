//! Core data types for tracking and detection evaluation.

use crate::error::{MotEvalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents an axis-aligned bounding box in LTWH format (x, y, width, height).
///
/// Coordinates are in pixels where:
/// - x: Left coordinate
/// - y: Top coordinate
/// - width: Box width
/// - height: Box height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Get the area of the bounding box.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Get the right coordinate (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom coordinate (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the bounding box is well-formed (finite, non-negative dimensions).
    ///
    /// A zero-area box is well-formed; it simply has IoU 0 with everything.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Validate the bounding box, failing fast on caller-contract violations.
    pub fn validate(&self) -> Result<()> {
        if !self.is_valid() {
            return Err(MotEvalError::InvalidBoundingBox(format!(
                "coordinates must be finite with non-negative dimensions, got \
                 ({}, {}, {}, {})",
                self.x, self.y, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// A single tracked-object observation: an identity, a box, and a confidence.
///
/// Ground truth conventionally carries a score of 1.0; the score is only
/// consulted when filtering predictions by confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Entity (track) identity within its sequence.
    pub id: u64,
    /// Bounding box of the observation.
    pub bbox: BoundingBox,
    /// Confidence score in [0, 1].
    pub score: f64,
}

impl Detection {
    /// Create a detection with the ground-truth convention score of 1.0.
    pub fn new(id: u64, bbox: BoundingBox) -> Self {
        Self { id, bbox, score: 1.0 }
    }

    /// Create a detection with an explicit confidence score.
    pub fn with_score(id: u64, bbox: BoundingBox, score: f64) -> Self {
        Self { id, bbox, score }
    }
}

/// Ordered frame key -> detections visible at that key.
///
/// The `BTreeMap` supplies ascending frame order, which is load-bearing for
/// MOTA: identity continuity is defined frame-to-frame.
pub type FrameSequence = BTreeMap<i64, Vec<Detection>>;

/// A detection-evaluation record: one box in one image, for one category.
///
/// Ground truth records carry no score; prediction records do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectAnnotation {
    pub image_id: u64,
    pub category_id: u64,
    /// Bounding box in [x, y, width, height] format.
    pub bbox: [f64; 4],
    /// Confidence score (for predictions).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl ObjectAnnotation {
    /// Convert the raw bbox array to a `BoundingBox`.
    pub fn to_bbox(&self) -> BoundingBox {
        BoundingBox::new(self.bbox[0], self.bbox[1], self.bbox[2], self.bbox[3])
    }

    /// Confidence score, defaulting to 1.0 for ground truth.
    pub fn confidence(&self) -> f64 {
        self.score.unwrap_or(1.0)
    }
}
