//! # mot-eval
//!
//! A Rust library for evaluating object-tracking and object-detection
//! outputs against ground truth.
//!
//! Two families of metrics are provided:
//! - **MOTA** (Multi-Object Tracking Accuracy) with its false-positive,
//!   false-negative, and identity-switch components, accumulated over an
//!   ordered frame sequence
//! - **mAP** (mean Average Precision) with per-category AP and
//!   precision-recall curves, computed from confidence-ranked detections
//!
//! ## Features
//!
//! - IoU (Intersection over Union) between axis-aligned bounding boxes
//! - Per-frame assignment of predictions to ground truth under an IoU gate,
//!   with interchangeable greedy and Hungarian (Kuhn-Munkres) strategies
//! - Cross-frame identity tracking for IDSW detection, with per-frame
//!   breakdowns for debugging
//! - VOC-style all-point interpolated Average Precision, parallelized
//!   across categories
//! - Confidence-threshold filtering for predictions
//! - Loaders for MOT row-oriented text and JSON annotation lists that drop
//!   malformed records before they reach the engine
//!
//! The engine itself is pure and stateless per call: it performs no I/O and
//! owns no persisted state, so independent evaluations can run concurrently.
//!
//! ## Quick Start
//!
//! ```rust
//! use mot_eval::loader::load_mot_from_str;
//! use mot_eval::tracking::evaluate_tracking;
//! use mot_eval::matching::AssignmentStrategy;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gt = load_mot_from_str("1,1,0,0,10,10\n2,1,2,0,10,10\n");
//! let pred = load_mot_from_str("1,5,0,0,10,10,0.9\n2,5,2,0,10,10,0.9\n");
//!
//! let metrics = evaluate_tracking(
//!     &gt.frames,
//!     &pred.frames,
//!     0.5,
//!     0.0,
//!     AssignmentStrategy::Greedy,
//! )?;
//!
//! println!("MOTA: {:.4}", metrics.mota);
//! println!("IDSW: {}", metrics.id_switches);
//! # Ok(())
//! # }
//! ```
//!
//! ## MOT Row Format
//!
//! Tracking annotations use one row per box:
//!
//! ```text
//! frame, id, x, y, width, height[, confidence]
//! ```
//!
//! Commas and whitespace both separate fields; `#` starts a comment line.
//! Ground truth omits the confidence field (it defaults to 1.0).

pub mod error;
pub mod types;
pub mod loader;
pub mod stats;
pub mod threshold;
pub mod metrics;
pub mod matching;
pub mod tracking;
pub mod evaluator;

// Re-export commonly used types and functions
pub use error::{MotEvalError, Result};
pub use types::{BoundingBox, Detection, FrameSequence, ObjectAnnotation};
pub use loader::{
    load_annotations_from_file, load_annotations_from_str, load_mot_from_file, load_mot_from_str,
    MotSequence,
};
pub use matching::{assign, Assignment, AssignmentStrategy, Match};
pub use tracking::{evaluate_tracking, FrameSummary, MotaAccumulator, TrackingMetrics};
pub use evaluator::{evaluate_detection, DetectionMetrics, PrCurve};
pub use threshold::{filter_by_confidence, generate_threshold_range};
