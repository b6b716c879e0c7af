//! Metric primitives: IoU, precision/recall, and AP integration.

pub mod ap;
pub mod iou;
pub mod precision_recall;

pub use ap::{calculate_ap, calculate_map};
pub use iou::{calculate_iou, calculate_iou_matrix};
pub use precision_recall::{calculate_precision_recall, precision_recall_arrays, PrecisionRecall};
