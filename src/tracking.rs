//! MOTA (Multi-Object Tracking Accuracy) accumulation over a frame sequence.
//!
//! The accumulator folds per-frame assignments into whole-sequence
//! TP/FP/FN/IDSW totals while carrying the ground-truth-to-prediction
//! identity map across frames. It is the only component with cross-frame
//! state, so one accumulation run is inherently sequential; independent
//! runs share nothing.

use crate::error::{MotEvalError, Result};
use crate::matching::{assign, AssignmentStrategy};
use crate::metrics::precision_recall::calculate_precision_recall;
use crate::threshold::{filter_by_confidence, validate_threshold};
use crate::types::{Detection, FrameSequence};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// Per-frame evaluation summary, for UI and debugging consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameSummary {
    pub frame: i64,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    /// Whether at least one identity switch occurred in this frame.
    pub id_switch: bool,
    pub gt_count: usize,
    /// Prediction count after confidence filtering.
    pub pred_count: usize,
}

/// Whole-sequence tracking metrics.
///
/// MOTA is unbounded below: error counts exceeding the ground truth total
/// yield a negative score, which is expected rather than an error.
#[derive(Debug, Clone, Serialize)]
pub struct TrackingMetrics {
    pub mota: f64,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub id_switches: usize,
    pub total_gt: usize,
    /// TP / (TP + FP) over the whole sequence.
    pub precision: f64,
    /// TP / (TP + FN) over the whole sequence.
    pub recall: f64,
    /// Frames in which at least one identity switch occurred, ascending.
    pub idsw_frames: Vec<i64>,
    /// One entry per frame with ground truth or prediction activity, ascending.
    pub per_frame: Vec<FrameSummary>,
}

/// Stateful MOTA accumulator for one sequence evaluation.
///
/// Feed frames in ascending order via [`observe_frame`](Self::observe_frame),
/// then call [`finalize`](Self::finalize). The identity-association map lives
/// inside the accumulator and is discarded with it, so concurrent independent
/// evaluations cannot interfere.
#[derive(Debug)]
pub struct MotaAccumulator {
    iou_threshold: f64,
    confidence_threshold: f64,
    strategy: AssignmentStrategy,
    true_positives: usize,
    false_positives: usize,
    false_negatives: usize,
    id_switches: usize,
    total_gt: usize,
    /// gt id -> predicted id it was matched to in its most recent frame.
    /// Entries for absent gt ids persist until the id reappears with a
    /// different match.
    associations: HashMap<u64, u64>,
    idsw_frames: Vec<i64>,
    per_frame: Vec<FrameSummary>,
    last_frame: Option<i64>,
}

impl MotaAccumulator {
    /// Create an accumulator with all counters at zero.
    ///
    /// # Errors
    ///
    /// Returns an error if either threshold is out of range.
    pub fn new(
        iou_threshold: f64,
        confidence_threshold: f64,
        strategy: AssignmentStrategy,
    ) -> Result<Self> {
        crate::matching::validate_iou_threshold(iou_threshold)?;
        validate_threshold(confidence_threshold)?;
        Ok(Self {
            iou_threshold,
            confidence_threshold,
            strategy,
            true_positives: 0,
            false_positives: 0,
            false_negatives: 0,
            id_switches: 0,
            total_gt: 0,
            associations: HashMap::new(),
            idsw_frames: Vec::new(),
            per_frame: Vec::new(),
            last_frame: None,
        })
    }

    /// Fold one frame into the running totals.
    ///
    /// Predictions below the confidence threshold are dropped before
    /// assignment. Frames must arrive in strictly ascending key order.
    pub fn observe_frame(&mut self, frame: i64, gts: &[Detection], preds: &[Detection]) -> Result<()> {
        if let Some(last) = self.last_frame {
            if frame <= last {
                return Err(MotEvalError::OutOfOrderFrame(format!(
                    "frame {} observed after frame {}",
                    frame, last
                )));
            }
        }
        self.last_frame = Some(frame);

        if gts.is_empty() && preds.is_empty() {
            return Ok(());
        }

        let preds = filter_by_confidence(preds, self.confidence_threshold)?;
        let assignment = assign(gts, &preds, self.iou_threshold, self.strategy)?;

        self.total_gt += gts.len();
        self.true_positives += assignment.matches.len();
        self.false_negatives += assignment.unmatched_gt.len();
        self.false_positives += assignment.unmatched_pred.len();

        let mut switched = false;
        for m in &assignment.matches {
            if let Some(&prev_pred_id) = self.associations.get(&m.gt_id) {
                if prev_pred_id != m.pred_id {
                    self.id_switches += 1;
                    switched = true;
                }
            }
            self.associations.insert(m.gt_id, m.pred_id);
        }
        if switched {
            self.idsw_frames.push(frame);
        }

        self.per_frame.push(FrameSummary {
            frame,
            true_positives: assignment.matches.len(),
            false_positives: assignment.unmatched_pred.len(),
            false_negatives: assignment.unmatched_gt.len(),
            id_switch: switched,
            gt_count: gts.len(),
            pred_count: preds.len(),
        });

        Ok(())
    }

    /// Consume the accumulator and compute final metrics.
    ///
    /// An empty sequence (no ground truth at all) scores MOTA = 1.0.
    pub fn finalize(self) -> TrackingMetrics {
        let mota = if self.total_gt == 0 {
            1.0
        } else {
            1.0 - (self.false_negatives + self.false_positives + self.id_switches) as f64
                / self.total_gt as f64
        };

        let pr = calculate_precision_recall(
            self.true_positives,
            self.false_positives,
            self.false_negatives,
        );

        debug!(
            "tracking finalized: mota={:.4} tp={} fp={} fn={} idsw={} total_gt={}",
            mota,
            self.true_positives,
            self.false_positives,
            self.false_negatives,
            self.id_switches,
            self.total_gt
        );

        TrackingMetrics {
            mota,
            true_positives: self.true_positives,
            false_positives: self.false_positives,
            false_negatives: self.false_negatives,
            id_switches: self.id_switches,
            total_gt: self.total_gt,
            precision: pr.precision,
            recall: pr.recall,
            idsw_frames: self.idsw_frames,
            per_frame: self.per_frame,
        }
    }
}

/// Evaluate tracking quality of a prediction sequence against ground truth.
///
/// Iterates the ascending union of ground-truth and prediction frame keys,
/// so frames present on only one side still contribute their misses or
/// false positives.
///
/// # Arguments
///
/// * `gt_frames` - Ground truth detections keyed by frame
/// * `pred_frames` - Predicted detections keyed by frame
/// * `iou_threshold` - Minimum IoU for a valid match
/// * `confidence_threshold` - Predictions below this score are dropped
/// * `strategy` - Assignment strategy for every frame
pub fn evaluate_tracking(
    gt_frames: &FrameSequence,
    pred_frames: &FrameSequence,
    iou_threshold: f64,
    confidence_threshold: f64,
    strategy: AssignmentStrategy,
) -> Result<TrackingMetrics> {
    let mut accumulator = MotaAccumulator::new(iou_threshold, confidence_threshold, strategy)?;

    let mut frames: Vec<i64> = gt_frames.keys().chain(pred_frames.keys()).copied().collect();
    frames.sort_unstable();
    frames.dedup();

    debug!(
        "evaluating tracking: {} frames, iou_threshold={}, confidence_threshold={}",
        frames.len(),
        iou_threshold,
        confidence_threshold
    );

    let empty: Vec<Detection> = Vec::new();
    for frame in frames {
        let gts = gt_frames.get(&frame).unwrap_or(&empty);
        let preds = pred_frames.get(&frame).unwrap_or(&empty);
        accumulator.observe_frame(frame, gts, preds)?;
    }

    Ok(accumulator.finalize())
}
