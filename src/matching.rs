//! Per-frame assignment of predicted boxes to ground truth boxes.
//!
//! Two interchangeable strategies sit behind one [`assign`] entry point:
//! a greedy scan over IoU-descending candidate pairs, and an exact
//! Kuhn-Munkres (Hungarian) solution of the gated assignment problem.
//! Both respect the same gate: a (gt, pred) pair is matchable only if its
//! IoU reaches the threshold.

use crate::error::{MotEvalError, Result};
use crate::metrics::iou::calculate_iou_matrix;
use crate::types::{BoundingBox, Detection};
use pathfinding::kuhn_munkres::kuhn_munkres_min;
use pathfinding::matrix::Matrix;

/// Fixed-point scale for the integer Hungarian cost matrix.
const COST_SCALE: i64 = 1_000_000;

/// Cost assigned to gated-out and padding cells. Large enough that the
/// solver prefers any valid assignment over an invalid one.
const INVALID_COST: i64 = COST_SCALE * 1_000;

/// Assignment strategy for matching predictions to ground truth in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStrategy {
    /// First-come-first-served over pairs sorted by descending IoU.
    /// Deterministic and fast; an approximation of the optimal matching.
    Greedy,
    /// Exact minimum-cost bipartite assignment (Kuhn-Munkres) over the
    /// cost matrix `1 - IoU`, with gated pairs never selectable.
    Hungarian,
}

/// A matched (ground truth, prediction) pair within one frame.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Match {
    pub gt_id: u64,
    pub pred_id: u64,
    pub iou: f64,
}

/// Result of assigning one frame: a bijective partial matching plus the
/// unmatched residues on both sides.
///
/// Unmatched ground truth ids are false negatives for the frame; unmatched
/// prediction ids are false positives; matches are true positives.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Assignment {
    pub matches: Vec<Match>,
    pub unmatched_gt: Vec<u64>,
    pub unmatched_pred: Vec<u64>,
}

impl Assignment {
    /// Sum of IoU values over all accepted matches.
    pub fn total_iou(&self) -> f64 {
        self.matches.iter().map(|m| m.iou).sum()
    }
}

/// Match ground truth boxes to predicted boxes for a single frame.
///
/// A pair is matchable only if its IoU is at least `iou_threshold`; each
/// ground truth id and each prediction id participates in at most one match.
///
/// # Arguments
///
/// * `gts` - Ground truth detections for the frame
/// * `preds` - Predicted detections for the frame
/// * `iou_threshold` - Minimum IoU for a valid match (the gate)
/// * `strategy` - Greedy or Hungarian matching
///
/// # Errors
///
/// Returns an error if the threshold is negative or non-finite, or if any
/// bounding box has negative or non-finite coordinates.
pub fn assign(
    gts: &[Detection],
    preds: &[Detection],
    iou_threshold: f64,
    strategy: AssignmentStrategy,
) -> Result<Assignment> {
    validate_iou_threshold(iou_threshold)?;
    for det in gts.iter().chain(preds.iter()) {
        det.bbox.validate()?;
    }

    if gts.is_empty() || preds.is_empty() {
        return Ok(Assignment {
            matches: Vec::new(),
            unmatched_gt: gts.iter().map(|g| g.id).collect(),
            unmatched_pred: preds.iter().map(|p| p.id).collect(),
        });
    }

    let gt_boxes: Vec<BoundingBox> = gts.iter().map(|g| g.bbox).collect();
    let pred_boxes: Vec<BoundingBox> = preds.iter().map(|p| p.bbox).collect();
    let iou_matrix = calculate_iou_matrix(&gt_boxes, &pred_boxes);

    let pairs = match strategy {
        AssignmentStrategy::Greedy => greedy_pairs(&iou_matrix, iou_threshold),
        AssignmentStrategy::Hungarian => hungarian_pairs(&iou_matrix, iou_threshold),
    };

    let mut matched_gt = vec![false; gts.len()];
    let mut matched_pred = vec![false; preds.len()];
    let mut matches = Vec::with_capacity(pairs.len());
    for (gt_idx, pred_idx, iou) in pairs {
        matched_gt[gt_idx] = true;
        matched_pred[pred_idx] = true;
        matches.push(Match {
            gt_id: gts[gt_idx].id,
            pred_id: preds[pred_idx].id,
            iou,
        });
    }

    let unmatched_gt = gts
        .iter()
        .enumerate()
        .filter(|(i, _)| !matched_gt[*i])
        .map(|(_, g)| g.id)
        .collect();
    let unmatched_pred = preds
        .iter()
        .enumerate()
        .filter(|(j, _)| !matched_pred[*j])
        .map(|(_, p)| p.id)
        .collect();

    Ok(Assignment {
        matches,
        unmatched_gt,
        unmatched_pred,
    })
}

/// Greedy matching: enumerate gated pairs, sort by IoU descending (stable,
/// so ties keep GT-then-prediction enumeration order), accept a pair only
/// if neither side is already consumed.
fn greedy_pairs(iou_matrix: &[Vec<f64>], iou_threshold: f64) -> Vec<(usize, usize, f64)> {
    let mut candidates: Vec<(usize, usize, f64)> = Vec::new();
    for (gt_idx, row) in iou_matrix.iter().enumerate() {
        for (pred_idx, &iou) in row.iter().enumerate() {
            if iou >= iou_threshold {
                candidates.push((gt_idx, pred_idx, iou));
            }
        }
    }
    candidates.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

    let num_gts = iou_matrix.len();
    let num_preds = iou_matrix.first().map_or(0, |row| row.len());
    let mut used_gt = vec![false; num_gts];
    let mut used_pred = vec![false; num_preds];
    let mut accepted = Vec::new();
    for (gt_idx, pred_idx, iou) in candidates {
        if used_gt[gt_idx] || used_pred[pred_idx] {
            continue;
        }
        used_gt[gt_idx] = true;
        used_pred[pred_idx] = true;
        accepted.push((gt_idx, pred_idx, iou));
    }
    accepted
}

/// Optimal matching: exact Kuhn-Munkres over a square-padded integer cost
/// matrix. Costs are `(1 - IoU)` scaled to fixed point; gated-out and
/// padding cells carry a cost no valid assignment can reach. Pairs whose
/// true IoU is below the gate are discarded after solving.
fn hungarian_pairs(iou_matrix: &[Vec<f64>], iou_threshold: f64) -> Vec<(usize, usize, f64)> {
    let num_gts = iou_matrix.len();
    let num_preds = iou_matrix.first().map_or(0, |row| row.len());
    let size = num_gts.max(num_preds);

    let weights = Matrix::from_fn(size, size, |(gt_idx, pred_idx)| {
        if gt_idx < num_gts && pred_idx < num_preds {
            let iou = iou_matrix[gt_idx][pred_idx];
            if iou >= iou_threshold {
                ((1.0 - iou) * COST_SCALE as f64) as i64
            } else {
                INVALID_COST
            }
        } else {
            INVALID_COST
        }
    });

    let (_, column_of_row) = kuhn_munkres_min(&weights);

    column_of_row
        .iter()
        .enumerate()
        .filter_map(|(gt_idx, &pred_idx)| {
            if gt_idx < num_gts && pred_idx < num_preds {
                let iou = iou_matrix[gt_idx][pred_idx];
                if iou >= iou_threshold {
                    return Some((gt_idx, pred_idx, iou));
                }
            }
            None
        })
        .collect()
}

/// Validate an IoU gate threshold: must be finite and non-negative.
pub(crate) fn validate_iou_threshold(threshold: f64) -> Result<()> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(MotEvalError::InvalidThreshold(format!(
            "IoU threshold must be finite and non-negative, got {}",
            threshold
        )));
    }
    Ok(())
}
