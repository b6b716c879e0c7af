//! Detection evaluation orchestrator: per-category AP, mAP, and PR curves.
//!
//! Categories are evaluated independently (no shared state), so the
//! per-category sweep runs in parallel and a single-threaded merge folds
//! the results.

use crate::error::Result;
use crate::matching::validate_iou_threshold;
use crate::metrics::ap::{calculate_ap, calculate_map};
use crate::metrics::iou::calculate_iou;
use crate::metrics::precision_recall::precision_recall_arrays;
use crate::threshold::{filter_annotations_by_confidence, validate_threshold};
use crate::types::{BoundingBox, ObjectAnnotation};
use log::debug;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Raw (uninterpolated) precision-recall curve for one category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PrCurve {
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
}

/// Detection-quality metrics across all evaluated categories.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionMetrics {
    /// Unweighted mean of per-category AP over included categories.
    pub mean_ap: f64,
    /// Per-category Average Precision.
    pub class_ap: BTreeMap<u64, f64>,
    /// Per-category precision-recall curves over the ranked predictions.
    pub pr_curves: BTreeMap<u64, PrCurve>,
}

/// Evaluate detection predictions against ground truth.
///
/// AP is computed independently per category and averaged (unweighted)
/// into mAP. Category inclusion rules:
/// - neither ground truth nor predictions: excluded from the mean;
/// - ground truth but no predictions: AP = 0;
/// - predictions but no ground truth: AP = 0 (all false positives).
///
/// Ground truth boxes are matched only within the same image. Each ground
/// truth box is consumed by at most one prediction; the highest-confidence
/// match wins.
///
/// # Arguments
///
/// * `ground_truth` - Ground truth annotations (all images, all categories)
/// * `predictions` - Predicted annotations with scores
/// * `iou_threshold` - Minimum IoU for a true positive
/// * `confidence_threshold` - Predictions below this score are dropped
///
/// # Errors
///
/// Returns an error on invalid thresholds or non-finite box coordinates.
pub fn evaluate_detection(
    ground_truth: &[ObjectAnnotation],
    predictions: &[ObjectAnnotation],
    iou_threshold: f64,
    confidence_threshold: f64,
) -> Result<DetectionMetrics> {
    validate_iou_threshold(iou_threshold)?;
    validate_threshold(confidence_threshold)?;
    for ann in ground_truth.iter().chain(predictions.iter()) {
        ann.to_bbox().validate()?;
    }

    let predictions = filter_annotations_by_confidence(predictions, confidence_threshold)?;

    let mut category_ids: BTreeSet<u64> = BTreeSet::new();
    for ann in ground_truth {
        category_ids.insert(ann.category_id);
    }
    for ann in &predictions {
        category_ids.insert(ann.category_id);
    }

    debug!(
        "evaluating detection: {} gt, {} predictions, {} categories",
        ground_truth.len(),
        predictions.len(),
        category_ids.len()
    );

    // Per-category work shares nothing, so sweep categories in parallel
    // and fold results on this thread.
    let per_category: Vec<(u64, f64, PrCurve)> = category_ids
        .iter()
        .copied()
        .collect::<Vec<u64>>()
        .par_iter()
        .filter_map(|&category_id| {
            evaluate_category(ground_truth, &predictions, category_id, iou_threshold)
                .map(|(ap, curve)| (category_id, ap, curve))
        })
        .collect();

    let mut class_ap = BTreeMap::new();
    let mut pr_curves = BTreeMap::new();
    let mut ap_values = Vec::with_capacity(per_category.len());
    for (category_id, ap, curve) in per_category {
        ap_values.push(ap);
        class_ap.insert(category_id, ap);
        pr_curves.insert(category_id, curve);
    }

    Ok(DetectionMetrics {
        mean_ap: calculate_map(&ap_values),
        class_ap,
        pr_curves,
    })
}

/// Evaluate one category; returns `None` when the category has neither
/// ground truth nor predictions (excluded from the mean).
fn evaluate_category(
    ground_truth: &[ObjectAnnotation],
    predictions: &[ObjectAnnotation],
    category_id: u64,
    iou_threshold: f64,
) -> Option<(f64, PrCurve)> {
    let gts: Vec<&ObjectAnnotation> = ground_truth
        .iter()
        .filter(|ann| ann.category_id == category_id)
        .collect();
    let mut preds: Vec<&ObjectAnnotation> = predictions
        .iter()
        .filter(|ann| ann.category_id == category_id)
        .collect();

    if gts.is_empty() && preds.is_empty() {
        return None;
    }
    // One side empty: every prediction is a false positive, or every ground
    // truth a miss. Either way AP is 0 by definition.
    if gts.is_empty() || preds.is_empty() {
        return Some((0.0, PrCurve::default()));
    }

    // Ground truth boxes grouped by image, with per-box consumed flags.
    let mut gt_by_image: HashMap<u64, Vec<BoundingBox>> = HashMap::new();
    for gt in &gts {
        gt_by_image.entry(gt.image_id).or_default().push(gt.to_bbox());
    }
    let mut consumed: HashMap<u64, Vec<bool>> = gt_by_image
        .iter()
        .map(|(&image_id, boxes)| (image_id, vec![false; boxes.len()]))
        .collect();

    // Rank by confidence descending; stable sort keeps original order on ties.
    preds.sort_by(|a, b| {
        b.confidence()
            .partial_cmp(&a.confidence())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut is_true_positive = Vec::with_capacity(preds.len());
    for pred in &preds {
        let pred_box = pred.to_bbox();
        let mut best_iou = 0.0;
        let mut best_gt_idx: Option<usize> = None;

        if let Some(boxes) = gt_by_image.get(&pred.image_id) {
            let flags = &consumed[&pred.image_id];
            for (gt_idx, gt_box) in boxes.iter().enumerate() {
                if flags[gt_idx] {
                    continue;
                }
                let iou = calculate_iou(&pred_box, gt_box);
                if iou > best_iou {
                    best_iou = iou;
                    best_gt_idx = Some(gt_idx);
                }
            }
        }

        match best_gt_idx {
            Some(gt_idx) if best_iou >= iou_threshold => {
                if let Some(flags) = consumed.get_mut(&pred.image_id) {
                    flags[gt_idx] = true;
                }
                is_true_positive.push(true);
            }
            _ => is_true_positive.push(false),
        }
    }

    let (precision, recall) = precision_recall_arrays(&is_true_positive, gts.len());
    let ap = calculate_ap(&recall, &precision);

    Some((ap, PrCurve { precision, recall }))
}
