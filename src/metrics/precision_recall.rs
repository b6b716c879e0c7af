//! Precision and Recall calculation.

/// Epsilon guard against division by zero in cumulative ratios.
const EPS: f64 = 1e-10;

/// Container for scalar precision and recall values.
#[derive(Debug, Clone)]
pub struct PrecisionRecall {
    pub precision: f64,
    pub recall: f64,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

/// Calculate precision and recall from TP, FP, and FN counts.
///
/// # Example
///
/// ```
/// use mot_eval::metrics::precision_recall::calculate_precision_recall;
///
/// let pr = calculate_precision_recall(8, 2, 3);
/// assert_eq!(pr.precision, 0.8); // 8 / (8 + 2)
/// assert!((pr.recall - 0.7272).abs() < 0.001); // 8 / (8 + 3)
/// ```
pub fn calculate_precision_recall(
    true_positives: usize,
    false_positives: usize,
    false_negatives: usize,
) -> PrecisionRecall {
    let precision = if true_positives + false_positives > 0 {
        true_positives as f64 / (true_positives + false_positives) as f64
    } else {
        0.0
    };

    let recall = if true_positives + false_negatives > 0 {
        true_positives as f64 / (true_positives + false_negatives) as f64
    } else {
        0.0
    };

    PrecisionRecall {
        precision,
        recall,
        true_positives,
        false_positives,
        false_negatives,
    }
}

/// Compute cumulative precision and recall arrays over a ranked detection list.
///
/// `is_true_positive[i]` says whether the i-th prediction (in descending
/// confidence order) matched a ground truth box. Recall divides by the
/// ground truth count; both ratios are epsilon-guarded.
///
/// # Returns
///
/// `(precision, recall)` arrays, one entry per ranked prediction.
pub fn precision_recall_arrays(
    is_true_positive: &[bool],
    num_ground_truth: usize,
) -> (Vec<f64>, Vec<f64>) {
    let mut precision = Vec::with_capacity(is_true_positive.len());
    let mut recall = Vec::with_capacity(is_true_positive.len());

    let mut tp = 0usize;
    let mut fp = 0usize;
    for &is_tp in is_true_positive {
        if is_tp {
            tp += 1;
        } else {
            fp += 1;
        }
        precision.push(tp as f64 / ((tp + fp) as f64 + EPS));
        recall.push(tp as f64 / (num_ground_truth as f64 + EPS));
    }

    (precision, recall)
}
