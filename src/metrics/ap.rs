//! Average Precision (AP) and mean Average Precision (mAP) calculation.

/// Calculate Average Precision from a precision-recall curve.
///
/// Uses VOC-style all-point interpolation: the curve is padded with
/// sentinels (recall 0 and 1, precision 0 on both ends), precision is made
/// monotonically non-increasing from right to left, and AP is the area
/// under the smoothed curve summed where recall changes.
///
/// # Arguments
///
/// * `recalls` - Recall values in rank order (non-decreasing)
/// * `precisions` - Precision values in the same rank order
///
/// # Example
///
/// ```
/// use mot_eval::metrics::ap::calculate_ap;
///
/// let recalls = vec![0.5, 1.0];
/// let precisions = vec![1.0, 1.0];
/// let ap = calculate_ap(&recalls, &precisions);
/// assert!((ap - 1.0).abs() < 1e-10);
/// ```
pub fn calculate_ap(recalls: &[f64], precisions: &[f64]) -> f64 {
    if recalls.is_empty() || precisions.is_empty() {
        return 0.0;
    }

    let mut mrec = Vec::with_capacity(recalls.len() + 2);
    mrec.push(0.0);
    mrec.extend_from_slice(recalls);
    mrec.push(1.0);

    let mut mpre = Vec::with_capacity(precisions.len() + 2);
    mpre.push(0.0);
    mpre.extend_from_slice(precisions);
    mpre.push(0.0);

    // Right-to-left maximum: precision becomes non-increasing in recall.
    for i in (0..mpre.len() - 1).rev() {
        mpre[i] = mpre[i].max(mpre[i + 1]);
    }

    let mut ap = 0.0;
    for i in 0..mrec.len() - 1 {
        if mrec[i + 1] != mrec[i] {
            ap += (mrec[i + 1] - mrec[i]) * mpre[i + 1];
        }
    }
    ap
}

/// Smooth a precision array to be monotonically non-increasing in recall
/// order, without the sentinel padding. Exposed for curve inspection.
pub fn interpolate_precision(precisions: &[f64]) -> Vec<f64> {
    let mut smoothed = precisions.to_vec();
    for i in (0..smoothed.len().saturating_sub(1)).rev() {
        smoothed[i] = smoothed[i].max(smoothed[i + 1]);
    }
    smoothed
}

/// Calculate mean Average Precision as the unweighted mean of per-class AP.
///
/// Returns 0.0 for an empty slice.
///
/// # Example
///
/// ```
/// use mot_eval::metrics::ap::calculate_map;
///
/// let class_aps = vec![0.8, 0.9, 0.75, 0.85];
/// let map = calculate_map(&class_aps);
/// assert!((map - 0.825).abs() < 1e-10);
/// ```
pub fn calculate_map(class_aps: &[f64]) -> f64 {
    if class_aps.is_empty() {
        return 0.0;
    }

    class_aps.iter().sum::<f64>() / class_aps.len() as f64
}
