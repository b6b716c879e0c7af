//! Confidence score thresholding utilities.

use crate::error::{MotEvalError, Result};
use crate::types::{Detection, ObjectAnnotation};

/// Filter detections by confidence score threshold.
///
/// # Arguments
///
/// * `detections` - Detections to filter
/// * `threshold` - Minimum confidence score (0.0 to 1.0)
///
/// # Returns
///
/// Returns a new vector containing only detections with score >= threshold.
///
/// # Errors
///
/// Returns an error if the threshold is not in the valid range [0.0, 1.0].
pub fn filter_by_confidence(detections: &[Detection], threshold: f64) -> Result<Vec<Detection>> {
    validate_threshold(threshold)?;

    Ok(detections
        .iter()
        .filter(|det| det.score >= threshold)
        .cloned()
        .collect())
}

/// Filter detection-evaluation annotations by confidence threshold.
///
/// Records without a score (ground truth convention) count as confidence 1.0
/// and always pass.
pub fn filter_annotations_by_confidence(
    annotations: &[ObjectAnnotation],
    threshold: f64,
) -> Result<Vec<ObjectAnnotation>> {
    validate_threshold(threshold)?;

    Ok(annotations
        .iter()
        .filter(|ann| ann.confidence() >= threshold)
        .cloned()
        .collect())
}

/// Generate a range of threshold values for evaluation sweeps.
///
/// # Example
///
/// ```
/// use mot_eval::threshold::generate_threshold_range;
///
/// let thresholds = generate_threshold_range(0.0, 1.0, 11).unwrap();
/// assert_eq!(thresholds.len(), 11);
/// assert_eq!(thresholds[0], 0.0);
/// assert_eq!(thresholds[10], 1.0);
/// ```
pub fn generate_threshold_range(start: f64, end: f64, steps: usize) -> Result<Vec<f64>> {
    if steps == 0 {
        return Err(MotEvalError::InvalidThreshold(
            "Number of steps must be greater than 0".to_string(),
        ));
    }

    validate_threshold(start)?;
    validate_threshold(end)?;

    if start > end {
        return Err(MotEvalError::InvalidThreshold(format!(
            "Start threshold ({}) must be <= end threshold ({})",
            start, end
        )));
    }

    if steps == 1 {
        return Ok(vec![start]);
    }

    let step_size = (end - start) / (steps - 1) as f64;
    Ok((0..steps).map(|i| start + step_size * i as f64).collect())
}

/// Validate that a confidence threshold is in the valid range [0.0, 1.0].
pub(crate) fn validate_threshold(threshold: f64) -> Result<()> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(MotEvalError::InvalidThreshold(format!(
            "Threshold must be between 0.0 and 1.0, got {}",
            threshold
        )));
    }
    Ok(())
}
