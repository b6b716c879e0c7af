//! Annotation loading: MOT row-oriented text and JSON annotation lists.
//!
//! The engine assumes well-formed detections; this module is the upstream
//! filter. Malformed or short MOT rows are dropped (and counted), never
//! surfaced as errors. Missing files surface as an I/O error, distinct
//! from the engine's own error conditions.

use crate::error::Result;
use crate::stats::ParseStats;
use crate::types::{BoundingBox, Detection, FrameSequence, ObjectAnnotation};
use log::debug;
use std::fs;
use std::path::Path;

/// A parsed MOT sequence: frame-keyed detections plus parse statistics.
#[derive(Debug, Clone, Default)]
pub struct MotSequence {
    pub frames: FrameSequence,
    pub stats: ParseStats,
}

/// Parse one MOT row: `frame, id, x, y, w, h[, conf]`.
///
/// Commas and whitespace are both accepted as separators. A missing or
/// unparsable confidence field defaults to 1.0 (the ground-truth
/// convention). Returns `None` for rows that cannot yield a record.
pub fn parse_mot_line(line: &str) -> Option<(i64, Detection)> {
    let normalized = line.replace(',', " ");
    let parts: Vec<&str> = normalized.split_whitespace().collect();
    if parts.len() < 6 {
        return None;
    }

    let frame = parts[0].parse::<f64>().ok()? as i64;
    let id = parts[1].parse::<f64>().ok()? as u64;
    let x = parts[2].parse::<f64>().ok()?;
    let y = parts[3].parse::<f64>().ok()?;
    let width = parts[4].parse::<f64>().ok()?;
    let height = parts[5].parse::<f64>().ok()?;
    let score = parts
        .get(6)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(1.0);

    Some((
        frame,
        Detection::with_score(id, BoundingBox::new(x, y, width, height), score),
    ))
}

/// Load a MOT sequence from annotation text.
///
/// Blank lines and lines starting with `#` are ignored; malformed rows are
/// dropped and counted in the returned statistics.
///
/// # Example
///
/// ```
/// use mot_eval::loader::load_mot_from_str;
///
/// let text = "1,1,0,0,10,10,0.9\n1,2,20,20,10,10\n# comment\n";
/// let sequence = load_mot_from_str(text);
/// assert_eq!(sequence.frames[&1].len(), 2);
/// assert_eq!(sequence.stats.parsed, 2);
/// ```
pub fn load_mot_from_str(text: &str) -> MotSequence {
    let mut frames = FrameSequence::new();
    let mut stats = ParseStats::new();

    for line in text.lines() {
        stats.total_lines += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            stats.comments += 1;
            continue;
        }

        match parse_mot_line(trimmed) {
            Some((frame, detection)) => {
                stats.parsed += 1;
                frames.entry(frame).or_default().push(detection);
            }
            None => {
                let field_count = trimmed.replace(',', " ").split_whitespace().count();
                if field_count < 6 {
                    stats.skipped_short += 1;
                } else {
                    stats.skipped_malformed += 1;
                }
            }
        }
    }

    debug!("loaded MOT sequence: {}", stats.summary_string());

    MotSequence { frames, stats }
}

/// Load a MOT sequence from a file.
///
/// # Errors
///
/// Returns an I/O error if the file is missing or unreadable.
pub fn load_mot_from_file<P: AsRef<Path>>(path: P) -> Result<MotSequence> {
    let text = fs::read_to_string(path)?;
    Ok(load_mot_from_str(&text))
}

/// Load detection-evaluation annotations from a JSON array.
///
/// # Example
///
/// ```
/// use mot_eval::loader::load_annotations_from_str;
///
/// let json = r#"[
///     {"image_id": 1, "category_id": 1, "bbox": [0.0, 0.0, 10.0, 10.0], "score": 0.9}
/// ]"#;
/// let annotations = load_annotations_from_str(json).unwrap();
/// assert_eq!(annotations.len(), 1);
/// ```
pub fn load_annotations_from_str(json_str: &str) -> Result<Vec<ObjectAnnotation>> {
    let annotations: Vec<ObjectAnnotation> = serde_json::from_str(json_str)?;
    Ok(annotations)
}

/// Load detection-evaluation annotations from a JSON file.
pub fn load_annotations_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<ObjectAnnotation>> {
    let text = fs::read_to_string(path)?;
    load_annotations_from_str(&text)
}
