//! Integration tests for detection ranking, AP, and mAP.

use mot_eval::evaluator::evaluate_detection;
use mot_eval::types::ObjectAnnotation;

fn gt(image_id: u64, category_id: u64, bbox: [f64; 4]) -> ObjectAnnotation {
    ObjectAnnotation { image_id, category_id, bbox, score: None }
}

fn pred(image_id: u64, category_id: u64, bbox: [f64; 4], score: f64) -> ObjectAnnotation {
    ObjectAnnotation { image_id, category_id, bbox, score: Some(score) }
}

#[test]
fn test_ranked_matching_perfect_ap() {
    // One GT box, two predictions: the higher-confidence one overlaps at
    // IoU 0.9, the lower one at ~0.1. The correct prediction ranked first
    // reaches recall 1 at precision 1, so AP is 1.0.
    let gts = vec![gt(1, 1, [0.0, 0.0, 10.0, 10.0])];
    let preds = vec![
        pred(1, 1, [0.0, 0.0, 10.0, 9.0], 0.95),
        pred(1, 1, [8.5, 8.5, 10.0, 10.0], 0.40),
    ];

    let metrics = evaluate_detection(&gts, &preds, 0.5, 0.0).unwrap();
    assert!((metrics.mean_ap - 1.0).abs() < 1e-6);
}

#[test]
fn test_wrong_ranking_halves_ap() {
    // The false positive outranks the true positive over one GT box:
    // precision at the recall step is 0.5, so AP is 0.5.
    let gts = vec![gt(1, 1, [0.0, 0.0, 10.0, 10.0])];
    let preds = vec![
        pred(1, 1, [200.0, 200.0, 10.0, 10.0], 0.9),
        pred(1, 1, [0.0, 0.0, 10.0, 10.0], 0.5),
    ];

    let metrics = evaluate_detection(&gts, &preds, 0.5, 0.0).unwrap();
    assert!((metrics.mean_ap - 0.5).abs() < 1e-6);
}

#[test]
fn test_map_averages_categories_unweighted() {
    // Category 1: perfect single detection (AP 1.0, one box).
    // Category 2: two GT boxes, one found (AP 0.5, two boxes).
    // The mean ignores the differing box counts.
    let gts = vec![
        gt(1, 1, [0.0, 0.0, 10.0, 10.0]),
        gt(1, 2, [50.0, 50.0, 10.0, 10.0]),
        gt(1, 2, [80.0, 80.0, 10.0, 10.0]),
    ];
    let preds = vec![
        pred(1, 1, [0.0, 0.0, 10.0, 10.0], 0.9),
        pred(1, 2, [50.0, 50.0, 10.0, 10.0], 0.9),
    ];

    let metrics = evaluate_detection(&gts, &preds, 0.5, 0.0).unwrap();
    assert!((metrics.class_ap[&1] - 1.0).abs() < 1e-6);
    assert!((metrics.class_ap[&2] - 0.5).abs() < 1e-6);
    assert!((metrics.mean_ap - 0.75).abs() < 1e-6);
}

#[test]
fn test_category_inclusion_rules() {
    // Category 1 has GT and predictions; category 2 has GT only (AP 0);
    // category 3 has predictions only (AP 0); category 4 exists nowhere
    // and must not appear.
    let gts = vec![
        gt(1, 1, [0.0, 0.0, 10.0, 10.0]),
        gt(1, 2, [30.0, 30.0, 10.0, 10.0]),
    ];
    let preds = vec![
        pred(1, 1, [0.0, 0.0, 10.0, 10.0], 0.9),
        pred(1, 3, [60.0, 60.0, 10.0, 10.0], 0.9),
    ];

    let metrics = evaluate_detection(&gts, &preds, 0.5, 0.0).unwrap();
    assert_eq!(metrics.class_ap.len(), 3);
    assert!(metrics.class_ap.contains_key(&1));
    assert_eq!(metrics.class_ap[&2], 0.0);
    assert_eq!(metrics.class_ap[&3], 0.0);
    assert!(!metrics.class_ap.contains_key(&4));
    assert!((metrics.mean_ap - 1.0 / 3.0).abs() < 1e-6);
}

#[test]
fn test_pr_curve_shape() {
    // Ranked TP, TP, FP, TP over 4 GT boxes.
    let gts = vec![
        gt(1, 1, [0.0, 0.0, 10.0, 10.0]),
        gt(1, 1, [30.0, 0.0, 10.0, 10.0]),
        gt(1, 1, [60.0, 0.0, 10.0, 10.0]),
        gt(1, 1, [90.0, 0.0, 10.0, 10.0]),
    ];
    let preds = vec![
        pred(1, 1, [0.0, 0.0, 10.0, 10.0], 0.9),
        pred(1, 1, [30.0, 0.0, 10.0, 10.0], 0.8),
        pred(1, 1, [300.0, 300.0, 10.0, 10.0], 0.7),
        pred(1, 1, [60.0, 0.0, 10.0, 10.0], 0.6),
    ];

    let metrics = evaluate_detection(&gts, &preds, 0.5, 0.0).unwrap();
    let curve = &metrics.pr_curves[&1];
    assert_eq!(curve.precision.len(), 4);

    // Recall never decreases along the ranking.
    for window in curve.recall.windows(2) {
        assert!(window[1] >= window[0] - 1e-12);
    }
    assert!((curve.precision[0] - 1.0).abs() < 1e-6);
    assert!((curve.precision[2] - 2.0 / 3.0).abs() < 1e-6);
    assert!((curve.recall[3] - 0.75).abs() < 1e-6);
}

#[test]
fn test_cross_image_boxes_do_not_interfere() {
    // Identical coordinates in different images: each prediction can only
    // consume the GT box in its own image.
    let gts = vec![
        gt(1, 1, [0.0, 0.0, 10.0, 10.0]),
        gt(2, 1, [0.0, 0.0, 10.0, 10.0]),
    ];
    let preds = vec![
        pred(1, 1, [0.0, 0.0, 10.0, 10.0], 0.9),
        pred(1, 1, [0.0, 0.0, 10.0, 10.0], 0.8), // duplicate in image 1: FP
    ];

    let metrics = evaluate_detection(&gts, &preds, 0.5, 0.0).unwrap();
    let curve = &metrics.pr_curves[&1];
    // Second prediction is a false positive despite image 2's free GT box.
    assert!((curve.precision[1] - 0.5).abs() < 1e-6);
    assert!((curve.recall[1] - 0.5).abs() < 1e-6);
}

#[test]
fn test_confidence_tie_keeps_input_order() {
    // Two predictions with equal confidence: the earlier record is ranked
    // first and consumes the GT box.
    let gts = vec![gt(1, 1, [0.0, 0.0, 10.0, 10.0])];
    let preds = vec![
        pred(1, 1, [1.0, 0.0, 10.0, 10.0], 0.5),
        pred(1, 1, [0.0, 0.0, 10.0, 10.0], 0.5),
    ];

    let metrics = evaluate_detection(&gts, &preds, 0.5, 0.0).unwrap();
    let curve = &metrics.pr_curves[&1];
    assert!((curve.precision[0] - 1.0).abs() < 1e-6);
    assert!((curve.precision[1] - 0.5).abs() < 1e-6);
}

#[test]
fn test_larger_multi_image_dataset() {
    // 5 images x 3 GT boxes, predictions perfect in 4 images and missing
    // in the fifth: AP equals recall ceiling 12/15 with perfect precision.
    let mut gts = Vec::new();
    let mut preds = Vec::new();
    for image in 1..=5u64 {
        for slot in 0..3u64 {
            let x = slot as f64 * 40.0;
            gts.push(gt(image, 1, [x, 0.0, 20.0, 20.0]));
            if image != 5 {
                preds.push(pred(image, 1, [x, 0.0, 20.0, 20.0], 0.9));
            }
        }
    }

    let metrics = evaluate_detection(&gts, &preds, 0.5, 0.0).unwrap();
    assert!((metrics.mean_ap - 12.0 / 15.0).abs() < 1e-6);
}
