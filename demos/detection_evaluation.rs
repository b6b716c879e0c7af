//! Detection evaluation example demonstrating mAP computation.

use mot_eval::{evaluator::evaluate_detection, load_annotations_from_str};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Detection Evaluation Example ===\n");

    // Example 1: Load annotations from JSON
    println!("1. Loading Annotations");
    let ground_truth_json = r#"[
        {"image_id": 1, "category_id": 1, "bbox": [100.0, 100.0, 50.0, 50.0]},
        {"image_id": 1, "category_id": 1, "bbox": [300.0, 100.0, 50.0, 50.0]},
        {"image_id": 1, "category_id": 2, "bbox": [200.0, 200.0, 60.0, 40.0]},
        {"image_id": 2, "category_id": 1, "bbox": [120.0, 110.0, 50.0, 50.0]},
        {"image_id": 2, "category_id": 2, "bbox": [220.0, 210.0, 60.0, 40.0]}
    ]"#;

    let predictions_json = r#"[
        {"image_id": 1, "category_id": 1, "bbox": [102.0, 101.0, 50.0, 50.0], "score": 0.95},
        {"image_id": 1, "category_id": 1, "bbox": [298.0, 102.0, 52.0, 50.0], "score": 0.88},
        {"image_id": 1, "category_id": 2, "bbox": [201.0, 199.0, 60.0, 41.0], "score": 0.90},
        {"image_id": 2, "category_id": 1, "bbox": [121.0, 111.0, 50.0, 50.0], "score": 0.92},
        {"image_id": 2, "category_id": 2, "bbox": [400.0, 400.0, 60.0, 40.0], "score": 0.45},
        {"image_id": 2, "category_id": 2, "bbox": [221.0, 211.0, 60.0, 40.0], "score": 0.85}
    ]"#;

    let ground_truth = load_annotations_from_str(ground_truth_json)?;
    let predictions = load_annotations_from_str(predictions_json)?;
    println!("   Loaded {} GT annotations", ground_truth.len());
    println!("   Loaded {} predictions", predictions.len());
    println!();

    // Example 2: Evaluate at IoU 0.5
    println!("2. mAP Evaluation (IoU 0.5)");
    let metrics = evaluate_detection(&ground_truth, &predictions, 0.5, 0.0)?;
    println!("   mAP: {:.4}", metrics.mean_ap);
    for (category, ap) in &metrics.class_ap {
        println!("   AP  category {}: {:.4}", category, ap);
    }
    println!();

    // Example 3: PR curves
    println!("3. Precision-Recall Curves");
    for (category, curve) in &metrics.pr_curves {
        println!("   category {}:", category);
        for (precision, recall) in curve.precision.iter().zip(curve.recall.iter()) {
            println!("      P={:.4} R={:.4}", precision, recall);
        }
    }
    println!();

    // Example 4: Effect of a confidence threshold
    println!("4. Confidence Filtering (threshold 0.8)");
    let filtered = evaluate_detection(&ground_truth, &predictions, 0.5, 0.8)?;
    println!("   mAP: {:.4}", filtered.mean_ap);

    Ok(())
}
