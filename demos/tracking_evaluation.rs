//! Tracking evaluation example demonstrating MOTA computation.

use mot_eval::{
    load_mot_from_str, matching::AssignmentStrategy, metrics::iou::calculate_iou,
    tracking::evaluate_tracking, BoundingBox,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Tracking Evaluation Example ===\n");

    // Example 1: IoU Calculation
    println!("1. IoU Calculation");
    let bbox1 = BoundingBox::new(10.0, 10.0, 50.0, 50.0);
    let bbox2 = BoundingBox::new(30.0, 30.0, 50.0, 50.0);
    let iou = calculate_iou(&bbox1, &bbox2);
    println!("   IoU between overlapping boxes: {:.4}", iou);
    println!();

    // Example 2: Load MOT annotations
    println!("2. Loading MOT Annotations");
    let ground_truth_text = "\
# frame, id, x, y, w, h
1,1,100,100,40,80
1,2,300,120,40,80
2,1,104,100,40,80
2,2,304,121,40,80
3,1,108,101,40,80
3,2,308,122,40,80
";
    let predictions_text = "\
# frame, id, x, y, w, h, confidence
1,7,101,99,40,82,0.94
1,8,298,121,42,80,0.88
2,7,105,100,40,81,0.93
2,8,303,122,41,80,0.87
3,9,109,101,40,80,0.91
3,8,307,123,40,80,0.86
";

    let ground_truth = load_mot_from_str(ground_truth_text);
    let predictions = load_mot_from_str(predictions_text);
    println!("   Ground truth: {}", ground_truth.stats.summary_string());
    println!("   Predictions:  {}", predictions.stats.summary_string());
    println!();

    // Example 3: Evaluate with both assignment strategies
    println!("3. MOTA Evaluation");
    for (name, strategy) in [
        ("greedy", AssignmentStrategy::Greedy),
        ("hungarian", AssignmentStrategy::Hungarian),
    ] {
        let metrics = evaluate_tracking(
            &ground_truth.frames,
            &predictions.frames,
            0.5,
            0.0,
            strategy,
        )?;

        println!("   [{}] MOTA: {:.4}", name, metrics.mota);
        println!(
            "   [{}] TP: {}, FP: {}, FN: {}, IDSW: {} (of {} GT boxes)",
            name,
            metrics.true_positives,
            metrics.false_positives,
            metrics.false_negatives,
            metrics.id_switches,
            metrics.total_gt
        );
        println!("   [{}] switch frames: {:?}", name, metrics.idsw_frames);
    }
    println!();

    // Example 4: Per-frame breakdown
    println!("4. Per-Frame Breakdown");
    let metrics = evaluate_tracking(
        &ground_truth.frames,
        &predictions.frames,
        0.5,
        0.0,
        AssignmentStrategy::Hungarian,
    )?;
    for frame in &metrics.per_frame {
        println!(
            "   frame {:>3}: tp={} fp={} fn={} idsw={} ({} gt / {} pred)",
            frame.frame,
            frame.true_positives,
            frame.false_positives,
            frame.false_negatives,
            frame.id_switch,
            frame.gt_count,
            frame.pred_count
        );
    }

    Ok(())
}
