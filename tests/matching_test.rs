//! Integration tests for per-frame assignment.

use mot_eval::matching::{assign, AssignmentStrategy};
use mot_eval::types::{BoundingBox, Detection};

fn det(id: u64, x: f64, y: f64, w: f64, h: f64) -> Detection {
    Detection::new(id, BoundingBox::new(x, y, w, h))
}

const STRATEGIES: [AssignmentStrategy; 2] =
    [AssignmentStrategy::Greedy, AssignmentStrategy::Hungarian];

#[test]
fn test_matching_partitions_both_sides() {
    let gts = vec![
        det(1, 0.0, 0.0, 10.0, 10.0),
        det(2, 30.0, 0.0, 10.0, 10.0),
        det(3, 60.0, 0.0, 10.0, 10.0),
        det(4, 90.0, 0.0, 10.0, 10.0),
    ];
    let preds = vec![
        det(11, 1.0, 0.0, 10.0, 10.0),
        det(12, 31.0, 0.0, 10.0, 10.0),
        det(13, 200.0, 200.0, 10.0, 10.0),
    ];

    for strategy in STRATEGIES {
        let result = assign(&gts, &preds, 0.5, strategy).unwrap();
        assert_eq!(result.matches.len() + result.unmatched_gt.len(), gts.len());
        assert_eq!(
            result.matches.len() + result.unmatched_pred.len(),
            preds.len()
        );

        // No id appears on both sides of the partition.
        for m in &result.matches {
            assert!(!result.unmatched_gt.contains(&m.gt_id));
            assert!(!result.unmatched_pred.contains(&m.pred_id));
        }
    }
}

#[test]
fn test_no_match_below_gate_for_either_strategy() {
    let gts = vec![det(1, 0.0, 0.0, 10.0, 10.0)];
    let preds = vec![det(2, 9.0, 9.0, 10.0, 10.0)];

    for strategy in STRATEGIES {
        let result = assign(&gts, &preds, 0.9, strategy).unwrap();
        assert!(result.matches.is_empty());
    }
}

#[test]
fn test_all_matches_meet_gate() {
    let gts: Vec<Detection> = (0..8)
        .map(|i| det(i as u64, (i * 12) as f64, 0.0, 10.0, 10.0))
        .collect();
    let preds: Vec<Detection> = (0..8)
        .map(|i| det(100 + i as u64, (i * 12) as f64 + 2.0, 1.0, 10.0, 10.0))
        .collect();

    for strategy in STRATEGIES {
        let result = assign(&gts, &preds, 0.3, strategy).unwrap();
        for m in &result.matches {
            assert!(m.iou >= 0.3, "match below gate: {:?}", m);
        }
    }
}

#[test]
fn test_hungarian_total_iou_at_least_greedy() {
    // A congested scene where greedy choices can block better pairings.
    let gts = vec![
        det(1, 0.0, 0.0, 20.0, 20.0),
        det(2, 8.0, 0.0, 20.0, 20.0),
        det(3, 16.0, 0.0, 20.0, 20.0),
    ];
    let preds = vec![
        det(21, 4.0, 0.0, 20.0, 20.0),
        det(22, 12.0, 0.0, 20.0, 20.0),
        det(23, 20.0, 0.0, 20.0, 20.0),
    ];

    for gate in [0.1, 0.3, 0.5] {
        let greedy = assign(&gts, &preds, gate, AssignmentStrategy::Greedy).unwrap();
        let optimal = assign(&gts, &preds, gate, AssignmentStrategy::Hungarian).unwrap();
        assert!(
            optimal.total_iou() >= greedy.total_iou() - 1e-9,
            "gate {}: optimal {} < greedy {}",
            gate,
            optimal.total_iou(),
            greedy.total_iou()
        );
    }
}

#[test]
fn test_zero_threshold_still_requires_overlap_ordering() {
    // With a gate of 0.0 every pair is matchable, including disjoint ones.
    let gts = vec![det(1, 0.0, 0.0, 10.0, 10.0)];
    let preds = vec![det(2, 500.0, 500.0, 10.0, 10.0)];

    for strategy in STRATEGIES {
        let result = assign(&gts, &preds, 0.0, strategy).unwrap();
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].iou, 0.0);
    }
}

#[test]
fn test_determinism() {
    let gts: Vec<Detection> = (0..20)
        .map(|i| det(i as u64, (i % 5 * 15) as f64, (i / 5 * 15) as f64, 12.0, 12.0))
        .collect();
    let preds: Vec<Detection> = (0..20)
        .map(|i| det(50 + i as u64, (i % 5 * 15) as f64 + 1.0, (i / 5 * 15) as f64, 12.0, 12.0))
        .collect();

    for strategy in STRATEGIES {
        let first = assign(&gts, &preds, 0.5, strategy).unwrap();
        for _ in 0..5 {
            let again = assign(&gts, &preds, 0.5, strategy).unwrap();
            assert_eq!(first.matches.len(), again.matches.len());
            for (a, b) in first.matches.iter().zip(again.matches.iter()) {
                assert_eq!(a.gt_id, b.gt_id);
                assert_eq!(a.pred_id, b.pred_id);
            }
        }
    }
}
