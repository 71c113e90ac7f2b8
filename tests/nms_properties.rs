use detpost::lowlevel::{partition_by_class, sort_by_score_desc};
use detpost::{iou, suppress_all_classes, suppress_class, Detection, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_rect(rng: &mut StdRng) -> Rect {
    let left = rng.random_range(0.0f32..100.0);
    let top = rng.random_range(0.0f32..100.0);
    let width = rng.random_range(1.0f32..40.0);
    let height = rng.random_range(1.0f32..40.0);
    Rect::new(left, top, left + width, top + height)
}

fn random_detections(rng: &mut StdRng, count: usize, num_classes: usize) -> Vec<Detection> {
    (0..count)
        .map(|_| {
            // Coarse scores so ties show up regularly.
            let score = rng.random_range(0..10) as f32 / 10.0;
            let class_id = rng.random_range(0..num_classes);
            Detection::new(random_rect(rng), score, class_id)
        })
        .collect()
}

fn det(l: f32, t: f32, r: f32, b: f32, score: f32, class_id: usize) -> Detection {
    Detection::new(Rect::new(l, t, r, b), score, class_id)
}

#[test]
fn iou_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let a = random_rect(&mut rng);
        let b = random_rect(&mut rng);
        assert_eq!(iou(&a, &b), iou(&b, &a));
    }
}

#[test]
fn iou_with_itself_is_one() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let a = random_rect(&mut rng);
        assert_eq!(iou(&a, &a), 1.0);
    }
}

#[test]
fn iou_is_zero_without_axis_overlap() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..200 {
        let a = random_rect(&mut rng);
        let gap = rng.random_range(0.0f32..5.0);
        let right_of = Rect::new(a.right + gap, a.top, a.right + gap + 3.0, a.bottom);
        let below = Rect::new(a.left, a.bottom + gap, a.right, a.bottom + gap + 3.0);
        assert_eq!(iou(&a, &right_of), 0.0);
        assert_eq!(iou(&a, &below), 0.0);
    }
}

#[test]
fn iou_stays_in_unit_interval_for_well_formed_boxes() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..500 {
        let value = iou(&random_rect(&mut rng), &random_rect(&mut rng));
        assert!((0.0..=1.0).contains(&value), "iou out of range: {value}");
    }
}

#[test]
fn suppression_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(23);
    for threshold in [0.0f32, 0.1, 0.3, 0.5, 0.7, 1.0] {
        let dets = random_detections(&mut rng, 60, 1);
        let once = suppress_class(&dets, threshold);
        let twice = suppress_class(&once, threshold);
        assert_eq!(once, twice, "threshold {threshold}");
    }
}

#[test]
fn survivors_do_not_overlap_above_threshold() {
    let mut rng = StdRng::seed_from_u64(29);
    let threshold = 0.4;
    let dets = random_detections(&mut rng, 80, 1);
    let kept = suppress_class(&dets, threshold);
    for (i, a) in kept.iter().enumerate() {
        for b in &kept[i + 1..] {
            assert!(a.iou(b) <= threshold);
            assert!(a.score >= b.score);
        }
    }
}

#[test]
fn every_dropped_candidate_overlaps_a_better_survivor() {
    let mut rng = StdRng::seed_from_u64(31);
    let threshold = 0.5;
    let dets = random_detections(&mut rng, 80, 1);
    let kept = suppress_class(&dets, threshold);
    for d in dets.iter().filter(|d| !kept.contains(d)) {
        assert!(kept
            .iter()
            .any(|k| k.score >= d.score && k.iou(d) > threshold));
    }
}

#[test]
fn reference_scenario_keeps_disjoint_box() {
    let a = det(0.0, 0.0, 10.0, 10.0, 0.9, 0);
    let b = det(1.0, 1.0, 10.0, 10.0, 0.8, 0);
    let c = det(50.0, 50.0, 60.0, 60.0, 0.7, 0);
    let out = suppress_all_classes(&[a, b, c], 0.5, 1).unwrap();
    assert_eq!(out, vec![a, c]);
}

#[test]
fn identical_boxes_of_different_classes_both_survive() {
    let c1 = det(0.0, 0.0, 10.0, 10.0, 0.9, 0);
    let c2 = det(0.0, 0.0, 10.0, 10.0, 0.8, 1);
    let out = suppress_all_classes(&[c1, c2], 0.5, 2).unwrap();
    assert_eq!(out, vec![c1, c2]);
}

#[test]
fn tied_scores_are_deterministic() {
    let dets = [
        det(0.0, 0.0, 10.0, 10.0, 0.5, 0),
        det(1.0, 0.0, 11.0, 10.0, 0.5, 0),
        det(30.0, 0.0, 40.0, 10.0, 0.5, 0),
        det(31.0, 0.0, 41.0, 10.0, 0.5, 0),
    ];
    let first = suppress_class(&dets, 0.5);
    assert_eq!(first, vec![dets[0], dets[2]]);
    for _ in 0..10 {
        assert_eq!(suppress_class(&dets, 0.5), first);
    }

    let reversed: Vec<Detection> = dets.iter().rev().copied().collect();
    assert_eq!(suppress_class(&reversed, 0.5), vec![dets[3], dets[1]]);
}

#[test]
fn pipeline_equals_per_class_composition() {
    let mut rng = StdRng::seed_from_u64(37);
    let num_classes = 5;
    let dets = random_detections(&mut rng, 120, num_classes);

    let expected: Vec<Detection> = partition_by_class(&dets, num_classes)
        .unwrap()
        .iter()
        .flat_map(|partition| suppress_class(partition, 0.45))
        .collect();
    assert_eq!(suppress_all_classes(&dets, 0.45, num_classes).unwrap(), expected);
}

#[test]
fn sort_is_stable_for_equal_scores() {
    let mut rng = StdRng::seed_from_u64(41);
    let mut dets = random_detections(&mut rng, 50, 1);
    let original = dets.clone();
    sort_by_score_desc(&mut dets);
    for pair in dets.windows(2) {
        assert!(pair[0].score >= pair[1].score);
        if pair[0].score == pair[1].score {
            let i = original.iter().position(|d| d == &pair[0]).unwrap();
            let j = original.iter().position(|d| d == &pair[1]).unwrap();
            assert!(i < j);
        }
    }
}
