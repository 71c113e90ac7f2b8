//! Score ordering for detection candidates.

use std::cmp::Ordering;

use crate::candidate::Detection;

/// Folds `-0.0` onto `0.0` so signed zeros tie under `total_cmp`.
#[inline]
fn score_key(score: f32) -> f32 {
    if score == 0.0 {
        0.0
    } else {
        score
    }
}

fn score_cmp_desc(a: &Detection, b: &Detection) -> Ordering {
    score_key(b.score).total_cmp(&score_key(a.score))
}

/// Sorts candidates by descending score.
///
/// The sort is stable: candidates with equal scores keep their relative
/// input order. NaN scores follow `f32::total_cmp`, so positive NaN ranks
/// ahead of every finite score.
pub fn sort_by_score_desc(candidates: &mut [Detection]) {
    candidates.sort_by(score_cmp_desc);
}
