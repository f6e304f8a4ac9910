//! Muscle prioritisation.
//!
//! Normalises the free-text preference list from the profile store and
//! moves prioritised muscles to the front of each training day.

use crate::DetailedPlan;

/// Heads a literal "shoulders" preference expands to, in order
pub const SHOULDER_HEADS: [&str; 3] = ["front delts", "side delts", "rear delts"];

/// Expand a comma separated preference list into canonical muscle tokens
///
/// Pieces are trimmed and empty pieces dropped. `shoulders` (any casing)
/// becomes the three delt heads at its own position; everything else passes
/// through unchanged.
pub fn normalize_priorities(text: &str) -> Vec<String> {
    let mut muscles = Vec::new();

    for piece in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if piece.eq_ignore_ascii_case("shoulders") {
            muscles.extend(SHOULDER_HEADS.iter().map(|m| m.to_string()));
        } else {
            muscles.push(piece.to_string());
        }
    }

    muscles
}

/// Move prioritised tokens to the front of every day
///
/// This is a stable partition: tokens with the same priority status keep
/// their relative order.
pub fn reorder_by_priority(plan: &DetailedPlan, prioritized: &[String]) -> DetailedPlan {
    if prioritized.is_empty() {
        return plan.clone();
    }

    plan.map_days(|tokens| {
        let mut ordered = tokens.to_vec();
        // sort_by_key is stable; `false` (prioritised) sorts first
        ordered.sort_by_key(|token| !prioritized.contains(token));
        ordered
    })
}
