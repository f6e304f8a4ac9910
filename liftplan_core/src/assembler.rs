//! Greedy plan assembly.
//!
//! Walks a detailed plan token by token and picks the highest-rated exercise
//! that has not been used yet anywhere in the plan. Uniqueness is tracked per
//! top-level taxonomy group for the whole run, not per day.

use crate::{DetailedPlan, ExerciseTaxonomy, GeneratedDay, GeneratedPlan, PlanGap};
use std::collections::{HashMap, HashSet};

/// Exercises already placed during one generation run, keyed by group
#[derive(Clone, Debug, Default)]
pub struct UsedExerciseRegistry {
    used: HashMap<String, HashSet<String>>,
}

impl UsedExerciseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_used(&self, category: &str, exercise: &str) -> bool {
        self.used
            .get(category)
            .is_some_and(|names| names.contains(exercise))
    }

    /// Record an exercise; returns false if it was already recorded
    pub fn mark(&mut self, category: &str, exercise: &str) -> bool {
        self.used
            .entry(category.to_string())
            .or_default()
            .insert(exercise.to_string())
    }

    /// Total number of recorded exercises
    pub fn len(&self) -> usize {
        self.used.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Best unused exercise found for a token
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate<'a> {
    pub category: &'a str,
    pub division: &'a str,
    pub exercise: &'a str,
    pub rating: f64,
}

/// Find the strictly highest-rated unused exercise for a token
///
/// Every division whose name contains the token is considered. Ties keep the
/// first exercise met in taxonomy order.
pub fn best_candidate<'a>(
    token: &str,
    taxonomy: &'a ExerciseTaxonomy,
    used: &UsedExerciseRegistry,
) -> Option<Candidate<'a>> {
    let mut best: Option<Candidate<'a>> = None;

    for group in taxonomy.groups() {
        for division in &group.divisions {
            if division.exercises.is_empty() || !division.name.contains(token) {
                continue;
            }

            for exercise in &division.exercises {
                if used.is_used(&group.name, &exercise.name) {
                    continue;
                }
                if best.map_or(true, |b| exercise.rating > b.rating) {
                    best = Some(Candidate {
                        category: &group.name,
                        division: &division.name,
                        exercise: &exercise.name,
                        rating: exercise.rating,
                    });
                }
            }
        }
    }

    best
}

/// Turn a detailed plan into exercise names with a fresh registry
///
/// Tokens without any unused candidate are skipped for that day and listed
/// in [`GeneratedPlan::gaps`].
pub fn assemble_plan(plan: &DetailedPlan, taxonomy: &ExerciseTaxonomy) -> GeneratedPlan {
    let mut used = UsedExerciseRegistry::new();
    let mut generated = GeneratedPlan::default();

    for day in plan.days() {
        let mut exercises = Vec::with_capacity(day.tokens().len());

        for token in day.tokens() {
            match best_candidate(token, taxonomy, &used) {
                Some(pick) => {
                    tracing::debug!(
                        "Day {}: {:?} -> {} ({} / {}, rating {})",
                        day.day(),
                        token,
                        pick.exercise,
                        pick.category,
                        pick.division,
                        pick.rating
                    );
                    used.mark(pick.category, pick.exercise);
                    exercises.push(pick.exercise.to_string());
                }
                None => {
                    tracing::warn!(
                        "Day {}: no unused exercise for {:?}, leaving slot empty",
                        day.day(),
                        token
                    );
                    generated.gaps.push(PlanGap {
                        day: day.day(),
                        token: token.clone(),
                    });
                }
            }
        }

        generated.days.push(GeneratedDay {
            day: day.day(),
            exercises,
        });
    }

    tracing::info!(
        "Assembled {} exercises over {} days ({} gaps)",
        used.len(),
        generated.days.len(),
        generated.gaps.len()
    );

    generated
}
