//! Exercise substitution.
//!
//! Offers alternatives for an exercise already placed in a plan, drawn from
//! the same taxonomy division in descending rating order. A session remembers
//! what it already offered so repeated requests cycle through the division
//! before starting over.

use crate::{ExerciseTaxonomy, RatedExercise};
use std::collections::HashSet;
use std::sync::Arc;

/// Session-scoped substitution state for one plan slot
#[derive(Clone, Debug)]
pub struct SubstitutionSession {
    taxonomy: Arc<ExerciseTaxonomy>,
    offered: HashSet<String>,
    excluded: HashSet<String>,
}

impl SubstitutionSession {
    pub fn new(taxonomy: Arc<ExerciseTaxonomy>) -> Self {
        Self {
            taxonomy,
            offered: HashSet::new(),
            excluded: HashSet::new(),
        }
    }

    /// Never offer these names (e.g. exercises placed elsewhere in the plan)
    pub fn exclude<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
    }

    /// Treat these names as already offered (e.g. restored from an earlier session)
    pub fn remember<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.offered.extend(names.into_iter().map(Into::into));
    }

    /// Forget everything offered so far
    pub fn reset(&mut self) {
        self.offered.clear();
    }

    pub fn offered(&self) -> &HashSet<String> {
        &self.offered
    }

    /// Next alternative for `current`, or `None` when its division has no
    /// other exercise (or `current` is not in the taxonomy)
    pub fn next_alternative(&mut self, current: &str) -> Option<String> {
        let Some((group, division)) = self.taxonomy.locate(current) else {
            tracing::debug!("{:?} not found in taxonomy, nothing to substitute", current);
            return None;
        };

        let ranked = ranked_by_rating(&division.exercises);

        if ranked.iter().all(|e| self.offered.contains(&e.name)) {
            tracing::debug!(
                "All {} exercises of {} / {} offered, starting over",
                ranked.len(),
                group.name,
                division.name
            );
            self.offered.clear();
        }

        let pick = match self.first_unoffered(&ranked, current) {
            Some(name) => Some(name),
            None if self.offered.is_empty() => None,
            None => {
                // Only `current` itself was left unoffered.
                self.offered.clear();
                self.first_unoffered(&ranked, current)
            }
        }?;

        self.offered.insert(pick.clone());
        tracing::info!(
            "Substituting {:?} with {:?} ({} / {})",
            current,
            pick,
            group.name,
            division.name
        );
        Some(pick)
    }

    fn first_unoffered(&self, ranked: &[&RatedExercise], current: &str) -> Option<String> {
        ranked
            .iter()
            .find(|e| {
                e.name != current
                    && !self.offered.contains(&e.name)
                    && !self.excluded.contains(&e.name)
            })
            .map(|e| e.name.clone())
    }
}

/// Division exercises by rating, highest first; equal ratings keep tree order
fn ranked_by_rating(exercises: &[RatedExercise]) -> Vec<&RatedExercise> {
    let mut ranked: Vec<&RatedExercise> = exercises.iter().collect();
    ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    ranked
}
