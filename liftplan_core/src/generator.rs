//! Plan generation pipeline.
//!
//! Runs one generation: split selection, priority reordering, division
//! rotation and greedy assembly, in that order. All run-scoped state lives
//! inside [`PlanGenerator::generate`]; the generator itself only holds the
//! shared taxonomy and division table.

use crate::split::{select_split, SplitTemplate};
use crate::{
    assemble_plan, normalize_priorities, reorder_by_priority, rotate_divisions, DetailedPlan,
    ExerciseTaxonomy, GeneratedPlan, MuscleDivisions, Result, SubstitutionSession,
    TrainingProfile,
};
use std::sync::Arc;

/// Everything a generation run produced
#[derive(Clone, Debug, PartialEq)]
pub struct PlanOutcome {
    pub split_index: usize,
    pub template: SplitTemplate,
    /// Rotated, reordered muscle tokens the assembler consumed
    pub detailed: DetailedPlan,
    pub generated: GeneratedPlan,
    pub prioritized: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct PlanGenerator {
    taxonomy: Arc<ExerciseTaxonomy>,
    divisions: MuscleDivisions,
}

impl PlanGenerator {
    pub fn new(taxonomy: Arc<ExerciseTaxonomy>, divisions: MuscleDivisions) -> Self {
        Self {
            taxonomy,
            divisions,
        }
    }

    /// Generator over the bundled taxonomy and standard divisions
    pub fn with_defaults() -> Self {
        Self::new(
            crate::resources::default_taxonomy(),
            MuscleDivisions::default(),
        )
    }

    pub fn taxonomy(&self) -> &Arc<ExerciseTaxonomy> {
        &self.taxonomy
    }

    pub fn divisions(&self) -> &MuscleDivisions {
        &self.divisions
    }

    /// Generate a plan for one profile
    ///
    /// Fails on an out-of-range profile or an unusable taxonomy. A token the
    /// taxonomy cannot serve does not fail the run; it shows up as a gap.
    pub fn generate(&self, profile: &TrainingProfile) -> Result<PlanOutcome> {
        profile.validate()?;
        self.taxonomy.ensure_usable()?;

        let prioritized = normalize_priorities(&profile.prioritized_muscle_groups);
        tracing::debug!("Prioritized muscles: {:?}", prioritized);

        let choice = select_split(
            profile.frequency,
            profile.experience,
            profile.gender,
            &prioritized,
        )?;
        tracing::info!(
            "Selected split {} ({} days) for {} day(s)/week, {} {}",
            choice.split_index,
            choice.plan.len(),
            profile.frequency,
            profile.experience,
            profile.gender
        );

        let reordered = reorder_by_priority(&choice.plan, &prioritized);
        let detailed = rotate_divisions(&reordered, &self.divisions);
        for day in detailed.days() {
            tracing::debug!("Day {}: {}", day.day(), day.render());
        }

        let generated = assemble_plan(&detailed, &self.taxonomy);
        if !generated.gaps.is_empty() {
            tracing::warn!(
                "Plan has {} unfilled slot(s) out of {} tokens",
                generated.gaps.len(),
                detailed.token_count()
            );
        }

        Ok(PlanOutcome {
            split_index: choice.split_index,
            template: choice.template,
            detailed,
            generated,
            prioritized,
        })
    }

    /// Fresh substitution session over the same taxonomy
    pub fn substitutions(&self) -> SubstitutionSession {
        SubstitutionSession::new(Arc::clone(&self.taxonomy))
    }
}
