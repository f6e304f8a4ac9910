//! Split selection.
//!
//! Maps a training frequency, experience level, gender and prioritised
//! muscles onto a coarse split and a detailed per-day muscle token plan.
//!
//! The decision logic is data: an ordered rule table where the first rule for
//! the frequency whose predicate holds wins. Day literals are reproduced
//! exactly as authored, repeated tokens included (repetition means extra
//! volume for that muscle).

use crate::{DetailedPlan, Error, ExperienceLevel, Gender, Result};

/// Ordered day labels of a coarse split
pub type SplitTemplate = &'static [&'static str];

/// The fifteen coarse splits, indexed 0..=14
pub const SPLIT_TEMPLATES: [SplitTemplate; 15] = [
    &["full body"],
    &["upper body", "lower body"],
    &["push", "pull", "legs"],
    &["chest", "back", "shoulders", "arms", "legs"],
    &[
        "biceps, chest, shoulders",
        "triceps, back, core",
        "quads, hamstrings, glutes, calves",
    ],
    &[
        "chest, shoulders, core",
        "quads, calves, adductors",
        "back, core",
        "arms, forearms",
        "posterior chain, calves, core",
    ],
    &[
        "chest, forearms",
        "quads, glutes, calves",
        "shoulders, arms",
        "hamstrings, glutes, core",
        "back,core, forearms",
        "quads, adductors, calves",
    ],
    &[
        "full body",
        "triceps, back",
        " hamstrings, glutes",
        "biceps, chest",
        "back, shoulders",
        "quads, glutes",
        "calves, core",
    ],
    &[
        "chest, tricpes",
        "back, biceps",
        "legs, core",
        "shoulders",
        "chest, back",
        "biceps, tricpes",
        "legs, core",
    ],
    &[
        "chest, shoulders, triceps",
        "back, biceps, hamstrings",
        "quads, glutes, calves, core",
    ],
    &["upper body", "lower body", "upper body", "lower body"],
    &[
        "chest, shoulders",
        "back, core",
        "arms, calves",
        "quads, hamstrings, glutes",
    ],
    &[
        "biceps, chest, shoulders",
        "triceps, back, core",
        "quads, hamstrings, glutes, calves",
        "biceps, chest, shoulders",
        "triceps, back, core",
        "quads, hamstrings, glutes, calves",
    ],
    &["push", "pull", "legs", "push", "pull", "legs"],
    &[
        "chest, triceps, forearms",
        "shoulders, hamstrings, core",
        "back, biceps, calves",
        "quads, glutes, adductors, core",
    ],
];

const ADVANCED_OR_INTERMEDIATE: &[ExperienceLevel] = &[
    ExperienceLevel::Advanced,
    ExperienceLevel::Elite,
    ExperienceLevel::Intermediate,
];

/// Condition attached to a split rule
#[derive(Debug)]
pub enum Predicate {
    Always,
    /// Any of the muscles is prioritised
    Prioritizes(&'static [&'static str]),
    ExperienceIn(&'static [ExperienceLevel]),
    Male,
    Either(&'static Predicate, &'static Predicate),
}

/// Inputs a predicate is evaluated against
#[derive(Clone, Copy, Debug)]
pub struct SplitContext<'a> {
    pub experience: ExperienceLevel,
    pub gender: Gender,
    pub prioritized: &'a [String],
}

impl Predicate {
    pub fn holds(&self, ctx: &SplitContext<'_>) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::Prioritizes(muscles) => muscles
                .iter()
                .any(|m| ctx.prioritized.iter().any(|p| p == m)),
            Predicate::ExperienceIn(levels) => levels.contains(&ctx.experience),
            Predicate::Male => ctx.gender == Gender::Male,
            Predicate::Either(a, b) => a.holds(ctx) || b.holds(ctx),
        }
    }
}

/// One row of the decision table
#[derive(Debug)]
pub struct SplitRule {
    pub frequency: u8,
    pub when: Predicate,
    /// Index into [`SPLIT_TEMPLATES`]
    pub split: usize,
    /// Detailed plan literals, day 1 first
    pub days: &'static [&'static str],
}

pub static SPLIT_RULES: &[SplitRule] = &[
    SplitRule {
        frequency: 1,
        when: Predicate::Always,
        split: 0,
        days: &["chest, chest, quads, upper back, hamstrings, lats, glutes, side delts, calves, triceps, biceps, abs"],
    },
    SplitRule {
        frequency: 2,
        when: Predicate::Always,
        split: 1,
        days: &[
            "chest, upper back, chest, lats, side delts, tricpes, biceps",
            "quads, hamstrings, glutes, quads, glutes, calves, abs",
        ],
    },
    SplitRule {
        frequency: 3,
        when: Predicate::Either(
            &Predicate::Prioritizes(&["triceps", "biceps"]),
            &Predicate::ExperienceIn(ADVANCED_OR_INTERMEDIATE),
        ),
        split: 4,
        days: &[
            "biceps, biceps, chest, chest, front delts, side delts",
            "triceps, tricpes, upper back, lats, lats, rear delts",
            "quads, hamstrings, glutes, quads, glutes, calves, abs",
        ],
    },
    SplitRule {
        frequency: 3,
        when: Predicate::Always,
        split: 2,
        days: &[
            "chest, chest, front delts, side delts, triceps, triceps",
            "upper back, lats, lats, biceps, biceps",
            "quads, hamstrings, glutes, quads, glutes, calves, abs",
        ],
    },
    SplitRule {
        frequency: 4,
        when: Predicate::Either(
            &Predicate::Prioritizes(&["triceps", "biceps", "chest", "upper back", "lats", "calves"]),
            &Predicate::ExperienceIn(ADVANCED_OR_INTERMEDIATE),
        ),
        split: 11,
        days: &[
            "chest, chest, chest, front delts, side delts",
            "upper back, lats, lats, rear delts, abs, abs",
            "calves, triceps, biceps, triceps, biceps, forearms",
            "quads, hamstrings, glutes, quads, glutes, adductors",
        ],
    },
    // Authored with two days only.
    SplitRule {
        frequency: 4,
        when: Predicate::Prioritizes(&["front delts", "side delts", "quads"]),
        split: 14,
        days: &[
            "chest, chest, chest, triceps, triceps, foreamrs, foreamrs",
            "side delts, front delts, hamstrings, front delts, hamstrings, side delts",
        ],
    },
    SplitRule {
        frequency: 4,
        when: Predicate::Always,
        split: 10,
        days: &[
            "chest, upper back, chest, lats, side delts, tricpes, biceps",
            "quads, hamstrings, glutes, quads, adductors, calves, abs",
            "lats, chest, upper back, chest, side delts, biceps, triceps",
            "hamstrings, glutes, quads, hamstrings, glutes, calves, abs",
        ],
    },
    // Day 4 is the lower-body day; the arms day authored for the same slot
    // was shadowed by it and never reached users.
    SplitRule {
        frequency: 5,
        when: Predicate::Either(
            &Predicate::Prioritizes(&[
                "triceps",
                "biceps",
                "chest",
                "upper back",
                "lats",
                "front delts",
                "side delts",
                "rear delts",
            ]),
            &Predicate::Male,
        ),
        split: 3,
        days: &[
            "chest, chest, chest, front delts, side delts",
            "upper back, lats, lats, abs, abs",
            "rear delts, front delts, side delts, rear delts, side delts, front delts",
            "quads, hamstrings, glutes, quads, glutes, adductors",
            "quads, hamstrings, glutes, quads, hamstrings, glutes, calves",
        ],
    },
    SplitRule {
        frequency: 5,
        when: Predicate::Always,
        split: 5,
        days: &[
            "chest, chest, front delts, side delts, abs, abs",
            "quads, adductors, calves, quads, calves, glutes",
            "upper back, lats, lats, forearms, abs, abs",
            "triceps, biceps, triceps, biceps, forearms, forearms",
            "hamstrings, glutes, hamstrings, glutes, calves, abs",
        ],
    },
    SplitRule {
        frequency: 6,
        when: Predicate::Either(
            &Predicate::Prioritizes(&["triceps", "biceps"]),
            &Predicate::ExperienceIn(&[ExperienceLevel::Intermediate]),
        ),
        split: 12,
        days: &[
            "biceps, biceps, chest, chest, front delts, side delts",
            "triceps, tricpes, upper back, lats, lats, rear delts",
            "quads, hamstrings, glutes, quads, glutes, calves, abs",
            "biceps, biceps, chest, chest, side delts, side delts",
            "triceps, tricpes, upper back, upper back, lats, rear delts",
            "hamstrings, quads, glutes, quads, glutes, calves, abs",
        ],
    },
    SplitRule {
        frequency: 6,
        when: Predicate::Either(
            &Predicate::ExperienceIn(&[ExperienceLevel::Beginner, ExperienceLevel::Novice]),
            &Predicate::Prioritizes(&["lats", "upper back", "chest"]),
        ),
        split: 13,
        days: &[
            "chest, chest, front delts, side delts, triceps, triceps",
            "upper back, lats, lats, biceps, biceps",
            "quads, hamstrings, glutes, quads, glutes, calves, abs",
            "chest, chest, side delts, side delts, triceps, triceps",
            "upper back, lats, upper back, biceps, biceps",
            "hamstrings, quads, glutes, quads, hamstrings, calves, abs",
        ],
    },
    SplitRule {
        frequency: 6,
        when: Predicate::Always,
        split: 6,
        days: &[
            "chest, chest, chest, forearms, forearms",
            "quads, glutes, quads,glutes, calves",
            "side delts, triceps, biceps, rear delts, triceps, biceps, front delts",
            "hamstrings, glutes, hamstrings, glutes, calves, abs",
            "upper back, lats, lats, abs, abs, forearms",
            "quads, adductors, calves, quads, adductors, glutes",
        ],
    },
    SplitRule {
        frequency: 7,
        when: Predicate::Always,
        split: 7,
        days: &[
            "chest, quads, biceps, glutes, side delts, forearms",
            "triceps, triceps, upper back, lats, lats, rear delts",
            "hamstrings, glutes, hamstrings, glutes, abs",
            "biceps, biceps, chest, chest, chest",
            "upper back, lats, front delts, side delts, lats, rear delts",
            "quads, glutes, quads, gutes, glutes",
            "calves, calves, abs, abs",
        ],
    },
];

/// Result of split selection
#[derive(Clone, Debug, PartialEq)]
pub struct SplitChoice {
    pub split_index: usize,
    pub template: SplitTemplate,
    pub plan: DetailedPlan,
}

/// Rules that apply to a frequency, in evaluation order
pub fn rules_for(frequency: u8) -> impl Iterator<Item = &'static SplitRule> {
    SPLIT_RULES.iter().filter(move |r| r.frequency == frequency)
}

/// Pick the split and detailed plan for a profile
///
/// Total over frequencies 1..=7; anything else is rejected as a profile error.
pub fn select_split(
    frequency: u8,
    experience: ExperienceLevel,
    gender: Gender,
    prioritized: &[String],
) -> Result<SplitChoice> {
    let ctx = SplitContext {
        experience,
        gender,
        prioritized,
    };

    let rule = rules_for(frequency)
        .find(|r| r.when.holds(&ctx))
        .ok_or_else(|| {
            Error::Profile(format!(
                "no split defined for training frequency {}",
                frequency
            ))
        })?;

    tracing::debug!(
        "Frequency {} matched split {} ({:?})",
        frequency,
        rule.split,
        rule.when
    );

    Ok(SplitChoice {
        split_index: rule.split,
        template: SPLIT_TEMPLATES[rule.split],
        plan: DetailedPlan::from_literals(rule.days),
    })
}
