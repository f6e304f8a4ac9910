//! Division rotation.
//!
//! Replaces generic muscle group tokens with specific anatomical divisions,
//! cycling through a group's divisions when it appears several times in one
//! day.

use crate::DetailedPlan;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Ordered divisions per muscle group
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MuscleDivisions(BTreeMap<String, Vec<String>>);

static DEFAULT_DIVISIONS: Lazy<MuscleDivisions> = Lazy::new(|| {
    let table: &[(&str, &[&str])] = &[
        ("chest", &["upper chest", "middle chest", "lower chest"]),
        ("upper back", &["rhomboids", "mid traps", "upper traps"]),
        ("lats", &["upper lats", "lumbar lats", "lower lats"]),
        ("shoulders", &["front delts", "side delts", "rear delts"]),
        ("quads", &["vastus medialis and lateralis", "rectus femoris"]),
        ("hamstrings", &["bicep femoris"]),
        ("glutes", &["gluteus medius", "gluteus maximus"]),
        ("calves", &["soleus", "gastroc"]),
        ("abs", &["upper abs", "lower abs"]),
        ("triceps", &["long head", "side and medial head"]),
        ("biceps", &["bicep brachii", "brachialis"]),
        ("forearms", &["brachioradialis", "wrist extensor", "wrist flexors"]),
        ("adductors", &["adductor magnus"]),
    ];

    MuscleDivisions::from_pairs(table.iter().copied())
});

impl MuscleDivisions {
    pub fn new(table: BTreeMap<String, Vec<String>>) -> Self {
        Self(table)
    }

    /// Built-in anatomical division table
    pub fn standard() -> &'static MuscleDivisions {
        &DEFAULT_DIVISIONS
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(group, divisions)| {
                    (
                        group.to_string(),
                        divisions.iter().map(|d| d.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    pub fn get(&self, group: &str) -> Option<&[String]> {
        self.0.get(group).map(Vec::as_slice)
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Overlay another table; groups present in `overrides` replace ours
    pub fn merged_with(&self, overrides: &MuscleDivisions) -> MuscleDivisions {
        let mut table = self.0.clone();
        for (group, divisions) in &overrides.0 {
            table.insert(group.clone(), divisions.clone());
        }
        MuscleDivisions(table)
    }
}

impl Default for MuscleDivisions {
    fn default() -> Self {
        Self::standard().clone()
    }
}

/// Swap every group token for a division, round-robin per day and group
///
/// The n-th occurrence (from 0) of a group within a day becomes
/// `divisions[n % len]`. Tokens without divisions pass through.
pub fn rotate_divisions(plan: &DetailedPlan, divisions: &MuscleDivisions) -> DetailedPlan {
    plan.map_days(|tokens| {
        let mut seen: HashMap<&str, usize> = HashMap::new();

        tokens
            .iter()
            .map(|token| match divisions.get(token) {
                Some(options) if !options.is_empty() => {
                    let count = seen.entry(token.as_str()).or_insert(0);
                    let division = &options[*count % options.len()];
                    *count += 1;
                    division.clone()
                }
                _ => token.clone(),
            })
            .collect()
    })
}
