//! Hand-off of a finished plan to persistence.
//!
//! A generated plan is stored as a named plan with days and exercise rows.
//! Every exercise row starts with the same fixed prescription.

use crate::{Error, GeneratedPlan, Result, TrainingProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use uuid::Uuid;

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedExercise {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedDay {
    pub day: u8,
    pub exercises: Vec<PersistedExercise>,
}

/// Substitutes already offered for one slot, kept across swap runs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOffers {
    pub day: u8,
    /// 0-based position within the day
    pub slot: usize,
    pub offered: Vec<String>,
}

/// A named plan as the profile store keeps it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedPlan {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub days: Vec<PersistedDay>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub offers: Vec<SlotOffers>,
}

/// One CSV row per exercise
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    day: u8,
    position: usize,
    exercise: &'a str,
    sets: u32,
    reps: u32,
}

impl PersistedPlan {
    /// Wrap a generated plan with the default 3 x 10 prescription
    pub fn from_generated(name: impl Into<String>, plan: &GeneratedPlan) -> Self {
        Self::with_prescription(name, plan, DEFAULT_SETS, DEFAULT_REPS)
    }

    pub fn with_prescription(
        name: impl Into<String>,
        plan: &GeneratedPlan,
        sets: u32,
        reps: u32,
    ) -> Self {
        let days = plan
            .days
            .iter()
            .map(|day| PersistedDay {
                day: day.day,
                exercises: day
                    .exercises
                    .iter()
                    .map(|name| PersistedExercise {
                        name: name.clone(),
                        sets,
                        reps,
                    })
                    .collect(),
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            days,
            offers: Vec::new(),
        }
    }

    /// Replace the exercise at a 1-based day and 0-based slot, returning the old name
    pub fn replace(&mut self, day: u8, slot: usize, name: impl Into<String>) -> Result<String> {
        let entry = self
            .days
            .iter_mut()
            .find(|d| d.day == day)
            .and_then(|d| d.exercises.get_mut(slot))
            .ok_or_else(|| Error::Other(format!("no exercise at day {} slot {}", day, slot)))?;

        Ok(std::mem::replace(&mut entry.name, name.into()))
    }

    /// Names already offered as substitutes for a slot
    pub fn offered_at(&self, day: u8, slot: usize) -> &[String] {
        self.offers
            .iter()
            .find(|o| o.day == day && o.slot == slot)
            .map(|o| o.offered.as_slice())
            .unwrap_or(&[])
    }

    /// Record the offered names for a slot; an empty list drops the entry
    pub fn set_offered_at(&mut self, day: u8, slot: usize, mut offered: Vec<String>) {
        offered.sort();
        self.offers.retain(|o| !(o.day == day && o.slot == slot));
        if !offered.is_empty() {
            self.offers.push(SlotOffers { day, slot, offered });
        }
    }

    /// Exercise names only, in the shape the generator produces
    pub fn to_generated(&self) -> GeneratedPlan {
        GeneratedPlan {
            days: self
                .days
                .iter()
                .map(|day| crate::GeneratedDay {
                    day: day.day,
                    exercises: day.exercises.iter().map(|e| e.name.clone()).collect(),
                })
                .collect(),
            gaps: Vec::new(),
        }
    }

    pub fn exercise_count(&self) -> usize {
        self.days.iter().map(|d| d.exercises.len()).sum()
    }

    /// Write `day,position,exercise,sets,reps` rows with a header
    ///
    /// Positions are 1-based within each day. Returns the number of rows.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(writer);

        let mut rows = 0;
        for day in &self.days {
            for (i, exercise) in day.exercises.iter().enumerate() {
                writer.serialize(CsvRow {
                    day: day.day,
                    position: i + 1,
                    exercise: &exercise.name,
                    sets: exercise.sets,
                    reps: exercise.reps,
                })?;
                rows += 1;
            }
        }

        writer.flush()?;
        tracing::debug!("Wrote {} CSV rows for plan {:?}", rows, self.name);
        Ok(rows)
    }
}

/// Where profiles come from and finished plans go
pub trait ProfileStore {
    fn load_profile(&self) -> Result<TrainingProfile>;

    fn save_plan(&self, plan: &PersistedPlan) -> Result<()>;

    /// `Ok(None)` when no plan with that name exists
    fn load_plan(&self, name: &str) -> Result<Option<PersistedPlan>>;
}
