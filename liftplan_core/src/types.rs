//! Core domain types for the plan generation engine.
//!
//! This module defines the values that flow between the engine stages:
//! - The training profile snapshot supplied by the profile store
//! - Detailed plans (muscle tokens per day)
//! - Generated plans (exercise names per day)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator used by day literals and rendered day strings
pub const TOKEN_SEPARATOR: &str = ", ";

/// Highest supported training frequency (days per week)
pub const MAX_FREQUENCY: u8 = 7;

// ============================================================================
// Profile Types
// ============================================================================

/// Self-reported training experience
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExperienceLevel {
    Novice,
    Beginner,
    Intermediate,
    Advanced,
    Elite,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Novice => "novice",
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
            ExperienceLevel::Elite => "elite",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "novice" => Ok(ExperienceLevel::Novice),
            "beginner" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "advanced" => Ok(ExperienceLevel::Advanced),
            "elite" => Ok(ExperienceLevel::Elite),
            other => Err(Error::Profile(format!(
                "unknown experience level '{}'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for ExperienceLevel {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ExperienceLevel> for String {
    fn from(level: ExperienceLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Gender as stored in the profile; only `Male` influences split selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    Unspecified,
}

impl Gender {
    /// Parse a free-form gender string (case-insensitive)
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "man" => Gender::Male,
            "female" | "f" | "woman" => Gender::Female,
            _ => Gender::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unspecified => "unspecified",
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        Gender::parse(&value)
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.as_str().to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the user details the engine reads for one generation run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingProfile {
    pub frequency: u8,
    pub experience: ExperienceLevel,
    pub gender: Gender,
    #[serde(default)]
    pub prioritized_muscle_groups: String,
}

impl TrainingProfile {
    /// Build a profile from raw store values, rejecting out-of-domain input
    pub fn new(
        frequency: u8,
        experience: &str,
        gender: &str,
        prioritized_muscle_groups: impl Into<String>,
    ) -> Result<Self> {
        let profile = Self {
            frequency,
            experience: experience.parse()?,
            gender: Gender::parse(gender),
            prioritized_muscle_groups: prioritized_muscle_groups.into(),
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check the frequency is within 1..=7
    pub fn validate(&self) -> Result<()> {
        if self.frequency == 0 || self.frequency > MAX_FREQUENCY {
            return Err(Error::Profile(format!(
                "training frequency must be between 1 and {}, got {}",
                MAX_FREQUENCY, self.frequency
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Detailed Plan
// ============================================================================

/// Muscle tokens for a single training day
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDay {
    day: u8,
    tokens: Vec<String>,
}

impl PlanDay {
    pub(crate) fn new(day: u8, tokens: Vec<String>) -> Self {
        Self { day, tokens }
    }

    /// Day number, starting at 1
    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Render the tokens back into the comma separated day string
    pub fn render(&self) -> String {
        self.tokens.join(TOKEN_SEPARATOR)
    }
}

/// Per-day muscle token sequences feeding exercise selection
///
/// Token count and day membership are fixed at construction. Later stages
/// produce new plans whose tokens differ only in identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedPlan {
    days: Vec<PlanDay>,
}

impl DetailedPlan {
    /// Build a plan from day literals, numbering days from 1
    ///
    /// Literals are split on `", "` exactly; tokens are not trimmed.
    pub fn from_literals(literals: &[&str]) -> Self {
        let days = literals
            .iter()
            .enumerate()
            .map(|(idx, literal)| {
                let tokens = literal
                    .split(TOKEN_SEPARATOR)
                    .map(str::to_string)
                    .collect();
                PlanDay::new(idx as u8 + 1, tokens)
            })
            .collect();
        Self { days }
    }

    pub fn days(&self) -> &[PlanDay] {
        &self.days
    }

    pub fn day(&self, day: u8) -> Option<&PlanDay> {
        self.days.iter().find(|d| d.day == day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total number of tokens across all days
    pub fn token_count(&self) -> usize {
        self.days.iter().map(|d| d.tokens.len()).sum()
    }

    /// Produce a new plan by rewriting every day's tokens.
    ///
    /// The rewrite must keep the token count of each day.
    pub(crate) fn map_days<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&[String]) -> Vec<String>,
    {
        let days = self
            .days
            .iter()
            .map(|d| {
                let tokens = f(&d.tokens);
                debug_assert_eq!(tokens.len(), d.tokens.len());
                PlanDay::new(d.day, tokens)
            })
            .collect();
        Self { days }
    }
}

// ============================================================================
// Generated Plan
// ============================================================================

/// Exercises chosen for one day, in token order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDay {
    pub day: u8,
    pub exercises: Vec<String>,
}

/// A detailed-plan token the assembler could not fill
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanGap {
    pub day: u8,
    pub token: String,
}

/// Exercise names per day produced by one generation run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub days: Vec<GeneratedDay>,
    #[serde(default)]
    pub gaps: Vec<PlanGap>,
}

impl GeneratedPlan {
    pub fn day(&self, day: u8) -> Option<&GeneratedDay> {
        self.days.iter().find(|d| d.day == day)
    }

    /// All exercise names in day and slot order
    pub fn exercise_names(&self) -> impl Iterator<Item = &str> {
        self.days
            .iter()
            .flat_map(|d| d.exercises.iter().map(String::as_str))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.exercise_names().any(|n| n == name)
    }

    /// Exercise at a 1-based day and 0-based slot
    pub fn exercise_at(&self, day: u8, slot: usize) -> Option<&str> {
        self.day(day)
            .and_then(|d| d.exercises.get(slot))
            .map(String::as_str)
    }

    /// Replace the exercise in a slot, returning the previous name
    pub fn replace(&mut self, day: u8, slot: usize, name: impl Into<String>) -> Result<String> {
        let entry = self
            .days
            .iter_mut()
            .find(|d| d.day == day)
            .and_then(|d| d.exercises.get_mut(slot))
            .ok_or_else(|| Error::Other(format!("no exercise at day {} slot {}", day, slot)))?;

        Ok(std::mem::replace(entry, name.into()))
    }
}
