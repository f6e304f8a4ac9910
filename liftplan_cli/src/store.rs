//! File-backed profile store with file locking.
//!
//! Layout under the data directory:
//! - `profile.json`: the training profile
//! - `plans/<slug>.json`: saved plans, one file per plan name

use fs2::FileExt;
use liftplan_core::{Error, PersistedPlan, ProfileStore, Result, TrainingProfile};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct JsonProfileStore {
    data_dir: PathBuf,
}

impl JsonProfileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn profile_path(&self) -> PathBuf {
        self.data_dir.join("profile.json")
    }

    pub fn plans_dir(&self) -> PathBuf {
        self.data_dir.join("plans")
    }

    pub fn plan_path(&self, name: &str) -> Result<PathBuf> {
        let slug = plan_slug(name);
        if slug.is_empty() {
            return Err(Error::Store(format!("invalid plan name {:?}", name)));
        }
        Ok(self.plans_dir().join(format!("{}.json", slug)))
    }

    pub fn save_profile(&self, profile: &TrainingProfile) -> Result<()> {
        profile.validate()?;
        write_json_atomic(&self.profile_path(), profile)
    }
}

impl ProfileStore for JsonProfileStore {
    fn load_profile(&self) -> Result<TrainingProfile> {
        let path = self.profile_path();
        let profile: TrainingProfile = read_json_locked(&path)?.ok_or_else(|| {
            Error::Store(format!(
                "no profile at {}; pass --frequency/--experience/--gender or create it",
                path.display()
            ))
        })?;
        profile.validate()?;
        Ok(profile)
    }

    fn save_plan(&self, plan: &PersistedPlan) -> Result<()> {
        let path = self.plan_path(&plan.name)?;
        write_json_atomic(&path, plan)?;
        tracing::info!("Saved plan {:?} to {:?}", plan.name, path);
        Ok(())
    }

    fn load_plan(&self, name: &str) -> Result<Option<PersistedPlan>> {
        read_json_locked(&self.plan_path(name)?)
    }
}

/// Lowercase alphanumerics; runs of anything else collapse to one `_`
fn plan_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') && !slug.is_empty() {
            slug.push('_');
        }
    }
    slug.trim_end_matches('_').to_string()
}

/// Read a JSON file under a shared lock; `Ok(None)` when it does not exist
fn read_json_locked<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let mut contents = String::new();
    let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
    file.unlock()?;
    read?;

    let value = serde_json::from_str(&contents).map_err(|e| {
        tracing::warn!("Failed to parse {:?}: {}", path, e);
        Error::Json(e)
    })?;
    tracing::debug!("Loaded {:?}", path);
    Ok(Some(value))
}

/// Atomically write JSON by:
/// 1. Writing to a temp file in the target directory
/// 2. Syncing to disk
/// 3. Renaming over the original
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::Store(format!("{} has no parent directory", path.display())))?;
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;

    // Each writer locks only its own temp file; `persist` below makes the
    // replace atomic, and the last rename wins.
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Wrote {:?}", path);
    Ok(())
}
