//! Append-only CSV pour log.
//!
//! Records survive process restarts, so every write goes through a
//! temp-file-and-rename cycle: a crash mid-write leaves the previous
//! file intact instead of a truncated log.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PourError, Result};

/// One completed pour, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PourRecord {
    pub pour_id: String,
    pub operator: String,
    pub employee_id: String,
    pub shift: String,
    pub pour_start: String,
    pub pour_end: String,
    pub duration_s: f32,
    pub material_height_m: f32,
    pub fill_pct: f32,
    pub total_weight_kg: f32,
    pub avg_flow_kg_s: f32,
}

/// Durable pour-record store backed by a single CSV file.
#[derive(Debug)]
pub struct PourHistory {
    path: PathBuf,
    known_ids: HashSet<String>,
}

impl PourHistory {
    /// Open (or create) the history file. An existing file is scanned so
    /// later appends can detect pour-id collisions across restarts.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| PourError::History(format!("create {}: {e}", parent.display())))?;
        }
        let mut history = Self {
            path,
            known_ids: HashSet::new(),
        };
        if history.path.exists() {
            // A directory here would read back as zero rows, not an error.
            if !history.path.is_file() {
                return Err(PourError::History(format!(
                    "{} is not a regular file",
                    history.path.display()
                ))
                .into());
            }
            for record in history.load()? {
                history.known_ids.insert(record.pour_id);
            }
        } else {
            history.write_all(&[])?;
            info!(path = %history.path.display(), "pour history initialized");
        }
        Ok(history)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. When the pour id is already taken (two pours
    /// completing within the same wall-clock second) a `-1`, `-2`, ...
    /// suffix is applied. Returns the record as written.
    pub fn append(&mut self, mut record: PourRecord) -> Result<PourRecord> {
        record.pour_id = self.unique_id(record.pour_id);
        let mut records = self.load()?;
        records.push(record.clone());
        self.write_all(&records)?;
        self.known_ids.insert(record.pour_id.clone());
        info!(
            pour_id = %record.pour_id,
            total_weight_kg = record.total_weight_kg,
            "pour record appended"
        );
        Ok(record)
    }

    /// All records currently on disk, oldest first.
    pub fn load(&self) -> Result<Vec<PourRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| PourError::History(format!("read {}: {e}", self.path.display())))?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: PourRecord =
                row.map_err(|e| PourError::History(format!("parse {}: {e}", self.path.display())))?;
            records.push(record);
        }
        Ok(records)
    }

    fn unique_id(&self, base: String) -> String {
        if !self.known_ids.contains(&base) {
            return base;
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{base}-{n}");
            if !self.known_ids.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn write_all(&self, records: &[PourRecord]) -> Result<()> {
        const COLUMNS: [&str; 11] = [
            "pour_id",
            "operator",
            "employee_id",
            "shift",
            "pour_start",
            "pour_end",
            "duration_s",
            "material_height_m",
            "fill_pct",
            "total_weight_kg",
            "avg_flow_kg_s",
        ];
        let tmp = self.path.with_extension("csv.tmp");
        // Serde auto-headers stay off; the header row is written manually
        // so a freshly initialized file is not empty and records never get
        // a second header in front of them.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)
            .map_err(|e| PourError::History(format!("write {}: {e}", tmp.display())))?;
        writer
            .write_record(COLUMNS)
            .map_err(|e| PourError::History(format!("write header: {e}")))?;
        for record in records {
            writer
                .serialize(record)
                .map_err(|e| PourError::History(format!("serialize record: {e}")))?;
        }
        writer
            .flush()
            .map_err(|e| PourError::History(format!("flush {}: {e}", tmp.display())))?;
        drop(writer);
        fs::rename(&tmp, &self.path).map_err(|e| {
            PourError::History(format!(
                "rename {} -> {}: {e}",
                tmp.display(),
                self.path.display()
            ))
        })?;
        Ok(())
    }
}
