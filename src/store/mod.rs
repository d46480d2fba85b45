//! Flat CSV tables under a single data directory, one file per entity.
//!
//! Every mutation is a full read-filter-rewrite of the table, guarded by a
//! per-table in-process mutex so two handlers cannot interleave a
//! read-modify-write on the same file. Cross-process writers are not
//! coordinated; the last full rewrite wins. That is an accepted limitation
//! of the deployment (low-traffic internal tool).

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::AppResult;

pub mod repositories;

#[derive(Clone, Debug)]
pub struct DataDir {
    root: PathBuf,
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl DataDir {
    pub fn new<P: Into<PathBuf>>(root: P) -> AppResult<Self> {
        let root = root.into();
        info!(target: "app::store", data_dir = %root.display(), "initializing data directory");
        fs::create_dir_all(&root)?;

        Ok(Self {
            root,
            locks: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table_path(&self, table: &str) -> PathBuf {
        self.root.join(format!("{table}.csv"))
    }

    /// Reads every row of a table; a missing file is an empty table, never an
    /// error.
    pub fn read_rows<T: DeserializeOwned>(&self, table: &str) -> AppResult<Vec<T>> {
        let lock = self.table_lock(table);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read_rows_unlocked(table)
    }

    /// Appends one row, writing the header first when the file is new.
    pub fn append_row<T: Serialize>(&self, table: &str, row: &T) -> AppResult<()> {
        let lock = self.table_lock(table);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let path = self.table_path(table);
        let write_headers = !path.exists() || fs::metadata(&path)?.len() == 0;
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_headers)
            .from_writer(file);
        writer.serialize(row)?;
        writer.flush()?;
        debug!(target: "app::store", table, "row appended");
        Ok(())
    }

    /// Locked read-modify-write over a whole table. This is the keyed-upsert
    /// workhorse: repositories filter out superseded rows and append the
    /// replacement inside `apply`.
    pub fn update_rows<T, F>(&self, table: &str, apply: F) -> AppResult<()>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Vec<T>) -> Vec<T>,
    {
        let lock = self.table_lock(table);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let rows = self.read_rows_unlocked::<T>(table)?;
        let rows = apply(rows);
        self.rewrite_unlocked(table, &rows)
    }

    fn read_rows_unlocked<T: DeserializeOwned>(&self, table: &str) -> AppResult<Vec<T>> {
        let path = self.table_path(table);
        if !path.exists() {
            debug!(target: "app::store", table, "table file missing, treating as empty");
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<T>, csv::Error>>()?;
        Ok(rows)
    }

    fn rewrite_unlocked<T: Serialize>(&self, table: &str, rows: &[T]) -> AppResult<()> {
        let path = self.table_path(table);
        let tmp_path = self.root.join(format!("{table}.csv.tmp"));

        {
            let mut writer = csv::Writer::from_path(&tmp_path)?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }

        fs::rename(&tmp_path, &path)?;
        debug!(target: "app::store", table, rows = rows.len(), "table rewritten");
        Ok(())
    }

    fn table_lock(&self, table: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(table.to_string()).or_default())
    }
}
