use std::path::Path;

use tracing::info;

use crate::error::AppResult;
use crate::models::schedule::ScheduleEntry;
use crate::store::repositories::schedule_repository::ScheduleRepository;
use crate::store::DataDir;

#[derive(Clone)]
pub struct ScheduleService {
    data: DataDir,
}

impl ScheduleService {
    pub fn new(data: DataDir) -> Self {
        Self { data }
    }

    pub fn list_all(&self) -> AppResult<Vec<ScheduleEntry>> {
        ScheduleRepository::list_all(&self.data)
    }

    pub fn upsert_entry(&self, entry: &ScheduleEntry) -> AppResult<()> {
        ScheduleRepository::upsert(&self.data, entry)?;
        info!(
            target: "app::schedule",
            username = %entry.username,
            date = %entry.date,
            "schedule entry saved"
        );
        Ok(())
    }

    /// Admin "upload new schedule" path: validates and swaps in the whole
    /// table from an external CSV file.
    pub fn import_csv(&self, path: &Path) -> AppResult<usize> {
        let imported = ScheduleRepository::import_file(&self.data, path)?;
        info!(
            target: "app::schedule",
            file = %path.display(),
            rows = imported,
            "schedule replaced from upload"
        );
        Ok(imported)
    }
}
