use std::path::{Path, PathBuf};
use async_trait::async_trait;
use nb_core::{ContactRecord, ContactStorage, Error, Result};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Contacts kept as a single pretty-printed JSON array on disk.
///
/// Every change rewrites the whole file. Changes made through one instance are
/// serialized, so overlapping research runs in the same process cannot lose
/// each other's appends. Nothing protects the file from other processes.
pub struct JsonFileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> Result<Vec<ContactRecord>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| Error::Parse(format!("{}: {}", self.path.display(), e)))?;
        let serde_json::Value::Array(entries) = value else {
            return Err(Error::Parse(format!(
                "{}: expected a list of contacts",
                self.path.display()
            )));
        };

        // One unreadable entry must not cost the rest of the store.
        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<ContactRecord>(entry) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    "⚠️ Skipping unreadable contact #{} in {}: {}",
                    index + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(records)
    }

    async fn load_or_empty(&self) -> Vec<ContactRecord> {
        match self.read_records().await {
            Ok(records) => records,
            Err(e) => {
                // The next save replaces the unreadable file.
                warn!("⚠️ Error loading contacts, treating store as empty: {}", e);
                Vec::new()
            }
        }
    }

    async fn write_records(&self, records: &[ContactRecord]) -> Result<()> {
        let body = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, body).await.map_err(|e| {
            Error::Storage(format!(
                "Failed to save contacts to {}: {}",
                self.path.display(),
                e
            ))
        })?;
        debug!("💾 Saved {} contacts to {}", records.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl ContactStorage for JsonFileStorage {
    async fn load(&self) -> Vec<ContactRecord> {
        let _guard = self.write_lock.lock().await;
        self.load_or_empty().await
    }

    async fn save(&self, records: &[ContactRecord]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_records(records).await
    }

    async fn append(&self, record: &ContactRecord) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_or_empty().await;
        records.push(record.clone());
        self.write_records(&records).await?;
        Ok(records.len())
    }

    async fn delete(&self, name: &str, company: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_or_empty().await;
        let Some(index) = records.iter().position(|r| r.is_identified_by(name, company)) else {
            return Ok(false);
        };
        records.remove(index);
        self.write_records(&records).await?;
        Ok(true)
    }
}
