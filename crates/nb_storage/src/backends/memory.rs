use async_trait::async_trait;
use nb_core::{ContactRecord, ContactStorage, Result};
use tokio::sync::RwLock;

/// Keeps contacts for the lifetime of the process only.
#[derive(Default)]
pub struct InMemoryStorage {
    records: RwLock<Vec<ContactRecord>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ContactRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl ContactStorage for InMemoryStorage {
    async fn load(&self) -> Vec<ContactRecord> {
        self.records.read().await.clone()
    }

    async fn save(&self, records: &[ContactRecord]) -> Result<()> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }

    async fn append(&self, record: &ContactRecord) -> Result<usize> {
        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(records.len())
    }

    async fn delete(&self, name: &str, company: &str) -> Result<bool> {
        let mut records = self.records.write().await;
        match records.iter().position(|r| r.is_identified_by(name, company)) {
            Some(index) => {
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nb_core::ContactInfo;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = InMemoryStorage::new();
        let record = ContactRecord::from_info(
            &ContactInfo::new("Alice", "Acme"),
            "brief".to_string(),
            vec![],
        );

        assert_eq!(storage.append(&record).await.unwrap(), 1);
        assert_eq!(storage.load().await.last(), Some(&record));

        assert!(storage.delete("Alice", "Acme").await.unwrap());
        assert!(!storage.delete("Alice", "Acme").await.unwrap());
        assert!(storage.load().await.is_empty());
    }
}
