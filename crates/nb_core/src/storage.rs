use async_trait::async_trait;
use crate::types::ContactRecord;
use crate::Result;

#[async_trait]
pub trait ContactStorage: Send + Sync {
    /// Load every stored contact, in insertion order.
    ///
    /// A missing or unreadable store yields an empty list.
    async fn load(&self) -> Vec<ContactRecord>;

    /// Overwrite the store with `records`
    async fn save(&self, records: &[ContactRecord]) -> Result<()>;

    /// Add a contact to the end of the store, returning the new number of contacts
    async fn append(&self, record: &ContactRecord) -> Result<usize>;

    /// Remove the first contact matching `name` and `company` exactly
    async fn delete(&self, name: &str, company: &str) -> Result<bool>;

    /// Contacts whose name, company, role or industry contain `term`, ignoring case
    async fn search(&self, term: &str) -> Vec<ContactRecord> {
        self.load()
            .await
            .into_iter()
            .filter(|record| record.matches_search(term))
            .collect()
    }
}
