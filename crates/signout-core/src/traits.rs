//! Storage seam for hand-off records.
//!
//! The service layer only sees this trait, so scoring and request handling
//! can be exercised against any store. `signout-store` provides the
//! in-memory implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::HandoffRecord;

/// Trait for hand-off record stores.
#[async_trait]
pub trait HandoffStore: Send + Sync {
    /// Human-readable store name (e.g. "memory").
    fn name(&self) -> &str;

    /// Insert a new record. Fails if the identifier is already taken.
    async fn insert(&self, record: HandoffRecord) -> anyhow::Result<()>;

    /// Fetch a record by identifier.
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<HandoffRecord>>;

    /// Records matching the query, oldest first.
    async fn list(&self, query: &ListQuery) -> anyhow::Result<Vec<HandoffRecord>>;

    /// Replace an existing record wholesale. Returns `false` if absent.
    async fn replace(&self, record: HandoffRecord) -> anyhow::Result<bool>;

    /// Remove a record. Returns `false` if absent.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

/// Filter and page through stored records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Only records for this case.
    #[serde(default)]
    pub case_id: Option<String>,
    /// Records to skip after ordering.
    #[serde(default)]
    pub offset: usize,
    /// Maximum records to return (None = no limit).
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn for_case(case_id: impl Into<String>) -> Self {
        Self {
            case_id: Some(case_id.into()),
            ..Default::default()
        }
    }

    /// Apply offset and limit to an already filtered, ordered sequence.
    pub fn paginate<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skipped = items.into_iter().skip(self.offset);
        match self.limit {
            Some(limit) => skipped.take(limit).collect(),
            None => skipped.collect(),
        }
    }

    /// Returns `true` if the record passes the case filter.
    pub fn accepts(&self, record: &HandoffRecord) -> bool {
        match &self.case_id {
            Some(case_id) => &record.case_id == case_id,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_offset_and_limit() {
        let query = ListQuery {
            case_id: None,
            offset: 1,
            limit: Some(2),
        };
        assert_eq!(query.paginate(vec![1, 2, 3, 4]), vec![2, 3]);
    }

    #[test]
    fn paginate_without_limit() {
        let query = ListQuery {
            offset: 3,
            ..Default::default()
        };
        assert_eq!(query.paginate(vec![1, 2, 3, 4]), vec![4]);
        assert!(query.paginate(Vec::<u8>::new()).is_empty());
    }

    #[test]
    fn for_case_sets_filter() {
        let query = ListQuery::for_case("case-001");
        assert_eq!(query.case_id.as_deref(), Some("case-001"));
        assert_eq!(query.offset, 0);
        assert_eq!(query.limit, None);
    }
}
