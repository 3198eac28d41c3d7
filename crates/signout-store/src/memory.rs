//! In-memory hand-off store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use signout_core::model::HandoffRecord;
use signout_core::traits::{HandoffStore, ListQuery};

/// A process-local store. Contents are lost on restart.
///
/// Each record carries an insertion sequence number so records created in
/// the same clock tick still list in submission order.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    records: HashMap<Uuid, (u64, HandoffRecord)>,
    next_seq: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl HandoffStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert(&self, record: HandoffRecord) -> anyhow::Result<()> {
        let mut inner = self.inner.write().await;
        if inner.records.contains_key(&record.id) {
            anyhow::bail!("signout {} already exists", record.id);
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.records.insert(record.id, (seq, record));
        Ok(())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<HandoffRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.records.get(&id).map(|(_, record)| record.clone()))
    }

    async fn list(&self, query: &ListQuery) -> anyhow::Result<Vec<HandoffRecord>> {
        let inner = self.inner.read().await;
        let mut matching: Vec<&(u64, HandoffRecord)> = inner
            .records
            .values()
            .filter(|(_, record)| query.accepts(record))
            .collect();
        matching.sort_by_key(|(seq, record)| (record.created_at, *seq));
        Ok(query.paginate(matching.into_iter().map(|(_, record)| record.clone())))
    }

    async fn replace(&self, record: HandoffRecord) -> anyhow::Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.records.get_mut(&record.id) {
            Some(slot) => {
                slot.1 = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut inner = self.inner.write().await;
        let removed = inner.records.remove(&id).is_some();
        if removed {
            tracing::debug!("removed signout {id} from memory store");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use signout_core::model::{HandoffDraft, IllnessSeverity};

    fn record(case_id: &str, minutes: i64) -> HandoffRecord {
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap();
        HandoffRecord::with_identity(
            Uuid::new_v4(),
            base + Duration::minutes(minutes),
            HandoffDraft {
                case_id: case_id.into(),
                illness_severity: IllnessSeverity::Stable,
                patient_summary: "Admitted for cellulitis".into(),
                action_list: vec!["Follow up cultures".into()],
                situational_awareness: vec![],
                contingency_plans: vec![],
                receiver_synthesis: "ok".into(),
                free_text: None,
            },
        )
    }

    #[tokio::test]
    async fn insert_and_get() {
        let store = MemoryStore::new();
        let r = record("case-001", 0);
        store.insert(r.clone()).await.unwrap();
        assert_eq!(store.get(r.id).await.unwrap(), Some(r));
        assert_eq!(store.get(Uuid::new_v4()).await.unwrap(), None);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.name(), "memory");
    }

    #[tokio::test]
    async fn duplicate_insert_fails() {
        let store = MemoryStore::new();
        let r = record("case-001", 0);
        store.insert(r.clone()).await.unwrap();
        assert!(store.insert(r).await.is_err());
    }

    #[tokio::test]
    async fn list_orders_by_created_at_and_filters() {
        let store = MemoryStore::new();
        let late = record("case-001", 30);
        let early = record("case-001", 5);
        let other = record("case-002", 0);
        for r in [&late, &early, &other] {
            store.insert(r.clone()).await.unwrap();
        }

        let all = store.list(&ListQuery::default()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![other.id, early.id, late.id]);

        let case_one = store.list(&ListQuery::for_case("case-001")).await.unwrap();
        let ids: Vec<_> = case_one.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[tokio::test]
    async fn ties_keep_insertion_order() {
        let store = MemoryStore::new();
        let first = record("case-001", 0);
        let second = record("case-001", 0);
        store.insert(first.clone()).await.unwrap();
        store.insert(second.clone()).await.unwrap();

        let page = store
            .list(&ListQuery {
                case_id: None,
                offset: 1,
                limit: Some(1),
            })
            .await
            .unwrap();
        assert_eq!(page, vec![second]);
    }

    #[tokio::test]
    async fn replace_and_delete() {
        let store = MemoryStore::new();
        let r = record("case-001", 0);
        store.insert(r.clone()).await.unwrap();

        let mut updated = r.clone();
        updated.receiver_synthesis = "I will call if febrile".into();
        assert!(store.replace(updated.clone()).await.unwrap());
        assert_eq!(store.get(r.id).await.unwrap(), Some(updated));

        assert!(!store.replace(record("case-001", 1)).await.unwrap());

        assert!(store.delete(r.id).await.unwrap());
        assert!(!store.delete(r.id).await.unwrap());
        assert!(store.is_empty().await);
    }
}
