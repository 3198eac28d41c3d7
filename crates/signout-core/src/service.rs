//! Hand-off service: ingestion, retrieval, and scoring over a store.
//!
//! Validation failures and missing records surface as [`SignoutError`]
//! wrapped in `anyhow::Error`, so callers can downcast to classify them.

use std::sync::Arc;

use anyhow::Result;
use uuid::Uuid;

use crate::error::SignoutError;
use crate::model::{HandoffRecord, HandoffSubmission};
use crate::rubric::{self, RubricResult};
use crate::traits::{HandoffStore, ListQuery};

/// Paging limits for [`HandoffService::list`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Page size when the caller gives none.
    pub default_page_limit: usize,
    /// Largest page a caller may request.
    pub max_page_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_limit: 50,
            max_page_limit: 200,
        }
    }
}

/// Creates, reads, replaces, deletes, and scores hand-offs.
#[derive(Clone)]
pub struct HandoffService {
    store: Arc<dyn HandoffStore>,
    config: ServiceConfig,
}

impl HandoffService {
    pub fn new(store: Arc<dyn HandoffStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Validate and normalize a submission, then store it as a new record.
    pub async fn create(&self, submission: HandoffSubmission) -> Result<HandoffRecord> {
        let draft = submission.validate().inspect_err(|e| {
            tracing::warn!("rejected signout submission: {e}");
        })?;
        let record = HandoffRecord::new(draft);
        self.store.insert(record.clone()).await?;
        tracing::info!(
            "created signout {} for case {} ({})",
            record.id,
            record.case_id,
            record.illness_severity
        );
        Ok(record)
    }

    pub async fn get(&self, id: Uuid) -> Result<HandoffRecord> {
        match self.store.get(id).await? {
            Some(record) => Ok(record),
            None => {
                tracing::warn!("signout {id} not found");
                Err(SignoutError::RecordNotFound(id).into())
            }
        }
    }

    /// List records oldest first, with the limit clamped to the configured
    /// maximum.
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<HandoffRecord>> {
        let limit = query
            .limit
            .unwrap_or(self.config.default_page_limit)
            .min(self.config.max_page_limit);
        let query = ListQuery {
            limit: Some(limit),
            ..query.clone()
        };
        self.store.list(&query).await
    }

    /// Replace a record's content, keeping its identifier and creation time.
    pub async fn update(&self, id: Uuid, submission: HandoffSubmission) -> Result<HandoffRecord> {
        let existing = self.get(id).await?;
        let draft = submission.validate()?;
        let record = HandoffRecord::with_identity(existing.id, existing.created_at, draft);
        if !self.store.replace(record.clone()).await? {
            return Err(SignoutError::RecordNotFound(id).into());
        }
        tracing::info!("replaced signout {id}");
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.store.delete(id).await? {
            tracing::warn!("signout {id} not found for delete");
            return Err(SignoutError::RecordNotFound(id).into());
        }
        tracing::info!("deleted signout {id}");
        Ok(())
    }

    /// Load a record and score it against the rubric.
    pub async fn score(&self, id: Uuid) -> Result<RubricResult> {
        let record = self.get(id).await?;
        let result = rubric::score(&record);
        tracing::debug!(
            "scored signout {id}: {}/{} ({})",
            result.total_score,
            RubricResult::max_total(),
            result.rubric_version
        );
        Ok(result)
    }
}
