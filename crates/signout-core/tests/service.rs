//! Service-level tests against the in-memory store.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use signout_core::model::{HandoffSubmission, IllnessSeverity};
use signout_core::rubric::Domain;
use signout_core::service::{HandoffService, ServiceConfig};
use signout_core::traits::ListQuery;
use signout_core::SignoutError;
use signout_store::MemoryStore;

fn service() -> HandoffService {
    HandoffService::new(Arc::new(MemoryStore::new()), ServiceConfig::default())
}

fn submission(case_id: &str) -> HandoffSubmission {
    HandoffSubmission::from_json(json!({
        "case_id": case_id,
        "illness_severity": "Unstable",
        "patient_summary": "54M admitted with GI bleed, tachy to 120, s/p 2 units transfused",
        "action_list": "Repeat H/H at 2200\nKeep NPO",
        "situational_awareness": ["Two large-bore IVs in place", "GI aware, scope within 24 hours"],
        "contingency_plans": ["If Hgb < 7, transfuse and call GI", "If SBP < 90, bolus and page rapid response"],
        "receiver_synthesis": "Understood. I will trend the H/H and escalate if he drops.",
    }))
    .unwrap()
}

fn not_found(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<SignoutError>(),
        Some(SignoutError::RecordNotFound(_))
    )
}

#[tokio::test]
async fn create_normalizes_and_stores() {
    let service = service();
    let created = service.create(submission("case-001")).await.unwrap();

    assert_eq!(created.illness_severity, IllnessSeverity::Unstable);
    assert_eq!(created.action_list, vec!["Repeat H/H at 2200", "Keep NPO"]);

    let fetched = service.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_rejects_unknown_severity() {
    let service = service();
    let mut bad = submission("case-001");
    bad.illness_severity = "Critical".into();

    let err = service.create(bad).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SignoutError>(),
        Some(SignoutError::UnknownSeverity(_))
    ));
    assert!(service
        .list(&ListQuery::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn get_unknown_is_not_found() {
    let err = service().get(Uuid::new_v4()).await.unwrap_err();
    assert!(not_found(&err));
}

#[tokio::test]
async fn list_filters_by_case_and_pages() {
    let service = service();
    let first = service.create(submission("case-001")).await.unwrap();
    let _other = service.create(submission("case-002")).await.unwrap();
    let second = service.create(submission("case-001")).await.unwrap();

    let case_one = service.list(&ListQuery::for_case("case-001")).await.unwrap();
    assert_eq!(case_one, vec![first.clone(), second.clone()]);

    let page = service
        .list(&ListQuery {
            case_id: Some("case-001".into()),
            offset: 1,
            limit: Some(1),
        })
        .await
        .unwrap();
    assert_eq!(page, vec![second]);
}

#[tokio::test]
async fn list_clamps_limit() {
    let service = HandoffService::new(
        Arc::new(MemoryStore::new()),
        ServiceConfig {
            default_page_limit: 2,
            max_page_limit: 3,
        },
    );
    for _ in 0..5 {
        service.create(submission("case-001")).await.unwrap();
    }

    assert_eq!(service.list(&ListQuery::default()).await.unwrap().len(), 2);
    let big = ListQuery {
        limit: Some(100),
        ..Default::default()
    };
    assert_eq!(service.list(&big).await.unwrap().len(), 3);
}

#[tokio::test]
async fn update_replaces_whole_record() {
    let service = service();
    let created = service.create(submission("case-001")).await.unwrap();

    let mut revised = submission("case-001");
    revised.illness_severity = "Watcher".into();
    revised.contingency_plans = None;

    let updated = service.update(created.id, revised).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.illness_severity, IllnessSeverity::Watcher);
    assert!(updated.contingency_plans.is_empty());

    assert_eq!(service.get(created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn update_unknown_is_not_found() {
    let err = service()
        .update(Uuid::new_v4(), submission("case-001"))
        .await
        .unwrap_err();
    assert!(not_found(&err));
}

#[tokio::test]
async fn delete_removes_record() {
    let service = service();
    let created = service.create(submission("case-001")).await.unwrap();

    service.delete(created.id).await.unwrap();
    assert!(not_found(&service.get(created.id).await.unwrap_err()));
    assert!(not_found(&service.delete(created.id).await.unwrap_err()));
}

#[tokio::test]
async fn score_loads_and_scores() {
    let service = service();
    let created = service.create(submission("case-001")).await.unwrap();

    let result = service.score(created.id).await.unwrap();
    assert_eq!(result.total_score, 15);
    assert_eq!(result.subscore(Domain::PatientSummary), 4);
    assert!(result.missing_critical.is_empty());

    // Scoring twice gives the same answer.
    assert_eq!(service.score(created.id).await.unwrap(), result);
}

#[tokio::test]
async fn score_unknown_is_not_found() {
    let err = service().score(Uuid::new_v4()).await.unwrap_err();
    assert!(not_found(&err));
}
