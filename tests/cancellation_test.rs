//! Leaving a view cancels its in-flight requests

mod helpers;

use std::time::Duration;

use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use exam_results::models::Grade;
use exam_results::services::TileValue;
use exam_results::state::LoadState;
use exam_results::utils::errors::ExamResultsError;
use helpers::*;

#[tokio::test]
async fn test_cancelled_load_leaves_no_trace() {
    let store = StoreMockServer::new().await;
    store
        .mock_select_delayed("student", json!([student_row(Uuid::new_v4(), "Ann Lee", "R1")]), Duration::from_secs(5))
        .await;
    store.mock_select("course", json!([])).await;
    store.mock_select("exam", json!([])).await;

    let mut dashboard = store.factory().dashboard();
    let handle = dashboard.cancel_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();
    });

    assert_matches!(dashboard.load().await, Err(ExamResultsError::Cancelled));

    let tiles = dashboard.tiles();
    assert_eq!(tiles[0].value, TileValue::Pending);
    assert_eq!(tiles[1].value, TileValue::Count(0));
    assert!(dashboard.errors().is_empty());
}

#[tokio::test]
async fn test_cancelled_roster_load_restores_previous_state() {
    let store = StoreMockServer::new().await;
    store.mock_select_once("student", json!([student_row(Uuid::new_v4(), "Ann Lee", "R1")])).await;
    store.mock_select_delayed("student", json!([]), Duration::from_secs(5)).await;

    let mut roster = store.factory().roster();
    roster.load().await.unwrap();

    let handle = roster.cancel_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();
    });

    assert_matches!(roster.load().await, Err(ExamResultsError::Cancelled));
    assert_eq!(roster.roster().state(), &LoadState::Ready);
    assert_eq!(roster.students().len(), 1);
}

#[tokio::test]
async fn test_cancelled_submit_keeps_form() {
    let store = StoreMockServer::new().await;
    let (student_id, course_id, exam_id) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    store.mock_select("student", json!([student_row(student_id, "Ann Lee", "R1")])).await;
    store.mock_select("course", json!([course_row(course_id, "CS201", "Data Structures")])).await;
    store.mock_select("exam", json!([exam_row(exam_id, course_id, "Midterm", 100.0)])).await;
    store.mock_select("result", json!([])).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/result"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([result_row(student_id, exam_id, 55.0, "C")]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&store.server)
        .await;

    let mut view = store.factory().mark_entry();
    view.load().await.unwrap();
    view.select_student(Some(student_id));
    view.select_course(Some(course_id));
    view.select_exam(Some(exam_id)).unwrap();
    view.set_marks("55");
    view.set_grade(Grade::C);

    let handle = view.cancel_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();
    });

    assert_matches!(view.submit().await, Err(ExamResultsError::Cancelled));
    assert_eq!(view.form().exam_id, Some(exam_id));
    assert_eq!(view.form().grade, Grade::C);
}
