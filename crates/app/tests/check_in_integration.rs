//! Integration tests for the gate check-in desk.

mod common;

use std::time::Duration;

use common::test_config;
use domain::models::AttendanceStatus;
use domain::sample_data::{self, DASHBOARD_EVENT_ID};
use domain::services::{AttendeeRoster, ScanOutcome};
use hegira_app::check_in_desk::CheckInDesk;

fn desk() -> CheckInDesk {
    CheckInDesk::new(
        AttendeeRoster::new(sample_data::sample_attendees()),
        test_config().scan_delay(),
    )
}

#[tokio::test(start_paused = true)]
async fn test_scan_marks_attendee_present() {
    let mut desk = desk();
    let rx = desk.scan(" hgr-jce-0002 ");
    assert!(desk.is_scanning());

    match rx.await.unwrap() {
        ScanOutcome::Success { attendee } => {
            assert_eq!(attendee.ticket_id, "HGR-JCE-0002");
            assert_eq!(attendee.status, AttendanceStatus::Arrived);
            assert!(attendee.scan_timestamp.is_some());
        }
        other => panic!("expected success, got {:?}", other),
    }

    let roster = desk.roster();
    assert_eq!(roster.lock().await.arrived_count(DASHBOARD_EVENT_ID), 3);
}

#[tokio::test(start_paused = true)]
async fn test_second_scan_reports_already_scanned() {
    let mut desk = desk();
    let first = desk.scan("HGR-JCE-0004").await.unwrap();
    assert!(matches!(first, ScanOutcome::Success { .. }));

    let second = desk.manual_entry("HGR-JCE-0004").await;
    assert!(matches!(second, ScanOutcome::AlreadyScanned { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_new_scan_replaces_pending_one() {
    let mut desk = desk();
    let abandoned = desk.scan("HGR-JCE-0001");
    tokio::time::sleep(Duration::from_millis(500)).await;
    let current = desk.scan("HGR-JCE-0002");

    assert!(abandoned.await.is_err());
    assert!(matches!(current.await.unwrap(), ScanOutcome::Success { .. }));

    let roster = desk.roster();
    let roster = roster.lock().await;
    let first = roster
        .attendees()
        .iter()
        .find(|a| a.ticket_id == "HGR-JCE-0001")
        .unwrap();
    assert_eq!(first.status, AttendanceStatus::NotArrived);
}

#[tokio::test(start_paused = true)]
async fn test_closing_desk_cancels_scan() {
    let mut desk = desk();
    let rx = desk.scan("HGR-JCE-0001");
    desk.close();
    assert!(!desk.is_scanning());
    assert!(rx.await.is_err());

    tokio::time::sleep(Duration::from_secs(5)).await;
    let roster = desk.roster();
    assert_eq!(roster.lock().await.arrived_count(DASHBOARD_EVENT_ID), 2);
}

#[tokio::test]
async fn test_unknown_ticket() {
    let desk = desk();
    match desk.manual_entry("hgr-xyz-0001").await {
        ScanOutcome::NotFound { ticket_id } => assert_eq!(ticket_id, "HGR-XYZ-0001"),
        other => panic!("expected not found, got {:?}", other),
    }
}
