//! State-machine tests for the consultation page, driven through the
//! stubbed-fetch seam so no network is involved.

use chrono::NaiveDate;
use ngochap::app::hapui::reading_page::{ReadingPage, ReadingState};
use ngochap::app::reading_client::{Reading, ReadingError};
use std::thread;
use std::time::Duration;

/// Poll until the outstanding fetch resolves or a generous deadline
/// passes. The worker threads are near-instant; the deadline only guards
/// against a hung test.
fn wait_until_settled(page: &mut ReadingPage) {
    for _ in 0..400 {
        page.poll_results();
        if !matches!(page.state(), ReadingState::Loading) {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("fetch outcome never arrived");
}

fn reading(text: &str, model_id: &str) -> Reading {
    Reading {
        text: text.to_string(),
        model_id: model_id.to_string(),
    }
}

#[test]
fn selected_date_replaces_wholesale() {
    let mut page = ReadingPage::new();
    let d = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

    page.set_selected_date(Some(d));
    assert_eq!(page.selected_date(), Some(d));

    page.set_selected_date(None);
    assert_eq!(page.selected_date(), None);
}

#[test]
fn date_change_does_not_touch_query_state() {
    let mut page = ReadingPage::new();
    page.submit_with(|_| Ok(reading("X", "m1")));
    wait_until_settled(&mut page);
    let before = page.state().clone();

    page.set_selected_date(Some(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()));
    assert_eq!(*page.state(), before);
}

#[test]
fn submit_without_date_is_a_no_op() {
    let mut page = ReadingPage::new();
    page.set_selected_date(None);

    page.submit();
    assert_eq!(*page.state(), ReadingState::Idle);

    page.submit_with(|_| Ok(reading("X", "m1")));
    assert_eq!(*page.state(), ReadingState::Idle);
}

#[test]
fn submit_enters_loading_synchronously() {
    let mut page = ReadingPage::new();
    page.submit_with(|_| {
        thread::sleep(Duration::from_millis(100));
        Ok(reading("X", "m1"))
    });

    // Before the worker resolves, the state is already Loading
    assert_eq!(*page.state(), ReadingState::Loading);
    wait_until_settled(&mut page);
}

#[test]
fn successful_fetch_lands_in_succeeded() {
    let mut page = ReadingPage::new();
    page.submit_with(|_| Ok(reading("X", "m1")));
    wait_until_settled(&mut page);

    assert_eq!(*page.state(), ReadingState::Succeeded(reading("X", "m1")));
}

#[test]
fn failed_fetch_lands_in_failed_with_the_message() {
    let mut page = ReadingPage::new();
    page.submit_with(|_| Err(ReadingError::new("E")));
    wait_until_settled(&mut page);

    assert_eq!(*page.state(), ReadingState::Failed("E".to_string()));
}

#[test]
fn new_submit_clears_previous_outcome() {
    let mut page = ReadingPage::new();
    page.submit_with(|_| Ok(reading("X", "m1")));
    wait_until_settled(&mut page);

    page.submit_with(|_| {
        thread::sleep(Duration::from_millis(100));
        Ok(reading("Y", "m2"))
    });
    // The earlier reading is gone before the new outcome is known
    assert_eq!(*page.state(), ReadingState::Loading);
    wait_until_settled(&mut page);
    assert_eq!(*page.state(), ReadingState::Succeeded(reading("Y", "m2")));
}

#[test]
fn stale_outcome_never_overwrites_a_newer_submit() {
    let mut page = ReadingPage::new();

    // Call A resolves late
    page.submit_with(|_| {
        thread::sleep(Duration::from_millis(200));
        Ok(reading("A", "mA"))
    });
    // Call B starts before A resolves and finishes first
    page.submit_with(|_| Ok(reading("B", "mB")));

    wait_until_settled(&mut page);
    assert_eq!(*page.state(), ReadingState::Succeeded(reading("B", "mB")));

    // Let A's worker finish and deliver, then confirm it was discarded
    thread::sleep(Duration::from_millis(400));
    page.poll_results();
    assert_eq!(*page.state(), ReadingState::Succeeded(reading("B", "mB")));
}

#[test]
fn stale_failure_is_discarded_too() {
    let mut page = ReadingPage::new();

    page.submit_with(|_| {
        thread::sleep(Duration::from_millis(200));
        Err(ReadingError::new("quá hạn"))
    });
    page.submit_with(|_| Ok(reading("B", "mB")));

    wait_until_settled(&mut page);
    thread::sleep(Duration::from_millis(400));
    page.poll_results();
    assert_eq!(*page.state(), ReadingState::Succeeded(reading("B", "mB")));
}
