mod common;

use std::time::Duration;

use common::*;
use geomarker::data::MarkerRepository;
use geomarker::domain::{LatLng, MarkersState};
use geomarker::ui::marker_list::{MarkerListComponent, MarkerListIntent, MarkerListLabel};

fn ids(state: &MarkersState) -> Vec<i64> {
    state.markers().iter().map(|marker| marker.id).collect()
}

fn open(harness: &Harness) -> MarkerListComponent {
    MarkerListComponent::new(test_settings().store_options("marker-list"), &harness.deps)
}

#[tokio::test]
async fn without_a_fix_keeps_repository_order() {
    let harness = Harness::with_markers(vec![
        marker(1, "far", 0.0, 10.0),
        marker(2, "near", 0.0, 1.0),
    ]);
    let list = open(&harness);
    let mut model = list.model();
    let state = wait_for(&mut model, |state| matches!(state.markers, MarkersState::Loaded(_))).await;

    assert_eq!(ids(&state.markers), vec![1, 2]);
    assert_eq!(state.origin, None);
    assert_eq!(state.distance_km(&state.markers.markers()[0]), None);
}

#[tokio::test]
async fn sorts_nearest_first_once_position_known() {
    let harness = Harness::with_markers(vec![
        marker(1, "far", 0.0, 10.0),
        marker(2, "near", 0.0, 1.0),
    ]);
    harness.tracker.start_updates(Duration::from_secs(1));
    let list = open(&harness);
    let mut model = list.model();
    wait_for(&mut model, |state| matches!(state.markers, MarkersState::Loaded(_))).await;

    harness.location.push_fix(LatLng::new(0.0, 0.0));
    let state = wait_for(&mut model, |state| state.origin.is_some()).await;
    assert_eq!(ids(&state.markers), vec![2, 1]);

    let near = &state.markers.markers()[0];
    let km = state.distance_km(near).unwrap();
    assert!((km - 111.19).abs() < 0.1, "got {km}");
}

#[tokio::test]
async fn republished_identical_list_is_not_a_new_state() {
    let harness = Harness::with_markers(vec![marker(1, "a", 0.0, 1.0), marker(2, "b", 0.0, 2.0)]);
    let list = open(&harness);
    let mut model = list.model();
    wait_for(&mut model, |state| matches!(state.markers, MarkersState::Loaded(_))).await;

    harness.markers.touch();
    quiesce().await;
    assert!(!model.has_changed().unwrap());
}

#[tokio::test]
async fn position_change_keeping_order_only_moves_origin() {
    let harness = Harness::with_markers(vec![
        marker(1, "east", 0.0, 10.0),
        marker(2, "west", 0.0, 1.0),
    ]);
    harness.tracker.start_updates(Duration::from_secs(1));
    let list = open(&harness);
    let mut model = list.model();
    wait_for(&mut model, |state| matches!(state.markers, MarkersState::Loaded(_))).await;

    harness.location.push_fix(LatLng::new(0.0, 0.0));
    let first = wait_for(&mut model, |state| state.origin.is_some()).await;
    assert_eq!(ids(&first.markers), vec![2, 1]);

    // Still nearer to marker 2: same head, same size. Only the origin
    // used for distances moves.
    harness.location.push_fix(LatLng::new(0.0, 2.0));
    let kept = wait_for(&mut model, |state| state.origin == Some(LatLng::new(0.0, 2.0))).await;
    assert_eq!(kept.markers, first.markers);
    let west = &kept.markers.markers()[0];
    let distance = kept.distance_km(west).unwrap();
    assert!((distance - 111.19).abs() < 0.1, "distance {distance}");

    // Now marker 1 leads.
    harness.location.push_fix(LatLng::new(0.0, 9.0));
    let moved = wait_for(&mut model, |state| state.origin == Some(LatLng::new(0.0, 9.0))).await;
    assert_eq!(ids(&moved.markers), vec![1, 2]);
}

#[tokio::test]
async fn new_marker_is_shown() {
    let harness = Harness::with_markers(vec![marker(1, "a", 0.0, 1.0)]);
    let list = open(&harness);
    let mut model = list.model();
    wait_for(&mut model, |state| state.markers.markers().len() == 1).await;

    harness
        .markers
        .save_marker(&marker(0, "b", 0.0, 2.0))
        .await
        .unwrap();
    let state = wait_for(&mut model, |state| state.markers.markers().len() == 2).await;
    assert_eq!(state.markers.markers()[1].title, "b");
}

#[tokio::test]
async fn persistent_read_failure_ends_in_error() {
    let harness = Harness::new();
    harness.markers.fail_next_reads(5);
    let list = open(&harness);
    let mut model = list.model();
    let state = wait_for(&mut model, |state| matches!(state.markers, MarkersState::Error(_))).await;

    assert!(matches!(state.markers, MarkersState::Error(ref message) if message.contains("injected")));
    assert_eq!(harness.markers.subscribe_calls(), 3);
}

#[tokio::test]
async fn transient_read_failure_recovers() {
    let harness = Harness::with_markers(vec![marker(1, "a", 0.0, 1.0)]);
    harness.markers.fail_next_reads(2);
    let list = open(&harness);
    let mut model = list.model();
    let state = wait_for(&mut model, |state| matches!(state.markers, MarkersState::Loaded(_))).await;

    assert_eq!(ids(&state.markers), vec![1]);
    assert_eq!(harness.markers.subscribe_calls(), 3);
}

#[tokio::test]
async fn item_click_is_reported() {
    let harness = Harness::with_markers(vec![marker(7, "a", 0.0, 1.0)]);
    let list = open(&harness);
    let mut labels = list.labels();
    list.accept(MarkerListIntent::ItemClicked(7));
    assert_eq!(next_label(&mut labels).await, MarkerListLabel::Selected(7));
}
