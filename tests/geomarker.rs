mod common;

use std::sync::Arc;

use common::*;
use geomarker::data::{MarkerRepository, Permission};
use geomarker::domain::{LatLng, DEFAULT_ZOOM};
use geomarker::ui::geomarker::{GeoMarkerComponent, GeoMarkerIntent, GeoMarkerOutput};
use geomarker::ui::map::MapIntent;
use geomarker::ui::marker_details::MarkerDetailsIntent;
use geomarker::ui::marker_list::MarkerListIntent;
use geomarker::ui::sheet::SheetConfig;

fn open(harness: &Harness) -> (GeoMarkerComponent, Recorder<GeoMarkerOutput>) {
    let outputs = Recorder::new();
    let main = GeoMarkerComponent::new(Arc::clone(&harness.deps), outputs.sink());
    (main, outputs)
}

fn seeded() -> Harness {
    Harness::with_markers(vec![
        marker(1, "Bakery", 59.93, 30.31),
        marker(2, "Harbour", 59.95, 30.20),
    ])
}

#[tokio::test]
async fn markers_reach_the_map() {
    let harness = seeded();
    let (main, _) = open(&harness);
    let mut map = main.map().model();
    let state = wait_for(&mut map, |state| state.markers.len() == 2).await;
    assert_eq!(state.markers[0].title, "Bakery");
    assert_eq!(main.state().markers.markers().len(), 2);
}

#[tokio::test]
async fn list_selection_opens_details_and_centers_map() {
    let harness = seeded();
    let (main, _) = open(&harness);
    let mut map = main.map().model();
    wait_for(&mut map, |state| state.markers.len() == 2).await;

    main.sheet().list().unwrap().accept(MarkerListIntent::ItemClicked(2));

    let mut model = main.model();
    let state = wait_for(&mut model, |state| state.selected_marker_id == Some(2)).await;
    assert_eq!(state.selected_marker().map(|m| m.title.as_str()), Some("Harbour"));

    let map_state = wait_for(&mut map, |state| state.selected_marker.is_some()).await;
    assert_eq!(map_state.selected_marker.unwrap().id, 2);
    let camera = wait_for(&mut map, |state| state.camera.is_some()).await.camera.unwrap();
    assert_eq!(camera.target, LatLng::new(59.95, 30.20));
    assert_eq!(camera.zoom, DEFAULT_ZOOM);

    assert_eq!(main.sheet().active_config(), SheetConfig::Details { marker_id: 2 });
}

#[tokio::test]
async fn map_marker_click_selects() {
    let harness = seeded();
    let (main, _) = open(&harness);
    let mut model = main.model();
    wait_for(&mut model, |state| state.markers.markers().len() == 2).await;

    main.map().accept(MapIntent::MarkerClicked(marker(1, "Bakery", 59.93, 30.31)));
    wait_for(&mut model, |state| state.selected_marker_id == Some(1)).await;
    wait_until(|| main.sheet().active_config() == SheetConfig::Details { marker_id: 1 }).await;
}

#[tokio::test]
async fn selecting_another_marker_swaps_details() {
    let harness = seeded();
    let (main, _) = open(&harness);
    let mut model = main.model();
    wait_for(&mut model, |state| state.markers.markers().len() == 2).await;

    main.accept(GeoMarkerIntent::SelectMarker(1));
    wait_until(|| main.sheet().active_config() == SheetConfig::Details { marker_id: 1 }).await;
    main.accept(GeoMarkerIntent::SelectMarker(2));
    wait_until(|| main.sheet().active_config() == SheetConfig::Details { marker_id: 2 }).await;
    assert_eq!(main.sheet().configs().len(), 2);
}

#[tokio::test]
async fn back_closes_details_and_clears_selection() {
    let harness = seeded();
    let (main, _) = open(&harness);
    main.accept(GeoMarkerIntent::SelectMarker(1));
    wait_until(|| main.sheet().active_config() == SheetConfig::Details { marker_id: 1 }).await;

    assert!(main.back());
    let mut model = main.model();
    wait_for(&mut model, |state| state.selected_marker_id.is_none()).await;
    let mut map = main.map().model();
    wait_for(&mut map, |state| state.selected_marker.is_none()).await;

    assert!(!main.back());
}

#[tokio::test]
async fn details_back_button_clears_selection() {
    let harness = seeded();
    let (main, _) = open(&harness);
    main.accept(GeoMarkerIntent::SelectMarker(1));
    wait_until(|| main.sheet().details().is_some()).await;

    main.sheet().details().unwrap().accept(MarkerDetailsIntent::BackClicked);
    let mut model = main.model();
    wait_for(&mut model, |state| state.selected_marker_id.is_none()).await;
    assert_eq!(main.sheet().active_config(), SheetConfig::List);
}

#[tokio::test]
async fn clear_selection_closes_details() {
    let harness = seeded();
    let (main, _) = open(&harness);
    main.accept(GeoMarkerIntent::SelectMarker(1));
    wait_until(|| main.sheet().details().is_some()).await;

    main.accept(GeoMarkerIntent::ClearSelection);
    wait_until(|| main.sheet().active_config() == SheetConfig::List).await;
}

#[tokio::test]
async fn add_and_edit_are_reported() {
    let harness = seeded();
    let (main, outputs) = open(&harness);
    main.accept(GeoMarkerIntent::AddMarkerClicked);
    assert_eq!(outputs.wait_len(1).await, vec![GeoMarkerOutput::AddMarker]);

    main.accept(GeoMarkerIntent::SelectMarker(2));
    wait_until(|| {
        main.sheet()
            .details_state()
            .is_some_and(|state| state.marker().is_some())
    })
    .await;
    main.sheet().details().unwrap().accept(MarkerDetailsIntent::EditClicked);
    let outputs = outputs.wait_len(2).await;
    assert_eq!(
        outputs[1],
        GeoMarkerOutput::EditMarker(marker(2, "Harbour", 59.95, 30.20))
    );
}

#[tokio::test]
async fn granted_permission_starts_tracking() {
    let harness = Harness::granted(Vec::new());
    let (main, _) = open(&harness);
    wait_until(|| harness.tracker.is_tracking()).await;

    harness.location.push_fix(LatLng::new(1.0, 2.0));
    let mut map = main.map().model();
    let state = wait_for(&mut map, |state| state.camera.is_some()).await;
    assert_eq!(state.camera.unwrap().target, LatLng::new(1.0, 2.0));
}

#[tokio::test]
async fn tracking_follows_permission_changes() {
    let harness = Harness::new();
    let (_main, _) = open(&harness);
    quiesce().await;
    assert!(!harness.tracker.is_tracking());

    harness.permissions.set(Permission::Location, true);
    wait_until(|| harness.tracker.is_tracking()).await;

    harness.permissions.set(Permission::Location, false);
    wait_until(|| !harness.tracker.is_tracking()).await;
}

#[tokio::test]
async fn deleted_selection_stays_selected_but_details_show_missing() {
    let harness = seeded();
    let (main, _) = open(&harness);
    main.accept(GeoMarkerIntent::SelectMarker(1));
    wait_until(|| main.sheet().details_state().is_some_and(|state| state.marker().is_some())).await;

    harness.markers.delete_marker(1).await.unwrap();

    let mut model = main.model();
    let state = wait_for(&mut model, |state| state.markers.markers().len() == 1).await;
    assert_eq!(state.selected_marker_id, Some(1));
    assert!(state.selected_marker().is_none());
    wait_until(|| {
        main.sheet()
            .details_state()
            .is_some_and(|state| state.marker().is_none())
    })
    .await;
}
