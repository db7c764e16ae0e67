mod common;

use std::sync::Arc;

use common::*;
use geomarker::domain::{CameraPosition, LatLng, DEFAULT_ZOOM};
use geomarker::ui::editor::{EditorIntent, EditorMode};
use geomarker::ui::geomarker::GeoMarkerIntent;
use geomarker::ui::marker_details::MarkerDetailsIntent;
use geomarker::ui::navigation::NavigationError;
use geomarker::ui::root::{EditorTarget, RootChild, RootComponent, RootConfig};
use geomarker::ui::sheet::SheetConfig;

fn on_editor(root: &RootComponent, intent: EditorIntent) {
    root.with_active(|child| match child {
        RootChild::Editor(editor) => editor.accept(intent),
        RootChild::GeoMarkers(_) => panic!("editor is not active"),
    });
}

fn on_main(root: &RootComponent, intent: GeoMarkerIntent) {
    root.with_active(|child| match child {
        RootChild::GeoMarkers(main) => main.accept(intent),
        RootChild::Editor(_) => panic!("main screen is not active"),
    });
}

async fn wait_for_depth(root: &RootComponent, depth: usize) {
    let mut configs = root.watch_configs();
    wait_for(&mut configs, |configs| configs.len() == depth).await;
}

#[tokio::test]
async fn starts_on_main_screen() {
    let harness = Harness::new();
    let root = RootComponent::new(Arc::clone(&harness.deps));
    assert_eq!(root.configs(), vec![RootConfig::GeoMarkers]);
    assert!(!root.back());
}

#[tokio::test]
async fn add_then_save_returns_to_main() {
    let harness = Harness::new();
    let root = RootComponent::new(Arc::clone(&harness.deps));

    on_main(&root, GeoMarkerIntent::AddMarkerClicked);
    wait_for_depth(&root, 2).await;
    assert_eq!(root.active_config(), RootConfig::Editor(EditorTarget::Add));

    on_editor(&root, EditorIntent::TitleChanged("Bakery".into()));
    on_editor(
        &root,
        EditorIntent::LocationChanged(CameraPosition::centered(LatLng::new(1.0, 2.0), DEFAULT_ZOOM)),
    );
    on_editor(&root, EditorIntent::SaveClicked);

    wait_for_depth(&root, 1).await;
    assert_eq!(root.active_config(), RootConfig::GeoMarkers);
    assert_eq!(harness.markers.snapshot().len(), 1);

    // The main screen sees the new marker.
    let mut model = root.with_active(|child| match child {
        RootChild::GeoMarkers(main) => main.model(),
        RootChild::Editor(_) => panic!("main screen is not active"),
    });
    wait_for(&mut model, |state| state.markers.markers().len() == 1).await;
}

#[tokio::test]
async fn invalid_save_stays_in_editor() {
    let harness = Harness::new();
    let root = RootComponent::new(Arc::clone(&harness.deps));
    on_main(&root, GeoMarkerIntent::AddMarkerClicked);
    wait_for_depth(&root, 2).await;

    on_editor(&root, EditorIntent::SaveClicked);
    quiesce().await;
    assert_eq!(root.configs().len(), 2);
    assert_eq!(harness.markers.save_calls(), 0);
}

#[tokio::test]
async fn edit_from_details_then_delete() {
    let harness = Harness::with_markers(vec![marker(1, "Harbour", 10.0, 20.0)]);
    let root = RootComponent::new(Arc::clone(&harness.deps));

    on_main(&root, GeoMarkerIntent::SelectMarker(1));
    wait_until(|| {
        root.with_active(|child| match child {
            RootChild::GeoMarkers(main) => main
                .sheet()
                .details_state()
                .is_some_and(|state| state.marker().is_some()),
            RootChild::Editor(_) => false,
        })
    })
    .await;
    root.with_active(|child| {
        if let RootChild::GeoMarkers(main) = child {
            main.sheet()
                .details()
                .unwrap()
                .accept(MarkerDetailsIntent::EditClicked);
        }
    });

    wait_for_depth(&root, 2).await;
    assert_eq!(
        root.active_config(),
        RootConfig::Editor(EditorTarget::Edit(marker(1, "Harbour", 10.0, 20.0)))
    );
    let mode = root.with_active(|child| match child {
        RootChild::Editor(editor) => editor.state().mode,
        RootChild::GeoMarkers(_) => panic!("editor is not active"),
    });
    assert_eq!(mode, EditorMode::Edit);

    on_editor(&root, EditorIntent::DeleteClicked);
    wait_for_depth(&root, 1).await;
    assert!(harness.markers.snapshot().is_empty());

    // The sheet still points at the deleted marker, so back closes it first.
    root.with_active(|child| {
        if let RootChild::GeoMarkers(main) = child {
            assert_eq!(main.sheet().active_config(), SheetConfig::Details { marker_id: 1 });
        }
    });
    assert!(root.back());
    assert!(!root.back());
}

#[tokio::test]
async fn editor_back_pops() {
    let harness = Harness::new();
    let root = RootComponent::new(Arc::clone(&harness.deps));
    on_main(&root, GeoMarkerIntent::AddMarkerClicked);
    wait_for_depth(&root, 2).await;

    on_editor(&root, EditorIntent::BackClicked);
    wait_for_depth(&root, 1).await;
    assert_eq!(root.active_config(), RootConfig::GeoMarkers);
}

#[tokio::test]
async fn system_back_dismisses_picker_before_leaving_editor() {
    let harness = Harness::new();
    let root = RootComponent::new(Arc::clone(&harness.deps));
    on_main(&root, GeoMarkerIntent::AddMarkerClicked);
    wait_for_depth(&root, 2).await;

    on_editor(&root, EditorIntent::AddImagesClicked);
    let picker_open = || {
        root.with_active(|child| match child {
            RootChild::Editor(editor) => editor.state().show_image_picker,
            RootChild::GeoMarkers(_) => false,
        })
    };
    wait_until(picker_open).await;

    assert!(root.back());
    wait_until(|| !picker_open()).await;
    assert_eq!(root.configs().len(), 2);

    assert!(root.back());
    assert_eq!(root.configs(), vec![RootConfig::GeoMarkers]);
}

#[tokio::test]
async fn add_request_while_editing_is_ignored() {
    let harness = Harness::new();
    let root = RootComponent::new(Arc::clone(&harness.deps));
    on_main(&root, GeoMarkerIntent::AddMarkerClicked);
    on_main(&root, GeoMarkerIntent::AddMarkerClicked);
    wait_for_depth(&root, 2).await;
    quiesce().await;
    assert_eq!(root.configs().len(), 2);
}

#[tokio::test]
async fn navigation_survives_save_and_restore() {
    let harness = Harness::with_markers(vec![marker(1, "Harbour", 10.0, 20.0)]);
    let saved = {
        let root = RootComponent::new(Arc::clone(&harness.deps));
        on_main(&root, GeoMarkerIntent::AddMarkerClicked);
        wait_for_depth(&root, 2).await;
        root.save_state().unwrap()
    };

    let restored = RootComponent::restore(Arc::clone(&harness.deps), &saved).unwrap();
    assert_eq!(
        restored.configs(),
        vec![RootConfig::GeoMarkers, RootConfig::Editor(EditorTarget::Add)]
    );

    // The restored editor is live and routes back to main.
    on_editor(&restored, EditorIntent::BackClicked);
    wait_for_depth(&restored, 1).await;
}

#[tokio::test]
async fn restoring_garbage_fails() {
    let harness = Harness::new();
    assert!(matches!(
        RootComponent::restore(Arc::clone(&harness.deps), "not json"),
        Err(NavigationError::Decode(_))
    ));
    assert!(matches!(
        RootComponent::restore(Arc::clone(&harness.deps), "[]"),
        Err(NavigationError::Empty)
    ));
}
