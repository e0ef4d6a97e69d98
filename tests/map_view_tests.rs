use campus_map::{
    core::constants::POPUP_OVERLAY_ID,
    poi,
    prelude::*,
};

/// Mounted view on an 800x600 container, without network tiles
fn mounted_view() -> MapView {
    MapView::mount(&MapConfig::offline(), Point::new(800.0, 600.0)).unwrap()
}

/// A pixel inside the marker icon of `poi`, which hangs above its anchor
fn marker_pixel(view: &MapView, poi: &PointOfInterest) -> Point {
    let anchor = view.map().viewport().projected_to_pixel(&poi.projected());
    Point::new(anchor.x, anchor.y - 10.0)
}

fn assert_close(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
        "{:?} != {:?}",
        a,
        b
    );
}

#[test]
fn test_one_marker_per_point_at_its_coordinate() {
    let view = mounted_view();
    let markers = view.marker_layer().unwrap();
    assert_eq!(markers.len(), poi::registry().len());

    for poi in poi::registry() {
        let marker = markers.feature(poi.id).unwrap();
        let back = marker.lat_lng().to_lon_lat();
        assert!((back[0] - poi.coordinate[0]).abs() < 1e-9);
        assert!((back[1] - poi.coordinate[1]).abs() < 1e-9);
        assert_eq!(marker.get_str("name"), Some(poi.name));
    }
}

#[test]
fn test_marker_click_opens_matching_popup() {
    for poi in poi::registry() {
        let mut view = mounted_view();
        let pixel = marker_pixel(&view, poi);

        assert_eq!(view.on_map_click(pixel), Some(poi.id));
        assert_eq!(view.popup().title, poi.name);
        assert_eq!(view.popup().description, poi.description);
        assert_close(view.popup_position().unwrap(), poi.projected());
    }
}

#[test]
fn test_click_below_anchor_misses_marker() {
    let mut view = mounted_view();
    let poi = poi::find(3).unwrap();
    let anchor = view.map().viewport().projected_to_pixel(&poi.projected());

    // The icon's base sits on the anchor, so well below it is empty map
    assert_eq!(view.on_map_click(Point::new(anchor.x, anchor.y + 15.0)), None);
    assert!(!view.popup_visible());
}

#[test]
fn test_empty_click_closes_popup_but_keeps_text() {
    let mut view = mounted_view();
    let poi = poi::find(1).unwrap();
    let pixel = marker_pixel(&view, poi);
    view.on_map_click(pixel);
    assert!(view.popup_visible());

    assert_eq!(view.on_map_click(Point::new(20.0, 20.0)), None);
    assert!(!view.popup_visible());
    assert!(view.map().overlay(POPUP_OVERLAY_ID).is_none());
    assert_eq!(view.popup().title, poi.name);
    assert_eq!(view.popup().description, poi.description);
}

#[test]
fn test_list_click_on_sports_hall() {
    let mut view = mounted_view();
    let poi = poi::find(2).unwrap();

    view.on_list_item_click(poi);

    assert_eq!(view.popup().title, "Спортивный манеж");
    assert_eq!(view.popup().description, "Легко-атлетический манеж ДГТУ");
    let expected = LatLng::from_lon_lat([39.70892, 47.24088]).to_mercator();
    assert_close(view.map().viewport().projected_center(), expected);
    assert_close(view.popup_position().unwrap(), expected);
}

#[test]
fn test_list_click_matches_marker_click() {
    let poi = poi::find(4).unwrap();

    let mut by_marker = mounted_view();
    let pixel = marker_pixel(&by_marker, poi);
    by_marker.on_map_click(pixel);

    let mut by_list = mounted_view();
    by_list.on_list_item_click(poi);

    assert_eq!(by_marker.popup(), by_list.popup());
    assert_close(
        by_marker.popup_position().unwrap(),
        by_list.popup_position().unwrap(),
    );
}

#[test]
fn test_close_unsets_overlay_position() {
    let mut view = mounted_view();
    view.on_list_item_click(poi::find(0).unwrap());
    assert!(view.popup_position().is_some());

    view.close_popup();
    assert_eq!(view.popup_position(), None);

    // Reopening reuses the detached overlay
    view.on_list_item_click(poi::find(3).unwrap());
    assert_eq!(view.map().overlays().len(), 1);
    assert_eq!(view.popup().title, "Общежитие ДГТУ");
}

#[test]
fn test_click_input_goes_through_event_queue() {
    let mut view = mounted_view();
    let poi = poi::find(0).unwrap();
    let pixel = marker_pixel(&view, poi);

    let events = view
        .handle_input(InputEvent::Click {
            position: pixel,
            button: MouseButton::Left,
        })
        .unwrap();

    assert!(events
        .iter()
        .any(|e| matches!(e, MapEvent::Click { pixel: p, .. } if *p == pixel)));
    assert_eq!(view.popup().title, poi.name);

    // Attaching the popup is reported on the next drain
    let later = view.process_events();
    assert!(later
        .iter()
        .any(|e| matches!(e, MapEvent::OverlayAdd { overlay_id } if overlay_id == POPUP_OVERLAY_ID)));
}

#[test]
fn test_pointer_updates_mouse_position_readout() {
    let mut view = mounted_view();
    let undefined = view.map().mouse_position().unwrap().text();

    view.handle_input(InputEvent::MouseMove {
        position: Point::new(400.0, 300.0),
    })
    .unwrap();
    let text = view.map().mouse_position().unwrap().text();
    assert_ne!(text, undefined);
    assert!(text.starts_with("39.71"));

    view.handle_input(InputEvent::MouseLeave).unwrap();
    assert_eq!(view.map().mouse_position().unwrap().text(), undefined);
}

#[test]
fn test_readout_follows_drained_pointer_events() {
    let mut view = mounted_view();
    let undefined = view.map().mouse_position().unwrap().text();

    // queued but not yet drained: the read-out has not moved
    view.map_mut()
        .handle_input(InputEvent::MouseMove {
            position: Point::new(400.0, 300.0),
        })
        .unwrap();
    assert_eq!(view.map().mouse_position().unwrap().text(), undefined);

    view.handle_event(&MapEvent::PointerMove {
        lat_lng: Some(LatLng::new(47.24, 39.70892)),
        pixel: None,
    });
    assert_eq!(view.map().mouse_position().unwrap().text(), "39.7089, 47.2400");
}

#[tokio::test]
async fn test_drag_pans_without_clicking() {
    let mut view = mounted_view();
    let before = view.map().viewport().projected_center();

    view.handle_input(InputEvent::DragStart {
        position: Point::new(400.0, 300.0),
    })
    .unwrap();
    view.handle_input(InputEvent::Drag {
        delta: Point::new(50.0, 0.0),
    })
    .unwrap();
    view.handle_input(InputEvent::DragEnd).unwrap();

    let after = view.map().viewport().projected_center();
    assert!(after.x < before.x);
    assert!((after.y - before.y).abs() < 1e-6);
    assert!(!view.popup_visible());
}
