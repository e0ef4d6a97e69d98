#![cfg(feature = "egui")]

use campus_map::{
    poi,
    prelude::*,
    ui::{style::MapStyle, widget::TileTextures},
};
use egui::{Context, Event, Pos2, RawInput, Rect, Vec2};

const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

fn input(events: Vec<Event>) -> RawInput {
    RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, SCREEN)),
        events,
        ..Default::default()
    }
}

fn press(pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: Default::default(),
    }
}

/// Runs one frame with the map filling the whole screen
fn map_frame(ctx: &Context, view: &mut MapView, textures: &mut TileTextures, events: Vec<Event>) {
    let style = MapStyle::default();
    let _ = ctx.run(input(events), |ctx| {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                ui.add(MapWidget::new(view, textures, &style));
            });
    });
}

/// Moves the pointer to `pos`, then presses and releases it over three frames
fn click(ctx: &Context, view: &mut MapView, textures: &mut TileTextures, pos: Pos2) {
    map_frame(ctx, view, textures, vec![Event::PointerMoved(pos)]);
    map_frame(ctx, view, textures, vec![press(pos, true)]);
    map_frame(ctx, view, textures, vec![press(pos, false)]);
}

fn mounted() -> MapView {
    MapView::mount(
        &MapConfig::offline(),
        Point::new(SCREEN.x as f64, SCREEN.y as f64),
    )
    .unwrap()
}

#[tokio::test]
async fn test_app_mounts_map_page_on_navigation() {
    let ctx = Context::default();
    let mut app = CampusMapApp::with_config(MapConfig::offline());

    let _ = ctx.run(input(vec![]), |ctx| app.show(ctx));
    assert!(app.map_page().is_none());

    assert!(app.navigate("/map"));
    let _ = ctx.run(input(vec![]), |ctx| app.show(ctx));
    let page = app.map_page().expect("map page mounted");
    assert_eq!(page.view().list().len(), 5);

    assert!(app.back());
    let _ = ctx.run(input(vec![]), |ctx| app.show(ctx));
    assert!(app.map_page().is_none());
    assert_eq!(app.router().current_route(), Some(Route::Landing));
}

#[tokio::test]
async fn test_unknown_route_mounts_nothing() {
    let ctx = Context::default();
    let mut app = CampusMapApp::with_config(MapConfig::offline()).with_initial_path("/about");

    let _ = ctx.run(input(vec![]), |ctx| app.show(ctx));
    assert!(app.map_page().is_none());
}

#[test]
fn test_widget_keeps_viewport_in_sync_with_container() {
    let ctx = Context::default();
    let mut view = MapView::mount(&MapConfig::offline(), Point::new(320.0, 240.0)).unwrap();
    let mut textures = TileTextures::new();

    map_frame(&ctx, &mut view, &mut textures, vec![]);

    let size = view.map().viewport().size;
    assert_eq!(size, Point::new(SCREEN.x as f64, SCREEN.y as f64));
    assert!(textures.is_empty());
}

#[test]
fn test_clicking_marker_in_widget_opens_popup() {
    let ctx = Context::default();
    let mut view = mounted();
    let mut textures = TileTextures::new();
    map_frame(&ctx, &mut view, &mut textures, vec![]);

    let poi = poi::find(2).unwrap();
    let anchor = view.map().viewport().projected_to_pixel(&poi.projected());
    let pos = Pos2::new(anchor.x as f32, anchor.y as f32 - 10.0);
    click(&ctx, &mut view, &mut textures, pos);

    assert!(view.popup_visible());
    assert_eq!(view.popup().title, "Спортивный манеж");
}

#[test]
fn test_zoom_in_button_does_not_click_through() {
    let ctx = Context::default();
    let mut view = mounted();
    let mut textures = TileTextures::new();
    map_frame(&ctx, &mut view, &mut textures, vec![]);
    let zoom = view.map().viewport().zoom;

    let style = MapStyle::default();
    let screen = Rect::from_min_size(Pos2::ZERO, SCREEN);
    let [zoom_in, _] = campus_map::ui::controls::zoom_button_rects(screen, &style.zoom_controls);
    click(&ctx, &mut view, &mut textures, zoom_in.center());

    assert!((view.map().viewport().zoom - (zoom + 1.0)).abs() < 1e-9);
    assert!(!view.popup_visible());
}
