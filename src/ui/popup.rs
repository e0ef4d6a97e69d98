//! The marker popup: a close "X", the title and the description, pinned to
//! the popup overlay's map position.

use crate::{
    core::geo::Point,
    ui::style::PopupStyle,
    view::{MapView, PopupState},
};
use egui::{Align2, Painter, Pos2, Rect, Stroke, Vec2};

const CLOSE_SIZE: f32 = 16.0;
const LINE_GAP: f32 = 4.0;

fn text_width(style: &PopupStyle) -> f32 {
    style.width - 2.0 * style.padding - CLOSE_SIZE
}

/// Size the popup needs for `state` at the style's width
pub fn popup_size(painter: &Painter, state: &PopupState, style: &PopupStyle) -> Vec2 {
    let title = painter.layout(
        state.title.clone(),
        style.title_font.clone(),
        style.text_color,
        text_width(style),
    );
    let description = painter.layout(
        state.description.clone(),
        style.description_font.clone(),
        style.text_color,
        text_width(style),
    );
    let height = 2.0 * style.padding + title.size().y + LINE_GAP + description.size().y;
    Vec2::new(style.width, height.max(CLOSE_SIZE + 2.0 * style.padding))
}

/// Screen rectangle of the popup, or `None` while it is closed. `map_rect`
/// is the screen rectangle of the map container.
pub fn popup_rect(
    painter: &Painter,
    map_rect: Rect,
    view: &MapView,
    style: &PopupStyle,
) -> Option<Rect> {
    let overlay = view.popup_overlay()?;
    let size = popup_size(painter, view.popup(), style);
    let placement = overlay.placement(view.map().viewport(), (size.x as f64, size.y as f64))?;
    Some(Rect::from_min_size(to_screen(map_rect, placement.min), size))
}

/// The "X" in the popup's top-right corner
pub fn close_rect(popup_rect: Rect, style: &PopupStyle) -> Rect {
    Rect::from_min_size(
        Pos2::new(
            popup_rect.max.x - style.padding - CLOSE_SIZE,
            popup_rect.min.y + style.padding / 2.0,
        ),
        Vec2::splat(CLOSE_SIZE),
    )
}

pub fn paint_popup(
    painter: &Painter,
    rect: Rect,
    state: &PopupState,
    style: &PopupStyle,
    close_hovered: bool,
) {
    painter.rect_filled(rect, style.rounding, style.background_color);
    painter.rect_stroke(
        rect,
        style.rounding,
        Stroke::new(style.border_width, style.border_color),
    );

    let origin = rect.min + Vec2::splat(style.padding);
    let title = painter.layout(
        state.title.clone(),
        style.title_font.clone(),
        style.text_color,
        text_width(style),
    );
    let title_height = title.size().y;
    painter.galley(origin, title, style.text_color);

    let description = painter.layout(
        state.description.clone(),
        style.description_font.clone(),
        style.text_color,
        text_width(style),
    );
    painter.galley(
        origin + Vec2::new(0.0, title_height + LINE_GAP),
        description,
        style.text_color,
    );

    painter.text(
        close_rect(rect, style).center(),
        Align2::CENTER_CENTER,
        "X",
        style.title_font.clone(),
        if close_hovered {
            style.text_color
        } else {
            style.close_color
        },
    );
}

fn to_screen(map_rect: Rect, pixel: Point) -> Pos2 {
    map_rect.min + Vec2::new(pixel.x as f32, pixel.y as f32)
}
