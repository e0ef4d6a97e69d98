//! Drawing for the map controls and the object list panel.

use crate::{
    poi::PointOfInterest,
    ui::style::{AttributionStyle, ListStyle, ZoomControlStyle},
};
use egui::{Align2, Painter, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};

/// Screen rectangles of the zoom-in and zoom-out buttons
pub fn zoom_button_rects(map_rect: Rect, style: &ZoomControlStyle) -> [Rect; 2] {
    let size = Vec2::splat(style.button_size);
    let zoom_in = Rect::from_min_size(map_rect.min + Vec2::splat(style.margin), size);
    let zoom_out = zoom_in.translate(Vec2::new(0.0, style.button_size + 1.0));
    [zoom_in, zoom_out]
}

/// Interaction state of the zoom-in and zoom-out buttons for one frame
pub struct ZoomButtons {
    zoom_in: Response,
    zoom_out: Response,
}

impl ZoomButtons {
    /// Registers the buttons with egui. Must run before the map surface
    /// claims the pointer.
    pub fn interact(ui: &Ui, map_rect: Rect, style: &ZoomControlStyle) -> Self {
        let [zoom_in, zoom_out] = zoom_button_rects(map_rect, style);
        Self {
            zoom_in: ui.interact(zoom_in, ui.id().with("zoom_in"), Sense::click()),
            zoom_out: ui.interact(zoom_out, ui.id().with("zoom_out"), Sense::click()),
        }
    }

    /// Signed zoom change requested this frame
    pub fn requested_change(&self, delta: f64) -> Option<f64> {
        if self.zoom_in.clicked() {
            Some(delta)
        } else if self.zoom_out.clicked() {
            Some(-delta)
        } else {
            None
        }
    }

    pub fn paint(&self, painter: &Painter, style: &ZoomControlStyle) {
        for (response, label) in [(&self.zoom_in, "+"), (&self.zoom_out, "−")] {
            let rect = response.rect;
            let fill = if response.hovered() {
                style.hover_color
            } else {
                style.background_color
            };
            painter.rect_filled(rect, style.rounding, fill);
            painter.rect_stroke(rect, style.rounding, style.border_stroke);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                label,
                egui::FontId::proportional(style.button_size * 0.7),
                style.text_color,
            );
        }
    }
}

/// Draws `text` on a translucent plate in a corner of the map. Returns the
/// plate's rectangle.
pub fn corner_text(
    ui: &Ui,
    map_rect: Rect,
    anchor: Align2,
    text: &str,
    style: &AttributionStyle,
) -> Option<Rect> {
    if text.trim().is_empty() {
        return None;
    }
    let painter = ui.painter_at(map_rect);
    let galley = painter.layout_no_wrap(text.to_string(), style.font_id.clone(), style.text_color);
    let plate_size = galley.size() + Vec2::splat(2.0 * style.padding);

    let inner = map_rect.shrink(style.margin);
    let corner = Pos2::new(
        if anchor.x() == egui::Align::Max {
            inner.max.x
        } else {
            inner.min.x
        },
        if anchor.y() == egui::Align::Max {
            inner.max.y
        } else {
            inner.min.y
        },
    );
    let plate = anchor.anchor_rect(Rect::from_min_size(corner, plate_size));

    painter.rect_filled(plate, 2.0, style.background_color);
    painter.galley(plate.min + Vec2::splat(style.padding), galley, style.text_color);
    Some(plate)
}

/// Lists the points of interest. Returns the entry clicked this frame.
pub fn object_list(
    ui: &mut Ui,
    items: &'static [PointOfInterest],
    style: &ListStyle,
) -> Option<&'static PointOfInterest> {
    let mut clicked = None;
    egui::ScrollArea::vertical().show(ui, |ui| {
        for poi in items {
            let response = ui
                .scope(|ui| {
                    ui.label(egui::RichText::new(poi.name).strong().color(style.title_color));
                    ui.label(egui::RichText::new(poi.description).small().color(style.description_color));
                })
                .response
                .interact(Sense::click());
            if response.hovered() {
                ui.painter().rect_stroke(
                    response.rect.expand(2.0),
                    2.0,
                    Stroke::new(1.0, style.description_color),
                );
            }
            if response.clicked() {
                clicked = Some(poi);
            }
            ui.separator();
        }
    });
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_buttons_stack_in_top_left_corner() {
        let style = ZoomControlStyle::default();
        let map_rect = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(400.0, 300.0));
        let [zoom_in, zoom_out] = zoom_button_rects(map_rect, &style);

        assert_eq!(zoom_in.min, Pos2::new(108.0, 58.0));
        assert!(zoom_out.min.y > zoom_in.max.y);
        assert_eq!(zoom_out.min.x, zoom_in.min.x);
        assert!(map_rect.contains_rect(zoom_out));
    }
}
