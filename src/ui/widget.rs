use crate::{
    core::{
        bounds::Bounds,
        control::Control,
        geo::{Point, TileCoord},
    },
    input::{InputEvent, MouseButton},
    layers::{base::LayerTrait, tile::TileLayer},
    poi,
    prelude::{HashMap, HashSet},
    ui::{
        controls::{self, ZoomButtons},
        popup,
        style::MapStyle,
    },
    view::{MapView, BASE_LAYER_ID},
};
use egui::{
    Align2, Color32, ColorImage, Painter, Pos2, Rect, Response, Sense, Shape, Stroke, TextureId,
    Ui, Vec2, Widget,
};
use std::time::Duration;

/// Decoded tile textures, kept across frames
#[derive(Default)]
pub struct TileTextures {
    textures: HashMap<TileCoord, egui::TextureHandle>,
    undecodable: HashSet<TileCoord>,
}

impl TileTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Texture for `coord`, uploading `bytes` the first time
    pub fn get_or_load(
        &mut self,
        ctx: &egui::Context,
        coord: TileCoord,
        bytes: &[u8],
    ) -> Option<TextureId> {
        if let Some(texture) = self.textures.get(&coord) {
            return Some(texture.id());
        }
        if self.undecodable.contains(&coord) {
            return None;
        }

        let Some(image) = decode_image(bytes) else {
            log::warn!("tile {:?} is not a decodable image", coord);
            self.undecodable.insert(coord);
            return None;
        };
        let texture = ctx.load_texture(
            format!("tile_{}_{}_{}", coord.z, coord.x, coord.y),
            image,
            egui::TextureOptions::LINEAR,
        );
        let id = texture.id();
        self.textures.insert(coord, texture);
        Some(id)
    }

    /// Frees textures of other zoom levels
    pub fn retain_zoom(&mut self, zoom: u8) {
        self.textures.retain(|coord, _| coord.z == zoom);
        self.undecodable.retain(|coord| coord.z == zoom);
    }
}

fn decode_image(bytes: &[u8]) -> Option<ColorImage> {
    let img = image::load_from_memory(bytes).ok()?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Some(ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        rgba.as_raw(),
    ))
}

fn to_screen(rect: Rect, pixel: Point) -> Pos2 {
    rect.min + Vec2::new(pixel.x as f32, pixel.y as f32)
}

fn to_screen_rect(rect: Rect, bounds: &Bounds) -> Rect {
    Rect::from_min_max(to_screen(rect, bounds.min), to_screen(rect, bounds.max))
}

fn to_local(rect: Rect, pos: Pos2) -> Point {
    Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
}

/// The campus map surface: tiles, markers, popup and controls of a
/// [`MapView`], with pointer input forwarded to it.
///
/// ```no_run
/// # use campus_map::{ui::{style::MapStyle, widget::{MapWidget, TileTextures}}, MapView};
/// # fn show(ui: &mut egui::Ui, view: &mut MapView, textures: &mut TileTextures) {
/// ui.add(MapWidget::new(view, textures, &MapStyle::default()));
/// # }
/// ```
pub struct MapWidget<'a> {
    view: &'a mut MapView,
    textures: &'a mut TileTextures,
    style: &'a MapStyle,
    size: Option<Vec2>,
}

impl<'a> MapWidget<'a> {
    pub fn new(view: &'a mut MapView, textures: &'a mut TileTextures, style: &'a MapStyle) -> Self {
        Self {
            view,
            textures,
            style,
            size: None,
        }
    }

    /// Fixed size instead of all available space
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    fn zoom_delta(&self) -> Option<f64> {
        self.view.map().controls().iter().find_map(|control| match control {
            Control::Zoom { delta } => Some(*delta),
            _ => None,
        })
    }

    fn sync_size(&mut self, rect: Rect) {
        let size = Point::new(rect.width() as f64, rect.height() as f64);
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let current = self.view.map().viewport().size;
        if (current.x - size.x).abs() > 0.5 || (current.y - size.y).abs() > 0.5 {
            self.forward(InputEvent::Resize { size });
        }
    }

    fn forward(&mut self, event: InputEvent) {
        if let Err(e) = self.view.handle_input(event) {
            log::warn!("map input rejected: {}", e);
        }
    }

    /// Translates egui's pointer state into map input events. Clicks over
    /// `blocked` rectangles belong to the controls drawn there.
    fn handle_pointer(&mut self, ui: &Ui, rect: Rect, response: &Response, blocked: &[Rect]) {
        let over_control = |pos: Pos2| blocked.iter().any(|r| r.contains(pos));

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.forward(InputEvent::DragStart {
                    position: to_local(rect, pos),
                });
            }
        }
        if response.dragged() {
            let delta = response.drag_delta();
            if delta != Vec2::ZERO {
                self.forward(InputEvent::Drag {
                    delta: Point::new(delta.x as f64, delta.y as f64),
                });
            }
        }
        if response.drag_released() {
            self.forward(InputEvent::DragEnd);
        }

        if let Some(pos) = response.interact_pointer_pos().filter(|p| !over_control(*p)) {
            if response.double_clicked() {
                self.forward(InputEvent::DoubleClick {
                    position: to_local(rect, pos),
                });
            } else if response.clicked() {
                self.forward(InputEvent::Click {
                    position: to_local(rect, pos),
                    button: MouseButton::Left,
                });
            }
        }

        match response.hover_pos() {
            Some(pos) => {
                let position = to_local(rect, pos);
                self.forward(InputEvent::MouseMove { position });

                let scroll = ui.input(|i| i.raw_scroll_delta.y);
                if scroll.abs() > 0.1 {
                    self.forward(InputEvent::Scroll {
                        delta: scroll as f64,
                        position,
                    });
                }
            }
            None => {
                let tracking = self
                    .view
                    .map()
                    .mouse_position()
                    .and_then(|m| m.coordinate())
                    .is_some();
                if tracking {
                    self.forward(InputEvent::MouseLeave);
                }
            }
        }
    }

    /// Paints the base tiles. Returns whether downloads are still running.
    fn paint_tiles(&mut self, ctx: &egui::Context, painter: &Painter, rect: Rect) -> bool {
        let view = &*self.view;
        let Some(layer) = view
            .map()
            .get_layer(BASE_LAYER_ID)
            .and_then(|l| l.as_any().downcast_ref::<TileLayer>())
        else {
            return false;
        };
        if !layer.is_visible() {
            return false;
        }

        let viewport = view.map().viewport();
        self.textures.retain_zoom(layer.tile_zoom(viewport));
        let tint = Color32::WHITE.gamma_multiply(layer.opacity());
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));

        for (coord, bounds) in layer.visible_tiles(viewport) {
            let tile_rect = to_screen_rect(rect, &bounds);
            let texture = layer
                .tile_data(&coord)
                .and_then(|bytes| self.textures.get_or_load(ctx, coord, &bytes));
            match texture {
                Some(id) => {
                    painter.image(id, tile_rect, uv, tint);
                }
                None => {
                    painter.rect_filled(tile_rect.shrink(0.5), 0.0, self.style.placeholder_color);
                }
            }
        }
        layer.is_loading()
    }

    fn paint_markers(&self, painter: &Painter, rect: Rect) {
        let Some(markers) = self.view.marker_layer() else {
            return;
        };
        if !markers.is_visible() {
            return;
        }

        let viewport = self.view.map().viewport();
        let style = &self.style.markers;
        for feature in markers.features() {
            let Some(icon) = feature.style().map(|s| &s.image) else {
                continue;
            };
            let Some(kind) = poi::find(feature.id()).map(|p| p.icon) else {
                continue;
            };

            let anchor = viewport.projected_to_pixel(&feature.geometry());
            let icon_rect = to_screen_rect(rect, &icon.hit_rect(&anchor));
            if !rect.intersects(icon_rect) {
                continue;
            }

            let fill = style.fill_color(kind);
            let stroke = Stroke::new(style.border_width, style.border_color);
            let radius = icon_rect.width() / 2.0 - style.border_width;
            let head = Pos2::new(icon_rect.center().x, icon_rect.min.y + icon_rect.width() / 2.0);
            let tip = to_screen(rect, anchor);

            painter.add(Shape::convex_polygon(
                vec![
                    Pos2::new(head.x - radius * 0.6, head.y),
                    Pos2::new(head.x + radius * 0.6, head.y),
                    tip,
                ],
                fill,
                Stroke::NONE,
            ));
            painter.circle(head, radius, fill, stroke);
            painter.text(
                head,
                Align2::CENTER_CENTER,
                kind.glyph(),
                style.glyph_font.clone(),
                style.glyph_color,
            );
        }
    }
}

impl Widget for MapWidget<'_> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        let desired_size = self.size.unwrap_or_else(|| ui.available_size());
        let (rect, _) = ui.allocate_exact_size(desired_size, Sense::hover());
        self.sync_size(rect);
        let painter = ui.painter_at(rect);

        // Controls drawn over the map claim the pointer before the surface
        let zoom_delta = self.zoom_delta();
        let zoom_buttons = zoom_delta.map(|_| ZoomButtons::interact(ui, rect, &self.style.zoom_controls));
        let popup_rect = popup::popup_rect(&painter, rect, self.view, &self.style.popup);
        let close = popup_rect.map(|r| {
            let close_rect = popup::close_rect(r, &self.style.popup);
            ui.interact(close_rect, ui.id().with("popup_close"), Sense::click())
        });
        let mut blocked = Vec::new();
        if zoom_delta.is_some() {
            blocked.extend(controls::zoom_button_rects(rect, &self.style.zoom_controls));
        }
        blocked.extend(close.as_ref().map(|c| c.rect));
        let stops_events = self
            .view
            .popup_overlay()
            .map_or(false, |overlay| overlay.stop_event());
        if stops_events {
            blocked.extend(popup_rect);
        }

        // The surface only senses hover while the pointer rests on a control,
        // unless a pan is already under way
        let surface_id = ui.id().with("map_surface");
        let over_control = ui
            .input(|i| i.pointer.hover_pos())
            .map_or(false, |pos| blocked.iter().any(|r| r.contains(pos)));
        let panning = ui.ctx().memory(|mem| mem.is_being_dragged(surface_id));
        let sense = if over_control && !panning {
            Sense::hover()
        } else {
            Sense::click_and_drag()
        };
        let mut response = ui.interact(rect, surface_id, sense);

        let center_before = self.view.map().viewport().center;
        let zoom_before = self.view.map().viewport().zoom;

        if close.as_ref().map_or(false, Response::clicked) {
            self.view.close_popup();
        }
        if let (Some(buttons), Some(delta)) = (&zoom_buttons, zoom_delta) {
            if let Some(change) = buttons.requested_change(delta) {
                self.view.map_mut().zoom_to(zoom_before + change, None);
                self.view.process_events();
            }
        }
        self.handle_pointer(ui, rect, &response, &blocked);

        if let Err(e) = self.view.update() {
            log::warn!("map update failed: {}", e);
        }

        painter.rect_filled(rect, 0.0, self.style.background_color);
        let loading = self.paint_tiles(ui.ctx(), &painter, rect);
        self.paint_markers(&painter, rect);

        if let Some(popup_rect) = popup::popup_rect(&painter, rect, self.view, &self.style.popup) {
            let close_hovered = close.as_ref().map_or(false, Response::hovered);
            popup::paint_popup(
                &painter,
                popup_rect,
                self.view.popup(),
                &self.style.popup,
                close_hovered,
            );
        }
        if let Some(buttons) = &zoom_buttons {
            buttons.paint(&painter, &self.style.zoom_controls);
        }

        if let Some(text) = self.view.map().attribution() {
            controls::corner_text(ui, rect, Align2::RIGHT_BOTTOM, text, &self.style.attribution);
        }
        if let Some(mouse) = self.view.map().mouse_position() {
            controls::corner_text(
                ui,
                rect,
                Align2::RIGHT_TOP,
                &mouse.text(),
                &self.style.mouse_position,
            );
        }
        painter.rect_stroke(rect, 0.0, self.style.border_stroke);

        let viewport = self.view.map().viewport();
        if viewport.center != center_before || viewport.zoom != zoom_before {
            response.mark_changed();
        }
        if loading {
            ui.ctx().request_repaint_after(Duration::from_millis(100));
        }

        response
    }
}
