//! The two pages of the application.

use crate::{
    core::{config::MapConfig, control::ControlKind, geo::Point},
    router::Route,
    ui::{
        controls,
        style::MapStyle,
        widget::{MapWidget, TileTextures},
    },
    view::MapView,
    Result,
};
use egui::{CentralPanel, RichText, SidePanel, TopBottomPanel};

/// Start page with a link to the map
#[derive(Debug, Clone)]
pub struct LandingPage {
    pub title: String,
    pub blurb: String,
}

impl Default for LandingPage {
    fn default() -> Self {
        Self {
            title: "Карта кампуса ДГТУ".to_string(),
            blurb: "Парк, храм, спортивный манеж, общежитие и памятники \
                    Донского государственного технического университета."
                .to_string(),
        }
    }
}

impl LandingPage {
    /// Draws the page. Returns the route the user asked to open.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<Route> {
        let mut target = None;
        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.3);
                ui.heading(RichText::new(&self.title).size(28.0));
                ui.add_space(8.0);
                ui.label(self.blurb.as_str());
                ui.add_space(16.0);
                if ui.link(RichText::new("Открыть карту").size(18.0)).clicked() {
                    target = Some(Route::Map);
                }
            });
        });
        target
    }
}

/// The map with its object list. Owns the mounted [`MapView`].
pub struct MapPage {
    view: MapView,
    textures: TileTextures,
    style: MapStyle,
}

impl MapPage {
    pub fn mount(config: &MapConfig, size: Point) -> Result<Self> {
        Ok(Self {
            view: MapView::mount(config, size)?,
            textures: TileTextures::new(),
            style: MapStyle::default(),
        })
    }

    pub fn with_style(mut self, style: MapStyle) -> Self {
        self.style = style;
        self
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut MapView {
        &mut self.view
    }

    /// Draws the page. Returns the route the user asked to open.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<Route> {
        let mut target = None;

        TopBottomPanel::top("map_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.link("← На главную").clicked() {
                    target = Some(Route::Landing);
                }
                ui.separator();
                ui.strong("Объекты кампуса");
            });
        });

        let has_list = self
            .view
            .map()
            .controls()
            .iter()
            .any(|c| c.kind() == ControlKind::ObjectList);
        if has_list {
            SidePanel::right("object_list")
                .exact_width(self.style.list.width)
                .resizable(false)
                .show(ctx, |ui| {
                    let items = self.view.list();
                    if let Some(poi) = controls::object_list(ui, items, &self.style.list) {
                        self.view.on_list_item_click(poi);
                    }
                });
        }

        CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                ui.add(MapWidget::new(&mut self.view, &mut self.textures, &self.style));
            });

        target
    }
}
