use crate::{
    core::{config::MapConfig, geo::Point},
    router::{Route, Router},
    ui::pages::{LandingPage, MapPage},
};
use egui::CentralPanel;

/// The application shell: a router in front of the landing and map pages.
///
/// The map page is mounted when `/map` is entered and dropped when it is left.
pub struct CampusMapApp {
    router: Router,
    config: MapConfig,
    landing: LandingPage,
    map_page: Option<MapPage>,
    mount_error: Option<String>,
}

impl CampusMapApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_config(MapConfig::default())
    }

    pub fn with_config(config: MapConfig) -> Self {
        Self {
            router: Router::default(),
            config,
            landing: LandingPage::default(),
            map_page: None,
            mount_error: None,
        }
    }

    /// Starts at `path` instead of `/`
    pub fn with_initial_path(mut self, path: impl Into<String>) -> Self {
        self.router = Router::new(path);
        self
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn map_page(&self) -> Option<&MapPage> {
        self.map_page.as_ref()
    }

    pub fn map_page_mut(&mut self) -> Option<&mut MapPage> {
        self.map_page.as_mut()
    }

    pub fn navigate(&mut self, path: impl Into<String>) -> bool {
        self.router.navigate(path)
    }

    pub fn back(&mut self) -> bool {
        self.router.back()
    }

    fn sync_pages(&mut self, ctx: &egui::Context) {
        let on_map = self.router.current_route() == Some(Route::Map);
        if !on_map {
            self.map_page = None;
            self.mount_error = None;
            return;
        }
        if self.map_page.is_some() || self.mount_error.is_some() {
            return;
        }

        let screen = ctx.screen_rect();
        let size = Point::new(screen.width().max(1.0) as f64, screen.height().max(1.0) as f64);
        match MapPage::mount(&self.config, size) {
            Ok(page) => self.map_page = Some(page),
            Err(e) => {
                log::error!("failed to mount the map page: {}", e);
                self.mount_error = Some(e.to_string());
            }
        }
    }

    /// Draws the current page
    pub fn show(&mut self, ctx: &egui::Context) {
        self.sync_pages(ctx);

        let target = match self.router.current_route() {
            Some(Route::Landing) => self.landing.show(ctx),
            Some(Route::Map) => match (&mut self.map_page, &self.mount_error) {
                (Some(page), _) => page.show(ctx),
                (None, error) => {
                    let message = error.as_deref().unwrap_or_default().to_string();
                    CentralPanel::default().show(ctx, |ui| {
                        ui.colored_label(egui::Color32::RED, message);
                    });
                    None
                }
            },
            None => {
                CentralPanel::default().show(ctx, |_| {});
                None
            }
        };

        if let Some(route) = target {
            if self.router.navigate(route.path()) {
                ctx.request_repaint();
            }
        }
    }
}

impl eframe::App for CampusMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}
