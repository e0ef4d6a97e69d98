use campus_map::CampusMapApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Карта кампуса ДГТУ"),
        ..Default::default()
    };

    log::info!("starting campus map");
    eframe::run_native(
        "campus-map-app",
        options,
        Box::new(|cc| Box::new(CampusMapApp::new(cc))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run the campus map: {e}"))?;

    Ok(())
}
