use asciiquarium_tides::{
    Aquarium, AquariumConfig, AquariumTheme, AquariumWidget, CancelToken, SceneSurface,
};
use eframe::egui;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Asciiquarium tides",
        native_options,
        Box::new(|_cc| Box::new(TankApp::default())),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}

#[derive(Default)]
struct TankApp {
    aquarium: Option<Aquarium<SceneSurface>>,
    cancel: Option<CancelToken>,
    theme: AquariumTheme,
}

impl TankApp {
    /// The tank is sized to the panel on the first frame and never resized.
    fn ensure_aquarium(&mut self, size: egui::Vec2, now_ms: f64) -> &mut Aquarium<SceneSurface> {
        let cancel = &mut self.cancel;
        self.aquarium.get_or_insert_with(|| {
            let surface = SceneSurface::new(size.x, size.y);
            let mut aquarium = Aquarium::new(surface, AquariumConfig::default());
            aquarium.start(now_ms);
            *cancel = Some(aquarium.cancel_token());
            aquarium
        })
    }
}

impl eframe::App for TankApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now_ms = ctx.input(|i| i.time) * 1000.0;

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let size = ui.available_size();
                let theme = self.theme.clone();
                let aquarium = self.ensure_aquarium(size, now_ms);
                aquarium.advance(now_ms);
                ui.add(AquariumWidget::new(aquarium.surface(), &theme));
            });

        // Keep the display refresh callback coming, like requestAnimationFrame.
        if !self.cancel.as_ref().is_some_and(|c| c.is_cancelled()) {
            ctx.request_repaint();
        }
    }
}

impl Drop for TankApp {
    fn drop(&mut self) {
        if let Some(aquarium) = self.aquarium.as_mut() {
            aquarium.stop();
        }
    }
}
