/*!
The aquarium: scenery, entities, sky cycle and the two periodic tasks that move them.

Construction populates the surface in a fixed order (sand, sky, fish, bubbles,
seaweed, waves). The host then calls [`Aquarium::advance`] from its display
refresh callback with the current time in milliseconds. That single call runs
whatever sky steps are due and, when the driver allows it, one entity update pass.

An entity whose element cannot be created is skipped with a warning; the rest
of the tank carries on without it.
*/

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::assets::{fish_arts, FishArt};
use crate::color::sand_band;
use crate::config::{
    AquariumConfig, FISH_BATCH, SAND_BANDS, SAND_BAND_HEIGHT, SKY_MAX_CATCH_UP, WAVE_LAYERS,
};
use crate::driver::{AnimationDriver, CancelToken, DriverState, IntervalTimer, Poll};
use crate::entity::{bubble, fish, seaweed, wave, DepthPalette, Entity, TickContext};
use crate::environment::{Environment, SkyCycle, SkyFrame};
use crate::error::RenderError;
use crate::registry::Registry;
use crate::surface::{Anchor, DisplaySurface, ElementClass, ElementId, ElementSpec, Point};

/// What one call to [`Aquarium::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub sky_steps: u32,
    pub ticked: bool,
}

pub struct Aquarium<S: DisplaySurface> {
    surface: S,
    config: AquariumConfig,
    registry: Registry,
    environment: Environment,
    sky: SkyCycle,
    sky_elements: Vec<ElementId>,
    sky_timer: IntervalTimer,
    driver: AnimationDriver,
    cancel: CancelToken,
    depth_palette: DepthPalette,
    rng: StdRng,
    skipped: usize,
}

impl<S: DisplaySurface> Aquarium<S> {
    /// Build the full tank with the bundled fish art.
    pub fn new(surface: S, config: AquariumConfig) -> Self {
        Self::with_arts(surface, config, &fish_arts())
    }

    /// Build the full tank, picking fish art from `arts`.
    pub fn with_arts(surface: S, config: AquariumConfig, arts: &[FishArt]) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sky = SkyCycle::default();
        let environment = Environment::new(sky.current());
        let mut aquarium = Self {
            surface,
            registry: Registry::default(),
            environment,
            sky,
            sky_elements: Vec::new(),
            sky_timer: IntervalTimer::new(config.sky_step_ms(), SKY_MAX_CATCH_UP),
            driver: AnimationDriver::new(config.frame_interval_ms()),
            cancel: CancelToken::new(),
            depth_palette: DepthPalette::default(),
            rng,
            skipped: 0,
            config,
        };
        aquarium.build_scenery();
        aquarium.populate(arts);
        debug!(
            fish = aquarium.registry.fish.len(),
            bubbles = aquarium.registry.bubbles.len(),
            seaweed = aquarium.registry.seaweed.len(),
            waves = aquarium.registry.waves.len(),
            skipped = aquarium.skipped,
            "aquarium populated"
        );
        aquarium
    }

    fn build_scenery(&mut self) {
        for i in 0..SAND_BANDS {
            let spec = ElementSpec::band(
                ElementClass::Sand,
                SAND_BAND_HEIGHT,
                sand_band(i),
                Point::new(0.0, i as f32 * SAND_BAND_HEIGHT),
            )
            .anchored(Anchor::BottomLeft);
            if let Err(e) = self.surface.create_element(spec) {
                warn!(error = %e, band = i, "sand band not created");
            }
        }

        let frame = self.environment.sky;
        for (i, top) in frame.band_tops.iter().enumerate() {
            let spec = ElementSpec::band(
                ElementClass::Sky,
                frame.band_height,
                frame.color,
                Point::new(0.0, *top),
            );
            match self.surface.create_element(spec) {
                Ok(id) => self.sky_elements.push(id),
                Err(e) => warn!(error = %e, band = i, "sky band not created"),
            }
        }
    }

    fn populate(&mut self, arts: &[FishArt]) {
        let fish_count = self
            .config
            .fish_count
            .unwrap_or_else(|| FISH_BATCH * self.rng.gen_range(1..=2));
        for _ in 0..fish_count {
            let made = fish::spawn_fish(&mut self.surface, &mut self.rng, arts);
            self.admit(made);
        }
        for _ in 0..self.config.bubble_count {
            let made =
                bubble::spawn_bubble(&mut self.surface, &mut self.rng, &mut self.depth_palette);
            self.admit(made);
        }
        for _ in 0..self.config.seaweed_count {
            let made = seaweed::spawn_seaweed(&mut self.surface, &mut self.rng);
            self.admit(made);
        }
        for (layer, (y, density)) in WAVE_LAYERS.iter().enumerate() {
            let made = wave::new_wave(&mut self.surface, layer, *y, *density);
            self.admit(made);
        }
    }

    fn admit(&mut self, made: Result<Entity, RenderError>) {
        match made {
            Ok(entity) => self.registry.insert(entity),
            Err(e) => {
                self.skipped += 1;
                warn!(error = %e, "entity skipped");
            }
        }
    }

    /// Start both periodic tasks. Only the first call has an effect.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.cancel.is_cancelled() || !self.driver.start() {
            return false;
        }
        self.sky_timer.arm(now_ms);
        info!(
            entities = self.registry.len(),
            interval_ms = self.driver.interval_ms(),
            "aquarium started"
        );
        true
    }

    /// Stop both periodic tasks for good.
    pub fn stop(&mut self) {
        self.cancel.cancel();
        self.halt();
    }

    fn halt(&mut self) {
        if self.driver.state() == DriverState::Stopped {
            return;
        }
        self.driver.stop();
        self.sky_timer.disarm();
        info!(ticks = self.driver.ticks(), "aquarium stopped");
    }

    /// Token that stops this aquarium when cancelled from anywhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run everything due at `now_ms`: pending sky steps first, then at most
    /// one entity update pass.
    pub fn advance(&mut self, now_ms: f64) -> FrameReport {
        if self.cancel.is_cancelled() {
            self.halt();
            return FrameReport::default();
        }

        let sky_steps = self.sky_timer.take_due(now_ms);
        for _ in 0..sky_steps {
            let frame = self.sky.advance();
            self.apply_sky(frame);
        }

        let ticked = match self.driver.poll(now_ms) {
            Poll::Tick => {
                self.tick(now_ms);
                true
            }
            Poll::Throttled | Poll::Halted => false,
        };
        FrameReport { sky_steps, ticked }
    }

    fn apply_sky(&mut self, frame: SkyFrame) {
        self.environment.sky = frame;
        for (id, top) in self.sky_elements.iter().zip(frame.band_tops) {
            self.surface.set_color(*id, frame.color);
            self.surface.set_band(*id, frame.band_height);
            self.surface.set_position(*id, Point::new(0.0, top));
        }
        self.registry
            .align_waves(frame.sea_level, &mut self.surface);
    }

    fn tick(&mut self, now_ms: f64) {
        let viewport = self.surface.viewport();
        let mut ctx = TickContext {
            now_ms,
            viewport,
            sea_level: self.environment.sea_level(),
            rng: &mut self.rng,
            surface: &mut self.surface,
            depth_palette: &mut self.depth_palette,
        };
        self.registry.step_all(&mut ctx);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn sky(&self) -> &SkyCycle {
        &self.sky
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn depth_palette(&self) -> &DepthPalette {
        &self.depth_palette
    }

    /// Entities whose element could not be created.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Entities currently outside the viewport.
    pub fn off_screen(&self) -> usize {
        let viewport = self.surface.viewport();
        self.registry.off_screen_count(&viewport, &self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::SKY_PALETTE;
    use crate::surface::Shape;
    use crate::widgets::{render_scene_to_string, SceneSurface};

    fn config() -> AquariumConfig {
        AquariumConfig {
            target_fps: 50.0,
            fish_count: Some(6),
            bubble_count: 8,
            seaweed_count: 4,
            seed: Some(42),
        }
    }

    fn tank() -> Aquarium<SceneSurface> {
        Aquarium::new(SceneSurface::new(480.0, 400.0), config())
    }

    #[test]
    fn populates_in_fixed_order() {
        let a = tank();
        let reg = a.registry();
        assert_eq!(reg.fish.len(), 6);
        assert_eq!(reg.bubbles.len(), 8);
        assert_eq!(reg.seaweed.len(), 4);
        assert_eq!(reg.waves.len(), 3);
        assert_eq!(a.skipped(), 0);

        let classes: Vec<ElementClass> = a.surface().elements().iter().map(|e| e.class).collect();
        assert_eq!(classes.len(), 8 + 4 + 6 + 8 + 4 + 3);
        assert!(classes[..8].iter().all(|c| *c == ElementClass::Sand));
        assert!(classes[8..12].iter().all(|c| *c == ElementClass::Sky));
        let waves: Vec<f32> = reg.waves.iter().map(|w| w.body.position.y).collect();
        assert_eq!(waves, vec![70.0, 80.0, 90.0]);
    }

    #[test]
    fn default_fish_count_is_one_or_two_batches() {
        let mut cfg = config();
        cfg.fish_count = None;
        let a = Aquarium::new(SceneSurface::new(480.0, 400.0), cfg);
        let n = a.registry().fish.len();
        assert!(n == 10 || n == 20, "{n}");
    }

    #[test]
    fn nothing_moves_before_start() {
        let mut a = tank();
        let before = a.registry().fish[0].body.position;
        let report = a.advance(5_000.0);
        assert_eq!(report, FrameReport::default());
        assert_eq!(a.registry().fish[0].body.position, before);
    }

    #[test]
    fn throttled_polls_share_one_pass() {
        let mut a = tank();
        assert!(a.start(0.0));
        assert!(!a.start(0.0));
        let x0 = a.registry().fish[0].body.position.x;
        assert!(a.advance(25.0).ticked);
        let x1 = a.registry().fish[0].body.position.x;
        assert_ne!(x0, x1);
        assert!(!a.advance(30.0).ticked);
        assert_eq!(a.registry().fish[0].body.position.x, x1);
        assert_eq!(a.driver().ticks(), 1);
    }

    #[test]
    fn sky_steps_move_sea_level_and_waves() {
        let mut a = tank();
        a.start(0.0);
        assert_eq!(a.environment().sea_level(), 60.0);
        // 26 sky steps of 150 ms, replayed at most 8 per call.
        let mut now = 0.0;
        let mut steps = 0;
        while steps < 26 {
            now += 150.0;
            steps += a.advance(now).sky_steps;
        }
        // Step 25 was the last one applied: a quarter period, bands at 25 px.
        let sea = a.environment().sea_level();
        assert!((sea - 80.0).abs() < 1e-3, "{sea}");
        let waves: Vec<f32> = a.registry().waves.iter().map(|w| w.body.position.y).collect();
        assert!((waves[0] - 70.0).abs() < 1e-3);
        assert!((waves[2] - 90.0).abs() < 1e-3);

        let sky = &a.surface().elements()[8];
        assert_eq!(sky.color, SKY_PALETTE[0].lerp(SKY_PALETTE[1], 0.25));
        match sky.shape {
            Shape::Band { height } => assert!((height - 25.0).abs() < 1e-4),
            Shape::Text(_) => panic!("sky should be a band"),
        }
    }

    #[test]
    fn stop_cancels_both_tasks() {
        let mut a = tank();
        a.start(0.0);
        let token = a.cancel_token();
        a.advance(20.0);
        token.cancel();
        let report = a.advance(10_000.0);
        assert_eq!(report, FrameReport::default());
        assert_eq!(a.driver().state(), DriverState::Stopped);
        assert!(!a.start(10_000.0));

        let mut b = tank();
        b.start(0.0);
        b.stop();
        assert_eq!(b.advance(500.0), FrameReport::default());
    }

    #[test]
    fn failed_elements_skip_entities_only() {
        // Room for scenery and three entities.
        let surface = SceneSurface::new(480.0, 400.0).with_capacity_limit(8 + 4 + 3);
        let mut a = Aquarium::new(surface, config());
        assert_eq!(a.registry().len(), 3);
        assert_eq!(a.skipped(), 6 + 8 + 4 + 3 - 3);
        a.start(0.0);
        assert!(a.advance(100.0).ticked);
    }

    #[test]
    fn entities_persist_over_a_long_run() {
        let mut a = tank();
        a.start(0.0);
        let total = a.registry().len();
        let mut now = 0.0;
        for _ in 0..3_000 {
            now += 1000.0 / 60.0;
            a.advance(now);
        }
        assert_eq!(a.registry().len(), total);
        // Fish wrap instead of leaving.
        let vp = a.surface().viewport();
        for f in &a.registry().fish {
            assert!(f.body.position.x <= vp.width + 2.0);
            assert!(f.body.position.x >= -200.0);
        }
        // Every bubble is still under water.
        for b in &a.registry().bubbles {
            assert!(b.body.position.y <= vp.height);
        }
        assert!(a.depth_palette().computed() <= 8);
        assert!(!render_scene_to_string(a.surface()).is_empty());
    }
}
