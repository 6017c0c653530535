use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use winit::dpi::LogicalSize;

use onyx_engine::coords::{Rect, Vec2, Viewport};
use onyx_engine::core::{App as EngineApp, AppControl, FrameCtx, RenderResult};
use onyx_engine::device::GpuInit;
use onyx_engine::draw::Surface;
use onyx_engine::input::{InputFrame, InputState, Key, MouseButton};
use onyx_engine::logging::init_logging;
use onyx_engine::paint::Color;
use onyx_engine::render::FillRenderer;
use onyx_engine::window::{Runtime, RuntimeConfig};

use crate::config::AppConfig;
use crate::context::{Command, Context, HeldInput};
use crate::error::{OnyxError, Result};
use crate::event::Event;
use crate::scene::{Scene, SceneSpecifier};

static APP_LIVE: AtomicBool = AtomicBool::new(false);
static NEXT_APP_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies the App a scene belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AppId(u64);

/// Held by the live App; releases the process-wide slot on drop.
#[derive(Debug)]
struct AppGuard;

impl AppGuard {
    fn acquire() -> Result<Self> {
        APP_LIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| AppGuard)
            .map_err(|_| OnyxError::AppAlreadyExists)
    }
}

impl Drop for AppGuard {
    fn drop(&mut self) {
        APP_LIVE.store(false, Ordering::Release);
    }
}

// ── Frame I/O ─────────────────────────────────────────────────────────────

/// Input for one [`App::step`].
#[derive(Debug, Default, Clone)]
pub struct FrameInput {
    /// Events in arrival order.
    pub events: Vec<Event>,
    /// Frame delta in seconds.
    pub dt: f32,
    /// Keys held at the start of the frame.
    pub keys_down: HashSet<Key>,
    /// Keys that went down since the previous frame.
    pub keys_pressed: HashSet<Key>,
    /// Keys that went up since the previous frame.
    pub keys_released: HashSet<Key>,
    /// Mouse buttons held at the start of the frame.
    pub buttons_down: HashSet<MouseButton>,
}

impl FrameInput {
    pub fn new(dt: f32) -> Self {
        Self { dt, ..Self::default() }
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_key_down(mut self, key: Key) -> Self {
        self.keys_down.insert(key);
        self
    }

    /// Marks `key` as held and newly pressed this frame.
    pub fn with_key_pressed(mut self, key: Key) -> Self {
        self.keys_down.insert(key);
        self.keys_pressed.insert(key);
        self
    }

    pub fn with_button_down(mut self, button: MouseButton) -> Self {
        self.buttons_down.insert(button);
        self
    }

    pub(crate) fn from_engine(state: &InputState, frame: &InputFrame, dt: f32) -> Self {
        Self {
            events: frame.events.iter().filter_map(Event::from_input).collect(),
            dt,
            keys_down: state.keys_down.clone(),
            keys_pressed: frame.keys_pressed.clone(),
            keys_released: frame.keys_released.clone(),
            buttons_down: state.buttons_down.clone(),
        }
    }
}

/// What a frame did.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameOutcome {
    /// The surface was repainted and should be presented.
    pub presented: bool,
    /// A quit was seen; the loop should stop.
    pub quit: bool,
}

// ── App ───────────────────────────────────────────────────────────────────

/// Owns the scenes and runs the frame loop. At most one App is live per process.
#[derive(Debug)]
pub struct App {
    id: AppId,
    config: AppConfig,
    dimensions: Vec2,

    scenes: Vec<Scene>,
    current: usize,

    force_redraw: bool,
    quit: bool,
    input: HeldInput,
    posted: Vec<u32>,

    _guard: AppGuard,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let guard = AppGuard::acquire()?;

        let id = AppId(NEXT_APP_ID.fetch_add(1, Ordering::Relaxed));
        log::debug!("app {id:?} created: {:?} {}x{}", config.title, config.dimensions.x, config.dimensions.y);

        Ok(Self {
            id,
            dimensions: config.dimensions,
            config,
            scenes: Vec::new(),
            current: 0,
            force_redraw: true,
            quit: false,
            input: HeldInput::default(),
            posted: Vec::new(),
            _guard: guard,
        })
    }

    pub fn id(&self) -> AppId {
        self.id
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Current window size in logical pixels.
    pub fn dimensions(&self) -> Vec2 {
        self.dimensions
    }

    /// The window as a rect at the origin.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(Vec2::zero(), self.dimensions)
    }

    // ── Scenes ────────────────────────────────────────────────────────────

    pub fn add_scene(&mut self, mut scene: Scene) -> Result<()> {
        if self.scene(scene.name()).is_some() {
            return Err(OnyxError::DuplicateScene(scene.name().to_string()));
        }
        scene.attach(self.id);
        log::debug!("scene {:?} registered ({} components)", scene.name(), scene.components().len());
        self.scenes.push(scene);
        Ok(())
    }

    /// Adds scenes in order, stopping at the first duplicate name.
    pub fn add_scenes<I>(&mut self, scenes: I) -> Result<()>
    where
        I: IntoIterator<Item = Scene>,
    {
        for scene in scenes {
            self.add_scene(scene)?;
        }
        Ok(())
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.name() == name)
    }

    pub fn scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|s| s.name() == name)
    }

    pub fn current_scene(&self) -> Option<&Scene> {
        self.scenes.get(self.current)
    }

    pub fn current_scene_mut(&mut self) -> Option<&mut Scene> {
        self.scenes.get_mut(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Selects the active scene and forces a full redraw.
    pub fn change_scene(&mut self, spec: impl Into<SceneSpecifier>) -> Result<()> {
        let index = match spec.into() {
            SceneSpecifier::Name(name) => self
                .scenes
                .iter()
                .position(|s| s.name() == name)
                .ok_or(OnyxError::UnknownScene(name))?,
            SceneSpecifier::Index(index) => {
                let len = self.scenes.len();
                if index >= len {
                    return Err(OnyxError::InvalidSceneIndex { index, len });
                }
                index
            }
            SceneSpecifier::New(scene) => {
                self.add_scene(scene)?;
                self.scenes.len() - 1
            }
        };

        log::info!(
            "scene changed: {:?} -> {:?}",
            self.current_scene().map(Scene::name),
            self.scenes[index].name()
        );
        self.current = index;
        self.force_redraw = true;
        Ok(())
    }

    // ── Input ─────────────────────────────────────────────────────────────

    /// Held state of `keys` as of the latest frame.
    pub fn key_states(&self, keys: &[Key]) -> Vec<bool> {
        keys.iter().map(|k| self.key_down(*k)).collect()
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.input.keys_down.contains(&key)
    }

    /// Whether `key` went down during the latest frame.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.input.keys_pressed.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.input.buttons_down.contains(&button)
    }

    /// Forces the next frame to repaint even if no component asked for it.
    pub fn request_redraw(&mut self) {
        self.force_redraw = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    // ── Frame ─────────────────────────────────────────────────────────────

    /// Runs one frame against `surface` without a window.
    ///
    /// Events posted during the previous frame come first, then `input.events`.
    /// Each event goes to the subscribed components of the active scene; the
    /// commands they queue are applied before the next event. After the
    /// update pass, the surface is repainted if anything asked for it.
    pub fn step(&mut self, input: FrameInput, surface: &mut Surface) -> Result<FrameOutcome> {
        let FrameInput { events, dt, keys_down, keys_pressed, keys_released, buttons_down } = input;
        self.input = HeldInput { keys_down, keys_pressed, keys_released, buttons_down };

        let posted = std::mem::take(&mut self.posted);
        let events = posted.into_iter().map(|code| Event::User { code }).chain(events);

        let mut ctx = Context::snapshot(self.dimensions, self.input.clone(), self.scene_names(), self.active());

        for event in events {
            match &event {
                Event::Quit => self.quit = true,
                Event::Resized { width, height } => {
                    self.dimensions = Vec2::new(*width, *height);
                    surface.resize(Viewport::new(*width, *height));
                    self.force_redraw = true;
                    ctx.refresh(self.dimensions, self.scene_names(), self.active());
                }
                _ => {}
            }

            if let Some(scene) = self.scenes.get_mut(self.current) {
                scene.dispatch(&event, &mut ctx)?;
            }
            self.apply(&mut ctx)?;
        }

        if let Some(scene) = self.scenes.get_mut(self.current) {
            scene.update(dt, &mut ctx)?;
        }
        self.apply(&mut ctx)?;

        let presented = self.repaint_if_needed(surface);
        Ok(FrameOutcome { presented, quit: self.quit })
    }

    fn repaint_if_needed(&mut self, surface: &mut Surface) -> bool {
        match self.scenes.get_mut(self.current) {
            Some(scene) => {
                // A changed clear color counts as a change to the whole surface.
                let recolored = surface.clear_color() != scene.clear_color();
                if !(self.force_redraw || recolored || scene.wants_repaint()) {
                    return false;
                }
                let rendered = scene.repaint(surface);
                log::trace!("repainted {:?}: {rendered} components", scene.name());
            }
            None => {
                if !self.force_redraw {
                    return false;
                }
                surface.clear(Color::BLACK);
            }
        }
        self.force_redraw = false;
        true
    }

    /// Decides whether the loop continues once the window had its turn.
    ///
    /// A repaint the surface could not show is owed to the next frame.
    pub(crate) fn settle_frame(&mut self, outcome: FrameOutcome, render: Option<RenderResult>) -> AppControl {
        if render == Some(RenderResult::Skipped) {
            log::debug!("frame skipped by the surface; repainting next frame");
            self.force_redraw = true;
        }

        let control = render.map_or(AppControl::Continue, RenderResult::control);
        if outcome.quit { AppControl::Exit } else { control }
    }

    fn apply(&mut self, ctx: &mut Context) -> Result<()> {
        let commands = ctx.take_commands();
        if commands.is_empty() {
            return Ok(());
        }

        for cmd in commands {
            match cmd {
                Command::ChangeScene(spec) => self.change_scene(spec)?,
                Command::Quit => self.quit = true,
                Command::Post(code) => self.posted.push(code),
            }
        }
        ctx.refresh(self.dimensions, self.scene_names(), self.active());
        Ok(())
    }

    fn scene_names(&self) -> Vec<String> {
        self.scenes.iter().map(|s| s.name().to_string()).collect()
    }

    fn active(&self) -> Option<usize> {
        (self.current < self.scenes.len()).then_some(self.current)
    }

    // ── Runtime ───────────────────────────────────────────────────────────

    /// Opens the window and runs frames until a quit is seen.
    pub fn run(mut self) -> Result<()> {
        if let Some(logging) = self.config.logging.clone() {
            init_logging(logging);
        }

        let runtime_config = RuntimeConfig {
            title: self.config.title.clone(),
            initial_size: LogicalSize::new(self.config.dimensions.x as f64, self.config.dimensions.y as f64),
            resizable: self.config.resizable,
            target_fps: self.config.target_fps,
        };

        let mut driver = Driver::new(&mut self);
        Runtime::run(runtime_config, GpuInit::default(), &mut driver)?;

        match driver.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        log::debug!("app {:?} torn down", self.id);
    }
}

/// Adapts an [`App`] to the engine's per-frame callback.
struct Driver<'a> {
    app: &'a mut App,
    surface: Surface,
    fills: FillRenderer,
    failure: Option<OnyxError>,
}

impl<'a> Driver<'a> {
    fn new(app: &'a mut App) -> Self {
        let size = app.dimensions();
        Self {
            app,
            surface: Surface::new(Viewport::new(size.x, size.y)),
            fills: FillRenderer::new(),
            failure: None,
        }
    }
}

impl EngineApp for Driver<'_> {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();
        if viewport.is_valid() && viewport != self.surface.viewport() {
            self.surface.resize(viewport);
        }

        let input = FrameInput::from_engine(ctx.input, ctx.input_frame, ctx.time.dt);
        let outcome = match self.app.step(input, &mut self.surface) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("frame {} failed: {err}", ctx.time.frame_index);
                self.failure = Some(err);
                return AppControl::Exit;
            }
        };

        let render = outcome.presented.then(|| {
            let clear = self.surface.clear_color();
            let surface = &mut self.surface;
            let fills = &mut self.fills;
            ctx.render(clear, |rctx, target| fills.render(rctx, target, surface.draw_list_mut()))
        });

        self.app.settle_frame(outcome, render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{NoBehavior, RenderedComponent};

    // The only test in this crate's unit tests that creates an App.
    #[test]
    fn skipped_frame_is_repainted_next_frame() {
        let mut app = App::new(AppConfig::default().logging(None)).unwrap();
        app.add_scene(Scene::named("main").with_component(RenderedComponent::new(
            [],
            Rect::new(0.0, 0.0, 8.0, 8.0),
            NoBehavior,
        )))
        .unwrap();
        let mut surface = Surface::new(Viewport::new(64.0, 64.0));

        let out = app.step(FrameInput::new(0.016), &mut surface).unwrap();
        assert!(out.presented);
        assert_eq!(app.settle_frame(out, Some(RenderResult::Skipped)), AppControl::Continue);

        let out = app.step(FrameInput::new(0.016), &mut surface).unwrap();
        assert!(out.presented);
        assert_eq!(app.settle_frame(out, Some(RenderResult::Presented)), AppControl::Continue);

        let out = app.step(FrameInput::new(0.016), &mut surface).unwrap();
        assert!(!out.presented);
        assert_eq!(app.settle_frame(out, None), AppControl::Continue);

        let repainted = FrameOutcome { presented: true, quit: false };
        assert_eq!(app.settle_frame(repainted, Some(RenderResult::Fatal)), AppControl::Exit);
        let quit = FrameOutcome { presented: false, quit: true };
        assert_eq!(app.settle_frame(quit, None), AppControl::Exit);
    }
}
