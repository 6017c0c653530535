use std::collections::HashSet;

use onyx_engine::coords::{Rect, Vec2};
use onyx_engine::input::{Key, MouseButton};

use crate::component::{ComponentId, RenderState};
use crate::error::{OnyxError, Result};
use crate::scene::SceneSpecifier;

/// Deferred App mutation recorded by a callback.
#[derive(Debug)]
pub(crate) enum Command {
    ChangeScene(SceneSpecifier),
    Quit,
    Post(u32),
}

/// Input state captured at the start of a frame.
#[derive(Debug, Default, Clone)]
pub(crate) struct HeldInput {
    pub(crate) keys_down: HashSet<Key>,
    pub(crate) keys_pressed: HashSet<Key>,
    pub(crate) keys_released: HashSet<Key>,
    pub(crate) buttons_down: HashSet<MouseButton>,
}

/// What a component callback can see and ask for.
///
/// Reads reflect the App as of the start of the current event (or update
/// pass). Requests that touch the App are buffered and applied once every
/// component has seen the event.
#[derive(Debug)]
pub struct Context {
    dimensions: Vec2,
    input: HeldInput,
    scene_names: Vec<String>,
    current: Option<usize>,

    commands: Vec<Command>,

    component: Option<ComponentId>,
    render: Option<RenderState>,
}

impl Context {
    /// A context not tied to any App: no scenes, no held keys.
    pub fn new(dimensions: Vec2) -> Self {
        Self {
            dimensions,
            input: HeldInput::default(),
            scene_names: Vec::new(),
            current: None,
            commands: Vec::new(),
            component: None,
            render: None,
        }
    }

    pub(crate) fn snapshot(
        dimensions: Vec2,
        input: HeldInput,
        scene_names: Vec<String>,
        current: Option<usize>,
    ) -> Self {
        Self { input, scene_names, current, ..Self::new(dimensions) }
    }

    pub(crate) fn refresh(&mut self, dimensions: Vec2, scene_names: Vec<String>, current: Option<usize>) {
        self.dimensions = dimensions;
        self.scene_names = scene_names;
        self.current = current;
    }

    pub(crate) fn bind(&mut self, component: ComponentId, render: Option<RenderState>) {
        self.component = Some(component);
        self.render = render;
    }

    pub(crate) fn unbind(&mut self) -> Option<RenderState> {
        self.component = None;
        self.render.take()
    }

    pub(crate) fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    // ── App state ─────────────────────────────────────────────────────────

    pub fn dimensions(&self) -> Vec2 {
        self.dimensions
    }

    /// The window as a rect at the origin.
    pub fn window_rect(&self) -> Rect {
        Rect::from_origin_size(Vec2::zero(), self.dimensions)
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.input.keys_down.contains(&key)
    }

    /// Whether `key` went down since the previous frame.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.input.keys_pressed.contains(&key)
    }

    /// Whether `key` went up since the previous frame.
    pub fn key_released(&self, key: Key) -> bool {
        self.input.keys_released.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.input.buttons_down.contains(&button)
    }

    pub fn key_states(&self, keys: &[Key]) -> Vec<bool> {
        keys.iter().map(|k| self.key_down(*k)).collect()
    }

    /// Name of the active scene, if there is one.
    pub fn scene_name(&self) -> Option<&str> {
        self.current.and_then(|i| self.scene_names.get(i)).map(String::as_str)
    }

    pub fn scene_names(&self) -> &[String] {
        &self.scene_names
    }

    // ── Own render state ──────────────────────────────────────────────────

    pub fn component(&self) -> Option<ComponentId> {
        self.component
    }

    /// `None` for components without the render capability.
    pub fn rect(&self) -> Option<Rect> {
        self.render.map(|s| s.rect)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        match self.render.as_mut() {
            Some(state) => state.set_rect(rect),
            None => log::debug!("set_rect on non-rendered component {:?}", self.component),
        }
    }

    pub fn visible(&self) -> bool {
        self.render.is_some_and(|s| s.visible)
    }

    pub fn set_visible(&mut self, visible: bool) {
        match self.render.as_mut() {
            Some(state) => state.set_visible(visible),
            None => log::debug!("set_visible on non-rendered component {:?}", self.component),
        }
    }

    pub fn request_redraw(&mut self) {
        match self.render.as_mut() {
            Some(state) => state.redraw_requested = true,
            None => log::debug!("redraw requested on non-rendered component {:?}", self.component),
        }
    }

    // ── Buffered commands ─────────────────────────────────────────────────

    /// Queues a scene change. Unknown names and indices fail immediately.
    pub fn change_scene(&mut self, spec: impl Into<SceneSpecifier>) -> Result<()> {
        let spec = spec.into();
        match &spec {
            SceneSpecifier::Name(name) => {
                if !self.scene_names.iter().any(|n| n == name) {
                    return Err(OnyxError::UnknownScene(name.clone()));
                }
            }
            SceneSpecifier::Index(index) => {
                let len = self.scene_names.len();
                if *index >= len {
                    return Err(OnyxError::InvalidSceneIndex { index: *index, len });
                }
            }
            SceneSpecifier::New(scene) => {
                if self.scene_names.iter().any(|n| n == scene.name()) {
                    return Err(OnyxError::DuplicateScene(scene.name().to_string()));
                }
                // Later requests in the same callback may refer to it.
                self.scene_names.push(scene.name().to_string());
            }
        }

        self.commands.push(Command::ChangeScene(spec));
        Ok(())
    }

    /// Stops the loop once the current frame finishes.
    pub fn quit(&mut self) {
        self.commands.push(Command::Quit);
    }

    /// Delivers `Event::User { code }` at the start of the next frame.
    pub fn post_event(&mut self, code: u32) {
        self.commands.push(Command::Post(code));
    }

    pub fn has_pending_commands(&self) -> bool {
        !self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    fn ctx() -> Context {
        Context::snapshot(
            Vec2::new(200.0, 100.0),
            HeldInput {
                keys_down: [Key::A].into_iter().collect(),
                keys_released: [Key::B].into_iter().collect(),
                buttons_down: [MouseButton::Left].into_iter().collect(),
                ..HeldInput::default()
            },
            vec!["menu".to_string(), "game".to_string()],
            Some(1),
        )
    }

    #[test]
    fn reads_snapshot() {
        let ctx = ctx();
        assert_eq!(ctx.scene_name(), Some("game"));
        assert_eq!(ctx.key_states(&[Key::A, Key::B]), vec![true, false]);
        assert!(ctx.key_released(Key::B) && !ctx.key_pressed(Key::A));
        assert!(ctx.button_down(MouseButton::Left));
        assert_eq!(ctx.window_rect(), Rect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn scene_change_validates_before_queueing() {
        let mut ctx = ctx();
        assert!(matches!(
            ctx.change_scene("nope"),
            Err(OnyxError::UnknownScene(_))
        ));
        assert!(matches!(
            ctx.change_scene(SceneSpecifier::Index(2)),
            Err(OnyxError::InvalidSceneIndex { index: 2, len: 2 })
        ));
        assert!(!ctx.has_pending_commands());

        ctx.change_scene("menu").unwrap();
        assert_eq!(ctx.take_commands().len(), 1);
    }

    #[test]
    fn new_scene_is_visible_to_later_requests() {
        let mut ctx = ctx();
        ctx.change_scene(Scene::named("pause")).unwrap();
        ctx.change_scene(2usize).unwrap();
        assert!(matches!(
            ctx.change_scene(SceneSpecifier::New(Scene::named("pause"))),
            Err(OnyxError::DuplicateScene(_))
        ));
    }

    #[test]
    fn render_state_requests_without_capability_are_ignored() {
        let mut ctx = Context::new(Vec2::new(1.0, 1.0));
        ctx.request_redraw();
        ctx.set_visible(true);
        assert_eq!(ctx.rect(), None);
        assert!(!ctx.visible());
    }
}
