use std::sync::atomic::{AtomicU64, Ordering};

use onyx_engine::draw::Surface;
use onyx_engine::paint::Color;

use crate::app::AppId;
use crate::component::{Component, ComponentId};
use crate::context::Context;
use crate::error::{OnyxError, Result};
use crate::event::Event;

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique scene identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SceneId(u64);

impl SceneId {
    fn next() -> Self {
        Self(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Selects the scene to switch to.
#[derive(Debug)]
pub enum SceneSpecifier {
    Name(String),
    Index(usize),
    /// Registers the scene, then selects it.
    New(Scene),
}

impl From<&str> for SceneSpecifier {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<usize> for SceneSpecifier {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<Scene> for SceneSpecifier {
    fn from(scene: Scene) -> Self {
        Self::New(scene)
    }
}

/// A named, ordered set of components drawn over a clear color.
#[derive(Debug)]
pub struct Scene {
    id: SceneId,
    name: String,
    components: Vec<Component>,
    clear_color: Color,
    app: Option<AppId>,
}

impl Scene {
    pub fn new<I>(name: impl Into<String>, components: I, clear_color: Color) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Component>,
    {
        let mut scene = Self {
            id: SceneId::next(),
            name: name.into(),
            components: Vec::new(),
            clear_color,
            app: None,
        };
        scene.add_components(components);
        scene
    }

    /// An empty scene cleared to black.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Vec::<Component>::new(), Color::BLACK)
    }

    pub fn with_component(mut self, component: impl Into<Component>) -> Self {
        self.add_component(component);
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn add_component(&mut self, component: impl Into<Component>) -> ComponentId {
        let mut component = component.into();
        component.attach(self.id);
        let id = component.id();
        self.components.push(component);
        id
    }

    pub fn add_components<I>(&mut self, components: I)
    where
        I: IntoIterator,
        I::Item: Into<Component>,
    {
        for c in components {
            self.add_component(c);
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == id)
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id() == id)
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Owning App. Fails until the scene has been added to one.
    pub fn app(&self) -> Result<AppId> {
        self.app
            .ok_or_else(|| OnyxError::internal(format!("scene {:?} is not registered in an app", self.name)))
    }

    pub(crate) fn attach(&mut self, app: AppId) {
        self.app = Some(app);
    }

    // ── Frame passes ──────────────────────────────────────────────────────

    /// Sends `event` to every component subscribed to its kind, in insertion order.
    pub(crate) fn dispatch(&mut self, event: &Event, ctx: &mut Context) -> Result<()> {
        let kind = event.kind();
        for c in self.components.iter_mut().filter(|c| c.handles(kind)) {
            c.dispatch(event, ctx)?;
        }
        Ok(())
    }

    pub(crate) fn update(&mut self, dt: f32, ctx: &mut Context) -> Result<()> {
        for c in &mut self.components {
            c.update(dt, ctx)?;
        }
        Ok(())
    }

    pub(crate) fn wants_repaint(&self) -> bool {
        self.components.iter().any(Component::wants_repaint)
    }

    /// Clears `surface` and renders every visible component.
    ///
    /// Components land on their z layer; the draw list keeps insertion order
    /// within a layer.
    pub(crate) fn repaint(&mut self, surface: &mut Surface) -> usize {
        surface.clear(self.clear_color);
        let mut rendered = 0;
        for c in &mut self.components {
            if c.render_into(surface) {
                rendered += 1;
            }
        }
        surface.set_layer(Default::default());
        rendered
    }
}
