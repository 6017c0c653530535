use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use onyx_engine::coords::Rect;
use onyx_engine::draw::{Surface, ZIndex};

use crate::context::Context;
use crate::error::{OnyxError, Result};
use crate::event::{Event, EventKind};
use crate::scene::SceneId;

static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique component identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ComponentId(u64);

impl ComponentId {
    fn next() -> Self {
        Self(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// User code attached to a component. Every method defaults to a no-op.
///
/// `handle` is only called for event kinds the component subscribed to.
/// `render` is only called on rendered components, and only when the
/// component is visible on a repainting frame.
pub trait Behavior {
    fn handle(&mut self, _event: &Event, _ctx: &mut Context) -> Result<()> {
        Ok(())
    }

    /// `dt` is the clamped frame delta in seconds.
    fn update(&mut self, _dt: f32, _ctx: &mut Context) -> Result<()> {
        Ok(())
    }

    fn render(&mut self, _surface: &mut Surface, _rect: Rect) {}
}

/// Behavior with no callbacks; useful for static rendered boxes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBehavior;

impl Behavior for NoBehavior {}

/// Render capability of a component.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderState {
    pub(crate) rect: Rect,
    pub(crate) visible: bool,
    pub(crate) z_index: ZIndex,
    pub(crate) redraw_requested: bool,
    /// Set when visibility flips; the old area must be repainted either way.
    pub(crate) visibility_changed: bool,
}

impl RenderState {
    fn new(rect: Rect) -> Self {
        Self {
            rect,
            visible: true,
            z_index: ZIndex::default(),
            redraw_requested: true,
            visibility_changed: false,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn z_index(&self) -> ZIndex {
        self.z_index
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        if self.rect != rect {
            self.rect = rect;
            self.redraw_requested = true;
        }
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.visibility_changed = true;
            self.redraw_requested = true;
        }
    }

    /// Whether this component alone makes the frame repaint.
    pub(crate) fn wants_repaint(&self) -> bool {
        (self.visible && self.redraw_requested) || self.visibility_changed
    }
}

/// A unit of behavior inside a [`Scene`](crate::Scene).
///
/// A component subscribes to a fixed set of [`EventKind`]s. Components built
/// from a [`RenderedComponent`] also carry a [`RenderState`].
pub struct Component {
    id: ComponentId,
    event_kinds: HashSet<EventKind>,
    scene: Option<SceneId>,
    render: Option<RenderState>,
    behavior: Box<dyn Behavior>,
}

impl Component {
    pub fn new<K, B>(event_kinds: K, behavior: B) -> Self
    where
        K: IntoIterator<Item = EventKind>,
        B: Behavior + 'static,
    {
        Self {
            id: ComponentId::next(),
            event_kinds: event_kinds.into_iter().collect(),
            scene: None,
            render: None,
            behavior: Box::new(behavior),
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn event_kinds(&self) -> &HashSet<EventKind> {
        &self.event_kinds
    }

    pub fn handles(&self, kind: EventKind) -> bool {
        self.event_kinds.contains(&kind)
    }

    /// Owning scene. Fails until the component has been added to one.
    pub fn scene(&self) -> Result<SceneId> {
        self.scene
            .ok_or_else(|| OnyxError::internal(format!("component {:?} is not registered in a scene", self.id)))
    }

    pub(crate) fn attach(&mut self, scene: SceneId) {
        self.scene = Some(scene);
    }

    pub fn is_rendered(&self) -> bool {
        self.render.is_some()
    }

    pub fn render_state(&self) -> Option<&RenderState> {
        self.render.as_ref()
    }

    /// Delivers `event` to the behavior.
    ///
    /// Events of a kind the component did not subscribe to are a routing bug.
    pub fn dispatch(&mut self, event: &Event, ctx: &mut Context) -> Result<()> {
        let kind = event.kind();
        if !self.handles(kind) {
            return Err(OnyxError::internal(format!(
                "{kind:?} dispatched to component {:?}, which does not handle it",
                self.id
            )));
        }

        ctx.bind(self.id, self.render.take());
        let result = self.behavior.handle(event, ctx);
        self.render = ctx.unbind();
        result
    }

    pub fn update(&mut self, dt: f32, ctx: &mut Context) -> Result<()> {
        ctx.bind(self.id, self.render.take());
        let result = self.behavior.update(dt, ctx);
        self.render = ctx.unbind();
        result
    }

    /// Renders a visible component on its z layer and clears its redraw flag.
    ///
    /// Returns whether the render callback ran.
    pub fn render_into(&mut self, surface: &mut Surface) -> bool {
        let Some(state) = self.render.as_mut() else {
            return false;
        };
        state.visibility_changed = false;
        if !state.visible {
            return false;
        }

        surface.set_layer(state.z_index);
        self.behavior.render(surface, state.rect);
        state.redraw_requested = false;
        true
    }

    /// Marks the component dirty. Calling it repeatedly is the same as once.
    pub fn request_redraw(&mut self) {
        match self.render.as_mut() {
            Some(state) => state.redraw_requested = true,
            None => log::debug!("redraw requested on non-rendered component {:?}", self.id),
        }
    }

    pub fn redraw_requested(&self) -> bool {
        self.render.is_some_and(|s| s.redraw_requested)
    }

    pub(crate) fn wants_repaint(&self) -> bool {
        self.render.is_some_and(|s| s.wants_repaint())
    }

    pub fn rect(&self) -> Option<Rect> {
        self.render.map(|s| s.rect)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        match self.render.as_mut() {
            Some(state) => state.set_rect(rect),
            None => log::debug!("set_rect on non-rendered component {:?}", self.id),
        }
    }

    /// Non-rendered components are never visible.
    pub fn visible(&self) -> bool {
        self.render.is_some_and(|s| s.visible)
    }

    pub fn set_visible(&mut self, visible: bool) {
        match self.render.as_mut() {
            Some(state) => state.set_visible(visible),
            None => log::debug!("set_visible on non-rendered component {:?}", self.id),
        }
    }

    pub fn z_index(&self) -> Option<ZIndex> {
        self.render.map(|s| s.z_index)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id)
            .field("event_kinds", &self.event_kinds)
            .field("scene", &self.scene)
            .field("render", &self.render)
            .finish_non_exhaustive()
    }
}

/// Builder for a component with the render capability.
///
/// Starts visible, on z layer 0, with a redraw pending.
pub struct RenderedComponent {
    inner: Component,
}

impl RenderedComponent {
    pub fn new<K, B>(event_kinds: K, rect: Rect, behavior: B) -> Self
    where
        K: IntoIterator<Item = EventKind>,
        B: Behavior + 'static,
    {
        let mut inner = Component::new(event_kinds, behavior);
        inner.render = Some(RenderState::new(rect));
        Self { inner }
    }

    pub fn visible(mut self, visible: bool) -> Self {
        if let Some(state) = self.inner.render.as_mut() {
            state.visible = visible;
        }
        self
    }

    pub fn z_index(mut self, z: i32) -> Self {
        if let Some(state) = self.inner.render.as_mut() {
            state.z_index = ZIndex(z);
        }
        self
    }

    pub fn id(&self) -> ComponentId {
        self.inner.id
    }

    pub fn build(self) -> Component {
        self.inner
    }
}

impl From<RenderedComponent> for Component {
    fn from(rc: RenderedComponent) -> Self {
        rc.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onyx_engine::coords::{Vec2, Viewport};
    use onyx_engine::paint::Color;

    struct Painter {
        color: Color,
    }

    impl Behavior for Painter {
        fn render(&mut self, surface: &mut Surface, rect: Rect) {
            surface.fill_rect(rect, self.color);
        }
    }

    fn rendered() -> Component {
        RenderedComponent::new([], Rect::new(0.0, 0.0, 10.0, 10.0), Painter { color: Color::RED })
            .z_index(3)
            .into()
    }

    #[test]
    fn rendered_component_defaults() {
        let c = rendered();
        assert!(c.is_rendered());
        assert!(c.visible());
        assert!(c.redraw_requested());
        assert_eq!(c.z_index(), Some(ZIndex(3)));
    }

    #[test]
    fn render_into_clears_flag_and_uses_layer() {
        let mut c = rendered();
        let mut surface = Surface::new(Viewport::new(100.0, 100.0));

        assert!(c.render_into(&mut surface));
        assert!(!c.redraw_requested());
        assert_eq!(surface.draw_list().items()[0].key.z, ZIndex(3));
    }

    #[test]
    fn hidden_components_do_not_render() {
        let mut c = rendered();
        c.set_visible(false);
        assert!(c.wants_repaint());

        let mut surface = Surface::new(Viewport::new(100.0, 100.0));
        assert!(!c.render_into(&mut surface));
        assert!(surface.draw_list().is_empty());
        assert!(!c.wants_repaint());
    }

    #[test]
    fn request_redraw_on_plain_component_is_a_no_op() {
        let mut c = Component::new([EventKind::Quit], NoBehavior);
        c.request_redraw();
        assert!(!c.redraw_requested());
        assert_eq!(c.rect(), None);
    }

    #[test]
    fn moving_a_component_marks_it_dirty() {
        let mut c = rendered();
        let mut surface = Surface::new(Viewport::new(100.0, 100.0));
        c.render_into(&mut surface);

        c.set_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(!c.redraw_requested());

        c.set_rect(Rect::from_origin_size(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0)));
        assert!(c.redraw_requested());
    }

    #[test]
    fn unregistered_component_has_no_scene() {
        let c = Component::new([], NoBehavior);
        assert!(c.scene().is_err_and(|e| e.is_internal()));
    }

    #[test]
    fn ids_are_unique() {
        let a = Component::new([], NoBehavior);
        let b = Component::new([], NoBehavior);
        assert_ne!(a.id(), b.id());
    }
}
