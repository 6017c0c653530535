//! Onyx: scenes and components on top of `onyx-engine`.
//!
//! An [`App`] owns named [`Scene`]s. The active scene routes each event to
//! the [`Component`]s subscribed to its kind, updates every component once
//! per frame, and repaints its rendered components when one of them asks.
//!
//! ```rust,ignore
//! use onyx::prelude::*;
//!
//! struct Player;
//!
//! impl Behavior for Player {
//!     fn handle(&mut self, event: &Event, ctx: &mut Context) -> onyx::Result<()> {
//!         if let Event::KeyDown { key: Key::Escape, .. } = event {
//!             ctx.quit();
//!         }
//!         Ok(())
//!     }
//!
//!     fn render(&mut self, surface: &mut Surface, rect: Rect) {
//!         surface.fill_rect(rect, Color::WHITE);
//!     }
//! }
//!
//! let mut app = App::new(AppConfig::new("demo", 640.0, 480.0))?;
//! app.add_scene(Scene::named("main").with_component(
//!     RenderedComponent::new([EventKind::KeyDown], Rect::new(10.0, 10.0, 32.0, 32.0), Player),
//! ))?;
//! app.run()?;
//! ```

pub mod app;
pub mod component;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod scene;

pub use app::{App, AppId, FrameInput, FrameOutcome};
pub use component::{Behavior, Component, ComponentId, NoBehavior, RenderState, RenderedComponent};
pub use config::AppConfig;
pub use context::Context;
pub use error::{OnyxError, Result};
pub use event::{Event, EventKind};
pub use scene::{Scene, SceneId, SceneSpecifier};

/// Everything a typical onyx program imports.
pub mod prelude {
    pub use crate::{
        App, AppConfig, Behavior, Component, Context, Event, EventKind, FrameInput, NoBehavior, OnyxError,
        RenderedComponent, Scene, SceneSpecifier,
    };

    // Engine primitives components draw with.
    pub use onyx_engine::coords::{Rect, Vec2};
    pub use onyx_engine::draw::{Surface, ZIndex};
    pub use onyx_engine::input::{Key, Modifiers, MouseButton};
    pub use onyx_engine::logging::LoggingConfig;
    pub use onyx_engine::paint::Color;
}
