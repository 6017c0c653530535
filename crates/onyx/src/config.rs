use onyx_engine::coords::Vec2;
use onyx_engine::logging::LoggingConfig;

use crate::error::{OnyxError, Result};

/// Window and frame-loop settings for an [`App`](crate::App).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Window size in logical pixels.
    pub dimensions: Vec2,
    pub target_fps: f64,
    pub resizable: bool,
    /// Installed by [`App::run`](crate::App::run); `None` leaves logging to the caller.
    pub logging: Option<LoggingConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "onyx app".to_string(),
            dimensions: Vec2::new(640.0, 480.0),
            target_fps: 60.0,
            resizable: false,
            logging: Some(LoggingConfig::default()),
        }
    }
}

impl AppConfig {
    pub fn new(title: impl Into<String>, width: f32, height: f32) -> Self {
        Self::default().title(title).dimensions(width, height)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn dimensions(mut self, width: f32, height: f32) -> Self {
        self.dimensions = Vec2::new(width, height);
        self
    }

    pub fn target_fps(mut self, fps: f64) -> Self {
        self.target_fps = fps;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn logging(mut self, logging: Option<LoggingConfig>) -> Self {
        self.logging = logging;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let Vec2 { x: w, y: h } = self.dimensions;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(OnyxError::InvalidConfig(format!("dimensions must be positive and finite, got {w}x{h}")));
        }
        if !(self.target_fps.is_finite() && self.target_fps > 0.0) {
            return Err(OnyxError::InvalidConfig(format!(
                "target_fps must be positive, got {}",
                self.target_fps
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.title, "onyx app");
        assert_eq!(cfg.dimensions, Vec2::new(640.0, 480.0));
        assert!(cfg.logging.is_some());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_dimensions_and_rates() {
        for cfg in [
            AppConfig::default().dimensions(0.0, 480.0),
            AppConfig::default().dimensions(640.0, f32::NAN),
            AppConfig::default().dimensions(-1.0, 10.0),
            AppConfig::default().target_fps(0.0),
            AppConfig::default().target_fps(f64::INFINITY),
        ] {
            assert!(matches!(cfg.validate(), Err(OnyxError::InvalidConfig(_))), "{cfg:?}");
        }
    }
}
