use thiserror::Error;

/// Errors raised by the onyx lifecycle layer.
#[derive(Debug, Error)]
pub enum OnyxError {
    #[error("an App already exists in this process")]
    AppAlreadyExists,

    #[error("a scene named {0:?} is already registered")]
    DuplicateScene(String),

    #[error("no scene named {0:?}")]
    UnknownScene(String),

    #[error("scene index {index} is out of range ({len} scenes)")]
    InvalidSceneIndex { index: usize, len: usize },

    #[error("invalid app config: {0}")]
    InvalidConfig(String),

    /// Window, event loop or GPU failure reported by the engine.
    #[error(transparent)]
    Platform(#[from] anyhow::Error),

    /// A broken invariant inside onyx itself.
    #[error("internal onyx error: {0}; please report this")]
    Internal(String),
}

impl OnyxError {
    pub(crate) fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

pub type Result<T, E = OnyxError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_message_asks_for_a_report() {
        let err = OnyxError::internal("component not registered");
        assert!(err.is_internal());
        assert_eq!(err.to_string(), "internal onyx error: component not registered; please report this");
    }

    #[test]
    fn platform_errors_are_transparent() {
        let err: OnyxError = anyhow::anyhow!("no adapter").into();
        assert!(!err.is_internal());
        assert_eq!(err.to_string(), "no adapter");
    }
}
