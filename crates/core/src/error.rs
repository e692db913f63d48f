//! Error types for the effect framework.

use thiserror::Error;

/// Failure while flushing to, or acquiring, the output surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by an effect.
#[derive(Debug, Error)]
pub enum EffectError {
    /// `init` could not set up the effect (for example the surface is too small).
    #[error("initialization failed: {0}")]
    Init(String),
    /// `run` stopped because of an error.
    #[error("runtime failure: {0}")]
    Runtime(String),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl EffectError {
    /// Init error for a surface below the effect's minimum size.
    pub fn surface_too_small(width: u16, height: u16, min_width: u16, min_height: u16) -> Self {
        EffectError::Init(format!(
            "surface {width}x{height} is smaller than the required {min_width}x{min_height}"
        ))
    }
}

/// Registry misuse. Registration errors are programming errors and fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("effect id must not be empty")]
    EmptyId,
    #[error("effect '{0}' is already registered")]
    DuplicateId(String),
    #[error("effect not found: {0}")]
    NotFound(String),
}

/// Recoverable failure of one launch; the driver is back in `Selecting`.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("effect '{id}' failed to start: {source}")]
    Init { id: String, source: EffectError },
    #[error("effect '{id}' stopped with an error: {source}")]
    Runtime { id: String, source: EffectError },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_effect() {
        let err = LifecycleError::Init {
            id: "snake-ai".to_string(),
            source: EffectError::surface_too_small(4, 3, 10, 6),
        };
        assert_eq!(
            err.to_string(),
            "effect 'snake-ai' failed to start: initialization failed: surface 4x3 is smaller than the required 10x6"
        );

        let err = LifecycleError::from(RegistryError::NotFound("nope".to_string()));
        assert_eq!(err.to_string(), "effect not found: nope");
    }
}
