// Error types surfaced to callers
//
// Only construction-time and configuration-loading failures become errors.
// Gameplay conditions (negative damage, duplicate respawn, repeated death)
// are absorbed where they happen.

use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};
use std::path::PathBuf;
use thiserror::Error;

/// Failure to build a player controller
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("rigid body {0:?} does not exist in the physics world")]
    MissingBody(RigidBodyHandle),

    #[error("collider {0:?} does not exist in the physics world")]
    MissingCollider(ColliderHandle),

    #[error("collider {collider:?} is not attached to body {body:?}")]
    DetachedCollider {
        body: RigidBodyHandle,
        collider: ColliderHandle,
    },
}

/// Failure to load or validate a controller configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(String),
}
