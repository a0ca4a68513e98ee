//! Configuration errors for ball entities.

use bevy::prelude::*;
use thiserror::Error;

/// A ball was created without something it cannot run without.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Ball {entity:?} is missing required component {component}")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },
}
