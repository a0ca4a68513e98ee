//! Input plugin - samples devices once per tick before gameplay runs.

use bevy::prelude::*;

use super::actions::{sample_actions, ActionState};
use crate::core::TickSet;

/// Input plugin - keeps [`ActionState`] current.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionState>()
            .add_systems(Update, sample_actions.in_set(TickSet::Input));
    }
}
