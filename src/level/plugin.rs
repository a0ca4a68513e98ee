//! Level plugin - level entry and exit, pause requests and the
//! fade-masked swap between consecutive levels.

use bevy::prelude::*;

use super::data::{load_level_sequence, LevelSequence};
use super::error::LevelError;
use super::progress::{Advance, LevelProgress};
use super::spawning::{activate_dormant, spawn_level, Dormant, LevelRoot};
use crate::audio::PlayMusic;
use crate::ball::BallTuning;
use crate::core::{Faded, GameState, LevelCleared, PauseFlag, TickSet, TransitionCue};
use crate::fade::{FadeController, FadePhase};
use crate::input::ActionState;
use crate::save::SaveGame;

/// Level plugin - handles level setup, progression and teardown.
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelProgress>()
            .add_systems(Startup, load_level_sequence)
            .add_systems(OnEnter(GameState::MainMenu), reveal_menu)
            .add_systems(OnEnter(GameState::InGame), enter_level)
            .add_systems(OnExit(GameState::InGame), leave_gameplay)
            .add_systems(
                Update,
                (apply_transition_cues, advance_on_clear, request_pause)
                    .chain()
                    .in_set(TickSet::Level)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

/// Start gameplay at `level`. Used by the menu for both New Game and Continue.
pub fn start_level(
    level: usize,
    sequence: &LevelSequence,
    progress: &mut LevelProgress,
    next_state: &mut NextState<GameState>,
) -> Result<(), LevelError> {
    progress.reset();
    progress.set_level_id(Some(level), sequence.len())?;
    next_state.set(GameState::InGame);
    Ok(())
}

/// Lift a held blackout once the menu is up.
fn reveal_menu(mut fade: ResMut<FadeController>) {
    if fade.phase() == FadePhase::Held {
        if let Err(e) = fade.fade_in() {
            warn!("{}", e);
        }
    }
}

/// Spawn the current level and fade it in.
#[allow(clippy::too_many_arguments)]
fn enter_level(
    mut commands: Commands,
    sequence: Res<LevelSequence>,
    tuning: Res<BallTuning>,
    mut progress: ResMut<LevelProgress>,
    mut save: ResMut<SaveGame>,
    mut fade: ResMut<FadeController>,
    mut music: EventWriter<PlayMusic>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(level) = progress.current() else {
        error!("{}", LevelError::NoActiveLevel);
        next_state.set(GameState::MainMenu);
        return;
    };
    let Some(def) = sequence.get(level) else {
        error!(
            "{}",
            LevelError::InvalidLevel {
                id: level,
                len: sequence.len()
            }
        );
        next_state.set(GameState::MainMenu);
        return;
    };

    save.data.record_level_entered(level);
    save.persist_or_warn();

    spawn_level(&mut commands, level, def, &tuning, &mut progress, false);

    // Whatever the menu was fading, the level starts from black.
    fade.cancel();
    if let Err(e) = fade.fade_in() {
        warn!("{}", e);
    }
    if let Some(track) = &def.music {
        music.send(PlayMusic::new(track.clone()));
    }
}

/// Tear down all level content when gameplay ends.
fn leave_gameplay(
    mut commands: Commands,
    roots: Query<Entity, With<LevelRoot>>,
    mut progress: ResMut<LevelProgress>,
    mut pause: ResMut<PauseFlag>,
) {
    for entity in roots.iter() {
        commands.entity(entity).despawn_recursive();
    }
    progress.reset();
    pause.set(false);
}

/// Raise the pause flag on the pause input. Never lowers it.
fn request_pause(
    actions: Res<ActionState>,
    progress: Res<LevelProgress>,
    fade: Res<FadeController>,
    mut pause: ResMut<PauseFlag>,
) {
    if !actions.pause_pressed || pause.is_paused() {
        return;
    }
    if progress.in_transition() || fade.is_busy() {
        debug!("Ignoring pause during a level transition");
        return;
    }
    info!("Game paused");
    pause.set(true);
}

/// Advance to the next level once the current one is cleared.
///
/// A clear that arrives while the previous swap is still fading in is held
/// back until the fade finishes.
#[allow(clippy::too_many_arguments)]
fn advance_on_clear(
    mut commands: Commands,
    mut cleared: EventReader<LevelCleared>,
    mut pending: Local<Option<usize>>,
    sequence: Res<LevelSequence>,
    tuning: Res<BallTuning>,
    mut progress: ResMut<LevelProgress>,
    mut save: ResMut<SaveGame>,
    mut fade: ResMut<FadeController>,
    mut pause: ResMut<PauseFlag>,
) {
    for event in cleared.read() {
        pause.set(false);
        if pending.replace(event.level).is_some() {
            warn!("Level {} cleared twice before advancing", event.level);
        }
    }

    let Some(level) = *pending else {
        return;
    };
    if progress.current() != Some(level) {
        // Gameplay ended before the clear could be applied
        *pending = None;
        return;
    }
    if fade.is_busy() {
        return;
    }
    *pending = None;

    match progress.load_next(sequence.len(), &mut save.data) {
        Ok(Advance::Finished) => {
            save.persist_or_warn();
            info!("Final level {} cleared, returning to menu", level);
            if let Err(e) = fade.fade_out(true, TransitionCue::ReturnToMenu) {
                warn!("{}", e);
            }
        }
        Ok(Advance::Next(next)) => {
            save.persist_or_warn();
            let Some(def) = sequence.get(next) else {
                error!(
                    "{}",
                    LevelError::InvalidLevel {
                        id: next,
                        len: sequence.len()
                    }
                );
                return;
            };
            spawn_level(&mut commands, next, def, &tuning, &mut progress, true);
            if let Err(e) = fade.fade_out_then_in(TransitionCue::SwapLevel { level: next }) {
                warn!("{}", e);
            }
        }
        Err(e) => warn!("Cannot advance past level {}: {}", level, e),
    }
}

/// React to a completed fade-out: swap level content or leave for the menu.
#[allow(clippy::too_many_arguments)]
fn apply_transition_cues(
    mut commands: Commands,
    mut faded: EventReader<Faded>,
    mut roots: Query<(Entity, &LevelRoot, &mut Visibility)>,
    dormant: Query<Entity, With<Dormant>>,
    sequence: Res<LevelSequence>,
    mut progress: ResMut<LevelProgress>,
    mut music: EventWriter<PlayMusic>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in faded.read() {
        match event.cue {
            TransitionCue::SwapLevel { level } => {
                for (entity, root, mut visibility) in roots.iter_mut() {
                    if root.level == level {
                        *visibility = Visibility::Inherited;
                    } else {
                        commands.entity(entity).despawn_recursive();
                    }
                }
                activate_dormant(&mut commands, &dormant);
                progress.finish_transition();
                info!("Swapped in level {}", level);

                if let Some(track) = sequence.get(level).and_then(|def| def.music.as_ref()) {
                    music.send(PlayMusic::new(track.clone()));
                }
            }
            TransitionCue::ReturnToMenu => {
                progress.finish_transition();
                next_state.set(GameState::MainMenu);
            }
        }
    }
}
