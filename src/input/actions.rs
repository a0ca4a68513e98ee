//! Per-tick action snapshot built from keyboard and gamepads.
//!
//! Gameplay and menus read the same snapshot. Directional presses are
//! turned into edges here, so a stick pushed up counts once, the same as a
//! key press.

use bevy::prelude::*;

use super::controller::ControllerKind;

/// Stick deflection below this is ignored.
const STICK_DEADZONE: f32 = 0.2;

/// A direction axis past this counts as pressed for edges.
const PRESS_THRESHOLD: f32 = 0.5;

/// What the player asked for this tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActionState {
    /// Held direction, `None` when nothing is held
    pub movement: Option<Vec2>,
    /// Jump pressed this tick, including an upward press on any device
    pub jump_pressed: bool,
    /// Pause pressed this tick
    pub pause_pressed: bool,
    /// Menu cursor moves, one per press
    pub menu_up: bool,
    pub menu_down: bool,
    pub menu_left: bool,
    pub menu_right: bool,
    /// Confirm the selected menu entry
    pub accept: bool,
    /// Leave the current menu page
    pub back: bool,
    /// Family of the device used most recently
    pub controller: ControllerKind,
    /// Direction held last tick, for press edges
    previous: Vec2,
}

impl ActionState {
    /// Horizontal component of the held direction, 0 when idle.
    pub fn horizontal(&self) -> f32 {
        self.movement.map(|m| m.x).unwrap_or(0.0)
    }
}

fn keyboard_direction(keyboard: &ButtonInput<KeyCode>) -> Vec2 {
    let mut direction = Vec2::ZERO;
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        direction.x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        direction.x += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        direction.y += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        direction.y -= 1.0;
    }
    direction
}

/// Axes that crossed [`PRESS_THRESHOLD`] this tick: (up, down, left, right).
fn direction_edges(previous: Vec2, current: Vec2) -> (bool, bool, bool, bool) {
    let crossed = |before: f32, now: f32| now > PRESS_THRESHOLD && before <= PRESS_THRESHOLD;
    (
        crossed(previous.y, current.y),
        crossed(-previous.y, -current.y),
        crossed(-previous.x, -current.x),
        crossed(previous.x, current.x),
    )
}

/// Rebuild [`ActionState`] from the current device state.
pub fn sample_actions(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<(&Gamepad, Option<&Name>)>,
    mut actions: ResMut<ActionState>,
) {
    let mut direction = keyboard_direction(&keyboard);
    let mut jump = keyboard.just_pressed(KeyCode::Space);
    let mut pause = keyboard.just_pressed(KeyCode::Escape);
    let mut accept = keyboard.any_just_pressed([KeyCode::Enter, KeyCode::Space]);
    let mut back = keyboard.any_just_pressed([KeyCode::Escape, KeyCode::Backspace]);
    let mut controller = actions.controller;

    if keyboard.get_just_pressed().next().is_some() {
        controller = ControllerKind::Keyboard;
    }

    for (gamepad, name) in gamepads.iter() {
        let mut stick = gamepad.left_stick();
        if stick.length() < STICK_DEADZONE {
            stick = Vec2::ZERO;
        }
        let pad_direction = stick + gamepad.dpad();
        let pad_jump = gamepad.just_pressed(GamepadButton::South);
        let pad_pause = gamepad.just_pressed(GamepadButton::Start);
        let pad_back = gamepad.just_pressed(GamepadButton::East);

        if pad_direction != Vec2::ZERO || pad_jump || pad_pause || pad_back {
            controller = name
                .map(|n| ControllerKind::from_device_name(n.as_str()))
                .unwrap_or(ControllerKind::Generic);
        }

        direction += pad_direction;
        jump |= pad_jump;
        pause |= pad_pause;
        accept |= pad_jump;
        back |= pad_back;
    }

    let (up, down, left, right) = direction_edges(actions.previous, direction);

    actions.movement = (direction != Vec2::ZERO).then(|| direction.clamp_length_max(1.0));
    actions.jump_pressed = jump || up;
    actions.pause_pressed = pause;
    actions.menu_up = up;
    actions.menu_down = down;
    actions.menu_left = left;
    actions.menu_right = right;
    actions.accept = accept;
    actions.back = back;
    actions.controller = controller;
    actions.previous = direction;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard_app() -> App {
        let mut app = App::new();
        app.init_resource::<ActionState>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(Update, sample_actions);
        app
    }

    #[test]
    fn keyboard_direction_cancels_opposites() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyA);
        keyboard.press(KeyCode::ArrowRight);
        assert_eq!(keyboard_direction(&keyboard), Vec2::ZERO);

        keyboard.release(KeyCode::ArrowRight);
        assert_eq!(keyboard_direction(&keyboard), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn sampling_keyboard_fills_snapshot() {
        let mut app = keyboard_app();

        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keyboard.press(KeyCode::KeyD);
            keyboard.press(KeyCode::Space);
        }
        app.update();

        let actions = app.world().resource::<ActionState>();
        assert_eq!(actions.movement, Some(Vec2::X));
        assert!(actions.jump_pressed);
        assert!(actions.accept);
        assert!(actions.menu_right);
        assert!(!actions.pause_pressed);
        assert_eq!(actions.controller, ControllerKind::Keyboard);
    }

    #[test]
    fn stick_up_jumps_once_per_push() {
        // A gamepad stick going up, then held, then released
        assert_eq!(
            direction_edges(Vec2::ZERO, Vec2::new(0.0, 0.9)),
            (true, false, false, false)
        );
        assert_eq!(
            direction_edges(Vec2::new(0.0, 0.9), Vec2::new(0.1, 0.8)),
            (false, false, false, false)
        );
        assert_eq!(
            direction_edges(Vec2::new(0.0, 0.9), Vec2::ZERO),
            (false, false, false, false)
        );
        assert_eq!(
            direction_edges(Vec2::ZERO, Vec2::new(-0.7, -0.7)),
            (false, true, true, false)
        );
    }

    #[test]
    fn holding_up_is_a_single_jump() {
        let mut app = keyboard_app();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ArrowUp);
        app.update();
        assert!(app.world().resource::<ActionState>().jump_pressed);
        assert!(app.world().resource::<ActionState>().menu_up);

        // Still held on the next tick
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
        app.update();
        let actions = app.world().resource::<ActionState>();
        assert!(!actions.jump_pressed);
        assert!(!actions.menu_up);
        assert_eq!(actions.movement, Some(Vec2::Y));
    }

    #[test]
    fn escape_pauses_and_backs_out() {
        let mut app = keyboard_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();

        let actions = app.world().resource::<ActionState>();
        assert!(actions.pause_pressed);
        assert!(actions.back);
        assert!(!actions.jump_pressed);
    }
}
