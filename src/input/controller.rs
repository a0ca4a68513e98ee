//! Controller families, used only to choose which button prompts to show.

/// Broad family of the device the player is using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControllerKind {
    #[default]
    Keyboard,
    Xbox,
    PlayStation,
    Switch,
    /// Any other gamepad
    Generic,
}

/// Actions that have an on-screen prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    Jump,
    Pause,
}

impl ControllerKind {
    /// Classify a device by the name the OS reports for it.
    pub fn from_device_name(name: &str) -> Self {
        let name = name.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| name.contains(n));

        if has(&["keyboard"]) {
            ControllerKind::Keyboard
        } else if has(&["xbox", "xinput", "microsoft"]) {
            ControllerKind::Xbox
        } else if has(&["playstation", "dualshock", "dualsense", "ps3", "ps4", "ps5", "sony"]) {
            ControllerKind::PlayStation
        } else if has(&["nintendo", "switch", "joy-con", "joycon", "pro controller"]) {
            ControllerKind::Switch
        } else {
            ControllerKind::Generic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerKind::Keyboard => "keyboard",
            ControllerKind::Xbox => "xbox",
            ControllerKind::PlayStation => "playstation",
            ControllerKind::Switch => "switch",
            ControllerKind::Generic => "generic",
        }
    }

    /// Localization key of the prompt for `action` on this device,
    /// e.g. `prompt.jump.xbox`.
    pub fn prompt_key(&self, action: PromptAction) -> String {
        let action = match action {
            PromptAction::Jump => "jump",
            PromptAction::Pause => "pause",
        };
        format!("prompt.{}.{}", action, self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_device_names() {
        let cases = [
            ("Xbox Wireless Controller", ControllerKind::Xbox),
            ("Microsoft X-Box 360 pad", ControllerKind::Xbox),
            ("Sony Interactive Entertainment Wireless Controller", ControllerKind::PlayStation),
            ("DualSense Wireless Controller", ControllerKind::PlayStation),
            ("Nintendo Switch Pro Controller", ControllerKind::Switch),
            ("Joy-Con (L/R)", ControllerKind::Switch),
            ("Generic USB Keyboard", ControllerKind::Keyboard),
            ("8BitDo SN30", ControllerKind::Generic),
            ("", ControllerKind::Generic),
        ];
        for (name, expected) in cases {
            assert_eq!(ControllerKind::from_device_name(name), expected, "{name}");
        }
    }

    #[test]
    fn prompt_keys() {
        assert_eq!(
            ControllerKind::PlayStation.prompt_key(PromptAction::Jump),
            "prompt.jump.playstation"
        );
        assert_eq!(
            ControllerKind::Keyboard.prompt_key(PromptAction::Pause),
            "prompt.pause.keyboard"
        );
    }
}
