//! UI module - menus, pause overlay and HUD.

mod hud;
mod menu;
mod options;
mod plugin;

pub use hud::{BallCountText, HudRoot, LevelNameText, PromptText};
pub use menu::{page_content, MenuAction, MenuCommand, MenuCursor, MenuPage, MenuStack, PageContent};
pub use options::SettingKind;
pub use plugin::UiPlugin;
