//! Menu pages and their navigation.
//!
//! Every menu (main, level select, options, pause) is a page on the
//! [`MenuStack`]; only the top page is shown. Keyboard, gamepad and mouse
//! all move the same [`MenuCursor`] and produce [`MenuCommand`]s, which the
//! plugin's handlers act on.

use bevy::prelude::*;

use super::options::{setting_label, SettingKind};
use crate::input::ActionState;
use crate::level::LevelSequence;
use crate::localization::Translations;
use crate::save::{SaveData, SaveGame};

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_SELECTED: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPage {
    Main,
    LevelSelect,
    Options,
    Pause,
}

/// Open menu pages, innermost last.
#[derive(Resource, Debug, Default)]
pub struct MenuStack {
    pages: Vec<MenuPage>,
}

impl MenuStack {
    pub fn top(&self) -> Option<MenuPage> {
        self.pages.last().copied()
    }

    pub fn push(&mut self, page: MenuPage) {
        self.pages.push(page);
    }

    /// Close the top page. The bottom page stays open.
    pub fn pop(&mut self) -> bool {
        if self.pages.len() > 1 {
            self.pages.pop();
            true
        } else {
            false
        }
    }

    /// Replace everything with a single page.
    pub fn reset(&mut self, page: MenuPage) {
        self.pages.clear();
        self.pages.push(page);
    }

    pub fn clear(&mut self) {
        self.pages.clear();
    }
}

/// What a menu entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Continue(usize),
    NewGame,
    LevelSelect,
    Options,
    Quit,
    StartLevel(usize),
    Resume,
    MainMenu,
    Back,
    Setting(SettingKind),
}

/// A request coming out of the menus.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// The entry was chosen.
    Activate(MenuAction),
    /// Left or right on the entry.
    Adjust(MenuAction, i32),
    /// Leave the current page.
    Back,
}

/// Selected entry of the page on screen.
#[derive(Resource, Debug, Default)]
pub struct MenuCursor {
    page: Option<MenuPage>,
    index: usize,
    len: usize,
}

impl MenuCursor {
    pub fn page(&self) -> Option<MenuPage> {
        self.page
    }

    pub fn index(&self) -> usize {
        self.index
    }

    fn step(&mut self, delta: i32) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index as i32 + delta).rem_euclid(self.len as i32) as usize;
    }
}

/// Marker for every entity of the page on screen.
#[derive(Component)]
pub struct MenuUi;

/// One selectable entry.
#[derive(Component, Debug, Clone, Copy)]
pub struct MenuItem {
    pub index: usize,
    pub action: MenuAction,
}

/// Title and entries of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub title: String,
    pub items: Vec<(String, MenuAction)>,
}

/// Build a page's text from the save record and level list.
pub fn page_content(
    page: MenuPage,
    save: &SaveData,
    sequence: &LevelSequence,
    translations: &Translations,
) -> PageContent {
    let entry = |key: &str, action| (translations.text(key), action);

    match page {
        MenuPage::Main => {
            let mut items = Vec::new();
            if let Some(level) = save.continue_level().filter(|&l| l < sequence.len()) {
                items.push(entry("menu.continue", MenuAction::Continue(level)));
            }
            items.push(entry("menu.new_game", MenuAction::NewGame));
            items.push(entry("menu.levels", MenuAction::LevelSelect));
            items.push(entry("menu.options", MenuAction::Options));
            items.push(entry("menu.quit", MenuAction::Quit));
            PageContent {
                title: translations.text("menu.title"),
                items,
            }
        }
        MenuPage::LevelSelect => {
            let mut items: Vec<_> = sequence
                .unlocked(save.furthest_level)
                .filter_map(|level| {
                    let def = sequence.get(level)?;
                    let label = format!("{}. {}", level + 1, translations.text(&def.name));
                    Some((label, MenuAction::StartLevel(level)))
                })
                .collect();
            items.push(entry("menu.back", MenuAction::Back));
            PageContent {
                title: translations.text("levels.title"),
                items,
            }
        }
        MenuPage::Options => {
            let mut items: Vec<_> = SettingKind::ALL
                .iter()
                .map(|&kind| (setting_label(kind, save, translations), MenuAction::Setting(kind)))
                .collect();
            items.push(entry("menu.back", MenuAction::Back));
            PageContent {
                title: translations.text("options.title"),
                items,
            }
        }
        MenuPage::Pause => PageContent {
            title: translations.text("pause.title"),
            items: vec![
                entry("pause.resume", MenuAction::Resume),
                entry("menu.options", MenuAction::Options),
                entry("pause.main_menu", MenuAction::MainMenu),
            ],
        },
    }
}

/// Respawn the page on screen when the stack, settings or language change.
pub fn rebuild_menu(
    mut commands: Commands,
    stack: Res<MenuStack>,
    save: Res<SaveGame>,
    sequence: Res<LevelSequence>,
    translations: Res<Translations>,
    mut cursor: ResMut<MenuCursor>,
    existing: Query<Entity, With<MenuUi>>,
) {
    if !stack.is_changed() && !save.is_changed() && !translations.is_changed() {
        return;
    }
    for entity in existing.iter() {
        commands.entity(entity).despawn_recursive();
    }

    let Some(page) = stack.top() else {
        *cursor = MenuCursor::default();
        return;
    };
    let content = page_content(page, &save.data, &sequence, &translations);

    if cursor.page != Some(page) {
        cursor.page = Some(page);
        cursor.index = 0;
    }
    cursor.len = content.items.len();
    cursor.index = cursor.index.min(cursor.len.saturating_sub(1));

    spawn_page(&mut commands, page, content);
}

fn spawn_page(commands: &mut Commands, page: MenuPage, content: PageContent) {
    // The pause page lets the frozen level show through
    let (background, title_size) = match page {
        MenuPage::Pause => (Color::srgba(0.0, 0.0, 0.0, 0.7), 48.0),
        MenuPage::Main => (Color::srgb(0.05, 0.05, 0.08), 80.0),
        _ => (Color::srgb(0.05, 0.05, 0.08), 48.0),
    };

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(background),
            GlobalZIndex(10),
            MenuUi,
        ))
        .with_children(|parent| {
            // Title
            parent.spawn((
                Text::new(content.title),
                TextFont {
                    font_size: title_size,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.85, 0.7)),
                Node {
                    margin: UiRect::bottom(Val::Px(50.0)),
                    ..default()
                },
            ));

            for (index, (label, action)) in content.items.into_iter().enumerate() {
                spawn_menu_button(parent, label, MenuItem { index, action });
            }
        });
}

/// Helper to spawn a menu button.
fn spawn_menu_button(parent: &mut ChildBuilder, text: String, item: MenuItem) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(320.0),
                height: Val::Px(48.0),
                margin: UiRect::all(Val::Px(8.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            item,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Turn keyboard and gamepad actions into cursor moves and commands.
pub fn read_menu_actions(
    actions: Res<ActionState>,
    stack: Res<MenuStack>,
    mut cursor: ResMut<MenuCursor>,
    items: Query<&MenuItem>,
    mut out: EventWriter<MenuCommand>,
) {
    let Some(top) = stack.top() else {
        return;
    };
    // Page not built yet
    if cursor.page != Some(top) {
        return;
    }

    // Pause again closes the pause page, like its Resume entry
    if actions.back || (actions.pause_pressed && top == MenuPage::Pause) {
        out.send(MenuCommand::Back);
        return;
    }

    if actions.menu_up {
        cursor.step(-1);
    }
    if actions.menu_down {
        cursor.step(1);
    }

    let Some(selected) = items.iter().find(|item| item.index == cursor.index) else {
        return;
    };
    if actions.menu_left {
        out.send(MenuCommand::Adjust(selected.action, -1));
    }
    if actions.menu_right {
        out.send(MenuCommand::Adjust(selected.action, 1));
    }
    if actions.accept {
        out.send(MenuCommand::Activate(selected.action));
    }
}

/// Mouse hover selects an entry, a click activates it.
pub fn read_menu_pointer(
    items: Query<(&Interaction, &MenuItem), Changed<Interaction>>,
    mut cursor: ResMut<MenuCursor>,
    mut out: EventWriter<MenuCommand>,
) {
    for (interaction, item) in items.iter() {
        match interaction {
            Interaction::Hovered => cursor.index = item.index,
            Interaction::Pressed => {
                cursor.index = item.index;
                out.send(MenuCommand::Activate(item.action));
            }
            Interaction::None => {}
        }
    }
}

/// Color entries by selection.
pub fn highlight_menu(
    cursor: Res<MenuCursor>,
    mut items: Query<(&MenuItem, &Interaction, &mut BackgroundColor)>,
) {
    for (item, interaction, mut bg_color) in items.iter_mut() {
        let color = if *interaction == Interaction::Pressed {
            BUTTON_PRESSED
        } else if item.index == cursor.index {
            BUTTON_SELECTED
        } else {
            BUTTON_IDLE
        };
        if bg_color.0 != color {
            bg_color.0 = color;
        }
    }
}
