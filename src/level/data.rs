//! Level data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::ops::Range;

use super::error::LevelError;

/// Where the level sequence is read from.
pub const LEVELS_PATH: &str = "assets/data/levels.ron";

/// A static platform (axis-aligned box).
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformDef {
    pub center: (f32, f32),
    pub size: (f32, f32),
}

/// An exit trigger volume.
#[derive(Debug, Clone, Deserialize)]
pub struct ExitDef {
    pub center: (f32, f32),
    #[serde(default = "default_exit_size")]
    pub size: (f32, f32),
}

fn default_exit_size() -> (f32, f32) {
    (48.0, 48.0)
}

/// A ball and its control inversions.
#[derive(Debug, Clone, Deserialize)]
pub struct BallDef {
    pub position: (f32, f32),
    /// Horizontal input pushes the other way
    #[serde(default)]
    pub invert_x: bool,
    /// Gravity and jumps point up
    #[serde(default)]
    pub invert_y: bool,
}

/// One level of the sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    /// Localization key of the level title
    pub name: String,
    #[serde(default)]
    pub music: Option<String>,
    pub platforms: Vec<PlatformDef>,
    pub exits: Vec<ExitDef>,
    pub balls: Vec<BallDef>,
}

#[derive(Debug, Clone, Deserialize)]
struct LevelSequenceFile {
    levels: Vec<LevelDefinition>,
}

/// Resource holding the ordered levels of the game.
#[derive(Resource, Debug, Clone)]
pub struct LevelSequence {
    levels: Vec<LevelDefinition>,
}

impl LevelSequence {
    pub fn new(levels: Vec<LevelDefinition>) -> Self {
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelDefinition> {
        self.levels.get(index)
    }

    /// Levels the player may pick from the level select, given the
    /// furthest level ever entered.
    pub fn unlocked(&self, furthest_level: i32) -> Range<usize> {
        let furthest = usize::try_from(furthest_level).unwrap_or(0);
        0..(furthest + 1).min(self.len())
    }

    /// Parse a sequence from RON text. `path` is only used in errors.
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, LevelError> {
        let file: LevelSequenceFile =
            ron::from_str(contents).map_err(|e| LevelError::ParseError {
                path: path.to_string(),
                details: e.to_string(),
            })?;
        if file.levels.is_empty() {
            return Err(LevelError::EmptySequence(path.to_string()));
        }
        if let Some(level) = file.levels.iter().find(|level| level.balls.is_empty()) {
            return Err(LevelError::NoBalls {
                path: path.to_string(),
                name: level.name.clone(),
            });
        }
        Ok(Self::new(file.levels))
    }

    /// Read and parse the sequence file at `path`.
    pub fn from_file(path: &str) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path).map_err(|e| LevelError::ReadError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron(path, &contents)
    }

    /// Three small levels used when no level file is available.
    pub fn builtin() -> Self {
        let floor = PlatformDef {
            center: (0.0, -300.0),
            size: (1200.0, 40.0),
        };
        let ceiling = PlatformDef {
            center: (0.0, 300.0),
            size: (1200.0, 40.0),
        };

        Self::new(vec![
            LevelDefinition {
                name: "level.first_steps".to_string(),
                music: Some("theme".to_string()),
                platforms: vec![floor.clone()],
                exits: vec![ExitDef {
                    center: (450.0, -256.0),
                    size: default_exit_size(),
                }],
                balls: vec![BallDef {
                    position: (-450.0, -200.0),
                    invert_x: false,
                    invert_y: false,
                }],
            },
            LevelDefinition {
                name: "level.mirror".to_string(),
                music: Some("theme".to_string()),
                platforms: vec![floor.clone(), PlatformDef {
                    center: (0.0, -200.0),
                    size: (40.0, 160.0),
                }],
                exits: vec![
                    ExitDef {
                        center: (450.0, -256.0),
                        size: default_exit_size(),
                    },
                    ExitDef {
                        center: (-450.0, -256.0),
                        size: default_exit_size(),
                    },
                ],
                balls: vec![
                    BallDef {
                        position: (-250.0, -200.0),
                        invert_x: false,
                        invert_y: false,
                    },
                    BallDef {
                        position: (250.0, -200.0),
                        invert_x: true,
                        invert_y: false,
                    },
                ],
            },
            LevelDefinition {
                name: "level.upside_down".to_string(),
                music: Some("theme".to_string()),
                platforms: vec![floor, ceiling],
                exits: vec![
                    ExitDef {
                        center: (450.0, -256.0),
                        size: default_exit_size(),
                    },
                    ExitDef {
                        center: (450.0, 256.0),
                        size: default_exit_size(),
                    },
                ],
                balls: vec![
                    BallDef {
                        position: (-450.0, -200.0),
                        invert_x: false,
                        invert_y: false,
                    },
                    BallDef {
                        position: (-450.0, 200.0),
                        invert_x: false,
                        invert_y: true,
                    },
                ],
            },
        ])
    }

    /// Load the sequence from [`LEVELS_PATH`], falling back to [`builtin`](Self::builtin).
    pub fn load() -> Self {
        match Self::from_file(LEVELS_PATH) {
            Ok(sequence) => {
                info!("Loaded {} level(s) from {}", sequence.len(), LEVELS_PATH);
                sequence
            }
            Err(e) => {
                warn!("{}. Using built-in levels.", e);
                Self::builtin()
            }
        }
    }
}

/// System to load the level sequence at startup.
///
/// A sequence inserted by the host app before startup is kept.
pub fn load_level_sequence(mut commands: Commands, existing: Option<Res<LevelSequence>>) {
    if existing.is_none() {
        commands.insert_resource(LevelSequence::load());
    }
}
