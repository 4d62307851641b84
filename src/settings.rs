//! Run configuration
//!
//! Persisted as a JSON file; a missing or malformed file falls back to
//! defaults with a logged note, so a bad edit never blocks a run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::{MazeError, Result};
use crate::maze::Layout;
use crate::session::KeyBindings;

/// Everything a run needs: grid size, world-space sizing, steering, and an
/// optional fixed seed for reproducible mazes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rows: usize,
    pub columns: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    pub wall_thickness: f32,
    pub impulse_speed: f32,
    /// Fixed seed for reproducible mazes; `None` draws one per run
    pub seed: Option<u64>,
    pub bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: consts::DEFAULT_ROWS,
            columns: consts::DEFAULT_COLUMNS,
            cell_width: consts::DEFAULT_CELL_WIDTH,
            cell_height: consts::DEFAULT_CELL_HEIGHT,
            wall_thickness: consts::WALL_THICKNESS,
            impulse_speed: consts::IMPULSE_SPEED,
            seed: None,
            bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Reject dimensions the generator cannot carve
    pub fn validate(&self) -> Result<()> {
        if self.rows < 1 || self.columns < 1 {
            return Err(MazeError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }

    /// World-space sizing derived from these settings
    pub fn layout(&self) -> Layout {
        Layout::new(self.cell_width, self.cell_height, self.wall_thickness)
    }

    /// Load settings from `path`, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!(
                        "ignoring malformed settings file {}: {err}",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to `path`; failure is logged, not fatal
    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("could not serialize settings: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(path, json) {
            log::warn!("could not write settings to {}: {err}", path.display());
        }
    }
}
