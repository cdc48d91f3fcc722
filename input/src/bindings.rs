//! Bindings file (`bindings.toml`)
//!
//! Names each action and gives its keyboard+pointer and controller mapping:
//!
//! ```toml
//! [[actions]]
//! name = "jump"
//! keyboard = { method = "key", key = "Space" }
//! controller = { method = "button", button = "South" }
//!
//! [[actions]]
//! name = "move_x"
//! controller = { method = "joystick", axis = "LeftStickX", threshold = 0.08 }
//! ```
//!
//! Action IDs are assigned in file order. A side left out stays unbound.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::basic::BasicHandler;
use crate::device::{DeviceFamily, DeviceId};
use crate::error::InputError;
use crate::greedy::GreedyHandler;
use crate::mapping::{ActionId, ActionMapping, ControllerAxis, ControllerButton};

#[derive(Debug, thiserror::Error)]
pub enum BindingsError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid bindings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to write bindings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("action '{0}' is defined more than once")]
    DuplicateAction(String),

    #[error(transparent)]
    Input(#[from] InputError),
}

fn is_unbound(mapping: &ActionMapping) -> bool {
    *mapping == ActionMapping::None
}

/// One named action and its mapping on each device family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionBinding {
    pub name: String,
    #[serde(default, skip_serializing_if = "is_unbound")]
    pub keyboard: ActionMapping,
    #[serde(default, skip_serializing_if = "is_unbound")]
    pub controller: ActionMapping,
}

impl ActionBinding {
    pub fn new(name: impl Into<String>, keyboard: ActionMapping, controller: ActionMapping) -> Self {
        Self {
            name: name.into(),
            keyboard,
            controller,
        }
    }
}

/// Outcome of building a handler from bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildReport {
    /// Mappings rejected for belonging to the wrong device family
    pub rejected: usize,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.rejected == 0
    }
}

/// Action bindings for every device family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingsConfig {
    #[serde(default)]
    pub actions: Vec<ActionBinding>,
}

impl Default for BindingsConfig {
    /// Menu navigation: arrows/D-pad, Enter/A to confirm, Escape/B to go back,
    /// left stick for analog movement.
    fn default() -> Self {
        use ActionMapping as M;
        Self {
            actions: vec![
                ActionBinding::new(
                    "up",
                    M::key_down(KeyCode::ArrowUp),
                    M::button_down(ControllerButton::DPadUp),
                ),
                ActionBinding::new(
                    "down",
                    M::key_down(KeyCode::ArrowDown),
                    M::button_down(ControllerButton::DPadDown),
                ),
                ActionBinding::new(
                    "left",
                    M::key_down(KeyCode::ArrowLeft),
                    M::button_down(ControllerButton::DPadLeft),
                ),
                ActionBinding::new(
                    "right",
                    M::key_down(KeyCode::ArrowRight),
                    M::button_down(ControllerButton::DPadRight),
                ),
                ActionBinding::new(
                    "confirm",
                    M::key_pressed(KeyCode::Enter),
                    M::button_pressed(ControllerButton::South),
                ),
                ActionBinding::new(
                    "back",
                    M::key_pressed(KeyCode::Escape),
                    M::button_pressed(ControllerButton::East),
                ),
                ActionBinding::new(
                    "move_x",
                    M::None,
                    M::joystick(ControllerAxis::LeftStickX, 0.15),
                ),
                ActionBinding::new(
                    "move_y",
                    M::None,
                    M::joystick(ControllerAxis::LeftStickY, 0.15),
                ),
            ],
        }
    }
}

impl BindingsConfig {
    /// Parse bindings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, BindingsError> {
        let config: BindingsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, BindingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, BindingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| BindingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Write bindings to `path`, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), BindingsError> {
        let io_err = |source| BindingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        std::fs::write(path, self.to_toml_string()?).map_err(io_err)?;
        Ok(())
    }

    /// `bindings.toml` in the platform config directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("io.nethercore", "", "Nethercore")
            .map(|dirs| dirs.config_dir().join("bindings.toml"))
    }

    /// Load from [`default_path`](Self::default_path), falling back to the
    /// default bindings if the file is absent or invalid.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring {}: {}. Using default bindings.", path.display(), e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), BindingsError> {
        for (i, action) in self.actions.iter().enumerate() {
            if self.actions[..i].iter().any(|a| a.name == action.name) {
                return Err(BindingsError::DuplicateAction(action.name.clone()));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Action ID of the action called `name`
    pub fn action_id(&self, name: &str) -> Option<ActionId> {
        self.actions.iter().position(|a| a.name == name)
    }

    pub fn action_name(&self, action: ActionId) -> Option<&str> {
        self.actions.get(action).map(|a| a.name.as_str())
    }

    /// Mapping table for one device family, in action order
    pub fn mappings(&self, family: DeviceFamily) -> Vec<ActionMapping> {
        self.actions
            .iter()
            .map(|a| match family {
                DeviceFamily::KeyboardPointer => a.keyboard,
                DeviceFamily::Controller => a.controller,
            })
            .collect()
    }

    /// Build a greedy handler over every device.
    ///
    /// Mappings on the wrong side (e.g. a key under `controller`) are skipped,
    /// logged, and counted in the report.
    pub fn build_greedy(&self) -> Result<(GreedyHandler, BuildReport), BindingsError> {
        let mut handler = GreedyHandler::new(self.len())?;
        let rejected = handler.assign_all(
            &self.mappings(DeviceFamily::KeyboardPointer),
            &self.mappings(DeviceFamily::Controller),
        )?;
        Ok((handler, self.report(rejected)))
    }

    /// Build a handler bound to `device`, using that device family's side
    pub fn build_basic(
        &self,
        device: DeviceId,
    ) -> Result<(BasicHandler, BuildReport), BindingsError> {
        let family = device.family().ok_or(InputError::NullDevice)?;
        let mut handler = BasicHandler::new(device, self.len())?;
        let rejected = handler.assign_all(&self.mappings(family))?;
        Ok((handler, self.report(rejected)))
    }

    fn report(&self, rejected: usize) -> BuildReport {
        if rejected > 0 {
            tracing::warn!(
                "{} of {} action mappings rejected (wrong device family)",
                rejected,
                self.len()
            );
        }
        BuildReport { rejected }
    }
}
