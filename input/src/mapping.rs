//! Action mappings: which physical signal an action reads
//!
//! An [`ActionMapping`] is a sum type with one payload shape per input
//! method. Every method belongs to exactly one [`DeviceFamily`]; tables only
//! accept mappings of their own family, checked once at assignment time.

use half::f16;
use serde::{Deserialize, Serialize};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::device::DeviceFamily;
use crate::error::InputError;

/// Dense index of a logical action (`0..N`)
pub type ActionId = usize;

/// Tag bit shared by every controller-family [`InputMethod`]
pub const CONTROLLER_FAMILY_BIT: u8 = 0x40;

/// Flat list of retrieval strategies.
///
/// Keyboard/pointer methods occupy `0x01..0x40`, controller methods carry
/// [`CONTROLLER_FAMILY_BIT`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMethod {
    None = 0x00,

    KeyPressed = 0x01,
    KeyReleased = 0x02,
    KeyDown = 0x03,
    KeyUp = 0x04,
    PointerPressed = 0x05,
    PointerReleased = 0x06,
    PointerDown = 0x07,
    PointerUp = 0x08,
    PointerPosition = 0x09,
    PointerMovement = 0x0A,
    Scroll = 0x0B,

    ButtonPressed = 0x41,
    ButtonReleased = 0x42,
    ButtonDown = 0x43,
    ButtonUp = 0x44,
    TriggerRaw = 0x45,
    TriggerNormalized = 0x46,
    Joystick = 0x47,
}

impl InputMethod {
    /// Device family this method reads from; `None` fits either family.
    pub fn family(self) -> Option<DeviceFamily> {
        let bits = self as u8;
        if bits == 0 {
            None
        } else if bits & CONTROLLER_FAMILY_BIT != 0 {
            Some(DeviceFamily::Controller)
        } else {
            Some(DeviceFamily::KeyboardPointer)
        }
    }
}

/// Which edge or level of a digital input to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitalQuery {
    /// Went down this frame
    Pressed,
    /// Went up this frame
    Released,
    /// Held
    #[default]
    Down,
    /// Not held
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerAxis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScrollAxis {
    #[default]
    Vertical,
    Horizontal,
}

/// Gamepad buttons (Xbox layout: South=A, East=B, West=X, North=Y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerButton {
    South,
    East,
    West,
    North,
    LeftBumper,
    RightBumper,
    LeftThumb,
    RightThumb,
    Start,
    Select,
    Mode,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl ControllerButton {
    pub const COUNT: usize = 15;

    pub const ALL: [ControllerButton; Self::COUNT] = [
        ControllerButton::South,
        ControllerButton::East,
        ControllerButton::West,
        ControllerButton::North,
        ControllerButton::LeftBumper,
        ControllerButton::RightBumper,
        ControllerButton::LeftThumb,
        ControllerButton::RightThumb,
        ControllerButton::Start,
        ControllerButton::Select,
        ControllerButton::Mode,
        ControllerButton::DPadUp,
        ControllerButton::DPadDown,
        ControllerButton::DPadLeft,
        ControllerButton::DPadRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Gamepad axes, all reported in `[-1, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerAxis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    /// Left trigger, -1 when released
    LeftZ,
    /// Right trigger, -1 when released
    RightZ,
}

impl ControllerAxis {
    pub const COUNT: usize = 6;

    pub const ALL: [ControllerAxis; Self::COUNT] = [
        ControllerAxis::LeftStickX,
        ControllerAxis::LeftStickY,
        ControllerAxis::RightStickX,
        ControllerAxis::RightStickY,
        ControllerAxis::LeftZ,
        ControllerAxis::RightZ,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    Left,
    Right,
}

impl Trigger {
    pub fn axis(self) -> ControllerAxis {
        match self {
            Trigger::Left => ControllerAxis::LeftZ,
            Trigger::Right => ControllerAxis::RightZ,
        }
    }
}

/// Analog threshold stored as an IEEE 754 half-float.
///
/// Mapping tables hold one per analog action per family; expanded to `f32`
/// only when a mapping is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Threshold(f16);

impl Threshold {
    pub const ZERO: Threshold = Threshold(f16::ZERO);

    pub fn new(value: f32) -> Self {
        Threshold(f16::from_f32(value))
    }

    /// Expanded full-precision value
    pub fn get(self) -> f32 {
        self.0.to_f32()
    }
}

impl From<f32> for Threshold {
    fn from(value: f32) -> Self {
        Threshold::new(value)
    }
}

impl From<Threshold> for f32 {
    fn from(threshold: Threshold) -> Self {
        threshold.get()
    }
}

fn default_stick_deadzone() -> Threshold {
    Threshold::new(0.15)
}

/// One action's binding to a physical signal.
///
/// Serialized as an inline table tagged by `method`, e.g.
/// `{ method = "key", key = "Space", query = "down" }`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ActionMapping {
    /// Unbound; always resolves inactive
    #[default]
    None,

    Key {
        #[serde(with = "crate::names::key")]
        key: KeyCode,
        #[serde(default)]
        query: DigitalQuery,
    },
    PointerButton {
        #[serde(with = "crate::names::mouse_button")]
        button: MouseButton,
        #[serde(default)]
        query: DigitalQuery,
    },
    /// Absolute pointer coordinate, active only while the pointer moves
    PointerPosition { axis: PointerAxis },
    /// Pointer delta this frame
    PointerMovement { axis: PointerAxis },
    Scroll {
        #[serde(default)]
        channel: ScrollAxis,
        #[serde(default)]
        threshold: Threshold,
    },

    Button {
        button: ControllerButton,
        #[serde(default)]
        query: DigitalQuery,
    },
    /// Trigger axis as reported, `[-1, 1]`
    TriggerRaw {
        trigger: Trigger,
        #[serde(default)]
        threshold: Threshold,
    },
    /// Trigger axis remapped to `[0, 1]`
    TriggerNormalized {
        trigger: Trigger,
        #[serde(default)]
        threshold: Threshold,
    },
    /// Stick axis with a deadzone
    Joystick {
        axis: ControllerAxis,
        #[serde(default = "default_stick_deadzone")]
        threshold: Threshold,
    },
}

impl ActionMapping {
    pub fn key(key: KeyCode, query: DigitalQuery) -> Self {
        ActionMapping::Key { key, query }
    }

    pub fn key_down(key: KeyCode) -> Self {
        Self::key(key, DigitalQuery::Down)
    }

    pub fn key_pressed(key: KeyCode) -> Self {
        Self::key(key, DigitalQuery::Pressed)
    }

    pub fn pointer_button(button: MouseButton, query: DigitalQuery) -> Self {
        ActionMapping::PointerButton { button, query }
    }

    pub fn pointer_position(axis: PointerAxis) -> Self {
        ActionMapping::PointerPosition { axis }
    }

    pub fn pointer_movement(axis: PointerAxis) -> Self {
        ActionMapping::PointerMovement { axis }
    }

    pub fn scroll(channel: ScrollAxis) -> Self {
        ActionMapping::Scroll {
            channel,
            threshold: Threshold::ZERO,
        }
    }

    pub fn button(button: ControllerButton, query: DigitalQuery) -> Self {
        ActionMapping::Button { button, query }
    }

    pub fn button_down(button: ControllerButton) -> Self {
        Self::button(button, DigitalQuery::Down)
    }

    pub fn button_pressed(button: ControllerButton) -> Self {
        Self::button(button, DigitalQuery::Pressed)
    }

    pub fn trigger_raw(trigger: Trigger) -> Self {
        ActionMapping::TriggerRaw {
            trigger,
            threshold: Threshold::ZERO,
        }
    }

    pub fn trigger_normalized(trigger: Trigger) -> Self {
        ActionMapping::TriggerNormalized {
            trigger,
            threshold: Threshold::ZERO,
        }
    }

    pub fn joystick(axis: ControllerAxis, deadzone: f32) -> Self {
        ActionMapping::Joystick {
            axis,
            threshold: Threshold::new(deadzone),
        }
    }

    /// Flat method tag of this mapping
    pub fn method(&self) -> InputMethod {
        use DigitalQuery::*;
        match *self {
            ActionMapping::None => InputMethod::None,
            ActionMapping::Key { query, .. } => match query {
                Pressed => InputMethod::KeyPressed,
                Released => InputMethod::KeyReleased,
                Down => InputMethod::KeyDown,
                Up => InputMethod::KeyUp,
            },
            ActionMapping::PointerButton { query, .. } => match query {
                Pressed => InputMethod::PointerPressed,
                Released => InputMethod::PointerReleased,
                Down => InputMethod::PointerDown,
                Up => InputMethod::PointerUp,
            },
            ActionMapping::PointerPosition { .. } => InputMethod::PointerPosition,
            ActionMapping::PointerMovement { .. } => InputMethod::PointerMovement,
            ActionMapping::Scroll { .. } => InputMethod::Scroll,
            ActionMapping::Button { query, .. } => match query {
                Pressed => InputMethod::ButtonPressed,
                Released => InputMethod::ButtonReleased,
                Down => InputMethod::ButtonDown,
                Up => InputMethod::ButtonUp,
            },
            ActionMapping::TriggerRaw { .. } => InputMethod::TriggerRaw,
            ActionMapping::TriggerNormalized { .. } => InputMethod::TriggerNormalized,
            ActionMapping::Joystick { .. } => InputMethod::Joystick,
        }
    }

    pub fn family(&self) -> Option<DeviceFamily> {
        self.method().family()
    }

    /// Whether a table for `family` may hold this mapping
    pub fn accepts(&self, family: DeviceFamily) -> bool {
        self.family().is_none_or(|f| f == family)
    }

    /// Analog threshold, if this method carries one
    pub fn threshold(&self) -> Option<Threshold> {
        match *self {
            ActionMapping::Scroll { threshold, .. }
            | ActionMapping::TriggerRaw { threshold, .. }
            | ActionMapping::TriggerNormalized { threshold, .. }
            | ActionMapping::Joystick { threshold, .. } => Some(threshold),
            _ => None,
        }
    }
}

/// Fixed-length mapping table for one device family.
///
/// Sized once at creation; every slot starts as [`ActionMapping::None`].
#[derive(Debug, Clone)]
pub struct MappingTable {
    family: DeviceFamily,
    mappings: Vec<ActionMapping>,
}

impl MappingTable {
    /// Allocate a table of `len` unbound actions
    pub fn new(family: DeviceFamily, len: usize) -> Result<Self, InputError> {
        let mut mappings = Vec::new();
        mappings.try_reserve_exact(len)?;
        mappings.resize(len, ActionMapping::None);
        Ok(Self { family, mappings })
    }

    pub fn family(&self) -> DeviceFamily {
        self.family
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn get(&self, action: ActionId) -> Result<&ActionMapping, InputError> {
        self.mappings.get(action).ok_or(InputError::ActionOutOfRange {
            action,
            len: self.mappings.len(),
        })
    }

    pub fn as_slice(&self) -> &[ActionMapping] {
        &self.mappings
    }

    /// Store `mapping` at `action`.
    ///
    /// The table is left unchanged on error.
    pub fn assign(&mut self, action: ActionId, mapping: ActionMapping) -> Result<(), InputError> {
        let len = self.mappings.len();
        let slot = self
            .mappings
            .get_mut(action)
            .ok_or(InputError::ActionOutOfRange { action, len })?;
        if !mapping.accepts(self.family) {
            return Err(InputError::FamilyMismatch {
                method: mapping.method(),
                family: self.family,
            });
        }
        *slot = mapping;
        Ok(())
    }

    /// Assign every slot from `mappings`, returning how many were rejected.
    ///
    /// Rejected slots keep their previous mapping; valid ones are stored even
    /// when others fail.
    pub fn assign_all(&mut self, mappings: &[ActionMapping]) -> Result<usize, InputError> {
        if mappings.len() != self.mappings.len() {
            return Err(InputError::LengthMismatch {
                expected: self.mappings.len(),
                actual: mappings.len(),
            });
        }
        let mut rejected = 0;
        for (action, mapping) in mappings.iter().enumerate() {
            if let Err(e) = self.assign(action, *mapping) {
                tracing::warn!("Rejected mapping for action {}: {}", action, e);
                rejected += 1;
            }
        }
        Ok(rejected)
    }
}
