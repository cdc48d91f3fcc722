//! Device identities and families

use std::fmt;

/// Number of addressable controller slots (`0..MAX_CONTROLLERS`)
pub const MAX_CONTROLLERS: usize = 8;

/// Which group of input methods a device understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceFamily {
    /// The single keyboard-and-pointer device
    KeyboardPointer,
    /// Any gamepad slot
    Controller,
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceFamily::KeyboardPointer => f.write_str("keyboard+pointer"),
            DeviceFamily::Controller => f.write_str("controller"),
        }
    }
}

/// Identity of a physical input device.
///
/// Non-negative values are controller slots. Two negative sentinels exist:
/// [`DeviceId::KEYBOARD_POINTER`] and [`DeviceId::NONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(i32);

impl DeviceId {
    /// The keyboard-and-pointer device (always considered connected)
    pub const KEYBOARD_POINTER: DeviceId = DeviceId(-1);
    /// No device
    pub const NONE: DeviceId = DeviceId(-2);

    /// Identity of controller slot `slot`, or `None` past [`MAX_CONTROLLERS`].
    pub const fn controller(slot: usize) -> Option<DeviceId> {
        if slot < MAX_CONTROLLERS {
            Some(DeviceId(slot as i32))
        } else {
            None
        }
    }

    /// Controller slot index if this is a controller
    pub fn controller_slot(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    /// Family of this device, `None` for [`DeviceId::NONE`]
    pub fn family(self) -> Option<DeviceFamily> {
        match self {
            DeviceId::KEYBOARD_POINTER => Some(DeviceFamily::KeyboardPointer),
            DeviceId::NONE => None,
            _ => Some(DeviceFamily::Controller),
        }
    }

    pub fn is_keyboard_pointer(self) -> bool {
        self == DeviceId::KEYBOARD_POINTER
    }

    pub fn is_none(self) -> bool {
        self == DeviceId::NONE
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        DeviceId::KEYBOARD_POINTER
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.controller_slot() {
            Some(slot) => write!(f, "controller #{}", slot),
            None if self.is_keyboard_pointer() => f.write_str("keyboard+pointer"),
            None => f.write_str("none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_slots_in_range() {
        for slot in 0..MAX_CONTROLLERS {
            let id = DeviceId::controller(slot).expect("slot in range");
            assert_eq!(id.controller_slot(), Some(slot));
            assert_eq!(id.family(), Some(DeviceFamily::Controller));
        }
        assert_eq!(DeviceId::controller(MAX_CONTROLLERS), None);
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(DeviceId::KEYBOARD_POINTER.controller_slot(), None);
        assert_eq!(
            DeviceId::KEYBOARD_POINTER.family(),
            Some(DeviceFamily::KeyboardPointer)
        );
        assert_eq!(DeviceId::NONE.family(), None);
        assert_eq!(DeviceId::default(), DeviceId::KEYBOARD_POINTER);
    }

    #[test]
    fn test_display() {
        assert_eq!(DeviceId::KEYBOARD_POINTER.to_string(), "keyboard+pointer");
        assert_eq!(DeviceId::NONE.to_string(), "none");
        assert_eq!(DeviceId::controller(3).unwrap().to_string(), "controller #3");
    }
}
