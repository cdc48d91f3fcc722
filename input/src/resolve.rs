//! Mapping evaluation: one mapping, one device, one result

use crate::device::{DeviceFamily, DeviceId};
use crate::mapping::ActionMapping;
use crate::platform::InputPlatform;

/// Multiplier applied to stick readings before the deadzone comparison.
///
/// Stick readings and stored thresholds share the unit range.
pub const PRECISION_SCALE: f32 = 1.0;

/// Resolved state of one action.
///
/// `active` is false exactly when the input rests in its neutral position.
/// Digital inputs report `value` 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputResult {
    pub active: bool,
    pub value: f32,
}

impl InputResult {
    pub const INACTIVE: InputResult = InputResult {
        active: false,
        value: 0.0,
    };

    fn digital(on: bool) -> Self {
        Self {
            active: on,
            value: if on { 1.0 } else { 0.0 },
        }
    }

    fn analog(value: f32) -> Self {
        Self {
            active: value != 0.0,
            value,
        }
    }
}

/// Evaluate `mapping` for `device` against the current platform snapshot.
///
/// Mappings of the other family (or an unbound mapping, or the null device)
/// resolve to [`InputResult::INACTIVE`]; handlers reject those at assignment.
pub fn resolve<P: InputPlatform + ?Sized>(
    platform: &P,
    device: DeviceId,
    mapping: &ActionMapping,
) -> InputResult {
    match device.family() {
        Some(DeviceFamily::KeyboardPointer) => resolve_keyboard_pointer(platform, mapping),
        Some(DeviceFamily::Controller) => match device.controller_slot() {
            Some(slot) => resolve_controller(platform, slot, mapping),
            None => InputResult::INACTIVE,
        },
        None => InputResult::INACTIVE,
    }
}

fn resolve_keyboard_pointer<P: InputPlatform + ?Sized>(
    platform: &P,
    mapping: &ActionMapping,
) -> InputResult {
    match *mapping {
        ActionMapping::Key { key, query } => InputResult::digital(platform.key(key, query)),
        ActionMapping::PointerButton { button, query } => {
            InputResult::digital(platform.pointer_button(button, query))
        }
        ActionMapping::PointerPosition { axis } => InputResult {
            // Silent while the pointer is stationary
            active: platform.pointer_delta(axis) != 0.0,
            value: platform.pointer_position(axis),
        },
        ActionMapping::PointerMovement { axis } => {
            InputResult::analog(platform.pointer_delta(axis))
        }
        ActionMapping::Scroll { channel, .. } => InputResult::analog(platform.scroll_delta(channel)),
        _ => InputResult::INACTIVE,
    }
}

fn resolve_controller<P: InputPlatform + ?Sized>(
    platform: &P,
    slot: usize,
    mapping: &ActionMapping,
) -> InputResult {
    match *mapping {
        ActionMapping::Button { button, query } => {
            InputResult::digital(platform.controller_button(slot, button, query))
        }
        ActionMapping::TriggerRaw { trigger, .. } => {
            let value = platform.controller_axis(slot, trigger.axis());
            InputResult {
                active: value != -1.0,
                value,
            }
        }
        ActionMapping::TriggerNormalized { trigger, .. } => {
            let raw = platform.controller_axis(slot, trigger.axis());
            InputResult::analog((raw + 1.0) / 2.0)
        }
        ActionMapping::Joystick { axis, threshold } => {
            let raw = platform.controller_axis(slot, axis);
            if raw.abs() * PRECISION_SCALE > threshold.get() {
                InputResult {
                    active: true,
                    value: raw,
                }
            } else {
                InputResult::INACTIVE
            }
        }
        _ => InputResult::INACTIVE,
    }
}
