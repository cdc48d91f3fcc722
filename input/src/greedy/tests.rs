//! Tests for GreedyHandler

use super::GreedyHandler;
use crate::device::{DeviceFamily, DeviceId};
use crate::error::InputError;
use crate::mapping::{ActionMapping, ControllerAxis, ControllerButton, Trigger};
use crate::resolve::InputResult;
use crate::snapshot::InputSnapshot;
use crate::status::DeviceStatus;
use winit::keyboard::KeyCode;

const JUMP: usize = 0;
const FIRE: usize = 1;
const MOVE_X: usize = 2;

fn pad(slot: usize) -> DeviceId {
    DeviceId::controller(slot).unwrap()
}

/// Jump on Space (keyboard), fire on South (controller), move on left stick X
fn handler() -> GreedyHandler {
    let mut handler = GreedyHandler::new(3).unwrap();
    let rejected = handler
        .assign_all(
            &[
                ActionMapping::key_down(KeyCode::Space),
                ActionMapping::None,
                ActionMapping::None,
            ],
            &[
                ActionMapping::None,
                ActionMapping::button_down(ControllerButton::South),
                ActionMapping::joystick(ControllerAxis::LeftStickX, 0.08),
            ],
        )
        .unwrap();
    assert_eq!(rejected, 0);
    handler
}

fn connect(snapshot: &mut InputSnapshot, slot: usize) {
    snapshot.controller_mut(slot).unwrap().connect();
}

fn press(snapshot: &mut InputSnapshot, slot: usize, button: ControllerButton, down: bool) {
    snapshot.controller_mut(slot).unwrap().set_button(button, down);
}

const ON: InputResult = InputResult {
    active: true,
    value: 1.0,
};

#[test]
fn test_new_handler_is_initial_on_keyboard() {
    let handler = handler();
    assert_eq!(handler.status(), DeviceStatus::Initial);
    assert_eq!(handler.active_device(), DeviceId::KEYBOARD_POINTER);
    assert_eq!(handler.get_all_values(), &[InputResult::INACTIVE; 3]);
}

#[test]
fn test_keyboard_only_scenario() {
    let mut handler = handler();
    let mut snapshot = InputSnapshot::new();
    snapshot.set_key(KeyCode::Space, true);

    let (device, results) = handler.update(&snapshot);
    assert_eq!(device, DeviceId::KEYBOARD_POINTER);
    assert_eq!(results, &[ON, InputResult::INACTIVE, InputResult::INACTIVE]);
    assert_eq!(handler.status(), DeviceStatus::Active);
}

#[test]
fn test_first_connected_controller_with_input_wins() {
    let mut handler = handler();
    let mut snapshot = InputSnapshot::new();
    for slot in [2, 5] {
        connect(&mut snapshot, slot);
        press(&mut snapshot, slot, ControllerButton::South, true);
    }

    let (device, results) = handler.update(&snapshot);
    assert_eq!(device, pad(2));
    assert_eq!(results[FIRE], ON);
    assert_eq!(handler.status(), DeviceStatus::ChangedIdleToActive);
}

#[test]
fn test_transition_marker_lasts_one_update() {
    let mut handler = handler();
    let mut snapshot = InputSnapshot::new();
    connect(&mut snapshot, 0);
    press(&mut snapshot, 0, ControllerButton::South, true);

    handler.update(&snapshot);
    assert_eq!(handler.status(), DeviceStatus::ChangedIdleToActive);

    snapshot.next_frame();
    handler.update(&snapshot);
    assert_eq!(handler.status(), DeviceStatus::Active);
    assert_eq!(handler.active_device(), pad(0));

    press(&mut snapshot, 0, ControllerButton::South, false);
    snapshot.next_frame();
    handler.update(&snapshot);
    assert_eq!(handler.status(), DeviceStatus::Idle);
    assert_eq!(handler.active_device(), pad(0));
}

#[test]
fn test_active_device_in_use_is_not_replaced() {
    let mut handler = handler();
    let mut snapshot = InputSnapshot::new();
    connect(&mut snapshot, 3);
    press(&mut snapshot, 3, ControllerButton::South, true);
    handler.update(&snapshot);
    assert_eq!(handler.active_device(), pad(3));

    // Keyboard and a lower slot both produce input, but slot 3 still does too
    snapshot.set_key(KeyCode::Space, true);
    connect(&mut snapshot, 0);
    press(&mut snapshot, 0, ControllerButton::South, true);
    snapshot.next_frame();

    let (device, results) = handler.update(&snapshot);
    assert_eq!(device, pad(3));
    assert_eq!(results[JUMP], InputResult::INACTIVE);
    assert_eq!(handler.status(), DeviceStatus::Active);
}

#[test]
fn test_idle_controller_yields_to_keyboard() {
    let mut handler = handler();
    let mut snapshot = InputSnapshot::new();
    connect(&mut snapshot, 1);
    press(&mut snapshot, 1, ControllerButton::South, true);
    handler.update(&snapshot);

    press(&mut snapshot, 1, ControllerButton::South, false);
    snapshot.set_key(KeyCode::Space, true);
    snapshot.next_frame();

    let (device, results) = handler.update(&snapshot);
    assert_eq!(device, DeviceId::KEYBOARD_POINTER);
    assert_eq!(results[JUMP], ON);
    assert_eq!(handler.status(), DeviceStatus::ChangedIdleToActive);
}

#[test]
fn test_no_input_keeps_active_device() {
    let mut handler = handler();
    let mut snapshot = InputSnapshot::new();
    connect(&mut snapshot, 0);
    connect(&mut snapshot, 4);

    let (device, _) = handler.update(&snapshot);
    assert_eq!(device, DeviceId::KEYBOARD_POINTER);
    assert_eq!(handler.status(), DeviceStatus::Idle);

    // Same with a controller as the active device
    press(&mut snapshot, 4, ControllerButton::South, true);
    handler.update(&snapshot);
    press(&mut snapshot, 4, ControllerButton::South, false);
    snapshot.next_frame();

    let (device, results) = handler.update(&snapshot);
    assert_eq!(device, pad(4));
    assert_eq!(results, &[InputResult::INACTIVE; 3]);
    assert_eq!(handler.status(), DeviceStatus::Idle);
}

#[test]
fn test_missing_controller_falls_back_to_keyboard() {
    let mut handler = handler();
    let mut snapshot = InputSnapshot::new();
    connect(&mut snapshot, 2);
    press(&mut snapshot, 2, ControllerButton::South, true);
    handler.update(&snapshot);
    assert_eq!(handler.active_device(), pad(2));

    snapshot.controller_mut(2).unwrap().disconnect();
    snapshot.next_frame();

    let (device, results) = handler.update(&snapshot);
    assert_eq!(device, DeviceId::KEYBOARD_POINTER);
    assert_eq!(results, &[InputResult::INACTIVE; 3]);
    assert_eq!(handler.status(), DeviceStatus::ChangedMissingToDefault);

    snapshot.next_frame();
    handler.update(&snapshot);
    assert_eq!(handler.status(), DeviceStatus::Idle);
    assert_eq!(handler.active_device(), DeviceId::KEYBOARD_POINTER);
}

#[test]
fn test_missing_controller_replaced_by_next_controller() {
    let mut handler = handler();
    let mut snapshot = InputSnapshot::new();
    connect(&mut snapshot, 0);
    press(&mut snapshot, 0, ControllerButton::South, true);
    handler.update(&snapshot);

    snapshot.controller_mut(0).unwrap().disconnect();
    connect(&mut snapshot, 6);
    snapshot
        .controller_mut(6)
        .unwrap()
        .set_axis(ControllerAxis::LeftStickX, -0.5);
    snapshot.next_frame();

    let (device, results) = handler.update(&snapshot);
    assert_eq!(device, pad(6));
    assert_eq!(
        results[MOVE_X],
        InputResult {
            active: true,
            value: -0.5
        }
    );
    assert_eq!(handler.status(), DeviceStatus::ChangedMissingToActive);
}

#[test]
fn test_missing_controller_replaced_by_keyboard_input() {
    let mut handler = handler();
    let mut snapshot = InputSnapshot::new();
    connect(&mut snapshot, 1);
    press(&mut snapshot, 1, ControllerButton::South, true);
    handler.update(&snapshot);

    snapshot.controller_mut(1).unwrap().disconnect();
    snapshot.set_key(KeyCode::Space, true);
    snapshot.next_frame();

    let (device, results) = handler.update(&snapshot);
    assert_eq!(device, DeviceId::KEYBOARD_POINTER);
    assert_eq!(results[JUMP], ON);
    assert_eq!(handler.status(), DeviceStatus::ChangedMissingToActive);
}

#[test]
fn test_stick_noise_inside_deadzone_does_not_switch() {
    let mut handler = handler();
    let mut snapshot = InputSnapshot::new();
    connect(&mut snapshot, 0);
    snapshot
        .controller_mut(0)
        .unwrap()
        .set_axis(ControllerAxis::LeftStickX, 0.05);

    let (device, _) = handler.update(&snapshot);
    assert_eq!(device, DeviceId::KEYBOARD_POINTER);
    assert_eq!(handler.status(), DeviceStatus::Idle);
}

#[test]
fn test_failed_scan_leaves_cache_with_active_device() {
    let mut handler = GreedyHandler::new(2).unwrap();
    handler
        .assign(
            DeviceFamily::Controller,
            0,
            ActionMapping::button_down(ControllerButton::South),
        )
        .unwrap();
    handler
        .assign(DeviceFamily::Controller, 1, ActionMapping::trigger_raw(Trigger::Left))
        .unwrap();

    let mut snapshot = InputSnapshot::new();
    connect(&mut snapshot, 0);
    connect(&mut snapshot, 1);
    press(&mut snapshot, 0, ControllerButton::South, true);
    handler.update(&snapshot);
    press(&mut snapshot, 0, ControllerButton::South, false);
    snapshot.next_frame();

    // Slot 1 and the keyboard are evaluated and rejected after slot 0
    let (device, results) = handler.update(&snapshot);
    assert_eq!(device, pad(0));
    assert_eq!(
        results[1],
        InputResult {
            active: false,
            value: -1.0
        }
    );
}

#[test]
fn test_get_value_reads_cache_only() {
    let mut handler = handler();
    let mut snapshot = InputSnapshot::new();
    snapshot.set_key(KeyCode::Space, true);
    handler.update(&snapshot);

    snapshot.set_key(KeyCode::Space, false);
    assert_eq!(handler.get_value(JUMP), Ok(ON));
    assert_eq!(handler.get_value(JUMP), Ok(ON));
    assert_eq!(handler.get_all_values()[JUMP], ON);
}

#[test]
fn test_get_value_out_of_range() {
    let handler = handler();
    assert_eq!(
        handler.get_value(3),
        Err(InputError::ActionOutOfRange { action: 3, len: 3 })
    );
}

#[test]
fn test_assign_checks_family() {
    let mut handler = GreedyHandler::new(2).unwrap();
    assert!(matches!(
        handler.assign(
            DeviceFamily::KeyboardPointer,
            0,
            ActionMapping::button_down(ControllerButton::South)
        ),
        Err(InputError::FamilyMismatch { .. })
    ));
    assert!(matches!(
        handler.assign(
            DeviceFamily::Controller,
            0,
            ActionMapping::key_down(KeyCode::KeyA)
        ),
        Err(InputError::FamilyMismatch { .. })
    ));
    assert_eq!(
        handler.assign(
            DeviceFamily::Controller,
            2,
            ActionMapping::button_down(ControllerButton::South)
        ),
        Err(InputError::ActionOutOfRange { action: 2, len: 2 })
    );
}

#[test]
fn test_assign_all_counts_rejections_across_tables() {
    let mut handler = GreedyHandler::new(2).unwrap();
    let rejected = handler
        .assign_all(
            &[
                ActionMapping::key_down(KeyCode::KeyA),
                ActionMapping::trigger_raw(Trigger::Right),
            ],
            &[
                ActionMapping::key_down(KeyCode::KeyB),
                ActionMapping::key_down(KeyCode::KeyC),
            ],
        )
        .unwrap();
    assert_eq!(rejected, 3);
    assert_eq!(
        handler.mappings(DeviceFamily::KeyboardPointer).as_slice()[0],
        ActionMapping::key_down(KeyCode::KeyA)
    );
}

#[test]
fn test_assign_all_length_mismatch_touches_nothing() {
    let mut handler = GreedyHandler::new(2).unwrap();
    let kb = [ActionMapping::key_down(KeyCode::KeyA), ActionMapping::None];
    assert_eq!(
        handler.assign_all(&kb, &[ActionMapping::None]),
        Err(InputError::LengthMismatch {
            expected: 2,
            actual: 1
        })
    );
    assert_eq!(
        handler.mappings(DeviceFamily::KeyboardPointer).as_slice()[0],
        ActionMapping::None
    );
}

#[test]
fn test_assign_all_for_device() {
    let mut handler = GreedyHandler::new(1).unwrap();
    assert_eq!(
        handler.assign_all_for_device(
            DeviceFamily::Controller,
            &[ActionMapping::trigger_normalized(Trigger::Left)]
        ),
        Ok(0)
    );
    assert_eq!(
        handler.assign_all_for_device(
            DeviceFamily::KeyboardPointer,
            &[ActionMapping::trigger_normalized(Trigger::Left)]
        ),
        Ok(1)
    );
}

#[test]
fn test_empty_handler_never_switches() {
    let mut handler = GreedyHandler::new(0).unwrap();
    let mut snapshot = InputSnapshot::new();
    connect(&mut snapshot, 0);
    press(&mut snapshot, 0, ControllerButton::South, true);

    let (device, results) = handler.update(&snapshot);
    assert_eq!(device, DeviceId::KEYBOARD_POINTER);
    assert!(results.is_empty());
    assert_eq!(handler.status(), DeviceStatus::Idle);
}
