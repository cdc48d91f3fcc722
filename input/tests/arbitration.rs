//! End-to-end arbitration through the public API: bindings file in,
//! per-frame device selection out.

use nethercore_input::{
    ActionMapping, BindingsConfig, ControllerAxis, ControllerButton, DeviceFamily, DeviceId,
    DeviceStatus, GreedyHandler, InputResult, InputSnapshot, KeyCode,
};

const BINDINGS: &str = r#"
    [[actions]]
    name = "a"
    keyboard = { method = "key", key = "Space", query = "down" }

    [[actions]]
    name = "b"
    controller = { method = "button", button = "South", query = "down" }

    [[actions]]
    name = "c"
    controller = { method = "joystick", axis = "LeftStickX", threshold = 0.08 }
"#;

fn build() -> (BindingsConfig, GreedyHandler) {
    let config = BindingsConfig::from_toml_str(BINDINGS).expect("bindings");
    let (handler, report) = config.build_greedy().expect("handler");
    assert!(report.is_clean());
    (config, handler)
}

#[test]
fn space_held_without_controllers_selects_keyboard() {
    let (_, mut handler) = build();
    let mut snapshot = InputSnapshot::new();
    snapshot.set_key(KeyCode::Space, true);

    let (device, results) = handler.update(&snapshot);
    assert_eq!(device, DeviceId::KEYBOARD_POINTER);
    assert_eq!(
        results,
        &[
            InputResult {
                active: true,
                value: 1.0
            },
            InputResult::INACTIVE,
            InputResult::INACTIVE,
        ]
    );
}

#[test]
fn player_picks_up_a_controller_then_unplugs_it() {
    let (config, mut handler) = build();
    let c = config.action_id("c").unwrap();
    let mut snapshot = InputSnapshot::new();

    // Frame 1: keyboard in use
    snapshot.set_key(KeyCode::Space, true);
    handler.update(&snapshot);
    assert_eq!(handler.status(), DeviceStatus::Active);
    snapshot.set_key(KeyCode::Space, false);
    snapshot.next_frame();

    // Frame 2: keyboard silent, controller 3 plugged in and pushed
    let pad = snapshot.controller_mut(3).unwrap();
    pad.connect();
    pad.set_axis(ControllerAxis::LeftStickX, 0.9);
    let (device, _) = handler.update(&snapshot);
    assert_eq!(device, DeviceId::controller(3).unwrap());
    assert_eq!(handler.status(), DeviceStatus::ChangedIdleToActive);
    assert_eq!(handler.get_value(c).unwrap().value, 0.9);
    snapshot.next_frame();

    // Frame 3: still pushing
    handler.update(&snapshot);
    assert_eq!(handler.status(), DeviceStatus::Active);
    snapshot.next_frame();

    // Frame 4: unplugged
    snapshot.controller_mut(3).unwrap().disconnect();
    let (device, results) = handler.update(&snapshot);
    assert_eq!(device, DeviceId::KEYBOARD_POINTER);
    assert!(results.iter().all(|r| !r.active));
    assert_eq!(handler.status(), DeviceStatus::ChangedMissingToDefault);
}

#[test]
fn bulk_assignment_reports_each_invalid_mapping() {
    let mut handler = GreedyHandler::new(3).unwrap();
    let rejected = handler
        .assign_all_for_device(
            DeviceFamily::Controller,
            &[
                ActionMapping::key_down(KeyCode::Space),
                ActionMapping::button_down(ControllerButton::South),
                ActionMapping::key_down(KeyCode::Enter),
            ],
        )
        .unwrap();
    assert_eq!(rejected, 2);
}
