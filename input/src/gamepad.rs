//! Gamepad backend built on gilrs
//!
//! Assigns each connected gamepad the lowest free controller slot and copies
//! its buttons and axes into an [`InputSnapshot`] once per frame.

use std::hash::Hash;

use gilrs::{Axis, Button, GamepadId, Gilrs};
use hashbrown::HashMap;

use crate::device::MAX_CONTROLLERS;
use crate::mapping::{ControllerAxis, ControllerButton};
use crate::snapshot::{ControllerState, InputSnapshot};

pub struct GamepadBackend {
    /// Gilrs context (None if initialization failed)
    gilrs: Option<Gilrs>,

    /// Gamepad ID to controller slot
    slots: HashMap<GamepadId, usize>,
}

impl GamepadBackend {
    /// Initialize gilrs and claim slots for gamepads already plugged in
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(g) => Some(g),
            Err(e) => {
                tracing::warn!(
                    "Failed to initialize gamepad support: {}. Gamepads will not be available.",
                    e
                );
                None
            }
        };

        let mut backend = Self {
            gilrs,
            slots: HashMap::new(),
        };
        let present: Vec<GamepadId> = backend
            .gilrs
            .as_ref()
            .map(|g| g.gamepads().map(|(id, _)| id).collect())
            .unwrap_or_default();
        for id in present {
            backend.claim_slot(id);
        }
        backend
    }

    /// Whether gilrs initialized
    pub fn is_available(&self) -> bool {
        self.gilrs.is_some()
    }

    /// Number of gamepads holding a slot
    pub fn connected_count(&self) -> usize {
        self.slots.len()
    }

    /// Process connection events and write every assigned pad into `snapshot`
    pub fn poll(&mut self, snapshot: &mut InputSnapshot) {
        // Collect events first; slot bookkeeping needs &mut self
        let events: Vec<_> = match self.gilrs.as_mut() {
            Some(gilrs) => std::iter::from_fn(|| gilrs.next_event())
                .map(|e| (e.id, e.event))
                .collect(),
            None => return,
        };

        let mut freed = false;
        for (id, event) in events {
            match event {
                gilrs::EventType::Connected => {
                    self.claim_slot(id);
                }
                gilrs::EventType::Disconnected => {
                    if let Some(slot) = self.slots.remove(&id) {
                        tracing::info!("Gamepad {} (slot {}) disconnected", id, slot);
                        if let Ok(state) = snapshot.controller_mut(slot) {
                            state.disconnect();
                        }
                        freed = true;
                    }
                }
                _ => {}
            }
        }

        // Pads that connected while every slot was taken
        if freed {
            let waiting = match self.gilrs.as_ref() {
                Some(gilrs) => unslotted(&self.slots, gilrs.gamepads().map(|(id, _)| id)),
                None => Vec::new(),
            };
            for id in waiting {
                self.claim_slot(id);
            }
        }

        let Some(gilrs) = self.gilrs.as_ref() else {
            return;
        };
        for (&id, &slot) in &self.slots {
            if let Ok(state) = snapshot.controller_mut(slot) {
                read_gamepad(&gilrs.gamepad(id), state);
            }
        }
    }

    fn claim_slot(&mut self, id: GamepadId) {
        if self.slots.contains_key(&id) {
            return;
        }
        match assign_slot(&mut self.slots, id) {
            Some(slot) => {
                tracing::info!("Gamepad {} connected as controller #{}", id, slot);
            }
            None => tracing::warn!("Gamepad {} connected but no free controller slots", id),
        }
    }
}

impl Default for GamepadBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowest slot in `0..MAX_CONTROLLERS` not in `taken`
fn lowest_free_slot(taken: impl IntoIterator<Item = usize>) -> Option<usize> {
    let mut used = [false; MAX_CONTROLLERS];
    for slot in taken {
        if let Some(u) = used.get_mut(slot) {
            *u = true;
        }
    }
    used.iter().position(|&u| !u)
}

/// Give `id` the lowest free slot, if any
fn assign_slot<K: Eq + Hash>(slots: &mut HashMap<K, usize>, id: K) -> Option<usize> {
    let slot = lowest_free_slot(slots.values().copied())?;
    slots.insert(id, slot);
    Some(slot)
}

/// Connected pads that hold no slot, in enumeration order
fn unslotted<K: Eq + Hash>(slots: &HashMap<K, usize>, connected: impl Iterator<Item = K>) -> Vec<K> {
    connected.filter(|id| !slots.contains_key(id)).collect()
}

fn gilrs_button(button: ControllerButton) -> Button {
    match button {
        ControllerButton::South => Button::South,
        ControllerButton::East => Button::East,
        ControllerButton::West => Button::West,
        ControllerButton::North => Button::North,
        ControllerButton::LeftBumper => Button::LeftTrigger,
        ControllerButton::RightBumper => Button::RightTrigger,
        ControllerButton::LeftThumb => Button::LeftThumb,
        ControllerButton::RightThumb => Button::RightThumb,
        ControllerButton::Start => Button::Start,
        ControllerButton::Select => Button::Select,
        ControllerButton::Mode => Button::Mode,
        ControllerButton::DPadUp => Button::DPadUp,
        ControllerButton::DPadDown => Button::DPadDown,
        ControllerButton::DPadLeft => Button::DPadLeft,
        ControllerButton::DPadRight => Button::DPadRight,
    }
}

/// Gilrs reports analog triggers as 0..1 button values; the platform
/// convention is -1 (released) to 1 (fully pulled). Neither source has data
/// until the trigger first moves, which reads as released.
fn trigger_value(button: Option<f32>, axis: Option<f32>) -> f32 {
    match (button, axis) {
        (Some(value), _) => value * 2.0 - 1.0,
        (None, Some(value)) => value,
        (None, None) => -1.0,
    }
}

fn trigger_axis(gamepad: &gilrs::Gamepad, button: Button, fallback: Axis) -> f32 {
    trigger_value(
        gamepad.button_data(button).map(|d| d.value()),
        gamepad.axis_data(fallback).map(|d| d.value()),
    )
}

fn read_gamepad(gamepad: &gilrs::Gamepad, state: &mut ControllerState) {
    state.connect();

    for button in ControllerButton::ALL {
        state.set_button(button, gamepad.is_pressed(gilrs_button(button)));
    }

    for axis in ControllerAxis::ALL {
        let value = match axis {
            ControllerAxis::LeftStickX => gamepad.value(Axis::LeftStickX),
            ControllerAxis::LeftStickY => gamepad.value(Axis::LeftStickY),
            ControllerAxis::RightStickX => gamepad.value(Axis::RightStickX),
            ControllerAxis::RightStickY => gamepad.value(Axis::RightStickY),
            ControllerAxis::LeftZ => trigger_axis(gamepad, Button::LeftTrigger2, Axis::LeftZ),
            ControllerAxis::RightZ => trigger_axis(gamepad, Button::RightTrigger2, Axis::RightZ),
        };
        state.set_axis(axis, value);
    }
}
