//! Frame snapshot of keyboard, pointer and controller state
//!
//! [`InputSnapshot`] is the stock [`InputPlatform`]: window events and gamepad
//! backends write into it during a frame, handlers read from it, and
//! [`InputSnapshot::next_frame`] closes the frame so press/release edges last
//! exactly one frame.

use hashbrown::HashSet;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::device::MAX_CONTROLLERS;
use crate::error::InputError;
use crate::mapping::{ControllerAxis, ControllerButton, DigitalQuery, PointerAxis, ScrollAxis};
use crate::platform::InputPlatform;

/// Pixel scroll deltas are converted to lines using this height
const PIXELS_PER_LINE: f32 = 16.0;

fn digital(now: bool, before: bool, query: DigitalQuery) -> bool {
    match query {
        DigitalQuery::Pressed => now && !before,
        DigitalQuery::Released => !now && before,
        DigitalQuery::Down => now,
        DigitalQuery::Up => !now,
    }
}

/// State of one controller slot
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    connected: bool,
    buttons: [bool; ControllerButton::COUNT],
    previous_buttons: [bool; ControllerButton::COUNT],
    axes: [f32; ControllerAxis::COUNT],
}

impl Default for ControllerState {
    fn default() -> Self {
        let mut axes = [0.0; ControllerAxis::COUNT];
        axes[ControllerAxis::LeftZ.index()] = -1.0;
        axes[ControllerAxis::RightZ.index()] = -1.0;
        Self {
            connected: false,
            buttons: [false; ControllerButton::COUNT],
            previous_buttons: [false; ControllerButton::COUNT],
            axes,
        }
    }
}

impl ControllerState {
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Mark the slot connected, keeping current readings
    pub fn connect(&mut self) {
        self.connected = true;
    }

    /// Mark the slot disconnected and return every input to rest
    pub fn disconnect(&mut self) {
        *self = Self::default();
    }

    pub fn set_button(&mut self, button: ControllerButton, down: bool) {
        self.buttons[button.index()] = down;
    }

    /// Set an axis reading, clamped to `[-1, 1]`
    pub fn set_axis(&mut self, axis: ControllerAxis, value: f32) {
        self.axes[axis.index()] = value.clamp(-1.0, 1.0);
    }

    pub fn button(&self, button: ControllerButton, query: DigitalQuery) -> bool {
        let i = button.index();
        digital(self.buttons[i], self.previous_buttons[i], query)
    }

    pub fn axis(&self, axis: ControllerAxis) -> f32 {
        self.axes[axis.index()]
    }

    fn next_frame(&mut self) {
        self.previous_buttons = self.buttons;
    }
}

/// Accumulated input for the current frame
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    keys: HashSet<KeyCode>,
    previous_keys: HashSet<KeyCode>,
    pointer_buttons: HashSet<MouseButton>,
    previous_pointer_buttons: HashSet<MouseButton>,
    /// `None` until the first cursor event, so the first move is not a jump
    pointer: Option<[f32; 2]>,
    pointer_delta: [f32; 2],
    scroll: [f32; 2],
    controllers: [ControllerState; MAX_CONTROLLERS],
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the current frame.
    ///
    /// Current digital state becomes the "previous" state edges are measured
    /// against; pointer and scroll deltas reset to zero.
    pub fn next_frame(&mut self) {
        self.previous_keys.clone_from(&self.keys);
        self.previous_pointer_buttons
            .clone_from(&self.pointer_buttons);
        self.pointer_delta = [0.0; 2];
        self.scroll = [0.0; 2];
        for controller in &mut self.controllers {
            controller.next_frame();
        }
    }

    /// Feed a winit window event. Returns true if the event was input.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return true;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.set_key(key, event.state == ElementState::Pressed);
                }
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.set_pointer_button(*button, *state == ElementState::Pressed);
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_pointer_to(position.x as f32, position.y as f32);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                    MouseScrollDelta::PixelDelta(p) => (
                        p.x as f32 / PIXELS_PER_LINE,
                        p.y as f32 / PIXELS_PER_LINE,
                    ),
                };
                self.add_scroll(ScrollAxis::Horizontal, x);
                self.add_scroll(ScrollAxis::Vertical, y);
                true
            }
            WindowEvent::Focused(false) => {
                // Releases are not delivered while unfocused
                self.keys.clear();
                self.pointer_buttons.clear();
                true
            }
            _ => false,
        }
    }

    pub fn set_key(&mut self, key: KeyCode, down: bool) {
        if down {
            self.keys.insert(key);
        } else {
            self.keys.remove(&key);
        }
    }

    pub fn set_pointer_button(&mut self, button: MouseButton, down: bool) {
        if down {
            self.pointer_buttons.insert(button);
        } else {
            self.pointer_buttons.remove(&button);
        }
    }

    /// Move the pointer, accumulating this frame's delta
    pub fn move_pointer_to(&mut self, x: f32, y: f32) {
        if let Some([px, py]) = self.pointer {
            self.pointer_delta[0] += x - px;
            self.pointer_delta[1] += y - py;
        }
        self.pointer = Some([x, y]);
    }

    pub fn add_scroll(&mut self, channel: ScrollAxis, amount: f32) {
        self.scroll[scroll_index(channel)] += amount;
    }

    pub fn controller(&self, slot: usize) -> Option<&ControllerState> {
        self.controllers.get(slot)
    }

    pub fn controller_mut(&mut self, slot: usize) -> Result<&mut ControllerState, InputError> {
        self.controllers
            .get_mut(slot)
            .ok_or(InputError::ControllerSlot(slot))
    }
}

fn pointer_index(axis: PointerAxis) -> usize {
    match axis {
        PointerAxis::X => 0,
        PointerAxis::Y => 1,
    }
}

fn scroll_index(channel: ScrollAxis) -> usize {
    match channel {
        ScrollAxis::Vertical => 0,
        ScrollAxis::Horizontal => 1,
    }
}

impl InputPlatform for InputSnapshot {
    fn key(&self, key: KeyCode, query: DigitalQuery) -> bool {
        digital(
            self.keys.contains(&key),
            self.previous_keys.contains(&key),
            query,
        )
    }

    fn pointer_button(&self, button: MouseButton, query: DigitalQuery) -> bool {
        digital(
            self.pointer_buttons.contains(&button),
            self.previous_pointer_buttons.contains(&button),
            query,
        )
    }

    fn pointer_position(&self, axis: PointerAxis) -> f32 {
        self.pointer.map_or(0.0, |p| p[pointer_index(axis)])
    }

    fn pointer_delta(&self, axis: PointerAxis) -> f32 {
        self.pointer_delta[pointer_index(axis)]
    }

    fn scroll_delta(&self, channel: ScrollAxis) -> f32 {
        self.scroll[scroll_index(channel)]
    }

    fn controller_connected(&self, slot: usize) -> bool {
        self.controllers.get(slot).is_some_and(|c| c.connected)
    }

    fn controller_button(
        &self,
        slot: usize,
        button: ControllerButton,
        query: DigitalQuery,
    ) -> bool {
        match self.controllers.get(slot) {
            Some(c) if c.connected => c.button(button, query),
            // Resting: only "up" holds for a missing pad
            _ => query == DigitalQuery::Up,
        }
    }

    fn controller_axis(&self, slot: usize, axis: ControllerAxis) -> f32 {
        match self.controllers.get(slot) {
            Some(c) if c.connected => c.axis(axis),
            _ => ControllerState::default().axis(axis),
        }
    }
}
