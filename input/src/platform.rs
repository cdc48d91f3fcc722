//! The input-polling boundary the resolver reads from

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::mapping::{ControllerAxis, ControllerButton, DigitalQuery, PointerAxis, ScrollAxis};

/// One frame's view of every input device.
///
/// All queries are pure reads of the current snapshot: calling the same query
/// twice within a frame returns the same answer. Controller queries on a
/// disconnected or out-of-range slot report the resting state.
pub trait InputPlatform {
    fn key(&self, key: KeyCode, query: DigitalQuery) -> bool;

    fn pointer_button(&self, button: MouseButton, query: DigitalQuery) -> bool;

    /// Absolute pointer coordinate on `axis`
    fn pointer_position(&self, axis: PointerAxis) -> f32;

    /// Pointer movement on `axis` since the previous frame
    fn pointer_delta(&self, axis: PointerAxis) -> f32;

    fn scroll_delta(&self, channel: ScrollAxis) -> f32;

    fn controller_connected(&self, slot: usize) -> bool;

    fn controller_button(&self, slot: usize, button: ControllerButton, query: DigitalQuery)
    -> bool;

    /// Axis value in `[-1, 1]`; released triggers read -1
    fn controller_axis(&self, slot: usize, axis: ControllerAxis) -> f32;
}
