//! Nethercore Input - action mapping and device arbitration
//!
//! Turns raw keyboard, pointer and gamepad state into a fixed set of named
//! actions, each resolved to an [`InputResult`] (activity flag + value).
//!
//! # Architecture
//!
//! - [`ActionMapping`] - Which physical signal an action reads, and how
//! - [`resolve()`] - Evaluates one mapping against one device
//! - [`BasicHandler`] - One fixed device, one mapping table, no cache
//! - [`GreedyHandler`] - Keyboard+pointer table and a controller table, with
//!   per-frame arbitration of the single active device
//! - [`InputPlatform`] - The per-frame input snapshot the resolver queries
//!
//! ```text
//! winit events ──┐
//!                ├──► InputSnapshot ──► GreedyHandler::update ──► (DeviceId, &[InputResult])
//! gilrs events ──┘
//! ```

pub mod basic;
pub mod bindings;
pub mod device;
pub mod error;
#[cfg(feature = "gamepad")]
pub mod gamepad;
pub mod greedy;
pub mod mapping;
pub mod names;
pub mod platform;
pub mod resolve;
pub mod snapshot;
pub mod status;

pub use basic::BasicHandler;
pub use bindings::{ActionBinding, BindingsConfig, BindingsError, BuildReport};
pub use device::{DeviceFamily, DeviceId, MAX_CONTROLLERS};
pub use error::InputError;
#[cfg(feature = "gamepad")]
pub use gamepad::GamepadBackend;
pub use greedy::GreedyHandler;
pub use mapping::{
    ActionId, ActionMapping, ControllerAxis, ControllerButton, DigitalQuery, InputMethod,
    MappingTable, PointerAxis, ScrollAxis, Threshold, Trigger,
};
pub use platform::InputPlatform;
pub use resolve::{InputResult, PRECISION_SCALE, resolve};
pub use snapshot::{ControllerState, InputSnapshot};
pub use status::DeviceStatus;

// Re-export the key and pointer button types mappings are built from
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;
