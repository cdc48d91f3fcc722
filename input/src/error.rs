//! Error types for mapping tables and handlers

use std::collections::TryReserveError;

use crate::device::DeviceFamily;
use crate::mapping::{ActionId, InputMethod};

/// Errors reported by mapping tables and input handlers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Action index outside the handler's table
    #[error("action {action} out of range (table has {len} actions)")]
    ActionOutOfRange { action: ActionId, len: usize },

    /// Mapping method belongs to the other device family
    #[error("{method:?} mapping cannot be assigned to a {family} device")]
    FamilyMismatch {
        method: InputMethod,
        family: DeviceFamily,
    },

    /// Bulk assignment with a slice of the wrong length
    #[error("expected {expected} mappings, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Backing storage could not be allocated
    #[error("failed to allocate input tables: {0}")]
    Allocation(#[from] TryReserveError),

    /// Handlers cannot be bound to [`DeviceId::NONE`](crate::DeviceId::NONE)
    #[error("cannot bind a handler to the null device")]
    NullDevice,

    /// Controller slot outside `0..MAX_CONTROLLERS`
    #[error("controller slot {0} out of range")]
    ControllerSlot(usize),
}
