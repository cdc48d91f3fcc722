//! Single-device handler without caching or arbitration

use crate::device::DeviceId;
use crate::error::InputError;
use crate::mapping::{ActionId, ActionMapping, MappingTable};
use crate::platform::InputPlatform;
use crate::resolve::{InputResult, resolve};

/// Binds one fixed device to one mapping table.
///
/// Every [`get_value`](Self::get_value) is a fresh read from the platform.
#[derive(Debug, Clone)]
pub struct BasicHandler {
    device: DeviceId,
    mappings: MappingTable,
}

impl BasicHandler {
    /// Create a handler for `device` with `actions` unbound actions
    pub fn new(device: DeviceId, actions: usize) -> Result<Self, InputError> {
        let family = device.family().ok_or(InputError::NullDevice)?;
        Ok(Self {
            device,
            mappings: MappingTable::new(family, actions)?,
        })
    }

    pub fn device(&self) -> DeviceId {
        self.device
    }

    /// Number of actions
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn mappings(&self) -> &MappingTable {
        &self.mappings
    }

    pub fn assign(&mut self, action: ActionId, mapping: ActionMapping) -> Result<(), InputError> {
        self.mappings.assign(action, mapping)
    }

    /// Assign the whole table, returning the number of rejected mappings
    pub fn assign_all(&mut self, mappings: &[ActionMapping]) -> Result<usize, InputError> {
        self.mappings.assign_all(mappings)
    }

    pub fn get_value<P: InputPlatform + ?Sized>(
        &self,
        platform: &P,
        action: ActionId,
    ) -> Result<InputResult, InputError> {
        let mapping = self.mappings.get(action)?;
        Ok(resolve(platform, self.device, mapping))
    }
}
