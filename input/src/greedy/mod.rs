//! Greedy handler: automatic selection of the single active device
//!
//! Holds one mapping table for the keyboard+pointer device and one template
//! table shared by every controller slot. Each [`GreedyHandler::update`]
//! decides which device is authoritative this frame and caches that device's
//! results; reads between updates never touch the platform.
//!
//! # Arbitration
//!
//! 1. An active controller that disconnected falls back to keyboard+pointer.
//! 2. Otherwise the active device is evaluated; any active result keeps it.
//! 3. If the device went missing or was silent, controllers are scanned in
//!    slot order and the first one with an active result wins. Keyboard+pointer
//!    is tried last. If nothing qualifies the active device is kept.

#[cfg(test)]
mod tests;

use crate::device::{DeviceFamily, DeviceId, MAX_CONTROLLERS};
use crate::error::InputError;
use crate::mapping::{ActionId, ActionMapping, MappingTable};
use crate::platform::InputPlatform;
use crate::resolve::{InputResult, resolve};
use crate::status::DeviceStatus;

pub struct GreedyHandler {
    /// Mappings for the keyboard+pointer device
    keyboard_pointer: MappingTable,

    /// Mappings applied to whichever controller slot is evaluated
    controller: MappingTable,

    /// Results of the active device, rewritten wholesale every update
    results: Vec<InputResult>,

    active_device: DeviceId,

    status: DeviceStatus,
}

impl GreedyHandler {
    /// Create a handler for `actions` unbound actions.
    ///
    /// Keyboard+pointer starts as the active device.
    pub fn new(actions: usize) -> Result<Self, InputError> {
        let mut results = Vec::new();
        results.try_reserve_exact(actions)?;
        results.resize(actions, InputResult::INACTIVE);

        Ok(Self {
            keyboard_pointer: MappingTable::new(DeviceFamily::KeyboardPointer, actions)?,
            controller: MappingTable::new(DeviceFamily::Controller, actions)?,
            results,
            active_device: DeviceId::KEYBOARD_POINTER,
            status: DeviceStatus::Initial,
        })
    }

    /// Number of actions
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn active_device(&self) -> DeviceId {
        self.active_device
    }

    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    pub fn mappings(&self, family: DeviceFamily) -> &MappingTable {
        match family {
            DeviceFamily::KeyboardPointer => &self.keyboard_pointer,
            DeviceFamily::Controller => &self.controller,
        }
    }

    fn mappings_mut(&mut self, family: DeviceFamily) -> &mut MappingTable {
        match family {
            DeviceFamily::KeyboardPointer => &mut self.keyboard_pointer,
            DeviceFamily::Controller => &mut self.controller,
        }
    }

    /// Assign one action of the `family` table
    pub fn assign(
        &mut self,
        family: DeviceFamily,
        action: ActionId,
        mapping: ActionMapping,
    ) -> Result<(), InputError> {
        self.mappings_mut(family).assign(action, mapping)
    }

    /// Assign the whole `family` table, returning the number of rejected mappings
    pub fn assign_all_for_device(
        &mut self,
        family: DeviceFamily,
        mappings: &[ActionMapping],
    ) -> Result<usize, InputError> {
        self.mappings_mut(family).assign_all(mappings)
    }

    /// Assign both tables, returning the total number of rejected mappings.
    ///
    /// Both slices are length-checked before either table is touched.
    pub fn assign_all(
        &mut self,
        keyboard_pointer: &[ActionMapping],
        controller: &[ActionMapping],
    ) -> Result<usize, InputError> {
        for actual in [keyboard_pointer.len(), controller.len()] {
            if actual != self.len() {
                return Err(InputError::LengthMismatch {
                    expected: self.len(),
                    actual,
                });
            }
        }
        let rejected = self.keyboard_pointer.assign_all(keyboard_pointer)?
            + self.controller.assign_all(controller)?;
        Ok(rejected)
    }

    /// Poll the platform and arbitrate the active device.
    ///
    /// Must run exactly once per frame: press/release edges are only valid
    /// for the frame that reports them.
    pub fn update<P: InputPlatform + ?Sized>(&mut self, platform: &P) -> (DeviceId, &[InputResult]) {
        let previous = self.active_device;
        let mut missing = false;

        if let Some(slot) = previous.controller_slot() {
            if !platform.controller_connected(slot) {
                tracing::info!("{} disconnected, falling back to keyboard+pointer", previous);
                missing = true;
                self.active_device = DeviceId::KEYBOARD_POINTER;
                self.status = DeviceStatus::Missing;
            }
        }

        // Device whose results currently sit in the cache
        let mut cached = DeviceId::NONE;

        if !missing {
            cached = previous;
            if self.evaluate(platform, previous) {
                self.set_status(DeviceStatus::Active);
                return self.frame();
            }
        }

        let controllers = (0..MAX_CONTROLLERS)
            .filter_map(DeviceId::controller)
            .filter(|&device| device != previous);
        for device in controllers {
            let connected = device
                .controller_slot()
                .is_some_and(|slot| platform.controller_connected(slot));
            if !connected {
                continue;
            }
            cached = device;
            if self.evaluate(platform, device) {
                self.adopt(device, missing);
                return self.frame();
            }
        }

        // Keyboard+pointer last; already evaluated if it was the silent active device
        if missing || previous != DeviceId::KEYBOARD_POINTER {
            cached = DeviceId::KEYBOARD_POINTER;
            if self.evaluate(platform, DeviceId::KEYBOARD_POINTER) {
                self.adopt(DeviceId::KEYBOARD_POINTER, missing);
                return self.frame();
            }
        }

        // Nothing qualified: keep the device, make sure the cache is its own
        let kept = self.active_device;
        if cached != kept {
            self.evaluate(platform, kept);
        }
        self.set_status(if missing {
            DeviceStatus::ChangedMissingToDefault
        } else {
            DeviceStatus::Idle
        });

        self.frame()
    }

    fn frame(&self) -> (DeviceId, &[InputResult]) {
        (self.active_device, self.results.as_slice())
    }

    /// Cached result of `action` from the last update
    pub fn get_value(&self, action: ActionId) -> Result<InputResult, InputError> {
        self.results
            .get(action)
            .copied()
            .ok_or(InputError::ActionOutOfRange {
                action,
                len: self.results.len(),
            })
    }

    /// All cached results from the last update
    pub fn get_all_values(&self) -> &[InputResult] {
        &self.results
    }

    /// Resolve every action for `device` into the cache; true if any is active
    fn evaluate<P: InputPlatform + ?Sized>(&mut self, platform: &P, device: DeviceId) -> bool {
        let table = match device.family() {
            Some(DeviceFamily::KeyboardPointer) => &self.keyboard_pointer,
            Some(DeviceFamily::Controller) => &self.controller,
            None => {
                self.results.fill(InputResult::INACTIVE);
                return false;
            }
        };

        let mut any_active = false;
        for (result, mapping) in self.results.iter_mut().zip(table.as_slice()) {
            *result = resolve(platform, device, mapping);
            any_active |= result.active;
        }
        any_active
    }

    fn adopt(&mut self, device: DeviceId, missing: bool) {
        tracing::info!("Switching active input device to {}", device);
        self.active_device = device;
        self.set_status(if missing {
            DeviceStatus::ChangedMissingToActive
        } else {
            DeviceStatus::ChangedIdleToActive
        });
    }

    fn set_status(&mut self, status: DeviceStatus) {
        if status != self.status {
            tracing::debug!("Input device status: {:?} -> {:?}", self.status, status);
        }
        self.status = status;
    }
}
