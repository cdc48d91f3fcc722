//! Device status reported by the greedy handler
//!
//! Presentation code reads this for feedback such as "controller
//! disconnected" banners. The `Changed*` markers last for a single update.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceStatus {
    /// Created, default device selected, not yet updated
    #[default]
    Initial,
    /// Active device produced input this frame
    Active,
    /// Active device connected but silent
    Idle,
    /// Active controller disconnected
    Missing,
    /// Switched away from a silent device to one producing input
    ChangedIdleToActive,
    /// Active controller disconnected, another device took over
    ChangedMissingToActive,
    /// Active controller disconnected, fell back to keyboard+pointer
    ChangedMissingToDefault,
}

impl DeviceStatus {
    /// True for the one-update `Changed*` markers
    pub fn is_transition(self) -> bool {
        matches!(
            self,
            DeviceStatus::ChangedIdleToActive
                | DeviceStatus::ChangedMissingToActive
                | DeviceStatus::ChangedMissingToDefault
        )
    }

    /// The steady state a transition marker settles into
    pub fn settled(self) -> DeviceStatus {
        match self {
            DeviceStatus::ChangedIdleToActive | DeviceStatus::ChangedMissingToActive => {
                DeviceStatus::Active
            }
            DeviceStatus::ChangedMissingToDefault => DeviceStatus::Idle,
            other => other,
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DeviceStatus::Initial => "initial",
            DeviceStatus::Active => "active",
            DeviceStatus::Idle => "idle",
            DeviceStatus::Missing => "device missing",
            DeviceStatus::ChangedIdleToActive => "switched device",
            DeviceStatus::ChangedMissingToActive => "device disconnected, switched device",
            DeviceStatus::ChangedMissingToDefault => "device disconnected, using keyboard",
        };
        f.write_str(text)
    }
}
