//! Node lifecycle state and property flags

use bitflags::bitflags;
use std::fmt;

/// Where a node stands in its lifecycle.
///
/// States only ever move forward by one step:
/// `Inactive -> Active -> ShuttingDown -> Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LifecycleState {
    #[default]
    Inactive,
    Active,
    ShuttingDown,
    Finished,
}

impl LifecycleState {
    /// The state that follows this one, `None` once finished.
    pub fn successor(self) -> Option<LifecycleState> {
        match self {
            LifecycleState::Inactive => Some(LifecycleState::Active),
            LifecycleState::Active => Some(LifecycleState::ShuttingDown),
            LifecycleState::ShuttingDown => Some(LifecycleState::Finished),
            LifecycleState::Finished => None,
        }
    }

    pub fn can_advance_to(self, next: LifecycleState) -> bool {
        self.successor() == Some(next)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Inactive => "INACTIVE",
            LifecycleState::Active => "ACTIVE",
            LifecycleState::ShuttingDown => "SHUTTINGDOWN",
            LifecycleState::Finished => "FINISHED",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Flags orthogonal to [`LifecycleState`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Properties: u8 {
        /// The node ignores every message except property changes.
        const DISABLED = 1 << 0;
        /// The node receives keyboard and mouse input.
        const FOCUSED = 1 << 1;
    }
}

impl Properties {
    /// Set `flag`, returning the `(old, new)` pair.
    pub fn set_flag(&mut self, flag: Properties) -> (Properties, Properties) {
        let old = *self;
        self.insert(flag);
        (old, *self)
    }

    /// Clear `flag`, returning the `(old, new)` pair.
    pub fn unset_flag(&mut self, flag: Properties) -> (Properties, Properties) {
        let old = *self;
        self.remove(flag);
        (old, *self)
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let mut names = Vec::with_capacity(2);
        if self.contains(Properties::DISABLED) {
            names.push("DISABLED");
        }
        if self.contains(Properties::FOCUSED) {
            names.push("FOCUSED");
        }
        f.write_str(&names.join("|"))
    }
}
