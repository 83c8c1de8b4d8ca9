// SPDX-License-Identifier: MPL-2.0
//! Change notification for settings collaborators.

use crate::domain::functions::FunctionKey;
use crate::domain::settings::Settings;

/// What caused a settings change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Persisted settings were merged over defaults.
    Loaded,
    /// A patch was applied (and a write attempted).
    Saved,
    /// Factory defaults were restored.
    Reset,
    /// A snapshot replaced the settings.
    Imported,
    /// A function flag was flipped.
    FunctionToggled { key: FunctionKey, enabled: bool },
    /// The logo was set or removed.
    LogoChanged,
}

/// Callback invoked after every change with the new state.
pub type Listener = Box<dyn FnMut(SettingsEvent, &Settings)>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered listener list.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Calls every listener in subscription order.
    pub(crate) fn notify(&mut self, event: SettingsEvent, settings: &Settings) {
        tracing::trace!(?event, listeners = self.listeners.len(), "notifying subscribers");
        for (_, listener) in &mut self.listeners {
            listener(event, settings);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.len())
            .finish()
    }
}
