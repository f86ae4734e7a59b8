//! Referential rules between the event catalog and registrations.
//!
//! Storage does not know that `Registration::events` points at `Event::name`, so every
//! catalog mutation that can orphan a reference runs one of these sweeps. They are pure:
//! the slice loads, calls them, and persists the result.

use evreg_kernel::domain::models::{Event, Registration};
use std::collections::HashMap;

/// Outcome of a disable sweep over registrations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sweep {
    /// Registrations that lost at least one event but kept others.
    pub trimmed: usize,
    /// Registrations dropped because they had no events left after the sweep.
    pub dropped: usize,
}

/// Applies `enabled_map` to `events` and returns the names that went from enabled to
/// disabled, in catalog order.
///
/// Events absent from the map are untouched; names in the map with no event are ignored.
pub fn apply_enabled_map(events: &mut [Event], enabled_map: &HashMap<String, bool>) -> Vec<String> {
    let mut newly_disabled = Vec::new();

    for event in events.iter_mut() {
        let Some(&enabled) = enabled_map.get(&event.name) else { continue };
        if event.enabled && !enabled && !newly_disabled.contains(&event.name) {
            newly_disabled.push(event.name.clone());
        }
        event.enabled = enabled;
    }

    newly_disabled
}

/// Removes every occurrence of the `disabled` names from each registration's events.
///
/// Any registration left with no events is dropped, including one that was already
/// empty. Registrations that keep at least one event pass through otherwise unchanged.
pub fn prune_disabled(registrations: &mut Vec<Registration>, disabled: &[String]) -> Sweep {
    let mut sweep = Sweep::default();
    if disabled.is_empty() {
        return sweep;
    }

    registrations.retain_mut(|registration| {
        let before = registration.events.len();
        registration.events.retain(|name| !disabled.contains(name));

        if registration.events.is_empty() {
            sweep.dropped += 1;
            false
        } else if registration.events.len() == before {
            true
        } else {
            sweep.trimmed += 1;
            true
        }
    });

    sweep
}

/// Drops every registration that references `event`; returns how many were dropped.
pub fn drop_attendees(registrations: &mut Vec<Registration>, event: &str) -> usize {
    let before = registrations.len();
    registrations.retain(|registration| !registration.attends(event));
    before - registrations.len()
}
