use std::fmt;

/// Observer of session-level results.
///
/// Callbacks are fire-and-forget. A failed round reports `on_game_fail` and a
/// new round follows; a win reports `on_game_win` then `on_game_complete`; a
/// cancelled session only reports `on_game_complete`.
pub trait GameListener {
    /// The player won.
    fn on_game_win(&mut self) {}

    /// A round was lost and another attempt follows.
    fn on_game_fail(&mut self) {}

    /// The session ended, by winning or by cancellation.
    fn on_game_complete(&mut self) {}
}

/// Handle identifying a listener registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Retrieves the numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Listeners registered for the current (or next) session.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Box<dyn GameListener>)>,
}

impl ListenerRegistry {
    pub(crate) fn subscribe(&mut self, listener: Box<dyn GameListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn notify_win(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener.on_game_win();
        }
    }

    pub(crate) fn notify_fail(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener.on_game_fail();
        }
    }

    /// Delivers the completion callback and drops every registration.
    pub(crate) fn complete(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener.on_game_complete();
        }
        self.listeners.clear();
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
