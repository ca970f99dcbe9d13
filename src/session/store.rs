use super::action::Action;
use super::reducer::reduce;
use super::state::SessionState;

/// Holds the session and funnels every change through [`reduce`].
#[derive(Debug, Default)]
pub struct Store {
    state: SessionState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        let name = action.name();
        let next = reduce(&self.state, action);

        if next.phase() != self.state.phase() {
            tracing::debug!(
                action = name,
                from = ?self.state.phase(),
                to = ?next.phase(),
                "session phase changed"
            );
        } else {
            tracing::trace!(action = name, "action dispatched");
        }

        self.state = next;
    }
}
