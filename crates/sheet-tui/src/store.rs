use crate::{actions::Action, effect::Effect, reducer::reduce, state::AppState};

/// Holds the single application state and runs actions through the reducer
///
/// State is replaced wholesale on every dispatch; side effects are returned
/// to the caller instead of being run here.
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(initial_state: AppState) -> Self {
        Self {
            state: initial_state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Mutable access for render-time bookkeeping (scroll bounds, table offset)
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Apply an action and return the effects the reducer asked for
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let (new_state, effects) = reduce(self.state.clone(), &action);
        self.state = new_state;
        effects
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}
