//! Table-driven state machine shared by the guided session flows.
//!
//! A flow is described entirely by data: a static table of [`Rule`]s and a
//! function folding effects into a context. [`transition`] is a pure lookup,
//! [`Machine`] is the thin caller-owned runner on top of it.
//!
//! ```text
//! (state, event) --RULES--> (next state, [effects]) --apply--> context
//! ```
//!
//! Events with no matching rule are ignored: the state and the context are
//! left untouched and nothing is returned.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// One row of a transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule<S: 'static, E: 'static, X: 'static> {
    pub from: S,
    pub on: E,
    pub to: S,
    /// Effects emitted, in order, when the rule fires.
    pub effects: &'static [X],
}

/// Result of a successful table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S: 'static, X: 'static> {
    pub to: S,
    pub effects: &'static [X],
}

/// Static description of a guided flow.
pub trait Flow {
    type State: Copy + Eq + Debug + 'static;
    type Event: Copy + Eq + Debug + 'static;
    type Effect: Copy + Eq + Debug + 'static;
    type Context: Default + Clone + Debug;

    /// Name used in log records.
    const NAME: &'static str;
    const INITIAL: Self::State;
    const RULES: &'static [Rule<Self::State, Self::Event, Self::Effect>];

    /// Fold one effect into the context.
    fn apply(context: &mut Self::Context, effect: Self::Effect);
}

/// Pure transition function: looks `(state, event)` up in the flow's table.
///
/// Returns `None` when the event is not valid in `state`.
pub fn transition<F: Flow>(
    state: F::State,
    event: F::Event,
) -> Option<Transition<F::State, F::Effect>> {
    F::RULES
        .iter()
        .find(|rule| rule.from == state && rule.on == event)
        .map(|rule| Transition {
            to: rule.to,
            effects: rule.effects,
        })
}

/// Serializable view of a machine for the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<S, C> {
    pub state: S,
    pub context: C,
}

/// Caller-owned runner holding the current state and context of a flow.
pub struct Machine<F: Flow> {
    state: F::State,
    context: F::Context,
}

impl<F: Flow> Machine<F> {
    /// Create a machine in the flow's initial state with an empty context.
    pub fn new() -> Self {
        Self {
            state: F::INITIAL,
            context: F::Context::default(),
        }
    }

    pub fn state(&self) -> F::State {
        self.state
    }

    pub fn context(&self) -> &F::Context {
        &self.context
    }

    /// Whether `event` would be accepted in the current state.
    pub fn accepts(&self, event: F::Event) -> bool {
        transition::<F>(self.state, event).is_some()
    }

    /// Feed one event into the machine.
    ///
    /// On a valid event the state switches, every effect is applied to the
    /// context, and the effects are returned so the caller can act on them.
    /// An invalid event returns `None` and changes nothing.
    pub fn send(&mut self, event: F::Event) -> Option<&'static [F::Effect]> {
        let Some(next) = transition::<F>(self.state, event) else {
            trace!(flow = F::NAME, state = ?self.state, ?event, "event ignored");
            return None;
        };

        if next.to != self.state {
            debug!(flow = F::NAME, from = ?self.state, to = ?next.to, ?event, "state changed");
        }
        self.state = next.to;
        for &effect in next.effects {
            F::apply(&mut self.context, effect);
        }
        Some(next.effects)
    }

    pub fn snapshot(&self) -> Snapshot<F::State, F::Context> {
        Snapshot {
            state: self.state,
            context: self.context.clone(),
        }
    }
}

impl<F: Flow> Default for Machine<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Flow> Clone for Machine<F> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            context: self.context.clone(),
        }
    }
}

impl<F: Flow> Debug for Machine<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("flow", &F::NAME)
            .field("state", &self.state)
            .field("context", &self.context)
            .finish()
    }
}
