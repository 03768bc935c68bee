use crate::{
    lts::{Action, Lts, StateId, Transition},
    math::Set,
    Show,
};

/// Represents the types of precondition violations that the combined input of a
/// bisimulation check can exhibit. These are rejected before refinement starts, so the
/// engine never runs on degenerate data.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum InputError {
    /// The combined state space of the two processes is empty.
    EmptyUniverse,
    /// A transition references a state that is not in the owning process's state set.
    UnknownState(Transition),
    /// A transition references an action that is not in the owning process's action set.
    UnknownAction(Transition),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::EmptyUniverse => write!(f, "Combined state space is empty"),
            InputError::UnknownState(t) => {
                write!(f, "Transition {} references an unknown state", t.show())
            }
            InputError::UnknownAction(t) => {
                write!(f, "Transition {} references an unknown action", t.show())
            }
        }
    }
}

impl std::error::Error for InputError {}

/// The union of both processes' transitions together with the combined universe and
/// alphabet. This is the oracle the refinement engine consults to answer "is there an
/// `a`-step from `s` to `s'`?". Built once from the two [`Lts`] values, immutable
/// afterwards.
///
/// P-states and Q-states never collide in the union even when their labels coincide,
/// since every [`StateId`] carries its [`crate::lts::Origin`] tag.
#[derive(Debug, Clone)]
pub struct TransitionRelation {
    universe: Set<StateId>,
    alphabet: Set<Action>,
    transitions: Set<Transition>,
}

impl TransitionRelation {
    /// Builds the combined relation from the two processes, validating the combined
    /// input. Fails fast on an empty universe or a transition whose endpoints or action
    /// are missing from the owning process's sets.
    pub fn combine(p: &Lts, q: &Lts) -> Result<Self, InputError> {
        for lts in [p, q] {
            for t in lts.transitions() {
                if !lts.states().contains(t.source()) || !lts.states().contains(t.target()) {
                    return Err(InputError::UnknownState(t.clone()));
                }
                if !lts.actions().contains(t.action()) {
                    return Err(InputError::UnknownAction(t.clone()));
                }
            }
        }

        let universe: Set<_> = p.states().iter().chain(q.states()).cloned().collect();
        if universe.is_empty() {
            return Err(InputError::EmptyUniverse);
        }
        let alphabet = p.actions().iter().chain(q.actions()).cloned().collect();
        let transitions = p
            .transitions()
            .iter()
            .chain(q.transitions())
            .cloned()
            .collect();

        Ok(Self {
            universe,
            alphabet,
            transitions,
        })
    }

    /// Exact-match membership query: is there a transition from `source` to `target`
    /// labeled with `action`?
    pub fn has_transition(&self, source: &StateId, action: &Action, target: &StateId) -> bool {
        self.transitions.contains(&Transition::new(
            source.clone(),
            action.clone(),
            target.clone(),
        ))
    }

    /// The combined state space of both processes.
    pub fn universe(&self) -> &Set<StateId> {
        &self.universe
    }

    /// The combined action alphabet of both processes.
    pub fn alphabet(&self) -> &Set<Action> {
        &self.alphabet
    }
}
