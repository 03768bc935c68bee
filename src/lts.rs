use itertools::Itertools;

use crate::{math::Set, Show};

/// Tags a state with the process it belongs to. The two state spaces of a bisimulation
/// check are merged into one universe, and this tag is what keeps them disjoint even when
/// the original labels coincide.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Origin {
    /// The left process of the check.
    P,
    /// The right process of the check.
    Q,
}

impl Origin {
    /// Gives the single-letter name of the process, `P` or `Q`.
    pub fn letter(self) -> char {
        match self {
            Origin::P => 'P',
            Origin::Q => 'Q',
        }
    }
}

impl Show for Origin {
    fn show(&self) -> String {
        self.letter().to_string()
    }
}

/// Identifies a state of one of the two processes. Consists of the [`Origin`] tag and a
/// label that is unique within the owning process.
///
/// The label is canonicalized (ASCII-lowercased) once on construction and that canonical
/// form is what the derived equality, ordering and hashing all operate on. Keeping a single
/// canonical form is what guarantees the hash/equality contract: two equal states always
/// hash identically.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StateId {
    origin: Origin,
    label: String,
}

impl StateId {
    /// Creates a state identifier from the owning process and a label. The label is
    /// canonicalized here, so `new(P, "S0")` and `new(P, "s0")` are the same state.
    pub fn new(origin: Origin, label: impl AsRef<str>) -> Self {
        Self {
            origin,
            label: label.as_ref().to_ascii_lowercase(),
        }
    }

    /// The process this state belongs to.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// The canonical label of the state, without the origin tag.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Show for StateId {
    fn show(&self) -> String {
        format!("{}:{}", self.origin.letter(), self.label)
    }

    fn show_collection<'a, I: IntoIterator<Item = &'a Self>>(iter: I) -> String
    where
        Self: 'a,
        I::IntoIter: DoubleEndedIterator,
    {
        format!("{{{}}}", iter.into_iter().map(|x| x.show()).join(", "))
    }
}

/// An action label, shared vocabulary between the two processes. Canonicalized on
/// construction like [`StateId`] labels.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Action(String);

impl Action {
    /// Creates an action from its label, canonicalizing it.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(label.as_ref().to_ascii_lowercase())
    }

    /// The canonical label of the action.
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl Show for Action {
    fn show(&self) -> String {
        self.0.clone()
    }

    fn show_collection<'a, I: IntoIterator<Item = &'a Self>>(iter: I) -> String
    where
        Self: 'a,
        I::IntoIter: DoubleEndedIterator,
    {
        format!("{{{}}}", iter.into_iter().map(|x| x.show()).join(", "))
    }
}

/// A labeled transition, i.e. an ordered triple of source state, action and target state.
/// Equality and hashing are structural over all three (canonical) components.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Transition {
    source: StateId,
    action: Action,
    target: StateId,
}

impl Transition {
    /// Builds a transition from its three components.
    pub fn new(source: StateId, action: Action, target: StateId) -> Self {
        Self {
            source,
            action,
            target,
        }
    }

    /// The state the transition leaves from.
    pub fn source(&self) -> &StateId {
        &self.source
    }

    /// The action labeling the transition.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// The state the transition leads to.
    pub fn target(&self) -> &StateId {
        &self.target
    }
}

impl Show for Transition {
    fn show(&self) -> String {
        format!(
            "({}, {}, {})",
            self.source.show(),
            self.action.show(),
            self.target.show()
        )
    }

    fn show_collection<'a, I: IntoIterator<Item = &'a Self>>(iter: I) -> String
    where
        Self: 'a,
        I::IntoIter: DoubleEndedIterator,
    {
        format!("{{{}}}", iter.into_iter().map(|x| x.show()).join(", "))
    }
}

/// One labeled transition system: a set of states, a set of actions and a set of labeled
/// transitions, all owned by a single process. Built once, read-only afterwards.
#[derive(Clone, Debug)]
pub struct Lts {
    origin: Origin,
    states: Set<StateId>,
    actions: Set<Action>,
    transitions: Set<Transition>,
}

impl Lts {
    /// Assembles an LTS directly from its three defining sets. Unlike [`LtsBuilder`],
    /// which derives the state and action sets from the transition records, this accepts
    /// the sets as given and enforces no consistency between them;
    /// [`crate::relation::TransitionRelation::combine`] rejects a transition whose
    /// endpoints or action are missing from these sets before refinement runs.
    pub fn from_parts(
        origin: Origin,
        states: Set<StateId>,
        actions: Set<Action>,
        transitions: Set<Transition>,
    ) -> Self {
        Self {
            origin,
            states,
            actions,
            transitions,
        }
    }

    /// Which process this LTS describes.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// The states of the process.
    pub fn states(&self) -> &Set<StateId> {
        &self.states
    }

    /// The action labels appearing on the process's transitions.
    pub fn actions(&self) -> &Set<Action> {
        &self.actions
    }

    /// The labeled transitions of the process.
    pub fn transitions(&self) -> &Set<Transition> {
        &self.transitions
    }
}

/// Helper struct for the construction of an [`Lts`]. It collects transition records as
/// plain label triples and derives the state and action sets when building.
///
/// # Example
///
/// We want to create the process `P` with a transition from `s0` to `s1` on action `a`
/// and an unconnected state `s2`:
/// ```
/// use bisim::prelude::*;
///
/// let p = LtsBuilder::new(Origin::P)
///     .with_transitions([("s0", "a", "s1")])
///     .with_state("s2")
///     .build();
/// assert_eq!(p.states().len(), 3);
/// ```
pub struct LtsBuilder {
    origin: Origin,
    states: Vec<String>,
    transitions: Vec<(String, String, String)>,
}

impl LtsBuilder {
    /// Creates an empty builder for a process with the given [`Origin`].
    pub fn new(origin: Origin) -> Self {
        Self {
            origin,
            states: vec![],
            transitions: vec![],
        }
    }

    /// Adds a state that need not appear on any transition. States mentioned by
    /// transitions are derived automatically and do not have to be added this way.
    pub fn with_state(mut self, label: impl Into<String>) -> Self {
        self.states.push(label.into());
        self
    }

    /// Adds a list of transition records given as `(source, action, target)` label triples.
    pub fn with_transitions<S, I>(mut self, iter: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, S, S)>,
    {
        self.transitions.extend(
            iter.into_iter()
                .map(|(s, a, t)| (s.into(), a.into(), t.into())),
        );
        self
    }

    /// Builds the [`Lts`], deriving the state and action sets from the collected records.
    /// Construction is total; there is no malformed input at this level.
    pub fn build(self) -> Lts {
        let origin = self.origin;
        let mut states: Set<StateId> = self
            .states
            .iter()
            .map(|label| StateId::new(origin, label))
            .collect();
        let mut actions = Set::default();
        let mut transitions = Set::default();
        for (source, action, target) in &self.transitions {
            let source = StateId::new(origin, source);
            let action = Action::new(action);
            let target = StateId::new(origin, target);
            states.insert(source.clone());
            states.insert(target.clone());
            actions.insert(action.clone());
            transitions.insert(Transition::new(source, action, target));
        }
        Lts {
            origin,
            states,
            actions,
            transitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn builder_derives_states_and_actions() {
        let p = LtsBuilder::new(Origin::P)
            .with_transitions([("s0", "a", "s1"), ("s1", "b", "s0")])
            .build();
        assert_eq!(p.states().len(), 2);
        assert_eq!(p.actions().len(), 2);
        assert_eq!(p.transitions().len(), 2);
        assert!(p.states().contains(&StateId::new(Origin::P, "s1")));
    }

    #[test]
    fn labels_are_canonicalized_consistently() {
        let upper = Transition::new(
            StateId::new(Origin::P, "S0"),
            Action::new("A"),
            StateId::new(Origin::P, "S1"),
        );
        let lower = Transition::new(
            StateId::new(Origin::P, "s0"),
            Action::new("a"),
            StateId::new(Origin::P, "s1"),
        );
        assert_eq!(upper, lower);
        let set: crate::math::Set<_> = [upper].into_iter().collect();
        assert!(set.contains(&lower));
    }

    #[test]
    fn same_label_different_origin_is_different_state() {
        assert_ne!(
            StateId::new(Origin::P, "s0"),
            StateId::new(Origin::Q, "s0")
        );
    }
}
