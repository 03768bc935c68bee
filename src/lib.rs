//! Library for deciding bisimulation equivalence of finite labeled transition systems (LTSs).
//!
//! An LTS is a finite collection of states connected by directed edges, where each edge carries
//! an action label. Two LTSs `P` and `Q` are bisimilar if there is a relation over their combined
//! state space such that related states can mimic each other's labeled moves step by step,
//! forever. This crate decides bisimilarity by partition refinement: starting from the trivial
//! partition that lumps every state of both processes into a single block, blocks are split
//! against each other until no block can distinguish the states of any other block. The resulting
//! fixpoint is the coarsest stable partition, and `P` and `Q` are bisimilar precisely if every
//! one of its blocks mixes states of both processes.
//!
//! The main entry point is [`decision::check_bisimilarity`], which takes the two [`lts::Lts`]
//! values, builds the combined [`relation::TransitionRelation`], refines and returns a
//! [`decision::BisimulationOutcome`] holding the fixpoint [`math::Partition`] together with the
//! verdict. LTSs are constructed either programmatically through [`lts::LtsBuilder`] or parsed
//! from a textual description by [`loader::parse_lts`]; [`report`] renders the deterministic
//! textual report. The core works purely on in-memory values and performs no I/O.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use bisim::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        decision::{check_bisimilarity, BisimulationOutcome},
        loader::{load_lts, parse_lts, ParseError},
        lts::{Action, Lts, LtsBuilder, Origin, StateId, Transition},
        math,
        math::Partition,
        refinement::refine,
        relation::{InputError, TransitionRelation},
        report, Show,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the
/// crate and do not really fit to the top level.
pub mod math;

/// Defines the model of one labeled transition system.
pub mod lts;

/// The combined transition relation of two processes, used as an existence oracle.
pub mod relation;

/// The partition refinement engine computing the coarsest stable partition.
pub mod refinement;

/// Reads the bisimilarity verdict off a stable partition.
pub mod decision;

/// Parses an LTS description from text.
pub mod loader;

/// Renders processes, partitions and verdicts into the textual report format.
pub mod report;

use itertools::Itertools;

/// Helper trait which can be used to display states, transitions and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state that should be
    /// for example P:s0 and for a transition (s0, a, s1) it should be (s0, a, s1).
    /// This is mainly used for debugging purposes.
    fn show(&self) -> String;
    /// Show a collection of the thing, for a collection of states this should be
    /// {P:s0, P:s1, ...}. By default this is unimplemented.
    fn show_collection<'a, I>(_iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
        I::IntoIter: DoubleEndedIterator,
    {
        unimplemented!("This operation makes no sense.")
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }

    fn show_collection<'a, I: IntoIterator<Item = &'a Self>>(iter: I) -> String
    where
        Self: 'a,
        I::IntoIter: DoubleEndedIterator,
    {
        format!("{{{}}}", iter.into_iter().map(|x| x.show()).join(", "))
    }
}

impl<S: Show> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}
