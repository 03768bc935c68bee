use std::collections::BTreeSet;

use crate::{
    lts::{Lts, Origin, StateId},
    math::Partition,
    refinement::refine,
    relation::{InputError, TransitionRelation},
};

fn mixes_origins(block: &BTreeSet<StateId>) -> bool {
    block.iter().any(|s| s.origin() == Origin::P) && block.iter().any(|s| s.origin() == Origin::Q)
}

/// The result of a bisimulation check: the coarsest stable partition of the combined
/// state space together with the verdict read off it.
///
/// The verdict rule is: the two processes are bisimilar if and only if every block of the
/// fixpoint partition contains at least one P-origin and at least one Q-origin state. A
/// block holding states of only one process witnesses behavior the other process cannot
/// match. The rule is sound because [`check_bisimilarity`] always partitions exactly the
/// tagged union of the two processes' state sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BisimulationOutcome {
    partition: Partition<StateId>,
    bisimilar: bool,
}

impl BisimulationOutcome {
    /// The coarsest stable partition the refinement engine arrived at.
    pub fn partition(&self) -> &Partition<StateId> {
        &self.partition
    }

    /// Whether the two processes are bisimilar.
    pub fn is_bisimilar(&self) -> bool {
        self.bisimilar
    }

    /// Returns every block that contains states of only one process. All blocks are
    /// inspected, so this lists every distinguishing witness, not just the first one.
    /// Empty precisely if the processes are bisimilar.
    pub fn one_sided_blocks(&self) -> Vec<&BTreeSet<StateId>> {
        self.partition
            .iter()
            .filter(|block| !mixes_origins(block))
            .collect()
    }
}

/// Decides whether the two processes are bisimilar. Builds the combined
/// [`TransitionRelation`] (validating the input), refines the trivial partition to the
/// coarsest stable one and applies the decision rule.
pub fn check_bisimilarity(p: &Lts, q: &Lts) -> Result<BisimulationOutcome, InputError> {
    let rel = TransitionRelation::combine(p, q)?;
    let partition = refine(&rel);
    let bisimilar = partition.iter().all(mixes_origins);
    Ok(BisimulationOutcome {
        partition,
        bisimilar,
    })
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn single_states_without_transitions_are_bisimilar() {
        let p = LtsBuilder::new(Origin::P).with_state("p0").build();
        let q = LtsBuilder::new(Origin::Q).with_state("q0").build();
        let outcome = check_bisimilarity(&p, &q).unwrap();

        assert!(outcome.is_bisimilar());
        assert_eq!(
            *outcome.partition(),
            Partition::new([vec![
                StateId::new(Origin::P, "p0"),
                StateId::new(Origin::Q, "q0"),
            ]])
        );
        assert!(outcome.one_sided_blocks().is_empty());
    }

    #[test]
    fn lone_capability_is_distinguishing() {
        let p = LtsBuilder::new(Origin::P)
            .with_transitions([("p0", "a", "p1")])
            .build();
        let q = LtsBuilder::new(Origin::Q).with_state("q0").build();
        let outcome = check_bisimilarity(&p, &q).unwrap();

        assert!(!outcome.is_bisimilar());
        // the block {p0} has no q-side counterpart
        let witnesses = outcome.one_sided_blocks();
        assert_eq!(witnesses.len(), 1);
        assert!(witnesses[0].contains(&StateId::new(Origin::P, "p0")));
    }

    #[test]
    fn isomorphic_cycles_are_bisimilar() {
        let p = LtsBuilder::new(Origin::P)
            .with_transitions([("p0", "a", "p1"), ("p1", "b", "p0")])
            .build();
        let q = LtsBuilder::new(Origin::Q)
            .with_transitions([("q0", "a", "q1"), ("q1", "b", "q0")])
            .build();
        let outcome = check_bisimilarity(&p, &q).unwrap();

        assert!(outcome.is_bisimilar());
        assert_eq!(outcome.partition().size(), 2);
    }

    #[test]
    fn validation_failure_propagates() {
        let p = LtsBuilder::new(Origin::P).build();
        let q = LtsBuilder::new(Origin::Q).build();
        assert_eq!(
            check_bisimilarity(&p, &q).unwrap_err(),
            InputError::EmptyUniverse
        );
    }
}
