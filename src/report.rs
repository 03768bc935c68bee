//! Turns processes, partitions and verdicts into the textual report format. All output is
//! deterministically ordered (lexicographic on canonical labels), the caller decides where
//! the text goes.

use itertools::Itertools;

use crate::{
    decision::BisimulationOutcome,
    lts::{Lts, StateId},
    math::Partition,
};

/// Describes one process as its three defining sets, one line each:
/// `S = …` states, `A = …` actions, `T = (source,action,target),…` transitions.
/// States and transitions are printed without their origin tags; everything is sorted.
pub fn describe(lts: &Lts) -> String {
    let states = lts.states().iter().map(StateId::label).sorted().join(",");
    let actions = lts.actions().iter().map(|a| a.label()).sorted().join(",");
    let transitions = lts
        .transitions()
        .iter()
        .sorted()
        .map(|t| {
            format!(
                "({},{},{})",
                t.source().label(),
                t.action().label(),
                t.target().label()
            )
        })
        .join(",");
    format!("S = {states}\nA = {actions}\nT = {transitions}\n")
}

/// Renders the blocks of a partition, one comma-separated line per block. State labels
/// are printed without their origin tags; states are sorted within each block and the
/// blocks themselves are sorted, so equal partitions always render identically.
pub fn partition_lines(partition: &Partition<StateId>) -> String {
    partition
        .iter()
        .sorted()
        .map(|block| block.iter().map(StateId::label).sorted().join(","))
        .join("\n")
}

/// Renders the complete report for one check: both process definitions, the blocks of the
/// final partition and the `Yes`/`No` answer.
pub fn render(p: &Lts, q: &Lts, outcome: &BisimulationOutcome) -> String {
    format!(
        "Process P\n{}Process Q\n{}Bisimulation Results\n{}\nBisimulation Answer\n{}",
        describe(p),
        describe(q),
        partition_lines(outcome.partition()),
        if outcome.is_bisimilar() { "Yes" } else { "No" }
    )
}
