//! Synthetic edge streams for load testing and fuzzing the assembler

use crate::model::{EdgePair, SymbolRange};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use std::collections::VecDeque;

/// Deterministic generator used by the CLI and tests
pub type GenRng = Xoshiro256StarStar;

/// Seeded generator so runs can be repeated
pub fn seeded(seed: u64) -> GenRng {
    GenRng::seed_from_u64(seed)
}

/// Join edges into wire form, without a trailing separator
pub fn to_wire(edges: &[EdgePair]) -> String {
    edges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Edges of a random valid binary tree rooted at the range's first symbol
///
/// Parents are taken breadth-first and given zero to two children from a
/// shuffled pool, always at least one while nothing else is waiting, so the
/// tree keeps growing until `edge_count` edges exist. `edge_count` is
/// clamped to what the range allows; `None` uses every symbol.
pub fn random_valid_tree<R: Rng + ?Sized>(
    range: SymbolRange,
    edge_count: Option<usize>,
    rng: &mut R,
) -> Vec<EdgePair> {
    let symbols: Vec<char> = range.symbols().collect();
    if symbols.len() < 2 {
        return Vec::new();
    }
    let max_edges = symbols.len() - 1;
    let edge_count = edge_count.unwrap_or(max_edges).clamp(1, max_edges);

    let mut pool: Vec<char> = symbols[1..=edge_count].to_vec();
    pool.shuffle(rng);

    let mut frontier = VecDeque::from([symbols[0]]);
    let mut edges = Vec::with_capacity(edge_count);
    while let Some(parent) = frontier.pop_front() {
        if pool.is_empty() {
            break;
        }
        let mut add = rng.gen_range(0..3);
        if add == 0 && frontier.is_empty() {
            add = 1;
        }
        for _ in 0..add {
            let Some(child) = pool.pop() else { break };
            frontier.push_back(child);
            edges.push(EdgePair::new(parent, child));
        }
    }
    edges
}

/// A large stream of distinct edges over the whole range
///
/// Every parent is paired with a different child in each round, so no edge
/// repeats, but nodes collect many children and cycles are certain once the
/// range is wide enough. Useful for exercising ingestion throughput.
pub fn stress_input<R: Rng + ?Sized>(range: SymbolRange, rng: &mut R) -> Vec<EdgePair> {
    let symbols: Vec<char> = range.symbols().collect();
    if symbols.len() < 2 {
        return Vec::new();
    }
    let mut parents = symbols[..symbols.len() - 1].to_vec();
    let mut children = symbols[1..].to_vec();
    parents.shuffle(rng);
    children.shuffle(rng);

    let rounds = (parents.len() / 2).saturating_sub(1);
    let mut edges = Vec::with_capacity(rounds * parents.len());
    for _ in 0..rounds {
        edges.extend(
            parents
                .iter()
                .zip(children.iter())
                .map(|(&p, &c)| EdgePair::new(p, c)),
        );
        children.rotate_right(1);
    }
    edges
}
