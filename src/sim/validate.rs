//! Constraint validation
//!
//! Symbols are checked against the other symbols of their region after clone
//! normalization. Edge markers are checked against the crossed-edge set.
//! Anything the engine does not recognise fails.

use std::collections::HashSet;

use serde::Serialize;

use super::clone::{CloneRegistry, normalize};
use super::grid::HalfPos;
use super::puzzle::{EdgeKind, Puzzle, Symbol};
use super::region::find_symbols_by_area;

/// Constraints currently violated, as indices into the puzzle's lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Failed {
    /// Indices into `Puzzle::area`
    pub symbols: Vec<usize>,
    /// Indices into `Puzzle::edge`
    pub edges: Vec<usize>,
}

impl Failed {
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty() && self.edges.is_empty()
    }
}

/// Check one (already normalized) symbol against its region
pub fn validate_symbol(symbol: &Symbol, region: &[Symbol]) -> bool {
    match symbol {
        Symbol::Blob { color } => !region
            .iter()
            .any(|other| matches!(other, Symbol::Blob { color: c } if c != color)),
        Symbol::Star { color } => {
            region
                .iter()
                .filter(|other| other.color() == Some(color.as_str()))
                .count()
                == 2
        }
        Symbol::None => true,
        Symbol::Clone { .. } | Symbol::Unknown => false,
    }
}

/// Check one edge marker against the crossed edges
pub fn validate_edge(kind: EdgeKind, at: HalfPos, crossed: &HashSet<HalfPos>) -> bool {
    match kind {
        EdgeKind::Blocked => true,
        EdgeKind::Required => crossed.contains(&at),
        EdgeKind::Unknown => false,
    }
}

/// Score a line: every symbol and edge marker that breaks its rule
pub fn find_failed(
    puzzle: &Puzzle,
    crossed: &HashSet<HalfPos>,
    registry: &CloneRegistry,
) -> Failed {
    let mut failed = Failed::default();

    for region in find_symbols_by_area(puzzle, crossed) {
        let resolved: Vec<Symbol> = region
            .iter()
            .map(|&i| normalize(&puzzle.area[i].symbol, registry))
            .collect();
        for (&index, symbol) in region.iter().zip(&resolved) {
            if !validate_symbol(symbol, &resolved) {
                failed.symbols.push(index);
            }
        }
    }
    failed.symbols.sort_unstable();

    failed.edges = puzzle
        .edge
        .iter()
        .enumerate()
        .filter(|(_, edge)| !validate_edge(edge.kind, edge.at, crossed))
        .map(|(i, _)| i)
        .collect();

    failed
}

/// The symbol a won line "outputs": the one area symbol touched by the
/// crossed edges, normalized. Touching none or several gives `None`.
pub fn derive_output(
    puzzle: &Puzzle,
    crossed: &HashSet<HalfPos>,
    registry: &CloneRegistry,
) -> Symbol {
    let touched: HashSet<usize> = crossed
        .iter()
        .filter_map(HalfPos::adjacent_areas)
        .flatten()
        .flat_map(|area| {
            puzzle
                .area
                .iter()
                .enumerate()
                .filter(move |(_, s)| s.at == area)
                .map(|(i, _)| i)
        })
        .collect();

    match touched.iter().next() {
        Some(&index) if touched.len() == 1 => normalize(&puzzle.area[index].symbol, registry),
        _ => Symbol::None,
    }
}
