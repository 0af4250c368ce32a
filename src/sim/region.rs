//! Region partitioning
//!
//! Cells separated by a crossed edge belong to different regions. Every cell
//! starts with its own label; neighbours whose shared edge was not crossed
//! get merged by rewriting one label to the other across the whole grid.
//! Puzzles are small enough that the O(cells) rewrite per merge is fine.

use std::collections::HashSet;

use glam::IVec2;

use super::grid::HalfPos;
use super::puzzle::Puzzle;

/// Cell labels after merging
#[derive(Debug, Clone)]
pub struct CellLabels {
    width: i32,
    height: i32,
    labels: Vec<u32>,
}

impl CellLabels {
    /// Partition the puzzle's cells by the given crossed edges
    pub fn partition(puzzle: &Puzzle, crossed: &HashSet<HalfPos>) -> Self {
        let (width, height) = puzzle.cell_dims();
        let mut cells = Self {
            width,
            height,
            labels: (0..(width * height) as u32).collect(),
        };

        for r in 0..height {
            for c in 0..width {
                let here = IVec2::new(c, r);
                cells.try_merge(here, here + IVec2::Y, crossed);
                cells.try_merge(here, here + IVec2::X, crossed);
            }
        }
        cells
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        (cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height)
            .then(|| (cell.y * self.width + cell.x) as usize)
    }

    /// Label of a cell, if the cell is on the grid
    pub fn label(&self, cell: IVec2) -> Option<u32> {
        self.index(cell).map(|i| self.labels[i])
    }

    fn try_merge(&mut self, a: IVec2, b: IVec2, crossed: &HashSet<HalfPos>) {
        let (Some(la), Some(lb)) = (self.label(a), self.label(b)) else {
            return;
        };
        // The edge separating two cells is the midpoint of their area coordinates
        let a2 = HalfPos::area_of(a);
        let b2 = HalfPos::area_of(b);
        let between = HalfPos::new((a2.x2 + b2.x2) / 2, (a2.y2 + b2.y2) / 2);
        if crossed.contains(&between) || la == lb {
            return;
        }
        for label in self.labels.iter_mut() {
            if *label == lb {
                *label = la;
            }
        }
    }

    /// Number of distinct regions
    pub fn region_count(&self) -> usize {
        self.labels.iter().collect::<HashSet<_>>().len()
    }
}

/// Area symbols grouped by region; each entry holds indices into
/// `Puzzle::area`
pub type Regions = Vec<Vec<usize>>;

/// Group every area symbol by the region containing it. Symbols that do not
/// sit inside a cell each get a region of their own.
pub fn find_symbols_by_area(puzzle: &Puzzle, crossed: &HashSet<HalfPos>) -> Regions {
    let cells = CellLabels::partition(puzzle, crossed);
    let mut regions: Vec<(Option<u32>, Vec<usize>)> = Vec::new();

    for (index, symbol) in puzzle.area.iter().enumerate() {
        let label = symbol.at.cell().and_then(|cell| cells.label(cell));
        if label.is_none() {
            log::warn!(
                "Puzzle {}: symbol {} at {:?} is not inside a cell",
                puzzle.name,
                index,
                symbol.at.to_vec2()
            );
            regions.push((None, vec![index]));
            continue;
        }
        match regions.iter_mut().find(|(l, _)| *l == label) {
            Some((_, members)) => members.push(index),
            None => regions.push((label, vec![index])),
        }
    }

    regions.into_iter().map(|(_, members)| members).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::line::Line;
    use crate::sim::puzzle::{AreaSymbol, Symbol};
    use proptest::prelude::*;

    fn blob(c: f32, r: f32, color: &str) -> AreaSymbol {
        AreaSymbol {
            at: HalfPos::at(c, r),
            symbol: Symbol::Blob {
                color: color.into(),
            },
        }
    }

    fn puzzle(rows: i32, cols: i32, area: Vec<AreaSymbol>) -> Puzzle {
        Puzzle {
            name: "regions".into(),
            rows,
            cols,
            area,
            edge: Vec::new(),
            corner: Vec::new(),
            unlock: None,
            active: true,
        }
    }

    #[test]
    fn test_no_line_single_region() {
        let p = puzzle(3, 3, vec![blob(0.5, 0.5, "a"), blob(1.5, 1.5, "b")]);
        let cells = CellLabels::partition(&p, &HashSet::new());
        assert_eq!(cells.region_count(), 1);
        assert_eq!(find_symbols_by_area(&p, &HashSet::new()), vec![vec![0, 1]]);
    }

    #[test]
    fn test_line_splits_grid() {
        // 3x2 grid, two stacked cells; line cuts between them
        let p = puzzle(3, 2, vec![blob(0.5, 0.5, "white"), blob(0.5, 1.5, "black")]);
        let line = Line::with_segments(vec![
            IVec2::new(0, 2),
            IVec2::new(0, 1),
            IVec2::new(1, 1),
            IVec2::new(1, 0),
        ]);
        let regions = find_symbols_by_area(&p, &line.crossed_edges());
        assert_eq!(regions, vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_partial_cut_keeps_region() {
        // A line that pokes into the grid without closing a boundary
        let p = puzzle(3, 3, vec![blob(0.5, 0.5, "a"), blob(1.5, 0.5, "b")]);
        let line = Line::with_segments(vec![IVec2::new(1, 2), IVec2::new(1, 1)]);
        let regions = find_symbols_by_area(&p, &line.crossed_edges());
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn test_symbol_off_grid_gets_own_region() {
        let p = puzzle(2, 2, vec![blob(0.5, 0.5, "a"), blob(4.5, 0.5, "b")]);
        let regions = find_symbols_by_area(&p, &HashSet::new());
        assert_eq!(regions, vec![vec![0], vec![1]]);
    }

    /// Random walks over a grid, starting from the bottom-left vertex
    fn walk(rows: i32, cols: i32, steps: &[u8]) -> Vec<IVec2> {
        let mut at = IVec2::new(0, rows - 1);
        let mut out = vec![at];
        for step in steps {
            let d = match step % 4 {
                0 => IVec2::new(0, -1),
                1 => IVec2::new(0, 1),
                2 => IVec2::new(-1, 0),
                _ => IVec2::new(1, 0),
            };
            let next = at + d;
            if next.x >= 0 && next.x < cols && next.y >= 0 && next.y < rows {
                at = next;
                out.push(at);
            }
        }
        out
    }

    proptest! {
        #[test]
        fn prop_every_symbol_in_one_region(
            rows in 2i32..7,
            cols in 2i32..7,
            steps in proptest::collection::vec(any::<u8>(), 0..40),
        ) {
            let mut area = Vec::new();
            for r in 0..rows - 1 {
                for c in 0..cols - 1 {
                    area.push(blob(c as f32 + 0.5, r as f32 + 0.5, "x"));
                }
            }
            let p = puzzle(rows, cols, area);
            let line = Line::with_segments(walk(rows, cols, &steps));
            let regions = find_symbols_by_area(&p, &line.crossed_edges());

            let mut seen: Vec<usize> = regions.iter().flatten().copied().collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..p.area.len()).collect::<Vec<_>>());
            prop_assert!(regions.len() <= ((rows - 1) * (cols - 1)) as usize);

            let cells = CellLabels::partition(&p, &line.crossed_edges());
            prop_assert_eq!(cells.region_count(), regions.len());
        }
    }
}
