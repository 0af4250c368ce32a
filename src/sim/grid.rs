//! Grid geometry
//!
//! Vertices live on integer coordinates `(column, row)`. Cell interiors
//! ("areas") and the crossings between two vertices ("edges") live on
//! half-integer coordinates. All three are stored on a doubled lattice so
//! comparisons and hashing stay exact:
//! - vertex: even/even
//! - edge: one even axis, one odd axis
//! - area: odd/odd

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// One of the four steering directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in grid space (rows grow downward)
    #[inline]
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Delta for an optional direction; a missing direction moves nowhere
#[inline]
pub fn direction_to_delta(direction: Option<Direction>) -> IVec2 {
    direction.map(Direction::delta).unwrap_or(IVec2::ZERO)
}

/// Puzzle-file form of a position: `{ "c": 0.5, "r": 1.5 }`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coord {
    pub c: f32,
    pub r: f32,
}

/// A vertex, edge or area position on the doubled lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Coord", into = "Coord")]
pub struct HalfPos {
    pub x2: i32,
    pub y2: i32,
}

impl From<Coord> for HalfPos {
    fn from(coord: Coord) -> Self {
        Self {
            x2: (coord.c * 2.0).round() as i32,
            y2: (coord.r * 2.0).round() as i32,
        }
    }
}

impl From<HalfPos> for Coord {
    fn from(pos: HalfPos) -> Self {
        Coord {
            c: pos.x2 as f32 / 2.0,
            r: pos.y2 as f32 / 2.0,
        }
    }
}

impl HalfPos {
    pub const fn new(x2: i32, y2: i32) -> Self {
        Self { x2, y2 }
    }

    /// Build from half-integer column/row values
    pub fn at(c: f32, r: f32) -> Self {
        Coord { c, r }.into()
    }

    /// Position of a grid vertex
    #[inline]
    pub fn vertex(v: IVec2) -> Self {
        Self::new(v.x * 2, v.y * 2)
    }

    /// Edge coordinate between two vertices
    #[inline]
    pub fn midpoint(a: IVec2, b: IVec2) -> Self {
        Self::new(a.x + b.x, a.y + b.y)
    }

    pub fn is_vertex(&self) -> bool {
        self.x2 % 2 == 0 && self.y2 % 2 == 0
    }

    pub fn is_area(&self) -> bool {
        self.x2.rem_euclid(2) == 1 && self.y2.rem_euclid(2) == 1
    }

    pub fn is_edge(&self) -> bool {
        (self.x2.rem_euclid(2) == 1) != (self.y2.rem_euclid(2) == 1)
    }

    /// The vertex this position names, if it is one
    pub fn as_vertex(&self) -> Option<IVec2> {
        self.is_vertex()
            .then(|| IVec2::new(self.x2 / 2, self.y2 / 2))
    }

    /// The unit cell (top-left vertex) an area coordinate sits in
    pub fn cell(&self) -> Option<IVec2> {
        self.is_area()
            .then(|| IVec2::new((self.x2 - 1).div_euclid(2), (self.y2 - 1).div_euclid(2)))
    }

    /// Area coordinate of a unit cell
    pub fn area_of(cell: IVec2) -> Self {
        Self::new(cell.x * 2 + 1, cell.y * 2 + 1)
    }

    /// The two areas on either side of an edge coordinate
    pub fn adjacent_areas(&self) -> Option<[HalfPos; 2]> {
        if !self.is_edge() {
            return None;
        }
        if self.x2.rem_euclid(2) == 0 {
            // Vertical crossing: areas lie left and right
            Some([
                Self::new(self.x2 - 1, self.y2),
                Self::new(self.x2 + 1, self.y2),
            ])
        } else {
            Some([
                Self::new(self.x2, self.y2 - 1),
                Self::new(self.x2, self.y2 + 1),
            ])
        }
    }

    /// Position in grid units for renderers
    pub fn to_vec2(&self) -> Vec2 {
        Vec2::new(self.x2 as f32 / 2.0, self.y2 as f32 / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_deltas() {
        assert_eq!(direction_to_delta(Some(Direction::Up)), IVec2::new(0, -1));
        assert_eq!(direction_to_delta(Some(Direction::Down)), IVec2::new(0, 1));
        assert_eq!(direction_to_delta(Some(Direction::Left)), IVec2::new(-1, 0));
        assert_eq!(direction_to_delta(Some(Direction::Right)), IVec2::new(1, 0));
        assert_eq!(direction_to_delta(None), IVec2::ZERO);
    }

    #[test]
    fn test_reverse_cancels_delta() {
        for d in Direction::ALL {
            assert_eq!(d.delta() + d.reverse().delta(), IVec2::ZERO);
            assert_eq!(d.reverse().reverse(), d);
        }
    }

    #[test]
    fn test_half_pos_kinds() {
        let v = HalfPos::vertex(IVec2::new(1, 2));
        assert!(v.is_vertex() && !v.is_edge() && !v.is_area());
        assert_eq!(v.as_vertex(), Some(IVec2::new(1, 2)));

        let e = HalfPos::midpoint(IVec2::new(0, 1), IVec2::new(0, 2));
        assert_eq!(e, HalfPos::at(0.0, 1.5));
        assert!(e.is_edge());

        let a = HalfPos::at(0.5, 1.5);
        assert!(a.is_area());
        assert_eq!(a.cell(), Some(IVec2::new(0, 1)));
        assert_eq!(HalfPos::area_of(IVec2::new(0, 1)), a);
    }

    #[test]
    fn test_adjacent_areas() {
        // Vertical crossing at x = 1 touches the cells left and right of it
        let e = HalfPos::at(1.0, 0.5);
        assert_eq!(
            e.adjacent_areas(),
            Some([HalfPos::at(0.5, 0.5), HalfPos::at(1.5, 0.5)])
        );
        // Horizontal crossing at y = 1 touches the cells above and below
        let e = HalfPos::at(0.5, 1.0);
        assert_eq!(
            e.adjacent_areas(),
            Some([HalfPos::at(0.5, 0.5), HalfPos::at(0.5, 1.5)])
        );
        assert_eq!(HalfPos::at(0.5, 0.5).adjacent_areas(), None);
    }

    #[test]
    fn test_coord_json() {
        let pos: HalfPos = serde_json::from_str(r#"{"c": 0.5, "r": 2}"#).unwrap();
        assert_eq!(pos, HalfPos::new(1, 4));
        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(json, r#"{"c":0.5,"r":2.0}"#);
    }
}
