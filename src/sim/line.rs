//! Line growth state machine
//!
//! The line is the ordered list of visited vertices plus at most one
//! in-flight transition toward the next vertex. Each physics step moves the
//! transition's progress; reaching 1 commits the vertex, falling back to 0
//! cancels it. Consecutive committed vertices are always one grid step apart.
//!
//! States:
//! - Idle: no transition, waiting for a queued direction
//! - Advancing: `sign = +1`, progress rising toward 1 or its cap
//! - Retracting: `sign = -1`, progress falling toward 0

use std::collections::HashSet;

use glam::{IVec2, Vec2};
use serde::Serialize;

use super::grid::{Direction, HalfPos};
use super::puzzle::Puzzle;
use crate::settings::Settings;

/// The segment currently being drawn (or undrawn)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    /// Vertex the head is moving toward
    pub target: IVec2,
    pub direction: Direction,
    /// Input that reverses this transition
    pub reverse: Direction,
    /// 0 = at the last committed vertex, 1 = at `target`
    pub progress: f32,
    /// +1 growing, -1 shrinking
    pub sign: f32,
    /// Head stalls here instead of committing
    pub max_progress: Option<f32>,
    /// Index of the exit corner being passed, if any
    pub exit: Option<usize>,
}

impl Transition {
    /// Head has reached its partial-progress cap
    #[inline]
    pub fn at_cap(&self) -> bool {
        self.max_progress.is_some_and(|max| self.progress >= max)
    }

    #[inline]
    pub fn is_retracting(&self) -> bool {
        self.sign < 0.0
    }
}

/// What a single physics step did to the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    /// Nothing in flight and nothing started
    Idle,
    /// A transition moved (or was just started)
    Moving,
    /// Head is parked at a blocked or overlap cap
    Stalled,
    /// A vertex was appended
    Committed,
    /// A retraction ran back to its start
    Cancelled,
    /// Head reached the cap of an exit transition
    ReachedExit(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Line {
    segments: Vec<IVec2>,
    next: Option<Transition>,
    /// Direction applied when the current transition resolves
    queued: Option<Direction>,
}

impl Line {
    /// A fresh line sitting on the entrance (empty without one)
    pub fn new(entrance: Option<IVec2>) -> Self {
        Self {
            segments: entrance.into_iter().collect(),
            next: None,
            queued: None,
        }
    }

    /// Restore a line from previously visited vertices
    pub fn with_segments(segments: Vec<IVec2>) -> Self {
        Self {
            segments,
            next: None,
            queued: None,
        }
    }

    pub fn segments(&self) -> &[IVec2] {
        &self.segments
    }

    pub fn next(&self) -> Option<&Transition> {
        self.next.as_ref()
    }

    pub fn queued(&self) -> Option<Direction> {
        self.queued
    }

    pub fn is_idle(&self) -> bool {
        self.next.is_none()
    }

    /// Interpolated head position in grid units
    pub fn head(&self) -> Option<Vec2> {
        let last = self.segments.last()?.as_vec2();
        Some(match &self.next {
            Some(next) => last + (next.target.as_vec2() - last) * next.progress,
            None => last,
        })
    }

    /// Edges between consecutive committed vertices (the in-flight segment
    /// does not count)
    pub fn crossed_edges(&self) -> HashSet<HalfPos> {
        self.segments
            .windows(2)
            .map(|pair| HalfPos::midpoint(pair[0], pair[1]))
            .collect()
    }

    /// Player input
    pub fn set_direction(&mut self, direction: Direction) {
        match self.next.as_mut() {
            Some(next) if direction == next.reverse => {
                next.sign = -1.0;
                self.queued = None;
            }
            Some(next) if direction == next.direction => {
                next.sign = 1.0;
                self.queued = Some(direction);
            }
            _ => self.queued = Some(direction),
        }
    }

    /// Advance one physics step
    pub fn advance(&mut self, puzzle: &Puzzle, settings: &Settings) -> LineEvent {
        let mut event = LineEvent::Idle;

        if let Some(next) = self.next.as_mut() {
            if next.sign > 0.0 && next.at_cap() {
                if let Some(exit) = next.exit {
                    return LineEvent::ReachedExit(exit);
                }
                event = LineEvent::Stalled;
            } else {
                let scale = Settings::scale_for(puzzle.rows, puzzle.cols);
                next.progress += scale * settings.step_rate * next.sign;
                if next.sign > 0.0 {
                    if let Some(max) = next.max_progress {
                        next.progress = next.progress.min(max);
                    }
                }
                event = LineEvent::Moving;
            }

            let (progress, reverse, target) = (next.progress, next.reverse, next.target);
            if progress <= 0.0 {
                // Keep unwinding in the same direction unless the player
                // asked for something else
                if self.queued.is_none() {
                    self.queued = Some(reverse);
                }
                self.next = None;
                event = LineEvent::Cancelled;
            } else if progress >= 1.0 {
                log::trace!("Commit vertex {target}");
                self.segments.push(target);
                self.next = None;
                event = LineEvent::Committed;
            }
        }

        if self.next.is_none() {
            self.select_target(puzzle, settings);
            if event == LineEvent::Idle && self.next.is_some() {
                event = LineEvent::Moving;
            }
        }
        event
    }

    /// Start a transition from the last vertex in the queued direction
    pub fn select_target(&mut self, puzzle: &Puzzle, settings: &Settings) {
        let Some(direction) = self.queued else {
            return;
        };
        let Some(&last) = self.segments.last() else {
            return;
        };

        let mut target = last + direction.delta();
        let mut max_progress = None;

        let exit = puzzle.find_exit(last, direction);
        if let Some((_, beyond)) = exit {
            target = beyond;
            max_progress = Some(settings.exit_cap);
        } else if !puzzle.contains_vertex(target) {
            return;
        }

        // Stepping onto the previous vertex undoes the last segment
        if let [.., before, _] = self.segments.as_slice() {
            if *before == target {
                self.begin_retraction(direction);
                return;
            }
        }

        if self.segments.contains(&target) {
            max_progress = Some(settings.overlap_cap);
        }
        if puzzle.is_blocked(HalfPos::midpoint(last, target)) {
            max_progress = Some(settings.blocked_cap);
        }

        self.next = Some(Transition {
            target,
            direction,
            reverse: direction.reverse(),
            progress: 0.0,
            sign: 1.0,
            max_progress,
            exit: exit.map(|(index, _)| index),
        });
    }

    /// Pop the last vertex and animate the segment shrinking back into its
    /// predecessor. `direction` is the input that points back along it.
    fn begin_retraction(&mut self, direction: Direction) {
        let Some(popped) = self.segments.pop() else {
            return;
        };
        log::trace!("Retract vertex {popped}");
        self.next = Some(Transition {
            target: popped,
            direction: direction.reverse(),
            reverse: direction,
            progress: 1.0,
            sign: -1.0,
            max_progress: None,
            exit: None,
        });
    }
}
