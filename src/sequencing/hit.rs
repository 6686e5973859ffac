/*
Hit Detection
=============

Element i of a ring with N subdivisions sits at

    hit time = i / N × cycle

A frame moves the hand from `from` to `to`. The element is hit when its time
lies in the half-open arc [from, to), walking forward:

    from ≤ to :  from ≤ t < to               ──[====)──────
    from > to :  t ≥ from  or  t < to        ==)───────[===   (wrapped)

The closed start and open end mean the boundary between two frames belongs to
exactly one of them, so an element can't fire twice across consecutive
frames and can't fall between them.

A frame lasting a whole cycle or more covers every position; it fires each
active element once rather than working out how many laps were skipped.
*/

use crate::sequencing::layer::Layer;

/// The arc the hand covered during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub from: f64,
    pub to: f64,
    /// Frame length in seconds, before wrapping.
    pub elapsed: f64,
    pub cycle: f64,
}

impl Sweep {
    pub fn new(from: f64, to: f64, elapsed: f64, cycle: f64) -> Self {
        Self {
            from,
            to,
            elapsed,
            cycle,
        }
    }

    /// Covers the whole ring, including the wrap that lands exactly back on `from`.
    pub fn is_full_turn(&self) -> bool {
        self.elapsed >= self.cycle || (self.from == self.to && self.elapsed > self.cycle * 0.5)
    }

    pub fn contains(&self, time: f64) -> bool {
        if self.is_full_turn() {
            return true;
        }
        if self.elapsed <= 0.0 {
            return false;
        }
        if self.from <= self.to {
            self.from <= time && time < self.to
        } else {
            time >= self.from || time < self.to
        }
    }

    /// Active elements of `layer` the hand passed, in element order.
    pub fn hits<'a>(&'a self, layer: &'a Layer) -> impl Iterator<Item = usize> + 'a {
        let subdivisions = layer.subdivisions();
        layer
            .active_indices()
            .filter(move |&i| self.contains(element_time(i, subdivisions, self.cycle)))
    }
}

/// Position of element `index` on the cycle, in seconds.
pub fn element_time(index: usize, subdivisions: usize, cycle: f64) -> f64 {
    index as f64 / subdivisions as f64 * cycle
}
