// Cross-job intersection matrix
//
// One ordered map keyed by (source, target) label pair. Counts and
// fractions share the key so both tables are exported from the same cells.

use crate::analysis::sets::ClassLabel;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Overlap between a source class and a target class
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Intersection {
    /// |source ∩ target|
    pub count: usize,
    /// count / |source|, 0.0 for an empty source
    pub fraction: f64,
}

impl Intersection {
    pub fn new(count: usize, source_size: usize) -> Self {
        let fraction = if source_size == 0 {
            0.0
        } else {
            count as f64 / source_size as f64
        };
        Self { count, fraction }
    }
}

/// Intersections between classes of different jobs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntersectionMatrix {
    cells: BTreeMap<(ClassLabel, ClassLabel), Intersection>,
}

impl IntersectionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the intersection of `source` with `target`.
    ///
    /// Pairs from the same job are ignored.
    pub fn insert(&mut self, source: ClassLabel, target: ClassLabel, value: Intersection) {
        if source.job == target.job {
            return;
        }
        self.cells.insert((source, target), value);
    }

    pub fn get(&self, source: &ClassLabel, target: &ClassLabel) -> Option<&Intersection> {
        self.cells.get(&(*source, *target))
    }

    /// Count for a pair, 0 when absent
    pub fn count(&self, source: &ClassLabel, target: &ClassLabel) -> usize {
        self.get(source, target).map_or(0, |c| c.count)
    }

    /// Fraction for a pair, 0.0 when absent
    pub fn fraction(&self, source: &ClassLabel, target: &ClassLabel) -> f64 {
        self.get(source, target).map_or(0.0, |c| c.fraction)
    }

    /// Every cell in (source, target) order
    pub fn iter(&self) -> impl Iterator<Item = (&ClassLabel, &ClassLabel, &Intersection)> {
        self.cells.iter().map(|((s, t), v)| (s, t, v))
    }

    /// Labels that appear as a source, sorted
    pub fn sources(&self) -> Vec<ClassLabel> {
        let set: BTreeSet<ClassLabel> = self.cells.keys().map(|(s, _)| *s).collect();
        set.into_iter().collect()
    }

    /// Union of all labels that appear as a target, sorted
    pub fn targets(&self) -> Vec<ClassLabel> {
        let set: BTreeSet<ClassLabel> = self.cells.keys().map(|(_, t)| *t).collect();
        set.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
