// Class labels and per-job particle sets

use crate::star::{ClassId, Table};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Job/class pair, rendered as `job085_class3`.
///
/// Ordering is numeric on (job, class), which gives every exported
/// table and edge list a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassLabel {
    pub job: u32,
    pub class: ClassId,
}

impl ClassLabel {
    pub fn new(job: u32, class: ClassId) -> Self {
        Self { job, class }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job{:03}_class{}", self.job, self.class)
    }
}

impl Serialize for ClassLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Particle identifiers per class for one job
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobClassSet {
    job: u32,
    classes: BTreeMap<ClassId, HashSet<String>>,
    overlaps: usize,
}

impl JobClassSet {
    /// Partition a job's table by class id.
    ///
    /// Particles listed under more than one class are kept in each of
    /// them and counted in `overlaps()`.
    pub fn from_table(job: u32, table: &Table) -> Self {
        let mut classes: BTreeMap<ClassId, HashSet<String>> = BTreeMap::new();
        let mut seen: HashMap<&str, ClassId> = HashMap::new();
        let mut overlapping: HashSet<&str> = HashSet::new();

        for (particle, class_id) in table.assignments() {
            classes
                .entry(class_id)
                .or_default()
                .insert(particle.to_string());
            let first = *seen.entry(particle).or_insert(class_id);
            if first != class_id {
                overlapping.insert(particle);
            }
        }

        Self {
            job,
            classes,
            overlaps: overlapping.len(),
        }
    }

    pub fn job(&self) -> u32 {
        self.job
    }

    /// Classes in ascending id order
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &HashSet<String>)> {
        self.classes.iter().map(|(id, set)| (*id, set))
    }

    pub fn class(&self, class_id: ClassId) -> Option<&HashSet<String>> {
        self.classes.get(&class_id)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of particles that appear in more than one class
    pub fn overlaps(&self) -> usize {
        self.overlaps
    }

    pub fn is_empty(&self) -> bool {
        self.classes.values().all(HashSet::is_empty)
    }

    pub fn label(&self, class_id: ClassId) -> ClassLabel {
        ClassLabel::new(self.job, class_id)
    }
}
