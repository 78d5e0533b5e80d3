// Edge list for flow diagrams
//
// Keeps one direction per unordered job pair: the row whose source job
// number is lower than its target job number.

use crate::analysis::{ClassLabel, IntersectionMatrix};
use serde::Serialize;

/// CSV header of the edge list
pub const EDGE_HEADER: [&str; 4] = ["id", "jobANo_class", "jobBNo_class", "#particles"];

/// One weighted link between classes of two jobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeRecord {
    pub id: usize,
    pub source: ClassLabel,
    pub target: ClassLabel,
    pub weight: usize,
}

/// Derive the deduplicated edge list from the count matrix
pub fn edge_list(matrix: &IntersectionMatrix) -> Vec<EdgeRecord> {
    matrix
        .iter()
        .filter(|(source, target, _)| source.job < target.job)
        .enumerate()
        .map(|(id, (source, target, cell))| EdgeRecord {
            id,
            source: *source,
            target: *target,
            weight: cell.count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Intersection;
    use std::collections::HashSet;

    fn matrix() -> IntersectionMatrix {
        let mut m = IntersectionMatrix::new();
        let labels = [
            ClassLabel::new(1, 1),
            ClassLabel::new(1, 2),
            ClassLabel::new(2, 1),
            ClassLabel::new(3, 1),
        ];
        for a in &labels {
            for b in &labels {
                m.insert(*a, *b, Intersection::new((a.class + b.class) as usize, 4));
            }
        }
        m
    }

    #[test]
    fn test_one_row_per_unordered_pair() {
        let edges = edge_list(&matrix());
        // cross-job unordered pairs: (1,2): 2, (1,3): 2, (2,3): 1
        assert_eq!(edges.len(), 5);

        let mut seen = HashSet::new();
        for edge in &edges {
            assert!(edge.source.job < edge.target.job);
            assert!(!seen.contains(&(edge.target, edge.source)));
            seen.insert((edge.source, edge.target));
        }
    }

    #[test]
    fn test_ids_sequential_in_order() {
        let edges = edge_list(&matrix());
        let ids: Vec<usize> = edges.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(edges[0].source, ClassLabel::new(1, 1));
        assert_eq!(edges[0].target, ClassLabel::new(2, 1));
        assert_eq!(edges[0].weight, 2);
        assert_eq!(edges[4].source, ClassLabel::new(2, 1));
        assert_eq!(edges[4].target, ClassLabel::new(3, 1));
    }

    #[test]
    fn test_empty_matrix() {
        assert!(edge_list(&IntersectionMatrix::new()).is_empty());
    }
}
