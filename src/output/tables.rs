// Dense row/column views of the intersection matrix

use crate::analysis::{ClassLabel, IntersectionMatrix};

/// Two-dimensional table with labelled rows and columns
#[derive(Debug, Clone, PartialEq)]
pub struct DenseTable<T> {
    pub rows: Vec<ClassLabel>,
    pub columns: Vec<ClassLabel>,
    pub cells: Vec<Vec<T>>,
}

impl<T: Copy> DenseTable<T> {
    /// Fill a table over the matrix's sources and targets
    fn build(matrix: &IntersectionMatrix, cell: impl Fn(&ClassLabel, &ClassLabel) -> T) -> Self {
        let rows = matrix.sources();
        let columns = matrix.targets();
        let cells = rows
            .iter()
            .map(|r| columns.iter().map(|c| cell(r, c)).collect())
            .collect();
        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn get(&self, row: usize, column: usize) -> Option<T> {
        self.cells.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Iterate rows as (label, values)
    pub fn iter_rows(&self) -> impl Iterator<Item = (&ClassLabel, &[T])> {
        self.rows.iter().zip(self.cells.iter().map(Vec::as_slice))
    }
}

/// Intersection counts; absent pairs are 0
pub fn count_table(matrix: &IntersectionMatrix) -> DenseTable<usize> {
    DenseTable::build(matrix, |r, c| matrix.count(r, c))
}

/// Intersection fractions; absent pairs are 0.0
pub fn fraction_table(matrix: &IntersectionMatrix) -> DenseTable<f64> {
    DenseTable::build(matrix, |r, c| matrix.fraction(r, c))
}

/// Plain decimal text that always carries a decimal point (`0.0`, `0.00005`)
pub fn format_fraction(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        text + ".0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Intersection;

    fn matrix() -> IntersectionMatrix {
        let mut m = IntersectionMatrix::new();
        let a1 = ClassLabel::new(1, 1);
        let a2 = ClassLabel::new(1, 2);
        let b1 = ClassLabel::new(2, 1);
        m.insert(a1, b1, Intersection::new(2, 3));
        m.insert(a2, b1, Intersection::new(0, 1));
        m.insert(b1, a1, Intersection::new(2, 3));
        m.insert(b1, a2, Intersection::new(0, 3));
        m
    }

    #[test]
    fn test_count_table_layout() {
        let table = count_table(&matrix());
        let rows: Vec<String> = table.rows.iter().map(ToString::to_string).collect();
        let cols: Vec<String> = table.columns.iter().map(ToString::to_string).collect();
        assert_eq!(rows, vec!["job001_class1", "job001_class2", "job002_class1"]);
        assert_eq!(cols, vec!["job001_class1", "job001_class2", "job002_class1"]);

        // same-job cells are filled with zero
        assert_eq!(table.get(0, 0), Some(0));
        assert_eq!(table.get(0, 2), Some(2));
        assert_eq!(table.get(2, 0), Some(2));
        assert_eq!(table.get(3, 0), None);
    }

    #[test]
    fn test_fraction_table_values() {
        let table = fraction_table(&matrix());
        let value = table.get(0, 2).unwrap();
        assert!((value - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(table.get(1, 2), Some(0.0));
        assert_eq!(table.iter_rows().count(), 3);
    }

    #[test]
    fn test_format_fraction() {
        assert_eq!(format_fraction(0.0), "0.0");
        assert_eq!(format_fraction(1.0), "1.0");
        assert_eq!(format_fraction(0.5), "0.5");
        assert_eq!(format_fraction(2.0 / 3.0), "0.6666666666666666");
    }

    #[test]
    fn test_format_small_fraction_without_exponent() {
        assert_eq!(format_fraction(1.0 / 20000.0), "0.00005");
        assert!(!format_fraction(3.0 / 1_000_000.0).contains('e'));
    }
}
