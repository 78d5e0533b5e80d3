// Table types for parsed STAR particle blocks
//
// A Table keeps its column names in file order, the resolved indices of
// the particle and class columns, and the rows as plain field vectors.

use std::collections::BTreeSet;

/// Class identifier as written in the class column
pub type ClassId = i64;

/// One data row of a particle table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
    class_id: ClassId,
}

impl Record {
    pub(crate) fn new(fields: Vec<String>, class_id: ClassId) -> Self {
        Self { fields, class_id }
    }

    /// All fields in column order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Field at a column index
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Class id converted at parse time
    pub fn class_id(&self) -> ClassId {
        self.class_id
    }
}

/// Particle table from the particles block of one STAR file
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    records: Vec<Record>,
    particle_index: usize,
    class_index: usize,
}

impl Table {
    /// Build a table from already validated parts.
    ///
    /// Every record must have exactly `columns.len()` fields; the parser
    /// enforces this while reading.
    pub(crate) fn new(
        columns: Vec<String>,
        records: Vec<Record>,
        particle_index: usize,
        class_index: usize,
    ) -> Self {
        debug_assert!(records.iter().all(|r| r.fields.len() == columns.len()));
        Self {
            columns,
            records,
            particle_index,
            class_index,
        }
    }

    /// Column names in file order, without the header prefix
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of the particle identifier column
    pub fn particle_index(&self) -> usize {
        self.particle_index
    }

    /// Index of the class identifier column
    pub fn class_index(&self) -> usize {
        self.class_index
    }

    /// Particle identifier of a record from this table
    pub fn particle_id<'a>(&self, record: &'a Record) -> &'a str {
        &record.fields[self.particle_index]
    }

    /// Distinct class ids in ascending order
    pub fn class_ids(&self) -> BTreeSet<ClassId> {
        self.records.iter().map(Record::class_id).collect()
    }

    /// Records of one class, in source order
    pub fn records_in_class(&self, class_id: ClassId) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(move |r| r.class_id == class_id)
    }

    /// (particle id, class id) pairs in source order
    pub fn assignments(&self) -> impl Iterator<Item = (&str, ClassId)> {
        self.records
            .iter()
            .map(move |r| (self.particle_id(r), r.class_id))
    }
}
