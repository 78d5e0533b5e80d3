// STAR particle table reading and per-class writing

pub mod parser;
pub mod table;
pub mod writer;

pub use parser::StarParser;
pub use table::{ClassId, Record, Table};
pub use writer::PerClassWriter;
