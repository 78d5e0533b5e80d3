// Output generation module

pub mod edges;
pub mod files;
pub mod tables;

pub use edges::*;
pub use files::*;
pub use tables::*;
