//! Data types for the grid: values, rows, columns and cell content.

mod column;
mod row;
mod value;

pub use column::*;
pub use row::*;
pub use value::*;
