//! Individual validation checks, run in order by [`crate::validate_table`].

pub mod category;
pub mod columns;
pub mod datatype;
pub mod range;

/// Samples of offending values kept per column.
pub(crate) const MAX_SAMPLES: usize = 5;
