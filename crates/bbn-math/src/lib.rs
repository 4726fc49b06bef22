//! Mathematical primitives for BBN injection models.

pub mod grid;
pub mod interp;
pub mod linalg;
