//! Building blocks shared by the codec and the container.

pub mod bits;
pub mod frequency;
pub mod code_table;
pub mod tree;
