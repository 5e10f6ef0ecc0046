// Domain layer - Value types and invariants, no I/O
pub mod error;
pub mod graph;
pub mod highlight;
pub mod material;
