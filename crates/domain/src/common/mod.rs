//! Common helpers shared by the document types.
//!
//! - **Pure functions only** - no side effects, no I/O

pub mod lenient;

pub use lenient::lenient_i32;
