//! Router middleware.

pub mod admission;

pub use admission::global_admission;
