//! Prefix algebra and candidate-key computation.
//!
//! A [`KeyGenerator`] carries every prefix that is live at one level of a
//! configuration tree. Levels compose by cartesian expansion, list elements
//! add an indexed variant ahead of the shared, un-indexed prefix, and
//! [`CandidateKeys`] turns the result into the ordered keys consulted for a
//! single property.

mod candidates;
mod generator;

pub use candidates::CandidateKeys;
pub use generator::{KEY_SEPARATOR, KeyGenerator};
