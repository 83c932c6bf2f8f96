pub mod marker;
pub mod question;

pub use marker::{Snapshot, TrackedMarker};
pub use question::{has_unique_digits, Operation, Question};
