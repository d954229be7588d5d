//! Record identifier generation.

use uuid::Uuid;

/// Source of candidate record identifiers.
///
/// The store checks every candidate against the identifiers it already holds,
/// so a generator only has to be collision-resistant, not collision-proof.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}
