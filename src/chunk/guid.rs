//! Identity generation for built chunks.

use uuid::Uuid;

/// Supplies fresh identities while a chunk tree is built.
pub trait GuidSource {
    /// Returns a new identity; never returns the same value twice.
    fn next_guid(&mut self) -> Uuid;
}

/// Random (v4) identities.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomGuids;

impl GuidSource for RandomGuids {
    fn next_guid(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

impl<F: FnMut() -> Uuid> GuidSource for F {
    fn next_guid(&mut self) -> Uuid {
        self()
    }
}
