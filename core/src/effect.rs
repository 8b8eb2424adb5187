//! Side-effect descriptions returned by the reducer.

use crate::types::Todo;

/// A value describing a side effect to be performed by the runtime.
///
/// Effects are NOT executed here. The reducer returns them as plain data
/// and the store runtime carries them out, feeding any resulting message
/// back into the loop. Because effects are values they compare by equality,
/// which keeps reducer tests free of mocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to do.
    None,
    /// Durably store the post-transition todo list under the fixed
    /// namespace key.
    ///
    /// Carries a snapshot of the list taken after the transition. The
    /// runtime serializes and writes it; completion or failure of the write
    /// resolves to [`Msg::NoOp`](crate::types::Msg::NoOp) re-entering the
    /// loop.
    Persist(Vec<Todo>),
}
