//! Edit sessions for the patient aggregate.
//!
//! Every mutation goes draft → commit → patch → reducer: drafts hold the
//! in-progress form values and resolve derived fields exactly once at
//! commit; patches replace whole arrays on the aggregate through a pure
//! reducer. Nothing else merges partial patient state.

mod drafts;
mod patch;

pub use drafts::*;
pub use patch::*;
