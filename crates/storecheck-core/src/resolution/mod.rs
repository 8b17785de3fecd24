pub mod memory;
pub mod resolver;
pub mod result;
pub mod snapshot;

pub use memory::{MemoryDocument, MemorySnapshot};
pub use resolver::{MatchRule, resolve, resolve_with};
pub use result::Resolution;
pub use snapshot::{DocumentSnapshot, ResolutionError};
