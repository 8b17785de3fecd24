pub mod backend;
mod cdp;
mod script;
pub mod snapshot;

pub use backend::HeadlessBrowser;
pub use snapshot::PageSnapshot;
