pub mod browser;
pub mod config;
pub mod element;
pub mod expect;
pub mod resolution;
pub mod storefront;
pub mod suite;
pub mod wait;

pub use browser::{Browser, BrowserError, NavigationResult};
pub use element::ElementHandle;
pub use resolution::{
    DocumentSnapshot, MatchRule, MemoryDocument, MemorySnapshot, Resolution, ResolutionError,
    resolve, resolve_with,
};
