pub mod percent;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use percent::*;
pub use time::*;
