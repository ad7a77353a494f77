pub mod analysis;
pub mod config;
pub mod error;
pub mod session;
pub mod tab;

pub use analysis::*;
pub use config::*;
pub use error::*;
pub use session::*;
pub use tab::*;
