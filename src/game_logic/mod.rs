pub mod agent;
pub mod errors;
pub mod session;

pub use agent::*;
pub use session::*;
