pub mod due;
pub mod error_conversions;
pub mod error_responses;
pub mod locks;
pub mod scheduler;
pub mod service;
pub mod session;
pub mod stats;

pub use due::DueQuery;
pub use locks::{ReviewGuard, ReviewLocks};
pub use service::SrsService;
pub use session::{ReviewSession, SessionCommand, SessionState, SessionView};
