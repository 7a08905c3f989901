pub mod session;

pub use session::{clear_review_session, load_review_session, save_review_session};
