pub mod review;
pub mod schedule;
pub mod session;
pub mod stats;
pub mod words;
