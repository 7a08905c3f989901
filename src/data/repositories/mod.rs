pub mod review;
pub mod word;

pub use review::ReviewRepository;
pub use word::WordRepository;
