pub mod error_models;
pub mod review_models;
pub mod stats_models;
pub mod word_models;

pub use error_models::{SrsError, SrsResult};
pub use review_models::{NewReviewEvent, Quality, ReviewEvent, ReviewEventRow, ReviewRequest};
pub use stats_models::{
    DailyCount, DailyCountsResponse, NextReviewInfo, ReviewPreview, ReviewPreviewResponse,
    SrsStats, UpcomingResponse,
};
pub use word_models::{
    AddWordRequest, NewWord, ScheduleChangeset, WordListResponse, WordRecord, WordResponse,
    WordRow,
};
