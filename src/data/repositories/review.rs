use diesel::prelude::*;

use crate::data::models::{NewReviewEvent, ReviewEvent, ReviewEventRow};
use crate::schema::review_events;

/// Append-only review log. Rows are never updated or deleted.
pub struct ReviewRepository;

impl ReviewRepository {
    pub fn append(
        conn: &mut SqliteConnection,
        event: &NewReviewEvent,
    ) -> Result<(), diesel::result::Error> {
        diesel::insert_into(review_events::table)
            .values(event)
            .execute(conn)?;
        Ok(())
    }

    /// Full history in commit order.
    pub fn list_all(conn: &mut SqliteConnection) -> Result<Vec<ReviewEvent>, diesel::result::Error> {
        review_events::table
            .order(review_events::id.asc())
            .select(ReviewEventRow::as_select())
            .load(conn)?
            .into_iter()
            .map(to_event)
            .collect()
    }

    pub fn list_for_word(
        conn: &mut SqliteConnection,
        word_id: i32,
    ) -> Result<Vec<ReviewEvent>, diesel::result::Error> {
        review_events::table
            .filter(review_events::word_id.eq(word_id))
            .order(review_events::id.asc())
            .select(ReviewEventRow::as_select())
            .load(conn)?
            .into_iter()
            .map(to_event)
            .collect()
    }

    pub fn count(conn: &mut SqliteConnection) -> Result<i64, diesel::result::Error> {
        review_events::table.count().get_result(conn)
    }
}

fn to_event(row: ReviewEventRow) -> Result<ReviewEvent, diesel::result::Error> {
    let id = row.id;
    ReviewEvent::try_from(row).map_err(|quality| {
        diesel::result::Error::DeserializationError(
            format!("review event {} has invalid quality {}", id, quality).into(),
        )
    })
}
