use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::Integer;

use crate::data::models::{NewWord, ScheduleChangeset, WordRecord, WordRow};
use crate::schema::words;

/// Durable word-record store over the `words` table.
pub struct WordRepository;

impl WordRepository {
    pub fn insert(
        conn: &mut SqliteConnection,
        new_word: &NewWord<'_>,
    ) -> Result<WordRecord, diesel::result::Error> {
        conn.immediate_transaction(|conn| {
            diesel::insert_into(words::table)
                .values(new_word)
                .execute(conn)?;

            let id = diesel::select(diesel::dsl::sql::<Integer>("last_insert_rowid()"))
                .get_result::<i32>(conn)?;

            words::table
                .find(id)
                .select(WordRow::as_select())
                .first(conn)
                .map(WordRecord::from)
        })
    }

    pub fn find(
        conn: &mut SqliteConnection,
        id: i32,
    ) -> Result<Option<WordRecord>, diesel::result::Error> {
        words::table
            .find(id)
            .select(WordRow::as_select())
            .first(conn)
            .optional()
            .map(|row| row.map(WordRecord::from))
    }

    /// Every word in insertion order.
    pub fn list_all(conn: &mut SqliteConnection) -> Result<Vec<WordRecord>, diesel::result::Error> {
        Self::load(conn, words::table.order(words::id.asc()).into_boxed())
    }

    pub fn delete(conn: &mut SqliteConnection, id: i32) -> Result<bool, diesel::result::Error> {
        let deleted = diesel::delete(words::table.find(id)).execute(conn)?;
        Ok(deleted > 0)
    }

    /// Replaces the scheduling columns of one word. Returns false when the
    /// word no longer exists.
    pub fn update_schedule(
        conn: &mut SqliteConnection,
        id: i32,
        changes: &ScheduleChangeset,
    ) -> Result<bool, diesel::result::Error> {
        let updated = diesel::update(words::table.find(id))
            .set(changes)
            .execute(conn)?;
        Ok(updated > 0)
    }

    /// Words with `due_at <= cutoff`, earliest first.
    pub fn due_at_or_before(
        conn: &mut SqliteConnection,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<WordRecord>, diesel::result::Error> {
        Self::load(
            conn,
            words::table
                .filter(words::due_at.le(cutoff))
                .order((words::due_at.asc(), words::id.asc()))
                .into_boxed(),
        )
    }

    /// Words with `due_at < cutoff`, earliest first.
    pub fn due_before(
        conn: &mut SqliteConnection,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<WordRecord>, diesel::result::Error> {
        Self::load(
            conn,
            words::table
                .filter(words::due_at.lt(cutoff))
                .order((words::due_at.asc(), words::id.asc()))
                .into_boxed(),
        )
    }

    /// Words with `after < due_at < before`, earliest first.
    pub fn due_between(
        conn: &mut SqliteConnection,
        after: NaiveDateTime,
        before: NaiveDateTime,
    ) -> Result<Vec<WordRecord>, diesel::result::Error> {
        Self::load(
            conn,
            words::table
                .filter(words::due_at.gt(after))
                .filter(words::due_at.lt(before))
                .order((words::due_at.asc(), words::id.asc()))
                .into_boxed(),
        )
    }

    /// Due timestamps of every word due before `cutoff`.
    pub fn due_timestamps_before(
        conn: &mut SqliteConnection,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<NaiveDateTime>, diesel::result::Error> {
        words::table
            .filter(words::due_at.lt(cutoff))
            .select(words::due_at)
            .load(conn)
    }

    pub fn count_all(conn: &mut SqliteConnection) -> Result<i64, diesel::result::Error> {
        words::table.count().get_result(conn)
    }

    pub fn count_due_at_or_before(
        conn: &mut SqliteConnection,
        cutoff: NaiveDateTime,
    ) -> Result<i64, diesel::result::Error> {
        words::table
            .filter(words::due_at.le(cutoff))
            .count()
            .get_result(conn)
    }

    pub fn count_due_before(
        conn: &mut SqliteConnection,
        cutoff: NaiveDateTime,
    ) -> Result<i64, diesel::result::Error> {
        words::table
            .filter(words::due_at.lt(cutoff))
            .count()
            .get_result(conn)
    }

    fn load(
        conn: &mut SqliteConnection,
        query: words::BoxedQuery<'_, diesel::sqlite::Sqlite>,
    ) -> Result<Vec<WordRecord>, diesel::result::Error> {
        Ok(query
            .select(WordRow::as_select())
            .load(conn)?
            .into_iter()
            .map(WordRecord::from)
            .collect())
    }
}
