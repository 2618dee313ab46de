//! Routine and record persistence

use crate::cleaning::{Record, RecordId, Routine, RoutineId, RoutineTitle};
use chrono::NaiveDate;
use home_common::time::{format_date, parse_date};
use home_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tracing::debug;

fn routine_from_row(row: &SqliteRow) -> Result<Routine> {
    let id: RoutineId = row.try_get("id")?;
    let title: String = row.try_get("title")?;
    let frequency: i64 = row.try_get("frequency_weeks")?;

    let frequency_weeks = u32::try_from(frequency)
        .ok()
        .filter(|weeks| *weeks > 0)
        .ok_or_else(|| {
            Error::InvalidRow(format!(
                "routine {} has non-positive frequency {}",
                id, frequency
            ))
        })?;

    Ok(Routine {
        id,
        title: RoutineTitle::parse(&title)?,
        frequency_weeks,
    })
}

fn record_from_row(row: &SqliteRow) -> Result<Record> {
    let id: RecordId = row.try_get("id")?;
    let recorded_at: String = row.try_get("recorded_at")?;

    let recorded_at = parse_date(&recorded_at).map_err(|e| {
        Error::InvalidRow(format!(
            "record {} has invalid date '{}': {}",
            id, recorded_at, e
        ))
    })?;

    Ok(Record {
        id,
        routine_id: row.try_get("routine_id")?,
        recorded_at,
    })
}

/// Load every routine.
///
/// Fails with [`Error::InvalidTitle`] if any stored title is not `<Room>/<Task>`.
pub async fn all_routines(pool: &SqlitePool) -> Result<Vec<Routine>> {
    let rows = sqlx::query("SELECT id, title, frequency_weeks FROM routine ORDER BY id")
        .fetch_all(pool)
        .await?;

    rows.iter().map(routine_from_row).collect()
}

/// Load every record, keyed by owning routine
pub async fn records_by_routine(pool: &SqlitePool) -> Result<HashMap<RoutineId, Vec<Record>>> {
    let rows = sqlx::query("SELECT id, routine_id, recorded_at FROM record")
        .fetch_all(pool)
        .await?;

    let mut records: HashMap<RoutineId, Vec<Record>> = HashMap::new();
    for row in &rows {
        let record = record_from_row(row)?;
        records.entry(record.routine_id).or_default().push(record);
    }

    debug!("Loaded {} records for {} routines", rows.len(), records.len());
    Ok(records)
}

/// Ids of routines whose title matches a SQL `LIKE` pattern
pub async fn matching_routine_ids(pool: &SqlitePool, pattern: &str) -> Result<Vec<RoutineId>> {
    let ids = sqlx::query_scalar("SELECT id FROM routine WHERE title LIKE ? ORDER BY id")
        .bind(pattern)
        .fetch_all(pool)
        .await?;

    Ok(ids)
}

/// Id of the routine with exactly this title
pub async fn routine_id_by_title(pool: &SqlitePool, title: &str) -> Result<Option<RoutineId>> {
    let id = sqlx::query_scalar("SELECT id FROM routine WHERE title = ?")
        .bind(title)
        .fetch_optional(pool)
        .await?;

    Ok(id)
}

/// Append one completion record
pub async fn insert_record(
    pool: &SqlitePool,
    routine_id: RoutineId,
    recorded_at: NaiveDate,
) -> Result<RecordId> {
    let result = sqlx::query("INSERT INTO record (routine_id, recorded_at) VALUES (?, ?)")
        .bind(routine_id)
        .bind(format_date(recorded_at))
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Append one record per routine, all or nothing.
///
/// An unknown routine id aborts the whole batch with [`Error::NotFound`];
/// the transaction is rolled back when dropped uncommitted.
pub async fn insert_records(
    pool: &SqlitePool,
    routine_ids: &[RoutineId],
    recorded_at: NaiveDate,
) -> Result<usize> {
    let recorded_at = format_date(recorded_at);
    let mut tx = pool.begin().await?;

    for routine_id in routine_ids {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM routine WHERE id = ?)")
            .bind(routine_id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(Error::NotFound(format!("routine {}", routine_id)));
        }

        sqlx::query("INSERT INTO record (routine_id, recorded_at) VALUES (?, ?)")
            .bind(routine_id)
            .bind(&recorded_at)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(routine_ids.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use home_common::db::{open_memory_database, run_migrations};

    async fn setup_test_db() -> SqlitePool {
        let pool = open_memory_database().await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    async fn add_routine(pool: &SqlitePool, title: &str, frequency_weeks: i64) -> RoutineId {
        sqlx::query("INSERT INTO routine (title, frequency_weeks) VALUES (?, ?)")
            .bind(title)
            .bind(frequency_weeks)
            .execute(pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn record_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM record")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_all_routines_parses_titles() {
        let pool = setup_test_db().await;
        add_routine(&pool, "Kitchen/Sink", 1).await;
        add_routine(&pool, "Bath/Tub", 2).await;

        let routines = all_routines(&pool).await.unwrap();

        assert_eq!(routines.len(), 2);
        assert_eq!(routines[0].title.room(), "Kitchen");
        assert_eq!(routines[0].title.task(), "Sink");
        assert_eq!(routines[1].frequency_weeks, 2);
    }

    #[tokio::test]
    async fn test_all_routines_rejects_unstructured_title() {
        let pool = setup_test_db().await;
        add_routine(&pool, "Kitchen/Sink", 1).await;
        add_routine(&pool, "Kitchen", 1).await;

        let err = all_routines(&pool).await.unwrap_err();
        assert!(matches!(err, Error::InvalidTitle(ref raw) if raw == "Kitchen"));
    }

    #[tokio::test]
    async fn test_records_grouped_by_routine() {
        let pool = setup_test_db().await;
        let sink = add_routine(&pool, "Kitchen/Sink", 1).await;
        let tub = add_routine(&pool, "Bath/Tub", 1).await;
        insert_record(&pool, sink, date(2024, 1, 1)).await.unwrap();
        insert_record(&pool, sink, date(2024, 1, 8)).await.unwrap();
        insert_record(&pool, tub, date(2024, 1, 3)).await.unwrap();

        let records = records_by_routine(&pool).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[&sink].len(), 2);
        assert_eq!(records[&tub][0].recorded_at, date(2024, 1, 3));
    }

    #[tokio::test]
    async fn test_records_with_bad_date_are_malformed() {
        let pool = setup_test_db().await;
        let sink = add_routine(&pool, "Kitchen/Sink", 1).await;
        sqlx::query("INSERT INTO record (routine_id, recorded_at) VALUES (?, '2024-01-01T10:00:00')")
            .bind(sink)
            .execute(&pool)
            .await
            .unwrap();

        let err = records_by_routine(&pool).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRow(_)));
    }

    #[tokio::test]
    async fn test_matching_routine_ids_uses_like() {
        let pool = setup_test_db().await;
        let sink = add_routine(&pool, "Kitchen/Sink", 1).await;
        let floor = add_routine(&pool, "Kitchen/Floor", 1).await;
        add_routine(&pool, "Bath/Tub", 1).await;

        assert_eq!(matching_routine_ids(&pool, "Kitchen/%").await.unwrap(), vec![sink, floor]);
        assert_eq!(matching_routine_ids(&pool, "Kitchen/Sink").await.unwrap(), vec![sink]);
        assert!(matching_routine_ids(&pool, "Garage/%").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_routine_id_by_title_is_exact() {
        let pool = setup_test_db().await;
        let sink = add_routine(&pool, "Kitchen/Sink", 1).await;

        assert_eq!(routine_id_by_title(&pool, "Kitchen/Sink").await.unwrap(), Some(sink));
        assert_eq!(routine_id_by_title(&pool, "Kitchen/%").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_record_stores_date_only() {
        let pool = setup_test_db().await;
        let sink = add_routine(&pool, "Kitchen/Sink", 1).await;
        insert_record(&pool, sink, date(2024, 2, 29)).await.unwrap();

        let stored: String = sqlx::query_scalar("SELECT recorded_at FROM record")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stored, "2024-02-29");
    }

    #[tokio::test]
    async fn test_insert_records_batch() {
        let pool = setup_test_db().await;
        let sink = add_routine(&pool, "Kitchen/Sink", 1).await;
        let tub = add_routine(&pool, "Bath/Tub", 1).await;

        let inserted = insert_records(&pool, &[sink, tub], date(2024, 1, 10)).await.unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(record_count(&pool).await, 2);
    }

    #[tokio::test]
    async fn test_insert_records_is_all_or_nothing() {
        let pool = setup_test_db().await;
        let sink = add_routine(&pool, "Kitchen/Sink", 1).await;
        let tub = add_routine(&pool, "Bath/Tub", 1).await;

        let err = insert_records(&pool, &[sink, 999, tub], date(2024, 1, 10))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(record_count(&pool).await, 0);
    }
}
