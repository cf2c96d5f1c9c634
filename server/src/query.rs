//! Thin helpers over the connection for statements built with sea-query.
//!
//! Storage errors are logged here and swallowed: `None` means the result
//! could not be determined, which callers keep apart from an empty or zero
//! result. `count_rows` is the exception and reports 0 on failure.

use sea_orm::{ConnectionTrait, DbErr, FromQueryResult, JsonValue, StatementBuilder};
use sea_query::{Alias, Asterisk, Expr, Query, SelectStatement};

/// A row as a field name -> value mapping.
pub type Record = serde_json::Map<String, JsonValue>;

pub fn logged<T>(context: &str, result: Result<T, DbErr>) -> Option<T> {
    result.inspect_err(|e| log::error!("{context}: {e}")).ok()
}

pub async fn select_rows<C, M>(db: &C, query: &SelectStatement) -> Option<Vec<M>>
where
    C: ConnectionTrait,
    M: FromQueryResult,
{
    let stmt = db.get_database_backend().build(query);
    let context = format!("Select failed: {stmt}");
    logged(&context, M::find_by_statement(stmt).all(db).await)
}

pub async fn select_records<C: ConnectionTrait>(
    db: &C,
    query: &SelectStatement,
) -> Option<Vec<Record>> {
    let rows: Vec<JsonValue> = select_rows(db, query).await?;
    Some(
        rows.into_iter()
            .filter_map(|row| match row {
                JsonValue::Object(record) => Some(record),
                _ => None,
            })
            .collect(),
    )
}

/// Runs an insert/update/delete and returns the number of affected rows.
pub async fn execute<C, S>(db: &C, statement: &S) -> Option<u64>
where
    C: ConnectionTrait,
    S: StatementBuilder,
{
    let stmt = db.get_database_backend().build(statement);
    let context = format!("Statement failed: {stmt}");
    logged(&context, db.execute(stmt).await.map(|r| r.rows_affected()))
}

#[derive(FromQueryResult)]
struct CountResult {
    nb: i64,
}

// `table` is data: it only ever reaches SQL as a quoted identifier.
pub async fn count_rows<C: ConnectionTrait>(db: &C, table: &str) -> i64 {
    let query = Query::select()
        .expr_as(Expr::col(Asterisk).count(), Alias::new("nb"))
        .from(Alias::new(table))
        .to_owned();
    select_rows::<_, CountResult>(db, &query)
        .await
        .and_then(|rows| rows.into_iter().next())
        .map_or(0, |c| c.nb)
}

pub async fn dump_table<C: ConnectionTrait>(db: &C, table: &str) -> Option<Vec<Record>> {
    let query = Query::select()
        .column(Asterisk)
        .from(Alias::new(table))
        .to_owned();
    select_records(db, &query).await
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing;
    use morpion_db as db;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn test_count_rows() {
        let db = testing::test_db().await;
        assert_eq!(count_rows(&db, "morpion").await, 0);
        testing::insert_morpions(&db, 4).await;
        assert_eq!(count_rows(&db, "morpion").await, 4);
        assert_eq!(count_rows(&db, "team").await, 0);
        // Unknown table is an error, which counts as zero.
        assert_eq!(count_rows(&db, "no_such_table").await, 0);
    }

    #[tokio::test]
    async fn test_table_name_is_quoted() {
        let db = testing::test_db().await;
        testing::insert_morpions(&db, 2).await;
        assert_eq!(
            count_rows(&db, "morpion\"; DROP TABLE morpion; --").await,
            0
        );
        assert!(dump_table(&db, "morpion\" --").await.is_none());
        let morpions = db::morpion::Entity::find()
            .all(&db)
            .await
            .expect("morpion table must survive");
        assert_eq!(morpions.len(), 2);
    }

    #[tokio::test]
    async fn test_dump_table_records() {
        let db = testing::test_db().await;
        let ids = testing::insert_morpions(&db, 3).await;
        let records = dump_table(&db, "morpion")
            .await
            .expect("Failed to dump morpion table");
        assert_eq!(records.len(), 3);
        let mut got_ids = records
            .iter()
            .map(|r| r.get("id_morpion").and_then(JsonValue::as_i64))
            .collect::<Vec<_>>();
        got_ids.sort();
        assert_eq!(got_ids, ids.into_iter().map(Some).collect::<Vec<_>>());
        for r in records.iter() {
            for field in ["name", "image_url", "hp", "attack", "mana", "accuracy"] {
                assert!(r.contains_key(field), "missing {field} in {r:?}");
            }
        }
        assert_eq!(dump_table(&db, "team").await, Some(vec![]));
    }

    #[tokio::test]
    async fn test_execute_reports_affected_rows() {
        let db = testing::test_db().await;
        testing::insert_morpions(&db, 3).await;
        let update = Query::update()
            .table(db::morpion::Entity)
            .value(db::morpion::Column::Hp, 1)
            .and_where(Expr::col(db::morpion::Column::Hp).gt(0))
            .to_owned();
        assert_eq!(execute(&db, &update).await, Some(3));
        let delete = Query::delete()
            .from_table(Alias::new("no_such_table"))
            .to_owned();
        assert_eq!(execute(&db, &delete).await, None);
    }
}
