//! SQL access to the `PUBLIC_EVENT` table.
//!
//! The table has no fixed schema beyond its auto-generated integer `id`
//! primary key, so none of the statements here can be checked at compile
//! time. Rows are read back as JSON via `row_to_json`; writes go through
//! `jsonb_populate_record`, which coerces each JSON field to the type of
//! the matching table column. A payload field that names a column the
//! table does not have fails the statement, and that failure propagates
//! as a plain [`sqlx::Error`].

use kanau::processor::Processor;
use pubev_sdk::objects::events::EventPayload;
use serde_json::Value;

use crate::framework::DatabaseProcessor;

/// Quoted name of the events table.
///
/// The identifier is uppercase in the database, so it must stay quoted
/// in every statement.
pub const TABLE: &str = "\"PUBLIC_EVENT\"";

/// Fetch every row, in whatever order the store returns them.
#[derive(Debug, Clone, Copy)]
pub struct ListEvents;

impl Processor<ListEvents> for DatabaseProcessor {
    type Output = Vec<Value>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListEvents")]
    async fn process(&self, _query: ListEvents) -> Result<Vec<Value>, sqlx::Error> {
        sqlx::query_scalar(r#"SELECT row_to_json(e) FROM "PUBLIC_EVENT" AS e"#)
            .fetch_all(&self.pool)
            .await
    }
}

/// Fetch the row whose `id` matches, if any.
#[derive(Debug, Clone, Copy)]
pub struct GetEventById {
    pub id: i64,
}

impl Processor<GetEventById> for DatabaseProcessor {
    type Output = Option<Value>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetEventById")]
    async fn process(&self, query: GetEventById) -> Result<Option<Value>, sqlx::Error> {
        sqlx::query_scalar(r#"SELECT row_to_json(e) FROM "PUBLIC_EVENT" AS e WHERE e.id = $1"#)
            .bind(query.id)
            .fetch_optional(&self.pool)
            .await
    }
}

/// Insert the payload fields as a new row; the store assigns the id.
#[derive(Debug, Clone)]
pub struct InsertEvent {
    pub payload: EventPayload,
}

impl Processor<InsertEvent> for DatabaseProcessor {
    type Output = i64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:InsertEvent")]
    async fn process(&self, cmd: InsertEvent) -> Result<i64, sqlx::Error> {
        let sql = build_insert_sql(cmd.payload.columns());
        sqlx::query_scalar(&sql)
            .bind(cmd.payload.into_value())
            .fetch_one(&self.pool)
            .await
    }
}

/// Overwrite the payload fields of the row whose `id` matches.
///
/// Returns the number of rows affected; a nonexistent id affects zero
/// rows and is not an error.
#[derive(Debug, Clone)]
pub struct UpdateEvent {
    pub id: i64,
    pub payload: EventPayload,
}

impl Processor<UpdateEvent> for DatabaseProcessor {
    type Output = u64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:UpdateEvent")]
    async fn process(&self, cmd: UpdateEvent) -> Result<u64, sqlx::Error> {
        let sql = build_update_sql(cmd.payload.columns());
        let result = sqlx::query(&sql)
            .bind(cmd.payload.into_value())
            .bind(cmd.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Delete the row whose `id` matches.
///
/// Returns the number of rows affected; a nonexistent id affects zero
/// rows and is not an error.
#[derive(Debug, Clone, Copy)]
pub struct DeleteEvent {
    pub id: i64,
}

impl Processor<DeleteEvent> for DatabaseProcessor {
    type Output = u64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:DeleteEvent")]
    async fn process(&self, cmd: DeleteEvent) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(r#"DELETE FROM "PUBLIC_EVENT" WHERE id = $1"#)
            .bind(cmd.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Quote a payload field name as a SQL identifier.
///
/// Doubling embedded quotes keeps client-supplied field names from
/// escaping the identifier position.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Build the INSERT statement for the given payload columns.
///
/// The payload itself is bound as `$1` (jsonb); `jsonb_populate_record`
/// converts each field to the type of the matching table column. Callers
/// must pass at least one column.
fn build_insert_sql<'a>(columns: impl Iterator<Item = &'a str>) -> String {
    let mut cols = Vec::new();
    let mut vals = Vec::new();
    for column in columns {
        let quoted = quote_ident(column);
        vals.push(format!("r.{quoted}"));
        cols.push(quoted);
    }
    format!(
        "INSERT INTO {TABLE} ({}) SELECT {} FROM jsonb_populate_record(NULL::{TABLE}, $1) AS r RETURNING id::bigint",
        cols.join(", "),
        vals.join(", "),
    )
}

/// Build the UPDATE statement for the given payload columns.
///
/// The payload is `$1` (jsonb) and the row id is `$2`. Callers must pass
/// at least one column.
fn build_update_sql<'a>(columns: impl Iterator<Item = &'a str>) -> String {
    let assignments: Vec<String> = columns
        .map(|column| {
            let quoted = quote_ident(column);
            format!("{quoted} = r.{quoted}")
        })
        .collect();
    format!(
        "UPDATE {TABLE} AS e SET {} FROM jsonb_populate_record(NULL::{TABLE}, $1) AS r WHERE e.id = $2",
        assignments.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(body: serde_json::Value) -> EventPayload {
        match EventPayload::from_body(body) {
            Some(p) => p,
            None => unreachable!("test payloads are non-empty objects"),
        }
    }

    #[test]
    fn quote_ident_wraps_and_doubles_quotes() {
        assert_eq!(quote_ident("title"), "\"title\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn insert_sql_lists_columns_in_payload_order() {
        let p = payload(json!({"title": "Concert", "date": "2024-05-01"}));
        let sql = build_insert_sql(p.columns());
        assert_eq!(
            sql,
            "INSERT INTO \"PUBLIC_EVENT\" (\"date\", \"title\") \
             SELECT r.\"date\", r.\"title\" \
             FROM jsonb_populate_record(NULL::\"PUBLIC_EVENT\", $1) AS r \
             RETURNING id::bigint"
        );
    }

    #[test]
    fn update_sql_assigns_each_column() {
        let p = payload(json!({"title": "Concert (Updated)"}));
        let sql = build_update_sql(p.columns());
        assert_eq!(
            sql,
            "UPDATE \"PUBLIC_EVENT\" AS e SET \"title\" = r.\"title\" \
             FROM jsonb_populate_record(NULL::\"PUBLIC_EVENT\", $1) AS r \
             WHERE e.id = $2"
        );
    }

    #[test]
    fn sql_builders_quote_hostile_field_names() {
        let p = payload(json!({"x\"; DROP TABLE \"PUBLIC_EVENT": 1}));
        let sql = build_update_sql(p.columns());
        assert!(sql.contains("\"x\"\"; DROP TABLE \"\"PUBLIC_EVENT\""));
    }
}
