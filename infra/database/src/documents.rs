//! Typed document access keyed by string record ids.
//!
//! Records are addressed as `type::thing($tb, $key)`; reads project the key back into an
//! `id` string field and writes strip any `id` from the payload so the key stays authoritative.

use crate::Database;
use crate::error::{DatabaseError, DatabaseErrorExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

/// An equality filter on a top-level document field.
pub type Filter = (&'static str, Value);

#[derive(Debug, serde::Deserialize)]
struct CountRow {
    count: u64,
}

impl Database {
    /// Loads one record, or `None` when the key is unknown.
    pub async fn fetch<T>(&self, table: &'static str, key: &str) -> Result<Option<T>, DatabaseError>
    where
        T: DeserializeOwned,
    {
        trace!(table, key, "fetch");
        self.query("SELECT *, record::id(id) AS id FROM type::thing($tb, $key)")
            .bind(("tb", table))
            .bind(("key", key.to_owned()))
            .await
            .context(format!("Loading {table}:{key}"))?
            .take::<Option<T>>(0)
            .context(format!("Decoding {table}:{key}"))
    }

    /// Lists a table, optionally filtered on one field, ordered by `order` clauses
    /// such as `"position ASC"`.
    pub async fn fetch_all<T>(
        &self,
        table: &'static str,
        filter: Option<Filter>,
        order: &[&'static str],
    ) -> Result<Vec<T>, DatabaseError>
    where
        T: DeserializeOwned,
    {
        let mut sql = String::from("SELECT *, record::id(id) AS id FROM type::table($tb)");
        if let Some((field, _)) = &filter {
            sql.push_str(&format!(" WHERE {field} = $value"));
        }
        if !order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(", "));
        }

        let value = filter.map_or(Value::Null, |(_, value)| value);
        self.query(sql)
            .bind(("tb", table))
            .bind(("value", value))
            .await
            .context(format!("Listing {table}"))?
            .take::<Vec<T>>(0)
            .context(format!("Decoding {table} rows"))
    }

    /// First record whose `field` equals `value`.
    pub async fn find_by<T>(
        &self,
        table: &'static str,
        field: &'static str,
        value: impl Into<Value>,
    ) -> Result<Option<T>, DatabaseError>
    where
        T: DeserializeOwned,
    {
        self.query(format!(
            "SELECT *, record::id(id) AS id FROM type::table($tb) WHERE {field} = $value LIMIT 1"
        ))
        .bind(("tb", table))
        .bind(("value", value.into()))
        .await
        .context(format!("Searching {table} by {field}"))?
        .take::<Option<T>>(0)
        .context(format!("Decoding {table} row"))
    }

    /// Inserts a new record.
    ///
    /// # Errors
    /// [`DatabaseError::Conflict`] when the key or a unique index value is taken.
    pub async fn create<T>(&self, table: &'static str, key: &str, data: &T) -> Result<(), DatabaseError>
    where
        T: Serialize,
    {
        self.write("CREATE", table, key, data).await
    }

    /// Inserts or fully replaces a record.
    pub async fn upsert<T>(&self, table: &'static str, key: &str, data: &T) -> Result<(), DatabaseError>
    where
        T: Serialize,
    {
        self.write("UPSERT", table, key, data).await
    }

    /// Whether another record (not `except`) already has `field == value`.
    pub async fn exists_with(
        &self,
        table: &'static str,
        field: &'static str,
        value: impl Into<Value>,
        except: Option<&str>,
    ) -> Result<bool, DatabaseError> {
        let found = self
            .query(format!(
                "SELECT VALUE record::id(id) FROM type::table($tb) \
                 WHERE {field} = $value AND record::id(id) != $except LIMIT 1"
            ))
            .bind(("tb", table))
            .bind(("value", value.into()))
            .bind(("except", except.map(str::to_owned)))
            .await
            .context(format!("Checking {table}.{field} uniqueness"))?
            .take::<Option<Value>>(0)
            .context(format!("Decoding {table}.{field} probe"))?;

        Ok(found.is_some())
    }

    /// Deletes a record; returns whether it existed.
    pub async fn remove(&self, table: &'static str, key: &str) -> Result<bool, DatabaseError> {
        let removed = self
            .query("DELETE type::thing($tb, $key) RETURN VALUE record::id($before.id)")
            .bind(("tb", table))
            .bind(("key", key.to_owned()))
            .await
            .context(format!("Deleting {table}:{key}"))?
            .take::<Vec<String>>(0)
            .context(format!("Decoding {table}:{key} deletion"))?;

        Ok(!removed.is_empty())
    }

    pub async fn count(&self, table: &'static str) -> Result<u64, DatabaseError> {
        let row = self
            .query("SELECT count() FROM type::table($tb) GROUP ALL")
            .bind(("tb", table))
            .await
            .context(format!("Counting {table}"))?
            .take::<Option<CountRow>>(0)
            .context(format!("Decoding {table} count"))?;

        Ok(row.map_or(0, |row| row.count))
    }

    async fn write<T>(
        &self,
        verb: &'static str,
        table: &'static str,
        key: &str,
        data: &T,
    ) -> Result<(), DatabaseError>
    where
        T: Serialize,
    {
        let content = payload(data)?;
        trace!(verb, table, key, "write");

        let context = format!("{verb} {table}:{key}");
        self.query(format!("{verb} type::thing($tb, $key) CONTENT $data RETURN NONE"))
            .bind(("tb", table))
            .bind(("key", key.to_owned()))
            .bind(("data", content))
            .await
            .and_then(surrealdb::Response::check)
            .map_err(|err| DatabaseError::from_write(err, context))?;

        Ok(())
    }
}

fn payload<T: Serialize>(data: &T) -> Result<Value, DatabaseError> {
    let mut value = serde_json::to_value(data).context("Encoding document")?;
    match value.as_object_mut() {
        Some(object) => {
            object.remove("id");
            Ok(value)
        },
        None => Err(DatabaseError::Validation {
            message: "Documents must serialize to an object".into(),
            context: None,
        }),
    }
}
