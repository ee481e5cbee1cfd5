//! Tenant-scoped access to the relational store.
//!
//! The `SqlitePool` lives inside [`TenantGuard`] and is not reachable from
//! anywhere else: repositories hold a guard, never a pool, so every
//! statement passes through the scoping logic here. Query fragments are
//! built structurally ([`SelectQuery`], [`Table`], [`SqlValue`]) rather
//! than sniffed out of strings; a select is read-only by construction.

use pressbase_domain::{DomainError, TenantId};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};
use tracing::{error, warn};

/// Tables the guard knows how to scope. `Sites` rows are tenants
/// themselves, so their scope column is the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Sites,
    Articles,
    Pages,
    MediaAssets,
    Subscribers,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Sites => "sites",
            Table::Articles => "articles",
            Table::Pages => "pages",
            Table::MediaAssets => "media_assets",
            Table::Subscribers => "subscribers",
        }
    }

    /// Column carrying the tenant id in this table.
    pub fn scope_column(self) -> &'static str {
        match self {
            Table::Sites => "id",
            _ => "site_id",
        }
    }
}

/// One positional bind value.
#[derive(Debug, Clone)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Null,
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Boolean(v)
    }
}

impl From<Option<String>> for SqlValue {
    fn from(v: Option<String>) -> Self {
        match v {
            Some(s) => SqlValue::Text(s),
            None => SqlValue::Null,
        }
    }
}

/// A read-only query under construction. Carries no tenant condition of its
/// own; the guard appends that when executing.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: Table,
    columns: &'static str,
    predicates: Vec<String>,
    order_by: Option<&'static str>,
    limit: Option<i64>,
    params: Vec<SqlValue>,
}

impl SelectQuery {
    pub fn from_table(table: Table, columns: &'static str) -> Self {
        Self {
            table,
            columns,
            predicates: Vec::new(),
            order_by: None,
            limit: None,
            params: Vec::new(),
        }
    }

    /// Adds an `AND`-ed predicate with its positional params.
    pub fn filter(mut self, predicate: &str, params: Vec<SqlValue>) -> Self {
        self.predicates.push(predicate.to_string());
        self.params.extend(params);
        self
    }

    pub fn order_by(mut self, clause: &'static str) -> Self {
        self.order_by = Some(clause);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    fn validate(&self) -> Result<(), DomainError> {
        for predicate in &self.predicates {
            validate_fragment(predicate, self.table)?;
        }
        Ok(())
    }

    /// Final SQL with the tenant scope appended as the last predicate. The
    /// scope bind value is appended after all caller params.
    fn render(&self) -> String {
        let mut sql = format!("SELECT {} FROM {} WHERE ", self.columns, self.table.name());
        for predicate in &self.predicates {
            sql.push('(');
            sql.push_str(predicate);
            sql.push_str(") AND ");
        }
        sql.push_str(self.table.scope_column());
        sql.push_str(" = ?");
        if let Some(order) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        sql
    }
}

/// Rejects fragments that could smuggle statements or their own tenant
/// scoping past the guard.
fn validate_fragment(fragment: &str, table: Table) -> Result<(), DomainError> {
    if fragment.trim().is_empty() {
        return Err(DomainError::Validation(
            "Query fragment cannot be empty".to_string(),
        ));
    }
    if fragment.contains(';') {
        return Err(DomainError::Validation(
            "Query fragment must be a single statement".to_string(),
        ));
    }
    if fragment.contains(table.scope_column()) {
        return Err(DomainError::Validation(format!(
            "Query fragment must not reference the tenant scope column '{}'",
            table.scope_column()
        )));
    }
    Ok(())
}

/// The only path to the store. Owns the pool; appends the tenant scope to
/// every select, insert, update, and delete. `raw`/`raw_fetch` are the
/// sanctioned escape hatch for cross-tenant work and always log.
pub struct TenantGuard {
    pool: SqlitePool,
}

impl TenantGuard {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Runs a scoped select and maps each row.
    pub async fn select<T>(&self, tenant: &TenantId, query: SelectQuery) -> Result<Vec<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        query.validate()?;
        let sql = query.render();

        let mut q = sqlx::query_as::<_, T>(&sql);
        for param in &query.params {
            q = bind_as(q, param);
        }
        q = q.bind(tenant.as_str());

        q.fetch_all(&self.pool).await.map_err(|e| {
            error!(error = %e, table = query.table.name(), "Scoped select failed");
            DomainError::Storage(e.to_string())
        })
    }

    /// Runs a scoped select expected to yield at most one row.
    pub async fn select_one<T>(
        &self,
        tenant: &TenantId,
        query: SelectQuery,
    ) -> Result<Option<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        query.validate()?;
        let sql = query.render();

        let mut q = sqlx::query_as::<_, T>(&sql);
        for param in &query.params {
            q = bind_as(q, param);
        }
        q = q.bind(tenant.as_str());

        q.fetch_optional(&self.pool).await.map_err(|e| {
            error!(error = %e, table = query.table.name(), "Scoped select failed");
            DomainError::Storage(e.to_string())
        })
    }

    /// Inserts one row, forcing the tenant scope column to the active
    /// tenant. A caller-supplied value for that column is discarded: a row
    /// cannot be created on behalf of another tenant, even by mistake.
    pub async fn insert(
        &self,
        tenant: &TenantId,
        table: Table,
        fields: Vec<(&'static str, SqlValue)>,
    ) -> Result<(), DomainError> {
        let mut fields: Vec<(&'static str, SqlValue)> = fields
            .into_iter()
            .filter(|(column, _)| *column != table.scope_column())
            .collect();
        fields.push((table.scope_column(), SqlValue::Text(tenant.as_str().to_string())));

        let columns: Vec<&str> = fields.iter().map(|(column, _)| *column).collect();
        let placeholders = vec!["?"; fields.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name(),
            columns.join(", "),
            placeholders
        );

        let mut q = sqlx::query(&sql);
        for (_, value) in &fields {
            q = bind(q, value);
        }

        q.execute(&self.pool).await.map_err(|e| {
            error!(error = %e, table = table.name(), "Scoped insert failed");
            storage_error(e)
        })?;
        Ok(())
    }

    /// Updates rows matching `predicate` within the tenant's scope and
    /// returns the number of rows affected. Zero rows on an id-targeted
    /// update means "not yours or not there"; the repository layer turns
    /// that into `TenantMismatch`.
    pub async fn update(
        &self,
        tenant: &TenantId,
        table: Table,
        fields: Vec<(&'static str, SqlValue)>,
        predicate: &str,
        where_params: Vec<SqlValue>,
    ) -> Result<u64, DomainError> {
        validate_fragment(predicate, table)?;
        // The scope column is never settable through an update.
        let fields: Vec<(&'static str, SqlValue)> = fields
            .into_iter()
            .filter(|(column, _)| *column != table.scope_column())
            .collect();
        if fields.is_empty() {
            return Err(DomainError::Validation(
                "Update must set at least one column".to_string(),
            ));
        }

        let assignments: Vec<String> = fields
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE ({}) AND {} = ?",
            table.name(),
            assignments.join(", "),
            predicate,
            table.scope_column()
        );

        let mut q = sqlx::query(&sql);
        for (_, value) in &fields {
            q = bind(q, value);
        }
        for value in &where_params {
            q = bind(q, value);
        }
        q = q.bind(tenant.as_str());

        let result = q.execute(&self.pool).await.map_err(|e| {
            error!(error = %e, table = table.name(), "Scoped update failed");
            storage_error(e)
        })?;
        Ok(result.rows_affected())
    }

    /// Deletes rows matching `predicate` within the tenant's scope and
    /// returns the number of rows affected.
    pub async fn delete(
        &self,
        tenant: &TenantId,
        table: Table,
        predicate: &str,
        where_params: Vec<SqlValue>,
    ) -> Result<u64, DomainError> {
        validate_fragment(predicate, table)?;
        let sql = format!(
            "DELETE FROM {} WHERE ({}) AND {} = ?",
            table.name(),
            predicate,
            table.scope_column()
        );

        let mut q = sqlx::query(&sql);
        for value in &where_params {
            q = bind(q, value);
        }
        q = q.bind(tenant.as_str());

        let result = q.execute(&self.pool).await.map_err(|e| {
            error!(error = %e, table = table.name(), "Scoped delete failed");
            storage_error(e)
        })?;
        Ok(result.rows_affected())
    }

    /// Deletes every row of `table` belonging to the tenant. Used by
    /// cascading site deletion.
    pub async fn delete_all(&self, tenant: &TenantId, table: Table) -> Result<u64, DomainError> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?",
            table.name(),
            table.scope_column()
        );
        let result = sqlx::query(&sql)
            .bind(tenant.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, table = table.name(), "Scoped bulk delete failed");
                storage_error(e)
            })?;
        Ok(result.rows_affected())
    }

    /// Unscoped statement. The only sanctioned way around tenant scoping;
    /// every call is logged with its caller.
    pub async fn raw(
        &self,
        caller: &'static str,
        sql: &str,
        params: Vec<SqlValue>,
    ) -> Result<u64, DomainError> {
        warn!(caller, sql, "Unscoped statement through TenantGuard::raw");

        let mut q = sqlx::query(sql);
        for value in &params {
            q = bind(q, value);
        }
        let result = q.execute(&self.pool).await.map_err(|e| {
            error!(error = %e, caller, "Raw statement failed");
            storage_error(e)
        })?;
        Ok(result.rows_affected())
    }

    /// Unscoped query. Same contract as [`raw`](Self::raw).
    pub async fn raw_fetch<T>(
        &self,
        caller: &'static str,
        sql: &str,
        params: Vec<SqlValue>,
    ) -> Result<Vec<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        warn!(caller, sql, "Unscoped query through TenantGuard::raw_fetch");

        let mut q = sqlx::query_as::<_, T>(sql);
        for value in &params {
            q = bind_as(q, value);
        }
        q.fetch_all(&self.pool).await.map_err(|e| {
            error!(error = %e, caller, "Raw query failed");
            storage_error(e)
        })
    }
}

fn storage_error(e: sqlx::Error) -> DomainError {
    DomainError::Storage(e.to_string())
}

type SqliteQuery<'q> = sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>;
type SqliteQueryAs<'q, T> =
    sqlx::query::QueryAs<'q, sqlx::Sqlite, T, sqlx::sqlite::SqliteArguments<'q>>;

fn bind<'q>(q: SqliteQuery<'q>, value: &'q SqlValue) -> SqliteQuery<'q> {
    match value {
        SqlValue::Text(s) => q.bind(s.as_str()),
        SqlValue::Integer(i) => q.bind(*i),
        SqlValue::Boolean(b) => q.bind(*b),
        SqlValue::Null => q.bind(Option::<String>::None),
    }
}

fn bind_as<'q, T>(q: SqliteQueryAs<'q, T>, value: &'q SqlValue) -> SqliteQueryAs<'q, T> {
    match value {
        SqlValue::Text(s) => q.bind(s.as_str()),
        SqlValue::Integer(i) => q.bind(*i),
        SqlValue::Boolean(b) => q.bind(*b),
        SqlValue::Null => q.bind(Option::<String>::None),
    }
}
