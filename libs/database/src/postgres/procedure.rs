//! Stored-procedure execution over a SeaORM connection pool.
//!
//! Procedures are PostgreSQL functions invoked in named notation, so the
//! parameter set is matched by name rather than position:
//!
//! ```text
//! SELECT * FROM "getProductById"("Id" => $1)           -- rows
//! SELECT "deleteProduct"("Id" => $1) AS result         -- scalar / affected rows
//! ```
//!
//! Every call checks a connection out of the pool for one statement and hands it
//! back when the statement finishes or fails. Errors are returned unchanged.

use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, QueryResult, Statement,
    TryGetable, Value,
};
use tracing::debug;

/// Column alias used for scalar results.
const SCALAR_COLUMN: &str = "result";

/// A named procedure plus its named parameters, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcedureCall {
    name: String,
    params: Vec<(String, Value)>,
}

impl ProcedureCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Bind `value` to the parameter called `name`.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `"proc"("A" => $1, "B" => $2)`
    fn invocation(&self) -> String {
        let args = self
            .params
            .iter()
            .enumerate()
            .map(|(i, (name, _))| format!("{} => ${}", quote_ident(name), i + 1))
            .collect::<Vec<_>>()
            .join(", ");

        format!("{}({})", quote_ident(&self.name), args)
    }

    fn values(&self) -> Vec<Value> {
        self.params.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Statement for a set-returning procedure.
    pub fn rows_statement(&self) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!("SELECT * FROM {}", self.invocation()),
            self.values(),
        )
    }

    /// Statement for a procedure returning a single value.
    pub fn scalar_statement(&self) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!("SELECT {} AS {}", self.invocation(), SCALAR_COLUMN),
            self.values(),
        )
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Executes [`ProcedureCall`]s against an injected connection pool.
#[derive(Clone, Debug)]
pub struct StoredProcedures {
    db: DatabaseConnection,
}

impl StoredProcedures {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Run a row-returning procedure and return its full result set.
    pub async fn query(&self, call: ProcedureCall) -> Result<Vec<QueryResult>, DbErr> {
        debug!(procedure = call.name(), mode = "query", "Calling stored procedure");
        self.db.query_all_raw(call.rows_statement()).await
    }

    /// Run a procedure and read its single return value; `None` for no row or NULL.
    pub async fn scalar<T: TryGetable>(&self, call: ProcedureCall) -> Result<Option<T>, DbErr> {
        debug!(procedure = call.name(), mode = "scalar", "Calling stored procedure");
        match self.db.query_one_raw(call.scalar_statement()).await? {
            Some(row) => Ok(row.try_get::<Option<T>>("", SCALAR_COLUMN)?),
            None => Ok(None),
        }
    }

    /// Run a write procedure and return the number of rows it reports as affected.
    pub async fn execute(&self, call: ProcedureCall) -> Result<u64, DbErr> {
        debug!(procedure = call.name(), mode = "execute", "Calling stored procedure");
        let affected = match self.db.query_one_raw(call.scalar_statement()).await? {
            Some(row) => row.try_get::<Option<i32>>("", SCALAR_COLUMN)?,
            None => None,
        };
        Ok(affected.map_or(0, |n| n.max(0) as u64))
    }
}
