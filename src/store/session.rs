//! Store session trait
//!
//! The wide-column store client is an injected handle, not ambient state:
//! every component that reads the store owns an `Arc<dyn StoreSession>`. The
//! session must tolerate many concurrent outstanding reads; connection
//! pooling is the backing driver's concern.

use async_trait::async_trait;

use crate::store::error::StoreResult;
use crate::store::row::RowSet;
use crate::store::statement::Statement;
use crate::store::value::Value;

/// Handle for a statement the session has prepared
#[derive(Debug, Clone)]
pub struct PreparedStatement {
    statement: Statement,
    cql: String,
}

impl PreparedStatement {
    pub fn new(statement: Statement) -> Self {
        let cql = statement.cql();
        Self { statement, cql }
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn cql(&self) -> &str {
        &self.cql
    }
}

/// Asynchronous read access to the wide-column store
///
/// Bound-parameter order for `execute` follows the statement: equality
/// columns in declaration order, then the partition key, then the window
/// start and end.
#[async_trait]
pub trait StoreSession: Send + Sync {
    /// Prepare a statement for repeated execution
    async fn prepare(&self, statement: &Statement) -> StoreResult<PreparedStatement>;

    /// Execute a prepared statement with bound values
    async fn execute(&self, prepared: &PreparedStatement, params: &[Value]) -> StoreResult<RowSet>;
}
