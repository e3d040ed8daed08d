//! Wide-column store client seam
//!
//! The retrieval engine never talks to a concrete database driver. It builds
//! structured [`Statement`]s, prepares them through an injected
//! [`StoreSession`] and binds values per partition. [`MemoryStore`] is the
//! in-process session used by tests and the dev server; a production
//! deployment plugs a driver-backed session into the same trait.

pub mod error;
pub mod memory;
pub mod row;
pub mod session;
pub mod statement;
pub mod value;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use row::{Row, RowSet};
pub use session::{PreparedStatement, StoreSession};
pub use statement::{Projection, SortOrder, Statement};
pub use value::Value;
