pub mod error;
mod lexer;
#[cfg(feature = "cli")]
pub mod logging;
pub mod nodes;
mod patterns;
pub mod rule;
pub mod symbol_table;
pub mod use_stmt;

pub use error::{InternalError, NoMatchError, ScopeError};
pub use nodes::{DefinedOp, ModuleNature, Name, OnlyItem, OnlyList, Rename, RenameList, Repr};
pub use rule::StmtRule;
pub use symbol_table::{ModuleImports, ScopeGuard, SymbolTable, SymbolTables};
pub use use_stmt::items::{Item, UseStmtItems};
pub use use_stmt::{ClauseTag, USE_STMT_RULE, UseClause, UseStmt};
