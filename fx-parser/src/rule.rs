use crate::error::NoMatchError;
use crate::symbol_table::SymbolTables;

pub trait StmtRule: Sized {
    const NAME: &'static str;

    fn match_str(text: &str) -> Result<Self, NoMatchError>;

    /// Like `match_str`, plus whatever the rule records in the current scope.
    fn match_in(text: &str, tables: &mut SymbolTables) -> Result<Self, NoMatchError>;
}
