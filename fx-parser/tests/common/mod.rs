#![allow(dead_code, unused_imports)]

pub use fparser::{
    ClauseTag, InternalError, Item, ModuleImports, ModuleNature, Name, NoMatchError, OnlyItem,
    Rename, Repr, ScopeError, StmtRule, SymbolTables, USE_STMT_RULE, UseClause, UseStmt,
    UseStmtItems,
};

pub fn matched(line: &str) -> UseStmt {
    UseStmt::match_str(line).unwrap_or_else(|err| panic!("'{line}' should match: {err}"))
}

pub fn assert_no_match(line: &str) {
    let err = UseStmt::match_str(line).expect_err("match should fail");
    assert_eq!(err.to_string(), format!("Use_Stmt: '{line}'"));
    assert_eq!(err.rule(), USE_STMT_RULE);
    assert_eq!(err.input(), line);
}

pub fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
