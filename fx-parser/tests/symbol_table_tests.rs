mod common;
use common::*;

#[test]
fn only_clause_without_scope_has_no_side_effect() {
    let mut tables = SymbolTables::new();
    let stmt = UseStmt::match_in("use my_model, only: name", &mut tables)
        .expect("match should succeed");
    assert_eq!(stmt.to_string(), "USE my_model, ONLY: name");
    assert!(tables.current_scope().is_none());
    assert_eq!(tables.depth(), 0);
}

#[test]
fn only_clause_records_names_in_current_scope() {
    let mut tables = SymbolTables::new();
    tables.enter_scope("test_scope");
    let stmt = UseStmt::match_in("use my_model, only: name", &mut tables)
        .expect("match should succeed");
    assert_eq!(stmt.to_string(), "USE my_model, ONLY: name");

    let table = tables.current_scope().expect("scope is open");
    assert_eq!(table.name(), "test_scope");
    assert_eq!(
        table.module("my_model"),
        Some(&ModuleImports::Only(names(&["name"])))
    );
    tables.exit_scope().expect("scope should exit");
}

#[test]
fn empty_only_clause_records_an_empty_list() {
    let mut tables = SymbolTables::new();
    tables.enter_scope("unit");
    UseStmt::match_in("use my_model, only:", &mut tables).expect("match should succeed");
    let imports = tables
        .current_scope()
        .and_then(|table| table.module("my_model"))
        .expect("module should be recorded");
    assert!(!imports.is_wildcard());
    assert_eq!(imports.names(), Some(&[][..]));
}

#[test]
fn only_list_keeps_source_order_and_local_names() {
    let mut tables = SymbolTables::new();
    tables.enter_scope("unit");
    UseStmt::match_in("use Mesh, only: zeta, alpha => beta, Mid", &mut tables)
        .expect("match should succeed");
    let table = tables.current_scope().expect("scope is open");
    assert_eq!(
        table.module("Mesh"),
        Some(&ModuleImports::Only(names(&["zeta", "alpha", "Mid"])))
    );
    assert!(table.module("mesh").is_none());
}

#[test]
fn plain_and_renaming_uses_leave_the_table_alone() {
    let mut tables = SymbolTables::new();
    tables.enter_scope("unit");
    for line in [
        "use my_model",
        "use :: my_model",
        "use, intrinsic :: iso_c_binding",
        "use my_module, name=>new_name",
    ] {
        UseStmt::match_in(line, &mut tables).expect("match should succeed");
    }
    assert!(tables.current_scope().expect("scope is open").is_empty());
}

#[test]
fn mismatches_leave_the_table_alone() {
    let mut tables = SymbolTables::new();
    tables.enter_scope("unit");
    let err = UseStmt::match_in("use my_model, only: a,", &mut tables)
        .expect_err("match should fail");
    assert_eq!(err.to_string(), "Use_Stmt: 'use my_model, only: a,'");
    assert!(tables.current_scope().expect("scope is open").is_empty());
}

#[test]
fn repeated_use_of_a_module_overwrites_its_entry() {
    let mut tables = SymbolTables::new();
    tables.enter_scope("unit");
    UseStmt::match_in("use m, only: a, b", &mut tables).expect("match should succeed");
    UseStmt::match_in("use m, only: c", &mut tables).expect("match should succeed");
    assert_eq!(
        tables.current_scope().and_then(|table| table.module("m")),
        Some(&ModuleImports::Only(names(&["c"])))
    );
}

#[test]
fn imports_land_in_the_innermost_scope_only() {
    let mut tables = SymbolTables::new();
    tables.enter_scope("program");
    UseStmt::match_in("use outer_mod, only: x", &mut tables).expect("match should succeed");
    {
        let mut inner = tables.scoped("contained");
        UseStmt::match_in("use inner_mod, only: y", &mut inner).expect("match should succeed");
        let table = inner.current_scope().expect("scope is open");
        assert!(table.module("outer_mod").is_none());
        assert_eq!(
            table.module("inner_mod"),
            Some(&ModuleImports::Only(names(&["y"])))
        );
    }

    let table = tables.current_scope().expect("scope is open");
    assert_eq!(table.name(), "program");
    assert!(table.module("inner_mod").is_none());
    assert_eq!(
        table.modules().map(|(module, _)| module).collect::<Vec<_>>(),
        vec!["outer_mod"]
    );
}

#[test]
fn rule_seam_applies_side_effects() {
    fn run<R: StmtRule>(line: &str, tables: &mut SymbolTables) -> Result<R, NoMatchError> {
        R::match_in(line, tables)
    }

    let mut tables = SymbolTables::new();
    tables.enter_scope("unit");
    run::<UseStmt>("use m, only: a, b => c", &mut tables).expect("match should succeed");
    run::<UseStmt>("use n", &mut tables).expect("match should succeed");
    let table = tables.current_scope().expect("scope is open");
    assert_eq!(
        table.module("m"),
        Some(&ModuleImports::Only(names(&["a", "b"])))
    );
    assert_eq!(table.module("n"), None);
}

#[test]
fn exit_scope_on_empty_stack_reports_misuse() {
    let mut tables = SymbolTables::new();
    let err = tables.exit_scope().expect_err("exit should fail");
    assert_eq!(err, ScopeError::NoScope);
    assert!(err.to_string().contains("no current scope"));
}

#[test]
fn scope_table_serializes_to_json() {
    let mut tables = SymbolTables::new();
    tables.enter_scope("unit");
    UseStmt::match_in("use m, only: a", &mut tables).expect("match should succeed");
    UseStmt::match_in("use n, only:", &mut tables).expect("match should succeed");
    let value = serde_json::to_value(tables.current_scope().expect("scope is open"))
        .expect("serialize should succeed");
    assert_eq!(
        value,
        serde_json::json!({
            "name": "unit",
            "modules": {
                "m": { "kind": "only", "names": ["a"] },
                "n": { "kind": "only", "names": [] }
            }
        })
    );
}
