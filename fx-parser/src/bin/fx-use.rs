use std::io;

use fparser::{ModuleImports, Repr, SymbolTable, SymbolTables, UseStmt, logging};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{info, warn};

const DEFAULT_LOG_DIRECTIVE: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Canonical,
    Repr,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliConfig {
    statements: Vec<String>,
    output: OutputFormat,
    scope: Option<String>,
    repl: bool,
    help: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            statements: Vec::new(),
            output: OutputFormat::Canonical,
            scope: None,
            repl: false,
            help: false,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(DEFAULT_LOG_DIRECTIVE)?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_cli_args(&args).map_err(io::Error::other)?;
    if cli.help {
        print_usage();
        return Ok(());
    }

    let mut tables = SymbolTables::new();
    if let Some(scope) = &cli.scope {
        tables.enter_scope(scope.as_str());
    }
    if cli.repl {
        return run_repl(&mut tables, cli.output);
    }

    let mut failed = 0usize;
    for statement in &cli.statements {
        match UseStmt::match_in(statement, &mut tables) {
            Ok(stmt) => {
                info!("{}", match_summary(&stmt));
                println!("{}", format_stmt(&stmt, cli.output)?);
            }
            Err(err) => {
                warn!("{} {err}", logging::category_mismatch());
                println!("{err}");
                failed += 1;
            }
        }
    }
    if let Some(table) = tables.current_scope() {
        print_imports(table, cli.output)?;
    }
    if failed > 0 {
        return Err(Box::new(io::Error::other(format!(
            "{failed} statement(s) did not match"
        ))));
    }
    Ok(())
}

fn parse_cli_args(args: &[String]) -> Result<CliConfig, String> {
    let mut cfg = CliConfig::default();
    let mut output = None;
    let mut index = 0usize;

    while index < args.len() {
        match args[index].as_str() {
            "-h" | "--help" => {
                cfg.help = true;
                index += 1;
            }
            "--repl" => {
                cfg.repl = true;
                index += 1;
            }
            "--json" | "--repr" => {
                let format = if args[index] == "--json" {
                    OutputFormat::Json
                } else {
                    OutputFormat::Repr
                };
                if output.is_some_and(|existing| existing != format) {
                    return Err("--json and --repr are mutually exclusive".to_string());
                }
                output = Some(format);
                index += 1;
            }
            "--scope" => {
                let name = args
                    .get(index + 1)
                    .ok_or_else(|| "missing value for --scope".to_string())?
                    .clone();
                cfg.scope = Some(name);
                index += 2;
            }
            "--" => {
                cfg.statements.extend(args[index + 1..].iter().cloned());
                index = args.len();
            }
            value if value.starts_with("--") => {
                return Err(format!("unknown option '{value}'"));
            }
            value => {
                cfg.statements.push(value.to_string());
                index += 1;
            }
        }
    }

    cfg.output = output.unwrap_or(OutputFormat::Canonical);
    if cfg.statements.is_empty() {
        cfg.repl = true;
    } else if cfg.repl {
        return Err("statements cannot be combined with --repl".to_string());
    }
    Ok(cfg)
}

fn print_usage() {
    println!("fx-use: match Fortran USE statements");
    println!();
    println!("usage:");
    println!("  fx-use [--json|--repr] [--scope <name>] <statement>...");
    println!("  fx-use [--json|--repr] [--scope <name>] --repl");
    println!();
    println!("set RUST_LOG=debug to see why a statement did not match");
}

fn format_stmt(stmt: &UseStmt, output: OutputFormat) -> Result<String, serde_json::Error> {
    Ok(match output {
        OutputFormat::Canonical => logging::clause_label(stmt.clause_tag(), &stmt.to_string()),
        OutputFormat::Repr => stmt.repr(),
        OutputFormat::Json => serde_json::to_string(stmt)?,
    })
}

fn match_summary(stmt: &UseStmt) -> String {
    let imported = match stmt.imported_names() {
        Some(names) => format!("{} name(s)", names.len()),
        None => "all public names".to_string(),
    };
    format!(
        "{} {} imports {imported}",
        logging::category_match(),
        stmt.module_name()
    )
}

fn format_imports(imports: &ModuleImports) -> String {
    match imports {
        ModuleImports::Wildcard => "*".to_string(),
        ModuleImports::Only(names) => format!("[{}]", names.join(", ")),
    }
}

fn print_imports(table: &SymbolTable, output: OutputFormat) -> Result<(), serde_json::Error> {
    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string(table)?);
        return Ok(());
    }
    println!("scope '{}':", table.name());
    if table.is_empty() {
        println!("  <no restricted imports>");
    }
    for (module, imports) in table.modules() {
        println!("  {module} -> {}", format_imports(imports));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplAction {
    Continue,
    Break,
}

fn run_repl(
    tables: &mut SymbolTables,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("fx-use REPL (Fortran USE statements)");
    println!("history: up/down arrows, commands: .help, .quit");
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("fx-use> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                if let Some(action) = handle_repl_command(line, tables, output) {
                    if action == ReplAction::Break {
                        break;
                    }
                    continue;
                }
                match UseStmt::match_in(line, tables) {
                    Ok(stmt) => {
                        info!("{}", match_summary(&stmt));
                        println!("=> {}", format_stmt(&stmt, output)?);
                    }
                    Err(err) => println!("{err}"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("bye");
                break;
            }
            Err(err) => {
                return Err(Box::new(io::Error::other(err.to_string())));
            }
        }
    }
    Ok(())
}

fn handle_repl_command(
    line: &str,
    tables: &mut SymbolTables,
    output: OutputFormat,
) -> Option<ReplAction> {
    let command = line.strip_prefix('.')?;
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match name {
        "quit" | "q" => Some(ReplAction::Break),
        "help" => {
            println!("commands:");
            println!("  .scope <name>  enter a new scope");
            println!("  .exit          leave the current scope");
            println!("  .imports       show the current scope's restricted imports");
            println!("  .quit          leave the REPL");
            Some(ReplAction::Continue)
        }
        "scope" => {
            if arg.is_empty() {
                println!("usage: .scope <name>");
            } else {
                tables.enter_scope(arg);
                info!("{} entered '{arg}'", logging::category_scope());
            }
            Some(ReplAction::Continue)
        }
        "exit" => {
            match tables.exit_scope() {
                Ok(table) => info!("{} left '{}'", logging::category_scope(), table.name()),
                Err(err) => println!("{err}"),
            }
            Some(ReplAction::Continue)
        }
        "imports" => {
            match tables.current_scope() {
                Some(table) => {
                    if let Err(err) = print_imports(table, output) {
                        println!("{err}");
                    }
                }
                None => println!("no scope is open"),
            }
            Some(ReplAction::Continue)
        }
        other => {
            println!("unknown command '.{other}', try .help");
            Some(ReplAction::Continue)
        }
    }
}
