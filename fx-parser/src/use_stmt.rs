pub mod items;

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::NoMatchError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::nodes::{
    DefinedOp, ModuleNature, Name, OnlyItem, OnlyList, Rename, RenameList, Repr, repr_str,
};
use crate::rule::StmtRule;
use crate::symbol_table::{ModuleImports, SymbolTables};

use self::items::{Item, UseStmtItems};

pub const USE_STMT_RULE: &str = "Use_Stmt";

const DOUBLE_COLON: &str = "::";

static EOF: TokenKind = TokenKind::Eof;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseTag {
    None,
    Rename,
    OnlyEmpty,
    OnlyList,
}

impl ClauseTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ClauseTag::None => "",
            ClauseTag::Rename => ",",
            ClauseTag::OnlyEmpty | ClauseTag::OnlyList => ", ONLY:",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum UseClause {
    None,
    Rename(RenameList),
    OnlyEmpty,
    Only(OnlyList),
}

impl UseClause {
    pub fn tag(&self) -> ClauseTag {
        match self {
            UseClause::None => ClauseTag::None,
            UseClause::Rename(_) => ClauseTag::Rename,
            UseClause::OnlyEmpty => ClauseTag::OnlyEmpty,
            UseClause::Only(_) => ClauseTag::OnlyList,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UseStmt {
    nature: Option<ModuleNature>,
    double_colon: bool,
    module_name: Name,
    clause: UseClause,
}

impl UseStmt {
    pub fn match_str(text: &str) -> Result<Self, NoMatchError> {
        let tokens = Lexer::tokenize(text).map_err(|err| {
            debug!(rule = USE_STMT_RULE, input = text, reason = %err, "no match");
            NoMatchError::new(USE_STMT_RULE, text)
        })?;
        let stmt = Matcher::new(tokens).parse_stmt().map_err(|mismatch| {
            debug!(
                rule = USE_STMT_RULE,
                input = text,
                offset = mismatch.offset,
                reason = mismatch.reason,
                "no match"
            );
            NoMatchError::new(USE_STMT_RULE, text)
        })?;
        debug!(rule = USE_STMT_RULE, input = text, canonical = %stmt, "matched");
        Ok(stmt)
    }

    pub fn match_in(text: &str, tables: &mut SymbolTables) -> Result<Self, NoMatchError> {
        let stmt = Self::match_str(text)?;
        stmt.record_imports(tables);
        Ok(stmt)
    }

    pub(crate) fn from_parts(
        nature: Option<ModuleNature>,
        double_colon: bool,
        module_name: Name,
        clause: UseClause,
    ) -> Self {
        Self {
            nature,
            double_colon,
            module_name,
            clause,
        }
    }

    fn record_imports(&self, tables: &mut SymbolTables) {
        let Some(names) = self.imported_names() else {
            return;
        };
        let Some(scope) = tables.current_scope_mut() else {
            return;
        };
        scope.add_use_symbols(self.module_name.as_str(), ModuleImports::Only(names));
    }

    pub fn nature(&self) -> Option<ModuleNature> {
        self.nature
    }

    pub fn binder(&self) -> Option<&'static str> {
        self.double_colon.then_some(DOUBLE_COLON)
    }

    pub fn module_name(&self) -> &Name {
        &self.module_name
    }

    pub fn clause(&self) -> &UseClause {
        &self.clause
    }

    pub fn clause_tag(&self) -> ClauseTag {
        self.clause.tag()
    }

    /// Names an `ONLY` clause brings into scope; `None` for plain and renaming uses.
    pub fn imported_names(&self) -> Option<Vec<String>> {
        match &self.clause {
            UseClause::Only(list) => Some(list.local_names()),
            UseClause::OnlyEmpty => Some(Vec::new()),
            UseClause::None | UseClause::Rename(_) => None,
        }
    }

    pub fn items(&self) -> UseStmtItems {
        let nature = self.nature.map_or(Item::None, Item::Nature);
        let binder = self
            .binder()
            .map_or(Item::None, |binder| Item::Str(binder.to_string()));
        let payload = match &self.clause {
            UseClause::None | UseClause::OnlyEmpty => Item::None,
            UseClause::Rename(list) => Item::Renames(list.clone()),
            UseClause::Only(list) => Item::Only(list.clone()),
        };
        UseStmtItems {
            items: vec![
                nature,
                binder,
                Item::Name(self.module_name.clone()),
                Item::Str(self.clause_tag().as_str().to_string()),
                payload,
            ],
        }
    }
}

impl fmt::Display for UseStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("USE")?;
        if let Some(nature) = self.nature {
            write!(f, ", {nature} {DOUBLE_COLON}")?;
        } else if self.double_colon {
            write!(f, " {DOUBLE_COLON}")?;
        }
        write!(f, " {}", self.module_name)?;
        match &self.clause {
            UseClause::None => Ok(()),
            UseClause::Rename(list) => write!(f, "{} {list}", ClauseTag::Rename.as_str()),
            UseClause::OnlyEmpty => f.write_str(ClauseTag::OnlyEmpty.as_str()),
            UseClause::Only(list) => write!(f, "{} {list}", ClauseTag::OnlyList.as_str()),
        }
    }
}

impl Repr for UseStmt {
    fn repr(&self) -> String {
        let nature = self
            .nature
            .map_or_else(|| "None".to_string(), |nature| nature.repr());
        let binder = self
            .binder()
            .map_or_else(|| "None".to_string(), repr_str);
        let payload = match &self.clause {
            UseClause::None | UseClause::OnlyEmpty => "None".to_string(),
            UseClause::Rename(list) => list.repr(),
            UseClause::Only(list) => list.repr(),
        };
        format!(
            "Use_Stmt({nature}, {binder}, {}, {}, {payload})",
            self.module_name.repr(),
            repr_str(self.clause_tag().as_str())
        )
    }
}

impl StmtRule for UseStmt {
    const NAME: &'static str = USE_STMT_RULE;

    fn match_str(text: &str) -> Result<Self, NoMatchError> {
        UseStmt::match_str(text)
    }

    fn match_in(text: &str, tables: &mut SymbolTables) -> Result<Self, NoMatchError> {
        UseStmt::match_in(text, tables)
    }
}

struct Mismatch {
    offset: usize,
    reason: &'static str,
}

struct Matcher {
    tokens: Vec<Token>,
    pos: usize,
}

impl Matcher {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse_stmt(&mut self) -> Result<UseStmt, Mismatch> {
        if !self.match_keyword("use") {
            return Err(self.mismatch("expected 'use'"));
        }

        let mut nature = None;
        let mut double_colon = false;
        if self.match_kind(&TokenKind::Comma) {
            nature = Some(self.expect_nature()?);
            self.expect(&TokenKind::DoubleColon, "expected '::' after module nature")?;
            double_colon = true;
        } else if self.match_kind(&TokenKind::DoubleColon) {
            double_colon = true;
        }

        let module_name = self.expect_name("expected module name")?;
        let clause = if self.match_kind(&TokenKind::Comma) {
            self.parse_tail()?
        } else {
            UseClause::None
        };

        if !self.check(&TokenKind::Eof) {
            return Err(self.mismatch("unexpected trailing input"));
        }
        Ok(UseStmt::from_parts(
            nature,
            double_colon,
            module_name,
            clause,
        ))
    }

    fn parse_tail(&mut self) -> Result<UseClause, Mismatch> {
        // `only => x` renames an entity called `only`.
        if self.check_keyword("only") && !matches!(self.peek_kind(1), TokenKind::FatArrow) {
            self.advance();
            self.expect(&TokenKind::Colon, "expected ':' after 'only'")?;
            if self.check(&TokenKind::Eof) {
                return Ok(UseClause::OnlyEmpty);
            }
            let mut items = vec![self.parse_only_item()?];
            while self.match_kind(&TokenKind::Comma) {
                items.push(self.parse_only_item()?);
            }
            return Ok(UseClause::Only(OnlyList::new(items)));
        }

        let mut renames = vec![self.parse_rename()?];
        while self.match_kind(&TokenKind::Comma) {
            renames.push(self.parse_rename()?);
        }
        Ok(UseClause::Rename(RenameList::new(renames)))
    }

    fn parse_rename(&mut self) -> Result<Rename, Mismatch> {
        if self.check_keyword("operator") && matches!(self.peek_kind(1), TokenKind::LParen) {
            let local = self.parse_operator_spec()?;
            self.expect(&TokenKind::FatArrow, "expected '=>' after local operator")?;
            if !self.check_keyword("operator") {
                return Err(self.mismatch("expected 'operator' after '=>'"));
            }
            let target = self.parse_operator_spec()?;
            return Ok(Rename::Operator { local, target });
        }

        let first = self.expect_name("expected name in rename list")?;
        if self.match_kind(&TokenKind::FatArrow) {
            let target = self.expect_name("expected use name after '=>'")?;
            return Ok(Rename::Name {
                local: Some(first),
                target,
            });
        }
        Ok(Rename::Name {
            local: None,
            target: first,
        })
    }

    fn parse_operator_spec(&mut self) -> Result<DefinedOp, Mismatch> {
        self.advance();
        self.expect(&TokenKind::LParen, "expected '(' after 'operator'")?;
        let TokenKind::DefinedOp(op) = self.peek_kind(0).clone() else {
            return Err(self.mismatch("expected defined operator"));
        };
        self.advance();
        self.expect(&TokenKind::RParen, "expected ')' after defined operator")?;
        Ok(DefinedOp::new(op))
    }

    fn parse_only_item(&mut self) -> Result<OnlyItem, Mismatch> {
        if self.check_keyword("operator") && matches!(self.peek_kind(1), TokenKind::LParen) {
            let local = self.parse_operator_spec()?;
            if !self.match_kind(&TokenKind::FatArrow) {
                return Ok(OnlyItem::Operator { op: local });
            }
            if !self.check_keyword("operator") {
                return Err(self.mismatch("expected 'operator' after '=>'"));
            }
            let target = self.parse_operator_spec()?;
            return Ok(OnlyItem::OperatorRename { local, target });
        }

        let name = self.expect_name("expected name in only list")?;
        if self.match_kind(&TokenKind::FatArrow) {
            let target = self.expect_name("expected use name after '=>'")?;
            return Ok(OnlyItem::Rename {
                local: name,
                target,
            });
        }
        Ok(OnlyItem::Name { name })
    }

    fn expect_nature(&mut self) -> Result<ModuleNature, Mismatch> {
        let nature = match self.peek_kind(0) {
            TokenKind::Name(keyword) => ModuleNature::from_keyword(keyword),
            _ => None,
        };
        let Some(nature) = nature else {
            return Err(self.mismatch("expected 'intrinsic' or 'non_intrinsic'"));
        };
        self.advance();
        Ok(nature)
    }

    fn expect_name(&mut self, reason: &'static str) -> Result<Name, Mismatch> {
        let TokenKind::Name(name) = self.peek_kind(0).clone() else {
            return Err(self.mismatch(reason));
        };
        self.advance();
        Ok(Name::new(name))
    }

    fn expect(&mut self, kind: &TokenKind, reason: &'static str) -> Result<(), Mismatch> {
        if self.match_kind(kind) {
            Ok(())
        } else {
            Err(self.mismatch(reason))
        }
    }

    fn match_kind(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind(0) == kind
    }

    fn check_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek_kind(0), TokenKind::Name(name) if name.eq_ignore_ascii_case(keyword))
    }

    fn peek_kind(&self, ahead: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + ahead)
            .or_else(|| self.tokens.last())
            .map_or(&EOF, |token| &token.kind)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn mismatch(&self, reason: &'static str) -> Mismatch {
        let offset = self
            .tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(0, |token| token.offset);
        Mismatch { offset, reason }
    }
}
