use std::fmt;

use crate::error::InternalError;
use crate::nodes::{ModuleNature, Name, OnlyList, RenameList, Repr, repr_str};

use super::{DOUBLE_COLON, UseClause, UseStmt};

const ITEM_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    None,
    Str(String),
    Nature(ModuleNature),
    Name(Name),
    Renames(RenameList),
    Only(OnlyList),
}

impl Item {
    fn is_blank(&self) -> bool {
        match self {
            Item::None => true,
            Item::Str(value) => value.is_empty(),
            Item::Name(name) => name.is_empty(),
            Item::Renames(list) => list.is_empty(),
            Item::Only(list) => list.is_empty(),
            Item::Nature(_) => false,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::None => f.write_str("None"),
            Item::Str(value) => f.write_str(value),
            Item::Nature(nature) => write!(f, "{nature}"),
            Item::Name(name) => write!(f, "{name}"),
            Item::Renames(list) => write!(f, "{list}"),
            Item::Only(list) => write!(f, "{list}"),
        }
    }
}

impl Repr for Item {
    fn repr(&self) -> String {
        match self {
            Item::None => "None".to_string(),
            Item::Str(value) => repr_str(value),
            Item::Nature(nature) => nature.repr(),
            Item::Name(name) => name.repr(),
            Item::Renames(list) => list.repr(),
            Item::Only(list) => list.repr(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseStmtItems {
    pub items: Vec<Item>,
}

impl UseStmtItems {
    pub fn render(&self) -> Result<String, InternalError> {
        self.check_len()?;
        let module_name = self.module_name()?;
        let Item::Str(tag) = &self.items[3] else {
            return Err(InternalError::new(format!(
                "Use_Stmt.tostr(). 'Items' entry 3 should be a string but found '{}'.",
                self.items[3]
            )));
        };

        let mut out = String::from("USE");
        if !self.items[0].is_blank() {
            out.push_str(&format!(", {} {DOUBLE_COLON}", self.items[0]));
        } else if !self.items[1].is_blank() {
            out.push_str(&format!(" {DOUBLE_COLON}"));
        }
        out.push_str(&format!(" {module_name}{tag}"));
        if !self.items[4].is_blank() {
            out.push_str(&format!(" {}", self.items[4]));
        }
        Ok(out)
    }

    pub fn repr(&self) -> String {
        let parts = self.items.iter().map(|item| item.repr()).collect::<Vec<_>>();
        format!("Use_Stmt({})", parts.join(", "))
    }

    /// Rebuild a typed node, rejecting any combination a match could not produce.
    pub fn try_into_stmt(self) -> Result<UseStmt, InternalError> {
        self.check_len()?;
        let module_name = Name::new(self.module_name()?);

        let nature = match &self.items[0] {
            Item::None => None,
            Item::Nature(nature) => Some(*nature),
            other => {
                return Err(InternalError::new(format!(
                    "Use_Stmt items: entry 0 should be a module nature but found '{other}'"
                )));
            }
        };
        let double_colon = match &self.items[1] {
            Item::None => false,
            Item::Str(value) if value == DOUBLE_COLON => true,
            other => {
                return Err(InternalError::new(format!(
                    "Use_Stmt items: entry 1 should be '::' but found '{other}'"
                )));
            }
        };
        if nature.is_some() && !double_colon {
            return Err(InternalError::new(
                "Use_Stmt items: a module nature requires '::'",
            ));
        }

        let Item::Str(tag) = &self.items[3] else {
            return Err(InternalError::new(format!(
                "Use_Stmt items: entry 3 should be a string but found '{}'",
                self.items[3]
            )));
        };
        let clause = match (tag.as_str(), &self.items[4]) {
            ("", Item::None) => UseClause::None,
            (",", Item::Renames(list)) if !list.is_empty() => UseClause::Rename(list.clone()),
            (", ONLY:", Item::None) => UseClause::OnlyEmpty,
            (", ONLY:", Item::Only(list)) if !list.is_empty() => UseClause::Only(list.clone()),
            (tag, payload) => {
                return Err(InternalError::new(format!(
                    "Use_Stmt items: clause '{tag}' does not accept payload {}",
                    payload.repr()
                )));
            }
        };

        Ok(UseStmt::from_parts(
            nature,
            double_colon,
            module_name,
            clause,
        ))
    }

    fn check_len(&self) -> Result<(), InternalError> {
        if self.items.len() != ITEM_COUNT {
            return Err(InternalError::new(format!(
                "Use_Stmt.tostr(). 'Items' should be of size {ITEM_COUNT} but found '{}'.",
                self.items.len()
            )));
        }
        Ok(())
    }

    fn module_name(&self) -> Result<String, InternalError> {
        match &self.items[2] {
            Item::Name(name) if !name.is_empty() => Ok(name.as_str().to_string()),
            Item::Str(value) if !value.is_empty() => Ok(value.clone()),
            _ => Err(InternalError::new(
                "Use_Stmt.tostr(). 'Items' entry 2 should be a module name but it is empty",
            )),
        }
    }
}
