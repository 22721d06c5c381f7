use std::fmt;

use serde::Serialize;

pub trait Repr {
    fn repr(&self) -> String;
}

pub(crate) fn repr_str(value: &str) -> String {
    format!("'{value}'")
}

/// Renders a sequence as a tuple, keeping the trailing comma of one-element tuples.
pub(crate) fn repr_tuple<'a, T: Repr + 'a>(items: impl IntoIterator<Item = &'a T>) -> String {
    let parts = items.into_iter().map(|item| item.repr()).collect::<Vec<_>>();
    match parts.as_slice() {
        [single] => format!("({single},)"),
        _ => format!("({})", parts.join(", ")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Repr for Name {
    fn repr(&self) -> String {
        format!("Name({})", repr_str(&self.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleNature {
    Intrinsic,
    NonIntrinsic,
}

impl ModuleNature {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("intrinsic") {
            Some(Self::Intrinsic)
        } else if keyword.eq_ignore_ascii_case("non_intrinsic") {
            Some(Self::NonIntrinsic)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intrinsic => "INTRINSIC",
            Self::NonIntrinsic => "NON_INTRINSIC",
        }
    }
}

impl fmt::Display for ModuleNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Repr for ModuleNature {
    fn repr(&self) -> String {
        format!("Module_Nature({})", repr_str(self.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DefinedOp(String);

impl DefinedOp {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DefinedOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Repr for DefinedOp {
    fn repr(&self) -> String {
        format!("Defined_Op({})", repr_str(&self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rename {
    /// `local => target`, or just `target` when imported under its own name.
    Name { local: Option<Name>, target: Name },
    Operator { local: DefinedOp, target: DefinedOp },
}

impl fmt::Display for Rename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rename::Name {
                local: Some(local),
                target,
            } => write!(f, "{local} => {target}"),
            Rename::Name {
                local: None,
                target,
            } => write!(f, "{target}"),
            Rename::Operator { local, target } => {
                write!(f, "OPERATOR({local}) => OPERATOR({target})")
            }
        }
    }
}

impl Repr for Rename {
    fn repr(&self) -> String {
        match self {
            Rename::Name { local, target } => format!(
                "Rename(None, {}, {})",
                local
                    .as_ref()
                    .map(|name| name.repr())
                    .unwrap_or_else(|| "None".to_string()),
                target.repr()
            ),
            Rename::Operator { local, target } => format!(
                "Rename({}, {}, {})",
                repr_str("OPERATOR"),
                local.repr(),
                target.repr()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenameList(Vec<Rename>);

impl RenameList {
    pub fn new(renames: Vec<Rename>) -> Self {
        Self(renames)
    }

    pub fn renames(&self) -> &[Rename] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RenameList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.0)
    }
}

impl Repr for RenameList {
    fn repr(&self) -> String {
        format!("Rename_List({}, {})", repr_str(","), repr_tuple(&self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OnlyItem {
    Name { name: Name },
    Rename { local: Name, target: Name },
    Operator { op: DefinedOp },
    OperatorRename { local: DefinedOp, target: DefinedOp },
}

impl OnlyItem {
    /// Operators are recorded by their canonical `OPERATOR(.op.)` spelling.
    pub fn local_name(&self) -> String {
        match self {
            OnlyItem::Name { name } => name.as_str().to_string(),
            OnlyItem::Rename { local, .. } => local.as_str().to_string(),
            OnlyItem::Operator { op } => format!("OPERATOR({op})"),
            OnlyItem::OperatorRename { local, .. } => format!("OPERATOR({local})"),
        }
    }
}

impl fmt::Display for OnlyItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnlyItem::Name { name } => write!(f, "{name}"),
            OnlyItem::Rename { local, target } => write!(f, "{local} => {target}"),
            OnlyItem::Operator { op } => write!(f, "OPERATOR({op})"),
            OnlyItem::OperatorRename { local, target } => {
                write!(f, "OPERATOR({local}) => OPERATOR({target})")
            }
        }
    }
}

impl Repr for OnlyItem {
    fn repr(&self) -> String {
        match self {
            OnlyItem::Name { name } => name.repr(),
            OnlyItem::Rename { local, target } => {
                format!("Rename(None, {}, {})", local.repr(), target.repr())
            }
            OnlyItem::Operator { op } => {
                format!("Generic_Spec({}, {})", repr_str("OPERATOR"), op.repr())
            }
            OnlyItem::OperatorRename { local, target } => format!(
                "Rename({}, {}, {})",
                repr_str("OPERATOR"),
                local.repr(),
                target.repr()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OnlyList(Vec<OnlyItem>);

impl OnlyList {
    pub fn new(items: Vec<OnlyItem>) -> Self {
        Self(items)
    }

    pub fn items(&self) -> &[OnlyItem] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn local_names(&self) -> Vec<String> {
        self.0.iter().map(OnlyItem::local_name).collect()
    }
}

impl fmt::Display for OnlyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.0)
    }
}

impl Repr for OnlyList {
    fn repr(&self) -> String {
        format!("Only_List({}, {})", repr_str(","), repr_tuple(&self.0))
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
