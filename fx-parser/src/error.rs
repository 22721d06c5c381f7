/// Grammar mismatch raised by a statement rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoMatchError {
    rule: &'static str,
    input: String,
}

impl NoMatchError {
    pub fn new(rule: &'static str, input: impl Into<String>) -> Self {
        Self {
            rule,
            input: input.into(),
        }
    }

    pub fn rule(&self) -> &'static str {
        self.rule
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl std::fmt::Display for NoMatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: '{}'", self.rule, self.input)
    }
}

impl std::error::Error for NoMatchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalError {
    pub message: String,
}

impl InternalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for InternalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "internal error: {}", self.message)
    }
}

impl std::error::Error for InternalError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    NoScope,
}

impl std::fmt::Display for ScopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeError::NoScope => {
                write!(f, "exit_scope() called but no current scope exists")
            }
        }
    }
}

impl std::error::Error for ScopeError {}
