use crate::patterns;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Name(String),
    DefinedOp(String),
    Comma,
    Colon,
    DoubleColon,
    FatArrow,
    LParen,
    RParen,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LexError {
    pub(crate) offset: usize,
    pub(crate) message: String,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "offset {}: {}", self.offset, self.message)
    }
}

pub(crate) struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// Tokenizes the whole statement; the last token is always `Eof`.
    pub(crate) fn tokenize(source: &'a str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Self::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let offset = self.pos;
        let rest = &self.source[self.pos..];
        let Some(ch) = rest.chars().next() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                offset,
            });
        };

        let kind = match ch {
            ',' => {
                self.pos += 1;
                TokenKind::Comma
            }
            ':' => {
                if rest.starts_with("::") {
                    self.pos += 2;
                    TokenKind::DoubleColon
                } else {
                    self.pos += 1;
                    TokenKind::Colon
                }
            }
            '=' => {
                if !rest.starts_with("=>") {
                    return Err(LexError {
                        offset,
                        message: "unexpected character '=', did you mean '=>'?".to_string(),
                    });
                }
                self.pos += 2;
                TokenKind::FatArrow
            }
            '(' => {
                self.pos += 1;
                TokenKind::LParen
            }
            ')' => {
                self.pos += 1;
                TokenKind::RParen
            }
            '.' => {
                let Some(op) = patterns::leading_defined_op(rest) else {
                    return Err(LexError {
                        offset,
                        message: "malformed defined operator".to_string(),
                    });
                };
                self.pos += op.len();
                TokenKind::DefinedOp(op.to_string())
            }
            c if c.is_ascii_alphabetic() => {
                let Some(name) = patterns::leading_name(rest) else {
                    return Err(LexError {
                        offset,
                        message: format!("unexpected character '{c}'"),
                    });
                };
                self.pos += name.len();
                TokenKind::Name(name.to_string())
            }
            other => {
                return Err(LexError {
                    offset,
                    message: format!("unexpected character '{other}'"),
                });
            }
        };

        Ok(Token { kind, offset })
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.source[self.pos..];
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }
}
