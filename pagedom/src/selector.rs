//! A small subset of CSS selectors.
//!
//! Supported: type (`input`), universal (`*`), id (`#yearChart`), class
//! (`.export-btn`), attribute presence (`[data-sort]`) and attribute equality
//! (`[name="search"]`), compounded freely, and selector lists separated by
//! commas (`input, select, textarea`). Combinators are not supported.

use std::fmt;
use std::str::FromStr;

use crate::element::Element;

/// Errors produced while parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected {ch:?} at position {pos}")]
    Unexpected { ch: char, pos: usize },
    #[error("combinators are not supported (position {0})")]
    Combinator(usize),
    #[error("unterminated attribute selector")]
    UnterminatedAttribute,
    #[error("unterminated string")]
    UnterminatedString,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Compound {
    fn matches(&self, el: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(&el.tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if id != &el.id {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|a| match (&a.value, el.get_attr(&a.name)) {
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
            (_, None) => false,
        })
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    groups: Vec<Compound>,
    source: String,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        Parser::new(source).parse()
    }

    /// Whether the element matches any selector in the list.
    pub fn matches(&self, el: &Element) -> bool {
        self.groups.iter().any(|g| g.matches(el))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn parse(mut self) -> Result<Selector, SelectorError> {
        let mut groups = Vec::new();

        loop {
            self.skip_whitespace();
            let compound = self.compound()?;
            groups.push(compound);
            self.skip_whitespace();

            match self.peek() {
                None => break,
                Some(',') => self.pos += 1,
                Some(_) => return Err(SelectorError::Combinator(self.pos)),
            }
        }

        Ok(Selector {
            groups,
            source: self.source.trim().to_string(),
        })
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let start = self.pos;
        let mut compound = Compound::default();

        if self.peek() == Some('*') {
            self.pos += 1;
        } else if self.peek().is_some_and(is_ident_char) {
            compound.tag = Some(self.ident()?.to_ascii_lowercase());
        }

        while let Some(ch) = self.peek() {
            match ch {
                '#' => {
                    self.pos += 1;
                    compound.id = Some(self.ident()?);
                }
                '.' => {
                    self.pos += 1;
                    compound.classes.push(self.ident()?);
                }
                '[' => {
                    self.pos += 1;
                    compound.attrs.push(self.attribute()?);
                }
                ',' => break,
                c if c.is_whitespace() => break,
                c => return Err(SelectorError::Unexpected { ch: c, pos: self.pos }),
            }
        }

        if self.pos == start {
            return match self.peek() {
                None | Some(',') => Err(SelectorError::Empty),
                Some(ch) => Err(SelectorError::Unexpected { ch, pos: self.pos }),
            };
        }

        Ok(compound)
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(ch) => SelectorError::Unexpected { ch, pos: self.pos },
                None => SelectorError::Empty,
            });
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn attribute(&mut self) -> Result<AttrMatch, SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?;
        self.skip_whitespace();

        let value = match self.peek() {
            Some(']') => None,
            Some('=') => {
                self.pos += 1;
                self.skip_whitespace();
                let value = match self.peek() {
                    Some(quote @ ('"' | '\'')) => self.quoted(quote)?,
                    Some(_) => self.ident()?,
                    None => return Err(SelectorError::UnterminatedAttribute),
                };
                self.skip_whitespace();
                Some(value)
            }
            Some(ch) => return Err(SelectorError::Unexpected { ch, pos: self.pos }),
            None => return Err(SelectorError::UnterminatedAttribute),
        };

        match self.peek() {
            Some(']') => {
                self.pos += 1;
                Ok(AttrMatch { name, value })
            }
            Some(ch) => Err(SelectorError::Unexpected { ch, pos: self.pos }),
            None => Err(SelectorError::UnterminatedAttribute),
        }
    }

    fn quoted(&mut self, quote: char) -> Result<String, SelectorError> {
        self.pos += 1;
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch == quote {
                let value = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return Ok(value);
            }
            self.pos += 1;
        }
        Err(SelectorError::UnterminatedString)
    }
}
