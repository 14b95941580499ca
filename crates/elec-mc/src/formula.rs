use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display};
use std::str::FromStr;

use elec_core::errors::ErrorInfo;
use elec_core::ElecError;
use serde::{Deserialize, Serialize};

/// Boolean victory rule over named regions.
///
/// The textual form uses `&` for "and", `|` for "or" and parentheses for
/// grouping, with `&` binding tighter:
///
/// ```text
/// (Michigan & Pennsylvania & Wisconsin) | (Florida & (Michigan | Pennsylvania | Wisconsin))
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WinFormula {
    /// True when the named region is won.
    Region(String),
    /// True when every operand is true.
    All(Vec<WinFormula>),
    /// True when at least one operand is true.
    Any(Vec<WinFormula>),
}

impl WinFormula {
    /// Leaf formula for one region.
    pub fn region(name: impl Into<String>) -> Self {
        WinFormula::Region(name.into())
    }

    /// Parses the textual form.
    pub fn parse(input: &str) -> Result<Self, ElecError> {
        let tokens = tokenize(input)?;
        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            input,
        };
        let formula = parser.expr()?;
        if parser.pos != tokens.len() {
            return Err(parser.error("trailing-tokens", "unexpected input after formula"));
        }
        Ok(formula)
    }

    /// Evaluates the formula against per-region outcomes.
    pub fn evaluate(&self, outcomes: &BTreeMap<String, bool>) -> Result<bool, ElecError> {
        match self {
            WinFormula::Region(name) => outcomes.get(name).copied().ok_or_else(|| {
                ElecError::Formula(
                    ErrorInfo::new("unknown-region", "no outcome recorded for region")
                        .with_context("region", name.clone()),
                )
            }),
            WinFormula::All(terms) => {
                for term in terms {
                    if !term.evaluate(outcomes)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            WinFormula::Any(terms) => {
                for term in terms {
                    if term.evaluate(outcomes)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Every region name the formula refers to.
    pub fn required_regions(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_regions(&mut names);
        names
    }

    fn collect_regions<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            WinFormula::Region(name) => {
                names.insert(name.as_str());
            }
            WinFormula::All(terms) | WinFormula::Any(terms) => {
                for term in terms {
                    term.collect_regions(names);
                }
            }
        }
    }
}

impl Display for WinFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinFormula::Region(name) => write!(f, "{name}"),
            WinFormula::All(terms) => write_joined(f, terms, " & ", |t| matches!(t, WinFormula::Any(_))),
            WinFormula::Any(terms) => write_joined(f, terms, " | ", |t| matches!(t, WinFormula::All(_))),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    terms: &[WinFormula],
    separator: &str,
    needs_parens: impl Fn(&WinFormula) -> bool,
) -> fmt::Result {
    for (idx, term) in terms.iter().enumerate() {
        if idx > 0 {
            f.write_str(separator)?;
        }
        if needs_parens(term) {
            write!(f, "({term})")?;
        } else {
            write!(f, "{term}")?;
        }
    }
    Ok(())
}

impl FromStr for WinFormula {
    type Err = ElecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WinFormula {
    type Error = ElecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WinFormula> for String {
    fn from(formula: WinFormula) -> Self {
        formula.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    And,
    Or,
    Open,
    Close,
    Ident(String),
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' ')
}

fn tokenize(input: &str) -> Result<Vec<Token>, ElecError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some(&(offset, c)) = chars.peek() {
        match c {
            '&' => {
                tokens.push(Token::And);
                chars.next();
            }
            '|' => {
                tokens.push(Token::Or);
                chars.next();
            }
            '(' => {
                tokens.push(Token::Open);
                chars.next();
            }
            ')' => {
                tokens.push(Token::Close);
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            c if is_ident_start(c) => {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if !is_ident_char(c) {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                tokens.push(Token::Ident(name.trim().to_string()));
            }
            other => {
                return Err(ElecError::Formula(
                    ErrorInfo::new("unexpected-char", "unexpected character in formula")
                        .with_context("char", other.to_string())
                        .with_context("offset", offset.to_string())
                        .with_context("formula", input),
                ));
            }
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    input: &'a str,
}

impl Parser<'_> {
    fn error(&self, code: &str, message: &str) -> ElecError {
        ElecError::Formula(
            ErrorInfo::new(code, message)
                .with_context("token", self.pos.to_string())
                .with_context("formula", self.input),
        )
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn expr(&mut self) -> Result<WinFormula, ElecError> {
        let mut terms = vec![self.term()?];
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            terms.push(self.term()?);
        }
        Ok(collapse(terms, WinFormula::Any))
    }

    fn term(&mut self) -> Result<WinFormula, ElecError> {
        let mut factors = vec![self.factor()?];
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            factors.push(self.factor()?);
        }
        Ok(collapse(factors, WinFormula::All))
    }

    fn factor(&mut self) -> Result<WinFormula, ElecError> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(WinFormula::Region(name))
            }
            Some(Token::Open) => {
                self.pos += 1;
                let inner = self.expr()?;
                if self.peek() != Some(&Token::Close) {
                    return Err(self.error("unbalanced-parens", "expected `)`"));
                }
                self.pos += 1;
                Ok(inner)
            }
            Some(_) => Err(self.error("expected-region", "expected a region name or `(`")),
            None => Err(self.error("unexpected-end", "formula ended early")),
        }
    }
}

fn collapse(mut items: Vec<WinFormula>, wrap: fn(Vec<WinFormula>) -> WinFormula) -> WinFormula {
    if items.len() == 1 {
        items.remove(0)
    } else {
        wrap(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_binds_tighter_than_or() {
        let formula = WinFormula::parse("a | b & c").unwrap();
        assert_eq!(
            formula,
            WinFormula::Any(vec![
                WinFormula::region("a"),
                WinFormula::All(vec![WinFormula::region("b"), WinFormula::region("c")]),
            ])
        );
    }

    #[test]
    fn multi_word_region_names_are_trimmed() {
        let formula = WinFormula::parse(" New Hampshire & North Carolina ").unwrap();
        let names: Vec<&str> = formula.required_regions().into_iter().collect();
        assert_eq!(names, vec!["New Hampshire", "North Carolina"]);
    }

    #[test]
    fn display_parses_back_to_same_tree() {
        let text = "(Michigan & Pennsylvania & Wisconsin) | (Florida & (Michigan | Pennsylvania | Wisconsin))";
        let formula = WinFormula::parse(text).unwrap();
        let reparsed = WinFormula::parse(&formula.to_string()).unwrap();
        assert_eq!(reparsed, formula);
    }

    #[test]
    fn malformed_formulas_are_rejected() {
        for (input, code) in [
            ("", "unexpected-end"),
            ("a &", "unexpected-end"),
            ("(a | b", "unbalanced-parens"),
            ("a b)", "trailing-tokens"),
            ("a | | b", "expected-region"),
            ("a + b", "unexpected-char"),
        ] {
            let err = WinFormula::parse(input).unwrap_err();
            assert_eq!(err.code(), code, "input {input:?}");
        }
    }

    #[test]
    fn region_names_follow_identifier_grammar() {
        let formula = WinFormula::parse("Maine_2 & Nebraska-2nd").unwrap();
        let names: Vec<&str> = formula.required_regions().into_iter().collect();
        assert_eq!(names, vec!["Maine_2", "Nebraska-2nd"]);

        for input in ["St. Louis", "2nd & Ohio", "Ohio & -Iowa"] {
            let err = WinFormula::parse(input).unwrap_err();
            assert_eq!(err.code(), "unexpected-char", "input {input:?}");
        }
    }
}
