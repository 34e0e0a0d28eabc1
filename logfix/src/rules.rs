//! Rule catalogue, diagnostics and code actions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{FixError, FixResult};

/// The three diagnosed defects this crate knows how to fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RuleId {
    /// R1: placeholder names should be PascalCase
    PlaceholderCasing,
    /// R2: placeholders should be named, not numbered
    NumericPlaceholder,
    /// R3: use a structured template instead of string interpolation
    StructuredTemplate,
}

impl RuleId {
    pub const ALL: [RuleId; 3] = [
        RuleId::PlaceholderCasing,
        RuleId::NumericPlaceholder,
        RuleId::StructuredTemplate,
    ];

    /// Analyzer diagnostic code
    pub fn code(self) -> &'static str {
        match self {
            RuleId::PlaceholderCasing => "CA1727",
            RuleId::NumericPlaceholder => "CA2253",
            RuleId::StructuredTemplate => "CA2254",
        }
    }

    /// Short alias
    pub fn alias(self) -> &'static str {
        match self {
            RuleId::PlaceholderCasing => "R1",
            RuleId::NumericPlaceholder => "R2",
            RuleId::StructuredTemplate => "R3",
        }
    }

    /// The code action that fixes this rule
    pub fn action(self) -> CodeAction {
        let (title, equivalence_key) = match self {
            RuleId::PlaceholderCasing => ("Fix placeholder casing", "FixPascalCasePlaceHolder"),
            RuleId::NumericPlaceholder => ("Fix numeric placeholder", "FixNumericPlaceHolder"),
            RuleId::StructuredTemplate => ("Fix as structured logging", "FixAsStructuredLogging"),
        };
        CodeAction {
            title,
            equivalence_key,
            rule: self,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RuleId {
    type Err = FixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RuleId::ALL
            .into_iter()
            .find(|rule| rule.code().eq_ignore_ascii_case(s) || rule.alias().eq_ignore_ascii_case(s))
            .ok_or_else(|| FixError::UnknownRule(s.to_string()))
    }
}

impl TryFrom<String> for RuleId {
    type Error = FixError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RuleId> for String {
    fn from(rule: RuleId) -> Self {
        rule.code().to_string()
    }
}

/// A fix offered to the host under a stable key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeAction {
    pub title: &'static str,
    pub equivalence_key: &'static str,
    pub rule: RuleId,
}

/// A diagnosed call site: which rule fired and where
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub rule: RuleId,
    /// Byte offset of the diagnostic location in the document
    pub offset: usize,
}

impl Diagnostic {
    pub fn new(rule: RuleId, offset: usize) -> Self {
        Self { rule, offset }
    }
}

/// Diagnostic as delivered by an external analyzer, located either by
/// byte offset or by 1-indexed line and column
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiagnosticSpec {
    pub rule: RuleId,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub line: Option<usize>,
    #[serde(default)]
    pub column: Option<usize>,
}

impl DiagnosticSpec {
    /// Parse a list of diagnostics from JSON
    pub fn parse_json_list(text: &str) -> FixResult<Vec<DiagnosticSpec>> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse the command-line form `LINE:COL:RULE`
    pub fn parse_location(text: &str) -> FixResult<DiagnosticSpec> {
        let mut parts = text.splitn(3, ':');
        let (Some(line), Some(column), Some(rule)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(FixError::BadLocation(text.to_string()));
        };
        let bad = |_| FixError::BadLocation(text.to_string());
        let line = line.trim().parse().map_err(bad)?;
        let column = column.trim().parse().map_err(bad)?;
        Ok(DiagnosticSpec {
            rule: rule.parse()?,
            offset: None,
            line: Some(line),
            column: Some(column),
        })
    }

    /// Resolve to a byte offset within `document`
    pub fn resolve(&self, document: &Document) -> FixResult<Diagnostic> {
        if let Some(offset) = self.offset {
            if offset < document.source().len() {
                return Ok(Diagnostic::new(self.rule, offset));
            }
        }
        let line = self.line.unwrap_or(0);
        let column = self.column.unwrap_or(0);
        document
            .offset_of(line, column)
            .map(|offset| Diagnostic::new(self.rule, offset))
            .ok_or(FixError::InvalidLocation { line, column })
    }
}
