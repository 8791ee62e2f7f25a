// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::ast::Ident;
use std::fmt;

/// Primitive SQL values such as number and string.
///
/// String variants hold the literal exactly as written between the quotes,
/// escapes included, so untouched values serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Numeric literal, sign included
    Number(String),
    /// 'string value'
    SingleQuotedString(String),
    /// N'string value'
    NationalStringLiteral(String),
    /// X'hex value'
    HexStringLiteral(String),
    /// b'0101'
    BitStringLiteral(String),
    /// _binary 'string value'
    Introduced { charset: String, literal: String },
    /// Boolean value true or false
    Boolean(bool),
    /// Bare word such as CURRENT_TIMESTAMP
    Identifier(Ident),
    /// `NULL` value
    Null,
}

impl Value {
    /// A string literal holding `text`, escaped for MySQL.
    pub fn string<S: AsRef<str>>(text: S) -> Self {
        Value::SingleQuotedString(escape_string(text.as_ref()))
    }

    /// The literal's text with escapes resolved, for comparisons against
    /// configured values. `None` for NULL.
    pub fn text(&self) -> Option<String> {
        match self {
            Value::Number(n) => Some(n.clone()),
            Value::SingleQuotedString(s)
            | Value::NationalStringLiteral(s)
            | Value::Introduced { literal: s, .. } => Some(unescape_string(s)),
            Value::HexStringLiteral(s) | Value::BitStringLiteral(s) => Some(s.clone()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Identifier(i) => Some(i.value.clone()),
            Value::Null => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{}", v),
            Value::SingleQuotedString(v) => write!(f, "'{}'", v),
            Value::NationalStringLiteral(v) => write!(f, "N'{}'", v),
            Value::HexStringLiteral(v) => write!(f, "X'{}'", v),
            Value::BitStringLiteral(v) => write!(f, "b'{}'", v),
            Value::Introduced { charset, literal } => write!(f, "{} '{}'", charset, literal),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Identifier(i) => write!(f, "{}", i.value),
            Value::Null => write!(f, "null"),
        }
    }
}

pub struct EscapeString<'a>(&'a str);

impl<'a> fmt::Display for EscapeString<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '\'' => f.write_str("\\'")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\0' => f.write_str("\\0")?,
                '\u{1a}' => f.write_str("\\Z")?,
                c => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}

/// Escape `s` the way mysqldump writes string literals.
pub fn escape_string(s: &str) -> String {
    EscapeString(s).to_string()
}

/// Resolve backslash escapes and doubled quotes of a raw literal body.
pub fn unescape_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some('0') => out.push('\0'),
                Some('b') => out.push('\u{8}'),
                Some('Z') => out.push('\u{1a}'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                out.push('\'');
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_strings_are_escaped() {
        let value = Value::string("O'Keefe\\n");
        assert_eq!(value.to_string(), r"'O\'Keefe\\n'");
        assert_eq!(value.text().unwrap(), "O'Keefe\\n");
    }

    #[test]
    fn unescape_handles_both_quote_styles() {
        assert_eq!(unescape_string(r"it\'s"), "it's");
        assert_eq!(unescape_string("it''s"), "it's");
        assert_eq!(unescape_string(r"line\nbreak"), "line\nbreak");
    }

    #[test]
    fn canonical_forms() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Number("-1.5".to_string()).to_string(), "-1.5");
        assert_eq!(
            Value::Introduced {
                charset: "_binary".to_string(),
                literal: "abc".to_string()
            }
            .to_string(),
            "_binary 'abc'"
        );
        assert_eq!(Value::Null.text(), None);
    }
}
