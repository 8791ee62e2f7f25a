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

//! SQL Parser
//!
//! Parses one dump statement at a time. Only the statements that matter for
//! anonymization are understood in depth: INSERT/REPLACE with literal rows,
//! and CREATE TABLE (for its column order). Everything else is reported as
//! [`Statement::Other`] without further validation.

use log::debug;

use super::ast::*;
use super::dialect::keywords;
use super::dialect::Dialect;
use super::tokenizer::*;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ParserError {
    TokenizerError(String),
    ParserError(String),
    End,
}

// Use `Parser::expected` instead, if possible
macro_rules! parser_err {
    ($MSG:expr) => {
        Err(ParserError::ParserError($MSG.to_string()))
    };
}

#[derive(PartialEq)]
pub enum IsOptional {
    Optional,
    Mandatory,
}
use IsOptional::*;

impl From<TokenizerError> for ParserError {
    fn from(e: TokenizerError) -> Self {
        ParserError::TokenizerError(e.0)
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "sql parser error: {}",
            match self {
                ParserError::TokenizerError(s) => s,
                ParserError::ParserError(s) => s,
                ParserError::End => "EOF",
            }
        )
    }
}

impl Error for ParserError {}

/// SQL Parser
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    tokenizer_error: Option<TokenizerError>,
}

impl<'a> Parser<'a> {
    /// Parse the statement read from `sql`
    pub fn new(dialect: &'a (dyn Dialect + 'a), sql: &'a mut dyn std::io::BufRead) -> Self {
        Parser {
            tokenizer: Tokenizer::new(dialect, sql),
            tokenizer_error: None,
        }
    }

    /// Parse a single SQL statement, optionally terminated by `;`.
    pub fn parse_sql(dialect: &dyn Dialect, sql: &str) -> Result<Statement, ParserError> {
        let mut source = sql.as_bytes();
        let mut parser = Parser::new(dialect, &mut source);
        parser.parse_statement()
    }

    /// Parse a top-level statement. INSERT and CREATE TABLE are parsed up to
    /// the end of input; anything else stops at its first keyword.
    pub fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        match self.peek_token() {
            Some(Token::Word(ref w)) if w.keyword == "INSERT" || w.keyword == "REPLACE" => {
                match self.parse_insert_target()? {
                    Some((kind, table_name)) => {
                        Ok(Statement::Insert(self.parse_insert_body(kind, table_name)?))
                    }
                    None => Ok(Statement::Other),
                }
            }
            Some(Token::Word(ref w)) if w.keyword == "CREATE" => {
                self.next_token();
                self.parse_create()
            }
            Some(_) => Ok(Statement::Other),
            None => match self.tokenizer_error.take() {
                Some(e) => Err(e.into()),
                None => Err(ParserError::End),
            },
        }
    }

    /// Parse the head of an INSERT or REPLACE statement, up to and including
    /// the table name. Returns `None` when the statement is something else.
    pub fn parse_insert_target(&mut self) -> Result<Option<(InsertKind, ObjectName)>, ParserError> {
        let replace = match self.peek_token() {
            Some(Token::Word(ref w)) if w.keyword == "INSERT" => false,
            Some(Token::Word(ref w)) if w.keyword == "REPLACE" => true,
            _ => return Ok(None),
        };
        self.next_token();

        let _ = self.parse_keyword("LOW_PRIORITY")
            || self.parse_keyword("DELAYED")
            || self.parse_keyword("HIGH_PRIORITY");
        let ignore = self.parse_keyword("IGNORE");
        let _ = self.parse_keyword("INTO");

        let table_name = self.parse_object_name()?;
        debug!("parse_insert_target {}", table_name);

        let kind = if replace {
            InsertKind::Replace
        } else if ignore {
            InsertKind::InsertIgnore
        } else {
            InsertKind::Insert
        };
        Ok(Some((kind, table_name)))
    }

    /// Parse the rest of an INSERT after [`Parser::parse_insert_target`].
    pub fn parse_insert_body(
        &mut self,
        kind: InsertKind,
        table_name: ObjectName,
    ) -> Result<Insert, ParserError> {
        let columns = self.parse_parenthesized_column_list(Optional)?;

        if !self.parse_keyword("VALUES") && !self.parse_keyword("VALUE") {
            let token = self.peek_token();
            return self.expected("VALUES", token);
        }

        let values = self.parse_values()?;
        self.expect_end_of_statement()?;

        Ok(Insert {
            kind,
            table_name,
            columns,
            values,
        })
    }

    /// Parse a SQL CREATE statement, after the CREATE keyword
    fn parse_create(&mut self) -> Result<Statement, ParserError> {
        let _ = self.parse_keyword("TEMPORARY");
        if !self.parse_keyword("TABLE") {
            return Ok(Statement::Other);
        }
        let _ = self.parse_keywords(&["IF", "NOT", "EXISTS"]);
        let name = self.parse_object_name()?;

        if !self.consume_token(&Token::LParen) {
            // CREATE TABLE .. LIKE ..
            return Ok(Statement::Other);
        }

        let columns = self.parse_columns()?;
        debug!("parse_create {} {} columns", name, columns.len());

        // Table options (ENGINE=..., CHARSET=...) carry nothing we need.
        while self.peek_token().is_some() {
            self.next_token();
        }
        if let Some(e) = self.tokenizer_error.take() {
            return Err(e.into());
        }

        Ok(Statement::CreateTable { name, columns })
    }

    /// Column names of a CREATE TABLE definition list, after its opening
    /// parenthesis. Keys and constraints are skipped.
    fn parse_columns(&mut self) -> Result<Vec<Ident>, ParserError> {
        let mut columns = vec![];
        if self.consume_token(&Token::RParen) {
            return Ok(columns);
        }

        loop {
            match self.peek_token() {
                Some(Token::Word(ref k))
                    if keywords::TABLE_CONSTRAINT_KEYWORDS.contains(&k.keyword.as_str()) =>
                {
                    debug!("skipping table constraint {}", k.keyword);
                }
                Some(Token::Word(column_name)) => columns.push(column_name.to_ident()),
                token => return self.expected("column name or constraint definition", token),
            }
            self.skip_definition()?;

            let comma = self.consume_token(&Token::Comma);
            if self.consume_token(&Token::RParen) {
                // allow a trailing comma, even though it's not in standard
                break;
            } else if !comma {
                let token = self.peek_token();
                return self.expected("',' or ')' after column definition", token);
            }
        }

        Ok(columns)
    }

    /// Consume one column or constraint definition, stopping before the
    /// comma or closing parenthesis that ends it.
    fn skip_definition(&mut self) -> Result<(), ParserError> {
        let mut depth = 0usize;
        loop {
            match self.peek_token() {
                Some(Token::LParen) => depth += 1,
                Some(Token::RParen) if depth == 0 => return Ok(()),
                Some(Token::RParen) => depth -= 1,
                Some(Token::Comma) if depth == 0 => return Ok(()),
                Some(_) => {}
                None => return self.expected("')' closing the table definition", None),
            }
            self.next_token();
        }
    }

    fn parse_values(&mut self) -> Result<Values, ParserError> {
        let values = self.parse_comma_separated(|parser| {
            parser.expect_token(&Token::LParen)?;
            if parser.consume_token(&Token::RParen) {
                return Ok(vec![]);
            }
            let row = parser.parse_comma_separated(|parser| parser.parse_value())?;
            parser.expect_token(&Token::RParen)?;
            Ok(row)
        })?;
        Ok(Values(values))
    }

    /// Parse a literal value (numbers, strings, booleans, NULL)
    fn parse_value(&mut self) -> Result<Value, ParserError> {
        match self.next_token() {
            Some(t) => match t {
                Token::Word(k) => match k.keyword.as_ref() {
                    "TRUE" => Ok(Value::Boolean(true)),
                    "FALSE" => Ok(Value::Boolean(false)),
                    "NULL" => Ok(Value::Null),
                    "" if k.quote_style.is_none() => {
                        if k.value.starts_with('_') {
                            if let Some(Token::SingleQuotedString(literal)) = self.peek_token() {
                                self.next_token();
                                return Ok(Value::Introduced {
                                    charset: k.value,
                                    literal,
                                });
                            }
                        }
                        Ok(Value::Identifier(k.to_ident()))
                    }
                    "" => parser_err!(format!("Unsupported quoted value {}", k)),
                    _ => parser_err!(format!("No value parser for keyword {}", k.keyword)),
                },
                Token::Minus => self.parse_signed_number("-"),
                Token::Plus => self.parse_signed_number(""),
                Token::Number(n) => Ok(Value::Number(n)),
                Token::SingleQuotedString(s) => Ok(Value::SingleQuotedString(s)),
                Token::NationalStringLiteral(s) => Ok(Value::NationalStringLiteral(s)),
                Token::HexStringLiteral(s) => Ok(Value::HexStringLiteral(s)),
                Token::BitStringLiteral(s) => Ok(Value::BitStringLiteral(s)),
                unexpected => self.expected("a value", Some(unexpected)),
            },
            None => parser_err!("Expecting a value, but found EOF"),
        }
    }

    fn parse_signed_number(&mut self, sign: &str) -> Result<Value, ParserError> {
        match self.next_token() {
            Some(Token::Number(n)) => Ok(Value::Number(format!("{}{}", sign, n))),
            other => self.expected("a number after the sign", other),
        }
    }

    /// Accept an optional `;` and require the input to end there.
    fn expect_end_of_statement(&mut self) -> Result<(), ParserError> {
        let _ = self.consume_token(&Token::SemiColon);
        match self.peek_token() {
            None => match self.tokenizer_error.take() {
                Some(e) => Err(e.into()),
                None => Ok(()),
            },
            token => self.expected("end of statement", token),
        }
    }

    /// Return the first non-whitespace token that has not yet been processed
    /// (or None if reached end-of-file)
    fn peek_token(&mut self) -> Option<Token> {
        self.peek_nth_token(0)
    }

    /// Return nth non-whitespace token that has not yet been processed
    fn peek_nth_token(&mut self, mut n: usize) -> Option<Token> {
        let mut index = 0;
        loop {
            match self.tokenizer.peek_token(index) {
                Ok(Some(Token::Whitespace(_))) => {}
                Ok(Some(token)) => {
                    if n == 0 {
                        return Some(token);
                    }
                    n -= 1;
                }
                Ok(None) => return None,
                Err(e) => {
                    self.tokenizer_error = Some(e);
                    return None;
                }
            }
            index += 1;
        }
    }

    /// Return the first non-whitespace token that has not yet been processed
    /// (or None if reached end-of-file) and mark it as processed. OK to call
    /// repeatedly after reaching EOF.
    fn next_token(&mut self) -> Option<Token> {
        loop {
            match self.tokenizer.next_token() {
                Ok(Some(Token::Whitespace(_))) => continue,
                Ok(Some(token)) => return Some(token),
                Ok(None) => return None,
                Err(e) => {
                    self.tokenizer_error = Some(e);
                    return None;
                }
            }
        }
    }

    /// Report unexpected token
    fn expected<T>(&self, expected: &str, found: Option<Token>) -> Result<T, ParserError> {
        parser_err!(format!(
            "Expected {}, found: {} (line {})",
            expected,
            found.map_or_else(|| "EOF".to_string(), |t| format!("{}", t)),
            self.tokenizer.line
        ))
    }

    /// Look for an expected keyword and consume it if it exists
    #[must_use]
    fn parse_keyword(&mut self, expected: &'static str) -> bool {
        // Ideally, we'd accept a enum variant, not a string, but since
        // it's not trivial to maintain the enum without duplicating all
        // the keywords three times, we'll settle for a run-time check that
        // the string actually represents a known keyword...
        debug_assert!(keywords::ALL_KEYWORDS.contains(&expected));
        match self.peek_token() {
            Some(Token::Word(ref k)) if expected.eq_ignore_ascii_case(&k.keyword) => {
                self.next_token();
                true
            }
            _ => false,
        }
    }

    /// Look for an expected sequence of keywords and consume them if they exist
    #[must_use]
    fn parse_keywords(&mut self, keywords: &[&'static str]) -> bool {
        let all_present = keywords.iter().enumerate().all(|(index, word)| {
            matches!(self.peek_nth_token(index), Some(Token::Word(ref found)) if found.keyword == *word)
        });

        if all_present {
            for word in keywords {
                if !self.parse_keyword(word) {
                    return false;
                }
            }
        }

        all_present
    }

    /// Consume the next token if it matches the expected token, otherwise return false
    #[must_use]
    fn consume_token(&mut self, expected: &Token) -> bool {
        match &self.peek_token() {
            Some(t) if *t == *expected => {
                self.next_token();
                true
            }
            _ => false,
        }
    }

    /// Bail out if the current token is not an expected token, or consume it if it is
    fn expect_token(&mut self, expected: &Token) -> Result<(), ParserError> {
        let token = self.peek_token();
        if self.consume_token(expected) {
            Ok(())
        } else {
            self.expected(&expected.to_string(), token)
        }
    }

    /// Parse a comma-separated list of 1+ items accepted by `F`
    fn parse_comma_separated<T, F>(&mut self, mut f: F) -> Result<Vec<T>, ParserError>
    where
        F: FnMut(&mut Parser<'a>) -> Result<T, ParserError>,
    {
        let mut values = vec![];
        loop {
            values.push(f(self)?);
            if !self.consume_token(&Token::Comma) {
                break;
            }
        }
        Ok(values)
    }

    /// Parse a possibly qualified, possibly quoted identifier, e.g.
    /// `foo` or `myschema`.`table`
    fn parse_object_name(&mut self) -> Result<ObjectName, ParserError> {
        let mut idents = vec![];
        loop {
            idents.push(self.parse_identifier()?);
            if !self.consume_token(&Token::Period) {
                break;
            }
        }
        Ok(ObjectName(idents))
    }

    /// Parse a simple one-word identifier (possibly quoted, possibly a keyword)
    fn parse_identifier(&mut self) -> Result<Ident, ParserError> {
        match self.next_token() {
            Some(Token::Word(w)) => Ok(w.to_ident()),
            unexpected => self.expected("identifier", unexpected),
        }
    }

    /// Parse a parenthesized comma-separated list of unqualified, possibly quoted identifiers
    fn parse_parenthesized_column_list(
        &mut self,
        optional: IsOptional,
    ) -> Result<Vec<Ident>, ParserError> {
        if self.consume_token(&Token::LParen) {
            let cols = self.parse_comma_separated(|parser| parser.parse_identifier())?;
            self.expect_token(&Token::RParen)?;
            Ok(cols)
        } else if optional == Optional {
            Ok(vec![])
        } else {
            let token = self.peek_token();
            self.expected("a list of columns in parentheses", token)
        }
    }
}

impl Word {
    fn to_ident(&self) -> Ident {
        Ident {
            value: self.value.clone(),
            quote_style: self.quote_style,
        }
    }
}
