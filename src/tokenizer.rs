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

//! SQL Tokenizer
//!
//! The tokenizer (a.k.a. lexer) converts a dump statement into a sequence of tokens.
//!
//! String literals are kept exactly as they were written between the quotes,
//! escapes included, so a value the parser does not touch is serialized back
//! byte for byte.

use std::io::BufRead;
use std::iter::Peekable;
use utf8_chars::{BufReadCharsExt, Chars};

use super::dialect::keywords::ALL_KEYWORDS;
use super::dialect::Dialect;
use std::collections::VecDeque;
use std::fmt;

/// SQL Token enumeration
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A keyword (like INSERT) or an optionally quoted SQL identifier
    Word(Word),
    /// An unsigned numeric literal, including `0x` hex and exponent forms
    Number(String),
    /// A character that could not be tokenized
    Char(char),
    /// Single quoted string, raw: i.e: 'it\'s'
    SingleQuotedString(String),
    /// "National" string literal: i.e: N'string'
    NationalStringLiteral(String),
    /// Hexadecimal string literal: i.e.: X'deadbeef'
    HexStringLiteral(String),
    /// Bit-value literal: i.e.: b'0101'
    BitStringLiteral(String),
    /// Comma
    Comma,
    /// Whitespace (space, tab, etc)
    Whitespace(Whitespace),
    /// Equality operator `=`
    Eq,
    /// Plus operator `+`
    Plus,
    /// Minus operator `-`
    Minus,
    /// Left parenthesis `(`
    LParen,
    /// Right parenthesis `)`
    RParen,
    /// Period (used for compound identifiers)
    Period,
    /// SemiColon `;` terminating a statement
    SemiColon,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Word(ref w) => write!(f, "{}", w),
            Token::Number(ref n) => f.write_str(n),
            Token::Char(ref c) => write!(f, "{}", c),
            Token::SingleQuotedString(ref s) => write!(f, "'{}'", s),
            Token::NationalStringLiteral(ref s) => write!(f, "N'{}'", s),
            Token::HexStringLiteral(ref s) => write!(f, "X'{}'", s),
            Token::BitStringLiteral(ref s) => write!(f, "b'{}'", s),
            Token::Comma => f.write_str(","),
            Token::Whitespace(ws) => write!(f, "{}", ws),
            Token::Eq => f.write_str("="),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Period => f.write_str("."),
            Token::SemiColon => f.write_str(";"),
        }
    }
}

impl Token {
    pub fn make_keyword(keyword: &str) -> Self {
        Token::make_word(keyword, None)
    }

    pub fn make_word(word: &str, quote_style: Option<char>) -> Self {
        let word_uppercase = word.to_uppercase();
        let is_keyword = quote_style == None && ALL_KEYWORDS.contains(&word_uppercase.as_str());
        Token::Word(Word {
            value: word.to_string(),
            quote_style,
            keyword: if is_keyword {
                word_uppercase
            } else {
                "".to_string()
            },
        })
    }
}

/// A keyword (like INSERT) or an optionally quoted SQL identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    /// The value of the token, without the enclosing quotes
    pub value: String,
    /// An identifier can be "quoted". MySQL uses backticks, ANSI mode double quotes.
    pub quote_style: Option<char>,
    /// If the word was not quoted and it matched one of the known keywords,
    /// this will have one of the values from dialect::keywords, otherwise empty
    pub keyword: String,
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.quote_style {
            Some(s) => write!(f, "{}{}{}", s, self.value, Word::matching_end_quote(s)),
            None => f.write_str(&self.value),
        }
    }
}

impl Word {
    fn matching_end_quote(ch: char) -> char {
        match ch {
            '[' => ']', // MS SQL
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Whitespace {
    Space,
    Newline,
    Tab,
    SingleLineComment(String),
    MultiLineComment(String),
}

impl fmt::Display for Whitespace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Whitespace::Space => f.write_str(" "),
            Whitespace::Newline => f.write_str("\n"),
            Whitespace::Tab => f.write_str("\t"),
            Whitespace::SingleLineComment(s) => write!(f, "--{}", s),
            Whitespace::MultiLineComment(s) => write!(f, "/*{}*/", s),
        }
    }
}

/// Tokenizer error
#[derive(Debug, PartialEq)]
pub struct TokenizerError(pub String);

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// SQL Tokenizer
pub struct Tokenizer<'a> {
    dialect: &'a dyn Dialect,
    query: Peekable<Chars<'a, dyn BufRead + 'a>>,
    pub line: u64,
    peeked_tokens: VecDeque<Token>,
}

impl<'a> Tokenizer<'a> {
    /// Create a new SQL tokenizer for the specified SQL statement
    pub fn new(dialect: &'a dyn Dialect, query: &'a mut dyn BufRead) -> Self {
        Self {
            dialect,
            query: query.chars().peekable(),
            line: 1,
            peeked_tokens: VecDeque::new(),
        }
    }

    /// Look `n` tokens ahead without consuming anything. `Ok(None)` means the
    /// input ends before that.
    pub fn peek_token(&mut self, n: usize) -> Result<Option<Token>, TokenizerError> {
        while self.peeked_tokens.len() <= n {
            match self.internal_next_token()? {
                Some(token) => self.peeked_tokens.push_back(token),
                None => return Ok(None),
            }
        }
        Ok(Some(self.peeked_tokens[n].clone()))
    }

    /// Get the next token or return None
    pub fn next_token(&mut self) -> Result<Option<Token>, TokenizerError> {
        if let Some(token) = self.peeked_tokens.pop_front() {
            return Ok(Some(token));
        }

        self.internal_next_token()
    }

    fn peek_char(&mut self) -> Result<Option<char>, TokenizerError> {
        match self.query.peek() {
            Some(Ok(ch)) => Ok(Some(*ch)),
            Some(Err(e)) => Err(TokenizerError(format!(
                "Invalid input at line {}: {}",
                self.line, e
            ))),
            None => Ok(None),
        }
    }

    fn internal_next_token(&mut self) -> Result<Option<Token>, TokenizerError> {
        let ch = match self.peek_char()? {
            Some(ch) => ch,
            None => return Ok(None),
        };

        match ch {
            ' ' => self.consume_and_return(Token::Whitespace(Whitespace::Space)),
            '\t' => self.consume_and_return(Token::Whitespace(Whitespace::Tab)),
            '\n' => {
                self.line += 1;
                self.consume_and_return(Token::Whitespace(Whitespace::Newline))
            }
            '\r' => {
                // Emit a single Whitespace::Newline token for \r and \r\n
                self.query.next();
                if let Some('\n') = self.peek_char()? {
                    self.query.next();
                }
                self.line += 1;
                Ok(Some(Token::Whitespace(Whitespace::Newline)))
            }
            'N' => {
                self.query.next(); // consume, to check the next char
                match self.peek_char()? {
                    Some('\'') => {
                        // N'...' - a <national character string literal>
                        let s = self.tokenize_single_quoted_string()?;
                        Ok(Some(Token::NationalStringLiteral(s)))
                    }
                    _ => {
                        // regular identifier starting with an "N"
                        let s = self.tokenize_word('N');
                        Ok(Some(Token::make_word(&s, None)))
                    }
                }
            }
            // Standard SQL only allows an uppercase 'X' to introduce a hex
            // string, but MySQL allows a lowercase 'x' too.
            x @ 'x' | x @ 'X' => {
                self.query.next(); // consume, to check the next char
                match self.peek_char()? {
                    Some('\'') => {
                        // X'...' - a <binary string literal>
                        let s = self.tokenize_single_quoted_string()?;
                        Ok(Some(Token::HexStringLiteral(s)))
                    }
                    _ => {
                        // regular identifier starting with an "X"
                        let s = self.tokenize_word(x);
                        Ok(Some(Token::make_word(&s, None)))
                    }
                }
            }
            b @ 'b' | b @ 'B' => {
                self.query.next(); // consume, to check the next char
                match self.peek_char()? {
                    Some('\'') => {
                        // b'...' - a bit-value literal, as mysqldump writes BIT columns
                        let s = self.tokenize_single_quoted_string()?;
                        Ok(Some(Token::BitStringLiteral(s)))
                    }
                    _ => {
                        let s = self.tokenize_word(b);
                        Ok(Some(Token::make_word(&s, None)))
                    }
                }
            }
            ch if self.dialect.is_line_comment_start(ch) => {
                self.query.next();
                let s = self.tokenize_line_comment()?;
                Ok(Some(Token::Whitespace(Whitespace::SingleLineComment(s))))
            }
            // identifier or keyword
            ch if self.dialect.is_identifier_start(ch) => {
                self.query.next(); // consume the first char
                let s = self.tokenize_word(ch);
                Ok(Some(Token::make_word(&s, None)))
            }
            // string
            '\'' => {
                let s = self.tokenize_single_quoted_string()?;
                Ok(Some(Token::SingleQuotedString(s)))
            }
            // delimited (quoted) identifier
            quote_start if self.dialect.is_delimited_identifier_start(quote_start) => {
                self.query.next(); // consume the opening quote
                let quote_end = Word::matching_end_quote(quote_start);
                let s = self.peeking_take_while(|ch| ch != quote_end)?;
                match self.query.next() {
                    Some(Ok(ch)) if ch == quote_end => {
                        Ok(Some(Token::make_word(&s, Some(quote_start))))
                    }
                    _ => Err(TokenizerError(format!(
                        "Expected close delimiter '{}' before EOF.",
                        quote_end
                    ))),
                }
            }
            // numbers
            '0'..='9' => self.tokenize_number().map(Some),
            // punctuation
            '(' => self.consume_and_return(Token::LParen),
            ')' => self.consume_and_return(Token::RParen),
            ',' => self.consume_and_return(Token::Comma),
            // operators
            '-' => {
                self.query.next(); // consume the '-'
                match self.peek_char()? {
                    Some('-') => {
                        self.query.next(); // consume the second '-', starting a single-line comment
                        let s = self.tokenize_line_comment()?;
                        Ok(Some(Token::Whitespace(Whitespace::SingleLineComment(s))))
                    }
                    // a regular '-' operator
                    _ => Ok(Some(Token::Minus)),
                }
            }
            '/' => {
                self.query.next(); // consume the '/'
                match self.peek_char()? {
                    Some('*') => {
                        self.query.next(); // consume the '*', starting a multi-line comment
                        self.tokenize_multiline_comment()
                    }
                    _ => Ok(Some(Token::Char('/'))),
                }
            }
            '+' => self.consume_and_return(Token::Plus),
            '=' => self.consume_and_return(Token::Eq),
            '.' => self.consume_and_return(Token::Period),
            ';' => self.consume_and_return(Token::SemiColon),
            other => self.consume_and_return(Token::Char(other)),
        }
    }

    /// Tokenize an identifier or keyword, after the first char is already consumed.
    fn tokenize_word(&mut self, first_char: char) -> String {
        let mut s = first_char.to_string();
        let dialect = self.dialect;
        // A decoding error simply ends the word; it resurfaces on the next token.
        if let Ok(rest) = self.peeking_take_while(|ch| dialect.is_identifier_part(ch)) {
            s.push_str(&rest);
        }
        s
    }

    /// Decimal numbers with optional fraction and exponent, or `0x` hex numbers.
    fn tokenize_number(&mut self) -> Result<Token, TokenizerError> {
        let mut s = self.peeking_take_while(|ch| ch.is_ascii_digit() || ch == '.')?;

        if s == "0" {
            if let Some(x @ 'x') | Some(x @ 'X') = self.peek_char()? {
                self.query.next();
                s.push(x);
                s.push_str(&self.peeking_take_while(|ch| ch.is_ascii_hexdigit())?);
                return Ok(Token::Number(s));
            }
        }

        if let Some(e @ 'e') | Some(e @ 'E') = self.peek_char()? {
            self.query.next();
            s.push(e);
            if let Some(sign @ '+') | Some(sign @ '-') = self.peek_char()? {
                self.query.next();
                s.push(sign);
            }
            s.push_str(&self.peeking_take_while(|ch| ch.is_ascii_digit())?);
        }

        Ok(Token::Number(s))
    }

    /// Read a single quoted string, starting with the opening quote. The
    /// content is returned as written: `''` and backslash escapes are kept.
    fn tokenize_single_quoted_string(&mut self) -> Result<String, TokenizerError> {
        let mut s = String::new();
        self.query.next(); // consume the opening quote
        loop {
            match self.query.next() {
                Some(Ok('\'')) => {
                    if let Some('\'') = self.peek_char()? {
                        s.push('\'');
                        s.push('\'');
                        self.query.next();
                    } else {
                        return Ok(s);
                    }
                }
                Some(Ok('\\')) => match self.query.next() {
                    Some(Ok(escaped)) => {
                        s.push('\\');
                        s.push(escaped);
                    }
                    _ => break,
                },
                Some(Ok(ch)) => {
                    if ch == '\n' {
                        self.line += 1;
                    }
                    s.push(ch);
                }
                Some(Err(e)) => {
                    return Err(TokenizerError(format!(
                        "Invalid input in string at line {}: {}",
                        self.line, e
                    )))
                }
                None => break,
            }
        }

        Err(TokenizerError(format!(
            "Unterminated string literal at line {}",
            self.line
        )))
    }

    /// Everything up to and including the next newline.
    fn tokenize_line_comment(&mut self) -> Result<String, TokenizerError> {
        let mut s = self.peeking_take_while(|ch| ch != '\n')?;
        if let Some(Ok(ch)) = self.query.next() {
            s.push(ch);
            self.line += 1;
        }
        Ok(s)
    }

    fn tokenize_multiline_comment(&mut self) -> Result<Option<Token>, TokenizerError> {
        let mut s = String::new();
        let mut maybe_closing_comment = false;
        loop {
            match self.query.next() {
                Some(Ok(ch)) => {
                    if maybe_closing_comment {
                        if ch == '/' {
                            break Ok(Some(Token::Whitespace(Whitespace::MultiLineComment(s))));
                        } else {
                            s.push('*');
                        }
                    }
                    maybe_closing_comment = ch == '*';
                    if !maybe_closing_comment {
                        s.push(ch);
                    }
                }
                _ => {
                    break Err(TokenizerError(
                        "Unexpected EOF while in a multi-line comment".to_string(),
                    ));
                }
            }
        }
    }

    fn consume_and_return(&mut self, t: Token) -> Result<Option<Token>, TokenizerError> {
        self.query.next();
        Ok(Some(t))
    }

    /// Read from `chars` until `predicate` returns `false` or EOF is hit.
    /// Return the characters read as String, and keep the first non-matching
    /// char available as `chars.next()`.
    fn peeking_take_while(
        &mut self,
        mut predicate: impl FnMut(char) -> bool,
    ) -> Result<String, TokenizerError> {
        let mut s = String::new();
        while let Some(ch) = self.peek_char()? {
            if predicate(ch) {
                self.query.next(); // consume
                s.push(ch);
            } else {
                break;
            }
        }
        Ok(s)
    }
}
