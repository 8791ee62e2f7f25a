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

//! Reassembles dump statements from physical lines.

/// Splits a dump into statements, one physical line at a time.
///
/// A statement ends on the line whose code, outside quotes and comments,
/// ends with the current delimiter. Lines holding no code while no
/// statement is pending (blank lines, comments) are statements of their own.
#[derive(Debug, Clone)]
pub struct StatementSplitter {
    delimiter: Vec<u8>,
    buffer: Vec<u8>,
    buffered: bool,
    buffered_code: bool,
    quote: Option<u8>,
    block_comment: bool,
}

impl Default for StatementSplitter {
    fn default() -> Self {
        StatementSplitter {
            delimiter: b";".to_vec(),
            buffer: Vec::new(),
            buffered: false,
            buffered_code: false,
            quote: None,
            block_comment: false,
        }
    }
}

/// What a scan of one line found.
struct LineScan {
    has_code: bool,
    terminated: bool,
}

impl StatementSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line, without its line terminator. Returns the statement the
    /// line completes, if any.
    pub fn push_line(&mut self, line: &[u8]) -> Option<Vec<u8>> {
        if !self.buffered {
            if let Some(delimiter) = delimiter_command(line) {
                self.delimiter = delimiter;
                return Some(line.to_vec());
            }
        }

        let scan = self.scan(line);
        if self.buffered {
            self.buffer.push(b'\n');
        }
        self.buffer.extend_from_slice(line);
        self.buffered = true;
        self.buffered_code |= scan.has_code;

        let open = self.quote.is_some() || self.block_comment;
        if !open && (scan.terminated || !self.buffered_code) {
            return self.take();
        }
        None
    }

    /// Whatever is left at the end of the input.
    pub fn finish(&mut self) -> Option<Vec<u8>> {
        self.quote = None;
        self.block_comment = false;
        if self.buffered {
            self.take()
        } else {
            None
        }
    }

    fn take(&mut self) -> Option<Vec<u8>> {
        self.buffered = false;
        self.buffered_code = false;
        Some(std::mem::take(&mut self.buffer))
    }

    fn scan(&mut self, line: &[u8]) -> LineScan {
        let mut scan = LineScan {
            has_code: false,
            terminated: false,
        };
        let mut i = 0;
        while i < line.len() {
            let b = line[i];

            if self.block_comment {
                if line[i..].starts_with(b"*/") {
                    self.block_comment = false;
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }

            if let Some(quote) = self.quote {
                if b == b'\\' && quote != b'`' {
                    i += 2;
                    continue;
                }
                if b == quote {
                    self.quote = None;
                }
                i += 1;
                continue;
            }

            match b {
                b'\'' | b'"' | b'`' => {
                    self.quote = Some(b);
                    scan.has_code = true;
                    scan.terminated = false;
                    i += 1;
                }
                b'/' if line.get(i + 1) == Some(&b'*') => {
                    self.block_comment = true;
                    i += 2;
                }
                b'#' => break,
                b'-' if line[i..].starts_with(b"--")
                    && line.get(i + 2).map_or(true, |c| c.is_ascii_whitespace()) =>
                {
                    break
                }
                _ if line[i..].starts_with(&self.delimiter) => {
                    scan.has_code = true;
                    scan.terminated = true;
                    i += self.delimiter.len();
                }
                b if b.is_ascii_whitespace() => i += 1,
                _ => {
                    scan.has_code = true;
                    scan.terminated = false;
                    i += 1;
                }
            }
        }
        scan
    }
}

/// The new delimiter of a `DELIMITER xx` client command.
fn delimiter_command(line: &[u8]) -> Option<Vec<u8>> {
    let line = trim(line);
    let keyword = b"delimiter";
    if line.len() <= keyword.len() || !line[..keyword.len()].eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &line[keyword.len()..];
    if !rest[0].is_ascii_whitespace() {
        return None;
    }
    let delimiter = trim(rest);
    let end = delimiter
        .iter()
        .position(|b| b.is_ascii_whitespace())
        .unwrap_or(delimiter.len());
    if end == 0 {
        None
    } else {
        Some(delimiter[..end].to_vec())
    }
}

fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(input: &str) -> Vec<String> {
        let mut splitter = StatementSplitter::new();
        let mut statements: Vec<Vec<u8>> = input
            .split('\n')
            .filter_map(|line| splitter.push_line(line.as_bytes()))
            .collect();
        statements.extend(splitter.finish());
        statements
            .into_iter()
            .map(|s| String::from_utf8(s).unwrap())
            .collect()
    }

    #[test]
    fn one_statement_per_line() {
        assert_eq!(
            split("DROP TABLE IF EXISTS `t`;\nINSERT INTO t VALUES (1);"),
            vec!["DROP TABLE IF EXISTS `t`;", "INSERT INTO t VALUES (1);"]
        );
    }

    #[test]
    fn statements_span_lines() {
        let create = "CREATE TABLE `t` (\n  `id` int(11) NOT NULL,\n  PRIMARY KEY (`id`)\n) ENGINE=InnoDB DEFAULT CHARSET=utf8;";
        assert_eq!(split(create), vec![create]);
    }

    #[test]
    fn delimiters_inside_quotes_and_comments_do_not_count() {
        let insert = "INSERT INTO t VALUES (1,'a;\nb'),(2,'it\\'s;\n'),(3,\"x;\n\");";
        assert_eq!(split(insert), vec![insert]);

        let commented = "INSERT INTO t /* a;\n b; */ VALUES (1); -- done;";
        assert_eq!(split(commented), vec![commented]);
    }

    #[test]
    fn comments_and_blank_lines_stand_alone() {
        assert_eq!(
            split("--\n-- Table structure\n\n/*!40101 SET NAMES utf8 */;\n# note"),
            vec!["--", "-- Table structure", "", "/*!40101 SET NAMES utf8 */;", "# note"]
        );
    }

    #[test]
    fn multiline_comment_is_one_unit() {
        assert_eq!(split("/* first\nsecond */\nSELECT 1;"), vec!["/* first\nsecond */", "SELECT 1;"]);
    }

    #[test]
    fn delimiter_changes() {
        let dump = "DELIMITER ;;\nCREATE TRIGGER tr BEFORE INSERT ON t FOR EACH ROW BEGIN\n  SET NEW.a = 1;\nEND ;;\nDELIMITER ;\nSELECT 1;";
        assert_eq!(
            split(dump),
            vec![
                "DELIMITER ;;",
                "CREATE TRIGGER tr BEFORE INSERT ON t FOR EACH ROW BEGIN\n  SET NEW.a = 1;\nEND ;;",
                "DELIMITER ;",
                "SELECT 1;"
            ]
        );
    }

    #[test]
    fn unterminated_input_is_flushed() {
        assert_eq!(split("INSERT INTO t\nVALUES (1)"), vec!["INSERT INTO t\nVALUES (1)"]);
        assert_eq!(split("SELECT 'open\n"), vec!["SELECT 'open\n"]);
        assert!(split("").len() == 1);
    }

    #[test]
    fn doubled_quotes_and_backticks() {
        let insert = "INSERT INTO `a;b` VALUES ('it''s;');";
        assert_eq!(split(insert), vec![insert]);
    }

    #[test]
    fn non_utf8_lines() {
        let mut splitter = StatementSplitter::new();
        assert_eq!(
            splitter.push_line(b"INSERT INTO t VALUES ('\xff');"),
            Some(b"INSERT INTO t VALUES ('\xff');".to_vec())
        );
        assert_eq!(splitter.finish(), None);
    }

    #[test]
    fn delimiter_command_parsing() {
        assert_eq!(delimiter_command(b"DELIMITER ;;"), Some(b";;".to_vec()));
        assert_eq!(delimiter_command(b"  delimiter $$  "), Some(b"$$".to_vec()));
        assert_eq!(delimiter_command(b"DELIMITER"), None);
        assert_eq!(delimiter_command(b"DELIMITERS ;"), None);
    }
}
