//! Tokenizer for the `(P,C) ` edge wire format
//!
//! Input is read in fixed windows of six characters:
//! ```text
//! ( P , C ) <space>
//! 0 1 2 3 4 5
//! ```
//! The last window of a stream may stop after the `)`. Anything else is a
//! format error (E1).

use crate::model::{EdgePair, SymbolRange};
use crate::{Error, Result};
use std::io::{BufRead, BufReader, ErrorKind, Read};

/// Width of one token including its trailing separator
pub const TOKEN_WIDTH: usize = "(X,Y) ".len();

/// Width of a final token that omits the separator
pub const FINAL_TOKEN_WIDTH: usize = TOKEN_WIDTH - 1;

/// Lazy, one-pass sequence of edge pairs read from a character source
///
/// Blocks whenever the underlying reader blocks. Yields at most one error,
/// after which the sequence is exhausted.
pub struct EdgeTokens<R: Read> {
    reader: BufReader<R>,
    range: SymbolRange,
    position: usize,
    done: bool,
}

impl<R: Read> EdgeTokens<R> {
    pub fn new(source: R, range: SymbolRange) -> Self {
        EdgeTokens {
            reader: BufReader::new(source),
            range,
            position: 0,
            done: false,
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        loop {
            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::format(format!("read failed: {}", e))),
            };
            let byte = available.first().copied();
            if byte.is_some() {
                self.reader.consume(1);
            }
            return Ok(byte);
        }
    }

    fn read_char(&mut self) -> Result<Option<char>> {
        let lead = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };
        let width = utf8_width(lead);
        if width == 0 {
            return Err(self.error("invalid UTF-8 lead byte"));
        }

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self
                .read_byte()?
                .ok_or_else(|| self.error("stream ended inside a character"))?;
        }
        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| self.error("invalid UTF-8 sequence"))
    }

    /// Read the next window, `None` at a clean end of stream
    fn next_window(&mut self) -> Result<Option<[char; FINAL_TOKEN_WIDTH]>> {
        let mut window = ['\0'; TOKEN_WIDTH];
        let mut len = 0;
        while len < TOKEN_WIDTH {
            match self.read_char()? {
                Some(c) => {
                    window[len] = c;
                    len += 1;
                }
                None => break,
            }
        }

        match len {
            0 => Ok(None),
            TOKEN_WIDTH if window[TOKEN_WIDTH - 1] != ' ' => Err(self.error(format!(
                "expected ' ' after token, found {:?}",
                window[TOKEN_WIDTH - 1]
            ))),
            TOKEN_WIDTH => Ok(Some(head(&window))),
            FINAL_TOKEN_WIDTH => {
                self.done = true;
                Ok(Some(head(&window)))
            }
            n => Err(self.error(format!("truncated token of {} characters", n))),
        }
    }

    fn error(&self, reason: impl AsRef<str>) -> Error {
        Error::format(format!("token {}: {}", self.position, reason.as_ref()))
    }
}

impl<R: Read> Iterator for EdgeTokens<R> {
    type Item = Result<EdgePair>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = match self.next_window() {
            Ok(Some(window)) => parse_token(&window, self.range)
                .map_err(|e| Error::format(format!("token {}: {}", self.position, reason(e)))),
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => Err(e),
        };
        if result.is_err() {
            self.done = true;
        }
        self.position += 1;
        Some(result)
    }
}

/// Decode one token body, `(P,C)`, into an edge pair
pub fn parse_token(window: &[char], range: SymbolRange) -> Result<EdgePair> {
    if window.len() != FINAL_TOKEN_WIDTH {
        return Err(Error::format(format!(
            "expected {} characters, found {}",
            FINAL_TOKEN_WIDTH,
            window.len()
        )));
    }
    for (column, expected) in [(0, '('), (2, ','), (4, ')')] {
        if window[column] != expected {
            return Err(Error::format(format!(
                "expected {:?} at column {}, found {:?}",
                expected, column, window[column]
            )));
        }
    }
    let (parent, child) = (window[1], window[3]);
    for symbol in [parent, child] {
        if !range.contains(symbol) {
            return Err(Error::format(format!(
                "symbol {:?} outside {}",
                symbol, range
            )));
        }
    }
    Ok(EdgePair::new(parent, child))
}

fn head(window: &[char; TOKEN_WIDTH]) -> [char; FINAL_TOKEN_WIDTH] {
    let mut out = ['\0'; FINAL_TOKEN_WIDTH];
    out.copy_from_slice(&window[..FINAL_TOKEN_WIDTH]);
    out
}

fn reason(err: Error) -> String {
    match err {
        Error::Format { reason } => reason,
        other => other.to_string(),
    }
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}
