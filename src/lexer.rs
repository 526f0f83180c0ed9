use std::io::{Bytes, Read};

use crate::{error::Result, token::Token};

/// Scanner that pulls single bytes from a source and yields operator tokens.
pub struct Lexer<R> {
    bytes: Bytes<R>,
    line_start: bool, // the next byte is the first byte of a line
    finished: bool,   // end of stream has been seen
}

impl<R: Read> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Lexer {
            bytes: reader.bytes(),
            line_start: true,
            finished: false,
        }
    }

    /// Get the next token. This consumes the bytes up to and including the token.
    ///
    /// Returns `None` once the stream is exhausted, and on every call after that.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        while let Some(ch) = self.next_char()? {
            let line_start = self.line_start;
            self.line_start = ch == b'\n';

            if ch == b'#' && line_start {
                self.skip_comment()?;
                continue;
            }

            if let Some(token) = Token::from_byte(ch) {
                return Ok(Some(token));
            }
        }

        Ok(None)
    }

    /// Skip the rest of a comment line, the terminating newline included
    fn skip_comment(&mut self) -> Result<()> {
        while let Some(ch) = self.next_char()? {
            if ch == b'\n' {
                self.line_start = true;
                break;
            }
        }
        Ok(())
    }

    /// Read a single byte from the source
    fn next_char(&mut self) -> Result<Option<u8>> {
        if self.finished {
            return Ok(None);
        }

        match self.bytes.next() {
            Some(ch) => Ok(Some(ch?)),
            None => {
                self.finished = true;
                Ok(None)
            }
        }
    }
}
