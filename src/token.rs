/// Operator characters of the source language.
/// Every other byte of a source file is inert.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Token {
    /// `<`
    Left,
    /// `>`
    Right,
    /// `+`
    Inc,
    /// `-`
    Dec,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    JumpIfZero,
    /// `]`
    JumpIfNonZero,
}

impl Token {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'<' => Some(Token::Left),
            b'>' => Some(Token::Right),
            b'+' => Some(Token::Inc),
            b'-' => Some(Token::Dec),
            b'.' => Some(Token::Output),
            b',' => Some(Token::Input),
            b'[' => Some(Token::JumpIfZero),
            b']' => Some(Token::JumpIfNonZero),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Token::Left => b'<',
            Token::Right => b'>',
            Token::Inc => b'+',
            Token::Dec => b'-',
            Token::Output => b'.',
            Token::Input => b',',
            Token::JumpIfZero => b'[',
            Token::JumpIfNonZero => b']',
        }
    }

    /// Loop brackets are never merged into runs.
    pub fn is_loop(self) -> bool {
        matches!(self, Token::JumpIfZero | Token::JumpIfNonZero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_byte() {
        let tokens: Vec<Token> = b"+-<>.,[]"
            .iter()
            .filter_map(|b| Token::from_byte(*b))
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Inc,
                Token::Dec,
                Token::Left,
                Token::Right,
                Token::Output,
                Token::Input,
                Token::JumpIfZero,
                Token::JumpIfNonZero,
            ]
        );

        for byte in b"ab #\n\t\0{}()" {
            assert_eq!(Token::from_byte(*byte), None);
        }
    }

    #[test]
    fn to_byte() {
        for byte in b"+-<>.,[]" {
            assert_eq!(Token::from_byte(*byte).unwrap().to_byte(), *byte);
        }
    }

    #[test]
    fn is_loop() {
        assert!(Token::JumpIfZero.is_loop());
        assert!(Token::JumpIfNonZero.is_loop());
        assert!(!Token::Inc.is_loop());
        assert!(!Token::Output.is_loop());
    }
}
