//! Bytecode representation

use std::io::Read;

use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    lexer::Lexer,
    token::Token,
};

/// A single instruction of the bytecode
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Instruction {
    /// What the instruction does
    pub token: Token,
    /// Repeat count for `<`, `>`, `+`, `-`, `.` and `,`.
    /// Jump target (an instruction address) for `[` and `]`.
    pub operand: usize,
}

impl Instruction {
    pub fn new(token: Token, operand: usize) -> Self {
        Instruction { token, operand }
    }
}

/// Representation of bytecode
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Bytecode {
    /// Array of instructions, addressed by their index
    pub instructions: Vec<Instruction>,
}

impl Bytecode {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, ip: usize) -> Option<&Instruction> {
        self.instructions.get(ip)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }
}

/// Single pass compiler that generates bytecode from source text
pub struct Compiler<R> {
    lexer: Lexer<R>,
    instructions: Vec<Instruction>,
    loop_addrs: Vec<usize>, // addresses of the `[`s still waiting for their `]`
}

impl<R: Read> Compiler<R> {
    pub fn new(source: R) -> Self {
        Compiler {
            lexer: Lexer::new(source),
            instructions: Vec::new(),
            loop_addrs: Vec::new(),
        }
    }

    /// Compile the whole source and generate a `Bytecode`
    pub fn compile(mut self) -> Result<Bytecode> {
        let mut pending: Option<Instruction> = None;

        while let Some(token) = self.lexer.next_token()? {
            if let Some(ins) = pending.as_mut() {
                if ins.token == token && !token.is_loop() {
                    ins.operand += 1;
                    continue;
                }
            }

            if let Some(ins) = pending.take() {
                self.instructions.push(ins);
            }

            pending = Some(match token {
                Token::JumpIfZero => self.open_loop(),
                Token::JumpIfNonZero => self.close_loop()?,
                token => Instruction::new(token, 1),
            });
        }

        if let Some(ins) = pending {
            self.instructions.push(ins);
        }

        if !self.loop_addrs.is_empty() {
            return Err(Error::UnclosedOpen {
                depth: self.loop_addrs.len(),
            });
        }

        debug!(instructions = self.instructions.len(), "compiled program");

        Ok(Bytecode {
            instructions: self.instructions,
        })
    }

    /// The `[` lands at the current end of the bytecode. Its target is
    /// unknown until the matching `]` shows up.
    fn open_loop(&mut self) -> Instruction {
        self.loop_addrs.push(self.instructions.len());
        Instruction::new(Token::JumpIfZero, 0)
    }

    /// Wire the `]` that lands at the current end of the bytecode with its `[`.
    fn close_loop(&mut self) -> Result<Instruction> {
        let addr = self.instructions.len();
        let open_addr = self
            .loop_addrs
            .pop()
            .ok_or(Error::UnmatchedClose { position: addr })?;

        // `[` jumps past the `]`, `]` jumps right after the `[`
        self.instructions[open_addr].operand = addr + 1;
        trace!(open = open_addr, close = addr, "patched loop");

        Ok(Instruction::new(Token::JumpIfNonZero, open_addr + 1))
    }
}
