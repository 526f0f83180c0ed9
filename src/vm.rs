//! Virtual machine that runs the bytecode

use std::{
    io::{self, Read, Write},
    num::NonZeroUsize,
};

use tracing::debug;

use crate::{
    bytecode::{Bytecode, Compiler, Instruction},
    error::Result,
    token::Token,
};

/// Number of cells of a tape unless told otherwise
pub const DEFAULT_TAPE_SIZE: NonZeroUsize = match NonZeroUsize::new(4096) {
    Some(size) => size,
    None => unreachable!(),
};

/// Fixed size memory of byte cells with a movable head.
///
/// The head wraps around both ends: moving left from the first cell lands on
/// the last one and moving right from the last cell lands on the first one.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Box<[u8]>,
    head: usize,
}

impl Tape {
    pub fn new(size: NonZeroUsize) -> Self {
        Tape {
            cells: vec![0; size.get()].into_boxed_slice(),
            head: 0,
        }
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn get(&self) -> u8 {
        self.cells[self.head]
    }

    pub fn set(&mut self, value: u8) {
        self.cells[self.head] = value;
    }

    pub fn add(&mut self, count: usize) {
        let cell = &mut self.cells[self.head];
        *cell = cell.wrapping_add((count % 256) as u8);
    }

    pub fn sub(&mut self, count: usize) {
        let cell = &mut self.cells[self.head];
        *cell = cell.wrapping_sub((count % 256) as u8);
    }

    pub fn move_left(&mut self, count: usize) {
        let len = self.cells.len();
        self.head = (self.head + len - count % len) % len;
    }

    pub fn move_right(&mut self, count: usize) {
        let len = self.cells.len();
        self.head = (self.head + count % len) % len;
    }
}

impl Default for Tape {
    fn default() -> Self {
        Tape::new(DEFAULT_TAPE_SIZE)
    }
}

/// Virtual machine representation
pub struct Vm<I, O> {
    bytecode: Bytecode,
    ip: usize, // instruction pointer
    tape: Tape,
    input: I,  // program input, read by `,`
    output: O, // program output, written by `.`
}

impl<I: Read, O: Write> Vm<I, O> {
    pub fn new(bytecode: Bytecode, input: I, output: O) -> Self {
        Self::with_tape_size(bytecode, input, output, DEFAULT_TAPE_SIZE)
    }

    pub fn with_tape_size(bytecode: Bytecode, input: I, output: O, size: NonZeroUsize) -> Self {
        Vm {
            bytecode,
            ip: 0,
            tape: Tape::new(size),
            input,
            output,
        }
    }

    /// Compile `source` and prepare a machine to run it.
    pub fn load<R: Read>(source: R, input: I, output: O) -> Result<Self> {
        let bytecode = Compiler::new(source).compile()?;
        Ok(Self::new(bytecode, input, output))
    }

    /// Run until the instruction pointer leaves the bytecode.
    ///
    /// There is no step limit, a program that loops forever never returns.
    pub fn run(&mut self) -> Result<()> {
        debug!(instructions = self.bytecode.len(), "running program");

        while !self.is_finished() {
            self.next_instruction()?;
        }
        self.output.flush()?;

        debug!(head = self.tape.head(), "program finished");
        Ok(())
    }

    /// Execute the instruction at the instruction pointer. Does nothing once
    /// the program is finished.
    pub fn next_instruction(&mut self) -> Result<()> {
        let Some(&Instruction { token, operand }) = self.bytecode.get(self.ip) else {
            return Ok(());
        };

        match token {
            Token::Inc => self.tape.add(operand),
            Token::Dec => self.tape.sub(operand),
            Token::Left => self.tape.move_left(operand),
            Token::Right => self.tape.move_right(operand),
            Token::Output => self.ins_output(operand)?,
            Token::Input => self.ins_input(operand)?,
            Token::JumpIfZero if self.tape.get() == 0 => {
                self.ip = operand;
                return Ok(());
            }
            Token::JumpIfNonZero if self.tape.get() != 0 => {
                self.ip = operand;
                return Ok(());
            }
            Token::JumpIfZero | Token::JumpIfNonZero => {}
        }

        self.ip += 1;
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.ip >= self.bytecode.len()
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn bytecode(&self) -> &Bytecode {
        &self.bytecode
    }

    /// Give back the output sink, e.g. to inspect what the program wrote.
    pub fn into_output(self) -> O {
        self.output
    }

    /// Write the current cell `count` times
    fn ins_output(&mut self, count: usize) -> Result<()> {
        let byte = [self.tape.get()];
        for _ in 0..count {
            self.output.write_all(&byte)?;
        }
        Ok(())
    }

    /// Read `count` bytes into the current cell. The cell keeps its value
    /// when the input is exhausted.
    fn ins_input(&mut self, count: usize) -> Result<()> {
        // A prompt written before the read must be visible
        self.output.flush()?;

        let mut byte = [0u8];
        for _ in 0..count {
            loop {
                match self.input.read(&mut byte) {
                    Ok(0) => break,
                    Ok(_) => {
                        self.tape.set(byte[0]);
                        break;
                    }
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => return Err(err.into()),
                }
            }
        }
        Ok(())
    }
}
