//! Brainfuck Fast Interpreter (BFFI) compiles brainfuck source into a compact
//! bytecode and runs it on a tape machine.
//!
//! # Example
//!
//! ```text
//! # prints the byte 42
//! ++++++[>+++++++<-]>.
//! ```
//!
//! # Operators
//!
//! | Operator | Instruction     | Brief |
//! |----------|-----------------|-------|
//! | `<`      | Left(_n_)       | Move the head _n_ cells to the left. |
//! | `>`      | Right(_n_)      | Move the head _n_ cells to the right. |
//! | `+`      | Inc(_n_)        | Add _n_ to the current cell. |
//! | `-`      | Dec(_n_)        | Subtract _n_ from the current cell. |
//! | `.`      | Output(_n_)     | Write the current cell to the output _n_ times. |
//! | `,`      | Input(_n_)      | Read _n_ bytes from the input into the current cell. |
//! | `[`      | JumpIfZero(_a_) | Jump to address _a_, right after the matching `]`, if the current cell is zero. |
//! | `]`      | JumpIfNonZero(_a_) | Jump to address _a_, right after the matching `[`, if the current cell is not zero. |
//!
//! A run of identical operators other than `[` and `]` compiles into a single
//! instruction whose operand _n_ is the length of the run.
//!
//! # Important notes
//!
//! - Every byte that is not an operator is ignored.
//! - A line starting with `#` is a comment. It ends at the next newline.
//! - Cells are bytes. `+` and `-` wrap around at 0 and 255.
//! - The tape has a fixed size (4096 cells by default) and the head wraps around
//!   its ends.
//! - Reading past the end of the input leaves the current cell untouched.
//! - Unbalanced brackets are rejected at compile time.
//! - There is no step limit, an endless loop never terminates.
//!
//! # Usage
//!
//! ```
//! use bffi::vm::Vm;
//!
//! let mut vm = Vm::load("++++++[>+++++++<-]>.".as_bytes(), std::io::empty(), Vec::new())?;
//! vm.run()?;
//! assert_eq!(vm.into_output(), vec![42]);
//! # Ok::<(), bffi::Error>(())
//! ```

pub mod bytecode;
pub mod error;
pub mod lexer;
pub mod token;
pub mod vm;

pub use error::{Error, Result};
