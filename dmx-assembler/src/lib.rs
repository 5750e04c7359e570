//! DMX Assembler
//!
//! Assemble DMX assembly language into packed 32-bit instruction words.
//!
//! ## Example
//!
//! ```rust
//! use dmx_assembler::assemble;
//!
//! let source = r#"
//!     ldi R0, 5      # counter
//! top:
//!     prr R0
//!     ldi R1, 1
//!     sub R0, R0, R1
//!     jnz R0, top
//!     hlt
//! "#;
//!
//! let program = assemble(source).unwrap();
//! assert_eq!(program.len(), 6);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod encoder;
pub mod assembler;

pub use error::{AssemblerError, Result};
pub use assembler::{assemble, assemble_lines};
pub use encoder::{encode, LabelTable};
pub use parser::{parse_statement, Operand, SourceLine, Statement};
