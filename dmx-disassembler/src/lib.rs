//! # DMX Disassembler
//!
//! Decode DMX instruction words back into assembly text.
//!
//! Decoding is strict: unused slots must be zero and register slots must
//! name R0-R7. Anything [`format`] produces reassembles to the same word.
//!
//! ## Example
//!
//! ```rust
//! use dmx_disassembler::{decode, format, format_word};
//!
//! let decoded = decode(0x00FF_0003).unwrap();
//! assert_eq!(format(&decoded), "ldi R0, -1");
//! assert_eq!(format_word(0xFFFF_FFFF), ".word 0xffffffff");
//! ```

pub mod error;
pub mod decoder;
pub mod formatter;
pub mod disassembler;

pub use error::{DisassemblerError, Result};
pub use disassembler::disassemble;
pub use decoder::{decode, Decoded, Operand};
pub use formatter::{format, format_word};
