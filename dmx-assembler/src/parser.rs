//! Line parsing: label prefixes, mnemonics and operand tokens

use crate::error::{AssemblerError, Result};
use crate::lexer::{tokenize, Token};
use dmx_spec::{Opcode, Register, SlotKind};

/// A normalized source line: comment removed, trimmed, never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number in the input text
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    pub(crate) fn unknown_mnemonic(&self, mnemonic: &str) -> AssemblerError {
        AssemblerError::UnknownMnemonic {
            line: self.number,
            text: self.text.clone(),
            mnemonic: mnemonic.to_string(),
        }
    }

    pub(crate) fn wrong_operand_count(&self, opcode: Opcode, found: usize) -> AssemblerError {
        AssemblerError::WrongOperandCount {
            line: self.number,
            text: self.text.clone(),
            mnemonic: opcode.mnemonic().to_string(),
            expected: opcode.format().operand_count(),
            found,
        }
    }

    pub(crate) fn out_of_range(&self, kind: SlotKind, operand: &Operand) -> AssemblerError {
        AssemblerError::OperandOutOfRange {
            line: self.number,
            text: self.text.clone(),
            kind,
            operand: operand.to_string(),
        }
    }

    pub(crate) fn unresolved(&self, operand: &str) -> AssemblerError {
        AssemblerError::UnresolvedOperand {
            line: self.number,
            text: self.text.clone(),
            operand: operand.to_string(),
        }
    }

    pub(crate) fn malformed_label(&self, reason: impl Into<String>) -> AssemblerError {
        AssemblerError::DuplicateOrMalformedLabel {
            line: self.number,
            text: self.text.clone(),
            reason: reason.into(),
        }
    }
}

/// Shape of a normalized line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `name:` marks the next instruction
    Label(&'a str),
    /// `name: instruction`
    LabeledInstruction(&'a str, &'a str),
    /// plain instruction
    Instruction(&'a str),
}

/// Operand as written, before label substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Symbol(String),
    Number(i64),
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Register(reg) => write!(f, "{}", reg),
            Operand::Symbol(name) => write!(f, "{}", name),
            Operand::Number(value) => write!(f, "{}", value),
        }
    }
}

/// Parsed instruction: mnemonic resolved, operands not yet checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
}

/// Strip comment and surrounding whitespace
pub fn normalize(line: &str) -> &str {
    let code = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    code.trim()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Classify a normalized line by its label prefix
pub fn split_label(line: &SourceLine) -> Result<LineKind<'_>> {
    let text = line.text.as_str();
    let mut segments = text.split(':');
    let head = segments.next().unwrap_or_default();

    let Some(rest) = segments.next() else {
        return Ok(LineKind::Instruction(text));
    };
    if segments.next().is_some() {
        return Err(line.malformed_label("more than one ':'"));
    }

    let name = head.trim();
    if name.is_empty() {
        return Err(line.malformed_label("empty label name"));
    }
    if !is_identifier(name) {
        return Err(line.malformed_label(format!("`{}` is not an identifier", name)));
    }
    if Register::from_name(name).is_some() {
        return Err(line.malformed_label(format!("`{}` is a register name", name)));
    }

    let rest = rest.trim();
    if rest.is_empty() {
        Ok(LineKind::Label(name))
    } else {
        Ok(LineKind::LabeledInstruction(name, rest))
    }
}

/// Parse instruction text (no label prefix) into a [`Statement`]
pub fn parse_statement(line: &SourceLine, text: &str) -> Result<Statement> {
    let mut tokens = tokenize(text).into_iter();

    let opcode = match tokens.next() {
        Some(Token::Identifier(name)) => {
            Opcode::from_mnemonic(&name).ok_or_else(|| line.unknown_mnemonic(&name))?
        }
        Some(other) => return Err(line.unknown_mnemonic(&token_text(&other))),
        None => return Err(line.unknown_mnemonic("")),
    };

    let operands = tokens
        .map(|token| match token {
            Token::Register(index) => Register::from_index(index as usize)
                .map(Operand::Register)
                .ok_or_else(|| line.unresolved(&token_text(&token))),
            Token::Identifier(name) => Ok(Operand::Symbol(name)),
            Token::Number(value) => Ok(Operand::Number(value)),
            Token::Unknown(raw) => Err(line.unresolved(&raw)),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Statement { opcode, operands })
}

fn token_text(token: &Token) -> String {
    match token {
        Token::Register(index) => format!("R{}", index),
        Token::Identifier(name) | Token::Unknown(name) => name.clone(),
        Token::Number(value) => value.to_string(),
    }
}
