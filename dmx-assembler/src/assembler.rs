//! Two-pass assembly: bind labels, then encode

use crate::encoder::{encode, LabelTable};
use crate::error::{AssemblerError, Result};
use crate::parser::{normalize, parse_statement, split_label, LineKind, SourceLine};
use dmx_spec::{Program, SIZE_LIM};

/// Assemble source text into a program
pub fn assemble(source: &str) -> Result<Program> {
    assemble_lines(source.lines())
}

/// Assemble an ordered sequence of source lines into a program
pub fn assemble_lines<I, S>(lines: I) -> Result<Program>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines = normalized_lines(lines);
    let labels = bind_labels(&lines)?;

    let mut words = Vec::with_capacity(lines.len());
    for line in &lines {
        let text = match split_label(line)? {
            LineKind::Label(_) => continue,
            LineKind::LabeledInstruction(_, text) | LineKind::Instruction(text) => text,
        };
        let statement = parse_statement(line, text)?;
        words.push(encode(line, &statement, &labels)?);
    }

    tracing::debug!(
        lines = lines.len(),
        labels = labels.len(),
        words = words.len(),
        "assembled program"
    );
    Ok(Program::new(words))
}

fn normalized_lines<I, S>(lines: I) -> Vec<SourceLine>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let text = normalize(raw.as_ref());
            (!text.is_empty()).then(|| SourceLine::new(index + 1, text))
        })
        .collect()
}

/// First pass: record every label against the index of the instruction it marks
fn bind_labels(lines: &[SourceLine]) -> Result<LabelTable> {
    let mut labels = LabelTable::new();
    let mut counter = 0usize;

    for line in lines {
        let (name, advances) = match split_label(line)? {
            LineKind::Label(name) => (Some(name), false),
            LineKind::LabeledInstruction(name, _) => (Some(name), true),
            LineKind::Instruction(_) => (None, true),
        };

        if let Some(name) = name {
            if labels.contains_key(name) {
                return Err(line.malformed_label(format!("`{}` is already defined", name)));
            }
            tracing::debug!(label = name, index = counter, "bound label");
            labels.insert(name.to_string(), counter);
        }
        if advances {
            counter += 1;
        }
    }

    if counter > SIZE_LIM {
        return Err(AssemblerError::ProgramTooLong {
            count: counter,
            limit: SIZE_LIM,
        });
    }
    Ok(labels)
}
