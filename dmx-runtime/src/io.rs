//! Console output collected during a run

/// Lines produced by `prr`/`prm`, in program order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Console {
    lines: Vec<String>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one value as a plain decimal line
    pub fn emit(&mut self, value: i64) {
        self.lines.push(value.to_string());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_decimal() {
        let mut console = Console::new();
        console.emit(8);
        console.emit(-1);
        console.emit(0xFFFF_FFFF);
        assert_eq!(console.lines(), &["8", "-1", "4294967295"]);
        assert_eq!(console.take_lines().len(), 3);
        assert!(console.lines().is_empty());
    }
}
