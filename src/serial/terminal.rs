/// Text received from the device, append-only until explicitly cleared.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TerminalBuffer {
    text: String,
}

impl TerminalBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, chunk: &str) {
        self.text.push_str(chunk);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Display lines with carriage returns stripped.
    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().map(|line| line.trim_end_matches('\r')).collect()
    }

    /// The last `count` display lines.
    pub fn tail(&self, count: usize) -> Vec<&str> {
        let lines = self.lines();
        let skip = lines.len().saturating_sub(count);
        lines[skip..].to_vec()
    }
}
