//! Diagnostic Sink
//!
//! Line-oriented destination for connection events. The listener never
//! writes to stdout directly; the console lives behind this trait so the
//! observable output can be captured in tests.

/// Destination for the listener's diagnostic lines
pub trait DiagnosticSink {
    /// Emit one line to the sink
    fn emit(&mut self, line: &str);
}

/// Sink that writes each line to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn emit(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Sink that collects lines in memory
#[derive(Debug, Default)]
pub struct CaptureSink {
    lines: Vec<String>,
}

impl CaptureSink {
    /// Create an empty capture sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines received so far, in emission order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl DiagnosticSink for CaptureSink {
    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
