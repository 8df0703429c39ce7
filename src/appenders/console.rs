//! Console appender implementation

use crate::core::{Appender, LogRecord, RecordFormat, Result};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

pub struct ConsoleAppender {
    format: RecordFormat,
    stream: Stream,
}

impl ConsoleAppender {
    /// Write every record to stdout, keeping one ordered stream
    pub fn new(format: RecordFormat) -> Self {
        Self {
            format,
            stream: Stream::Stdout,
        }
    }

    /// Write every record to stderr
    pub fn stderr(format: RecordFormat) -> Self {
        Self {
            format,
            stream: Stream::Stderr,
        }
    }

    /// Colored single-line output
    ///
    /// # Example
    ///
    /// ```
    /// use logger_port::appenders::ConsoleAppender;
    /// use logger_port::RecordFormat;
    ///
    /// let appender = ConsoleAppender::pretty();
    /// assert_eq!(appender.format(), RecordFormat::Pretty { colors: true });
    /// ```
    pub fn pretty() -> Self {
        Self::new(RecordFormat::Pretty { colors: true })
    }

    pub fn json() -> Self {
        Self::new(RecordFormat::Json)
    }

    pub fn format(&self) -> RecordFormat {
        self.format
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::json()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.format.render(record);

        match self.stream {
            Stream::Stdout => writeln!(std::io::stdout().lock(), "{}", line)?,
            Stream::Stderr => writeln!(std::io::stderr().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
