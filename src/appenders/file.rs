//! File appender implementation

use crate::core::{Appender, LogRecord, LoggerError, RecordFormat, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered file appender
///
/// Writes one JSON object per line unless told otherwise. Buffered output is
/// flushed when the appender is dropped.
pub struct FileAppender {
    path: PathBuf,
    writer: BufWriter<File>,
    format: RecordFormat,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            format: RecordFormat::Json,
        })
    }

    /// Set the output format for this appender
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use logger_port::appenders::FileAppender;
    /// use logger_port::RecordFormat;
    ///
    /// let appender = FileAppender::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_format(RecordFormat::Pretty { colors: false });
    /// ```
    #[must_use]
    pub fn with_format(mut self, format: RecordFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let mut line = self.format.render(record);
        line.push('\n');

        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
