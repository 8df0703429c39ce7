//! Appender-backed sink
//!
//! [`RecordSink`] filters by a minimum level, attaches bindings, and hands
//! each [`LogRecord`] to its appenders, either inline or through a bounded
//! queue drained by a worker thread.

use super::{
    appender::Appender,
    error::Result,
    log_level::{LevelFilter, LogLevel},
    metadata::Bindings,
    metrics::SinkMetrics,
    payload::{OutputMode, Payload},
    record::{LogRecord, RecordFormat},
    sink::{Destination, Sink},
};
use crate::appenders::{ConsoleAppender, FileAppender};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// How long dropping the last sink handle waits for queued records
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

const BATCH_SIZE: usize = 50;

/// How long a timed-out shutdown waits for the appender lock before skipping the final flush
const FLUSH_LOCK_TIMEOUT: Duration = Duration::from_millis(100);

type SharedAppenders = Arc<Mutex<Vec<Box<dyn Appender>>>>;

/// State shared by a sink and every child derived from it
struct SinkCore {
    min_level: LevelFilter,
    appenders: SharedAppenders,
    sender: Option<Sender<LogRecord>>,
    worker: Option<thread::JoinHandle<()>>,
    shutdown_timeout: Duration,
    metrics: Arc<SinkMetrics>,
}

impl SinkCore {
    fn new(min_level: LevelFilter, appenders: Vec<Box<dyn Appender>>) -> Self {
        Self {
            min_level,
            appenders: Arc::new(Mutex::new(appenders)),
            sender: None,
            worker: None,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            metrics: Arc::new(SinkMetrics::new()),
        }
    }

    fn with_async(
        min_level: LevelFilter,
        appenders: Vec<Box<dyn Appender>>,
        buffer_size: usize,
    ) -> Self {
        let mut core = Self::new(min_level, appenders);
        let (sender, receiver) = bounded(buffer_size.max(1));
        let appenders = Arc::clone(&core.appenders);
        let metrics = Arc::clone(&core.metrics);

        core.worker = Some(thread::spawn(move || {
            Self::drain(receiver, &appenders, &metrics);
        }));
        core.sender = Some(sender);
        core
    }

    /// Worker loop: block for one record, then take whatever else is queued
    fn drain(receiver: Receiver<LogRecord>, appenders: &SharedAppenders, metrics: &SinkMetrics) {
        let mut batch = Vec::with_capacity(BATCH_SIZE);

        while let Ok(record) = receiver.recv() {
            batch.push(record);
            while batch.len() < BATCH_SIZE {
                match receiver.try_recv() {
                    Ok(record) => batch.push(record),
                    Err(_) => break,
                }
            }

            let mut guard = appenders.lock();
            for record in &batch {
                write_isolated(&mut guard, record, metrics);
            }
            flush_isolated(&mut guard);
            batch.clear();
        }
    }

    fn dispatch(&self, record: LogRecord) {
        let Some(ref sender) = self.sender else {
            let mut appenders = self.appenders.lock();
            write_isolated(&mut appenders, &record, &self.metrics);
            return;
        };

        match sender.try_send(record) {
            Ok(()) => {}
            Err(TrySendError::Full(record)) => self.handle_overflow(record),
            Err(TrySendError::Disconnected(_)) => {
                // Shutting down
            }
        }
    }

    /// Error records are written inline; everything else is dropped
    fn handle_overflow(&self, record: LogRecord) {
        self.metrics.record_queue_full();

        if record.level == LogLevel::Error {
            self.metrics.record_critical_preserved();
            let mut appenders = self.appenders.lock();
            write_isolated(&mut appenders, &record, &self.metrics);
            return;
        }

        let dropped = self.metrics.record_dropped() + 1;
        if dropped == 1 || dropped.is_multiple_of(1000) {
            eprintln!(
                "[LOGGER WARNING] Queue full, {} records dropped. \
                 Consider increasing the async buffer size.",
                dropped
            );
        }
    }

    fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.lock();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }
}

impl Drop for SinkCore {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain and exit
        drop(self.sender.take());

        let mut worker_done = true;
        if let Some(handle) = self.worker.take() {
            let start = Instant::now();
            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!("[LOGGER ERROR] Async worker thread panicked during shutdown: {:?}", e);
                    }
                    break;
                }

                if start.elapsed() >= self.shutdown_timeout {
                    eprintln!(
                        "[LOGGER WARNING] Async worker thread did not finish within {:?}. \
                         Some records may be lost.",
                        self.shutdown_timeout
                    );
                    worker_done = false;
                    break;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }

        if worker_done {
            if let Err(e) = self.flush() {
                eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            }
        } else {
            // The detached worker may still be inside an appender
            match self.appenders.try_lock_for(FLUSH_LOCK_TIMEOUT) {
                Some(mut appenders) => flush_isolated(&mut appenders),
                None => eprintln!(
                    "[LOGGER WARNING] Appenders still busy after shutdown timeout; skipping final flush"
                ),
            }
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Sink shutting down with {} dropped records (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Hand `record` to every appender; one failing appender does not stop the rest
fn write_isolated(appenders: &mut [Box<dyn Appender>], record: &LogRecord, metrics: &SinkMetrics) {
    let mut has_error = false;

    for appender in appenders.iter_mut() {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            appender.append(record)
        }));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                has_error = true;
            }
            Err(panic) => {
                eprintln!(
                    "[LOGGER CRITICAL] Appender '{}' panicked: {}. \
                     Other appenders continue to function.",
                    appender.name(),
                    panic_message(&*panic)
                );
                has_error = true;
            }
        }
    }

    if has_error {
        metrics.record_dropped();
    } else {
        metrics.record_written();
    }
}

fn flush_isolated(appenders: &mut [Box<dyn Appender>]) {
    for appender in appenders.iter_mut() {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| appender.flush()));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Appender '{}' flush failed: {}", appender.name(), e);
            }
            Err(panic) => {
                eprintln!(
                    "[LOGGER CRITICAL] Appender '{}' panicked during flush: {}",
                    appender.name(),
                    panic_message(&*panic)
                );
            }
        }
    }
}

/// Sink that writes [`LogRecord`]s to a set of appenders
///
/// Cloning is cheap and clones share appenders, queue and metrics. A child
/// from [`Sink::with_bindings`] shares them too but carries its own merged
/// bindings, so sibling children never see each other's fields.
///
/// # Example
///
/// ```
/// use logger_port::prelude::*;
///
/// let sink = RecordSink::builder()
///     .min_level(LevelFilter::Debug)
///     .appender(ConsoleAppender::new(RecordFormat::Json))
///     .build();
///
/// let logger = Logger::new(sink.clone(), OutputMode::Structured);
/// logger.info("Server started", None);
/// assert_eq!(sink.metrics().written_count(), 1);
/// ```
#[derive(Clone)]
pub struct RecordSink {
    core: Arc<SinkCore>,
    bindings: Bindings,
    rendered: Arc<Payload>,
}

impl RecordSink {
    fn from_core(core: SinkCore) -> Self {
        Self {
            core: Arc::new(core),
            bindings: Bindings::new(),
            rendered: Arc::new(Payload::new()),
        }
    }

    /// Build a sink writing to `destination` in the format `mode` calls for
    ///
    /// Human mode renders pretty single lines, colored on the console;
    /// structured mode writes one JSON object per line.
    pub fn configure(
        min_level: LevelFilter,
        mode: OutputMode,
        destination: Destination,
    ) -> Result<Self> {
        let format = match (mode, &destination) {
            (OutputMode::Structured, _) => RecordFormat::Json,
            (OutputMode::Human, Destination::File(_)) => RecordFormat::Pretty { colors: false },
            (OutputMode::Human, _) => RecordFormat::Pretty { colors: true },
        };

        let builder = Self::builder().min_level(min_level);
        let builder = match destination {
            Destination::Stdout => builder.appender(ConsoleAppender::new(format)),
            Destination::Stderr => builder.appender(ConsoleAppender::stderr(format)),
            Destination::File(path) => builder.appender(FileAppender::new(path)?.with_format(format)),
        };

        Ok(builder.build())
    }

    #[must_use]
    pub fn builder() -> RecordSinkBuilder {
        RecordSinkBuilder::new()
    }

    pub fn min_level(&self) -> LevelFilter {
        self.core.min_level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.core.min_level.enabled(level)
    }

    /// Bindings accumulated along this sink's chain of children
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.core.metrics
    }

    pub fn is_async(&self) -> bool {
        self.core.sender.is_some()
    }

    /// Child sink with `bindings` merged over this sink's bindings
    #[must_use]
    pub fn child(&self, bindings: &Bindings) -> Self {
        let merged = self.bindings.merged(bindings);
        Self {
            core: Arc::clone(&self.core),
            rendered: Arc::new(merged.to_json_map()),
            bindings: merged,
        }
    }

    /// Flush every appender
    ///
    /// In async mode records still queued are not waited for; they are
    /// written when the worker reaches them, or when the last handle drops.
    pub fn flush(&self) -> Result<()> {
        self.core.flush()
    }
}

impl Sink for RecordSink {
    fn emit(&self, level: LogLevel, payload: Payload, message: &str) {
        if !self.enabled(level) {
            self.core.metrics.record_filtered();
            return;
        }

        let record = LogRecord::new(level, message, payload).with_bindings(Arc::clone(&self.rendered));
        self.core.dispatch(record);
    }

    fn with_bindings(&self, bindings: &Bindings) -> Arc<dyn Sink> {
        Arc::new(self.child(bindings))
    }
}

impl std::fmt::Debug for RecordSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordSink")
            .field("min_level", &self.core.min_level)
            .field("async", &self.is_async())
            .field("bindings", &self.bindings)
            .finish()
    }
}

/// Builder for [`RecordSink`]
///
/// # Example
/// ```
/// use logger_port::prelude::*;
///
/// let sink = RecordSink::builder()
///     .min_level(LevelFilter::Warn)
///     .appender(ConsoleAppender::new(RecordFormat::Pretty { colors: true }))
///     .async_mode(1000)
///     .build();
/// assert!(sink.is_async());
/// ```
pub struct RecordSinkBuilder {
    min_level: LevelFilter,
    appenders: Vec<Box<dyn Appender>>,
    async_buffer: Option<usize>,
    shutdown_timeout: Duration,
}

impl RecordSinkBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LevelFilter::Info,
            appenders: Vec::new(),
            async_buffer: None,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LevelFilter) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Queue records for a worker thread instead of writing inline
    ///
    /// When the queue is full, error records are written inline and all
    /// other records are dropped and counted.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, buffer_size: usize) -> Self {
        self.async_buffer = Some(buffer_size);
        self
    }

    /// How long dropping the last handle waits for the async worker
    ///
    /// Defaults to [`DEFAULT_SHUTDOWN_TIMEOUT`]. Past it the worker is left
    /// running detached and the drop returns.
    #[must_use = "builder methods return a new value"]
    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    pub fn build(self) -> RecordSink {
        let mut core = match self.async_buffer {
            Some(size) => SinkCore::with_async(self.min_level, self.appenders, size),
            None => SinkCore::new(self.min_level, self.appenders),
        };
        core.shutdown_timeout = self.shutdown_timeout;
        RecordSink::from_core(core)
    }
}

impl Default for RecordSinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
