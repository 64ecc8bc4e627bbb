//! Reading samples from the tail of a camera log.
//!
//! The log is appended to by another process while the viewer runs, so every
//! tick reopens the file and reads only as much of its end as it takes to find
//! the last non-blank line.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use crate::error::{CamDebugError, Result};
use crate::sample::{parse_line, CameraSample};

/// Bytes read per step when scanning backwards from the end of the file.
const CHUNK_SIZE: u64 = 4096;

/// Returns the last line of `path` that holds non-whitespace content.
///
/// Trailing whitespace (including a `\r` from CRLF endings) is stripped.
/// Returns `Ok(None)` if the file is empty or blank.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn read_last_line(path: &Path) -> Result<Option<String>> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();

    let mut end = len;
    let mut tail: Vec<u8> = Vec::new();
    while end > 0 {
        let start = end.saturating_sub(CHUNK_SIZE);
        let mut chunk = vec![0_u8; usize::try_from(end - start).unwrap_or(0)];
        file.seek(SeekFrom::Start(start))?;
        file.read_exact(&mut chunk)?;
        chunk.extend_from_slice(&tail);
        tail = chunk;
        end = start;

        if let Some(line) = last_content_line(&tail, end == 0) {
            return Ok(Some(String::from_utf8_lossy(line).trim_end().to_string()));
        }
    }
    Ok(None)
}

/// Finds the last non-blank line in `buf`.
///
/// The first segment of `buf` may be the cut-off end of an earlier line unless
/// `starts_at_file_start` is set; in that case `None` asks for more data.
fn last_content_line(buf: &[u8], starts_at_file_start: bool) -> Option<&[u8]> {
    let mut segments = buf.rsplit(|&b| b == b'\n').peekable();
    while let Some(segment) = segments.next() {
        let is_first = segments.peek().is_none();
        // Same whitespace as `parse_line`, so a blank line never reaches it
        if String::from_utf8_lossy(segment).trim().is_empty() {
            continue;
        }
        if is_first && !starts_at_file_start {
            return None;
        }
        return Some(segment);
    }
    None
}

/// Reads and parses the last line of the log.
///
/// Returns `Ok(None)` for an empty file, meaning there is nothing to update.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read and a parse error if its
/// last line is not a valid sample.
pub fn read_last_sample(path: &Path) -> Result<Option<CameraSample>> {
    match read_last_line(path)? {
        Some(line) => Ok(Some(parse_line(&line)?)),
        None => Ok(None),
    }
}

/// Fires at most once per interval.
#[derive(Debug, Clone)]
pub struct PollTimer {
    interval: Duration,
    next: Option<Instant>,
}

impl PollTimer {
    /// Creates a timer that is due immediately.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    /// Returns true if the timer is due at `now`, and if so schedules the next tick.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now < next => false,
            _ => {
                self.next = Some(now + self.interval);
                true
            }
        }
    }

    /// When the next tick is scheduled, if the timer has fired yet.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Makes the timer due on the next call to [`Self::due`].
    pub fn reset(&mut self) {
        self.next = None;
    }
}

/// Result of one poll of a [`SampleSource`].
#[derive(Debug)]
pub enum PollOutcome {
    /// The tick interval has not elapsed.
    NotDue,
    /// The file holds no lines; nothing to update.
    Empty,
    /// The file has not changed since the last sample was parsed.
    Unchanged,
    /// A fresh sample was parsed.
    Updated(CameraSample),
    /// Reading or parsing failed.
    Failed(CamDebugError),
}

/// Length and modification time of the log when it was last parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    len: u64,
    modified: Option<SystemTime>,
}

impl FileStamp {
    fn of(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self {
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

/// A camera log polled on a fixed interval.
#[derive(Debug)]
pub struct SampleSource {
    path: PathBuf,
    timer: PollTimer,
    last_error: Option<String>,
    // Set only after a successful parse
    parsed_stamp: Option<FileStamp>,
}

impl SampleSource {
    /// Creates a source for the log at `path`.
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            timer: PollTimer::new(interval),
            last_error: None,
            parsed_stamp: None,
        }
    }

    /// The log file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The poll timer.
    #[must_use]
    pub fn timer(&self) -> &PollTimer {
        &self.timer
    }

    /// Mutable access to the poll timer.
    pub fn timer_mut(&mut self) -> &mut PollTimer {
        &mut self.timer
    }

    /// The message of the most recent failure, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Reads the log if the tick interval has elapsed.
    pub fn poll(&mut self, now: Instant) -> PollOutcome {
        if !self.timer.due(now) {
            return PollOutcome::NotDue;
        }
        self.read_now()
    }

    /// Reads the log immediately, ignoring the timer.
    ///
    /// A file whose length and modification time match the last successful
    /// read is not parsed again and yields [`PollOutcome::Unchanged`].
    pub fn read_now(&mut self) -> PollOutcome {
        let stamp = match FileStamp::of(&self.path) {
            Ok(stamp) => stamp,
            Err(err) => return self.record_failure(err),
        };
        if self.parsed_stamp == Some(stamp) {
            log::trace!("{}: unchanged", self.path.display());
            return PollOutcome::Unchanged;
        }

        match read_last_sample(&self.path) {
            Ok(Some(sample)) => {
                self.parsed_stamp = Some(stamp);
                if self.last_error.take().is_some() {
                    log::info!("{}: reading samples again", self.path.display());
                }
                log::trace!("{}: {sample}", self.path.display());
                PollOutcome::Updated(sample)
            }
            Ok(None) => {
                self.parsed_stamp = None;
                self.last_error = None;
                log::trace!("{}: empty", self.path.display());
                PollOutcome::Empty
            }
            Err(err) => self.record_failure(err),
        }
    }

    fn record_failure(&mut self, err: CamDebugError) -> PollOutcome {
        self.parsed_stamp = None;
        let message = err.to_string();
        if self.last_error.as_deref() == Some(message.as_str()) {
            log::debug!("{}: {message}", self.path.display());
        } else {
            log::warn!("{}: {message}", self.path.display());
            self.last_error = Some(message);
        }
        PollOutcome::Failed(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use glam::Vec3;
    use std::io::Write;

    fn write_log(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn naive_last_line(contents: &str) -> Option<String> {
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .last()
            .map(|line| line.trim_end().to_string())
    }

    #[test]
    fn test_empty_file_yields_none() {
        let file = write_log("");
        assert!(read_last_sample(file.path()).unwrap().is_none());
    }

    #[test]
    fn test_blank_file_yields_none() {
        let file = write_log("\n  \n\t\n");
        assert!(read_last_line(file.path()).unwrap().is_none());
    }

    #[test]
    fn test_last_line_with_and_without_newline() {
        let file = write_log("a 1 1 1 b 2 2 2\nc 3 3 3 d 4 4 4\n");
        let sample = read_last_sample(file.path()).unwrap().unwrap();
        assert_eq!(sample.u, Vec3::splat(3.0));
        assert_eq!(sample.v, Vec3::splat(4.0));

        let file = write_log("a 1 1 1 b 2 2 2\nc 5 5 5 d 6 6 6");
        let sample = read_last_sample(file.path()).unwrap().unwrap();
        assert_eq!(sample.u, Vec3::splat(5.0));
        assert_eq!(sample.v, Vec3::splat(6.0));
    }

    #[test]
    fn test_trailing_blank_lines_are_skipped() {
        let file = write_log("a 1 2 3 b 4 5 6\n\n   \n");
        assert_eq!(
            read_last_line(file.path()).unwrap().as_deref(),
            Some("a 1 2 3 b 4 5 6")
        );
    }

    #[test]
    fn test_unicode_whitespace_lines_are_blank() {
        let file = write_log("a 1 2 3 b 4 5 6\n\x0B\n\u{a0}\u{2003}\n");
        assert_eq!(
            read_last_line(file.path()).unwrap().as_deref(),
            Some("a 1 2 3 b 4 5 6")
        );
        assert!(read_last_sample(file.path()).unwrap().is_some());
    }

    #[test]
    fn test_crlf_endings() {
        let file = write_log("a 0 0 0 b 0 0 0\r\na 1 2 3 b 4 5 6\r\n");
        assert_eq!(
            read_last_line(file.path()).unwrap().as_deref(),
            Some("a 1 2 3 b 4 5 6")
        );
    }

    #[test]
    fn test_matches_naive_read_across_chunk_boundaries() {
        // Lines of varying length so the chunk boundary lands mid-line,
        // on a newline, and inside a run of blank lines.
        let mut contents = String::new();
        for i in 0..2000 {
            contents.push_str(&format!("right: {i} {} {} up: 0 1 {i}\n", i * 3, -i));
            if i % 97 == 0 {
                contents.push_str("\n\n");
            }
        }
        let file = write_log(&contents);
        assert_eq!(read_last_line(file.path()).unwrap(), naive_last_line(&contents));

        let long_line = format!("x {} 1 2 y 3 4 5", "9".repeat(10_000));
        let contents = format!("a 0 0 0 b 0 0 0\n{long_line}\n{}", " ".repeat(5000));
        let file = write_log(&contents);
        assert_eq!(read_last_line(file.path()).unwrap(), naive_last_line(&contents));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_last_sample(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, CamDebugError::IoError(_)));
    }

    #[test]
    fn test_malformed_last_line_is_parse_error() {
        let file = write_log("a 1 2 3 b 4 5 6\npartial 1 2\n");
        let err = read_last_sample(file.path()).unwrap_err();
        assert!(matches!(
            err,
            CamDebugError::ParseError(ParseError::TooFewFields { found: 3 })
        ));
    }

    #[test]
    fn test_poll_timer_fires_once_per_interval() {
        let start = Instant::now();
        let mut timer = PollTimer::new(Duration::from_millis(100));

        assert!(timer.due(start));
        assert!(!timer.due(start + Duration::from_millis(50)));
        assert!(timer.due(start + Duration::from_millis(100)));
        assert!(!timer.due(start + Duration::from_millis(150)));
        assert_eq!(
            timer.next_deadline(),
            Some(start + Duration::from_millis(200))
        );

        timer.reset();
        assert!(timer.due(start + Duration::from_millis(160)));
    }

    #[test]
    fn test_source_poll_outcomes() {
        let mut file = write_log("");
        let mut source = SampleSource::new(file.path(), Duration::from_secs(60));
        let now = Instant::now();

        assert!(matches!(source.poll(now), PollOutcome::Empty));
        assert!(matches!(source.poll(now), PollOutcome::NotDue));

        file.write_all(b"a 1 2\n").unwrap();
        file.flush().unwrap();
        assert!(matches!(source.read_now(), PollOutcome::Failed(_)));
        assert!(source.last_error().is_some());

        file.write_all(b"a 1 2 3 b 4 5 6\n").unwrap();
        file.flush().unwrap();
        match source.read_now() {
            PollOutcome::Updated(sample) => {
                assert_eq!(sample.u, Vec3::new(1.0, 2.0, 3.0));
                assert_eq!(sample.v, Vec3::new(4.0, 5.0, 6.0));
            }
            other => panic!("expected an update, got {other:?}"),
        }
        assert!(source.last_error().is_none());
    }

    #[test]
    fn test_unchanged_file_is_not_parsed_again() {
        let mut file = write_log("right: 1 0 0 up: 0 1 0\n");
        let mut source = SampleSource::new(file.path(), Duration::from_secs(60));

        assert!(matches!(source.read_now(), PollOutcome::Updated(_)));
        for _ in 0..4 {
            assert!(matches!(source.read_now(), PollOutcome::Unchanged));
        }

        // Appending the same line still changes the file
        file.write_all(b"right: 1 0 0 up: 0 1 0\n").unwrap();
        file.flush().unwrap();
        assert!(matches!(source.read_now(), PollOutcome::Updated(_)));
        assert!(matches!(source.read_now(), PollOutcome::Unchanged));
    }

    #[test]
    fn test_failure_is_reported_until_the_file_changes() {
        let mut file = write_log("a 1 2\n");
        let mut source = SampleSource::new(file.path(), Duration::from_secs(60));

        assert!(matches!(source.read_now(), PollOutcome::Failed(_)));
        assert!(matches!(source.read_now(), PollOutcome::Failed(_)));

        file.write_all(b"a 1 2 3 b 4 5 6\n").unwrap();
        file.flush().unwrap();
        assert!(matches!(source.read_now(), PollOutcome::Updated(_)));
    }
}
