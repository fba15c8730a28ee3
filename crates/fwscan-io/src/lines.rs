//! Batched raw-line reader with an optional line cap.
//!
//! The cap is the row-limit pushdown: once reached, the reader stops issuing
//! lines so the scan never reads past what is needed. The file handle is
//! released when the reader drops, on every exit path.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug)]
pub struct LineBatchReader {
    inner: BufReader<File>,
    path: String,
    batch_size: usize,
    /// Lines still allowed out; `None` means unbounded.
    remaining: Option<u64>,
    /// Absolute index of the next line to be read.
    line_no: u64,
}

impl LineBatchReader {
    pub fn open<P: AsRef<Path>>(
        path: P,
        batch_size: usize,
        line_cap: Option<u64>,
    ) -> Result<Self> {
        let display = path.as_ref().display().to_string();
        let file = File::open(path.as_ref()).map_err(|source| Error::Source {
            path: display.clone(),
            source,
        })?;
        Ok(Self {
            inner: BufReader::new(file),
            path: display,
            batch_size: batch_size.max(1),
            remaining: line_cap,
            line_no: 0,
        })
    }

    /// Absolute index of the next line this reader would return.
    pub fn line_no(&self) -> u64 {
        self.line_no
    }

    /// Read the next batch of raw lines: up to `batch_size`, fewer near the
    /// end of the file or the cap. `None` once exhausted.
    pub fn next_batch(&mut self) -> Result<Option<Vec<String>>> {
        let mut lines = Vec::with_capacity(self.batch_size);
        let mut buf = String::new();

        while lines.len() < self.batch_size {
            if self.remaining == Some(0) {
                break;
            }

            buf.clear();
            let n = self
                .inner
                .read_line(&mut buf)
                .map_err(|source| Error::Source {
                    path: self.path.clone(),
                    source,
                })?;
            if n == 0 {
                break;
            }

            if buf.ends_with('\n') {
                buf.pop();
                if buf.ends_with('\r') {
                    buf.pop();
                }
            }
            lines.push(buf.clone());

            self.line_no += 1;
            if let Some(rem) = &mut self.remaining {
                *rem -= 1;
            }
        }

        if lines.is_empty() {
            Ok(None)
        } else {
            Ok(Some(lines))
        }
    }

    /// Pull up to `group` batches at once. An empty result means exhaustion.
    pub fn next_batches(&mut self, group: usize) -> Result<Vec<Vec<String>>> {
        let mut batches = Vec::new();
        for _ in 0..group.max(1) {
            match self.next_batch()? {
                Some(batch) => batches.push(batch),
                None => break,
            }
        }
        Ok(batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicU32, Ordering};

    static NEXT_FILE: AtomicU32 = AtomicU32::new(0);

    fn write_lines(lines: &[&str]) -> std::path::PathBuf {
        let n = NEXT_FILE.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "fwscan-io-test-{}-{}.txt",
            std::process::id(),
            n
        ));
        let mut f = File::create(&path).expect("create temp file");
        for line in lines {
            writeln!(f, "{line}").expect("write line");
        }
        path
    }

    #[test]
    fn test_batches_respect_batch_size() {
        let path = write_lines(&["a", "b", "c", "d", "e"]);
        let mut reader = LineBatchReader::open(&path, 2, None).unwrap();

        assert_eq!(reader.next_batch().unwrap().unwrap(), ["a", "b"]);
        assert_eq!(reader.next_batch().unwrap().unwrap(), ["c", "d"]);
        assert_eq!(reader.next_batch().unwrap().unwrap(), ["e"]);
        assert!(reader.next_batch().unwrap().is_none());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_line_cap_stops_reading() {
        let path = write_lines(&["a", "b", "c", "d", "e"]);
        let mut reader = LineBatchReader::open(&path, 10, Some(3)).unwrap();

        assert_eq!(reader.next_batch().unwrap().unwrap(), ["a", "b", "c"]);
        assert!(reader.next_batch().unwrap().is_none());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_next_batches_groups_pulls() {
        let path = write_lines(&["a", "b", "c", "d", "e"]);
        let mut reader = LineBatchReader::open(&path, 2, None).unwrap();

        let group = reader.next_batches(2).unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(reader.line_no(), 4);

        let rest = reader.next_batches(10).unwrap();
        assert_eq!(rest.len(), 1);
        assert!(reader.next_batches(10).unwrap().is_empty());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_crlf_lines_are_trimmed() {
        let n = NEXT_FILE.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "fwscan-io-test-crlf-{}-{}.txt",
            std::process::id(),
            n
        ));
        std::fs::write(&path, "ab\r\ncd\r\n").unwrap();

        let mut reader = LineBatchReader::open(&path, 10, None).unwrap();
        assert_eq!(reader.next_batch().unwrap().unwrap(), ["ab", "cd"]);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let err = LineBatchReader::open("/nonexistent/fwscan.txt", 1, None).unwrap_err();
        assert!(matches!(err, Error::Source { .. }));
    }
}
