//! Line sampling over partitioned files
//!
//! A file is split into byte-range partitions the way a parallel scan engine
//! would split it. A line belongs to the partition holding its first byte, so
//! the true first line always lives in partition 0 and the true last line in
//! the final partition that holds any line start. Only those partitions are
//! read; partitions in between contribute nothing to the endpoints.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::Path;

use tracing::debug;

use super::config::InferenceConfig;
use super::error::InferenceError;
use super::reader::ReadError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// First line, last line and head sample of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSample {
    /// Literal first line of the file
    pub first: String,
    /// Literal last line of the file
    pub last: String,
    /// Up to `sample_lines` lines from the start of the file
    pub head: Vec<String>,
    /// Number of partitions the file was split into
    pub partitions: usize,
}

/// Samples endpoint and head lines from a file
#[derive(Debug, Clone)]
pub struct LineSampler {
    sample_lines: usize,
    max_partition_bytes: u64,
    min_partitions: usize,
}

impl Default for LineSampler {
    fn default() -> Self {
        Self::from_config(&InferenceConfig::default())
    }
}

impl LineSampler {
    /// Create a sampler from the inference configuration
    pub fn from_config(config: &InferenceConfig) -> Self {
        Self {
            sample_lines: config.sample_lines.max(1),
            max_partition_bytes: config.max_partition_bytes.max(1),
            min_partitions: config.min_partitions.max(1),
        }
    }

    /// Split a file of `size` bytes into contiguous partitions
    ///
    /// The count is `max(min_partitions, ceil(size / max_partition_bytes))`,
    /// never more than one partition per byte.
    pub fn plan_partitions(&self, size: u64) -> Vec<Range<u64>> {
        if size == 0 {
            return Vec::new();
        }
        let by_size = size.div_ceil(self.max_partition_bytes);
        let count = by_size.max(self.min_partitions as u64).min(size);
        let chunk = size.div_ceil(count);

        (0..count)
            .map(|i| (i * chunk)..((i + 1) * chunk).min(size))
            .filter(|range| !range.is_empty())
            .collect()
    }

    /// Sample the first line, last line and head of a file
    pub fn sample(&self, path: &Path) -> Result<LineSample, InferenceError> {
        let size = std::fs::metadata(path)
            .map_err(|e| io_error(path, e))?
            .len();
        let partitions = self.plan_partitions(size);
        debug!(
            path = %path.display(),
            size,
            partitions = partitions.len(),
            "Planned sampler partitions"
        );

        let (first, last) = match partitions.as_slice() {
            [] => None,
            [only] => {
                let first = first_line_in(path, only)?;
                let last = last_line_in(path, only)?;
                first.zip(last)
            }
            [head, .., tail] => {
                let (first, last) =
                    rayon::join(|| first_line_in(path, head), || last_line_in(path, tail));
                let last = match last? {
                    Some(line) => Some(line),
                    None => last_line_before(path, &partitions[..partitions.len() - 1])?,
                };
                first?.zip(last)
            }
        }
        .ok_or_else(|| InferenceError::EmptyInput {
            path: path.to_path_buf(),
        })?;

        let head = self.head(path)?;

        Ok(LineSample {
            first,
            last,
            head,
            partitions: partitions.len(),
        })
    }

    /// Read up to `sample_lines` lines from the start of a file
    pub fn head(&self, path: &Path) -> Result<Vec<String>, InferenceError> {
        let file = File::open(path).map_err(|e| io_error(path, e))?;
        let mut reader = BufReader::new(file);
        let mut lines = Vec::with_capacity(self.sample_lines);
        let mut buf = Vec::new();

        while lines.len() < self.sample_lines {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| io_error(path, e))?;
            if read == 0 {
                break;
            }
            let bytes = if lines.is_empty() {
                strip_bom(&buf)
            } else {
                &buf[..]
            };
            lines.push(decode_line(bytes));
        }

        Ok(lines)
    }
}

/// First line starting inside `range`
fn first_line_in(path: &Path, range: &Range<u64>) -> Result<Option<String>, InferenceError> {
    let Some((mut reader, _)) = open_at_line_start(path, range)? else {
        return Ok(None);
    };
    let mut buf = Vec::new();
    reader
        .read_until(b'\n', &mut buf)
        .map_err(|e| io_error(path, e))?;
    let bytes = if range.start == 0 {
        strip_bom(&buf)
    } else {
        &buf[..]
    };
    Ok(Some(decode_line(bytes)))
}

/// Last line starting inside `range`
fn last_line_in(path: &Path, range: &Range<u64>) -> Result<Option<String>, InferenceError> {
    let Some((mut reader, mut pos)) = open_at_line_start(path, range)? else {
        return Ok(None);
    };
    let mut last: Option<Vec<u8>> = None;
    let mut buf = Vec::new();

    while pos < range.end {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| io_error(path, e))?;
        if read == 0 {
            break;
        }
        let line_start = pos;
        pos += read as u64;
        last = Some(if line_start == 0 {
            strip_bom(&buf).to_vec()
        } else {
            std::mem::take(&mut buf)
        });
    }

    Ok(last.map(|bytes| decode_line(&bytes)))
}

/// Last line of the nearest earlier partition that holds a line start
fn last_line_before(
    path: &Path,
    partitions: &[Range<u64>],
) -> Result<Option<String>, InferenceError> {
    debug!("Final partition holds no line start, walking back");
    for range in partitions.iter().rev() {
        if let Some(line) = last_line_in(path, range)? {
            return Ok(Some(line));
        }
    }
    Ok(None)
}

/// Position a reader at the first line start inside `range`
///
/// A line starts at offset 0 or right after a `\n`. Returns `None` when no
/// line starts inside the range.
fn open_at_line_start(
    path: &Path,
    range: &Range<u64>,
) -> Result<Option<(BufReader<File>, u64)>, InferenceError> {
    let mut file = File::open(path).map_err(|e| io_error(path, e))?;

    if range.start == 0 {
        return Ok(Some((BufReader::new(file), 0)));
    }

    file.seek(SeekFrom::Start(range.start - 1))
        .map_err(|e| io_error(path, e))?;
    let mut reader = BufReader::new(file);
    let mut previous = [0u8; 1];
    reader
        .read_exact(&mut previous)
        .map_err(|e| io_error(path, e))?;

    let mut pos = range.start;
    if previous[0] != b'\n' {
        let mut skipped = Vec::new();
        let read = reader
            .read_until(b'\n', &mut skipped)
            .map_err(|e| io_error(path, e))?;
        pos += read as u64;
    }

    if pos >= range.end {
        return Ok(None);
    }
    Ok(Some((reader, pos)))
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Decode a raw line, dropping its `\n` or `\r\n` terminator
fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

fn io_error(path: &Path, source: std::io::Error) -> InferenceError {
    InferenceError::Read(ReadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
