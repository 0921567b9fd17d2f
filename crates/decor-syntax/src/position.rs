//! Offset and line bookkeeping for source files
//!
//! A [`FileSet`] hands out disjoint position ranges to the files it holds.
//! Every [`File`] records its base, its size and the offsets at which its
//! lines start, which is enough to translate a [`Pos`] into a
//! line/column [`Position`].

use std::fmt;

use thiserror::Error;

use crate::token::Pos;

/// Errors raised by position lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("position {pos} outside file '{file}' (base {base}, size {size})")]
    OutOfFile {
        file: String,
        pos: usize,
        base: usize,
        size: usize,
    },

    #[error("base {base} below the next free base {next}")]
    InvalidBase { base: usize, next: usize },
}

/// A resolved source location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Position {
    pub filename: String,
    /// Byte offset, starting at 0
    pub offset: usize,
    /// Line number, starting at 1
    pub line: usize,
    /// Column number in bytes, starting at 1
    pub column: usize,
}

impl Position {
    pub fn is_valid(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str(if self.filename.is_empty() { "-" } else { &self.filename });
        }
        if self.filename.is_empty() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "{}:{}:{}", self.filename, self.line, self.column)
        }
    }
}

/// Line table of a single source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    name: String,
    base: usize,
    size: usize,
    /// Offsets of the first byte of every line; `lines[0]` is always 0
    lines: Vec<usize>,
}

impl File {
    /// Create a file with a single line
    pub fn new(name: impl Into<String>, base: usize, size: usize) -> Self {
        Self {
            name: name.into(),
            base,
            size,
            lines: vec![0],
        }
    }

    /// Create a file whose line table is computed from `source`
    pub fn from_source(name: impl Into<String>, base: usize, source: &str) -> Self {
        let mut file = Self::new(name, base, source.len());
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                file.add_line(offset + 1);
            }
        }
        file
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line start offsets
    pub fn lines(&self) -> &[usize] {
        &self.lines
    }

    /// Record a new line starting at `offset`
    ///
    /// Offsets that do not strictly increase the table, or that fall at or
    /// beyond the end of the file, are ignored.
    pub fn add_line(&mut self, offset: usize) {
        let last = self.lines.last().copied().unwrap_or(0);
        if (self.lines.is_empty() || last < offset) && offset < self.size {
            self.lines.push(offset);
        }
    }

    /// Replace the whole line table
    ///
    /// Returns false and leaves the table unchanged when `lines` is not
    /// strictly increasing or exceeds the file size.
    pub fn set_lines(&mut self, lines: Vec<usize>) -> bool {
        let increasing = lines.windows(2).all(|pair| pair[0] < pair[1]);
        let in_range = lines.last().is_none_or(|&last| last < self.size.max(1));
        if !increasing || !in_range {
            return false;
        }
        self.lines = lines;
        true
    }

    /// Whether `pos` belongs to this file (the end-of-file position included)
    pub fn contains(&self, pos: Pos) -> bool {
        pos.is_valid() && pos.get() >= self.base && pos.get() <= self.base + self.size
    }

    /// File offset of `pos`
    pub fn offset(&self, pos: Pos) -> Result<usize, PositionError> {
        if !self.contains(pos) {
            return Err(PositionError::OutOfFile {
                file: self.name.clone(),
                pos: pos.get(),
                base: self.base,
                size: self.size,
            });
        }
        Ok(pos.get() - self.base)
    }

    /// Position for a file offset, clamped to the end of the file
    pub fn pos(&self, offset: usize) -> Pos {
        Pos::new(self.base + offset.min(self.size))
    }

    /// Line number of `pos`, 0 when out of range
    pub fn line(&self, pos: Pos) -> usize {
        self.position(pos).line
    }

    /// Line start position for a 1-based line number
    pub fn line_start(&self, line: usize) -> Option<Pos> {
        if line == 0 {
            return None;
        }
        self.lines.get(line - 1).map(|&offset| self.pos(offset))
    }

    /// Resolve `pos` into a line/column position
    pub fn position(&self, pos: Pos) -> Position {
        let Ok(offset) = self.offset(pos) else {
            return Position::default();
        };
        let index = match self.lines.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index.saturating_sub(1),
        };
        Position {
            filename: self.name.clone(),
            offset,
            line: index + 1,
            column: offset - self.lines[index] + 1,
        }
    }
}

/// A set of source files sharing one position space
#[derive(Debug, Clone)]
pub struct FileSet {
    base: usize,
    files: Vec<File>,
}

impl Default for FileSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSet {
    /// An empty set; the first file starts at base 1
    pub fn new() -> Self {
        Self {
            base: 1,
            files: Vec::new(),
        }
    }

    /// Next free base
    pub fn base(&self) -> usize {
        self.base
    }

    /// Allocate a new file of `size` bytes at the next free base
    pub fn add_file(&mut self, name: impl Into<String>, size: usize) -> &mut File {
        let file = File::new(name, self.base, size);
        self.push(file)
    }

    /// Add an already built file
    ///
    /// The file's base must not overlap with files already in the set.
    pub fn add(&mut self, file: File) -> Result<&mut File, PositionError> {
        if file.base < self.base {
            return Err(PositionError::InvalidBase {
                base: file.base,
                next: self.base,
            });
        }
        Ok(self.push(file))
    }

    fn push(&mut self, file: File) -> &mut File {
        self.base = file.base + file.size + 1;
        self.files.push(file);
        let last = self.files.len() - 1;
        &mut self.files[last]
    }

    /// File containing `pos`
    pub fn file(&self, pos: Pos) -> Option<&File> {
        self.files.iter().find(|file| file.contains(pos))
    }

    /// File registered under `name`, most recent first
    pub fn file_by_name(&self, name: &str) -> Option<&File> {
        self.files.iter().rev().find(|file| file.name == name)
    }

    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.iter()
    }

    /// Resolve `pos` against whichever file contains it
    pub fn position(&self, pos: Pos) -> Position {
        self.file(pos)
            .map(|file| file.position(pos))
            .unwrap_or_default()
    }
}
