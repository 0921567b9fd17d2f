//! Synthesized positions, line table and comment groups of a restored file

use decor_syntax::ast::{Comment, CommentGroup};
use decor_syntax::{Pos, PositionFile, Token};

use crate::dst::{Decorations, NEWLINE};

/// Write head over the position space of one restored file
pub(super) struct Cursor {
    base: usize,
    offset: usize,
    /// Line start offsets relative to `base`
    lines: Vec<usize>,
    groups: Vec<CommentGroup>,
    /// Line breaks written since the last token or comment
    newlines: usize,
    /// Whether the next comment joins the last group
    group_open: bool,
    /// A `//` comment was written and no line break followed yet
    line_comment: bool,
}

impl Cursor {
    pub(super) fn new(base: usize) -> Self {
        Self {
            base,
            offset: base,
            lines: vec![0],
            groups: Vec::new(),
            newlines: 0,
            group_open: false,
            line_comment: false,
        }
    }

    pub(super) fn pos(&self) -> Pos {
        Pos::new(self.offset)
    }

    /// Write a line break
    pub(super) fn newline(&mut self) {
        self.lines.push(self.offset + 1 - self.base);
        self.offset += 1;
        self.newlines += 1;
        self.line_comment = false;
        if self.newlines >= 2 {
            self.group_open = false;
        }
    }

    /// Write line breaks until at least `count` precede the cursor
    pub(super) fn ensure(&mut self, count: usize) {
        while self.newlines < count {
            self.newline();
        }
    }

    /// Write a token and return its position
    pub(super) fn token(&mut self, token: Token) -> Pos {
        self.advance(token.as_str(), token.width())
    }

    /// Write a token that the plain tree does not record
    pub(super) fn skip(&mut self, token: Token) {
        self.token(token);
    }

    /// Write an identifier or literal and return its position
    pub(super) fn text(&mut self, text: &str) -> Pos {
        self.advance(text, text.len())
    }

    /// Reserve `length` bytes of raw source, returning the span
    pub(super) fn span(&mut self, length: usize) -> (Pos, Pos) {
        self.flush_line_comment();
        let from = self.offset;
        self.offset += length;
        self.newlines = 0;
        self.group_open = false;
        (Pos::new(from), Pos::new(self.offset))
    }

    fn advance(&mut self, text: &str, width: usize) -> Pos {
        self.flush_line_comment();
        let start = self.offset;
        self.register_lines(text, start);
        self.offset += width;
        self.newlines = 0;
        self.group_open = false;
        Pos::new(start)
    }

    /// Write a comment at the cursor
    pub(super) fn comment(&mut self, text: &str) {
        self.flush_line_comment();
        let slash = self.offset;
        let comment = Comment::new(Pos::new(slash), text);
        match self.groups.last_mut() {
            Some(group) if self.group_open => group.list.push(comment),
            _ => self.groups.push(CommentGroup {
                list: vec![comment],
            }),
        }
        self.register_lines(text, slash);
        self.offset += text.len();
        self.newlines = 0;
        self.group_open = true;
        self.line_comment = text.starts_with("//");
    }

    /// Write every entry of a decoration slot
    pub(super) fn decorations(&mut self, decorations: &Decorations) {
        for decoration in decorations {
            if decoration == NEWLINE {
                self.newline();
            } else {
                self.comment(decoration);
            }
        }
    }

    /// A line comment runs to the end of its line
    fn flush_line_comment(&mut self) {
        if self.line_comment {
            self.newline();
        }
    }

    /// Register the line breaks embedded in text written at `start`
    fn register_lines(&mut self, text: &str, start: usize) {
        for (index, _) in text.match_indices('\n') {
            self.lines.push(start + index + 1 - self.base);
        }
    }

    /// Comment groups and the line table of the written file
    pub(super) fn finish(self, name: &str) -> (Vec<CommentGroup>, PositionFile) {
        let mut file = PositionFile::new(name, self.base, self.offset - self.base);
        for line in self.lines.into_iter().skip(1) {
            file.add_line(line);
        }
        (self.groups, file)
    }
}
