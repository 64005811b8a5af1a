//! The streaming, character-driven Luco parser.
//!
//! The parser is stack-driven rather than recursive-descent: Luco delays the
//! object-vs-array decision past the opening bracket (`key {` can open
//! either, depending on what follows), so a [`Context`] stack carries the
//! open syntactic constructs and a `{` first lands as a
//! [`Context::TransientBracket`] until the next significant character
//! resolves it.
//!
//! Each input character is offered to the handlers in a fixed order —
//! comment, key, value, opening bracket, closing bracket — and whatever none
//! of them consume falls through to the syntax-error check. Keys and values
//! share one string state machine ([`StringState`]) covering unquoted text,
//! both quote styles, doubled-character escapes, and backslash line
//! continuation.
//!
//! ## Examples
//!
//! ```rust
//! use luco::parse;
//!
//! let doc = parse("name = \"cat\"\nage = 5\nsmol = true\n").unwrap();
//! assert_eq!(doc.at("name").as_str(), "cat");
//! assert_eq!(doc.at("age").as_integer(), 5);
//! assert!(doc.at("smol").as_boolean());
//! ```

use crate::error::{Error, Result};
use crate::infer::infer;
use crate::node::{Node, NodeKind};
use crate::scalar::Scalar;
use std::path::Path;

/// Characters escapable by doubling.
pub(crate) const SPECIALS: [char; 6] = ['{', '=', '}', '"', '\'', '\\'];

/// Syntactic contexts held on the parse stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Context {
    /// An open object; the root sits at the bottom of the stack.
    Object,
    /// An open array.
    Array,
    /// A key being accumulated.
    Key,
    /// A key was closed by `=`; a value must follow.
    EqualSign,
    /// A value being accumulated.
    Value,
    /// A key was closed by `{`; the bracket is not yet classified.
    OpeningBracket,
    /// A `{` whose container kind (object vs array) is still undecided.
    TransientBracket,
    /// An array was just opened with a lexeme pending as its first element.
    FlushValue,
    /// A `#` line comment.
    Comment,
    /// A `#{ … }` block comment, nestable by brace depth.
    NestedComment,
}

/// States of the string accumulation machine, shared by keys and values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum StringState {
    #[default]
    None,
    Unquoted,
    Quoted1,
    Quoted2,
    EscNewlineUnquoted,
    EscNewlineQuoted1,
    EscNewlineQuoted2,
    EndQuoted1,
    EndQuoted2,
    EndUnquoted,
}

impl StringState {
    /// The string has reached its end; further characters are not part of it.
    fn is_end(self) -> bool {
        matches!(
            self,
            StringState::EndQuoted1 | StringState::EndQuoted2 | StringState::EndUnquoted
        )
    }

    /// A backslash continuation is pending; the string resumes on the next
    /// line.
    fn is_multiline(self) -> bool {
        matches!(
            self,
            StringState::EscNewlineUnquoted
                | StringState::EscNewlineQuoted1
                | StringState::EscNewlineQuoted2
        )
    }

    /// Inside an open quoted region, where structural characters are literal.
    fn in_quotes(self) -> bool {
        matches!(
            self,
            StringState::Quoted1
                | StringState::Quoted2
                | StringState::EscNewlineQuoted1
                | StringState::EscNewlineQuoted2
        )
    }

    /// The lexeme was explicitly quoted, so type inference is bypassed.
    fn was_quoted(self) -> bool {
        matches!(self, StringState::EndQuoted1 | StringState::EndQuoted2)
    }
}

/// Classification of the current character by the escape tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Escape {
    /// Not part of a doubled pair; structural meaning applies.
    None,
    /// First of a doubled pair; skipped.
    First,
    /// Second of a doubled pair; appended as one literal.
    Second,
}

/// Tracks doubled-character escapes.
///
/// The candidate remembers the character and its absolute position; only the
/// immediately adjacent second occurrence confirms the escape, so a bare
/// quote still terminates a string even when the same character appeared
/// once earlier at a non-adjacent position.
#[derive(Debug, Default)]
struct EscapeTracker {
    candidate: Option<(char, usize, usize)>,
}

impl EscapeTracker {
    fn advance(&mut self, ch: char, line: usize, col: usize, next: Option<char>) -> Escape {
        if SPECIALS.contains(&ch) {
            if let Some((c, l, i)) = self.candidate {
                if c == ch && l == line && i + 1 == col {
                    self.candidate = None;
                    return Escape::Second;
                }
            }
            if next == Some(ch) {
                self.candidate = Some((ch, line, col));
                return Escape::First;
            }
        }
        self.candidate = None;
        Escape::None
    }
}

/// Advances the string machine for one character.
///
/// Returns `true` when the character belongs to the string; the caller
/// appends it unless the state has reached an end. `continuation` is true
/// for an unescaped backslash followed only by blanks up to the newline.
fn string_step(state: &mut StringState, ch: char, esc: Escape, continuation: bool) -> bool {
    use StringState::*;

    let blank = matches!(ch, ' ' | '\t' | '\n');
    if blank && (*state == None || state.is_multiline()) {
        return false;
    }
    match esc {
        Escape::First => return false,
        Escape::Second => {
            if *state == None {
                *state = Unquoted;
            }
            return true;
        }
        Escape::None => {}
    }
    if ch == '\\' && continuation {
        *state = match *state {
            Quoted1 | EndQuoted1 | EscNewlineQuoted1 => EscNewlineQuoted1,
            Quoted2 | EndQuoted2 | EscNewlineQuoted2 => EscNewlineQuoted2,
            _ => EscNewlineUnquoted,
        };
        return false;
    }
    match *state {
        EscNewlineQuoted1 => {
            if ch == '\'' {
                *state = Quoted1;
            }
            return false;
        }
        EscNewlineQuoted2 => {
            if ch == '"' {
                *state = Quoted2;
            }
            return false;
        }
        EscNewlineUnquoted => {
            *state = Unquoted;
            return true;
        }
        _ => {}
    }
    // plain appends; structural characters fall through
    match *state {
        Unquoted if !matches!(ch, '\n' | '{' | '}') => return true,
        Quoted1 if ch != '\'' => return true,
        Quoted2 if ch != '"' => return true,
        _ => {}
    }
    match *state {
        None => {
            if ch == '\'' {
                *state = Quoted1;
            } else if ch == '"' {
                *state = Quoted2;
            } else if !matches!(ch, '{' | '}') {
                *state = Unquoted;
                return true;
            }
            false
        }
        EndQuoted1 | EndQuoted2 => false,
        Quoted1 => {
            *state = EndQuoted1;
            true
        }
        Quoted2 => {
            *state = EndQuoted2;
            true
        }
        Unquoted if ch == '\n' => {
            *state = EndUnquoted;
            true
        }
        _ => false,
    }
}

/// How a finished container attaches to its parent.
#[derive(Debug)]
enum Attach {
    Key(String),
    Element,
}

/// A container under construction.
#[derive(Debug)]
struct Frame {
    node: Node,
    attach: Attach,
}

/// All mutable state of one parse run.
struct ParseState {
    line: Vec<char>,
    i: usize,
    line_number: usize,
    /// Reprocess the current character after a context change.
    replay: bool,
    keys: Vec<(String, StringState)>,
    raw_value: (String, StringState),
    escape: EscapeTracker,
    /// Escape classification of the current character.
    esc: Escape,
    hierarchy: Vec<(Context, (usize, usize))>,
    frames: Vec<Frame>,
    comment_depth: usize,
}

impl ParseState {
    fn new() -> Self {
        ParseState {
            line: Vec::new(),
            i: 0,
            line_number: 1,
            replay: false,
            keys: vec![(String::new(), StringState::None)],
            raw_value: (String::new(), StringState::None),
            escape: EscapeTracker::default(),
            esc: Escape::None,
            hierarchy: vec![(Context::Object, (1, 0))],
            frames: vec![Frame {
                node: Node::empty(NodeKind::Object),
                attach: Attach::Element,
            }],
            comment_depth: 0,
        }
    }

    fn ch(&self) -> char {
        self.line[self.i]
    }

    fn top(&self) -> Option<Context> {
        self.hierarchy.last().map(|f| f.0)
    }

    fn push_ctx(&mut self, ctx: Context) {
        self.hierarchy.push((ctx, (self.line_number, self.i)));
    }

    fn pop_ctx(&mut self) {
        self.hierarchy.pop();
    }

    /// Current char has no structural meaning when it is part of an escape
    /// pair.
    fn structural(&self, ch: char) -> bool {
        self.ch() == ch && self.esc == Escape::None
    }

    fn error(&self, msg: impl Into<String>) -> Error {
        let text: String = self.line.iter().collect();
        Error::parsing(self.line_number, self.i + 1, &text, msg)
    }

    /// An unescaped backslash followed only by blanks up to the newline
    /// continues the string on the next line.
    fn is_continuation(&self) -> bool {
        self.ch() == '\\'
            && self.esc == Escape::None
            && self.line[self.i + 1..]
                .iter()
                .all(|c| matches!(c, ' ' | '\t' | '\n'))
    }

    /// True while the cursor sits inside an open quoted region, where `#`
    /// and the structural characters are literal.
    fn in_quoted_string(&self) -> bool {
        let state = match self.top() {
            Some(Context::Key) => self.keys.last().map(|k| k.1),
            Some(Context::Value | Context::TransientBracket) => Some(self.raw_value.1),
            _ => Option::None,
        };
        state.is_some_and(StringState::in_quotes)
    }

    fn feed_line(&mut self, text: &str) -> Result<()> {
        self.line = text.chars().collect();
        if self.line.last() != Some(&'\n') {
            // last line of the input; flush pending state as if a newline
            // had been seen
            self.line.push('\n');
        }
        self.i = 0;
        while self.i < self.line.len() {
            self.step()?;
            if self.replay {
                self.replay = false;
            } else {
                self.i += 1;
            }
        }
        self.line_number += 1;
        Ok(())
    }

    fn step(&mut self) -> Result<()> {
        self.esc = self.escape.advance(
            self.ch(),
            self.line_number,
            self.i,
            self.line.get(self.i + 1).copied(),
        );
        if self.handle_comment()? {
            return Ok(());
        }
        if self.handle_key()? {
            return Ok(());
        }
        if self.handle_value()? {
            return Ok(());
        }
        if self.handle_opening_bracket()? {
            return Ok(());
        }
        if self.handle_closing_bracket()? {
            return Ok(());
        }
        self.check_syntax_error()
    }

    fn handle_comment(&mut self) -> Result<bool> {
        let ch = self.ch();
        match self.top() {
            Some(Context::Comment) => {
                if ch == '\n' {
                    // the newline belongs to the enclosing context
                    self.replay = true;
                    self.pop_ctx();
                    return Ok(true);
                }
                if ch == '{' {
                    // `#{` upgrades to a block comment; only when the brace
                    // immediately follows the opening hash
                    let (line, col) = self.hierarchy.last().map(|f| f.1).unwrap_or((0, 0));
                    if line == self.line_number && col + 1 == self.i {
                        self.pop_ctx();
                        self.push_ctx(Context::NestedComment);
                        self.comment_depth = 0;
                    }
                }
                Ok(true)
            }
            Some(Context::NestedComment) => {
                if ch == '{' {
                    self.comment_depth += 1;
                } else if ch == '}' {
                    if self.comment_depth == 0 {
                        self.pop_ctx();
                    } else {
                        self.comment_depth -= 1;
                    }
                }
                Ok(true)
            }
            _ => {
                if ch == '#' && !self.in_quoted_string() {
                    self.push_ctx(Context::Comment);
                    return Ok(true);
                }
                Ok(false)
            }
        }
    }

    fn handle_key(&mut self) -> Result<bool> {
        let ch = self.ch();
        let key_state = self.keys.last().map(|k| k.1).unwrap_or_default();

        if self.top() == Some(Context::Object)
            && !matches!(ch, '\n' | '\t' | ' ')
            && !(matches!(ch, '{' | '}') && self.esc == Escape::None)
        {
            self.push_ctx(Context::Key);
            self.keys.push((String::new(), StringState::None));
        } else if self.top() == Some(Context::Key)
            && matches!(ch, '=' | '{')
            && self.esc == Escape::None
            && !key_state.is_multiline()
            && !key_state.in_quotes()
        {
            self.pop_ctx();
            self.push_ctx(if ch == '=' {
                Context::EqualSign
            } else {
                Context::OpeningBracket
            });
            return Ok(true);
        }

        if self.top() == Some(Context::Key) {
            let continuation = self.is_continuation();
            let esc = self.esc;
            if let Some((key, state)) = self.keys.last_mut() {
                if string_step(state, ch, esc, continuation) {
                    if !state.is_end() {
                        key.push(ch);
                    }
                    return Ok(true);
                }
            }
            return Ok(false);
        }
        Ok(false)
    }

    fn handle_value(&mut self) -> Result<bool> {
        let ch = self.ch();
        let top = self.top();

        let starts = matches!(top, Some(Context::EqualSign | Context::Array))
            && !matches!(ch, '\n' | '\t' | ' ')
            && !self.structural('}');
        let ends = (top == Some(Context::Value) && ch == '\n')
            || top == Some(Context::FlushValue);

        if starts {
            if top == Some(Context::EqualSign) {
                self.pop_ctx();
            }
            self.push_ctx(Context::Value);
        } else if ends && !self.raw_value.1.is_multiline() {
            if top == Some(Context::FlushValue) {
                self.replay = true;
            }
            self.commit_value()?;
            self.pop_ctx();
            return Ok(true);
        }

        if self.top() == Some(Context::Value) {
            let continuation = self.is_continuation();
            let esc = self.esc;
            if string_step(&mut self.raw_value.1, ch, esc, continuation) {
                if ch == '=' && esc == Escape::None && self.raw_value.1 == StringState::Unquoted {
                    // an unescaped '=' cannot appear in an unquoted value
                    self.raw_value.1 = StringState::EndUnquoted;
                    return Ok(false);
                }
                if !self.raw_value.1.is_end() {
                    self.raw_value.0.push(ch);
                }
                return Ok(true);
            }
            if self.structural('{') {
                // `value {` commits the pending lexeme, then the bracket
                // opens a yet-unclassified container
                self.pop_ctx();
                if self.raw_value.1 != StringState::None {
                    self.commit_value()?;
                }
                self.push_ctx(Context::TransientBracket);
                return Ok(true);
            }
            return Ok(false);
        }
        Ok(false)
    }

    fn handle_opening_bracket(&mut self) -> Result<bool> {
        let ch = self.ch();

        if self.top() == Some(Context::OpeningBracket) {
            self.pop_ctx();
            self.push_ctx(Context::TransientBracket);
        } else if self.transient_resolvable() {
            return self.resolve_transient().map(|()| true);
        }

        if self.top() == Some(Context::TransientBracket) {
            if self.raw_value.1 == StringState::None && ch == '\n' {
                return Ok(true);
            }
            let continuation = self.is_continuation();
            let esc = self.esc;
            if string_step(&mut self.raw_value.1, ch, esc, continuation) {
                if !self.raw_value.1.is_end() {
                    self.raw_value.0.push(ch);
                }
                return Ok(true);
            }
            return Ok(false);
        }
        Ok(false)
    }

    /// A transient bracket resolves on `=`, `{`, or a newline once a lexeme
    /// has started; a bare `{` with no lexeme resolves immediately.
    fn transient_resolvable(&self) -> bool {
        if self.top() != Some(Context::TransientBracket) {
            return false;
        }
        let ch = self.ch();
        if self.raw_value.1 == StringState::None && !self.structural('{') {
            return false;
        }
        if self.raw_value.1.in_quotes() {
            return ch == '\n';
        }
        ch == '\n' || (matches!(ch, '=' | '{') && self.esc == Escape::None)
    }

    fn resolve_transient(&mut self) -> Result<()> {
        let ch = self.ch();
        self.pop_ctx();
        if let Some((key, state)) = self.keys.last_mut() {
            if *state == StringState::Unquoted {
                strip_trailing_blanks(key);
            }
        }

        if ch == '=' {
            // `key { subkey = …` — the lexeme was the first subkey of an
            // object
            self.push_ctx(Context::Object);
            self.push_ctx(Context::EqualSign);
            self.open_container(NodeKind::Object);
            self.keys.push(std::mem::take(&mut self.raw_value));
        } else if ch == '{' && self.raw_value.1 != StringState::None {
            // `key { subkey { …` — likewise, with a nested bracket next
            self.push_ctx(Context::Object);
            self.push_ctx(Context::OpeningBracket);
            self.open_container(NodeKind::Object);
            self.keys.push(std::mem::take(&mut self.raw_value));
        } else if ch == '\n' {
            // a lexeme ended by newline makes this an array; the lexeme is
            // flushed as its first element
            self.push_ctx(Context::Array);
            self.push_ctx(Context::FlushValue);
            self.open_container(NodeKind::Array);
        } else if ch == '{' {
            // a bare `{` as the first element makes this an array of
            // containers
            self.push_ctx(Context::Array);
            self.open_container(NodeKind::Array);
            self.push_ctx(Context::TransientBracket);
        } else {
            return Err(self.error(format!("expected '{{' or '=' encountered: '{ch}'")));
        }
        Ok(())
    }

    fn handle_closing_bracket(&mut self) -> Result<bool> {
        if !self.structural('}') {
            return Ok(false);
        }
        match self.top() {
            Some(Context::Object | Context::Array) => {
                if let Some(frame) = self.keys.last_mut() {
                    frame.0.clear();
                    frame.1 = StringState::None;
                }
                self.pop_ctx();
                if self.hierarchy.is_empty() {
                    return Err(self.error("the number of '}' is more than the number of '{'"));
                }
                if self.top() == Some(Context::Object) {
                    self.keys.pop();
                }
                self.attach_top_frame()?;
                Ok(true)
            }
            Some(Context::TransientBracket) if self.raw_value.1 == StringState::None => {
                // `key {}` — an empty bracket pair is an empty object
                self.pop_ctx();
                if let Some((key, state)) = self.keys.last_mut() {
                    if *state == StringState::Unquoted {
                        strip_trailing_blanks(key);
                    }
                }
                let key = self.keys.last().map(|k| k.0.clone()).unwrap_or_default();
                let parent = &mut self.frames.last_mut().expect("root frame").node;
                if parent.is_object() {
                    parent.insert(key, Node::empty(NodeKind::Object))?;
                } else {
                    parent.push_back(Node::empty(NodeKind::Object))?;
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn check_syntax_error(&self) -> Result<()> {
        let ch = self.ch();
        if matches!(ch, ' ' | '\t' | '\n') {
            return Ok(());
        }
        let raw_state = self.raw_value.1;
        if raw_state == StringState::EscNewlineQuoted1 && ch != '\\' {
            return Err(self.error(format!(
                "expected '\'' to resume the continued string but found '{ch}'"
            )));
        }
        if raw_state == StringState::EscNewlineQuoted2 && ch != '\\' {
            return Err(self.error(format!(
                "expected '\"' to resume the continued string but found '{ch}'"
            )));
        }
        if raw_state.is_end() && matches!(self.top(), Some(Context::Value)) {
            return Err(self.error(format!(
                "expected a new line after the value but found '{ch}'"
            )));
        }
        if self.keys.last().is_some_and(|k| k.1.is_end()) && self.top() == Some(Context::Key) {
            return Err(self.error(format!(
                "expected '=' or '{{' after the key but found '{ch}'"
            )));
        }
        if self.top() == Some(Context::Object) && self.structural('{') {
            return Err(self.error("expected a key but found '{'"));
        }
        if self.structural('}') {
            return Err(self.error("found '}' without being in an object or array"));
        }
        Ok(())
    }

    /// Flushes the accumulated lexeme into the current container.
    fn commit_value(&mut self) -> Result<()> {
        let (mut raw, state) = std::mem::take(&mut self.raw_value);
        if state.in_quotes() {
            return Err(self.error("expected the closing quote before the end of the line"));
        }
        let scalar = if state.was_quoted() {
            Scalar::String(raw)
        } else {
            strip_trailing_blanks(&mut raw);
            infer(&raw)
        };

        let parent_is_object = self
            .frames
            .last()
            .map(|f| f.node.is_object())
            .unwrap_or(false);
        if parent_is_object {
            let (mut key, key_state) = self.keys.pop().unwrap_or_default();
            if key_state == StringState::Unquoted {
                strip_trailing_blanks(&mut key);
            }
            self.frames
                .last_mut()
                .expect("root frame")
                .node
                .insert(key, Node::Value(scalar))?;
        } else {
            self.frames
                .last_mut()
                .expect("root frame")
                .node
                .push_back(Node::Value(scalar))?;
        }
        Ok(())
    }

    /// Opens a child container, remembering how it will attach to its
    /// parent once closed.
    fn open_container(&mut self, kind: NodeKind) {
        let parent_is_object = self
            .frames
            .last()
            .map(|f| f.node.is_object())
            .unwrap_or(false);
        let attach = if parent_is_object {
            Attach::Key(self.keys.last().map(|k| k.0.clone()).unwrap_or_default())
        } else {
            Attach::Element
        };
        self.frames.push(Frame {
            node: Node::empty(kind),
            attach,
        });
    }

    /// Pops the finished container and links it into its parent. Duplicate
    /// keys overwrite, matching scalar commits.
    fn attach_top_frame(&mut self) -> Result<()> {
        let frame = match self.frames.pop() {
            Some(frame) if !self.frames.is_empty() => frame,
            _ => return Err(self.error("found '}' without being in an object or array")),
        };
        let parent = &mut self.frames.last_mut().expect("parent frame").node;
        match frame.attach {
            Attach::Key(key) => {
                parent.insert(key, frame.node)?;
            }
            Attach::Element => {
                parent.push_back(frame.node)?;
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Node> {
        match self.hierarchy.as_slice() {
            [(Context::Object, _)] => {}
            rest => {
                let (ctx, (line, col)) = rest.last().copied().unwrap_or((
                    Context::Object,
                    (self.line_number, self.i),
                ));
                let text: String = self.line.iter().collect();
                let msg = match ctx {
                    Context::NestedComment => {
                        "a non-ending nested comment was encountered".to_string()
                    }
                    Context::Value | Context::FlushValue | Context::EqualSign => {
                        if self.raw_value.1.is_multiline() {
                            "expected a string on the new line but reached end of input"
                                .to_string()
                        } else {
                            "expected a value before end of input".to_string()
                        }
                    }
                    Context::Key => "expected '=' or '{' after the key".to_string(),
                    _ => "expected '}' before end of input".to_string(),
                };
                return Err(Error::parsing(line, col + 1, &text, msg));
            }
        }
        let root = self.frames.pop().map(|f| f.node).unwrap_or_default();
        Ok(root)
    }
}

fn strip_trailing_blanks(s: &mut String) {
    while s.ends_with(' ') || s.ends_with('\t') {
        s.pop();
    }
}

/// Parses Luco text into a document tree.
///
/// The root of every document is an object; an empty or comment-only input
/// yields an empty object. Parsing aborts at the first structural mismatch
/// with an [`Error::Parsing`] locating the offending character.
///
/// # Examples
///
/// ```rust
/// use luco::parse;
///
/// let doc = parse("array {\n    1\n    2\n}\n").unwrap();
/// assert_eq!(doc.at("array").as_array().len(), 2);
/// ```
///
/// # Errors
///
/// [`Error::Parsing`] on malformed input.
pub fn parse(input: &str) -> Result<Node> {
    let mut data = ParseState::new();
    for line in input.split_inclusive('\n') {
        data.feed_line(line)?;
    }
    data.finish()
}

/// Reads a file and parses its contents as Luco.
///
/// The file is opened for the duration of this call only.
///
/// # Errors
///
/// [`Error::Filesystem`] when the file cannot be read, carrying the
/// underlying OS message; otherwise as [`parse`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<Node> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::filesystem(format!("couldn't open '{}', {}", path.display(), e)))?;
    parse(&text)
}
