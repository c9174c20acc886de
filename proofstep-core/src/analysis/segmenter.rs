//! Splitting raw proof markup into ordered fragments.
//!
//! Section markers (`\textbf{...}`, `\section{...}`, ...) become standalone
//! segments; the content between them is split on blank lines and explicit
//! `\\` line breaks. Fragments still carry their markup.

use tracing::trace;

use super::lexer::{tokenize, Token, TokenKind};

/// Macro names treated as section markers by default.
pub const DEFAULT_MARKERS: &[&str] = &[
    "textbf",
    "section",
    "section*",
    "subsection",
    "subsection*",
    "subsubsection",
    "subsubsection*",
    "paragraph",
];

/// Configuration for the segmenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterConfig {
    /// Macro names (without backslash) that start a section marker
    pub markers: Vec<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl SegmenterConfig {
    /// Replace the marker set.
    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Add one marker name.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        let marker = marker.into();
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }
}

/// A raw fragment of proof markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A complete section-marker macro, braces included
    Marker(String),
    /// Ordinary content between boundaries
    Content(String),
}

impl Segment {
    /// Raw markup of the segment.
    pub fn raw(&self) -> &str {
        match self {
            Self::Marker(s) | Self::Content(s) => s,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Self::Marker(_))
    }
}

/// Splits markup into segments.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Split `input` into ordered raw segments. Never fails.
    ///
    /// Runs in one pass over the tokens. An unterminated marker is left in
    /// the surrounding content and scanning continues right after its macro.
    pub fn segment(&self, input: &str) -> Vec<Segment> {
        let tokens = tokenize(input);
        let closers = match_braces(&tokens);
        let mut segments = Vec::new();
        let mut fragment_start = 0;
        let mut i = 0;

        while let Some(token) = tokens.get(i) {
            match token.kind {
                TokenKind::LineBreak | TokenKind::BlankLine => {
                    push_content(&mut segments, &input[fragment_start..token.start]);
                    fragment_start = token.end();
                }
                TokenKind::Macro if self.opens_marker(&tokens, i) => match closers[i + 1] {
                    Some(close) => {
                        push_content(&mut segments, &input[fragment_start..token.start]);
                        let marker = &input[token.start..tokens[close].end()];
                        trace!(marker, "section marker");
                        segments.push(Segment::Marker(marker.to_string()));
                        fragment_start = tokens[close].end();
                        i = close;
                    }
                    None => trace!(macro_text = token.text, "unterminated section marker"),
                },
                _ => {}
            }
            i += 1;
        }

        push_content(&mut segments, &input[fragment_start..]);
        segments
    }

    /// A marker macro counts only when a non-empty group follows immediately.
    fn opens_marker(&self, tokens: &[Token<'_>], i: usize) -> bool {
        let named = tokens[i]
            .macro_name()
            .map(|name| self.config.markers.iter().any(|m| m == name))
            .unwrap_or(false);

        named
            && tokens.get(i + 1).map(|t| t.kind) == Some(TokenKind::OpenBrace)
            && tokens
                .get(i + 2)
                .map(|t| t.kind != TokenKind::CloseBrace)
                .unwrap_or(false)
    }
}

/// Index of the matching close brace for every open brace token.
///
/// Unmatched braces, open or close, map to `None`.
fn match_braces(tokens: &[Token<'_>]) -> Vec<Option<usize>> {
    let mut closers = vec![None; tokens.len()];
    let mut open = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::OpenBrace => open.push(i),
            TokenKind::CloseBrace => {
                if let Some(o) = open.pop() {
                    closers[o] = Some(i);
                }
            }
            _ => {}
        }
    }
    closers
}

fn push_content(segments: &mut Vec<Segment>, raw: &str) {
    if raw.trim().is_empty() {
        return;
    }
    trace!(fragment = raw, "content fragment");
    segments.push(Segment::Content(raw.to_string()));
}
