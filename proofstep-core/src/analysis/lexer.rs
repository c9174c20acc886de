//! Token stream over LaTeX-like proof markup.
//!
//! The lexer never fails: every byte of the input ends up in exactly one
//! token, so concatenating the token texts reproduces the input.

/// Kind of a markup token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Control word or control symbol, e.g. `\textbf`, `\section*`, `\%`
    Macro,
    /// Explicit line break `\\`
    LineBreak,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// Math shift `$` or `$$`
    MathShift,
    /// `%` comment up to (not including) the end of line
    Comment,
    /// Whitespace run holding two or more newlines
    BlankLine,
    /// Any other whitespace run
    Space,
    /// Run of ordinary characters
    Text,
}

/// A token borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the token in the source
    pub start: usize,
}

impl<'a> Token<'a> {
    /// Byte offset just past the token.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Macro name without the leading backslash.
    pub fn macro_name(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::Macro => Some(&self.text[1..]),
            _ => None,
        }
    }

    /// Whether this token is whitespace of any kind.
    pub fn is_space(&self) -> bool {
        matches!(self.kind, TokenKind::Space | TokenKind::BlankLine)
    }
}

fn is_special(c: char) -> bool {
    matches!(c, '\\' | '{' | '}' | '$' | '%') || c.is_whitespace()
}

/// Split markup into tokens.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let kind = match c {
            '\\' => match chars.peek().copied() {
                Some((_, '\\')) => {
                    chars.next();
                    TokenKind::LineBreak
                }
                Some((_, n)) if n.is_ascii_alphabetic() => {
                    while chars.next_if(|&(_, n)| n.is_ascii_alphabetic()).is_some() {}
                    chars.next_if(|&(_, n)| n == '*');
                    TokenKind::Macro
                }
                Some(_) => {
                    chars.next();
                    TokenKind::Macro
                }
                None => TokenKind::Text,
            },
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '$' => {
                chars.next_if(|&(_, n)| n == '$');
                TokenKind::MathShift
            }
            '%' => {
                while chars.next_if(|&(_, n)| n != '\n').is_some() {}
                TokenKind::Comment
            }
            c if c.is_whitespace() => {
                let mut newlines = usize::from(c == '\n');
                while let Some((_, n)) = chars.next_if(|&(_, n)| n.is_whitespace()) {
                    if n == '\n' {
                        newlines += 1;
                    }
                }
                if newlines >= 2 {
                    TokenKind::BlankLine
                } else {
                    TokenKind::Space
                }
            }
            _ => {
                while chars.next_if(|&(_, n)| !is_special(n)).is_some() {}
                TokenKind::Text
            }
        };

        let end = chars.peek().map(|&(i, _)| i).unwrap_or(input.len());
        tokens.push(Token {
            kind,
            text: &input[start..end],
            start,
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lossless() {
        let input = "Let $x \\in \\mathbb{R}$.\n\n% note\nThen \\\\ x^2 \\geq 0; é~ok\\";
        let joined: String = tokenize(input).iter().map(|t| t.text).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn test_macros() {
        let tokens = tokenize("\\textbf{A} \\section*{B} \\% \\,");
        let names: Vec<_> = tokens.iter().filter_map(|t| t.macro_name()).collect();
        assert_eq!(names, vec!["textbf", "section*", "%", ","]);
    }

    #[test]
    fn test_line_break_and_blank_line() {
        use TokenKind::*;
        assert_eq!(
            kinds("a\\\\b\n \n\tc\nd"),
            vec![Text, LineBreak, Text, BlankLine, Text, Space, Text]
        );
    }

    #[test]
    fn test_math_and_comment() {
        use TokenKind::*;
        assert_eq!(
            kinds("$$x$$ % hidden\ny"),
            vec![MathShift, Text, MathShift, Space, Comment, Space, Text]
        );
    }

    #[test]
    fn test_trailing_backslash_is_text() {
        let tokens = tokenize("end\\");
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Text);
        assert_eq!(tokens.last().unwrap().text, "\\");
    }

    #[test]
    fn test_offsets() {
        let tokens = tokenize("ab {c}");
        assert_eq!(tokens[2].start, 3);
        assert_eq!(tokens[2].end(), 4);
        assert_eq!(tokens.last().unwrap().end(), 6);
    }
}
