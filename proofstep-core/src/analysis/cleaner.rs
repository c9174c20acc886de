//! Rendering markup fragments to single-line prose.
//!
//! Math delimiters and group braces vanish, known macros become their
//! Unicode or plain-text equivalents, and whitespace collapses to single
//! spaces. Unknown macros are kept verbatim, backslash included.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::lexer::{tokenize, Token, TokenKind};

static SYMBOLS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        // Greek
        ("alpha", "α"),
        ("beta", "β"),
        ("gamma", "γ"),
        ("delta", "δ"),
        ("epsilon", "ϵ"),
        ("varepsilon", "ε"),
        ("zeta", "ζ"),
        ("eta", "η"),
        ("theta", "θ"),
        ("vartheta", "ϑ"),
        ("iota", "ι"),
        ("kappa", "κ"),
        ("lambda", "λ"),
        ("mu", "μ"),
        ("nu", "ν"),
        ("xi", "ξ"),
        ("pi", "π"),
        ("varpi", "ϖ"),
        ("rho", "ρ"),
        ("varrho", "ϱ"),
        ("sigma", "σ"),
        ("varsigma", "ς"),
        ("tau", "τ"),
        ("upsilon", "υ"),
        ("phi", "ϕ"),
        ("varphi", "φ"),
        ("chi", "χ"),
        ("psi", "ψ"),
        ("omega", "ω"),
        ("Gamma", "Γ"),
        ("Delta", "Δ"),
        ("Theta", "Θ"),
        ("Lambda", "Λ"),
        ("Xi", "Ξ"),
        ("Pi", "Π"),
        ("Sigma", "Σ"),
        ("Upsilon", "Υ"),
        ("Phi", "Φ"),
        ("Psi", "Ψ"),
        ("Omega", "Ω"),
        // Relations
        ("le", "≤"),
        ("leq", "≤"),
        ("ge", "≥"),
        ("geq", "≥"),
        ("ne", "≠"),
        ("neq", "≠"),
        ("approx", "≈"),
        ("equiv", "≡"),
        ("sim", "∼"),
        ("simeq", "≃"),
        ("cong", "≅"),
        ("propto", "∝"),
        ("ll", "≪"),
        ("gg", "≫"),
        ("mid", "∣"),
        ("parallel", "∥"),
        ("perp", "⊥"),
        // Sets
        ("in", "∈"),
        ("notin", "∉"),
        ("ni", "∋"),
        ("subset", "⊂"),
        ("subseteq", "⊆"),
        ("supset", "⊃"),
        ("supseteq", "⊇"),
        ("cup", "∪"),
        ("cap", "∩"),
        ("setminus", "∖"),
        ("emptyset", "∅"),
        ("varnothing", "∅"),
        // Logic and arrows
        ("forall", "∀"),
        ("exists", "∃"),
        ("nexists", "∄"),
        ("neg", "¬"),
        ("lnot", "¬"),
        ("land", "∧"),
        ("wedge", "∧"),
        ("lor", "∨"),
        ("vee", "∨"),
        ("implies", "⇒"),
        ("impliedby", "⇐"),
        ("iff", "⇔"),
        ("Rightarrow", "⇒"),
        ("Leftarrow", "⇐"),
        ("Leftrightarrow", "⇔"),
        ("rightarrow", "→"),
        ("to", "→"),
        ("leftarrow", "←"),
        ("gets", "←"),
        ("leftrightarrow", "↔"),
        ("mapsto", "↦"),
        ("therefore", "∴"),
        ("because", "∵"),
        ("top", "⊤"),
        ("bot", "⊥"),
        // Operators
        ("times", "×"),
        ("cdot", "·"),
        ("div", "÷"),
        ("pm", "±"),
        ("mp", "∓"),
        ("ast", "∗"),
        ("circ", "∘"),
        ("bullet", "•"),
        ("oplus", "⊕"),
        ("otimes", "⊗"),
        ("sum", "∑"),
        ("prod", "∏"),
        ("int", "∫"),
        ("oint", "∮"),
        ("partial", "∂"),
        ("nabla", "∇"),
        ("infty", "∞"),
        // Misc
        ("ldots", "…"),
        ("dots", "…"),
        ("cdots", "⋯"),
        ("vdots", "⋮"),
        ("ddots", "⋱"),
        ("prime", "′"),
        ("angle", "∠"),
        ("degree", "°"),
        ("qed", "∎"),
        ("blacksquare", "∎"),
        ("square", "□"),
        ("Box", "□"),
        ("aleph", "ℵ"),
        ("ell", "ℓ"),
        ("hbar", "ℏ"),
        ("Re", "ℜ"),
        ("Im", "ℑ"),
        ("wp", "℘"),
        ("langle", "⟨"),
        ("rangle", "⟩"),
        ("lfloor", "⌊"),
        ("rfloor", "⌋"),
        ("lceil", "⌈"),
        ("rceil", "⌉"),
        ("vert", "|"),
        ("lvert", "|"),
        ("rvert", "|"),
        ("Vert", "‖"),
        ("lVert", "‖"),
        ("rVert", "‖"),
        ("backslash", "\\"),
    ]
    .into_iter()
    .collect()
});

/// Operator names rendered as their own name.
const FUNCTION_NAMES: &[&str] = &[
    "sin", "cos", "tan", "cot", "sec", "csc", "arcsin", "arccos", "arctan", "sinh", "cosh",
    "tanh", "log", "ln", "lg", "exp", "lim", "liminf", "limsup", "max", "min", "sup", "inf",
    "det", "dim", "ker", "gcd", "deg", "arg", "mod", "bmod",
];

/// Wrappers whose argument is kept as-is.
const STYLE_MACROS: &[&str] = &[
    "text", "textrm", "textit", "textbf", "textsf", "texttt", "textnormal", "textup", "emph",
    "mathrm", "mathit", "mathbf", "mathsf", "mathtt", "mathcal", "mathscr", "mathfrak",
    "boldsymbol", "operatorname", "underline", "overline", "mbox", "hbox",
];

/// Sectioning commands, rendered with a leading section sign.
const SECTION_MACROS: &[&str] = &[
    "section",
    "section*",
    "subsection",
    "subsection*",
    "subsubsection",
    "subsubsection*",
    "paragraph",
];

/// Macros that render to nothing and take no argument.
const SILENT_MACROS: &[&str] = &[
    "left", "right", "big", "Big", "bigg", "Bigg", "bigl", "bigr", "Bigl", "Bigr", "displaystyle",
    "textstyle", "limits", "nolimits", "noindent", "newline", "par", "item", "!", "(", ")", "[",
    "]", "/",
];

/// Macros dropped together with their argument.
const DISCARDING_MACROS: &[&str] = &["begin", "end", "label", "vspace", "hspace"];

/// Escaped characters.
const ESCAPES: &[&str] = &["%", "$", "&", "#", "_", "{", "}", "*"];

fn double_struck(letter: &str) -> Option<&'static str> {
    match letter {
        "N" => Some("ℕ"),
        "Z" => Some("ℤ"),
        "Q" => Some("ℚ"),
        "R" => Some("ℝ"),
        "C" => Some("ℂ"),
        "P" => Some("ℙ"),
        _ => None,
    }
}

/// Render one markup fragment as single-line prose.
///
/// Total over any input: malformed markup degrades to literal text.
/// Escaped characters (`\%`, `\$`, `\{`, ...) come out bare, so output
/// holding them is prose, not markup, and is not safe to clean again.
pub fn clean_markup(raw: &str) -> String {
    let mut renderer = Renderer::new(raw);
    renderer.render_all();
    collapse_whitespace(&renderer.out)
}

/// Collapse whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Deepest nesting of macro arguments rendered structurally. Arguments
/// beyond it are emitted as their literal markup.
const MAX_ARGUMENT_DEPTH: usize = 256;

struct Renderer<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    out: String,
    /// Arguments currently being rendered
    depth: usize,
}

impl<'a> Renderer<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            tokens: tokenize(raw),
            pos: 0,
            out: String::with_capacity(raw.len()),
            depth: 0,
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn render_all(&mut self) {
        while let Some(token) = self.next() {
            self.render_token(token);
        }
    }

    fn render_token(&mut self, token: Token<'a>) {
        match token.kind {
            TokenKind::Text => self.out.push_str(&token.text.replace('~', " ")),
            TokenKind::Space | TokenKind::BlankLine | TokenKind::LineBreak => self.out.push(' '),
            TokenKind::OpenBrace
            | TokenKind::CloseBrace
            | TokenKind::MathShift
            | TokenKind::Comment => {}
            TokenKind::Macro => {
                if let Some(name) = token.macro_name() {
                    self.render_macro(name);
                }
            }
        }
    }

    fn render_macro(&mut self, name: &str) {
        if let Some(symbol) = SYMBOLS.get(name) {
            self.out.push_str(symbol);
            return;
        }

        match name {
            _ if SECTION_MACROS.contains(&name) => self.out.push_str("§ "),
            _ if STYLE_MACROS.contains(&name) || SILENT_MACROS.contains(&name) => {}
            _ if FUNCTION_NAMES.contains(&name) => self.out.push_str(name),
            _ if ESCAPES.contains(&name) => self.out.push_str(name),
            _ if DISCARDING_MACROS.contains(&name) => {
                self.take_argument();
            }
            "frac" | "dfrac" | "tfrac" => {
                let numerator = self.take_argument();
                let denominator = self.take_argument();
                self.out.push_str(&format!("{}/{}", numerator, denominator));
            }
            "sqrt" => {
                let index = self.take_optional_argument().unwrap_or_default();
                let radicand = self.take_argument();
                self.out.push_str(&format!("{}√({})", index, radicand));
            }
            "binom" | "dbinom" | "tbinom" => {
                let n = self.take_argument();
                let k = self.take_argument();
                self.out.push_str(&format!("C({}, {})", n, k));
            }
            "mathbb" => {
                let arg = self.take_argument();
                let rendered = double_struck(arg.trim()).map(str::to_string).unwrap_or(arg);
                self.out.push_str(&rendered);
            }
            "quad" | "qquad" | "," | ";" | ":" | " " | "\n" | "\t" => self.out.push(' '),
            _ => match name.strip_suffix('*') {
                Some(base) if !base.is_empty() => {
                    self.render_macro(base);
                    self.out.push('*');
                }
                _ => {
                    self.out.push('\\');
                    self.out.push_str(name);
                }
            },
        }
    }

    /// Render the next macro argument into its own string.
    ///
    /// A brace group renders its contents; bare text contributes its first
    /// character; a macro renders itself. Leading spaces are skipped. Past
    /// [`MAX_ARGUMENT_DEPTH`] a group or macro argument is taken as one
    /// literal token.
    fn take_argument(&mut self) -> String {
        while self.peek().map(|t| t.is_space()).unwrap_or(false) {
            self.pos += 1;
        }
        let Some(token) = self.peek() else {
            return String::new();
        };
        if self.depth >= MAX_ARGUMENT_DEPTH
            && matches!(token.kind, TokenKind::OpenBrace | TokenKind::Macro)
        {
            self.pos += 1;
            return token.text.to_string();
        }

        self.depth += 1;
        let saved = std::mem::take(&mut self.out);
        match token.kind {
            TokenKind::OpenBrace => {
                self.pos += 1;
                self.render_group();
            }
            TokenKind::Text => {
                let first_len = token.text.chars().next().map(char::len_utf8).unwrap_or(0);
                self.out.push_str(&token.text[..first_len]);
                self.consume_prefix(first_len);
            }
            TokenKind::Macro => {
                self.pos += 1;
                self.render_token(token);
            }
            _ => {}
        }
        self.depth -= 1;
        std::mem::replace(&mut self.out, saved)
    }

    /// `[...]` immediately following a macro, when it sits in one text token.
    fn take_optional_argument(&mut self) -> Option<String> {
        let token = self.peek().filter(|t| t.kind == TokenKind::Text)?;
        let rest = token.text.strip_prefix('[')?;
        let close = rest.find(']')?;
        let inner = rest[..close].to_string();
        self.consume_prefix(close + 2);
        Some(inner)
    }

    /// Drop the first `len` bytes of the current text token.
    fn consume_prefix(&mut self, len: usize) {
        let token = &mut self.tokens[self.pos];
        if len >= token.text.len() {
            self.pos += 1;
        } else {
            token.text = &token.text[len..];
            token.start += len;
        }
    }

    /// Render up to the brace closing the group just opened.
    fn render_group(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.next() {
            match token.kind {
                TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseBrace if depth == 0 => return,
                TokenKind::CloseBrace => depth -= 1,
                _ => {}
            }
            self.render_token(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_prose_unchanged() {
        let prose = "Then x^2 is nonnegative, so the claim holds.";
        assert_eq!(clean_markup(prose), prose);
        assert_eq!(clean_markup(&clean_markup(prose)), prose);
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(clean_markup("  Let\n x \t be\n\n real  "), "Let x be real");
    }

    #[test]
    fn test_inline_math_preserved() {
        assert_eq!(
            clean_markup("Let $x \\in \\mathbb{R}$ with $x > 0$."),
            "Let x ∈ ℝ with x > 0."
        );
        assert_eq!(clean_markup("\\(a \\leq b\\) and \\[c \\neq d\\]"), "a ≤ b and c ≠ d");
    }

    #[test]
    fn test_frac_sqrt_binom() {
        assert_eq!(clean_markup("$a + \\frac{1}{a}$"), "a + 1/a");
        assert_eq!(clean_markup("$\\frac12$"), "1/2");
        assert_eq!(clean_markup("$\\sqrt{x+1}$"), "√(x+1)");
        assert_eq!(clean_markup("$\\sqrt[3]{8} = 2$"), "3√(8) = 2");
        assert_eq!(clean_markup("$\\binom{n}{k}$"), "C(n, k)");
    }

    #[test]
    fn test_style_and_sections() {
        assert_eq!(clean_markup("\\textbf{PROOF BY INDUCTION}"), "PROOF BY INDUCTION");
        assert_eq!(clean_markup("\\section*{Conclusion}"), "§ Conclusion");
        assert_eq!(clean_markup("\\emph{so} $\\text{for all } n$"), "so for all n");
    }

    #[test]
    fn test_environments_and_comments_dropped() {
        let raw = "\\begin{proof}\nLet $x$ be real. % scratch work\n\\end{proof}";
        assert_eq!(clean_markup(raw), "Let x be real.");
    }

    #[test]
    fn test_escapes_and_spacing() {
        assert_eq!(clean_markup("50\\% of \\$5"), "50% of $5");
        assert_eq!(clean_markup("$a\\,b\\quad c$~d"), "a b c d");
        assert_eq!(clean_markup("$\\left( x \\right)$"), "( x )");
    }

    #[test]
    fn test_escaped_output_is_not_markup() {
        let once = clean_markup("50\\% of \\$5");
        assert_eq!(once, "50% of $5");
        // `%` now starts a comment
        assert_eq!(clean_markup(&once), "50");
    }

    #[test]
    fn test_function_names() {
        assert_eq!(clean_markup("$\\sin x \\le \\log(y)$"), "sin x ≤ log(y)");
    }

    #[test]
    fn test_unknown_macro_passes_through() {
        assert_eq!(clean_markup("\\foo{bar}"), "\\foobar");
        assert_eq!(clean_markup("\\weird baz"), "\\weird baz");
        assert_eq!(clean_markup("\\alpha*"), "α*");
    }

    #[test]
    fn test_malformed_markup_degrades() {
        assert_eq!(clean_markup("\\frac{1"), "1/");
        assert_eq!(clean_markup("}{ a } }"), "a");
        assert_eq!(clean_markup("\\"), "\\");
        assert_eq!(clean_markup("$$"), "");
    }

    #[test]
    fn test_nested_arguments_render_structurally() {
        assert_eq!(clean_markup("$\\frac{\\frac{1}{2}}{3}$"), "1/2/3");
        assert_eq!(clean_markup("$\\sqrt{\\sqrt{x}}$"), "√(√(x))");
    }

    #[test]
    fn test_argument_depth_is_bounded() {
        let input = format!("{}x", "\\sqrt".repeat(MAX_ARGUMENT_DEPTH + 2));
        let cleaned = clean_markup(&input);
        assert_eq!(cleaned.matches('√').count(), MAX_ARGUMENT_DEPTH + 1);
        assert!(cleaned.contains("√(\\sqrt)"));
        assert!(cleaned.ends_with(")x"));
    }

    #[test]
    fn test_deeply_nested_frac_returns() {
        let cleaned = clean_markup(&"\\frac{".repeat(100_000));
        assert!(cleaned.contains("/"));
        assert!(cleaned.contains("\\frac"));
    }

    #[test]
    fn test_long_sqrt_chain_returns() {
        let cleaned = clean_markup(&format!("{} x", "\\sqrt".repeat(100_000)));
        assert!(cleaned.starts_with("√("));
        assert!(cleaned.contains("√(x)"));
        assert!(cleaned.contains("\\sqrt"));
    }
}
