//! Message body rendering: Markdown first, then a math pass over the
//! resulting HTML. Code blocks keep their `language-*` classes so the
//! page-level highlighter can pick them up.

use latex2mathml::{latex_to_mathml, DisplayStyle};

pub fn render_markdown(content: &str) -> String {
    let parser = pulldown_cmark::Parser::new(content);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    render_math(&html)
}

/// Replaces `$$…$$`, `\[…\]`, `\(…\)` and `$…$` spans with MathML.
///
/// Spans inside `<pre>`/`<code>` regions are left alone, and so is anything
/// that fails to parse as LaTeX.
pub fn render_math(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    loop {
        let next_pre = rest.find("<pre");
        let next_code = rest.find("<code");
        let (start, close) = match (next_pre, next_code) {
            (Some(p), Some(c)) if p <= c => (p, "</pre>"),
            (_, Some(c)) => (c, "</code>"),
            (Some(p), None) => (p, "</pre>"),
            (None, None) => {
                out.push_str(&replace_delimiters(rest));
                return out;
            }
        };
        out.push_str(&replace_delimiters(&rest[..start]));
        let block_end = rest[start..]
            .find(close)
            .map(|i| start + i + close.len())
            .unwrap_or(rest.len());
        out.push_str(&rest[start..block_end]);
        rest = &rest[block_end..];
    }
}

fn replace_delimiters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        let rendered = if rest.starts_with("$$") {
            math_span(rest, "$$", "$$", DisplayStyle::Block)
        } else if rest.starts_with("\\[") {
            math_span(rest, "\\[", "\\]", DisplayStyle::Block)
        } else if rest.starts_with("\\(") {
            math_span(rest, "\\(", "\\)", DisplayStyle::Inline)
        } else if rest.starts_with('$') {
            math_span(rest, "$", "$", DisplayStyle::Inline)
        } else {
            None
        };
        match rendered {
            Some((mathml, consumed)) => {
                out.push_str(&mathml);
                i += consumed;
            }
            None => match rest.chars().next() {
                Some(ch) => {
                    out.push(ch);
                    i += ch.len_utf8();
                }
                None => break,
            },
        }
    }
    out
}

/// Renders one delimited span, returning the MathML and the bytes consumed.
/// `None` when the span is unterminated, empty, or not valid LaTeX.
fn math_span(
    rest: &str,
    open: &str,
    close: &str,
    style: DisplayStyle,
) -> Option<(String, usize)> {
    let body_start = open.len();
    let end = rest[body_start..].find(close)?;
    let body = &rest[body_start..body_start + end];
    if body.trim().is_empty() {
        return None;
    }
    let mathml = latex_to_mathml(&decode_entities(body), style).ok()?;
    Some((mathml, body_start + end + close.len()))
}

// Markdown output escapes these before the math pass sees the source.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_becomes_a_paragraph() {
        assert_eq!(render_markdown("hello world"), "<p>hello world</p>\n");
    }

    #[test]
    fn fenced_code_keeps_its_language_class() {
        let html = render_markdown("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre><code class=\"language-rust\">"));
    }

    #[test]
    fn display_math_renders_to_mathml() {
        let html = render_markdown("the identity $$e^{i\\pi} + 1 = 0$$ holds");
        assert!(html.contains("<math"));
        assert!(!html.contains("$$"));
    }

    #[test]
    fn inline_math_renders_for_all_delimiters() {
        for input in ["$x^2$", "\\(x^2\\)"] {
            let html = render_math(input);
            assert!(html.contains("<math"), "no MathML for {input}");
        }
        let html = render_math("\\[x^2\\]");
        assert!(html.contains("<math"));
    }

    #[test]
    fn invalid_math_is_left_untouched() {
        let input = "price went $\\frac{$ up";
        assert_eq!(render_math(input), input);
    }

    #[test]
    fn unterminated_delimiters_are_left_untouched() {
        let input = "costs $5 at most";
        assert_eq!(render_math(input), input);
    }

    #[test]
    fn math_inside_code_blocks_is_skipped() {
        let input = "<pre><code>$x^2$</code></pre>";
        assert_eq!(render_math(input), input);
        let inline = "<code>$a$</code>";
        assert_eq!(render_math(inline), inline);
    }

    #[test]
    fn entities_are_decoded_before_parsing() {
        let html = render_math("$a &lt; b$");
        assert!(html.contains("<math"));
    }
}
