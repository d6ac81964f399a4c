//! HTML formatting of token streams.

use crate::theme::Theme;
use crate::token::Token;

/// Format tokens as a classed `<pre>` block scoped to `theme`.
pub fn format_tokens(tokens: &[Token<'_>], theme: &Theme) -> String {
    let mut html = format!(r#"<pre class="chroma {}"><code>"#, theme.name());

    for token in tokens {
        match token.kind.class() {
            Some(class) => {
                html.push_str(r#"<span class=""#);
                html.push_str(class);
                html.push_str(r#"">"#);
                push_escaped(&mut html, token.text);
                html.push_str("</span>");
            }
            None => push_escaped(&mut html, token.text),
        }
    }

    html.push_str("</code></pre>");
    html
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn escapes_special_characters() {
        let tokens = [Token::new(TokenKind::Text, r#"<a href="x">Tom & 'Jerry'</a>"#)];

        let html = format_tokens(&tokens, &Theme::default());

        assert!(html.contains("&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"));
    }

    #[test]
    fn wraps_classed_tokens_in_spans() {
        let tokens = [
            Token::new(TokenKind::Keyword, "if"),
            Token::new(TokenKind::Text, " "),
            Token::new(TokenKind::Operator, "<"),
        ];

        let html = format_tokens(&tokens, &Theme::default());

        assert_eq!(
            html,
            r#"<pre class="chroma tokyonight-night"><code><span class="k">if</span> <span class="o">&lt;</span></code></pre>"#
        );
    }
}
