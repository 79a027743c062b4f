use crate::align::DiffEntry;

/// Escape the five HTML-significant characters.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
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
    out
}

/// Render entries as an HTML fragment.
///
/// Each entry becomes `<div class='diff-line diff-{kind}'>{prefix}{text}</div>`
/// and the whole sequence is wrapped in a `diff-container` div, with nothing
/// between elements.
pub fn render_html(entries: &[DiffEntry]) -> String {
    let mut out = String::from("<div class='diff-container'>");
    for entry in entries {
        out.push_str("<div class='diff-line diff-");
        out.push_str(entry.kind.as_str());
        out.push_str("'>");
        out.push_str(entry.kind.prefix());
        out.push_str(&html_escape(&entry.value));
        out.push_str("</div>");
    }
    out.push_str("</div>");
    out
}

/// Render entries as prefixed plain text, one entry per line, unescaped.
pub fn render_text(entries: &[DiffEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{}{}", e.kind.prefix(), e.value))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_special_characters() {
        assert_eq!(
            html_escape(r#"<script>&"'"#),
            "&lt;script&gt;&amp;&quot;&#39;"
        );
    }

    #[test]
    fn ampersand_is_escaped_once() {
        assert_eq!(html_escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn html_layout() {
        let html = render_html(&[
            DiffEntry::context("a"),
            DiffEntry::removed("b"),
            DiffEntry::added("<x>"),
        ]);
        assert_eq!(
            html,
            "<div class='diff-container'>\
             <div class='diff-line diff-context'>  a</div>\
             <div class='diff-line diff-removed'>- b</div>\
             <div class='diff-line diff-added'>+ &lt;x&gt;</div>\
             </div>"
        );
    }

    #[test]
    fn empty_entries_render_empty_container() {
        assert_eq!(render_html(&[]), "<div class='diff-container'></div>");
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn text_layout_is_unescaped() {
        let text = render_text(&[DiffEntry::context("a"), DiffEntry::added("<b>")]);
        assert_eq!(text, "  a\n+ <b>");
    }
}
