//! Minimal HTML composition helpers. Pages are small read-only tables, so
//! they are assembled as strings rather than through a template engine.

/// Escape text for use in element content or attribute values.
pub fn escape(text: &str) -> String {
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

/// Wrap page content in the shared document shell.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"ja\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"description\" content=\"POG\">\n\
         <title>{} | Ouchi POG</title>\n\
         </head>\n\
         <body>\n{}\n</body>\n\
         </html>\n",
        escape(title),
        body
    )
}

/// A breadcrumb trail: every segment but the last is a link.
pub fn breadcrumbs(trail: &[(&str, Option<&str>)]) -> String {
    let items: Vec<String> = trail
        .iter()
        .map(|(label, href)| match href {
            Some(href) => format!(
                "<li><a href=\"{}\">{}</a></li>",
                escape(href),
                escape(label)
            ),
            None => format!("<li>{}</li>", escape(label)),
        })
        .collect();
    format!("<nav class=\"breadcrumbs\"><ul>{}</ul></nav>", items.join(""))
}

pub fn link(href: &str, label: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape(href), escape(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_handles_markup_characters() {
        assert_eq!(escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
    }

    #[test]
    fn test_breadcrumbs_last_item_is_plain() {
        let html = breadcrumbs(&[("TOP", Some("/")), ("here", None)]);
        assert!(html.contains("<a href=\"/\">TOP</a>"));
        assert!(html.contains("<li>here</li>"));
    }
}
