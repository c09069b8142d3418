//! HTML fragments for result cards, the verdict banner and notices

use crate::models::{DisplayRecord, SentimentLabel};

/// Escape text for use inside HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Colored card with a heading and the post text in white
pub fn render_card_html(record: &DisplayRecord) -> String {
    format!(
        concat!(
            "<div style=\"background-color: {color}; padding: 10px; border-radius: 5px; margin: 10px 0;\">\n",
            "    <h5 style=\"color: white;\">{heading}</h5>\n",
            "    <p style=\"color: white;\">{text}</p>\n",
            "</div>\n"
        ),
        color = record.color.hex(),
        heading = record.heading(),
        text = escape_html(&record.text),
    )
}

/// Centered banner for a single analyzed text
pub fn render_verdict_html(label: SentimentLabel) -> String {
    format!(
        concat!(
            "<div style=\"background-color: {color}; padding: 15px; border-radius: 10px; ",
            "text-align: center; color: #000000; font-size: 18px;\">\n",
            "    <b>Sentiment:</b> {label}\n",
            "</div>\n"
        ),
        color = label.color().hex(),
        label = label,
    )
}

/// Red warning box
pub fn render_notice_html(message: &str) -> String {
    format!(
        concat!(
            "<div style=\"padding: 10px; background-color: #ffcccc; color: #990000; ",
            "border-radius: 5px; border-left: 5px solid #cc0000;\">\n",
            "    ⚠️ {message}\n",
            "</div>\n"
        ),
        message = escape_html(message),
    )
}
