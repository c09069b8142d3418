//! Terminal rendering with ANSI colors

use crate::models::{DisplayRecord, SentimentLabel};
use colored::Colorize;

pub fn render_card_terminal(record: &DisplayRecord) -> String {
    let (r, g, b) = record.color.rgb();
    format!(
        "{}\n  {}\n",
        format!(" {} ", record.heading())
            .bold()
            .white()
            .on_truecolor(r, g, b),
        record.text
    )
}

pub fn render_verdict_terminal(label: SentimentLabel) -> String {
    let (r, g, b) = label.color().rgb();
    format!(
        "{} {}\n",
        "Sentiment:".bold(),
        label.as_str().bold().truecolor(r, g, b)
    )
}

pub fn render_notice_terminal(message: &str) -> String {
    format!("{} {}\n", "⚠️".yellow(), message.red())
}
