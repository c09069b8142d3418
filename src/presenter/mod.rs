//! Turning labels into something to show
//!
//! Includes:
//! - [`ResultPresenter`], which pairs a text with its label and card color
//! - HTML fragments (cards, verdict banner, notices)
//! - Colored terminal output

mod html;
mod terminal;

pub use html::{escape_html, render_card_html, render_notice_html, render_verdict_html};
pub use terminal::{render_card_terminal, render_notice_terminal, render_verdict_terminal};

use crate::models::{DisplayRecord, FeedReport, SentimentLabel};
use std::fmt;
use std::str::FromStr;

/// Shown when a feed fetch failed or returned nothing
pub const NO_RESULTS_MESSAGE: &str = "Error fetching tweets or no tweets found for this username.";

/// Where rendered output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Html,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "terminal" | "term" | "text" => Ok(OutputFormat::Terminal),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!(
                "unknown output format '{}', expected 'terminal' or 'html'",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Terminal => f.write_str("terminal"),
            OutputFormat::Html => f.write_str("html"),
        }
    }
}

/// Builds display records and renders them in one output format
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultPresenter {
    format: OutputFormat,
}

impl ResultPresenter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Pair a text with its label. Green for positive, red for negative.
    pub fn present(text: &str, label: SentimentLabel) -> DisplayRecord {
        DisplayRecord {
            label,
            text: text.to_string(),
            color: label.color(),
        }
    }

    pub fn render_card(&self, record: &DisplayRecord) -> String {
        match self.format {
            OutputFormat::Terminal => render_card_terminal(record),
            OutputFormat::Html => render_card_html(record),
        }
    }

    /// Banner for a single manually entered text
    pub fn render_verdict(&self, label: SentimentLabel) -> String {
        match self.format {
            OutputFormat::Terminal => render_verdict_terminal(label),
            OutputFormat::Html => render_verdict_html(label),
        }
    }

    pub fn render_notice(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Terminal => render_notice_terminal(message),
            OutputFormat::Html => render_notice_html(message),
        }
    }

    /// Render a feed report.
    ///
    /// `NoResults` becomes the no-results notice. A report whose posts all had
    /// empty text renders to an empty string.
    pub fn render_report(&self, report: &FeedReport) -> String {
        match report {
            FeedReport::NoResults => self.render_notice(NO_RESULTS_MESSAGE),
            FeedReport::Cards(records) => records
                .iter()
                .map(|record| self.render_card(record))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorToken;

    #[test]
    fn test_present() {
        let record = ResultPresenter::present("love it", SentimentLabel::Positive);
        assert_eq!(record.text, "love it");
        assert_eq!(record.label, SentimentLabel::Positive);
        assert_eq!(record.color, ColorToken::Affirmative);

        let record = ResultPresenter::present("", SentimentLabel::Negative);
        assert_eq!(record.text, "");
        assert_eq!(record.color, ColorToken::Alert);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("HTML".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("terminal".parse::<OutputFormat>(), Ok(OutputFormat::Terminal));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_report_no_results() {
        let presenter = ResultPresenter::new(OutputFormat::Html);
        let out = presenter.render_report(&FeedReport::NoResults);
        assert!(out.contains(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn test_render_report_cards() {
        let presenter = ResultPresenter::new(OutputFormat::Html);
        let report = FeedReport::Cards(vec![
            ResultPresenter::present("good day", SentimentLabel::Positive),
            ResultPresenter::present("bad day", SentimentLabel::Negative),
        ]);
        let out = presenter.render_report(&report);

        assert_eq!(out.matches("<div").count(), 2);
        assert!(out.contains("good day"));
        assert!(out.contains("#E74C3C"));
        assert!(!out.contains(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn test_render_report_all_empty_posts() {
        let presenter = ResultPresenter::default();
        assert_eq!(presenter.render_report(&FeedReport::Cards(Vec::new())), "");
    }
}
