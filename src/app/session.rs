//! Interactive menu on a line-based reader and writer

use crate::app::{analyze_feed, AppState};
use crate::error::Result;
use crate::presenter::ResultPresenter;
use std::io::{BufRead, Write};
use tracing::debug;

/// Run the two-option menu until `q` or end of input
pub async fn run_interactive<R, W>(
    state: &AppState,
    presenter: &ResultPresenter,
    mut input: R,
    mut output: W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "💬 Social Media Sentiment Analysis")?;

    loop {
        writeln!(output)?;
        writeln!(output, "Choose an option:")?;
        writeln!(output, "  1) Enter Manually")?;
        writeln!(output, "  2) Fetch some tweets")?;
        writeln!(output, "  q) Quit")?;
        let Some(choice) = prompt(&mut input, &mut output, "> ")? else {
            break;
        };

        match choice.trim().to_lowercase().as_str() {
            "1" | "enter manually" => {
                let Some(text) = prompt(
                    &mut input,
                    &mut output,
                    "Enter the text to analyze the sentiment: ",
                )?
                else {
                    break;
                };
                match state.analyze_text(&text) {
                    Ok(record) => write!(output, "{}", presenter.render_verdict(record.label))?,
                    Err(e) => write!(output, "{}", presenter.render_notice(&e.to_string()))?,
                }
            }
            "2" | "fetch some tweets" => {
                let Some(username) = prompt(&mut input, &mut output, "Enter username: ")? else {
                    break;
                };
                match analyze_feed(state, &username).await {
                    Ok(report) => writeln!(output, "{}", presenter.render_report(&report))?,
                    Err(e) => write!(output, "{}", presenter.render_notice(&e.to_string()))?,
                }
            }
            "q" | "quit" | "exit" => break,
            "" => {}
            other => writeln!(output, "Unknown option '{}'", other)?,
        }
    }

    debug!("Interactive session finished");
    Ok(())
}

/// Print a prompt and read one line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<Option<String>> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
