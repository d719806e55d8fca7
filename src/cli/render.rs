//! Terminal renderer for picture posts

use crate::cli::commands::OutputFormat;
use crate::error::Error;
use crate::model::Picture;
use crate::pagination::Renderer;
use std::io::Write;
use tracing::warn;

/// Writes each picture as one line of output
pub struct TerminalRenderer<W: Write + Send> {
    out: W,
    format: OutputFormat,
    image_host: Option<String>,
    lines: usize,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            image_host: None,
            lines: 0,
        }
    }

    /// Prefix image paths with this host in pretty output
    #[must_use]
    pub fn image_host(mut self, host: impl Into<String>) -> Self {
        self.image_host = Some(host.into());
        self
    }

    /// Consume the renderer and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn pretty_line(&self, picture: &Picture) -> String {
        let image = match &self.image_host {
            Some(host) => format!("{}/{}", host.trim_end_matches('/'), picture.image_path()),
            None => picture.image_path(),
        };

        let mut line = format!(
            "{}  [{}]  +{} -{} ~{}  {}",
            picture.title(),
            picture.superposable,
            picture.like_count,
            picture.dislike_count,
            picture.comment_count,
            image
        );
        match (picture.liked, picture.disliked) {
            (Some(true), _) => line.push_str("  (liked)"),
            (_, Some(true)) => line.push_str("  (disliked)"),
            _ => {}
        }
        line
    }

    fn write_line(&mut self, line: &str) {
        // A closed stdout is not a feed error
        if let Err(e) = writeln!(self.out, "{line}") {
            warn!("Failed to write output: {}", e);
        }
    }
}

impl<W: Write + Send> Renderer<Picture> for TerminalRenderer<W> {
    type Handle = usize;

    fn render_item(&mut self, picture: Picture) -> usize {
        let line = match self.format {
            OutputFormat::Pretty => self.pretty_line(&picture),
            OutputFormat::Json => match serde_json::to_string(&picture) {
                Ok(json) => json,
                Err(e) => {
                    warn!("Failed to serialize picture {}: {}", picture.picture_id, e);
                    return self.lines;
                }
            },
        };

        self.write_line(&line);
        self.lines += 1;
        self.lines - 1
    }

    fn clear_all(&mut self) {
        // Output already written cannot be taken back; mark the boundary
        if self.format == OutputFormat::Pretty && self.lines > 0 {
            self.write_line("----");
        }
        self.lines = 0;
    }

    fn set_empty_indicator(&mut self, empty: bool) {
        if empty && self.format == OutputFormat::Pretty {
            self.write_line("No pictures yet.");
        }
    }

    fn show_error(&mut self, error: &Error) {
        eprintln!("{}", error.alert_text());
    }
}
