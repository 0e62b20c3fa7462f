// logging.rs - Diagnostic stream setup
// Purpose: Timestamped, leveled, colored log lines on stderr so stdout stays clean for results

use anyhow::{Result, anyhow};
use chrono::{SecondsFormat, Utc};
use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;

pub struct ReconFormatter;

impl<S, N> FormatEvent<S, N> for ReconFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let tag = match *event.metadata().level() {
            Level::TRACE => "TRACE".dimmed(),
            Level::DEBUG => "DEBUG".blue(),
            Level::INFO => "INFO ".green().bold(),
            Level::WARN => "WARN ".yellow().bold(),
            Level::ERROR => "ERROR".red().bold(),
        };

        write!(writer, "{} - {} - ", timestamp.dimmed(), tag)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Installs the process-wide subscriber. Call once, at process entry.
pub fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .event_format(ReconFormatter)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}
