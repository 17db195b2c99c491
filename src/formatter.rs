//! Log formatter that stamps every event with wall-clock time and the simulation tick.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// The tick the simulation is currently on, shared with the formatter.
static CURRENT_TICK: AtomicU64 = AtomicU64::new(0);

/// Ticks are shown as four hex digits, wrapping roughly every 18 minutes at 60 Hz.
const TICK_DISPLAY_MASK: u64 = 0xFFFF;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:4]");

const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// `HH:MM:SS.ssss 0xTICK LEVEL span{fields}: target: message`
pub struct TickFormatter;

impl<S, N> FormatEvent<S, N> for TickFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        styled(&mut writer, DIM, timestamp)?;
        writer.write_char(' ')?;
        styled(&mut writer, DIM, format_args!("0x{:04X}", current_tick() & TICK_DISPLAY_MASK))?;
        writer.write_char(' ')?;

        let (color, label) = level_style(meta.level());
        styled(&mut writer, color, format_args!("{:>5}", label))?;
        writer.write_char(' ')?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                styled(&mut writer, BOLD, span.metadata().name())?;
                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<FormattedFields<N>>().filter(|fields| !fields.is_empty()) {
                    styled(&mut writer, BOLD, "{")?;
                    write!(writer, "{}", fields)?;
                    styled(&mut writer, BOLD, "}")?;
                }
                styled(&mut writer, DIM, ":")?;
            }
            writer.write_char(' ')?;
        }

        styled(&mut writer, DIM, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_style(level: &Level) -> (&'static str, &'static str) {
    match *level {
        Level::TRACE => ("\x1b[35m", "TRACE"),
        Level::DEBUG => ("\x1b[34m", "DEBUG"),
        Level::INFO => ("\x1b[32m", "INFO"),
        Level::WARN => ("\x1b[33m", "WARN"),
        Level::ERROR => ("\x1b[31m", "ERROR"),
    }
}

/// Writes `value` wrapped in an ANSI style when the writer supports it.
fn styled(writer: &mut Writer<'_>, style: &str, value: impl fmt::Display) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{}{}{}", style, value, RESET)
    } else {
        write!(writer, "{}", value)
    }
}

/// Publishes the simulation tick shown in log lines.
pub fn set_tick(tick: u64) {
    CURRENT_TICK.store(tick, Ordering::Relaxed);
}

pub fn current_tick() -> u64 {
    CURRENT_TICK.load(Ordering::Relaxed)
}
