use std::{env, fmt};

use ansiterm::{Color, Style};
use log::{level_filters::LevelFilter, Event, Level, Subscriber};
use time::format_description::well_known::Iso8601;
use tracing_log::NormalizeEvent;
use tracing_subscriber::{
    filter::Targets,
    fmt::{
        format::Writer,
        time::{FormatTime, UtcTime},
        FmtContext, FormatEvent, FormatFields, FormattedFields,
    },
    registry::LookupSpan,
};

pub use self::settings::{initialize_logging, LogError, LogSettings, DEFAULT_LEVEL};

mod settings;

pub static ORDO_MODULES: &[&str] = &["ordo_collections", "ordo_log", "ordo_test_log"];

pub const ENV: &str = "RUST_LOG";

pub trait TargetsExt {
    fn with_ordo_targets(self, level: LevelFilter) -> Self;
    fn with_env(self) -> Self;
}

impl TargetsExt for Targets {
    fn with_ordo_targets(mut self, level: LevelFilter) -> Targets {
        for &module in ORDO_MODULES.iter() {
            self = self.with_target(module, level);
        }
        self
    }

    /// Applies `target=level` directives from `RUST_LOG`. The pseudo target
    /// `ordo` stands for all ordo crates.
    fn with_env(mut self) -> Targets {
        let directives = match env::var(ENV) {
            Ok(v) => v,
            Err(env::VarError::NotPresent) => return self,
            Err(env::VarError::NotUnicode(_)) => panic!("env var {ENV} contains non-UTF-8 value"),
        };
        for dir in directives.split(',') {
            let (target, level) = match dir.split_once('=') {
                Some((target, level)) => (Some(target), level),
                None => (None, dir),
            };
            let level: LevelFilter = match level.parse() {
                Ok(l) => l,
                // Ignore invalid directives.
                Err(_) => continue,
            };
            match target {
                Some("ordo") => self = self.with_ordo_targets(level),
                Some(t) => self = self.with_target(t, level),
                None => self = self.with_default(level),
            }
        }
        self
    }
}

/// Event formatter printing `time level module | fields, span{fields}`.
pub struct Formatting<T: FormatTime>(pub T);

impl<S, N, T: FormatTime> FormatEvent<S, N> for Formatting<T>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let (bold, dim) = if writer.has_ansi_escapes() {
            (Style::default().bold(), Style::default().dimmed())
        } else {
            (Style::default(), Style::default())
        };
        write!(&mut writer, "{}", dim.prefix())?;
        self.0.format_time(&mut writer)?;
        write!(&mut writer, "{}", dim.suffix())?;

        let normalized_metadata = event.normalized_metadata();
        let metadata = normalized_metadata
            .as_ref()
            .unwrap_or_else(|| event.metadata());

        let color = if writer.has_ansi_escapes() {
            Style::from(match *metadata.level() {
                Level::TRACE => Color::Purple,
                Level::DEBUG => Color::Blue,
                Level::INFO => Color::Green,
                Level::WARN => Color::Yellow,
                Level::ERROR => Color::Red,
            })
        } else {
            Style::default()
        };

        let target = module_column(metadata.target());

        write!(
            &mut writer,
            " {}{:5}{} {}{}{} | ",
            color.prefix(),
            metadata.level(),
            color.suffix(),
            dim.prefix(),
            target,
            dim.suffix(),
        )?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(
                    writer,
                    ", {}{}{{{}",
                    bold.prefix(),
                    span.name(),
                    bold.suffix()
                )?;

                let ext = span.extensions();
                if let Some(fields) = ext.get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{}", fields)?;
                    }
                }
                write!(writer, "{}}}{}", bold.prefix(), bold.suffix())?;
            }
        }

        writeln!(writer)
    }
}

const MAX_MODULE_WIDTH: usize = 20;

/// Pads or truncates the last path segment of `target` to a fixed width column.
fn module_column(target: &str) -> String {
    let mut module = match target.rfind("::") {
        Some(pos) => &target[pos + 2..],
        None => target,
    };
    let truncate = module.len() > MAX_MODULE_WIDTH;
    if truncate {
        for i in (0..MAX_MODULE_WIDTH).rev() {
            if module.is_char_boundary(i) {
                module = &module[..i];
                break;
            }
        }
    }
    let indicator = if truncate {
        "…"
    } else if module.len() < MAX_MODULE_WIDTH {
        " "
    } else {
        ""
    };
    format!(
        "{:width$}{}",
        module,
        indicator,
        width = MAX_MODULE_WIDTH - 1
    )
}

/// Formats a UTC timestamp, or nothing.
pub struct MaybeSystemTime(pub bool);

impl FormatTime for MaybeSystemTime {
    fn format_time(&self, w: &mut Writer) -> fmt::Result {
        if self.0 {
            UtcTime::new(Iso8601::DEFAULT).format_time(w)
        } else {
            ().format_time(w)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordo_targets_are_enabled_at_level() {
        let targets = Targets::new()
            .with_default(LevelFilter::WARN)
            .with_ordo_targets(LevelFilter::DEBUG);
        assert!(targets.would_enable("ordo_collections::collection", &Level::DEBUG));
        assert!(!targets.would_enable("ordo_collections::collection", &Level::TRACE));
        assert!(!targets.would_enable("other_crate", &Level::INFO));
    }

    #[test]
    fn module_column_has_fixed_width() {
        assert_eq!(
            module_column("ordo_collections::collection").chars().count(),
            20
        );
        assert!(module_column("a::policy").starts_with("policy "));
        let long = module_column("a::a_module_name_that_is_way_too_long");
        assert!(long.ends_with('…'));
        assert_eq!(long.chars().count(), 20);
    }

    #[test]
    fn system_time_is_optional() {
        let mut without = String::new();
        MaybeSystemTime(false)
            .format_time(&mut Writer::new(&mut without))
            .unwrap();
        assert!(without.is_empty());

        let mut with = String::new();
        MaybeSystemTime(true)
            .format_time(&mut Writer::new(&mut with))
            .unwrap();
        assert!(with.contains('T'));
    }
}
