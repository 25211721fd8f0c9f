// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Diagnostic reporting for the filesystem and archive helpers.
//!
//! Operations never print directly. They hand failures to a [`Reporter`],
//! which decides where the line goes: a console-style sink formatted for the
//! host context, or the `tracing` pipeline.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::models::constants::{CORE_CATEGORY, ConstantMatch, ConstantRegistry, Severity};

/// Where diagnostic output ends up, which decides the line-break style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HostContext {
    /// Interactive terminal: plain newlines.
    #[default]
    CommandLine,
    /// Output embedded into rendered markup: `<br />` breaks.
    Markup,
}

impl HostContext {
    pub fn line_break(self) -> &'static str {
        match self {
            Self::CommandLine => "\n",
            Self::Markup => "<br />",
        }
    }
}

/// Formatting knobs for [`ConsoleReporter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReporterConfig {
    pub context: HostContext,
    /// Number of line breaks appended after each message.
    pub line_breaks: usize,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            context: HostContext::CommandLine,
            line_breaks: 1,
        }
    }
}

/// Sink for diagnostics raised by the helpers.
///
/// Reporting cannot fail; implementations swallow their own I/O errors.
pub trait Reporter {
    fn report(&self, message: &str, operation: &str, severity: Severity);
}

/// Resolve the display name of `severity` through the `Core` constants.
///
/// Only `E_`-prefixed names count. Several matching names are joined with
/// `" && "`; no matching name yields `UNKNOWN`.
pub fn severity_name(registry: &ConstantRegistry, severity: Severity) -> String {
    let names = match registry.lookup(severity.level(), Some(CORE_CATEGORY)) {
        ConstantMatch::NotFound => Vec::new(),
        ConstantMatch::One(name) => vec![name],
        ConstantMatch::Many(names) => names,
    };

    let named: Vec<&str> = names
        .into_iter()
        .filter(|name| name.starts_with("E_"))
        .collect();

    if named.is_empty() {
        "UNKNOWN".to_string()
    } else {
        named.join(" && ")
    }
}

/// Build the `(SEVERITY) : message operation` line, with trailing breaks.
pub fn format_report(
    registry: &ConstantRegistry,
    config: &ReporterConfig,
    message: &str,
    operation: &str,
    severity: Severity,
) -> String {
    let mut line = format!("({}) : {}", severity_name(registry, severity), message);
    if !operation.is_empty() {
        line.push(' ');
        line.push_str(operation);
    }
    for _ in 0..config.line_breaks {
        line.push_str(config.context.line_break());
    }
    line
}

/// Writes formatted diagnostics to any [`Write`] sink (stdout by default).
pub struct ConsoleReporter<W: Write> {
    sink: Mutex<W>,
    config: ReporterConfig,
    registry: ConstantRegistry,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(config: ReporterConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(sink: W, config: ReporterConfig) -> Self {
        Self {
            sink: Mutex::new(sink),
            config,
            registry: ConstantRegistry::builtin(),
        }
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Recover the sink, e.g. to inspect captured output.
    pub fn into_inner(self) -> W {
        self.sink
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&self, message: &str, operation: &str, severity: Severity) {
        let line = format_report(&self.registry, &self.config, message, operation, severity);
        let mut sink = self
            .sink
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = sink.write_all(line.as_bytes());
        let _ = sink.flush();
    }
}

/// Forwards diagnostics as `tracing` events, levelled by severity.
#[derive(Debug, Default)]
pub struct TracingReporter {
    registry: ConstantRegistry,
}

impl Reporter for TracingReporter {
    fn report(&self, message: &str, operation: &str, severity: Severity) {
        let kind = severity_name(&self.registry, severity);
        if severity.is_error() {
            tracing::error!(severity = %kind, operation, "{message}");
        } else if severity.is_warning() {
            tracing::warn!(severity = %kind, operation, "{message}");
        } else {
            tracing::info!(severity = %kind, operation, "{message}");
        }
    }
}

/// Fans a report out to several reporters in order.
impl<A: Reporter, B: Reporter> Reporter for (A, B) {
    fn report(&self, message: &str, operation: &str, severity: Severity) {
        self.0.report(message, operation, severity);
        self.1.report(message, operation, severity);
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ConsoleReporter, HostContext, Reporter, ReporterConfig, format_report, severity_name,
    };
    use crate::models::constants::{
        CORE_CATEGORY, Constant, ConstantRegistry, ConstantValue, Severity,
    };

    fn captured(reporter: ConsoleReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn command_line_report_uses_newline() {
        let reporter = ConsoleReporter::new(Vec::new(), ReporterConfig::default());
        reporter.report("Unknown FSO type for '/dev/null'!", "tree", Severity::RecoverableError);

        assert_eq!(
            captured(reporter),
            "(E_RECOVERABLE_ERROR) : Unknown FSO type for '/dev/null'! tree\n"
        );
    }

    #[test]
    fn markup_report_repeats_html_breaks() {
        let config = ReporterConfig {
            context: HostContext::Markup,
            line_breaks: 2,
        };
        let reporter = ConsoleReporter::new(Vec::new(), config);
        reporter.report("boom", "zip_dir", Severity::Warning);

        assert_eq!(captured(reporter), "(E_WARNING) : boom zip_dir<br /><br />");
    }

    // Zero breaks and no operation leave the bare message.
    #[test]
    fn empty_operation_and_no_breaks() {
        let config = ReporterConfig {
            context: HostContext::CommandLine,
            line_breaks: 0,
        };
        let line = format_report(
            &ConstantRegistry::builtin(),
            &config,
            "msg",
            "",
            Severity::Error,
        );
        assert_eq!(line, "(E_ERROR) : msg");
    }

    // Colliding non-severity names are filtered out.
    #[test]
    fn severity_name_ignores_non_severity_constants() {
        let registry = ConstantRegistry::builtin();
        assert_eq!(
            severity_name(&registry, Severity::RecoverableError),
            "E_RECOVERABLE_ERROR"
        );
        assert_eq!(severity_name(&registry, Severity::Notice), "E_NOTICE");
    }

    #[test]
    fn several_severity_names_are_joined() {
        let registry = ConstantRegistry::new(vec![
            Constant {
                name: "E_WARNING",
                value: ConstantValue::Int(2),
                category: CORE_CATEGORY,
            },
            Constant {
                name: "E_ALIAS",
                value: ConstantValue::Int(2),
                category: CORE_CATEGORY,
            },
        ]);
        assert_eq!(severity_name(&registry, Severity::Warning), "E_WARNING && E_ALIAS");
    }

    #[test]
    fn unresolved_severity_is_unknown() {
        let only_other = ConstantRegistry::new(vec![Constant {
            name: "PAGE_SIZE",
            value: ConstantValue::Int(4096),
            category: CORE_CATEGORY,
        }]);
        assert_eq!(severity_name(&only_other, Severity::RecoverableError), "UNKNOWN");
        assert_eq!(
            severity_name(&ConstantRegistry::new(Vec::new()), Severity::Error),
            "UNKNOWN"
        );
    }

    // Reports reach both halves of a paired reporter.
    #[test]
    fn paired_reporters_both_receive() {
        let pair = (
            ConsoleReporter::new(Vec::new(), ReporterConfig::default()),
            ConsoleReporter::new(Vec::new(), ReporterConfig::default()),
        );
        pair.report("x", "op", Severity::Notice);
        let (a, b) = pair;
        assert_eq!(captured(a), "(E_NOTICE) : x op\n");
        assert_eq!(captured(b), "(E_NOTICE) : x op\n");
    }
}
