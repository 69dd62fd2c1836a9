//! Where dropped events are reported.
//!
//! The emitter only ever calls [`LogSink::report`] when a write hits a full
//! buffer. Sinks are infallible from the emitter's point of view: whatever goes
//! wrong inside a sink stays there.

use core::fmt;
use core::panic::Location;

use crate::catalog::EventCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    Error = 1,
    Warning,
    Info,
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Category {
    EventOverflow,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::EventOverflow => "event-overflow",
        }
    }
}

/// One dropped event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowReport {
    pub instance: u8,
    pub severity: Severity,
    pub category: Category,
    pub code: EventCode,
    /// Where `raise` was called from.
    pub source: &'static Location<'static>,
}

impl fmt::Display for OverflowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "instance {} {}: dropped {} (0x{:02X}) at {}:{}",
            self.instance,
            self.category.as_str(),
            self.code.name(),
            self.code.as_raw(),
            self.source.file(),
            self.source.line()
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OverflowReport {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "instance {=u8} {=str}: dropped {=str} at {=str}:{=u32}",
            self.instance,
            self.category.as_str(),
            self.code.name(),
            self.source.file(),
            self.source.line()
        )
    }
}

/// Receiver for overflow reports. Called from interrupt context, so keep it short.
pub trait LogSink {
    fn report(&self, report: &OverflowReport);
}

impl<S: LogSink + ?Sized> LogSink for &S {
    #[inline]
    fn report(&self, report: &OverflowReport) {
        (**self).report(report)
    }
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    #[inline]
    fn report(&self, _report: &OverflowReport) {}
}

/// Forwards reports to the `log` facade at the matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacadeSink;

impl LogSink for LogFacadeSink {
    fn report(&self, report: &OverflowReport) {
        let level = match report.severity {
            Severity::Error => log::Level::Error,
            Severity::Warning => log::Level::Warn,
            Severity::Info => log::Level::Info,
            Severity::Debug => log::Level::Debug,
        };
        log::log!(target: "smbus_events", level, "{report}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn display_carries_name_code_and_site() {
        let source = Location::caller();
        let report = OverflowReport {
            instance: 3,
            severity: Severity::Error,
            category: Category::EventOverflow,
            code: EventCode::TargetDataIrq,
            source,
        };
        let text = report.to_string();
        assert!(text.starts_with("instance 3 event-overflow: dropped E_TARGET_DATA_IRQ (0x03) at "));
        assert!(text.ends_with(&std::format!(":{}", source.line())));
    }

    #[test]
    fn severities_order_like_log_levels() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Info < Severity::Debug);
    }
}
