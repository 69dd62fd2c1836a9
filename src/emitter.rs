//! The single entry point every signal source posts events through.
//!
//! Interrupt handlers and driver logic call [`raise`] with the event they
//! observed. Entry points taking `Option<&Instance>` absorb a missing instance
//! without side effects, so callers never need to check first.

use core::panic::Location;

use crate::catalog::EventCode;
use crate::instance::Instance;
use crate::sink::{Category, LogSink, OverflowReport, Severity};

/// Queue `code` on `instance`.
///
/// - `None`: returns immediately; nothing is queued or reported.
/// - Full queue: the event is dropped and an [`OverflowReport`] naming the
///   caller's location goes to the instance's sink. No retry.
/// - [`EventCode::SendNextByte`] and [`EventCode::IsPecRequired`] set the
///   instance's trigger flag whether or not the write succeeded.
///
/// Never blocks; safe to call from interrupt context.
#[track_caller]
pub fn raise<S: LogSink + ?Sized, const N: usize>(
    instance: Option<&Instance<'_, S, N>>,
    code: EventCode,
) {
    let Some(instance) = instance else {
        return;
    };

    if instance.events().try_write(code).is_err() {
        instance.sink().report(&OverflowReport {
            instance: instance.id(),
            severity: Severity::Error,
            category: Category::EventOverflow,
            code,
            source: Location::caller(),
        });
    }

    if code.is_trigger_hint() {
        instance.set_trigger();
    }
}

/// Consumer-side drain primitive; `None` when empty or without an instance.
#[inline]
pub fn try_consume_one<S: LogSink + ?Sized, const N: usize>(
    instance: Option<&Instance<'_, S, N>>,
) -> Option<EventCode> {
    instance?.try_consume_one()
}

/// Read and clear the trigger flag; `false` without an instance.
#[inline]
pub fn take_trigger<S: LogSink + ?Sized, const N: usize>(
    instance: Option<&Instance<'_, S, N>>,
) -> bool {
    instance.is_some_and(|instance| instance.take_trigger())
}
