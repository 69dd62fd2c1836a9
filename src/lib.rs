//! Interrupt-to-main-loop event hand-off for an SMBus/I2C controller driver.
//!
//! # Highlights
//! - Fixed-capacity SPSC event queue; no allocation, never blocks.
//! - One `raise` entry point for every signal source, with drop-and-report on
//!   overflow.
//! - Two software hints (`SendNextByte`, `IsPecRequired`) that always force the
//!   next consumer cycle, even when their event could not be queued.
//!
//! # Quick start
//! ```
//! use smbus_events::{EventCode, Instance, LogFacadeSink};
//!
//! static SINK: LogFacadeSink = LogFacadeSink;
//! static BUS0: Instance<'static, LogFacadeSink, 32> = Instance::new(0, &SINK);
//!
//! // interrupt handler
//! BUS0.raise(EventCode::TargetWriteIrq);
//!
//! // main loop
//! let mut seen = None;
//! let stats = BUS0.service(true, |code| seen = Some(code));
//! assert_eq!(stats.read, 1);
//! assert_eq!(seen, Some(EventCode::TargetWriteIrq));
//! ```
//!
//! # No-std
//! The crate is `#![no_std]`. Tests require `std`.
//!
//! # Safety and concurrency
//! Each [`Instance`] expects exactly one producer context and one consumer
//! context. Slot ownership is arbitrated by a per-slot atomic state, so breaking
//! that rule can reorder or spuriously reject events but is never undefined
//! behavior. Targets without compare-and-swap should enable one of the
//! `portable-atomic-*` features.
//!
//! # Overflow
//! A full queue drops the new event and reports it to the instance's
//! [`LogSink`]. Size the queue for the most events that can arrive between two
//! guaranteed consumer cycles; producers get no other backpressure.
#![no_std]

pub mod catalog;
pub mod emitter;
pub mod error;
pub mod event_buffer;
pub mod instance;
pub mod sink;

pub use catalog::{EventCode, Role, UNKNOWN_EVENT_NAME, name_of};
pub use emitter::raise;
pub use error::{Error, Result};
pub use event_buffer::EventBuffer;
pub use instance::{DEFAULT_EVENT_CAPACITY, DrainStats, Instance, service_all};
pub use sink::{Category, LogFacadeSink, LogSink, NullSink, OverflowReport, Severity};

#[cfg(test)]
extern crate std;
