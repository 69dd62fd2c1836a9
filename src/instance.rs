//! One bus instance's event state: its queue, its re-trigger flag, and the sink
//! it reports dropped events to.

#[cfg(not(feature = "portable-atomic"))]
use core::sync::atomic::{AtomicBool, Ordering};
#[cfg(feature = "portable-atomic")]
use portable_atomic::{AtomicBool, Ordering};

use crate::catalog::EventCode;
use crate::emitter;
use crate::error::Result;
use crate::event_buffer::EventBuffer;
use crate::sink::LogSink;

/// Per-instance queue depth the driver has historically shipped with.
pub const DEFAULT_EVENT_CAPACITY: usize = 300;

/// Outcome of one consumer cycle.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainStats {
    /// Events handed to the state machine.
    pub read: usize,
    /// Whether the trigger flag was set when the cycle started.
    pub triggered: bool,
}

impl core::ops::AddAssign for DrainStats {
    fn add_assign(&mut self, rhs: Self) {
        self.read += rhs.read;
        self.triggered |= rhs.triggered;
    }
}

/// Event state owned by a single bus instance.
///
/// All methods take `&self`, so an instance can sit in a `static` shared by the
/// interrupt handler (producer) and the main loop (consumer). Exactly one of
/// each is expected.
pub struct Instance<'a, S: LogSink + ?Sized, const N: usize = DEFAULT_EVENT_CAPACITY> {
    id: u8,
    events: EventBuffer<EventCode, N>,
    trigger: AtomicBool,
    sink: &'a S,
}

impl<'a, S: LogSink + ?Sized, const N: usize> Instance<'a, S, N> {
    pub const fn new(id: u8, sink: &'a S) -> Self {
        Self {
            id,
            events: EventBuffer::new(),
            trigger: AtomicBool::new(false),
            sink,
        }
    }

    /// Reset the queue to `capacity` slots and clear the trigger flag.
    pub fn initialize(&mut self, capacity: usize) -> Result<()> {
        self.events.initialize(capacity)?;
        *self.trigger.get_mut() = false;
        Ok(())
    }

    #[inline]
    pub const fn id(&self) -> u8 {
        self.id
    }

    #[inline]
    pub fn events(&self) -> &EventBuffer<EventCode, N> {
        &self.events
    }

    #[inline]
    pub fn sink(&self) -> &S {
        self.sink
    }

    /// Post `code` from any context. See [`emitter::raise`].
    #[track_caller]
    #[inline]
    pub fn raise(&self, code: EventCode) {
        emitter::raise(Some(self), code)
    }

    /// Take the oldest queued event, if any.
    #[inline]
    pub fn try_consume_one(&self) -> Option<EventCode> {
        self.events.try_read().ok().map(|(code, _)| code)
    }

    #[inline]
    pub fn is_triggered(&self) -> bool {
        self.trigger.load(Ordering::Acquire)
    }

    /// Read and clear the trigger flag.
    #[inline]
    pub fn take_trigger(&self) -> bool {
        self.trigger.swap(false, Ordering::AcqRel)
    }

    #[inline]
    pub(crate) fn set_trigger(&self) {
        self.trigger.store(true, Ordering::Release);
    }

    /// Run one consumer cycle.
    ///
    /// Drains the queue into `hook` when `interrupt_fired` is set or the
    /// trigger flag was raised. The flag is cleared before draining so a hint
    /// raised from inside `hook` schedules the next cycle.
    pub fn service(&self, interrupt_fired: bool, mut hook: impl FnMut(EventCode)) -> DrainStats {
        let triggered = self.take_trigger();
        if !interrupt_fired && !triggered {
            return DrainStats::default();
        }

        let read = self.events.drain(|_, code| hook(code));
        log::trace!(
            "instance {}: drained {read} event(s) (irq {interrupt_fired}, trigger {triggered})",
            self.id
        );
        DrainStats { read, triggered }
    }
}

impl<S: LogSink + ?Sized, const N: usize> core::fmt::Debug for Instance<'_, S, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.id)
            .field("events", &self.events)
            .field("triggered", &self.is_triggered())
            .finish()
    }
}

/// Run [`Instance::service`] on each instance in order, tagging events with the
/// instance id. Returns the combined stats.
pub fn service_all<S: LogSink + ?Sized, const N: usize>(
    instances: &[&Instance<'_, S, N>],
    interrupt_fired: bool,
    mut hook: impl FnMut(u8, EventCode),
) -> DrainStats {
    let mut total = DrainStats::default();
    for instance in instances {
        let id = instance.id();
        total += instance.service(interrupt_fired, |code| hook(id, code));
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;
    use std::vec::Vec;

    #[test]
    fn service_skips_quiet_cycles() {
        let inst = Instance::<_, 8>::new(0, &NullSink);
        inst.events().try_write(EventCode::TargetWriteIrq).unwrap();

        let stats = inst.service(false, |_| panic!("nothing should be delivered"));
        assert_eq!(stats, DrainStats::default());
        assert_eq!(inst.events().len(), 1);
    }

    #[test]
    fn service_drains_on_interrupt() {
        let inst = Instance::<_, 8>::new(1, &NullSink);
        inst.raise(EventCode::TargetWriteIrq);
        inst.raise(EventCode::TargetDataIrq);

        let mut seen = Vec::new();
        let stats = inst.service(true, |code| seen.push(code));
        assert_eq!(stats, DrainStats { read: 2, triggered: false });
        assert_eq!(seen, [EventCode::TargetWriteIrq, EventCode::TargetDataIrq]);
        assert!(inst.events().is_empty());
    }

    #[test]
    fn trigger_forces_a_cycle_and_is_cleared() {
        let inst = Instance::<_, 8>::new(2, &NullSink);
        inst.raise(EventCode::SendNextByte);
        assert!(inst.is_triggered());

        let stats = inst.service(false, |_| {});
        assert_eq!(stats, DrainStats { read: 1, triggered: true });
        assert!(!inst.is_triggered());

        let stats = inst.service(false, |_| {});
        assert_eq!(stats.read, 0);
        assert!(!stats.triggered);
    }

    #[test]
    fn hint_raised_while_draining_schedules_next_cycle() {
        let inst = Instance::<_, 8>::new(3, &NullSink);
        inst.raise(EventCode::TargetReadIrq);

        let stats = inst.service(true, |code| {
            if code == EventCode::TargetReadIrq {
                inst.raise(EventCode::IsPecRequired);
            }
        });
        // The hint lands behind the read and is drained in the same pass.
        assert_eq!(stats.read, 2);
        assert!(inst.take_trigger());
    }

    #[test]
    fn initialize_clears_trigger_and_queue() {
        let mut inst = Instance::<_, 8>::new(4, &NullSink);
        inst.raise(EventCode::IsPecRequired);
        inst.initialize(2).unwrap();
        assert!(!inst.is_triggered());
        assert_eq!(inst.try_consume_one(), None);
        assert_eq!(inst.events().capacity(), 2);
    }

    #[test]
    fn service_all_tags_by_instance() {
        let a = Instance::<_, 4>::new(0, &NullSink);
        let b = Instance::<_, 4>::new(6, &NullSink);
        a.raise(EventCode::ControllerDoneIrq);
        b.raise(EventCode::TargetDoneIrq);
        b.raise(EventCode::TargetDescIrq);

        let mut seen = Vec::new();
        let stats = service_all(&[&a, &b], true, |id, code| seen.push((id, code)));
        assert_eq!(stats.read, 3);
        assert_eq!(
            seen,
            [
                (0, EventCode::ControllerDoneIrq),
                (6, EventCode::TargetDoneIrq),
                (6, EventCode::TargetDescIrq),
            ]
        );
    }
}
