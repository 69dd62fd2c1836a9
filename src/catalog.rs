//! Event codes and their diagnostic names.
//!
//! Codes are stable `u8` values so they can be logged raw and correlated
//! across firmware versions. Names are the historical identifiers and must not
//! change for the same reason.

use core::fmt;

/// Name returned by [`name_of`] for any value outside the catalog.
pub const UNKNOWN_EVENT_NAME: &str = "UNKNOWN";

/// Which side of the bus produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Raised by the target (slave) interrupt path.
    Target,
    /// Raised by the controller (master) interrupt path.
    Controller,
    /// Raised by driver logic, never by hardware.
    Software,
}

/// Every event the state machine can be fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EventCode {
    TargetWriteIrq = 0x01,
    TargetReadIrq = 0x02,
    TargetDataIrq = 0x03,
    TargetDoneIrq = 0x04,
    TargetDescIrq = 0x05,
    TargetLoaErrorIrq = 0x06,
    TargetPecErrorIrq = 0x07,
    TargetPhyTextTimeoutErrorIrq = 0x08,
    TargetRxFifoErrorIrq = 0x09,
    TargetRxFifoOverflowErrorIrq = 0x0A,
    TargetRxFifoUnderflowErrorIrq = 0x0B,
    TargetDescFifoErrorIrq = 0x0C,
    TargetDescFifoOverflowErrorIrq = 0x0D,
    TargetDescFifoUnderflowErrorIrq = 0x0E,
    TargetDescErrorIrq = 0x0F,
    TargetPhyUnexpectedBusIdleErrorIrq = 0x10,
    TargetPhySmbdatLowTimeoutErrorIrq = 0x11,
    TargetPhySmbclkLowTimeoutErrorIrq = 0x12,
    ControllerWriteIrq = 0x13,
    ControllerReadIrq = 0x14,
    ControllerDataIrq = 0x15,
    ControllerDoneIrq = 0x16,
    ControllerDescFifoAlmostEmptyIrq = 0x17,
    ControllerLoaErrorIrq = 0x18,
    ControllerNackErrorIrq = 0x19,
    ControllerPecErrorIrq = 0x1A,
    ControllerPhyTextTimeoutErrorIrq = 0x1B,
    ControllerPhyCextTimeoutErrorIrq = 0x1C,
    ControllerRxFifoErrorIrq = 0x1D,
    ControllerRxFifoOverflowErrorIrq = 0x1E,
    ControllerRxFifoUnderflowErrorIrq = 0x1F,
    ControllerDescFifoErrorIrq = 0x20,
    ControllerDescFifoOverflowErrorIrq = 0x21,
    ControllerDescFifoUnderflowErrorIrq = 0x22,
    ControllerDescErrorIrq = 0x23,
    /// Software hint: the state machine has another byte to push.
    SendNextByte = 0x24,
    /// Software hint: decide whether a PEC byte follows.
    IsPecRequired = 0x25,
    DescFifoAlmostEmptyIrq = 0x26,
}

impl EventCode {
    /// All codes in ascending numeric order.
    pub const ALL: [EventCode; 38] = [
        EventCode::TargetWriteIrq,
        EventCode::TargetReadIrq,
        EventCode::TargetDataIrq,
        EventCode::TargetDoneIrq,
        EventCode::TargetDescIrq,
        EventCode::TargetLoaErrorIrq,
        EventCode::TargetPecErrorIrq,
        EventCode::TargetPhyTextTimeoutErrorIrq,
        EventCode::TargetRxFifoErrorIrq,
        EventCode::TargetRxFifoOverflowErrorIrq,
        EventCode::TargetRxFifoUnderflowErrorIrq,
        EventCode::TargetDescFifoErrorIrq,
        EventCode::TargetDescFifoOverflowErrorIrq,
        EventCode::TargetDescFifoUnderflowErrorIrq,
        EventCode::TargetDescErrorIrq,
        EventCode::TargetPhyUnexpectedBusIdleErrorIrq,
        EventCode::TargetPhySmbdatLowTimeoutErrorIrq,
        EventCode::TargetPhySmbclkLowTimeoutErrorIrq,
        EventCode::ControllerWriteIrq,
        EventCode::ControllerReadIrq,
        EventCode::ControllerDataIrq,
        EventCode::ControllerDoneIrq,
        EventCode::ControllerDescFifoAlmostEmptyIrq,
        EventCode::ControllerLoaErrorIrq,
        EventCode::ControllerNackErrorIrq,
        EventCode::ControllerPecErrorIrq,
        EventCode::ControllerPhyTextTimeoutErrorIrq,
        EventCode::ControllerPhyCextTimeoutErrorIrq,
        EventCode::ControllerRxFifoErrorIrq,
        EventCode::ControllerRxFifoOverflowErrorIrq,
        EventCode::ControllerRxFifoUnderflowErrorIrq,
        EventCode::ControllerDescFifoErrorIrq,
        EventCode::ControllerDescFifoOverflowErrorIrq,
        EventCode::ControllerDescFifoUnderflowErrorIrq,
        EventCode::ControllerDescErrorIrq,
        EventCode::SendNextByte,
        EventCode::IsPecRequired,
        EventCode::DescFifoAlmostEmptyIrq,
    ];

    #[inline]
    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Look up a code by its raw value.
    #[inline]
    pub const fn from_raw(raw: u8) -> Option<EventCode> {
        match raw {
            0x01..=0x26 => Some(Self::ALL[(raw - 1) as usize]),
            _ => None,
        }
    }

    /// The two software hints that force the consumer to run again.
    #[inline]
    pub const fn is_trigger_hint(self) -> bool {
        matches!(self, EventCode::SendNextByte | EventCode::IsPecRequired)
    }

    pub const fn role(self) -> Role {
        match self as u8 {
            0x01..=0x12 => Role::Target,
            0x24 | 0x25 => Role::Software,
            // 0x26 comes from the controller branch of the interrupt handler.
            _ => Role::Controller,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            EventCode::TargetWriteIrq => "E_TARGET_WRITE_IRQ",
            EventCode::TargetReadIrq => "E_TARGET_READ_IRQ",
            EventCode::TargetDataIrq => "E_TARGET_DATA_IRQ",
            EventCode::TargetDoneIrq => "E_TARGET_DONE_IRQ",
            EventCode::TargetDescIrq => "E_TARGET_DESC_IRQ",
            EventCode::TargetLoaErrorIrq => "E_TARGET_LOA_ERROR_IRQ",
            EventCode::TargetPecErrorIrq => "E_TARGET_PEC_ERROR_IRQ",
            EventCode::TargetPhyTextTimeoutErrorIrq => "E_TARGET_PHY_TEXT_TIMEOUT_ERROR_IRQ",
            EventCode::TargetRxFifoErrorIrq => "E_TARGET_RX_FIFO_ERROR_ERROR_IRQ",
            EventCode::TargetRxFifoOverflowErrorIrq => "E_TARGET_RX_FIFO_OVERFLOW_ERROR_IRQ",
            EventCode::TargetRxFifoUnderflowErrorIrq => "E_TARGET_RX_FIFO_UNDERFLOW_ERROR_IRQ",
            EventCode::TargetDescFifoErrorIrq => "E_TARGET_DESC_FIFO_ERROR_IRQ",
            EventCode::TargetDescFifoOverflowErrorIrq => "E_TARGET_DESC_FIFO_OVERFLOW_ERROR_IRQ",
            EventCode::TargetDescFifoUnderflowErrorIrq => "E_TARGET_DESC_FIFO_UNDERFLOW_ERROR_IRQ",
            EventCode::TargetDescErrorIrq => "E_TARGET_DESC_ERROR_IRQ",
            EventCode::TargetPhyUnexpectedBusIdleErrorIrq => {
                "E_TARGET_PHY_UNEXPTD_BUS_IDLE_ERROR_IRQ"
            }
            EventCode::TargetPhySmbdatLowTimeoutErrorIrq => {
                "E_TARGET_PHY_SMBDAT_LOW_TIMEOUT_DESC_ERROR_IRQ"
            }
            EventCode::TargetPhySmbclkLowTimeoutErrorIrq => {
                "E_TARGET_PHY_SMBCLK_LOW_TIMEOUT_ERROR_IRQ"
            }
            EventCode::ControllerWriteIrq => "E_CONTROLLER_WRITE_IRQ",
            EventCode::ControllerReadIrq => "E_CONTROLLER_READ_IRQ",
            EventCode::ControllerDataIrq => "E_CONTROLLER_DATA_IRQ",
            EventCode::ControllerDoneIrq => "E_CONTROLLER_DONE_IRQ",
            EventCode::ControllerDescFifoAlmostEmptyIrq => {
                "E_CONTROLLER_DESC_FIFO_ALMOST_EMPTY_IRQ"
            }
            EventCode::ControllerLoaErrorIrq => "E_CONTROLLER_LOA_ERROR_IRQ",
            EventCode::ControllerNackErrorIrq => "E_CONTROLLER_NACK_ERROR_IRQ",
            EventCode::ControllerPecErrorIrq => "E_CONTROLLER_PEC_ERROR_IRQ",
            EventCode::ControllerPhyTextTimeoutErrorIrq => {
                "E_CONTROLLER_PHY_CTLR_TEXT_TIMEOUT_ERROR_IRQ"
            }
            EventCode::ControllerPhyCextTimeoutErrorIrq => {
                "E_CONTROLLER_PHY_CTLR_CEXT_TIMEOUT_ERROR_IRQ"
            }
            EventCode::ControllerRxFifoErrorIrq => "E_CONTROLLER_RX_FIFO_ERROR_IRQ",
            EventCode::ControllerRxFifoOverflowErrorIrq => {
                "E_CONTROLLER_RX_FIFO_OVERFLOW_ERROR_IRQ"
            }
            EventCode::ControllerRxFifoUnderflowErrorIrq => {
                "E_CONTROLLER_RX_FIFO_UNDERFLOW_ERROR_IRQ"
            }
            EventCode::ControllerDescFifoErrorIrq => "E_CONTROLLER_DESC_FIFO_ERROR_IRQ",
            EventCode::ControllerDescFifoOverflowErrorIrq => {
                "E_CONTROLLER_DESC_FIFO_OVERFLOW_ERROR_IRQ"
            }
            EventCode::ControllerDescFifoUnderflowErrorIrq => {
                "E_CONTROLLER_DESC_FIFO_UNDERFLOW_ERROR_IRQ"
            }
            EventCode::ControllerDescErrorIrq => "E_CONTROLLER_DESC_ERROR_IRQ",
            EventCode::SendNextByte => "E_SEND_NEXT_BYTE",
            EventCode::IsPecRequired => "E_IS_PEC_REQUIRED",
            EventCode::DescFifoAlmostEmptyIrq => "E_DESC_FIFO_ALMOST_EMPTY_IRQ",
        }
    }
}

/// Name for any raw value; [`UNKNOWN_EVENT_NAME`] outside the catalog.
#[inline]
pub const fn name_of(raw: u8) -> &'static str {
    match EventCode::from_raw(raw) {
        Some(code) => code.name(),
        None => UNKNOWN_EVENT_NAME,
    }
}

impl From<EventCode> for u8 {
    #[inline]
    fn from(code: EventCode) -> u8 {
        code.as_raw()
    }
}

impl TryFrom<u8> for EventCode {
    type Error = u8;

    #[inline]
    fn try_from(raw: u8) -> Result<Self, u8> {
        EventCode::from_raw(raw).ok_or(raw)
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
