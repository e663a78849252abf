//! # Status Replies
//!
//! After a status request, and on its own while printing, the printer sends
//! 32-byte status frames.
//!
//! | Offset | Meaning |
//! |--------|---------|
//! | 0 | print head mark, always 0x80 |
//! | 1 | frame size, always 0x20 |
//! | 8 | error information 1 (bit flags) |
//! | 9 | error information 2 (bit flags) |
//! | 10 | media width (mm) |
//! | 11 | media type |
//! | 17 | media length (mm) |
//! | 18 | status type |
//! | 19 | phase type |

/// Length of one status frame.
pub const STATUS_LEN: usize = 32;

const ERROR_INFO_1: [(u8, &str); 7] = [
    (0x01, "No media when printing"),
    (0x02, "End of media (die-cut size only)"),
    (0x04, "Tape cutter jam"),
    (0x10, "Main unit in use"),
    (0x20, "Printer turned off"),
    (0x40, "High-voltage adapter"),
    (0x80, "Fan doesn't work"),
];

const ERROR_INFO_2: [(u8, &str); 7] = [
    (0x01, "Replace media error"),
    (0x02, "Expansion buffer full error"),
    (0x04, "Transmission / Communication error"),
    (0x08, "Communication buffer full error"),
    (0x10, "Cover opened while printing"),
    (0x40, "Media cannot be fed"),
    (0x80, "System error"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    Reply,
    PrintingCompleted,
    ErrorOccurred,
    TurnedOff,
    Notification,
    PhaseChange,
    Unknown(u8),
}

impl From<u8> for StatusType {
    fn from(b: u8) -> Self {
        match b {
            0x00 => Self::Reply,
            0x01 => Self::PrintingCompleted,
            0x02 => Self::ErrorOccurred,
            0x04 => Self::TurnedOff,
            0x05 => Self::Notification,
            0x06 => Self::PhaseChange,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Receiving,
    Printing,
    Unknown(u8),
}

impl From<u8> for Phase {
    fn from(b: u8) -> Self {
        match b {
            0x00 => Self::Receiving,
            0x01 => Self::Printing,
            other => Self::Unknown(other),
        }
    }
}

/// A decoded status frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub status_type: StatusType,
    pub phase: Phase,
    pub errors: Vec<&'static str>,
    pub media_width: u8,
    pub media_length: u8,
    pub media_type: u8,
}

impl Status {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Decode one frame. Returns `None` when the bytes are not a status frame.
pub fn parse(frame: &[u8]) -> Option<Status> {
    if frame.len() != STATUS_LEN || frame[0] != 0x80 || frame[1] != 0x20 {
        return None;
    }

    let errors = ERROR_INFO_1
        .iter()
        .filter(|(bit, _)| frame[8] & bit != 0)
        .chain(ERROR_INFO_2.iter().filter(|(bit, _)| frame[9] & bit != 0))
        .map(|&(_, name)| name)
        .collect();

    Some(Status {
        status_type: frame[18].into(),
        phase: frame[19].into(),
        errors,
        media_width: frame[10],
        media_length: frame[17],
        media_type: frame[11],
    })
}

/// Build a frame, for tests and simulated backends.
pub fn frame(status_type: u8, phase: u8, error_1: u8, error_2: u8) -> [u8; STATUS_LEN] {
    let mut f = [0u8; STATUS_LEN];
    f[0] = 0x80;
    f[1] = 0x20;
    f[2] = b'B';
    f[8] = error_1;
    f[9] = error_2;
    f[18] = status_type;
    f[19] = phase;
    f
}
