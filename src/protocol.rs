//! Outbound command message codec.
//!
//! Messages are key/value dictionaries in the companion transport layout:
//! ```text
//! Byte 0:     Tuple count
//! Per tuple:  [key: u32 LE][type: u8][length: u16 LE][value: length bytes]
//! ```
//!
//! The watch only ever sends one tuple, `{CMD_KEY: Uint8(command)}`:
//! ```text
//! 01 | 00 00 00 00 | 02 | 01 00 | 01 or 02
//! ```

use crate::config::{CMD_KEY, CMD_START, CMD_STOP};
use crate::error::Error;

/// Size of the single-tuple command dictionary.
pub const COMMAND_MESSAGE_SIZE: usize = 1 + TUPLE_HEADER_SIZE + 1;

/// key (4) + type (1) + length (2).
const TUPLE_HEADER_SIZE: usize = 7;

/// Value type tag of a dictionary tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TupleType {
    ByteArray = 0,
    CString = 1,
    Uint = 2,
    Int = 3,
}

impl TupleType {
    fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(TupleType::ByteArray),
            1 => Some(TupleType::CString),
            2 => Some(TupleType::Uint),
            3 => Some(TupleType::Int),
            _ => None,
        }
    }
}

/// Request sent to the phone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Start ringing.
    Start,
    /// Stop ringing.
    Stop,
}

impl Command {
    pub const fn code(self) -> u8 {
        match self {
            Command::Start => CMD_START,
            Command::Stop => CMD_STOP,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            CMD_START => Some(Command::Start),
            CMD_STOP => Some(Command::Stop),
            _ => None,
        }
    }
}

/// Write `{CMD_KEY: cmd}` into `buf`. Returns the number of bytes written.
pub fn encode_command(cmd: Command, buf: &mut [u8]) -> Result<usize, Error> {
    if buf.len() < COMMAND_MESSAGE_SIZE {
        return Err(Error::BufferOverflow);
    }

    buf[0] = 1;
    buf[1..5].copy_from_slice(&CMD_KEY.to_le_bytes());
    buf[5] = TupleType::Uint as u8;
    buf[6..8].copy_from_slice(&1u16.to_le_bytes());
    buf[8] = cmd.code();
    Ok(COMMAND_MESSAGE_SIZE)
}

/// Find the command tuple in a dictionary and decode it.
///
/// Accepts integer tuples of width 1, 2 or 4 under `CMD_KEY`; other tuples
/// are skipped.
pub fn decode_command(data: &[u8]) -> Option<Command> {
    let (&count, mut rest) = data.split_first()?;

    for _ in 0..count {
        if rest.len() < TUPLE_HEADER_SIZE {
            return None;
        }
        let key = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);
        let kind = TupleType::from_u8(rest[4]);
        let len = u16::from_le_bytes([rest[5], rest[6]]) as usize;
        let value = rest.get(TUPLE_HEADER_SIZE..TUPLE_HEADER_SIZE + len)?;

        if key == CMD_KEY && matches!(kind, Some(TupleType::Uint | TupleType::Int)) {
            let code = match value {
                [b] => *b as u32,
                [a, b] => u16::from_le_bytes([*a, *b]) as u32,
                [a, b, c, d] => u32::from_le_bytes([*a, *b, *c, *d]),
                _ => return None,
            };
            return u8::try_from(code).ok().and_then(Command::from_code);
        }

        rest = &rest[TUPLE_HEADER_SIZE + len..];
    }
    None
}
