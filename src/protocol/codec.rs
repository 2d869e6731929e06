use std::io::Read;

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::protocol::{create_packet, Motor, MotorDirection, Packet, PinDirection};

/// Reserved byte marking both ends of a frame. Content bytes never carry it.
pub const FRAME_BOUND: u8 = 0xFF;

/// Number of digit bytes in an encoder count field.
const COUNT_DIGITS: u32 = 5;

/// A packet produced by `decode`, together with whether its frame was
/// structurally well formed.
///
/// A malformed frame (premature or missing trailer, truncated stream) still
/// yields a best-effort packet so the caller can inspect it; `valid` is false
/// and the caller is expected to discard it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPacket {
    pub packet: Packet,
    pub valid: bool,
}

/// Appends the complete frame for `packet` to `out`.
///
/// The per-kind byte mappings are deliberately not uniform (several kinds
/// encode the same logical boolean with opposite values); each arm below is
/// the authoritative wire mapping for its kind.
pub fn encode(packet: &Packet, out: &mut Vec<u8>) {
    out.write_u8(FRAME_BOUND).unwrap();
    out.write_u8(packet.binary_id()).unwrap();
    match packet {
        Packet::Ping | Packet::Acknowledge => {}
        Packet::DigitalOutput { channel, value } | Packet::DigitalValue { channel, value } => {
            out.write_u8(*channel).unwrap();
            out.write_u8(bool_byte(*value)).unwrap();
        }
        Packet::DigitalInput { channel } => {
            out.write_u8(*channel).unwrap();
        }
        Packet::AnalogInput { channel } => {
            out.write_u8(channel.wrapping_add(1)).unwrap();
        }
        Packet::AnalogValue { channel, value } => {
            out.write_u8(channel.wrapping_add(1)).unwrap();
            // 10-bit reading split into two 5-bit digits, high first.
            out.write_u8(((value >> 5) + 1) as u8).unwrap();
            out.write_u8(((value & 0x1F) + 1) as u8).unwrap();
        }
        Packet::PinConfig { channel, direction } | Packet::PinConfigInfo { channel, direction } => {
            out.write_u8(*channel).unwrap();
            out.write_u8(direction_byte(*direction)).unwrap();
        }
        Packet::MotorDrive {
            motor,
            speed,
            direction,
        } => {
            out.write_u8(motor_byte(*motor)).unwrap();
            out.write_u8(drive_direction_byte(*direction)).unwrap();
            // Speed split into two 4-bit digits, high first.
            out.write_u8((speed >> 4) + 1).unwrap();
            out.write_u8((speed & 0x0F) + 1).unwrap();
        }
        Packet::EncoderInput { right } => {
            out.write_u8(if *right { 2 } else { 1 }).unwrap();
        }
        Packet::EncoderClear { right } => {
            out.write_u8(if *right { 1 } else { 2 }).unwrap();
        }
        Packet::EncoderCount { right, count } => {
            out.write_u8(if *right { 1 } else { 2 }).unwrap();
            encode_count(*count, out);
        }
    }
    out.write_u8(FRAME_BOUND).unwrap();
}

/// Convenience wrapper returning the frame as a fresh buffer.
pub fn encode_to_vec(packet: &Packet) -> Vec<u8> {
    let mut out = Vec::new();
    encode(packet, &mut out);
    out
}

/// Writes the five digit bytes of a signed encoder count, most significant
/// first.
///
/// Byte `i` (counting the last byte as 0) carries the arithmetic shift
/// `count >> 4i`, masked to 7 bits for the upper four bytes and to 4 bits for
/// the last one, biased by +1 so every byte lands in [1, 128]. The decoder
/// only keeps the low nibble of each digit, so counts round-trip over the
/// 20-bit two's-complement range.
fn encode_count(count: i32, out: &mut Vec<u8>) {
    for i in (1..COUNT_DIGITS).rev() {
        let digit = count >> (4 * i);
        out.write_u8(((digit & 0x7F) as u8) + 1).unwrap();
    }
    out.write_u8(((count & 0x0F) as u8) + 1).unwrap();
}

/// Reads one frame from `reader`.
///
/// Returns `None` when the stream is exhausted, when the leading byte is not
/// a frame boundary (the byte is consumed, letting the caller resynchronize on
/// the next boundary), or when the binary id is unknown. A structurally
/// malformed body never fails the read; it is reported through
/// `DecodedPacket::valid` instead.
pub fn decode<R: Read>(reader: &mut R) -> Option<DecodedPacket> {
    let lead = reader.read_u8().ok()?;
    if lead != FRAME_BOUND {
        log::debug!("Skipping byte {:#04x} while looking for a frame boundary", lead);
        return None;
    }
    let id = reader.read_u8().ok()?;
    let template = match create_packet(id) {
        Some(template) => template,
        None => {
            log::debug!("Ignoring frame with unknown binary id {:#04x}", id);
            return None;
        }
    };
    Some(read_body(reader, template))
}

/// Reads the content bytes and trailer for the kind given by `template`.
fn read_body<R: Read>(reader: &mut R, template: Packet) -> DecodedPacket {
    let mut body = BodyReader::new(reader);
    let packet = match template {
        Packet::Ping => Packet::Ping,
        Packet::Acknowledge => Packet::Acknowledge,
        Packet::DigitalOutput { .. } => {
            let channel = body.content_byte().unwrap_or(0);
            let value = body.content_byte().map_or(false, is_true);
            Packet::DigitalOutput { channel, value }
        }
        Packet::DigitalInput { .. } => {
            let channel = body.content_byte().unwrap_or(0);
            Packet::DigitalInput { channel }
        }
        Packet::DigitalValue { .. } => {
            let channel = body.content_byte().unwrap_or(0);
            let value = body.content_byte().map_or(false, is_true);
            Packet::DigitalValue { channel, value }
        }
        Packet::AnalogInput { .. } => {
            let channel = body.content_byte().unwrap_or(1).wrapping_sub(1);
            Packet::AnalogInput { channel }
        }
        Packet::AnalogValue { .. } => {
            let channel = body.content_byte().unwrap_or(1).wrapping_sub(1);
            let high = body.content_byte().unwrap_or(1).wrapping_sub(1);
            let low = body.content_byte().unwrap_or(1).wrapping_sub(1);
            let value = (u16::from(high) << 5) | u16::from(low);
            Packet::AnalogValue { channel, value }
        }
        Packet::PinConfig { .. } => {
            let channel = body.content_byte().unwrap_or(0);
            let direction = direction_from_byte(body.content_byte().unwrap_or(0));
            Packet::PinConfig { channel, direction }
        }
        Packet::PinConfigInfo { .. } => {
            let channel = body.content_byte().unwrap_or(0);
            let direction = direction_from_byte(body.content_byte().unwrap_or(0));
            Packet::PinConfigInfo { channel, direction }
        }
        Packet::MotorDrive { .. } => {
            let motor = motor_from_byte(body.content_byte().unwrap_or(0));
            let direction = drive_direction_from_byte(body.content_byte().unwrap_or(0));
            let high = body.content_byte().unwrap_or(1).wrapping_sub(1);
            let low = body.content_byte().unwrap_or(1).wrapping_sub(1);
            let speed = ((high & 0x0F) << 4) | (low & 0x0F);
            Packet::MotorDrive {
                motor,
                speed,
                direction,
            }
        }
        Packet::EncoderInput { .. } => {
            let right = body.content_byte() == Some(2);
            Packet::EncoderInput { right }
        }
        Packet::EncoderClear { .. } => {
            let right = body.content_byte() == Some(1);
            Packet::EncoderClear { right }
        }
        Packet::EncoderCount { .. } => {
            let right = body.content_byte() == Some(1);
            let count = body.count();
            Packet::EncoderCount { right, count }
        }
    };
    body.finish();
    DecodedPacket {
        packet,
        valid: body.valid,
    }
}

/// Tracks structural validity while reading one frame body.
struct BodyReader<'a, R: Read> {
    reader: &'a mut R,
    valid: bool,
    ended: bool,
}

impl<'a, R: Read> BodyReader<'a, R> {
    fn new(reader: &'a mut R) -> BodyReader<'a, R> {
        BodyReader {
            reader,
            valid: true,
            ended: false,
        }
    }

    /// Next content byte, or `None` if the frame ended early. A premature
    /// trailer or a truncated stream marks the packet invalid.
    fn content_byte(&mut self) -> Option<u8> {
        if self.ended {
            return None;
        }
        match self.reader.read_u8() {
            Ok(FRAME_BOUND) => {
                self.ended = true;
                self.valid = false;
                None
            }
            Ok(byte) => Some(byte),
            Err(_) => {
                self.ended = true;
                self.valid = false;
                None
            }
        }
    }

    /// Reads the five digit bytes of an encoder count.
    fn count(&mut self) -> i32 {
        let mut raw: u32 = 0;
        for _ in 0..COUNT_DIGITS {
            match self.content_byte() {
                Some(byte) => raw = (raw << 4) | u32::from(byte.wrapping_sub(1) & 0x0F),
                None => return 0,
            }
        }
        // The digits carry a 20-bit two's-complement value.
        ((raw << 12) as i32) >> 12
    }

    /// Consumes the trailing boundary byte, unless the frame already ended.
    fn finish(&mut self) {
        if self.ended {
            return;
        }
        match self.reader.read_u8() {
            Ok(FRAME_BOUND) => {}
            _ => self.valid = false,
        }
    }
}

fn bool_byte(value: bool) -> u8 {
    if value {
        2
    } else {
        1
    }
}

fn is_true(byte: u8) -> bool {
    byte == 2
}

fn direction_byte(direction: PinDirection) -> u8 {
    match direction {
        PinDirection::Input => 2,
        PinDirection::Output => 1,
    }
}

fn direction_from_byte(byte: u8) -> PinDirection {
    if byte == 2 {
        PinDirection::Input
    } else {
        PinDirection::Output
    }
}

fn motor_byte(motor: Motor) -> u8 {
    match motor {
        Motor::Right => 1,
        Motor::Left => 2,
    }
}

fn motor_from_byte(byte: u8) -> Motor {
    if byte == 1 {
        Motor::Right
    } else {
        Motor::Left
    }
}

fn drive_direction_byte(direction: MotorDirection) -> u8 {
    match direction {
        MotorDirection::Forward => 1,
        MotorDirection::Backward => 2,
    }
}

fn drive_direction_from_byte(byte: u8) -> MotorDirection {
    if byte == 2 {
        MotorDirection::Backward
    } else {
        MotorDirection::Forward
    }
}
