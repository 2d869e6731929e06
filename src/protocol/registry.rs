use phf::phf_map;

use crate::protocol::{Motor, MotorDirection, Packet, PinDirection};

/// Field-default instance of every known packet kind, keyed by binary id.
static PACKET_TEMPLATES: phf::Map<u8, Packet> = phf_map! {
    0x01u8 => Packet::Ping,
    0x02u8 => Packet::DigitalOutput { channel: 0, value: false },
    0x03u8 => Packet::DigitalInput { channel: 0 },
    0x04u8 => Packet::AnalogInput { channel: 0 },
    0x05u8 => Packet::PinConfig { channel: 0, direction: PinDirection::Input },
    0x06u8 => Packet::MotorDrive {
        motor: Motor::Left,
        speed: 0,
        direction: MotorDirection::Forward,
    },
    0x07u8 => Packet::EncoderInput { right: false },
    0x08u8 => Packet::EncoderClear { right: false },
    0x81u8 => Packet::DigitalValue { channel: 0, value: false },
    0x82u8 => Packet::Acknowledge,
    0x83u8 => Packet::AnalogValue { channel: 0, value: 0 },
    0x84u8 => Packet::PinConfigInfo { channel: 0, direction: PinDirection::Input },
    0x85u8 => Packet::EncoderCount { right: false, count: 0 },
};

/// Returns a freshly constructed, field-default packet of the kind matching
/// `id`, or `None` for an unrecognized id.
///
/// The table is built once and read-only, so this is safe to call from
/// anywhere.
pub fn create_packet(id: u8) -> Option<Packet> {
    PACKET_TEMPLATES.get(&id).cloned()
}
