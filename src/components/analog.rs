use crate::components::{Component, Input, InputRole};
use crate::protocol::Packet;

/// Polling strategy for one analog channel.
pub struct AnalogSource {
    channel: u8,
}

impl InputRole for AnalogSource {
    type Value = u16;

    fn create_request(&self) -> Packet {
        Packet::AnalogInput {
            channel: self.channel,
        }
    }

    fn accept(&self, packet: &Packet) -> Option<u16> {
        match packet {
            Packet::AnalogValue { channel, value } if *channel == self.channel => Some(*value),
            _ => None,
        }
    }
}

/// An analog input channel on the robot, kept up to date by polling.
pub struct AnalogInput {
    input: Input<AnalogSource>,
}

impl AnalogInput {
    pub fn new(channel: u8) -> AnalogInput {
        AnalogInput {
            input: Input::new(AnalogSource { channel }),
        }
    }

    /// Latest 10-bit reading received for the channel.
    pub fn get(&self) -> u16 {
        self.input.get()
    }
}

impl Component for AnalogInput {
    fn next_outgoing_packet(&mut self) -> Option<Packet> {
        self.input.next_outgoing_packet()
    }

    fn process_packet(&mut self, packet: &Packet) -> bool {
        self.input.process_packet(packet)
    }
}
