use crate::components::{Component, Input, InputRole, Output};
use crate::protocol::Packet;

/// Polling strategy for one digital pin.
pub struct DigitalSource {
    channel: u8,
}

impl InputRole for DigitalSource {
    type Value = bool;

    fn create_request(&self) -> Packet {
        Packet::DigitalInput {
            channel: self.channel,
        }
    }

    fn accept(&self, packet: &Packet) -> Option<bool> {
        match packet {
            Packet::DigitalValue { channel, value } if *channel == self.channel => Some(*value),
            _ => None,
        }
    }
}

/// A digital input pin on the robot, kept up to date by polling.
pub struct DigitalInput {
    input: Input<DigitalSource>,
}

impl DigitalInput {
    pub fn new(channel: u8) -> DigitalInput {
        DigitalInput {
            input: Input::new(DigitalSource { channel }),
        }
    }

    /// Latest level seen on the pin.
    pub fn get(&self) -> bool {
        self.input.get()
    }
}

impl Component for DigitalInput {
    fn next_outgoing_packet(&mut self) -> Option<Packet> {
        self.input.next_outgoing_packet()
    }

    fn process_packet(&mut self, packet: &Packet) -> bool {
        self.input.process_packet(packet)
    }
}

/// A digital output pin on the robot.
pub struct DigitalOutput {
    channel: u8,
    command: Output,
}

impl DigitalOutput {
    pub fn new(channel: u8) -> DigitalOutput {
        DigitalOutput {
            channel,
            command: Output::new(),
        }
    }

    /// Drives the pin to `value`, replacing any command not yet transmitted.
    pub fn set(&mut self, value: bool) {
        self.command.set(Packet::DigitalOutput {
            channel: self.channel,
            value,
        });
    }
}

impl Component for DigitalOutput {
    fn next_outgoing_packet(&mut self) -> Option<Packet> {
        self.command.next_outgoing_packet()
    }

    fn process_packet(&mut self, packet: &Packet) -> bool {
        self.command.process_packet(packet)
    }
}
