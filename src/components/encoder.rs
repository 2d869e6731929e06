use crate::components::{Component, Input, InputRole, Output};
use crate::protocol::Packet;

/// Polling strategy for one wheel encoder's signed count.
struct CountSource {
    right: bool,
}

impl InputRole for CountSource {
    type Value = i32;

    fn create_request(&self) -> Packet {
        Packet::EncoderInput { right: self.right }
    }

    fn accept(&self, packet: &Packet) -> Option<i32> {
        match packet {
            Packet::EncoderCount { right, count } if *right == self.right => Some(*count),
            _ => None,
        }
    }
}

/// A wheel encoder on one side of the robot.
///
/// The count is kept up to date by polling; `clear` queues a command that
/// resets the peripheral's count to zero.
pub struct Encoder {
    right: bool,
    counts: Input<CountSource>,
    clear_command: Output,
}

impl Encoder {
    pub fn new(right: bool) -> Encoder {
        Encoder {
            right,
            counts: Input::new(CountSource { right }),
            clear_command: Output::new(),
        }
    }

    /// Latest signed count received from the peripheral.
    pub fn get(&self) -> i32 {
        self.counts.get()
    }

    /// Queues a command resetting the count to zero. Replaces a clear that
    /// was not yet transmitted.
    pub fn clear(&mut self) {
        self.clear_command.set(Packet::EncoderClear { right: self.right });
    }
}

impl Component for Encoder {
    fn next_outgoing_packet(&mut self) -> Option<Packet> {
        // A pending clear goes out ahead of the next count request; still at
        // most one packet per tick.
        self.clear_command
            .next_outgoing_packet()
            .or_else(|| self.counts.next_outgoing_packet())
    }

    fn process_packet(&mut self, packet: &Packet) -> bool {
        self.counts.process_packet(packet)
    }
}
