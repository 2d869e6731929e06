use crate::components::Component;
use crate::protocol::Packet;

/// Fire-once holder for the latest not-yet-transmitted command packet.
///
/// `set` replaces any pending command unconditionally: a command that was
/// never picked up is discarded, last write wins. Outputs never consume
/// inbound traffic.
pub struct Output {
    pending: Option<Packet>,
}

impl Output {
    pub fn new() -> Output {
        Output { pending: None }
    }

    /// Stores `packet` as the next command to transmit, discarding any
    /// pending one.
    pub fn set(&mut self, packet: Packet) {
        self.pending = Some(packet);
    }
}

impl Default for Output {
    fn default() -> Output {
        Output::new()
    }
}

impl Component for Output {
    fn next_outgoing_packet(&mut self) -> Option<Packet> {
        self.pending.take()
    }

    fn process_packet(&mut self, _packet: &Packet) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_set_replaces_the_first() {
        let mut output = Output::new();

        output.set(Packet::DigitalOutput {
            channel: 2,
            value: false,
        });
        output.set(Packet::DigitalOutput {
            channel: 2,
            value: true,
        });

        assert_eq!(
            output.next_outgoing_packet(),
            Some(Packet::DigitalOutput {
                channel: 2,
                value: true
            })
        );
        assert_eq!(output.next_outgoing_packet(), None);
    }

    #[test]
    fn never_consumes_inbound_packets() {
        let mut output = Output::new();
        output.set(Packet::Ping);

        assert!(!output.process_packet(&Packet::Acknowledge));

        // The pending command is untouched.
        assert_eq!(output.next_outgoing_packet(), Some(Packet::Ping));
    }
}
