use crate::protocol::Packet;

/// Capability contract implemented by every sensor and actuator adapter.
///
/// A component bridges application-level access (`get`/`set` style calls on
/// the concrete types) and the packet protocol: the session pulls outgoing
/// packets from it once per tick and offers it every inbound packet.
pub trait Component {
    /// Returns at most one packet to transmit this tick.
    ///
    /// The internal slot is cleared in the process, so the same packet is
    /// never handed out twice; ownership passes to the caller.
    fn next_outgoing_packet(&mut self) -> Option<Packet>;

    /// Inspects an inbound packet.
    ///
    /// Returns true and updates internal state if the packet is relevant to
    /// this component (matching kind and, where applicable, matching channel);
    /// returns false and leaves state untouched otherwise.
    fn process_packet(&mut self, packet: &Packet) -> bool;
}
