use crate::components::Component;
use crate::protocol::Packet;

/// Number of ticks to wait for a reply packet before calling time-out.
const TIMEOUT_THRESH: u32 = 5;

/// Strategy describing one kind of polled input: how to build its request
/// packet and how to recognize and extract its response.
pub trait InputRole {
    type Value: Copy + Default;

    /// Builds a request packet for this input's channel.
    fn create_request(&self) -> Packet;

    /// Returns the carried value if `packet` is the matching response for
    /// this input, `None` otherwise.
    fn accept(&self, packet: &Packet) -> Option<Self::Value>;
}

/// Generic polling state machine for a data source on the robot.
///
/// It sends request packets for the latest value detected on the source,
/// which the robot answers with response packets. While responses keep
/// arriving, a fresh request is synthesized immediately on every acceptance;
/// if the last-sent request was dropped for whatever reason, another one is
/// automatically sent after a number of ticks have passed without any
/// response.
pub struct Input<R: InputRole> {
    role: R,
    value: R::Value,
    outgoing: Option<Packet>,
    timeout_counter: u32,
}

impl<R: InputRole> Input<R> {
    /// The counter starts above the threshold so the very first tick issues
    /// a request immediately.
    pub fn new(role: R) -> Input<R> {
        Input {
            role,
            value: R::Value::default(),
            outgoing: None,
            timeout_counter: TIMEOUT_THRESH + 1,
        }
    }

    /// Latest value accepted from the robot. Never blocks, never fails.
    pub fn get(&self) -> R::Value {
        self.value
    }
}

impl<R: InputRole> Component for Input<R> {
    fn next_outgoing_packet(&mut self) -> Option<Packet> {
        if self.outgoing.is_none() {
            if self.timeout_counter > TIMEOUT_THRESH {
                self.outgoing = Some(self.role.create_request());
                self.timeout_counter = 0;
            } else {
                self.timeout_counter += 1;
            }
        }
        self.outgoing.take()
    }

    fn process_packet(&mut self, packet: &Packet) -> bool {
        let value = match self.role.accept(packet) {
            Some(value) => value,
            None => return false,
        };

        self.value = value;
        self.timeout_counter = 0;

        // Eager repoll: a successful response triggers the next request
        // right away instead of waiting out the timeout interval.
        if self.outgoing.is_none() {
            self.outgoing = Some(self.role.create_request());
        }

        true
    }
}
