use std::cell::RefCell;
use std::io::{ErrorKind, Read, Write};
use std::rc::Rc;

use crate::components::Component;
use crate::protocol::{decode, encode, Packet};

/// Shared handle to a component registered with a session. The host keeps its
/// own clone to read values and queue commands between ticks.
pub type ComponentRef = Rc<RefCell<dyn Component>>;

/// Drives a set of components over one transport link.
///
/// The session is single threaded and tick driven: each `tick` collects at
/// most one outgoing packet per component, in registration order, and writes
/// the frames to the transport. Inbound traffic is pulled in with
/// `poll_inbound` and broadcast to every component.
pub struct Session<T: Read + Write> {
    transport: Option<T>,
    components: Vec<ComponentRef>,
    write_buffer: Vec<u8>,
}

impl<T: Read + Write> Session<T> {
    pub fn new(transport: T, components: Vec<ComponentRef>) -> Session<T> {
        Session {
            transport: Some(transport),
            components,
            write_buffer: Vec::new(),
        }
    }

    /// A session without a link. Ticks succeed and transmit nothing, so host
    /// logic can run unchanged while the robot is unplugged.
    pub fn disconnected(components: Vec<ComponentRef>) -> Session<T> {
        Session {
            transport: None,
            components,
            write_buffer: Vec::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Runs one transmit round: asks every component for its outgoing packet
    /// and writes the resulting frames.
    pub fn tick(&mut self) -> Result<(), String> {
        let transport = match &mut self.transport {
            Some(transport) => transport,
            None => return Ok(()),
        };
        for component in &self.components {
            let packet = match component.borrow_mut().next_outgoing_packet() {
                Some(packet) => packet,
                None => continue,
            };
            self.write_buffer.clear();
            encode(&packet, &mut self.write_buffer);
            log::debug!("Sending packet {:x?}", self.write_buffer);
            write_frame(transport, &self.write_buffer)?;
        }
        Ok(())
    }

    /// Reads and dispatches every frame currently available on the transport.
    /// Returns the number of valid packets dispatched.
    pub fn poll_inbound(&mut self) -> usize {
        let transport = match &mut self.transport {
            Some(transport) => transport,
            None => return 0,
        };
        let mut dispatched = 0;
        while let Some(decoded) = decode(transport) {
            if !decoded.valid {
                log::debug!("Discarding malformed packet {}", decoded.packet.to_xml());
                continue;
            }
            let packet = decoded.packet;
            let accepted = self
                .components
                .iter()
                .fold(false, |accepted, component| {
                    component.borrow_mut().process_packet(&packet) || accepted
                });
            if !accepted {
                log::debug!("No component accepted packet {}", packet.to_xml());
            }
            dispatched += 1;
        }
        dispatched
    }

    /// Hands `packet` to every registered component. All components see every
    /// packet; returns whether any of them accepted it.
    pub fn dispatch_packet(&self, packet: &Packet) -> bool {
        self.components.iter().fold(false, |accepted, component| {
            component.borrow_mut().process_packet(packet) || accepted
        })
    }
}

/// Writes the whole frame, retrying partial and interrupted writes.
fn write_frame<T: Write>(transport: &mut T, frame: &[u8]) -> Result<(), String> {
    let mut num_written = 0;
    while num_written < frame.len() {
        match transport.write(&frame[num_written..]) {
            Ok(0) => return Err("Transport closed while writing frame".to_string()),
            Ok(n) => num_written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted || e.kind() == ErrorKind::WouldBlock => {}
            Err(e) => return Err(format!("Failed to write frame: {}", e)),
        }
    }
    Ok(())
}
