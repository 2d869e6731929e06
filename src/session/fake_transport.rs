use std::cell::RefCell;
use std::cmp;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::rc::Rc;

use crate::protocol::{encode, Packet};

/// Handle steering a `FakeTransport` from a test.
///
/// Bytes written through the transport accumulate in `written`; bytes queued
/// in `inbound` are served to reads. `max_write` caps how many bytes a single
/// `write` call accepts, which lets tests exercise partial writes.
pub struct FakeTransportControl {
    pub written: Vec<u8>,
    pub inbound: VecDeque<u8>,
    pub max_write: Option<usize>,
}

impl FakeTransportControl {
    /// Encodes `packet` and queues its frame for reading.
    pub fn queue_packet(&mut self, packet: &Packet) {
        let mut frame = Vec::new();
        encode(packet, &mut frame);
        self.queue_bytes(&frame);
    }

    /// Queues raw bytes for reading, valid frame or not.
    pub fn queue_bytes(&mut self, bytes: &[u8]) {
        self.inbound.extend(bytes.iter().copied());
    }
}

/// In-memory stand-in for a serial link, for tests and demos.
pub struct FakeTransport {
    control: Rc<RefCell<FakeTransportControl>>,
}

impl FakeTransport {
    pub fn new_fake_and_control() -> (FakeTransport, Rc<RefCell<FakeTransportControl>>) {
        let control = Rc::new(RefCell::new(FakeTransportControl {
            written: Vec::new(),
            inbound: VecDeque::new(),
            max_write: None,
        }));
        (
            FakeTransport {
                control: control.clone(),
            },
            control,
        )
    }
}

impl Read for FakeTransport {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut control = self.control.borrow_mut();
        let num_to_read = cmp::min(buf.len(), control.inbound.len());
        for slot in buf.iter_mut().take(num_to_read) {
            *slot = control.inbound.pop_front().unwrap();
        }
        Ok(num_to_read)
    }
}

impl Write for FakeTransport {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut control = self.control.borrow_mut();
        let num_to_write = match control.max_write {
            Some(max_write) => cmp::min(buf.len(), max_write),
            None => buf.len(),
        };
        control.written.extend_from_slice(&buf[..num_to_write]);
        Ok(num_to_write)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_queued_bytes_to_reads() {
        let (mut fake, control) = FakeTransport::new_fake_and_control();
        control.borrow_mut().queue_bytes(&[0xFF, 0x01, 0xFF]);

        let mut buf = [0u8; 2];
        assert_eq!(fake.read(&mut buf).unwrap(), 2);
        assert_eq!(buf, [0xFF, 0x01]);
        assert_eq!(fake.read(&mut buf).unwrap(), 1);
        assert_eq!(buf[0], 0xFF);
        assert_eq!(fake.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn caps_writes_at_max_write() {
        let (mut fake, control) = FakeTransport::new_fake_and_control();
        control.borrow_mut().max_write = Some(2);

        assert_eq!(fake.write(&[1, 2, 3, 4]).unwrap(), 2);
        assert_eq!(control.borrow().written, vec![1, 2]);
    }
}
