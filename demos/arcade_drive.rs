//! Drives a differential-drive robot with arcade controls over a fake
//! transport, backing off while a bumper switch is pressed.
//!
//! Run with `RUST_LOG=debug` to watch the frames go out.

use std::cell::RefCell;
use std::rc::Rc;

use botlink::components::{DifferentialDrive, DigitalInput};
use botlink::protocol::Packet;
use botlink::session::{ComponentRef, FakeTransport, Session};

const BUMPER_CHANNEL: u8 = 3;

fn main() {
    env_logger::init();

    let drive = Rc::new(RefCell::new(DifferentialDrive::new()));
    let bumper = Rc::new(RefCell::new(DigitalInput::new(BUMPER_CHANNEL)));

    let (transport, control) = FakeTransport::new_fake_and_control();
    let components: Vec<ComponentRef> = vec![drive.clone(), bumper.clone()];
    let mut session = Session::new(transport, components);

    for tick in 0..10 {
        // Pretend the bumper gets pressed halfway through.
        control.borrow_mut().queue_packet(&Packet::DigitalValue {
            channel: BUMPER_CHANNEL,
            value: tick >= 5,
        });

        session.poll_inbound();

        let pressed = bumper.borrow().get();
        if pressed {
            drive.borrow_mut().arcade_drive(-0.5, 0.0, false);
        } else {
            drive.borrow_mut().arcade_drive(1.0, 0.2, true);
        }

        session.tick().expect("transport write failed");

        println!(
            "tick {}: bumper {}, {} bytes on the wire",
            tick,
            if pressed { "pressed" } else { "clear" },
            control.borrow().written.len()
        );
    }
}
