use crate::components::{Component, Output};
use crate::protocol::{Motor, MotorDirection, Packet};

/// Builds a motor drive command from a signed drive value in [-1.0, 1.0].
///
/// The magnitude maps onto the absolute speed range and the sign picks the
/// direction; values outside the range are clamped.
fn drive_packet(motor: Motor, value: f64) -> Packet {
    let clamped = value.clamp(-1.0, 1.0);
    let direction = if clamped < 0.0 {
        MotorDirection::Backward
    } else {
        MotorDirection::Forward
    };
    Packet::MotorDrive {
        motor,
        speed: (clamped.abs() * 255.0).round() as u8,
        direction,
    }
}

/// Speed controller for a single drive motor.
pub struct SpeedController {
    motor: Motor,
    command: Output,
}

impl SpeedController {
    pub fn new(motor: Motor) -> SpeedController {
        SpeedController {
            motor,
            command: Output::new(),
        }
    }

    /// Commands the motor with a signed drive value in [-1.0, 1.0].
    pub fn set(&mut self, value: f64) {
        self.command.set(drive_packet(self.motor, value));
    }
}

impl Component for SpeedController {
    fn next_outgoing_packet(&mut self) -> Option<Packet> {
        self.command.next_outgoing_packet()
    }

    fn process_packet(&mut self, packet: &Packet) -> bool {
        self.command.process_packet(packet)
    }
}

/// Common drive operations for a robot with two motors.
pub struct DifferentialDrive {
    left: Output,
    right: Output,
}

impl DifferentialDrive {
    pub fn new() -> DifferentialDrive {
        DifferentialDrive {
            left: Output::new(),
            right: Output::new(),
        }
    }

    /// Drives the robot with the given forward magnitude and curve.
    ///
    /// With `squared_inputs` set, magnitude and curve are squared (keeping
    /// their sign) before being mixed, which makes the robot less sensitive
    /// to input changes at low speeds.
    pub fn arcade_drive(&mut self, magnitude: f64, curve: f64, squared_inputs: bool) {
        let mut magnitude = magnitude.clamp(-1.0, 1.0);
        let mut curve = curve.clamp(-1.0, 1.0);
        if squared_inputs {
            magnitude *= magnitude.abs();
            curve *= curve.abs();
        }

        self.left
            .set(drive_packet(Motor::Left, (magnitude + curve).clamp(-1.0, 1.0)));
        self.right
            .set(drive_packet(Motor::Right, (magnitude - curve).clamp(-1.0, 1.0)));
    }

    /// Commands both motors to a standstill.
    pub fn stop(&mut self) {
        self.arcade_drive(0.0, 0.0, false);
    }
}

impl Default for DifferentialDrive {
    fn default() -> DifferentialDrive {
        DifferentialDrive::new()
    }
}

impl Component for DifferentialDrive {
    fn next_outgoing_packet(&mut self) -> Option<Packet> {
        // One packet per tick: the left motor's command goes out first, the
        // right one follows on the next tick.
        self.left
            .next_outgoing_packet()
            .or_else(|| self.right.next_outgoing_packet())
    }

    fn process_packet(&mut self, _packet: &Packet) -> bool {
        false
    }
}
