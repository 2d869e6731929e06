use std::fmt::Write;

/// Which of the two drive motors a packet refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motor {
    Left,
    Right,
}

/// Direction to turn a drive motor in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorDirection {
    Forward,
    Backward,
}

/// Configured direction of a signal pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDirection {
    Input,
    Output,
}

/// A single protocol message exchanged with the peripheral controller.
///
/// Packets are pure data: they own no transport resources and are cheap to
/// clone. The wire identifier of each kind is fixed (see `binary_id`) and the
/// set of kinds is closed, so decoding and dispatch can match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    Ping,
    Acknowledge,
    /// Command driving a digital pin to a level.
    DigitalOutput { channel: u8, value: bool },
    /// Request for the level currently seen on a digital pin.
    DigitalInput { channel: u8 },
    /// Response carrying the level of a digital pin.
    DigitalValue { channel: u8, value: bool },
    /// Request for the reading on an analog channel.
    AnalogInput { channel: u8 },
    /// Response carrying a 10-bit analog reading.
    AnalogValue { channel: u8, value: u16 },
    /// Command configuring a pin as input or output.
    PinConfig { channel: u8, direction: PinDirection },
    /// Response describing how a pin is configured.
    PinConfigInfo { channel: u8, direction: PinDirection },
    /// Command driving one motor at an absolute speed.
    MotorDrive {
        motor: Motor,
        speed: u8,
        direction: MotorDirection,
    },
    /// Request for one wheel encoder's count.
    EncoderInput { right: bool },
    /// Response carrying a signed wheel encoder count.
    EncoderCount { right: bool, count: i32 },
    /// Command resetting one wheel encoder's count to zero.
    EncoderClear { right: bool },
}

impl Packet {
    /// Single byte identifying this packet's kind on the wire.
    pub fn binary_id(&self) -> u8 {
        match self {
            Packet::Ping => 0x01,
            Packet::DigitalOutput { .. } => 0x02,
            Packet::DigitalInput { .. } => 0x03,
            Packet::AnalogInput { .. } => 0x04,
            Packet::PinConfig { .. } => 0x05,
            Packet::MotorDrive { .. } => 0x06,
            Packet::EncoderInput { .. } => 0x07,
            Packet::EncoderClear { .. } => 0x08,
            Packet::DigitalValue { .. } => 0x81,
            Packet::Acknowledge => 0x82,
            Packet::AnalogValue { .. } => 0x83,
            Packet::PinConfigInfo { .. } => 0x84,
            Packet::EncoderCount { .. } => 0x85,
        }
    }

    /// Name of this packet's kind, as used in the XML debug rendering.
    pub fn type_name(&self) -> &'static str {
        match self {
            Packet::Ping => "PING",
            Packet::Acknowledge => "ACK",
            Packet::DigitalOutput { .. } => "DOUTPUT",
            Packet::DigitalInput { .. } => "DINPUT",
            Packet::DigitalValue { .. } => "DVALUE",
            Packet::AnalogInput { .. } => "AINPUT",
            Packet::AnalogValue { .. } => "AVALUE",
            Packet::PinConfig { .. } => "PINCONFIG",
            Packet::PinConfigInfo { .. } => "PINCONFIGINFO",
            Packet::MotorDrive { .. } => "MDRIVE",
            Packet::EncoderInput { .. } => "ENCINPUT",
            Packet::EncoderCount { .. } => "ENCCOUNT",
            Packet::EncoderClear { .. } => "ENCCLEAR",
        }
    }

    pub fn is_acknowledge(&self) -> bool {
        matches!(self, Packet::Acknowledge)
    }

    /// Renders the packet in the XML-like debug form used for logging.
    ///
    /// This is not part of the wire contract and there is no guarantee that it
    /// can be turned back into a `Packet`.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        write!(out, "<packet><type>{}</type>", self.type_name()).unwrap();
        match self {
            Packet::Ping | Packet::Acknowledge => {}
            Packet::DigitalOutput { channel, value } | Packet::DigitalValue { channel, value } => {
                write!(out, "<pin>{}</pin><value>{}</value>", channel, u8::from(*value)).unwrap();
            }
            Packet::DigitalInput { channel } | Packet::AnalogInput { channel } => {
                write!(out, "<pin>{}</pin>", channel).unwrap();
            }
            Packet::AnalogValue { channel, value } => {
                write!(out, "<pin>{}</pin><value>{}</value>", channel, value).unwrap();
            }
            Packet::PinConfig { channel, direction }
            | Packet::PinConfigInfo { channel, direction } => {
                write!(
                    out,
                    "<pin>{}</pin><direction>{}</direction>",
                    channel,
                    direction_name(*direction)
                )
                .unwrap();
            }
            Packet::MotorDrive {
                motor,
                speed,
                direction,
            } => {
                write!(
                    out,
                    "<motor>{}</motor><speed>{}</speed><direction>{}</direction>",
                    motor_name(*motor),
                    speed,
                    drive_direction_name(*direction)
                )
                .unwrap();
            }
            Packet::EncoderInput { right } | Packet::EncoderClear { right } => {
                write!(out, "<motor>{}</motor>", side_name(*right)).unwrap();
            }
            Packet::EncoderCount { right, count } => {
                write!(
                    out,
                    "<motor>{}</motor><count>{}</count>",
                    side_name(*right),
                    count
                )
                .unwrap();
            }
        }
        out.push_str("</packet>");
        out
    }
}

fn motor_name(motor: Motor) -> &'static str {
    match motor {
        Motor::Left => "left",
        Motor::Right => "right",
    }
}

fn side_name(right: bool) -> &'static str {
    if right {
        "right"
    } else {
        "left"
    }
}

fn direction_name(direction: PinDirection) -> &'static str {
    match direction {
        PinDirection::Input => "INPUT",
        PinDirection::Output => "OUTPUT",
    }
}

fn drive_direction_name(direction: MotorDirection) -> &'static str {
    match direction {
        MotorDirection::Forward => "forward",
        MotorDirection::Backward => "backward",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_ids_are_fixed_per_kind() {
        assert_eq!(Packet::Ping.binary_id(), 0x01);
        assert_eq!(Packet::Acknowledge.binary_id(), 0x82);
        // Request and response of the same signal carry different ids.
        let request = Packet::DigitalInput { channel: 3 };
        let response = Packet::DigitalValue {
            channel: 3,
            value: true,
        };
        assert_eq!(request.binary_id(), 0x03);
        assert_eq!(response.binary_id(), 0x81);
    }

    #[test]
    fn acknowledge_predicate() {
        assert!(Packet::Acknowledge.is_acknowledge());
        assert!(!Packet::Ping.is_acknowledge());
    }

    #[test]
    fn digital_output_xml() {
        let packet = Packet::DigitalOutput {
            channel: 7,
            value: true,
        };
        assert_eq!(
            packet.to_xml(),
            "<packet><type>DOUTPUT</type><pin>7</pin><value>1</value></packet>"
        );

        let packet = Packet::DigitalOutput {
            channel: 8,
            value: false,
        };
        assert_eq!(
            packet.to_xml(),
            "<packet><type>DOUTPUT</type><pin>8</pin><value>0</value></packet>"
        );
    }

    #[test]
    fn digital_input_xml() {
        let packet = Packet::DigitalInput { channel: 13 };
        assert_eq!(
            packet.to_xml(),
            "<packet><type>DINPUT</type><pin>13</pin></packet>"
        );
    }

    #[test]
    fn pin_config_xml() {
        let packet = Packet::PinConfig {
            channel: 3,
            direction: PinDirection::Output,
        };
        assert_eq!(
            packet.to_xml(),
            "<packet><type>PINCONFIG</type><pin>3</pin><direction>OUTPUT</direction></packet>"
        );

        let packet = Packet::PinConfigInfo {
            channel: 5,
            direction: PinDirection::Input,
        };
        assert_eq!(
            packet.to_xml(),
            "<packet><type>PINCONFIGINFO</type><pin>5</pin><direction>INPUT</direction></packet>"
        );
    }

    #[test]
    fn motor_drive_xml() {
        let packet = Packet::MotorDrive {
            motor: Motor::Right,
            speed: 255,
            direction: MotorDirection::Backward,
        };
        assert_eq!(
            packet.to_xml(),
            "<packet><type>MDRIVE</type><motor>right</motor><speed>255</speed>\
             <direction>backward</direction></packet>"
        );
    }

    #[test]
    fn analog_value_xml() {
        let packet = Packet::AnalogValue {
            channel: 4,
            value: 87,
        };
        assert_eq!(
            packet.to_xml(),
            "<packet><type>AVALUE</type><pin>4</pin><value>87</value></packet>"
        );
    }

    #[test]
    fn encoder_count_xml() {
        let packet = Packet::EncoderCount {
            right: false,
            count: -3,
        };
        assert_eq!(
            packet.to_xml(),
            "<packet><type>ENCCOUNT</type><motor>left</motor><count>-3</count></packet>"
        );

        let packet = Packet::EncoderClear { right: true };
        assert_eq!(
            packet.to_xml(),
            "<packet><type>ENCCLEAR</type><motor>right</motor></packet>"
        );
    }
}
