pub mod protocol {
    mod codec;
    mod packet;
    mod registry;

    pub use codec::*;
    pub use packet::*;
    pub use registry::*;
}

pub mod components {
    mod analog;
    mod component;
    mod digital;
    mod drive;
    mod encoder;
    mod input;
    mod output;

    pub use analog::*;
    pub use component::*;
    pub use digital::*;
    pub use drive::*;
    pub use encoder::*;
    pub use input::*;
    pub use output::*;
}

pub mod session {
    mod fake_transport;
    mod session;

    pub use fake_transport::*;
    pub use session::*;
}
