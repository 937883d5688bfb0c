mod message;
mod send_message;

pub use message::receive_message;
