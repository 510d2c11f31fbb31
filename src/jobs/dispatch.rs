pub mod batch;
pub mod message;
pub mod retry;
pub mod send_message;
