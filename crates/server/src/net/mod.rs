pub mod listener;
pub mod session;
