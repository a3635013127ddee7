pub mod ip;
pub mod time;
