pub mod quota;
pub mod time;
