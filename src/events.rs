mod keyboard;
mod pointer;

pub use keyboard::{wire_experience_keys, wire_landing_keys};
pub use pointer::{wire_experience_pointer, wire_landing_pointer};
