#![no_std]

extern crate alloc;

pub use board::*;
pub use controller::*;
pub use error::*;
pub use score::*;
pub use types::*;

mod board;
mod controller;
mod error;
mod score;
mod types;
