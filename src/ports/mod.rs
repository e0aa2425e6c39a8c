//! Ports (trait boundaries) between the training loop and its consumers.

pub mod observer;

pub use observer::Observer;
