//! Demo sequences.
//!
//! [`basic`] is the panel verification loop: if every step of it looks right
//! the wiring, the colour channels and the addressing are fine. [`advanced`]
//! runs the bigger demos on top of a known-good panel.
//!
//! Every routine draws on a [`Screen`](crate::Screen) and paces itself with
//! the screen's delay, so the same code runs on the panel and in the tests.

pub mod advanced;
pub mod basic;
