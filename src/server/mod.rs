//! TCP front end: binds the listener and hands each accepted socket to its
//! own connection task.

pub mod listener;
