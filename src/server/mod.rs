//! Accept loop that hands each TCP connection to its own `Connection` task.

pub mod listener;
