//! Library side of the `ppd-screen` CLI.

pub mod answers;
pub mod logging;
pub mod pipeline;
pub mod report;
