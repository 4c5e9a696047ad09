#![allow(dead_code)]

use std::io::{self, Write};

use logmonitor::{Logger, Severity};

/// One message per level, lowest first: "d1", "i1", "w1", "e1", "f1".
pub fn emit_all(lg: &Logger) {
    logmonitor::debug!(logger: lg, "d1");
    logmonitor::info!(logger: lg, "i1");
    logmonitor::warn!(logger: lg, "w1");
    logmonitor::error!(logger: lg, "e1");
    logmonitor::fatal!(logger: lg, "f1");
}

/// Message `emit_all` writes at `l`
pub const fn msg_for(l: Severity) -> &'static str {
    match l {
        Severity::Debug => "d1",
        Severity::Info => "i1",
        Severity::Warn => "w1",
        Severity::Error => "e1",
        Severity::Fatal => "f1",
    }
}

/// Writer that fails every call
pub struct Broken;
impl Write for Broken {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Extract lines from a dump
/// # Panics
pub fn lines_from(bytes: &[u8]) -> Vec<String> {
    String::from_utf8(bytes.to_vec())
        .unwrap()
        .lines()
        .map(std::string::ToString::to_string)
        .collect()
}
