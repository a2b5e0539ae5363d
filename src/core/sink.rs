//! Sink capability for log output

use std::io::Write;

/// Destination for rendered records: anything that accepts bytes.
///
/// Implemented for every `io::Write + Send` type, so `Vec<u8>`, `File`,
/// `Stdout`, `TcpStream` and the sinks in [`crate::sinks`] all qualify.
/// The logger hands each record over in a single `write_all` call.
pub trait Sink: Write + Send {}

impl<T: Write + Send> Sink for T {}
