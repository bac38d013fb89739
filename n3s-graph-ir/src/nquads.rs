//! Streaming N-Quads output
//!
//! `NQuadsWriter` is a [`QuadSink`] that writes each quad as one N-Quads line
//! as soon as it arrives. Sink methods cannot fail, so the first I/O error
//! is latched and every later quad is dropped; [`NQuadsWriter::finish`]
//! reports it.

use crate::{GraphName, Quad, QuadSink};
use std::io::{self, Write};

/// Quad sink writing N-Quads to an `io::Write`
#[derive(Debug)]
pub struct NQuadsWriter<W: Write> {
    out: W,
    written: usize,
    error: Option<io::Error>,
}

impl<W: Write> NQuadsWriter<W> {
    /// Wrap an output stream
    pub fn new(out: W) -> Self {
        Self {
            out,
            written: 0,
            error: None,
        }
    }

    /// Number of quads written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush the stream and return it, or the first write error
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Render one quad as an N-Quads line (without the trailing newline)
pub fn format_quad(quad: &Quad) -> String {
    match &quad.g {
        GraphName::Default => format!("{} {} {} .", quad.s, quad.p, quad.o),
        GraphName::Node(g) => format!("{} {} {} {} .", quad.s, quad.p, quad.o, g),
    }
}

impl<W: Write> QuadSink for NQuadsWriter<W> {
    fn emit_quad(&mut self, quad: Quad) {
        if self.error.is_some() {
            return;
        }
        match writeln!(self.out, "{}", format_quad(&quad)) {
            Ok(()) => self.written += 1,
            Err(err) => self.error = Some(err),
        }
    }
}
