use crate::error::CliResult;
use crate::input::{read_input, InputSource};
use n3s_graph_compact::{encode_with, EncodeOptions, TracingDiagnostics};
use n3s_graph_ir::{NQuadsWriter, Quad, QuadSink};
use std::io::{self, BufWriter};

/// Read compact-form text from `source` and print N-Quads to stdout.
///
/// Nothing is printed unless the whole input encodes.
pub fn run(source: &InputSource, options: &EncodeOptions) -> CliResult<()> {
    let text = read_input(source)?;
    let mut quads: Vec<Quad> = Vec::new();
    let facts = encode_with(&text, &mut quads, options, TracingDiagnostics)?;

    let stdout = io::stdout();
    let mut writer = NQuadsWriter::new(BufWriter::new(stdout.lock()));
    for quad in quads {
        writer.emit_quad(quad);
    }
    let written = writer.written();
    writer.finish()?;
    tracing::info!(facts, quads = written, "encoded compact input");
    Ok(())
}
