use crate::error::CliResult;
use crate::input::{read_input, InputSource};
use n3s_graph_compact::{decode_with, DecodeOptions, TracingDiagnostics};

/// Read N3 from `source` and print its compact form to stdout.
pub fn run(source: &InputSource, options: &DecodeOptions) -> CliResult<()> {
    let text = read_input(source)?;
    let store = n3s_graph_n3::parse_to_store(&text)?;
    tracing::info!(quads = store.len(), "parsed N3 input");

    let compact = decode_with(&store, options, TracingDiagnostics)?;
    if !compact.is_empty() {
        println!("{compact}");
    }
    Ok(())
}
