use crate::error::{CliError, CliResult};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Where the input text comes from.
#[derive(Debug, PartialEq, Eq)]
pub enum InputSource {
    /// From a file on disk.
    File(PathBuf),
    /// From stdin, selected with `-`.
    Stdin,
}

impl InputSource {
    pub fn from_arg(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(path.to_path_buf())
        }
    }
}

/// Read content from the resolved input source.
pub fn read_input(source: &InputSource) -> CliResult<String> {
    match source {
        InputSource::File(path) => std::fs::read_to_string(path)
            .map_err(|e| CliError::Input(format!("failed to read {}: {e}", path.display()))),
        InputSource::Stdin => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_means_stdin() {
        assert_eq!(InputSource::from_arg(Path::new("-")), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg(Path::new("a.n3")),
            InputSource::File(PathBuf::from("a.n3"))
        );
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = read_input(&InputSource::File(PathBuf::from("/nonexistent/x.n3"))).unwrap_err();
        match err {
            CliError::Input(msg) => assert!(msg.starts_with("failed to read /nonexistent/x.n3")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
