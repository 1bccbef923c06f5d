use encoding_rs::Encoding;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Represents errors that surface at the crate boundary (CLI, input loading)
#[derive(Debug)]
pub struct TranslatorError {
    details: String,
}

impl TranslatorError {
    /// Creates a new TranslatorError with the given message
    pub fn new(msg: &str) -> TranslatorError {
        TranslatorError {
            details: msg.to_string(),
        }
    }
}

impl fmt::Display for TranslatorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.details)
    }
}

impl Error for TranslatorError {
    fn description(&self) -> &str {
        &self.details
    }
}

/// Decodes raw input bytes using the given charset label, falling back to lossy UTF-8
pub fn decode_input(data: &[u8], encoding_label: Option<&str>) -> String {
    if let Some(encoding) = encoding_label.and_then(|label| Encoding::for_label(label.as_bytes())) {
        let (string, _, had_errors) = encoding.decode(data);
        if had_errors {
            tracing::warn!("Input contained bytes invalid for {}", encoding.name());
        }
        return string.into_owned();
    }

    String::from_utf8_lossy(data).into_owned()
}

/// Reads a document from a file path, or from stdin when the path is `-`
pub fn read_input(path: &str, encoding_label: Option<&str>) -> Result<String, TranslatorError> {
    let mut data: Vec<u8> = Vec::new();

    if path == "-" {
        std::io::stdin()
            .read_to_end(&mut data)
            .map_err(|e| TranslatorError::new(&format!("Unable to read stdin: {}", e)))?;
    } else {
        let file_path = Path::new(path);
        data = fs::read(file_path).map_err(|e| {
            TranslatorError::new(&format!("Unable to read {}: {}", file_path.display(), e))
        })?;
    }

    Ok(decode_input(&data, encoding_label))
}
