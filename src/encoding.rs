use anyhow::{Result, anyhow};
use encoding_rs::WINDOWS_1251;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::DecodeError;

// @module: Candidate-encoding probing and terminator-preserving line handling

/// Text encodings the loader is able to probe and write back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Strict UTF-8
    Utf8,
    /// Windows code page 1251 (Cyrillic)
    Windows1251,
    /// ISO-8859-1, byte-to-codepoint; decoding never fails
    Latin1,
}

impl TextEncoding {
    // @returns: Canonical label used in config files and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Windows1251 => "windows-1251",
            Self::Latin1 => "latin1",
        }
    }

    /// Parse a config label into an encoding, accepting common aliases
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "utf-8" | "utf8" => Some(Self::Utf8),
            "windows-1251" | "cp1251" => Some(Self::Windows1251),
            "latin1" | "iso-8859-1" => Some(Self::Latin1),
            _ => None,
        }
    }

    /// Strictly decode bytes, returning None on any invalid sequence
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
            Self::Windows1251 => WINDOWS_1251
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|cow| cow.into_owned()),
            Self::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    /// Encode text back to bytes, failing on characters the encoding cannot represent
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Windows1251 => {
                let (bytes, _, had_unmappable) = WINDOWS_1251.encode(text);
                if had_unmappable {
                    return Err(anyhow!("Text contains characters not representable in windows-1251"));
                }
                Ok(bytes.into_owned())
            }
            Self::Latin1 => {
                let mut bytes = Vec::with_capacity(text.len());
                for c in text.chars() {
                    let code = c as u32;
                    if code > 0xFF {
                        return Err(anyhow!("Text contains characters not representable in latin1"));
                    }
                    bytes.push(code as u8);
                }
                Ok(bytes)
            }
        }
    }
}

/// The candidate list tried in order when no config override is given
pub const DEFAULT_CANDIDATES: [TextEncoding; 3] =
    [TextEncoding::Utf8, TextEncoding::Windows1251, TextEncoding::Latin1];

/// Line terminator of a single source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
    /// Final line without a trailing newline
    None,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::None => "",
        }
    }
}

/// One line of a source file, text and terminator kept apart so rewritten
/// lines reattach the exact original ending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Line text without its terminator
    pub text: String,
    /// The terminator that followed the text
    pub ending: LineEnding,
}

impl SourceLine {
    pub fn new(text: impl Into<String>, ending: LineEnding) -> Self {
        Self { text: text.into(), ending }
    }

    /// Same terminator, different text
    pub fn with_text(&self, text: String) -> Self {
        Self { text, ending: self.ending }
    }
}

/// Split decoded content into lines, preserving each line's terminator
pub fn split_lines(content: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    for raw in content.split_inclusive('\n') {
        if let Some(stripped) = raw.strip_suffix("\r\n") {
            lines.push(SourceLine::new(stripped, LineEnding::CrLf));
        } else if let Some(stripped) = raw.strip_suffix('\n') {
            lines.push(SourceLine::new(stripped, LineEnding::Lf));
        } else {
            lines.push(SourceLine::new(raw, LineEnding::None));
        }
    }
    lines
}

/// Reassemble lines into full file content
pub fn join_lines(lines: &[SourceLine]) -> String {
    let mut content = String::new();
    for line in lines {
        content.push_str(&line.text);
        content.push_str(line.ending.as_str());
    }
    content
}

/// A candidate file loaded into memory with its detected encoding
#[derive(Debug)]
pub struct SourceFile {
    /// Path the file was read from and will be written back to
    pub path: PathBuf,
    /// Encoding that decoded the file, reused on write
    pub encoding: TextEncoding,
    /// Ordered lines with their terminators
    pub lines: Vec<SourceLine>,
}

impl SourceFile {
    /// Load a file, trying each candidate encoding in order
    pub fn load<P: AsRef<Path>>(path: P, candidates: &[TextEncoding]) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| DecodeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        for encoding in candidates {
            if let Some(content) = encoding.decode(&bytes) {
                debug!("Opened {:?} with encoding: {}", path, encoding.label());
                return Ok(Self {
                    path: path.to_path_buf(),
                    encoding: *encoding,
                    lines: split_lines(&content),
                });
            }
        }

        Err(DecodeError::NoEncodingMatched { path: path.to_path_buf() })
    }

    /// Write the (possibly rewritten) lines back using the detected encoding
    pub fn save(&self) -> Result<()> {
        let content = join_lines(&self.lines);
        let bytes = self
            .encoding
            .encode(&content)
            .map_err(|e| anyhow!("Cannot re-encode {:?} as {}: {}", self.path, self.encoding.label(), e))?;
        fs::write(&self.path, bytes)
            .map_err(|e| anyhow!("Failed to write to file {:?}: {}", self.path, e))
    }
}
