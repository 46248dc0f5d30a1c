//! # Output Packaging
//!
//! Turns a provenance header and a [`WordSet`] into the bytes sent back to
//! the caller:
//!
//! | format   | members                                             | EOL  | content type               |
//! |----------|-----------------------------------------------------|------|----------------------------|
//! | `inline` | header, `---`, words                                | LF   | `text/plain; charset=...`  |
//! | `tar.gz` | `SCOWL-wl/README`, `SCOWL-wl/words.txt`, `SCOWL-wl/README_SCOWL.md` | LF   | `application/octet-stream` |
//! | `zip`    | `README`, `words.txt`, `README_SCOWL.md`            | CRLF | `application/zip`          |
//!
//! The header and word list are encoded in the requested charset; the
//! lexical source README is always UTF-8. ISO-8859-1 output fails with an
//! [`EncodingError`] on the first character outside Latin-1.

mod archive;
mod encoding;

pub use archive::{tar_gz, zip, ArchiveMembers};
pub use encoding::{encode, TextEncoding};

use crate::error::{CreateError, EncodingError};
use crate::lexicon::WordSet;
use tracing::debug;

/// Separator line between the header and the words in inline output.
pub const INLINE_SEPARATOR: &str = "---\n";
/// Archive file names.
pub const TAR_GZ_FILENAME: &str = "SCOWL-wl.tar.gz";
pub const ZIP_FILENAME: &str = "SCOWL-wl.zip";

/// Word list container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Inline,
    TarGz,
    Zip,
}

impl OutputFormat {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "inline" => Some(OutputFormat::Inline),
            "tar.gz" => Some(OutputFormat::TarGz),
            "zip" => Some(OutputFormat::Zip),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Inline => "inline",
            OutputFormat::TarGz => "tar.gz",
            OutputFormat::Zip => "zip",
        }
    }
}

/// A finished artifact ready to be written to a response or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    /// Attachment file name; `None` for inline text.
    pub filename: Option<&'static str>,
}

impl Payload {
    /// `Content-Disposition` header line, when the payload is an attachment.
    pub fn content_disposition(&self) -> Option<String> {
        self.filename
            .map(|name| format!("Content-Disposition: attachment; filename={name}"))
    }
}

/// Build a word list artifact.
///
/// `source_readme` is the lexical source's README, shipped in archives.
pub fn package_wordlist(
    header: &str,
    words: &WordSet,
    source_readme: &str,
    encoding: TextEncoding,
    format: OutputFormat,
) -> Result<Payload, CreateError> {
    let payload = match format {
        OutputFormat::Inline => inline(header, words, encoding)?,
        OutputFormat::TarGz => {
            let members = ArchiveMembers::encode(header, words, source_readme, encoding, "\n")?;
            Payload {
                bytes: tar_gz(&members)?,
                content_type: "application/octet-stream",
                filename: Some(TAR_GZ_FILENAME),
            }
        }
        OutputFormat::Zip => {
            let members = ArchiveMembers::encode(header, words, source_readme, encoding, "\r\n")?;
            Payload {
                bytes: zip(&members)?,
                content_type: "application/zip",
                filename: Some(ZIP_FILENAME),
            }
        }
    };
    debug!(
        format = format.as_str(),
        encoding = encoding.charset(),
        words = words.len(),
        bytes = payload.bytes.len(),
        "Word list packaged"
    );
    Ok(payload)
}

/// Header, separator and words as one text document.
pub fn inline(
    header: &str,
    words: &WordSet,
    encoding: TextEncoding,
) -> Result<Payload, EncodingError> {
    let mut text = String::with_capacity(header.len() + INLINE_SEPARATOR.len());
    text.push_str(header);
    text.push_str(INLINE_SEPARATOR);
    text.push_str(&words.joined("\n"));
    Ok(Payload {
        bytes: encode(&text, encoding, "inline")?,
        content_type: encoding.text_plain(),
        filename: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> WordSet {
        ["zoo", "apple", "Éclair", "banana"].into_iter().collect()
    }

    #[test]
    fn test_inline_layout() {
        let p = inline("HEADER\n\n", &words(), TextEncoding::Utf8).unwrap();
        assert_eq!(p.content_type, "text/plain; charset=UTF-8");
        assert_eq!(p.filename, None);
        assert_eq!(
            String::from_utf8(p.bytes).unwrap(),
            "HEADER\n\n---\napple\nbanana\nzoo\nÉclair\n"
        );
    }

    #[test]
    fn test_inline_empty_list_keeps_blank_line() {
        let p = inline("H\n\n", &WordSet::default(), TextEncoding::Utf8).unwrap();
        assert_eq!(p.bytes, b"H\n\n---\n\n");
    }

    #[test]
    fn test_inline_latin1() {
        let p = inline("H\n\n", &words(), TextEncoding::Latin1).unwrap();
        assert_eq!(p.content_type, "text/plain; charset=ISO-8859-1");
        assert!(p.bytes.ends_with(&[0xC9, b'c', b'l', b'a', b'i', b'r', b'\n']));
    }

    #[test]
    fn test_inline_latin1_rejects_unrepresentable() {
        let set: WordSet = ["ok", "Łódź"].into_iter().collect();
        let err = inline("H\n\n", &set, TextEncoding::Latin1).unwrap_err();
        assert_eq!(err.code_point, 0x141);
        assert_eq!(err.word, "Łódź");
    }

    #[test]
    fn test_format_params() {
        assert_eq!(OutputFormat::from_param("tar.gz"), Some(OutputFormat::TarGz));
        assert_eq!(OutputFormat::from_param("zip"), Some(OutputFormat::Zip));
        assert_eq!(OutputFormat::from_param("inline"), Some(OutputFormat::Inline));
        assert_eq!(OutputFormat::from_param("rar"), None);
    }

    #[test]
    fn test_archive_payload_metadata() {
        let tgz = package_wordlist("H\n\n", &words(), "R\n", TextEncoding::Utf8, OutputFormat::TarGz)
            .unwrap();
        assert_eq!(tgz.filename, Some("SCOWL-wl.tar.gz"));
        assert_eq!(tgz.content_type, "application/octet-stream");
        assert_eq!(
            tgz.content_disposition().unwrap(),
            "Content-Disposition: attachment; filename=SCOWL-wl.tar.gz"
        );
        let z = package_wordlist("H\n\n", &words(), "R\n", TextEncoding::Utf8, OutputFormat::Zip)
            .unwrap();
        assert_eq!(z.filename, Some("SCOWL-wl.zip"));
        assert_eq!(z.content_type, "application/zip");
    }
}
