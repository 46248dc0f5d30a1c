use super::encoding::{encode, TextEncoding};
use crate::error::CreateError;
use crate::lexicon::WordSet;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Directory every tarball member lives under.
pub const TAR_PREFIX: &str = "SCOWL-wl/";
pub const README: &str = "README";
pub const WORDS: &str = "words.txt";
pub const SOURCE_README: &str = "README_SCOWL.md";

/// The three encoded members shared by both archive formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMembers {
    pub readme: Vec<u8>,
    pub words: Vec<u8>,
    pub source_readme: Vec<u8>,
}

impl ArchiveMembers {
    /// Encode the members with `eol` as the line ending.
    ///
    /// Header and words use `encoding`; the source README is always UTF-8.
    pub fn encode(
        header: &str,
        words: &WordSet,
        source_readme: &str,
        encoding: TextEncoding,
        eol: &str,
    ) -> Result<Self, CreateError> {
        Ok(Self {
            readme: encode(&with_eol(header, eol), encoding, README)?,
            words: encode(&words.joined(eol), encoding, WORDS)?,
            source_readme: with_eol(source_readme, eol).into_bytes(),
        })
    }

    fn entries(&self) -> [(&'static str, &[u8]); 3] {
        [
            (README, &self.readme),
            (WORDS, &self.words),
            (SOURCE_README, &self.source_readme),
        ]
    }
}

fn with_eol(text: &str, eol: &str) -> String {
    if eol == "\n" {
        text.to_string()
    } else {
        text.replace('\n', eol)
    }
}

/// Gzip-compressed tarball with every member under [`TAR_PREFIX`].
///
/// Members carry mode 0644 and a zero mtime so equal input gives equal bytes.
pub fn tar_gz(members: &ArchiveMembers) -> io::Result<Vec<u8>> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, data) in members.entries() {
        let mut header = tar::Header::new_ustar();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(0);
        header.set_entry_type(tar::EntryType::Regular);
        builder.append_data(&mut header, format!("{TAR_PREFIX}{name}"), data)?;
    }
    builder.into_inner()?.finish()
}

/// Deflate zip with members at the archive root.
pub fn zip(members: &ArchiveMembers) -> io::Result<Vec<u8>> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in members.entries() {
        writer.start_file(name, options).map_err(io::Error::other)?;
        writer.write_all(data)?;
    }
    let cursor = writer.finish().map_err(io::Error::other)?;
    Ok(cursor.into_inner())
}
