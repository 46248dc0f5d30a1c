use crate::error::EncodingError;

/// Text encoding of word list output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    Utf8,
    /// ISO-8859-1: code points U+0000–U+00FF only, one byte each.
    Latin1,
}

impl TextEncoding {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "utf-8" => Some(TextEncoding::Utf8),
            "iso-8859-1" => Some(TextEncoding::Latin1),
            _ => None,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "iso-8859-1",
        }
    }

    /// Charset name as used in `Content-Type`.
    pub fn charset(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Latin1 => "ISO-8859-1",
        }
    }

    pub fn text_plain(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "text/plain; charset=UTF-8",
            TextEncoding::Latin1 => "text/plain; charset=ISO-8859-1",
        }
    }
}

/// Encode `text`; `member` names the output piece for error reports.
pub fn encode(
    text: &str,
    encoding: TextEncoding,
    member: &'static str,
) -> Result<Vec<u8>, EncodingError> {
    match encoding {
        TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
        TextEncoding::Latin1 => {
            if encoding_rs::mem::is_str_latin1(text) {
                Ok(encoding_rs::mem::encode_latin1_lossy(text).into_owned())
            } else {
                Err(latin1_error(text, member))
            }
        }
    }
}

/// Locate the first non-Latin-1 character and the line it sits on.
fn latin1_error(text: &str, member: &'static str) -> EncodingError {
    let (pos, character) = text
        .char_indices()
        .find(|(_, c)| u32::from(*c) > 0xFF)
        .unwrap_or((0, char::REPLACEMENT_CHARACTER));
    let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[pos..].find('\n').map_or(text.len(), |i| pos + i);
    EncodingError {
        charset: TextEncoding::Latin1.charset(),
        member,
        word: text[line_start..line_end].trim_end_matches('\r').to_string(),
        character,
        code_point: u32::from(character),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params() {
        assert_eq!(TextEncoding::from_param("utf-8"), Some(TextEncoding::Utf8));
        assert_eq!(TextEncoding::from_param("iso-8859-1"), Some(TextEncoding::Latin1));
        assert_eq!(TextEncoding::from_param("UTF-8"), None);
        assert_eq!(TextEncoding::from_param("latin1"), None);
    }

    #[test]
    fn test_latin1_bytes() {
        let bytes = encode("café\nnaïve\n", TextEncoding::Latin1, "words.txt").unwrap();
        assert_eq!(bytes, b"caf\xe9\nna\xefve\n".to_vec());
    }

    #[test]
    fn test_utf8_passthrough() {
        let bytes = encode("café", TextEncoding::Utf8, "words.txt").unwrap();
        assert_eq!(bytes, "café".as_bytes());
    }

    #[test]
    fn test_latin1_error_context() {
        let err = encode("apple\r\nŒuvre\r\nzoo\r\n", TextEncoding::Latin1, "words.txt").unwrap_err();
        assert_eq!(err.character, 'Œ');
        assert_eq!(err.code_point, 0x152);
        assert_eq!(err.word, "Œuvre");
        assert_eq!(err.member, "words.txt");
        assert_eq!(err.charset, "ISO-8859-1");
    }

    #[test]
    fn test_latin1_rejects_euro_sign() {
        // windows-1252 has a byte for this, ISO-8859-1 does not
        assert!(encode("€", TextEncoding::Latin1, "inline").is_err());
    }
}
