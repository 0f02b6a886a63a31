//! Character encodings tried when decoding delimited text.

use std::borrow::Cow;

use encoding_rs::{EUC_KR, UTF_8, WINDOWS_1252};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encoding hypothesis for a CSV attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// Strict UTF-8; a leading BOM survives as U+FEFF and is trimmed from the header.
    Utf8,
    /// Strict UTF-8 with the BOM removed first.
    Utf8Sig,
    /// Unified Hangul Code (Windows superset of EUC-KR).
    Cp949,
    /// KS X 1001 only; every table it accepts is also accepted by [`Self::Cp949`].
    EucKr,
    /// Windows-1252; maps every byte, so it never fails.
    Latin1,
}

impl SourceEncoding {
    pub const ATTEMPT_ORDER: [SourceEncoding; 5] = [
        SourceEncoding::Utf8,
        SourceEncoding::Utf8Sig,
        SourceEncoding::Cp949,
        SourceEncoding::EucKr,
        SourceEncoding::Latin1,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf8Sig => "utf-8-sig",
            Self::Cp949 => "cp949",
            Self::EucKr => "euc-kr",
            Self::Latin1 => "latin1",
        }
    }

    /// Decodes `bytes`, returning `None` on any malformed sequence.
    pub fn decode(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        match self {
            Self::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
            Self::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            Self::Cp949 | Self::EucKr => {
                EUC_KR.decode_without_bom_handling_and_without_replacement(bytes)
            }
            Self::Latin1 => Some(WINDOWS_1252.decode_without_bom_handling(bytes).0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_rejects_hangul_code_bytes() {
        let (encoded, _, _) = EUC_KR.encode("성명;본부");
        assert!(SourceEncoding::Utf8.decode(&encoded).is_none());
        assert_eq!(
            SourceEncoding::Cp949.decode(&encoded).as_deref(),
            Some("성명;본부")
        );
    }

    #[test]
    fn utf8_sig_strips_bom() {
        let bytes = b"\xEF\xBB\xBFname,org\n";
        assert_eq!(
            SourceEncoding::Utf8Sig.decode(bytes).as_deref(),
            Some("name,org\n")
        );
        assert_eq!(
            SourceEncoding::Utf8.decode(bytes).as_deref(),
            Some("\u{feff}name,org\n")
        );
    }

    #[test]
    fn hangul_codes_decode_identically() {
        let (encoded, _, had_errors) = EUC_KR.encode("퇴직위험도|위험요인");
        assert!(!had_errors);
        assert_eq!(
            SourceEncoding::EucKr.decode(&encoded),
            SourceEncoding::Cp949.decode(&encoded)
        );
    }

    #[test]
    fn accented_latin1_is_rejected_by_multibyte_codes() {
        let (encoded, _, _) = WINDOWS_1252.encode("José;Café\n");
        for encoding in [
            SourceEncoding::Utf8,
            SourceEncoding::Utf8Sig,
            SourceEncoding::Cp949,
            SourceEncoding::EucKr,
        ] {
            assert!(encoding.decode(&encoded).is_none(), "{}", encoding.label());
        }
        assert_eq!(
            SourceEncoding::Latin1.decode(&encoded).as_deref(),
            Some("José;Café\n")
        );
    }

    #[test]
    fn latin1_never_fails() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        assert!(SourceEncoding::Latin1.decode(&bytes).is_some());
    }
}
