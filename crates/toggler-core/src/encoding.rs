//! Base64 and URL encoding toggles.

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use regex::Regex;

use crate::binary::BinaryToggle;
use crate::error::{ToggleError, ToggleResult};

/// Characters `encodeURIComponent` leaves alone, besides ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// Decoding tolerates non-zero trailing bits, as most decoders do.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

fn whitespace_word() -> ToggleResult<Regex> {
    Ok(Regex::new(r"\S+")?)
}

/// Standard-alphabet base64 with padding.
pub struct Base64Toggle {
    detector: Regex,
    word: Regex,
}

impl Base64Toggle {
    /// Build the toggle.
    pub fn new() -> ToggleResult<Self> {
        Ok(Self {
            detector: Regex::new(r"^([A-Za-z0-9+/]{4})*([A-Za-z0-9+/]{3}=|[A-Za-z0-9+/]{2}==)?$")?,
            word: whitespace_word()?,
        })
    }
}

impl BinaryToggle for Base64Toggle {
    fn name(&self) -> &'static str {
        "base64"
    }

    fn detector(&self) -> &Regex {
        &self.detector
    }

    fn word(&self) -> &Regex {
        &self.word
    }

    fn transform(&self, text: &str, encoded: bool) -> ToggleResult<String> {
        if !encoded {
            return Ok(STANDARD.encode(text));
        }
        let bytes = LENIENT
            .decode(text)
            .map_err(|err| ToggleError::user(format!("Invalid base64 text: {err}")))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Percent-encoding of URI components.
pub struct UrlToggle {
    detector: Regex,
    word: Regex,
}

impl UrlToggle {
    /// Build the toggle.
    pub fn new() -> ToggleResult<Self> {
        Ok(Self {
            detector: Regex::new("%[0-9a-fA-F]{2}")?,
            word: whitespace_word()?,
        })
    }
}

impl BinaryToggle for UrlToggle {
    fn name(&self) -> &'static str {
        "url"
    }

    fn detector(&self) -> &Regex {
        &self.detector
    }

    fn word(&self) -> &Regex {
        &self.word
    }

    fn transform(&self, text: &str, encoded: bool) -> ToggleResult<String> {
        if !encoded {
            return Ok(utf8_percent_encode(text, URI_COMPONENT).to_string());
        }
        percent_decode_str(text)
            .decode_utf8()
            .map(|decoded| decoded.into_owned())
            .map_err(|err| ToggleError::user(format!("Invalid URL-encoded text: {err}")))
    }
}
