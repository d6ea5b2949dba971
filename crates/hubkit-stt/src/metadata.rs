//! Parsing of the `X-Speech-Content` request header.
//!
//! ```text
//! X-Speech-Content: format=audio/wav; codecs=audio/pcm; samplerate=16000; bitrate=16; language=de_de
//! ```

use axum::http::HeaderMap;
use hubkit_core::{
    AudioCodec, AudioFormat, MetadataError, SpeechMetadata, AUDIO_BITRATES, AUDIO_SAMPLERATES,
};

pub const SPEECH_CONTENT_HEADER: &str = "x-speech-content";

/// Extract [`SpeechMetadata`] from request headers.
pub fn metadata_from_headers(headers: &HeaderMap) -> Result<SpeechMetadata, MetadataError> {
    let value = headers
        .get(SPEECH_CONTENT_HEADER)
        .ok_or(MetadataError::MissingHeader)?;
    let value = value
        .to_str()
        .map_err(|_| MetadataError::Malformed("header is not visible ASCII".to_string()))?;
    parse_speech_content(value)
}

/// Parse the value of an `X-Speech-Content` header.
pub fn parse_speech_content(value: &str) -> Result<SpeechMetadata, MetadataError> {
    let mut language = None;
    let mut format = None;
    let mut codec = None;
    let mut bitrate = None;
    let mut samplerate = None;

    for segment in value.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let (key, raw) = segment
            .split_once('=')
            .ok_or_else(|| MetadataError::Malformed(format!("'{segment}' is not key=value")))?;
        let key = key.trim();
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(MetadataError::Malformed(format!("empty value for '{key}'")));
        }

        match key {
            "format" => format = Some(mime_subtype(key, raw)?.parse::<AudioFormat>()?),
            "codec" | "codecs" => codec = Some(mime_subtype(key, raw)?.parse::<AudioCodec>()?),
            "bitrate" => bitrate = Some(parse_known("bitrate", raw, &AUDIO_BITRATES)?),
            "samplerate" => samplerate = Some(parse_known("samplerate", raw, &AUDIO_SAMPLERATES)?),
            "language" => language = Some(raw.to_string()),
            other => tracing::debug!(key = %other, "ignoring unknown speech content key"),
        }
    }

    Ok(SpeechMetadata {
        language: language.ok_or(MetadataError::MissingField("language"))?,
        format: format.ok_or(MetadataError::MissingField("format"))?,
        codec: codec.ok_or(MetadataError::MissingField("codec"))?,
        bitrate: bitrate.ok_or(MetadataError::MissingField("bitrate"))?,
        samplerate: samplerate.ok_or(MetadataError::MissingField("samplerate"))?,
    })
}

/// `audio/wav` -> `wav`; a bare `wav` is taken as is.
fn mime_subtype<'a>(key: &str, raw: &'a str) -> Result<&'a str, MetadataError> {
    let subtype = raw.split_once('/').map_or(raw, |(_, sub)| sub.trim());
    if subtype.is_empty() {
        return Err(MetadataError::Malformed(format!("empty subtype in '{key}={raw}'")));
    }
    Ok(subtype)
}

fn parse_known(key: &'static str, raw: &str, known: &[u32]) -> Result<u32, MetadataError> {
    let value: u32 = raw
        .parse()
        .map_err(|_| MetadataError::Malformed(format!("{key} '{raw}' is not an integer")))?;
    if !known.contains(&value) {
        return Err(MetadataError::Unsupported {
            key,
            value: raw.to_string(),
        });
    }
    Ok(value)
}
