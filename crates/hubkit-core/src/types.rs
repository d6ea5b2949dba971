use crate::error::MetadataError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Bitrates a speech stream may declare, in bits per sample.
pub const AUDIO_BITRATES: [u32; 4] = [8, 16, 24, 32];

/// Samplerates a speech stream may declare, in Hz.
pub const AUDIO_SAMPLERATES: [u32; 9] = [
    8000, 11000, 16000, 18900, 22000, 32000, 37800, 44100, 48000,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Ogg,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
        }
    }
}

impl FromStr for AudioFormat {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wav" => Ok(AudioFormat::Wav),
            "ogg" => Ok(AudioFormat::Ogg),
            other => Err(MetadataError::Unsupported {
                key: "format",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    Pcm,
    Opus,
}

impl AudioCodec {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCodec::Pcm => "pcm",
            AudioCodec::Opus => "opus",
        }
    }
}

impl FromStr for AudioCodec {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pcm" => Ok(AudioCodec::Pcm),
            "opus" => Ok(AudioCodec::Opus),
            other => Err(MetadataError::Unsupported {
                key: "codec",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Negotiated parameters of one inbound speech stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechMetadata {
    pub language: String,
    pub format: AudioFormat,
    pub codec: AudioCodec,
    pub bitrate: u32,
    pub samplerate: u32,
}
