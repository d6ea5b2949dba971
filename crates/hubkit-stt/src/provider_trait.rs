use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use hubkit_core::{AudioCodec, AudioFormat, SpeechMetadata, SttError};

/// Raw audio body as it arrives from the client, chunk by chunk.
pub type AudioStream = BoxStream<'static, Result<Bytes, SttError>>;

/// A speech-to-text backend.
///
/// Providers are created through the [`PlatformRegistry`](crate::PlatformRegistry),
/// initialised once with their TOML block and then shared read-only between
/// requests. The five `supported_*` sets are what clients negotiate against.
#[async_trait]
pub trait SttProvider: Send + Sync {
    /// Platform name (e.g. `"demo"`).
    fn name(&self) -> &str;
    /// One-time initialisation with platform-specific configuration.
    async fn initialize(&mut self, config: toml::Value) -> Result<(), SttError>;

    fn supported_languages(&self) -> &[String];
    fn supported_formats(&self) -> &[AudioFormat];
    fn supported_codecs(&self) -> &[AudioCodec];
    fn supported_bitrates(&self) -> &[u32];
    fn supported_samplerates(&self) -> &[u32];

    /// Consume the audio stream and return the recognised text.
    ///
    /// `Ok(None)` means the audio was read but nothing could be recognised.
    async fn process_audio_stream(
        &self,
        metadata: &SpeechMetadata,
        stream: AudioStream,
    ) -> Result<Option<String>, SttError>;

    /// Returns `true` if every field of `metadata` is in the matching capability set.
    fn check_metadata(&self, metadata: &SpeechMetadata) -> bool {
        self.supported_languages().contains(&metadata.language)
            && self.supported_formats().contains(&metadata.format)
            && self.supported_codecs().contains(&metadata.codec)
            && self.supported_bitrates().contains(&metadata.bitrate)
            && self.supported_samplerates().contains(&metadata.samplerate)
    }
}
