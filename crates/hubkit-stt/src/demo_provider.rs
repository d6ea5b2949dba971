use crate::provider_trait::{AudioStream, SttProvider};
use async_trait::async_trait;
use futures::StreamExt;
use hubkit_core::{AudioCodec, AudioFormat, SpeechMetadata, SttError};
use std::sync::atomic::{AtomicUsize, Ordering};

const DEMO_TRANSCRIPT: &str = "Turn the Kitchen Lights on";

/// Built-in provider that drains the stream and answers with a fixed phrase.
pub struct DemoProvider {
    languages: Vec<String>,
    formats: Vec<AudioFormat>,
    codecs: Vec<AudioCodec>,
    bitrates: Vec<u32>,
    samplerates: Vec<u32>,
    processed: AtomicUsize,
}

impl DemoProvider {
    pub fn new() -> Self {
        Self {
            languages: vec!["en".to_string(), "de".to_string()],
            formats: vec![AudioFormat::Wav],
            codecs: vec![AudioCodec::Pcm],
            bitrates: vec![16],
            samplerates: vec![16000],
            processed: AtomicUsize::new(0),
        }
    }

    /// Number of streams processed so far.
    pub fn processed_count(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SttProvider for DemoProvider {
    fn name(&self) -> &str {
        "demo"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), SttError> {
        let Some(value) = config.get("languages") else {
            return Ok(());
        };
        let languages = value
            .as_array()
            .and_then(|items| {
                items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
            })
            .ok_or_else(|| {
                SttError::InitializationFailed(
                    "'languages' in demo config must be a list of strings".to_string(),
                )
            })?;
        if languages.is_empty() {
            return Err(SttError::InitializationFailed(
                "'languages' in demo config must not be empty".to_string(),
            ));
        }

        tracing::info!(languages = ?languages, "DemoProvider initialized");
        self.languages = languages;
        Ok(())
    }

    fn supported_languages(&self) -> &[String] {
        &self.languages
    }

    fn supported_formats(&self) -> &[AudioFormat] {
        &self.formats
    }

    fn supported_codecs(&self) -> &[AudioCodec] {
        &self.codecs
    }

    fn supported_bitrates(&self) -> &[u32] {
        &self.bitrates
    }

    fn supported_samplerates(&self) -> &[u32] {
        &self.samplerates
    }

    async fn process_audio_stream(
        &self,
        metadata: &SpeechMetadata,
        mut stream: AudioStream,
    ) -> Result<Option<String>, SttError> {
        let mut total = 0usize;
        while let Some(chunk) = stream.next().await {
            total += chunk?.len();
        }
        let count = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::trace!(
            language = %metadata.language,
            "DemoProvider processed stream #{count}, {total} bytes"
        );

        if total == 0 {
            return Ok(None);
        }
        Ok(Some(DEMO_TRANSCRIPT.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::stream;

    fn metadata(language: &str) -> SpeechMetadata {
        SpeechMetadata {
            language: language.to_string(),
            format: AudioFormat::Wav,
            codec: AudioCodec::Pcm,
            bitrate: 16,
            samplerate: 16000,
        }
    }

    fn audio(chunks: Vec<&'static [u8]>) -> AudioStream {
        stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from_static(c)))).boxed()
    }

    #[test]
    fn test_demo_provider_name() {
        assert_eq!(DemoProvider::new().name(), "demo");
    }

    #[test]
    fn test_demo_provider_default_capabilities() {
        let provider = DemoProvider::new();
        assert_eq!(provider.supported_languages(), ["en", "de"]);
        assert_eq!(provider.supported_formats(), [AudioFormat::Wav]);
        assert_eq!(provider.supported_codecs(), [AudioCodec::Pcm]);
        assert_eq!(provider.supported_bitrates(), [16]);
        assert_eq!(provider.supported_samplerates(), [16000]);
    }

    #[test]
    fn test_check_metadata_accepts_supported() {
        let provider = DemoProvider::new();
        assert!(provider.check_metadata(&metadata("en")));
        assert!(provider.check_metadata(&metadata("de")));
    }

    #[test]
    fn test_check_metadata_rejects_each_field() {
        let provider = DemoProvider::new();
        assert!(!provider.check_metadata(&metadata("fr")));

        let mut m = metadata("en");
        m.format = AudioFormat::Ogg;
        assert!(!provider.check_metadata(&m));

        let mut m = metadata("en");
        m.codec = AudioCodec::Opus;
        assert!(!provider.check_metadata(&m));

        let mut m = metadata("en");
        m.bitrate = 32;
        assert!(!provider.check_metadata(&m));

        let mut m = metadata("en");
        m.samplerate = 44100;
        assert!(!provider.check_metadata(&m));
    }

    #[tokio::test]
    async fn test_initialize_without_languages_keeps_defaults() {
        let mut provider = DemoProvider::new();
        provider
            .initialize(toml::Value::Table(Default::default()))
            .await
            .unwrap();
        assert_eq!(provider.supported_languages(), ["en", "de"]);
    }

    #[tokio::test]
    async fn test_initialize_overrides_languages() {
        let mut provider = DemoProvider::new();
        let config: toml::Value = toml::from_str(r#"languages = ["fr"]"#).unwrap();
        provider.initialize(config).await.unwrap();
        assert_eq!(provider.supported_languages(), ["fr"]);
    }

    #[tokio::test]
    async fn test_initialize_rejects_bad_languages() {
        let mut provider = DemoProvider::new();
        let config: toml::Value = toml::from_str(r#"languages = "en""#).unwrap();
        match provider.initialize(config).await {
            Err(SttError::InitializationFailed(msg)) => assert!(msg.contains("languages")),
            other => panic!("expected InitializationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_initialize_rejects_empty_languages() {
        let mut provider = DemoProvider::new();
        let config: toml::Value = toml::from_str("languages = []").unwrap();
        assert!(provider.initialize(config).await.is_err());
    }

    #[tokio::test]
    async fn test_process_returns_transcript() {
        let provider = DemoProvider::new();
        let text = provider
            .process_audio_stream(&metadata("en"), audio(vec![&b"RIFF"[..], &b"data"[..]]))
            .await
            .unwrap();
        assert_eq!(text.as_deref(), Some(DEMO_TRANSCRIPT));
        assert_eq!(provider.processed_count(), 1);
    }

    #[tokio::test]
    async fn test_process_empty_stream_returns_none() {
        let provider = DemoProvider::new();
        let text = provider
            .process_audio_stream(&metadata("en"), audio(vec![]))
            .await
            .unwrap();
        assert!(text.is_none());
    }

    #[tokio::test]
    async fn test_process_propagates_stream_error() {
        let provider = DemoProvider::new();
        let stream = stream::iter(vec![
            Ok(Bytes::from_static(b"abc")),
            Err(SttError::StreamRead("connection reset".to_string())),
        ])
        .boxed();
        match provider.process_audio_stream(&metadata("en"), stream).await {
            Err(SttError::StreamRead(msg)) => assert_eq!(msg, "connection reset"),
            other => panic!("expected StreamRead, got {other:?}"),
        }
    }

    #[test]
    fn test_demo_provider_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DemoProvider>();
    }
}
