#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("backend error: {0}")]
    Backend(String),
}

/// Blocking tone output. Both calls return only after the full duration
/// has elapsed; the core relies on that for playback timing.
pub trait AudioSink: Send + Sync {
    fn tone(&self, frequency_hz: f32, duration_ms: u32) -> Result<(), AudioError>;
    fn silence(&self, duration_ms: u32) -> Result<(), AudioError>;
}
