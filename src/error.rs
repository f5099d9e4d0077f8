// SPDX-License-Identifier: MPL-2.0
use thiserror::Error as ThisError;

#[derive(Debug, Clone, ThisError)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Catalog Error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Audio Error: {0}")]
    Audio(#[from] AudioError),
    #[error("Video Error: {0}")]
    Video(#[from] VideoError),
    #[error("Story Error: {0}")]
    Story(#[from] StoryError),
}

/// Problems with the media catalog or the ids handed to it.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum CatalogError {
    /// The playlist has no tracks to play.
    #[error("playlist has no tracks")]
    NoTracks,

    /// Two records share the same id.
    #[error("duplicate media id: {0}")]
    DuplicateId(String),

    /// The id is not part of the catalog.
    #[error("unknown media id: {0}")]
    UnknownId(String),
}

/// Failures to produce background music.
///
/// Used to provide user-friendly, localized messages.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum AudioError {
    /// No audio output device is available.
    #[error("no audio output device found")]
    NoDevice,

    /// The platform refused to start playback.
    #[error("playback rejected: {0}")]
    Rejected(String),

    /// The track source could not be opened or decoded.
    #[error("audio source error: {0}")]
    Source(String),

    /// The audio engine has not finished starting yet.
    #[error("audio engine not ready")]
    NotReady,
}

impl AudioError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            AudioError::NoDevice => "error-audio-no-device",
            AudioError::Rejected(_) => "error-audio-rejected",
            AudioError::Source(_) => "error-audio-source",
            AudioError::NotReady => "error-audio-not-ready",
        }
    }
}

/// Failures while playing a video memory.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum VideoError {
    /// The video could not be opened or has an unusable codec.
    #[error("video source error: {0}")]
    Source(String),

    /// The source has no video stream.
    #[error("no video stream found")]
    NoVideoStream,

    /// Decoding failed during playback.
    #[error("video decoding failed: {0}")]
    DecodingFailed(String),
}

impl VideoError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            VideoError::Source(_) => "error-video-source",
            VideoError::NoVideoStream => "error-video-no-stream",
            VideoError::DecodingFailed(_) => "error-video-decoding",
        }
    }
}

/// Failures of the story generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum StoryError {
    /// No API key was configured.
    #[error("story API key is not configured")]
    MissingCredential,

    /// The request never reached the API.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with an error status or an unreadable body.
    #[error("API error: {0}")]
    Api(String),

    /// The API answered but produced no text.
    #[error("empty story response")]
    EmptyResponse,
}

impl StoryError {
    /// Returns the i18n key of the placeholder shown instead of a story.
    #[must_use]
    pub fn fallback_key(&self) -> &'static str {
        match self {
            StoryError::MissingCredential => "story-missing-key",
            StoryError::EmptyResponse => "story-faded",
            StoryError::Network(_) | StoryError::Api(_) => "story-sleeping",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn catalog_error_converts_into_error() {
        let err: Error = CatalogError::DuplicateId("p1".into()).into();
        assert!(matches!(err, Error::Catalog(CatalogError::DuplicateId(ref id)) if id == "p1"));
        assert_eq!(format!("{}", err), "Catalog Error: duplicate media id: p1");
    }

    #[test]
    fn audio_error_i18n_keys() {
        assert_eq!(AudioError::NoDevice.i18n_key(), "error-audio-no-device");
        assert_eq!(
            AudioError::Rejected("denied".into()).i18n_key(),
            "error-audio-rejected"
        );
        assert_eq!(AudioError::NotReady.i18n_key(), "error-audio-not-ready");
    }

    #[test]
    fn video_errors_have_their_own_messages() {
        assert_eq!(VideoError::NoVideoStream.i18n_key(), "error-video-no-stream");
        let err: Error = VideoError::Source("404".into()).into();
        assert_eq!(format!("{err}"), "Video Error: video source error: 404");
    }

    #[test]
    fn story_error_fallback_keys() {
        assert_eq!(
            StoryError::MissingCredential.fallback_key(),
            "story-missing-key"
        );
        assert_eq!(StoryError::EmptyResponse.fallback_key(), "story-faded");
        assert_eq!(
            StoryError::Network("timeout".into()).fallback_key(),
            "story-sleeping"
        );
        assert_eq!(
            StoryError::Api("429".into()).fallback_key(),
            "story-sleeping"
        );
    }
}
