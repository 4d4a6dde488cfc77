//! Provider configuration.
//!
//! All external knobs live in one [`MimicConfig`] value constructed once
//! at startup and handed to the provider. Nothing is read from the
//! environment implicitly; use [`MimicConfig::from_env`] when the caller
//! wants that.

use secrecy::{ExposeSecret, SecretString};

use crate::error::MimicError;

/// Which inference backend protocol to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// OpenAI-compatible `/chat/completions` gateway.
    #[default]
    OpenRouter,
    /// Google Gemini `generateContent` API.
    Gemini,
}

impl Backend {
    fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenRouter => "https://openrouter.ai/api/v1",
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }

    fn default_text_model(self) -> &'static str {
        match self {
            Self::OpenRouter => "openai/gpt-4o-mini",
            Self::Gemini => "gemini-2.5-flash",
        }
    }

    fn default_image_model(self) -> &'static str {
        match self {
            Self::OpenRouter => "bytedance-seed/seedream-4.5",
            Self::Gemini => "gemini-2.5-flash-image",
        }
    }
}

/// Configuration for the inference provider.
#[derive(Clone)]
pub struct MimicConfig {
    pub backend: Backend,
    /// API key for authentication (securely stored)
    pub api_key: SecretString,
    /// API base URL, without a trailing slash
    pub base_url: String,
    /// Model used for the multimodal analyze call
    pub text_model: String,
    /// Model used for image generation
    pub image_model: String,
    /// Sent as the `HTTP-Referer` identification header
    pub referer: String,
    /// Sent as the `X-Title` identification header
    pub app_title: String,
}

impl std::fmt::Debug for MimicConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MimicConfig")
            .field("backend", &self.backend)
            .field(
                "api_key_present",
                &(!self.api_key.expose_secret().is_empty()),
            )
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("referer", &self.referer)
            .field("app_title", &self.app_title)
            .finish()
    }
}

impl MimicConfig {
    /// Create a configuration with the backend's default endpoint and models.
    pub fn new(backend: Backend, api_key: impl Into<String>) -> Self {
        Self {
            backend,
            api_key: SecretString::from(api_key.into()),
            base_url: backend.default_base_url().to_string(),
            text_model: backend.default_text_model().to_string(),
            image_model: backend.default_image_model().to_string(),
            referer: "http://localhost".to_string(),
            app_title: "Mimic AI".to_string(),
        }
    }

    /// OpenRouter backend with defaults.
    pub fn openrouter(api_key: impl Into<String>) -> Self {
        Self::new(Backend::OpenRouter, api_key)
    }

    /// Gemini backend with defaults.
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self::new(Backend::Gemini, api_key)
    }

    /// Load from `MIMIC_AI_*` environment variables, keeping backend
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let backend = match std::env::var("MIMIC_AI_BACKEND").ok().as_deref() {
            Some(s) if s.eq_ignore_ascii_case("gemini") => Backend::Gemini,
            _ => Backend::OpenRouter,
        };
        let mut config = Self::new(
            backend,
            std::env::var("MIMIC_AI_API_KEY").unwrap_or_default(),
        );
        if let Ok(url) = std::env::var("MIMIC_AI_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Ok(model) = std::env::var("MIMIC_AI_TEXT_MODEL") {
            config.text_model = model;
        }
        if let Ok(model) = std::env::var("MIMIC_AI_IMAGE_MODEL") {
            config.image_model = model;
        }
        config
    }

    /// Set the base URL, trimming any trailing slashes.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the analyze model.
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// Set the image generation model.
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Set the `HTTP-Referer` identification header value.
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    /// Set the `X-Title` identification header value.
    pub fn with_app_title(mut self, app_title: impl Into<String>) -> Self {
        self.app_title = app_title.into();
        self
    }

    /// The API key, or a configuration error naming the variable to set.
    ///
    /// Providers call this at the start of every operation so a missing
    /// key surfaces before any network I/O.
    pub(crate) fn require_api_key(&self) -> Result<&str, MimicError> {
        let key = self.api_key.expose_secret();
        if key.is_empty() {
            return Err(MimicError::ConfigurationError(
                "Missing API key. Set MIMIC_AI_API_KEY or supply one in MimicConfig.".to_string(),
            ));
        }
        Ok(key)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), MimicError> {
        self.require_api_key()?;

        if self.base_url.is_empty() {
            return Err(MimicError::ConfigurationError(
                "Base URL cannot be empty".to_string(),
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(MimicError::ConfigurationError(
                "Base URL must start with http:// or https://".to_string(),
            ));
        }
        if self.text_model.is_empty() || self.image_model.is_empty() {
            return Err(MimicError::ConfigurationError(
                "Model identifiers cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_backend() {
        let config = MimicConfig::openrouter("k");
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.text_model, "openai/gpt-4o-mini");

        let config = MimicConfig::gemini("k");
        assert_eq!(
            config.base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.image_model, "gemini-2.5-flash-image");
    }

    #[test]
    fn base_url_trailing_slashes_are_trimmed() {
        let config = MimicConfig::openrouter("k").with_base_url("https://gw.example/v1///");
        assert_eq!(config.base_url, "https://gw.example/v1");
    }

    #[test]
    fn missing_api_key_is_a_configuration_error() {
        let config = MimicConfig::openrouter("");
        let err = config.require_api_key().unwrap_err();
        assert!(matches!(err, MimicError::ConfigurationError(_)));
        assert!(err.user_message().contains("MIMIC_AI_API_KEY"));
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let config = MimicConfig::openrouter("k").with_base_url("gw.example/v1");
        assert!(matches!(
            config.validate(),
            Err(MimicError::ConfigurationError(_))
        ));
        assert!(MimicConfig::openrouter("k").validate().is_ok());
    }

    #[test]
    fn debug_does_not_leak_the_key() {
        let rendered = format!("{:?}", MimicConfig::openrouter("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("api_key_present"));
    }
}
