use std::fmt::Debug;

/// Environment variable consulted by [`EnvCredentials::default`].
pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";

/// Source of the service key attached to every request.
///
/// Returning `None` is not an error: the request goes out unauthenticated and
/// the service's rejection is what the user sees.
pub trait CredentialProvider: Send + Sync + Debug {
    fn api_key(&self) -> Option<String>;
}

/// Reads the key from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(API_KEY_ENV)
    }
}

impl CredentialProvider for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|key| !key.trim().is_empty())
    }
}

/// Fixed key, e.g. from the config file or a test.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<String>);

impl StaticCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self(Some(api_key.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl From<Option<String>> for StaticCredentials {
    fn from(value: Option<String>) -> Self {
        Self(value)
    }
}

impl CredentialProvider for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.0.clone()
    }
}

/// First provider that yields a key wins.
#[derive(Debug, Default)]
pub struct ChainedCredentials {
    sources: Vec<Box<dyn CredentialProvider>>,
}

impl ChainedCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl CredentialProvider + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl CredentialProvider for ChainedCredentials {
    fn api_key(&self) -> Option<String> {
        self.sources.iter().find_map(|source| source.api_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_prefers_earlier_sources() {
        let chain = ChainedCredentials::new()
            .with(StaticCredentials::none())
            .with(StaticCredentials::new("FROM_FILE"))
            .with(StaticCredentials::new("NEVER"));

        assert_eq!(chain.api_key().as_deref(), Some("FROM_FILE"));
    }

    #[test]
    fn empty_chain_yields_nothing() {
        assert_eq!(ChainedCredentials::new().api_key(), None);
    }

    #[test]
    fn unset_env_var_yields_nothing() {
        let creds = EnvCredentials::new("CLEONCAST_TEST_KEY_THAT_IS_NEVER_SET");
        assert_eq!(creds.api_key(), None);
    }
}
