use anyhow::{Context, Result};
use reqwest::Url;

/// Query parameter that carries the location.
pub const LOCATION_PARAM: &str = "city";

/// Address of the current-conditions screen, carrying the last looked-up
/// location so a link can be shared or reopened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareableAddress {
    url: Url,
}

impl ShareableAddress {
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input).with_context(|| format!("Invalid link: {input}"))?;
        Ok(Self { url })
    }

    /// Location carried by the address.
    ///
    /// Only a single `city` parameter counts; a repeated one is ambiguous and
    /// treated as absent.
    pub fn location(&self) -> Option<String> {
        let mut values = self
            .url
            .query_pairs()
            .filter(|(key, _)| key == LOCATION_PARAM)
            .map(|(_, value)| value.into_owned());

        match (values.next(), values.next()) {
            (Some(value), None) => Some(value),
            _ => None,
        }
    }

    /// Replace the carried location, keeping any other parameters in order.
    pub fn set_location(&mut self, location: &str) {
        let others: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key != LOCATION_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut pairs = self.url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &others {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(LOCATION_PARAM, location);
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl std::fmt::Display for ShareableAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl std::str::FromStr for ShareableAddress {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
