use anyhow::{Context, anyhow};
use reqwest::Url;
use tracing::debug;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Environment variable naming the backend base URL.
pub const BACKEND_URL_ENV: &str = "TASKBOARD_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: Url,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BACKEND_URL).expect("default backend url is valid"),
        }
    }
}

impl BackendConfig {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let trimmed = raw.trim().trim_end_matches('/');
        let base_url =
            Url::parse(trimmed).with_context(|| format!("invalid backend url '{raw}'"))?;

        match base_url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(anyhow!(
                    "backend url '{raw}' must use http or https, got '{other}'"
                ));
            }
        }

        if base_url.cannot_be_a_base() {
            return Err(anyhow!("backend url '{raw}' cannot carry a path"));
        }

        Ok(Self { base_url })
    }

    /// Picks the first non-blank candidate in precedence order, falling
    /// back to [`DEFAULT_BACKEND_URL`].
    #[tracing::instrument(skip(candidates))]
    pub fn resolve<I>(candidates: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let chosen = candidates
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty());

        match chosen {
            Some(raw) => {
                debug!(backend_url = %raw, "using configured backend url");
                Self::parse(&raw)
            }
            None => {
                debug!(
                    backend_url = DEFAULT_BACKEND_URL,
                    "no backend url configured, using default"
                );
                Ok(Self::default())
            }
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_localhost() {
        assert_eq!(
            BackendConfig::default().base_url().as_str(),
            "http://localhost:8000/"
        );
    }

    #[test]
    fn first_non_blank_candidate_wins() {
        let cfg = BackendConfig::resolve([
            None,
            Some("   ".to_string()),
            Some("https://tasks.example.com/api/".to_string()),
            Some("http://ignored:1".to_string()),
        ])
        .unwrap();
        assert_eq!(cfg.base_url().as_str(), "https://tasks.example.com/api");

        let cfg = BackendConfig::resolve([None, None]).unwrap();
        assert_eq!(cfg, BackendConfig::default());
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(BackendConfig::parse("ftp://example.com").is_err());
        assert!(BackendConfig::parse("localhost:8000").is_err());
        assert!(BackendConfig::parse("not a url").is_err());
    }
}
