use url::Url;

use crate::error::{Result, TldwError};

const LOCAL_ORIGIN: &str = "http://localhost:5000";
const PRODUCTION_ORIGIN: &str = "https://api.tldw.tube";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Endpoint {
    Local,
    #[default]
    Production,
    Custom(String),
}

impl Endpoint {
    /// Validate an origin and strip any trailing slash
    pub fn custom(origin: &str) -> Result<Self> {
        let origin = origin.trim();
        let parsed = Url::parse(origin).map_err(|source| TldwError::InvalidOrigin {
            origin: origin.to_string(),
            source,
        })?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(TldwError::InvalidOrigin {
                origin: origin.to_string(),
                source: url::ParseError::EmptyHost,
            });
        }

        Ok(Endpoint::Custom(origin.trim_end_matches('/').to_string()))
    }

    /// `local` or `production`, case-insensitive
    pub fn from_environment(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "local" | "localhost" | "dev" => Ok(Endpoint::Local),
            "production" | "prod" => Ok(Endpoint::Production),
            _ => Err(TldwError::UnknownEnvironment(name.to_string())),
        }
    }

    /// The page's own host decides the backend: localhost talks to the local
    /// server, everything else to production.
    pub fn for_host(host: &str) -> Self {
        if host == "localhost" {
            Endpoint::Local
        } else {
            Endpoint::Production
        }
    }

    pub fn origin(&self) -> &str {
        match self {
            Endpoint::Local => LOCAL_ORIGIN,
            Endpoint::Production => PRODUCTION_ORIGIN,
            Endpoint::Custom(origin) => origin,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Local => "local",
            Endpoint::Production => "production",
            Endpoint::Custom(_) => "custom",
        }
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.origin(), path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_switch_is_two_way() {
        assert_eq!(Endpoint::for_host("localhost"), Endpoint::Local);
        assert_eq!(Endpoint::for_host("tldw.tube"), Endpoint::Production);
        assert_eq!(Endpoint::for_host("127.0.0.1"), Endpoint::Production);
    }

    #[test]
    fn api_urls() {
        assert_eq!(
            Endpoint::Local.api_url("summarize"),
            "http://localhost:5000/api/summarize"
        );
        assert_eq!(
            Endpoint::Production.api_url("/chat"),
            "https://api.tldw.tube/api/chat"
        );
    }

    #[test]
    fn custom_origin_is_normalized() {
        let endpoint = Endpoint::custom("http://127.0.0.1:8080/").unwrap();
        assert_eq!(endpoint.origin(), "http://127.0.0.1:8080");
        assert_eq!(endpoint.api_url("health"), "http://127.0.0.1:8080/api/health");
    }

    #[test]
    fn rejects_non_http_origins() {
        assert!(Endpoint::custom("not a url").is_err());
        assert!(Endpoint::custom("ftp://example.com").is_err());
    }

    #[test]
    fn environment_names() {
        assert_eq!(Endpoint::from_environment("LOCAL").unwrap(), Endpoint::Local);
        assert_eq!(
            Endpoint::from_environment("production").unwrap(),
            Endpoint::Production
        );
        assert!(matches!(
            Endpoint::from_environment("staging"),
            Err(TldwError::UnknownEnvironment(_))
        ));
    }
}
