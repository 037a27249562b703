//! Implements the Forum trait for Discourse
use async_trait::async_trait;
use log::*;
use reqwest::{
    Client, Url,
    header::{HeaderMap, HeaderValue},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    error::ActionsError,
    forum::{CreateTopicRequest, Forum, Topic},
    result::Result,
};

/// Connection settings for a Discourse instance.
#[derive(Debug, Clone)]
pub struct ForumConfig {
    /// Base URL of the forum, e.g. `https://community.example.com`.
    pub url: String,
    pub api_key: SecretString,
    /// User the topic is posted as.
    pub username: String,
}

#[derive(Debug, Serialize)]
struct CreatePost<'a> {
    title: &'a str,
    raw: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    topic_id: u64,
    topic_slug: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}

/// Discourse forum client authenticating with an API key.
pub struct Discourse {
    base_url: Url,
    client: Client,
}

impl Discourse {
    pub fn new(config: ForumConfig) -> Result<Self> {
        if config.api_key.expose_secret().is_empty() {
            return Err(ActionsError::forum("must set forum api key").into());
        }

        if config.username.is_empty() {
            return Err(ActionsError::forum("must set forum username").into());
        }

        let mut headers = HeaderMap::new();
        headers.append(
            "Api-Key",
            HeaderValue::from_str(config.api_key.expose_secret())
                .map_err(ActionsError::from)?,
        );
        headers.append(
            "Api-Username",
            HeaderValue::from_str(&config.username)
                .map_err(ActionsError::from)?,
        );

        let client = Client::builder().default_headers(headers).build()?;

        let url = config.url.trim_end_matches('/');
        let base_url = Url::parse(&format!("{url}/"))?;

        Ok(Self { base_url, client })
    }

    fn topic_url(&self, slug: &str, id: u64) -> String {
        format!("{}t/{slug}/{id}", self.base_url)
    }
}

#[async_trait]
impl Forum for Discourse {
    async fn create_topic(&self, req: CreateTopicRequest) -> Result<Topic> {
        let posts_url = self.base_url.join("posts.json")?;

        let response = self
            .client
            .post(posts_url)
            .json(&CreatePost {
                title: &req.title,
                raw: &req.raw,
                category: req.category,
            })
            .send()
            .await
            .map_err(ActionsError::from)?;

        let status = response.status();

        if !status.is_success() {
            let errors = response
                .json::<ErrorResponse>()
                .await
                .map(|r| r.errors.join(", "))
                .unwrap_or_default();

            return match status.as_u16() {
                401 | 403 => {
                    Err(ActionsError::AuthenticationError(errors).into())
                }
                429 => Err(ActionsError::RateLimitExceeded.into()),
                code => Err(ActionsError::forum(format!(
                    "failed to create topic ({code}): {errors}"
                ))
                .into()),
            };
        }

        let created: CreatedPost =
            response.json().await.map_err(ActionsError::from)?;

        let topic = Topic {
            id: created.topic_id,
            url: self.topic_url(&created.topic_slug, created.topic_id),
        };

        info!("created forum topic: {}", topic.url);

        Ok(topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ForumConfig {
        ForumConfig {
            url: "https://community.example.com/".into(),
            api_key: SecretString::from("key".to_string()),
            username: "releasebot".into(),
        }
    }

    #[test]
    fn builds_topic_urls() {
        let forum = Discourse::new(config()).unwrap();
        assert_eq!(
            forum.topic_url("release-9-4-4", 42),
            "https://community.example.com/t/release-9-4-4/42"
        );
    }

    #[test]
    fn requires_credentials() {
        let mut missing_key = config();
        missing_key.api_key = SecretString::from(String::new());
        assert!(Discourse::new(missing_key).is_err());

        let mut missing_user = config();
        missing_user.username = String::new();
        assert!(Discourse::new(missing_user).is_err());
    }

    #[test]
    fn serializes_post_without_category() {
        let post = CreatePost {
            title: "Release 9.4.4",
            raw: "notes",
            category: None,
        };
        assert_eq!(
            serde_json::to_string(&post).unwrap(),
            r#"{"title":"Release 9.4.4","raw":"notes"}"#
        );
    }
}
