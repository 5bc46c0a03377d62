use anyhow::{anyhow, Context};
use async_trait::async_trait;

use crate::{
    api::{self, Comment, CommentId, NewComment},
    Remote,
};

/// `Remote` speaking JSON over HTTP, in the browser or natively
#[derive(Clone, Debug)]
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    pub fn new(base_url: impl Into<String>) -> HttpRemote {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        HttpRemote {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

async fn check_status(resp: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.bytes().await.unwrap_or_default();
    match api::Error::parse(&body) {
        Ok(err) => Err(anyhow::Error::new(err).context(format!("server answered {status}"))),
        Err(_) => Err(anyhow!("server answered {status}")),
    }
}

#[async_trait(?Send)]
impl Remote for HttpRemote {
    async fn fetch_comments(&self) -> anyhow::Result<Vec<Comment>> {
        let resp = self
            .client
            .get(self.url("comments"))
            .send()
            .await
            .context("sending comment listing request")?;
        check_status(resp)
            .await?
            .json()
            .await
            .context("parsing comment listing")
    }

    async fn create_comment(&self, comment: &NewComment) -> anyhow::Result<Comment> {
        let resp = self
            .client
            .post(self.url("comments"))
            .json(comment)
            .send()
            .await
            .context("sending comment creation request")?;
        check_status(resp)
            .await?
            .json()
            .await
            .context("parsing created comment")
    }

    async fn delete_comment(&self, id: CommentId) -> anyhow::Result<()> {
        let resp = self
            .client
            .delete(self.url(&format!("comments/{id}")))
            .send()
            .await
            .with_context(|| format!("sending deletion request for comment {id}"))?;
        check_status(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_dropped() {
        let r = HttpRemote::new("http://localhost:3000//");
        assert_eq!(r.base_url(), "http://localhost:3000");
        assert_eq!(r.url("comments/4"), "http://localhost:3000/comments/4");
    }
}
