//! Opening pull requests on the code-review service.

use std::cell::RefCell;
use std::env;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{GitxError, Result};

/// Template the operator fills in when no description is given
pub const PULL_REQUEST_TEMPLATE: &str = "\n\n\
# Describe your pull request\n\
# Use GitHub flavored Markdown\n\
# Why not include a screenshot? Format is ![title](url)\n";

pub trait ReviewRequester {
    /// Open a review request for `branch` and return its URL.
    fn create_review_request(
        &self,
        token: &str,
        branch: &str,
        repo: &str,
        description: &str,
    ) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct PullRequestBody<'a> {
    title: &'a str,
    base: &'a str,
    head: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct PullRequestResponse {
    html_url: String,
}

/// GitHub pulls API client
///
/// The HTTP client is only built when a request is made, so a bad `HTTPS_PROXY` surfaces on
/// review requests and nowhere else.
pub struct GithubClient {
    api_url: String,
    base: String,
}

impl GithubClient {
    pub fn new(api_url: impl Into<String>, base: impl Into<String>) -> Self {
        GithubClient {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            base: base.into(),
        }
    }

    /// Blocking client honoring `HTTPS_PROXY` when set.
    fn http_client(&self) -> Result<reqwest::blocking::Client> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("gitx/", env!("CARGO_PKG_VERSION")));
        if let Ok(proxy) = env::var("HTTPS_PROXY") {
            debug!("using proxy {}", proxy);
            builder = builder.proxy(reqwest::Proxy::https(&proxy)?);
        }
        Ok(builder.build()?)
    }

    fn pulls_url(&self, repo: &str) -> String {
        format!("{}/repos/{}/pulls", self.api_url, repo)
    }
}

impl ReviewRequester for GithubClient {
    fn create_review_request(
        &self,
        token: &str,
        branch: &str,
        repo: &str,
        description: &str,
    ) -> Result<String> {
        let url = self.pulls_url(repo);
        debug!("creating pull request for {} at {}", branch, url);

        let response = self
            .http_client()?
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, format!("token {}", token))
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .json(&PullRequestBody {
                title: branch,
                base: &self.base,
                head: branch,
                body: description,
            })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(GitxError::remote(format!(
                "pull request creation returned {}: {}",
                status, detail
            )));
        }

        let created: PullRequestResponse = response.json()?;
        Ok(created.html_url)
    }
}

/// Review requester that records calls and answers with a fixed URL
pub struct RecordingReviewRequester {
    url: String,
    requests: RefCell<Vec<(String, String, String)>>,
}

impl RecordingReviewRequester {
    pub fn new(url: impl Into<String>) -> Self {
        RecordingReviewRequester {
            url: url.into(),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// (branch, repo, description) of every request made
    pub fn requests(&self) -> Vec<(String, String, String)> {
        self.requests.borrow().clone()
    }
}

impl ReviewRequester for RecordingReviewRequester {
    fn create_review_request(
        &self,
        _token: &str,
        branch: &str,
        repo: &str,
        description: &str,
    ) -> Result<String> {
        self.requests.borrow_mut().push((
            branch.to_string(),
            repo.to_string(),
            description.to_string(),
        ));
        Ok(self.url.clone())
    }
}
