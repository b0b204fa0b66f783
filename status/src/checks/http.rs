use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;

use healthpoint_models_status::EncodedStatus;
use healthpoint_models_status::Status;
use healthpoint_models_status::StatusList;

use super::StatusCheck;
use super::TraverseCheck;
use crate::Error;
use crate::Result;

/// Checks a remote healthpoint by querying its aggregate status.
///
/// The remote response is decoded from the status wire encoding so the remote
/// description and details are reported as they are.
/// Any failure to reach or understand the remote is reported as `CRIT`.
#[derive(Clone, Debug)]
pub struct HttpStatusCheck {
    client: Client,
    url: String,
}

impl HttpStatusCheck {
    /// Check the aggregate status exposed at `url` (for example `http://db-api/status/aggregate`).
    pub fn new<S: Into<String>>(url: S) -> HttpStatusCheck {
        HttpStatusCheck::with_client(Client::new(), url)
    }

    pub fn with_client<S: Into<String>>(client: Client, url: S) -> HttpStatusCheck {
        HttpStatusCheck {
            client,
            url: url.into(),
        }
    }

    async fn fetch(&self) -> Result<EncodedStatus> {
        let url = &self.url;
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| Error::RemoteRequest {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        let body = response.text().await.map_err(|source| Error::RemoteRequest {
            url: url.clone(),
            source,
        })?;
        let decoded: serde_json::Result<EncodedStatus> = serde_json::from_str(&body);
        if status.is_success() {
            return decoded.map_err(|source| Error::RemoteDecode {
                url: url.clone(),
                source,
            });
        }
        // Remote faults (such as a failed aggregate) still carry an encoded status.
        match decoded {
            Ok(encoded) => Ok(encoded),
            Err(_) => Err(Error::RemoteStatus {
                url: url.clone(),
                status: status.as_u16(),
            }),
        }
    }
}

impl StatusCheck for HttpStatusCheck {
    fn check_status<'a>(&'a self, name: &'a str) -> BoxFuture<'a, StatusList> {
        async move {
            let status = match self.fetch().await {
                Ok(encoded) => encoded.into_status(name),
                Err(error) => Status::critical(name, format!("{} check failed: {}", name, error)),
            };
            StatusList::from(status)
        }
        .boxed()
    }
}

/// Forwards traversals to a remote healthpoint over HTTP.
///
/// The remote is asked to continue the traversal with the remaining path and
/// its response body is passed back untouched.
#[derive(Clone, Debug)]
pub struct HttpTraverseCheck {
    base_url: String,
    client: Client,
}

impl HttpTraverseCheck {
    /// Traverse through the healthpoint mounted at `base_url` (for example `http://db-api/status`).
    pub fn new<S: Into<String>>(base_url: S) -> HttpTraverseCheck {
        HttpTraverseCheck::with_client(Client::new(), base_url)
    }

    pub fn with_client<S: Into<String>>(client: Client, base_url: S) -> HttpTraverseCheck {
        HttpTraverseCheck {
            base_url: base_url.into(),
            client,
        }
    }

    fn traverse_url(&self) -> String {
        format!("{}/traverse", self.base_url.trim_end_matches('/'))
    }

    async fn forward(&self, path: &[String], action: &str) -> Result<String> {
        let url = self.traverse_url();
        let dependencies = path.join(",");
        let response = self
            .client
            .get(url.as_str())
            .query(&[("action", action), ("dependencies", dependencies.as_str())])
            .send()
            .await
            .map_err(|source| Error::RemoteRequest {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::RemoteStatus {
                url,
                status: status.as_u16(),
            });
        }
        response
            .text()
            .await
            .map_err(|source| Error::RemoteRequest { url, source })
    }
}

impl TraverseCheck for HttpTraverseCheck {
    fn traverse<'a>(
        &'a self,
        path: &'a [String],
        action: &'a str,
    ) -> BoxFuture<'a, Result<String>> {
        self.forward(path, action).boxed()
    }
}
