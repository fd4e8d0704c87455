use anyhow::{anyhow, Context, Result};
use drr_core::{Record, RecordRepository};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};

/// The record API seen through HTTP. Every failure here is a transport
/// failure: it is reported to the caller and never retried.
pub struct HttpRecordRepository {
    client: Client,
    base_url: Url,
}

impl HttpRecordRepository {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).with_context(|| format!("Invalid API URL '{}'", base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("API URL '{}' cannot carry a path", base_url));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// `{base}/api/data[/{id}]`, with the id percent-encoded as one segment.
    fn data_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "data"]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }
}

impl RecordRepository for HttpRecordRepository {
    fn list(&self) -> Result<Vec<Record>> {
        let url = self.data_url(None);
        tracing::debug!(%url, "GET");
        let records = self
            .client
            .get(url)
            .send()
            .context("Error fetching data")?
            .error_for_status()?
            .json()
            .context("Server returned malformed records")?;
        Ok(records)
    }

    fn append(&self, record: Record) -> Result<Record> {
        let url = self.data_url(None);
        tracing::debug!(%url, "POST");
        let stored = self
            .client
            .post(url)
            .json(&record)
            .send()
            .context("Error submitting data")?
            .error_for_status()?
            .json()
            .context("Server returned a malformed record")?;
        Ok(stored)
    }

    fn remove_by_id(&self, id: &str) -> Result<Option<Record>> {
        let url = self.data_url(Some(id));
        tracing::debug!(%url, "DELETE");
        let response = self.client.delete(url).send().context("Error deleting data")?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let removed = response
            .error_for_status()?
            .json()
            .context("Server returned a malformed record")?;
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url() {
        let repo = HttpRecordRepository::new("http://localhost:8000").unwrap();
        assert_eq!(repo.data_url(None).as_str(), "http://localhost:8000/api/data");
        assert_eq!(repo.data_url(Some("a1")).as_str(), "http://localhost:8000/api/data/a1");
    }

    #[test]
    fn test_data_url_under_function_path() {
        let repo = HttpRecordRepository::new("https://example.netlify.app/.netlify/functions/server/").unwrap();
        assert_eq!(
            repo.data_url(Some("a b/c")).as_str(),
            "https://example.netlify.app/.netlify/functions/server/api/data/a%20b%2Fc"
        );
    }

    #[test]
    fn test_rejects_bad_url() {
        assert!(HttpRecordRepository::new("not a url").is_err());
        assert!(HttpRecordRepository::new("mailto:someone@example.com").is_err());
    }
}
