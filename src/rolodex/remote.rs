use super::{Rolodex, RolodexFile};
use crate::error::Error;
use reqwest::header::LAST_MODIFIED;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// Fetches documents over http(s), each URL at most once per instance
pub struct RemoteFs {
    client: reqwest::blocking::Client,
    fetched: Mutex<HashMap<String, RolodexFile>>,
}

impl RemoteFs {
    /// Creates a remote rolodex whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            fetched: Mutex::new(HashMap::new()),
        })
    }

    fn fetch(&self, location: &str) -> Result<RolodexFile, Error> {
        debug!(target: "strata::rolodex", "GET {location}");
        let response = self
            .client
            .get(location)
            .send()
            .map_err(|e| Error::rolodex(location, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::rolodex(location, format!("server returned {status}")));
        }

        let last_modified = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| match httpdate::parse_http_date(value) {
                Ok(time) => Some(time),
                Err(e) => {
                    warn!(target: "strata::rolodex", "ignoring malformed Last-Modified '{value}' from {location}: {e}");
                    None
                }
            });

        let content = response.text().map_err(|e| Error::rolodex(location, e))?;
        Ok(RolodexFile {
            location: location.to_string(),
            content,
            last_modified,
        })
    }
}

impl Rolodex for RemoteFs {
    fn open(&self, location: &str) -> Result<RolodexFile, Error> {
        if let Some(file) = self
            .fetched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location)
        {
            return Ok(file.clone());
        }

        let file = self.fetch(location)?;
        self.fetched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.to_string(), file.clone());
        Ok(file)
    }
}
