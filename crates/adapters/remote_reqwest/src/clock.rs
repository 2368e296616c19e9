//! Remote clock source.

use minisite_app::ports::ClockSource;
use minisite_domain::clock::CurrentTime;
use minisite_domain::error::FetchError;

use crate::client::RemoteClient;

/// [`ClockSource`] backed by `{api}/current-time`.
#[derive(Debug, Clone)]
pub struct RemoteClockSource {
    client: RemoteClient,
}

impl RemoteClockSource {
    #[must_use]
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

impl ClockSource for RemoteClockSource {
    async fn current_time(&self) -> Result<CurrentTime, FetchError> {
        let url = self.client.api_url("current-time");
        Ok(self.client.get_json(&url).await?)
    }
}
