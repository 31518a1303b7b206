// Event endpoints: the resource calendar's list/create/update/delete calls.

use tracing::debug;

use crate::client::EvidencaClient;
use crate::error::Error;
use crate::models::{EventRecord, EventUpdateRecord, NewEventRecord, RecordId};

impl EvidencaClient {
    /// List events, optionally scoped to one calendar tag.
    ///
    /// `GET /events` or `GET /events?calendar=<tag>`. A success envelope
    /// without `data` is treated as an empty list.
    pub async fn list_events(&self, calendar: Option<&str>) -> Result<Vec<EventRecord>, Error> {
        let mut url = self.url("events")?;
        if let Some(tag) = calendar {
            url.query_pairs_mut().append_pair("calendar", tag);
        }
        let events: Vec<EventRecord> = self.get(url).await?.unwrap_or_default();
        debug!(count = events.len(), calendar, "events listed");
        Ok(events)
    }

    /// Create an event. The back end must answer with the canonical record.
    pub async fn create_event(&self, event: &NewEventRecord) -> Result<EventRecord, Error> {
        let url = self.url("add-event")?;
        self.post(url, event).await?.ok_or_else(|| Error::MissingData {
            endpoint: "add-event".into(),
        })
    }

    /// Replace an event. Returns the server's copy when it sends one.
    pub async fn update_event(
        &self,
        id: &RecordId,
        event: &EventUpdateRecord,
    ) -> Result<Option<EventRecord>, Error> {
        let url = self.url_with_id("update-event", id)?;
        self.put(url, event).await
    }

    /// Delete an event by id.
    pub async fn delete_event(&self, id: &RecordId) -> Result<(), Error> {
        let url = self.url_with_id("delete-event", id)?;
        let _: Option<serde_json::Value> = self.delete(url).await?;
        Ok(())
    }
}
