// Project board endpoints.

use crate::client::EvidencaClient;
use crate::error::Error;
use crate::models::{NewProjectRecord, ProjectRecord, ProjectUpdateRecord, RecordId};

impl EvidencaClient {
    /// `GET /projects`
    pub async fn list_projects(&self) -> Result<Vec<ProjectRecord>, Error> {
        let url = self.url("projects")?;
        Ok(self.get(url).await?.unwrap_or_default())
    }

    /// `POST /projects`. The created project must come back.
    pub async fn create_project(&self, project: &NewProjectRecord) -> Result<ProjectRecord, Error> {
        let url = self.url("projects")?;
        self.post(url, project).await?.ok_or_else(|| Error::MissingData {
            endpoint: "projects".into(),
        })
    }

    /// `PUT /projects/:id`. Returns the server's copy when it sends one.
    pub async fn update_project(
        &self,
        id: &RecordId,
        update: &ProjectUpdateRecord,
    ) -> Result<Option<ProjectRecord>, Error> {
        let url = self.url_with_id("projects", id)?;
        self.put(url, update).await
    }
}
