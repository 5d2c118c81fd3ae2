use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::Result;
use crate::config::PAGE_SIZE;
use crate::error::RedmineError;
use crate::types::TrackerUser;

use super::RedmineClient;
use super::models::{Issue, IssuesPage, Project, ProjectsPage, UserEnvelope, UsersPage};

impl RedmineClient {
    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.paginate("projects.json", &[], |page: ProjectsPage| page.projects)
            .await
    }

    /// # Errors
    ///
    /// Returns [`RedmineError::ProjectNotFound`] when no project matches by id,
    /// name or identifier.
    pub async fn find_project(&self, target: &str) -> Result<Project> {
        self.projects()
            .await?
            .into_iter()
            .find(|project| project.matches(target))
            .ok_or_else(|| {
                RedmineError::ProjectNotFound {
                    project: target.to_string(),
                }
                .into()
            })
    }

    pub async fn users(&self) -> Result<Vec<TrackerUser>> {
        let users = self
            .paginate("users.json", &[], |page: UsersPage| {
                page.users.into_iter().map(TrackerUser::from).collect()
            })
            .await?;
        info!(count = users.len(), "redmine users loaded");
        Ok(users)
    }

    pub async fn user(&self, id: u32) -> Result<TrackerUser> {
        let envelope: UserEnvelope = self.get(&format!("users/{id}.json"), &[]).await?;
        Ok(envelope.user.into())
    }

    /// Open issues, optionally narrowed to one project on the server.
    pub async fn issues(&self, project_id: Option<u32>) -> Result<Vec<Issue>> {
        let mut query = Vec::new();
        if let Some(id) = project_id {
            query.push(("project_id", id.to_string()));
        }
        let issues = self
            .paginate("issues.json", &query, |page: IssuesPage| {
                page.issues.into_iter().map(Issue::from).collect()
            })
            .await?;
        info!(count = issues.len(), "redmine issues fetched");
        Ok(issues)
    }

    /// Follow `offset`/`limit` paging until a short or empty page.
    async fn paginate<P, T, F>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        mut items: F,
    ) -> Result<Vec<T>>
    where
        P: DeserializeOwned,
        F: FnMut(P) -> Vec<T>,
    {
        let mut out = Vec::new();
        let mut offset: u32 = 0;
        loop {
            let mut page_query = query.to_vec();
            page_query.push(("offset", offset.to_string()));
            page_query.push(("limit", PAGE_SIZE.to_string()));

            let batch = items(self.get(path, &page_query).await?);
            let fetched = batch.len();
            debug!(path, offset, fetched, "page fetched");
            out.extend(batch);

            if fetched < PAGE_SIZE as usize {
                break;
            }
            offset += PAGE_SIZE;
        }
        Ok(out)
    }
}
