use super::ApiClient;
use crate::error::{Error, Result};
use crate::models::Group;

/// Largest page size the groups index accepts.
pub const MAX_GROUPS_PER_PAGE: u32 = 500;

/// `/groups`: the groups the authenticated user belongs to.
#[derive(Debug, Clone)]
pub struct Groups {
    client: ApiClient,
}

impl Groups {
    pub fn new(client: ApiClient) -> Self {
        Groups { client }
    }

    /// One page of groups, most recently active first. `page` is 1-based.
    pub fn index(&self, page: u32, per_page: u32) -> Result<Vec<Group>> {
        let query = [
            ("page", page.max(1).to_string()),
            ("per_page", per_page.clamp(1, MAX_GROUPS_PER_PAGE).to_string()),
        ];
        let groups: Option<Vec<Group>> = self.client.get("groups", &query)?;
        Ok(groups.unwrap_or_default())
    }

    /// Every group, following pages until one comes back short.
    pub fn all(&self, per_page: u32) -> Result<Vec<Group>> {
        let per_page = per_page.clamp(1, MAX_GROUPS_PER_PAGE);
        let mut groups = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.index(page, per_page)?;
            let done = (batch.len() as u32) < per_page;
            groups.extend(batch);
            if done {
                return Ok(groups);
            }
            page += 1;
        }
    }

    pub fn show(&self, group_id: &str) -> Result<Group> {
        if group_id.is_empty() {
            return Err(Error::EmptyIdentifier("group id"));
        }
        let group: Option<Group> = self.client.get(&format!("groups/{group_id}"), &[])?;
        group.ok_or(Error::MissingResponse)
    }
}
