//! Parent service implementation

use tracing::{debug, info};
use crate::database::repositories::ParentRepository;
use crate::models::parent::{Parent, CreateParentRequest, UpdateParentRequest};
use crate::utils::errors::{SchoolDeskError, Result};
use crate::utils::logging::log_entity_created;

#[derive(Clone)]
pub struct ParentService {
    parent_repository: ParentRepository,
}

impl ParentService {
    pub fn new(parent_repository: ParentRepository) -> Self {
        Self { parent_repository }
    }

    /// Validate and store a new parent
    pub async fn create_parent(&self, request: CreateParentRequest) -> Result<Parent> {
        let request = request.validate()?;
        let parent = self.parent_repository.create(request).await?;
        log_entity_created("parent", parent.id);
        Ok(parent)
    }

    pub async fn get_parent(&self, parent_id: i64) -> Result<Parent> {
        debug!(parent_id = parent_id, "Getting parent by ID");
        self.parent_repository
            .find_by_id(parent_id)
            .await?
            .ok_or(SchoolDeskError::ParentNotFound { parent_id })
    }

    pub async fn list_parents(&self) -> Result<Vec<Parent>> {
        self.parent_repository.list().await
    }

    pub async fn update_parent(&self, parent_id: i64, request: UpdateParentRequest) -> Result<Parent> {
        let request = request.validate()?;
        let parent = self
            .parent_repository
            .update(parent_id, request)
            .await?
            .ok_or(SchoolDeskError::ParentNotFound { parent_id })?;

        info!(parent_id = parent_id, "Parent updated");
        Ok(parent)
    }
}
