//! Stage 1 (spec §4.2): antivirus scan, then MIME detection or format
//! validation. Protects every later stage from malicious or malformed input.

use crate::application::registry::Registry;
use crate::domain::error::{Error, Result};
use crate::domain::ports::{IngestStage, ScanResult};
use crate::domain::types::ResourceStatus;
use uuid::Uuid;

pub struct InitiateProcessing<'a> {
    registry: &'a Registry,
}

impl<'a> InitiateProcessing<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, resource_id: Uuid) -> Result<()> {
        let resource = self
            .registry
            .resource_store
            .get(resource_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("resource {resource_id}")))?;

        let Some(file) = resource.file.clone() else {
            return Err(Error::validation(format!(
                "resource {resource_id} has no file content"
            )));
        };
        if file.is_empty() {
            return Err(Error::validation(format!(
                "resource {resource_id} has empty file content"
            )));
        }

        match self.registry.antivirus_scanner.scan(&resource).await? {
            ScanResult::Infected => {
                self.registry.quarantine.quarantine(&resource).await?;
                let resource_id = resource.id;
                self.registry
                    .resource_store
                    .update_if_changed(
                        resource_id,
                        Box::new(|mut r| {
                            r.file = None;
                            r.status = ResourceStatus::Quarantined;
                            Ok(r)
                        }),
                    )
                    .await?;
                self.registry
                    .task_dispatch
                    .enqueue(IngestStage::QuarantineNotification, resource_id)
                    .await?;
                tracing::warn!(%resource_id, "virus detected, resource quarantined");
                return Err(Error::virus_detected(resource_id.to_string()));
            }
            ScanResult::Error => {
                return Err(Error::transient(format!(
                    "antivirus scan of resource {resource_id} failed"
                )));
            }
            ScanResult::Clean => {}
        }

        if resource.file_type.is_none() {
            let detected = self.registry.file_manager.detect_file_type(&resource);
            self.registry
                .resource_store
                .set_file_type(resource_id, detected.unwrap_or_default())
                .await?;
        } else if !self.registry.file_manager.validate_file_format(&resource) {
            self.registry
                .resource_store
                .update_if_changed(
                    resource_id,
                    Box::new(|mut r| {
                        r.status = ResourceStatus::InvalidFormat;
                        Ok(r)
                    }),
                )
                .await?;
            self.registry
                .task_dispatch
                .enqueue(IngestStage::ValidationErrorNotification, resource_id)
                .await?;
            return Err(Error::invalid_format(format!(
                "invalid file format for resource {resource_id}"
            )));
        }

        self.registry
            .resource_store
            .update_if_changed(
                resource_id,
                Box::new(|mut r| {
                    r.status = ResourceStatus::Scanning;
                    Ok(r)
                }),
            )
            .await?;

        self.registry
            .task_dispatch
            .enqueue(IngestStage::InitialiseResourceGraph, resource_id)
            .await
    }
}
