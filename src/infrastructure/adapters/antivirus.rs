//! Default `AntivirusScanner`/`Quarantine` adapters: a marker-byte scanner
//! suitable for tests (spec §8 seed scenario 2: `"VIRUSxxx"` payloads are
//! infected) and an in-memory quarantine bin.

use crate::domain::error::Result;
use crate::domain::ports::{AntivirusScanner, Quarantine, ScanResult};
use crate::domain::types::Resource;
use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

const VIRUS_MARKER: &[u8] = b"VIRUS";

#[derive(Default)]
pub struct MarkerAntivirusScanner;

impl MarkerAntivirusScanner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AntivirusScanner for MarkerAntivirusScanner {
    async fn scan(&self, resource: &Resource) -> Result<ScanResult> {
        let Some(file) = resource.file.as_ref() else {
            return Ok(ScanResult::Error);
        };
        if file.windows(VIRUS_MARKER.len()).any(|w| w == VIRUS_MARKER) {
            Ok(ScanResult::Infected)
        } else {
            Ok(ScanResult::Clean)
        }
    }
}

#[derive(Default)]
pub struct InMemoryQuarantine {
    quarantined: DashMap<Uuid, Vec<u8>>,
}

impl InMemoryQuarantine {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Quarantine for InMemoryQuarantine {
    async fn quarantine(&self, resource: &Resource) -> Result<()> {
        if let Some(file) = resource.file.clone() {
            self.quarantined.insert(resource.id, file);
        }
        Ok(())
    }

    async fn is_quarantined(&self, resource_id: Uuid) -> Result<bool> {
        Ok(self.quarantined.contains_key(&resource_id))
    }
}
