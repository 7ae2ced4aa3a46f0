//! Table location repository interface

use async_trait::async_trait;

use super::model::TableLocation;
use crate::domain::DomainResult;

#[async_trait]
pub trait TableLocationRepository: Send + Sync {
    async fn save(&self, table: TableLocation) -> DomainResult<()>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<TableLocation>>;
    /// Case-insensitive lookup by display name
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<TableLocation>>;
    async fn find_all(&self) -> DomainResult<Vec<TableLocation>>;
    async fn update(&self, table: TableLocation) -> DomainResult<()>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
    async fn next_id(&self) -> i32;
}
