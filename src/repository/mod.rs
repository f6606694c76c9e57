//! Backend collaborators of the wizard and the package list.
//!
//! The traits mirror the REST endpoints one to one. [`HttpRepository`] is the
//! production implementation; tests use [`mock::MockRepository`] or small
//! hand-written stubs.

use async_trait::async_trait;

use crate::domain::package::{DiscountUpdate, DraftStatus, EliteGift, PackageSummary};
use crate::domain::types::{BusinessId, DurationMonths, PackageId, VipExperienceId};
use crate::domain::vip::VipExperience;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use http::{AuthSession, HttpRepository, StaticToken};

#[async_trait]
pub trait PackageReader: Send + Sync {
    /// Persisted per-category data of a package.
    async fn fetch_draft_status(&self, id: PackageId) -> RepositoryResult<DraftStatus>;
    async fn list_packages(&self) -> RepositoryResult<Vec<PackageSummary>>;
}

#[async_trait]
pub trait PackageWriter: Send + Sync {
    /// Creates an inactive, incomplete `draft` package for the business.
    async fn create_draft_package(&self, business_id: BusinessId) -> RepositoryResult<PackageId>;
    async fn save_discounts(&self, id: PackageId, update: &DiscountUpdate)
    -> RepositoryResult<()>;
    async fn save_gift(&self, id: PackageId, gift: &EliteGift) -> RepositoryResult<()>;
    /// Replaces the selected experiences with `experience_ids`.
    async fn save_vip(
        &self,
        id: PackageId,
        experience_ids: &[VipExperienceId],
    ) -> RepositoryResult<()>;
    /// Locks in the duration and submits the package for approval.
    async fn finalize(
        &self,
        id: PackageId,
        duration: DurationMonths,
        is_complete: bool,
    ) -> RepositoryResult<()>;
    async fn delete_package(&self, id: PackageId) -> RepositoryResult<()>;
    /// Flips the active flag, returning the new value.
    async fn toggle_active(&self, id: PackageId) -> RepositoryResult<bool>;
}

#[async_trait]
pub trait VipCatalogReader: Send + Sync {
    async fn list_vip_catalog(&self) -> RepositoryResult<Vec<VipExperience>>;
}
