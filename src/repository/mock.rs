//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::package::{DiscountUpdate, DraftStatus, EliteGift, PackageSummary};
use crate::domain::types::{BusinessId, DurationMonths, PackageId, VipExperienceId};
use crate::domain::vip::VipExperience;
use crate::repository::errors::RepositoryResult;
use crate::repository::{PackageReader, PackageWriter, VipCatalogReader};

mock! {
    pub Repository {}

    #[async_trait]
    impl PackageReader for Repository {
        async fn fetch_draft_status(&self, id: PackageId) -> RepositoryResult<DraftStatus>;
        async fn list_packages(&self) -> RepositoryResult<Vec<PackageSummary>>;
    }

    #[async_trait]
    impl PackageWriter for Repository {
        async fn create_draft_package(
            &self,
            business_id: BusinessId,
        ) -> RepositoryResult<PackageId>;
        async fn save_discounts(
            &self,
            id: PackageId,
            update: &DiscountUpdate,
        ) -> RepositoryResult<()>;
        async fn save_gift(&self, id: PackageId, gift: &EliteGift) -> RepositoryResult<()>;
        async fn save_vip(
            &self,
            id: PackageId,
            experience_ids: &[VipExperienceId],
        ) -> RepositoryResult<()>;
        async fn finalize(
            &self,
            id: PackageId,
            duration: DurationMonths,
            is_complete: bool,
        ) -> RepositoryResult<()>;
        async fn delete_package(&self, id: PackageId) -> RepositoryResult<()>;
        async fn toggle_active(&self, id: PackageId) -> RepositoryResult<bool>;
    }

    #[async_trait]
    impl VipCatalogReader for Repository {
        async fn list_vip_catalog(&self) -> RepositoryResult<Vec<VipExperience>>;
    }
}
