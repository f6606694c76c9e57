//! Services backing the package management list.

use crate::domain::package::PackageSummary;
use crate::domain::types::PackageId;
use crate::dto::packages::PackagesPageData;
use crate::repository::{PackageReader, PackageWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads the business's packages together with the list counters.
pub async fn load_packages<R>(repo: &R) -> ServiceResult<PackagesPageData>
where
    R: PackageReader + ?Sized,
{
    let packages = repo.list_packages().await.map_err(|err| {
        log::error!("Failed to load packages: {err}");
        err
    })?;

    Ok(PackagesPageData::new(packages))
}

/// Deletes a package and returns the remaining list.
pub async fn delete_package<R>(
    repo: &R,
    packages: Vec<PackageSummary>,
    package_id: i32,
) -> ServiceResult<PackagesPageData>
where
    R: PackageWriter + ?Sized,
{
    let package_id = PackageId::new(package_id)?;

    if !packages.iter().any(|package| package.id == package_id) {
        return Err(ServiceError::NotFound);
    }

    repo.delete_package(package_id).await.map_err(|err| {
        log::error!("Failed to delete package {package_id}: {err}");
        err
    })?;

    let remaining = packages
        .into_iter()
        .filter(|package| package.id != package_id)
        .collect();

    Ok(PackagesPageData::new(remaining))
}

/// Flips the active flag of a package and patches it in the list.
pub async fn toggle_package_active<R>(
    repo: &R,
    packages: Vec<PackageSummary>,
    package_id: i32,
) -> ServiceResult<PackagesPageData>
where
    R: PackageWriter + ?Sized,
{
    let package_id = PackageId::new(package_id)?;

    if !packages.iter().any(|package| package.id == package_id) {
        return Err(ServiceError::NotFound);
    }

    let is_active = repo.toggle_active(package_id).await.map_err(|err| {
        log::error!("Failed to toggle package {package_id}: {err}");
        err
    })?;

    let packages = packages
        .into_iter()
        .map(|mut package| {
            if package.id == package_id {
                package.is_active = is_active;
            }
            package
        })
        .collect();

    Ok(PackagesPageData::new(packages))
}
