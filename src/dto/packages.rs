//! DTOs used by the package management page.

use crate::domain::package::{PackageStatus, PackageSummary};

/// Data required to render the package list with its counters.
#[derive(Debug, PartialEq)]
pub struct PackagesPageData {
    pub packages: Vec<PackageSummary>,
    pub total: usize,
    pub active: usize,
    pub approved: usize,
}

impl PackagesPageData {
    #[must_use]
    pub fn new(packages: Vec<PackageSummary>) -> Self {
        let active = packages.iter().filter(|package| package.is_active).count();
        let approved = packages
            .iter()
            .filter(|package| package.status == PackageStatus::Approved)
            .count();
        Self {
            total: packages.len(),
            active,
            approved,
            packages,
        }
    }
}
