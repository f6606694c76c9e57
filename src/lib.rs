#[cfg(feature = "client")]
use crate::domain::types::{BusinessId, PackageId};
#[cfg(feature = "client")]
use crate::domain::wizard::WizardStep;
#[cfg(feature = "client")]
use crate::forms::vip::VipForm;
#[cfg(feature = "client")]
use crate::models::config::ClientConfig;
#[cfg(feature = "client")]
use crate::models::definition::PackageDefinition;
#[cfg(feature = "client")]
use crate::repository::HttpRepository;
#[cfg(feature = "client")]
use crate::services::wizard::PackageWizard;

pub mod domain;
pub mod dto;
#[cfg(feature = "client")]
mod error_conversions;
pub mod forms;
pub mod models;
#[cfg(feature = "client")]
pub mod repository;
#[cfg(feature = "client")]
pub mod services;

/// Walks a package definition through the wizard and submits it.
///
/// Every step is saved as soon as it validates, so a failure part way
/// leaves a draft that can be continued with `resume_package_id`.
#[cfg(feature = "client")]
pub async fn run(
    client_config: ClientConfig,
    definition: PackageDefinition,
) -> std::io::Result<PackageId> {
    let repo = HttpRepository::from_config(&client_config)
        .map_err(|e| std::io::Error::other(format!("Failed to build HTTP client: {e}")))?;

    let business_id = BusinessId::new(client_config.business_id)
        .map_err(|e| std::io::Error::other(format!("Invalid business id: {e}")))?;
    let resume_id = definition
        .resume_id()
        .map_err(|e| std::io::Error::other(format!("Invalid package id: {e}")))?;
    let experience_ids = definition
        .experience_ids()
        .map_err(|e| std::io::Error::other(format!("Invalid VIP experience id: {e}")))?;

    let wizard = match resume_id {
        Some(package_id) => PackageWizard::resume(&repo, package_id).await,
        None => PackageWizard::open_new(&repo, business_id).await,
    }
    .map_err(|e| std::io::Error::other(format!("Failed to open the wizard: {e}")))?;

    // A resumed draft may carry a specific discount the definition dropped.
    let had_specific = wizard.state().form.discounts.specific_enabled;

    wizard.edit(|form| {
        form.discounts = definition.discounts_form();
        form.gift = definition.gift_form();
        form.vip = VipForm::default();
        form.review = definition.review_form();
    });
    for experience_id in experience_ids {
        wizard
            .select_experience(experience_id)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
    }

    if had_specific && definition.specific_discount.is_none() {
        wizard.remove_specific_discount().await.map_err(|e| {
            std::io::Error::other(format!("Failed to remove specific discount: {e}"))
        })?;
    }

    while wizard.current_step() != WizardStep::Review {
        let step = wizard.current_step();
        wizard
            .advance()
            .await
            .map_err(|e| std::io::Error::other(format!("{step}: {e}")))?;
        log::info!("Saved {step} of package {}", wizard.package_id());
    }

    for line in wizard.review_summary().lines {
        log::info!("{line}");
    }

    wizard
        .finalize()
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to finalize package: {e}")))
}
