//! Package creation wizard session.
//!
//! A [`PackageWizard`] owns the [`WizardState`] of one open wizard and
//! sequences it against the backend: every step is validated locally, saved
//! on its own and only then left. Saves are awaited one at a time; while one
//! is in flight every other trigger is inert and reports
//! [`WizardError::Busy`].
//!
//! The session is driven from a single task. Dropping it (or calling
//! [`PackageWizard::cancel`]) never rolls back steps that were already
//! saved, which is what makes reopening a draft with
//! [`PackageWizard::resume`] possible.

use std::cell::{Cell, Ref, RefCell};

use thiserror::Error;

use crate::domain::package::{DiscountUpdate, PackageStatus};
use crate::domain::types::{BusinessId, PackageId, VipExperienceId};
use crate::domain::vip::VipCatalog;
use crate::domain::wizard::WizardStep;
use crate::dto::wizard::ReviewSummary;
use crate::forms::FormError;
use crate::forms::wizard::{StepPayload, WizardForm, WizardState};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{PackageReader, PackageWriter, VipCatalogReader};

#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    /// Local validation failed; nothing was sent.
    #[error(transparent)]
    Validation(#[from] FormError),

    /// The backend rejected a save or could not be reached.
    #[error("{0}")]
    Persistence(String),

    /// The wizard could not be opened.
    #[error("{0}")]
    Load(String),

    #[error("another request is still in progress")]
    Busy,

    #[error("the last step is left by finalizing the package")]
    LastStep,

    #[error("the package can only be finalized from the review step")]
    NotOnReviewStep,

    #[error("the wizard is closed")]
    Closed,
}

/// Marks a request as in flight until dropped.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Result<Self, WizardError> {
        if flag.replace(true) {
            return Err(WizardError::Busy);
        }
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct PackageWizard<'a, R: ?Sized> {
    repo: &'a R,
    package_id: PackageId,
    state: RefCell<WizardState>,
    in_flight: Cell<bool>,
    closed: Cell<bool>,
}

impl<'a, R> PackageWizard<'a, R>
where
    R: PackageReader + PackageWriter + VipCatalogReader + ?Sized,
{
    /// Creates a new draft for the business and opens the wizard on it.
    ///
    /// Without a draft id nothing could be saved, so a failed creation
    /// means no wizard at all.
    pub async fn open_new(repo: &'a R, business_id: BusinessId) -> Result<Self, WizardError> {
        let package_id = repo
            .create_draft_package(business_id)
            .await
            .map_err(|err| {
                log::error!("Failed to create draft package for business {business_id}: {err}");
                WizardError::Load(err.to_string())
            })?;

        let catalog = load_catalog(repo).await?;

        log::info!("Opened wizard on new draft {package_id}");
        Ok(Self::with_state(repo, package_id, WizardState::new(catalog)))
    }

    /// Reopens an existing draft, pre-filling every step from what was saved.
    pub async fn resume(repo: &'a R, package_id: PackageId) -> Result<Self, WizardError> {
        let status = repo.fetch_draft_status(package_id).await.map_err(|err| {
            log::error!("Failed to load draft {package_id}: {err}");
            WizardError::Load(err.to_string())
        })?;

        if status.status != PackageStatus::Draft {
            return Err(WizardError::Load(format!(
                "package {package_id} is {} and can no longer be edited",
                status.status
            )));
        }

        let catalog = load_catalog(repo).await?;

        log::info!(
            "Resumed draft {package_id}, saved steps: {:?}",
            status.completed_steps()
        );
        Ok(Self::with_state(
            repo,
            package_id,
            WizardState::resumed(&status, catalog),
        ))
    }

    fn with_state(repo: &'a R, package_id: PackageId, state: WizardState) -> Self {
        Self {
            repo,
            package_id,
            state: RefCell::new(state),
            in_flight: Cell::new(false),
            closed: Cell::new(false),
        }
    }

    pub fn package_id(&self) -> PackageId {
        self.package_id
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.borrow().current_step
    }

    /// Read access to the whole state, e.g. for rendering.
    pub fn state(&self) -> Ref<'_, WizardState> {
        self.state.borrow()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// Mutates the inputs. Inputs stay editable while a save is in flight.
    pub fn edit<T>(&self, change: impl FnOnce(&mut WizardForm) -> T) -> T {
        change(&mut self.state.borrow_mut().form)
    }

    /// Ticks a catalog experience; its tier decides which group it joins.
    pub fn select_experience(&self, id: VipExperienceId) -> Result<(), WizardError> {
        let mut state = self.state.borrow_mut();
        let tier = state
            .catalog
            .tier_of(id)
            .ok_or(FormError::UnknownVipExperience(id.get()))?;
        state.form.vip.select(id, tier);
        Ok(())
    }

    pub fn deselect_experience(&self, id: VipExperienceId) {
        self.state.borrow_mut().form.vip.deselect(id);
    }

    pub fn catalog(&self) -> VipCatalog {
        self.state.borrow().catalog.clone()
    }

    pub fn review_summary(&self) -> ReviewSummary {
        let state = self.state.borrow();
        ReviewSummary::build(&state.form, &state.catalog)
    }

    /// Validates and saves the current step, then moves to the next one.
    pub async fn advance(&self) -> Result<WizardStep, WizardError> {
        self.ensure_open()?;
        let _in_flight = InFlight::acquire(&self.in_flight)?;

        let step = self.current_step();
        if step == WizardStep::Review {
            return Err(WizardError::LastStep);
        }

        let payload = self.validate(step)?;
        let result = self.persist(&payload).await;
        if let (Ok(()), StepPayload::Vip(experience_ids)) = (&result, &payload) {
            self.state.borrow_mut().record_saved_vip(experience_ids);
        }
        self.finish_step(step, result)?;

        Ok(self.current_step())
    }

    /// Goes one step back without validating or saving anything.
    pub fn retreat(&self) -> Result<WizardStep, WizardError> {
        self.ensure_open()?;
        if self.in_flight.get() {
            return Err(WizardError::Busy);
        }
        Ok(self.state.borrow_mut().retreat())
    }

    /// Locks in the duration and submits the package for approval.
    ///
    /// On success the wizard closes and the caller should refresh its
    /// package list.
    pub async fn finalize(&self) -> Result<PackageId, WizardError> {
        self.ensure_open()?;
        let _in_flight = InFlight::acquire(&self.in_flight)?;

        if self.current_step() != WizardStep::Review {
            return Err(WizardError::NotOnReviewStep);
        }

        let saved_vip = self.state.borrow().validate_saved_vip();
        saved_vip.map_err(|err| {
            self.state.borrow_mut().record_validation_error(&err);
            WizardError::Validation(err)
        })?;
        let payload = self.validate(WizardStep::Review)?;
        let result = self.persist(&payload).await;
        self.finish_step(WizardStep::Review, result)?;

        self.closed.set(true);
        log::info!("Package {} submitted for approval", self.package_id);
        Ok(self.package_id)
    }

    /// Drops the specific discount on the backend, then locally.
    ///
    /// The inputs are only cleared once the backend confirmed, so a failed
    /// call leaves what the user sees in sync with what is stored.
    pub async fn remove_specific_discount(&self) -> Result<(), WizardError> {
        self.ensure_open()?;
        let _in_flight = InFlight::acquire(&self.in_flight)?;

        let discount_all = self.state.borrow().form.discounts.discount_all();
        let update = DiscountUpdate::remove_specific(discount_all);
        let result = self.repo.save_discounts(self.package_id, &update).await;

        let outcome = result.as_ref().map(|_| ()).map_err(ToString::to_string);
        self.state.borrow_mut().apply_specific_removal(outcome);

        result.map_err(|err| {
            log::error!(
                "Failed to remove specific discount of {}: {err}",
                self.package_id
            );
            WizardError::Persistence(err.to_string())
        })
    }

    /// Closes the wizard, keeping every step saved so far.
    pub fn cancel(self) -> PackageId {
        if self.in_flight.get() {
            log::warn!(
                "Wizard for {} closed while a request was in flight",
                self.package_id
            );
        }
        log::info!(
            "Wizard for {} cancelled at {}",
            self.package_id,
            self.current_step()
        );
        self.package_id
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.closed.get() {
            return Err(WizardError::Closed);
        }
        Ok(())
    }

    fn validate(&self, step: WizardStep) -> Result<StepPayload, WizardError> {
        let validated = self.state.borrow().validate_step(step);
        validated.map_err(|err| {
            self.state.borrow_mut().record_validation_error(&err);
            WizardError::Validation(err)
        })
    }

    async fn persist(&self, payload: &StepPayload) -> RepositoryResult<()> {
        let id = self.package_id;
        match payload {
            StepPayload::Discounts(update) => self.repo.save_discounts(id, update).await,
            StepPayload::Gift(gift) => self.repo.save_gift(id, gift).await,
            StepPayload::Vip(experience_ids) => self.repo.save_vip(id, experience_ids).await,
            StepPayload::Finalize(duration) => self.repo.finalize(id, *duration, true).await,
        }
    }

    fn finish_step(
        &self,
        step: WizardStep,
        result: RepositoryResult<()>,
    ) -> Result<(), WizardError> {
        let outcome = result.as_ref().map(|_| ()).map_err(ToString::to_string);
        self.state.borrow_mut().apply_step_result(step, outcome);
        result.map_err(|err: RepositoryError| {
            log::error!("Failed to save {step} of package {}: {err}", self.package_id);
            WizardError::Persistence(err.to_string())
        })
    }
}

async fn load_catalog<R>(repo: &R) -> Result<VipCatalog, WizardError>
where
    R: VipCatalogReader + ?Sized,
{
    let catalog = repo
        .list_vip_catalog()
        .await
        .map(VipCatalog::new)
        .map_err(|err| {
            log::error!("Failed to load VIP catalog: {err}");
            WizardError::Load(err.to_string())
        })?;
    if catalog.is_empty() {
        log::warn!("VIP catalog is empty, the VIP step cannot be completed");
    }
    Ok(catalog)
}
