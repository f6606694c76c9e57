//! REST implementation of the repository traits.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::package::{
    DiscountUpdate, DraftStatus, EliteGift, PackageStatus, PackageSummary, validity_window,
};
use crate::domain::types::{BusinessId, DurationMonths, PackageId, VipExperienceId};
use crate::domain::vip::VipExperience;
use crate::models::config::ClientConfig;
use crate::models::package::{
    CreatePackageRequest, CreatedPackageModel, FinalizeRequest, ListResponse, PackageDetailModel,
    PackageListModel, SaveDiscountsRequest, SaveGiftRequest, SaveVipRequest, ToggleActiveModel,
    VipCategoryModel,
};
use crate::repository::errors::{
    FALLBACK_MESSAGE, NOT_FOUND_MESSAGE, RepositoryError, RepositoryResult,
    SESSION_EXPIRED_MESSAGE,
};
use crate::repository::{PackageReader, PackageWriter, VipCatalogReader};

/// Supplies the bearer credential attached to every request.
pub trait AuthSession: Send + Sync {
    fn bearer_token(&self) -> String;
}

/// A token obtained out of band, e.g. from configuration.
#[derive(Clone, Debug)]
pub struct StaticToken(pub String);

impl AuthSession for StaticToken {
    fn bearer_token(&self) -> String {
        self.0.clone()
    }
}

#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    base_url: String,
    auth: Arc<dyn AuthSession>,
}

impl HttpRepository {
    pub fn new(
        base_url: &str,
        auth: Arc<dyn AuthSession>,
        timeout: Duration,
    ) -> RepositoryResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    pub fn from_config(config: &ClientConfig) -> RepositoryResult<Self> {
        Self::new(
            &config.api_base_url,
            Arc::new(StaticToken(config.access_token.clone())),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn package_url(&self, id: PackageId) -> String {
        self.url(&format!("/packages/packages/{id}/"))
    }

    async fn send(&self, request: RequestBuilder) -> RepositoryResult<Response> {
        let response = request
            .bearer_auth(self.auth.bearer_token())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        log::warn!("Backend answered {status}: {body}");
        Err(error_from_response(status, &body))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> RepositoryResult<T> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    async fn patch_package<B: serde::Serialize + ?Sized>(
        &self,
        id: PackageId,
        body: &B,
    ) -> RepositoryResult<()> {
        self.send(self.client.patch(self.package_url(id)).json(body))
            .await
            .map(|_| ())
    }
}

/// The backend's own message wins; 401 and 404 fall back to a fixed text.
fn error_from_response(status: StatusCode, body: &str) -> RepositoryError {
    let message = extract_error_message(body);
    let or_default = |default: &str| {
        if message == FALLBACK_MESSAGE {
            default.to_string()
        } else {
            message.clone()
        }
    };
    match status {
        StatusCode::UNAUTHORIZED => {
            RepositoryError::Unauthorized(or_default(SESSION_EXPIRED_MESSAGE))
        }
        StatusCode::NOT_FOUND => RepositoryError::NotFound(or_default(NOT_FOUND_MESSAGE)),
        _ => RepositoryError::Rejected(message),
    }
}

/// Picks the human readable message out of an error body.
///
/// Looks at `detail`, `message` and `error` first, then joins every field
/// message (including nested serializer errors) with `", "`.
pub fn extract_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return FALLBACK_MESSAGE.to_string();
    };

    if let Some(object) = value.as_object() {
        for key in ["detail", "message", "error"] {
            if let Some(text) = object.get(key).and_then(Value::as_str) {
                if !text.trim().is_empty() {
                    return text.to_string();
                }
            }
        }
    }

    let mut messages = Vec::new();
    collect_messages(&value, &mut messages);
    if messages.is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        messages.join(", ")
    }
}

fn collect_messages(value: &Value, messages: &mut Vec<String>) {
    match value {
        Value::String(text) if !text.trim().is_empty() => messages.push(text.clone()),
        Value::Array(items) => items
            .iter()
            .for_each(|item| collect_messages(item, messages)),
        Value::Object(fields) => fields
            .values()
            .for_each(|field| collect_messages(field, messages)),
        _ => {}
    }
}

#[async_trait]
impl PackageReader for HttpRepository {
    async fn fetch_draft_status(&self, id: PackageId) -> RepositoryResult<DraftStatus> {
        log::debug!("Fetching package {id}");
        let model: PackageDetailModel =
            self.send_json(self.client.get(self.package_url(id))).await?;
        DraftStatus::try_from(model).map_err(RepositoryError::from)
    }

    async fn list_packages(&self) -> RepositoryResult<Vec<PackageSummary>> {
        let response: ListResponse<PackageListModel> = self
            .send_json(self.client.get(self.url("/packages/packages/")))
            .await?;
        response
            .into_items()
            .into_iter()
            .map(|model| PackageSummary::try_from(model).map_err(RepositoryError::from))
            .collect()
    }
}

#[async_trait]
impl PackageWriter for HttpRepository {
    async fn create_draft_package(&self, business_id: BusinessId) -> RepositoryResult<PackageId> {
        let body = CreatePackageRequest::draft(business_id);
        let created: CreatedPackageModel = self
            .send_json(self.client.post(self.url("/packages/packages/")).json(&body))
            .await?;
        log::info!("Created draft package {} for business {business_id}", created.id);
        PackageId::new(created.id).map_err(RepositoryError::from)
    }

    async fn save_discounts(
        &self,
        id: PackageId,
        update: &DiscountUpdate,
    ) -> RepositoryResult<()> {
        let body = SaveDiscountsRequest::from(update).to_json();
        self.patch_package(id, &body).await
    }

    async fn save_gift(&self, id: PackageId, gift: &EliteGift) -> RepositoryResult<()> {
        self.patch_package(id, &SaveGiftRequest::from(gift)).await
    }

    async fn save_vip(
        &self,
        id: PackageId,
        experience_ids: &[VipExperienceId],
    ) -> RepositoryResult<()> {
        self.patch_package(id, &SaveVipRequest::from(experience_ids))
            .await
    }

    async fn finalize(
        &self,
        id: PackageId,
        duration: DurationMonths,
        is_complete: bool,
    ) -> RepositoryResult<()> {
        let (start_date, end_date) = validity_window(Local::now().date_naive(), duration);
        let body = FinalizeRequest {
            start_date,
            end_date,
            status: PackageStatus::Pending,
            is_complete,
        };
        self.patch_package(id, &body).await
    }

    async fn delete_package(&self, id: PackageId) -> RepositoryResult<()> {
        self.send(self.client.delete(self.package_url(id)))
            .await
            .map(|_| ())
    }

    async fn toggle_active(&self, id: PackageId) -> RepositoryResult<bool> {
        let url = self.url(&format!("/packages/packages/{id}/toggle_active/"));
        let toggled: ToggleActiveModel = self.send_json(self.client.post(url)).await?;
        if toggled.id != id.get() {
            return Err(RepositoryError::Unexpected(format!(
                "toggled package {} instead of {id}",
                toggled.id
            )));
        }
        Ok(toggled.is_active)
    }
}

#[async_trait]
impl VipCatalogReader for HttpRepository {
    async fn list_vip_catalog(&self) -> RepositoryResult<Vec<VipExperience>> {
        let response: ListResponse<VipCategoryModel> = self
            .send_json(
                self.client
                    .get(self.url("/packages/vip-experience-categories/")),
            )
            .await?;
        response
            .into_items()
            .into_iter()
            .map(|model| VipExperience::try_from(model).map_err(RepositoryError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_detail() {
        assert_eq!(
            extract_error_message(r#"{"detail": "Not allowed", "message": "other"}"#),
            "Not allowed"
        );
        assert_eq!(
            extract_error_message(r#"{"error": "Business profile not found"}"#),
            "Business profile not found"
        );
    }

    #[test]
    fn error_message_joins_field_errors() {
        let body = serde_json::json!({
            "discount_all": {"percentage": ["Ensure this value is less than or equal to 100."]},
            "status": ["Invalid choice."]
        })
        .to_string();

        let message = extract_error_message(&body);

        assert!(message.contains("Ensure this value is less than or equal to 100."));
        assert!(message.contains("Invalid choice."));
        assert!(message.contains(", "));
    }

    #[test]
    fn error_message_falls_back_for_non_json() {
        assert_eq!(extract_error_message("<html>502</html>"), FALLBACK_MESSAGE);
        assert_eq!(extract_error_message("{}"), FALLBACK_MESSAGE);
    }

    #[test]
    fn auth_and_missing_errors_keep_backend_message() {
        assert_eq!(
            error_from_response(
                StatusCode::UNAUTHORIZED,
                r#"{"detail": "Given token not valid for any token type"}"#
            ),
            RepositoryError::Unauthorized("Given token not valid for any token type".to_string())
        );
        assert_eq!(
            error_from_response(StatusCode::NOT_FOUND, r#"{"detail": "No Package matches."}"#)
                .to_string(),
            "No Package matches."
        );
    }

    #[test]
    fn status_codes_map_to_errors() {
        assert_eq!(
            error_from_response(StatusCode::UNAUTHORIZED, ""),
            RepositoryError::Unauthorized(SESSION_EXPIRED_MESSAGE.to_string())
        );
        assert_eq!(
            error_from_response(StatusCode::NOT_FOUND, "{}"),
            RepositoryError::NotFound(NOT_FOUND_MESSAGE.to_string())
        );
        assert_eq!(
            error_from_response(StatusCode::BAD_REQUEST, r#"{"detail": "nope"}"#),
            RepositoryError::Rejected("nope".to_string())
        );
    }
}
