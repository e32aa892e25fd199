//! Blocking HTTP implementation of [`OrderBackend`].

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{ApiError, ApiReply, CloseDates, OrderLookup, OrderSubmission};
use super::OrderBackend;
use crate::core::menu::Menu;
use crate::core::option::OptionSchema;
use crate::core::Category;
use crate::util::config::ApiConfig;

/// Talks to the order backend over HTTP.
///
/// Catalog endpoints hang off `menu_url` (`<menu_url>/get_menu`), checkout
/// endpoints off `checkout_url` (`<checkout_url>/api/checkout/...`).
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    menu_url: Url,
    checkout_url: Url,
}

impl HttpBackend {
    pub fn new(
        menu_url: &str,
        checkout_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let menu_url = base_url(menu_url)?;
        let checkout_url = base_url(checkout_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                url: menu_url.to_string(),
                source,
            })?;

        Ok(HttpBackend {
            client,
            menu_url,
            checkout_url,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        HttpBackend::new(
            config.menu_url(),
            config.checkout_url(),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    fn catalog(&self, path: &str) -> Result<Url, ApiError> {
        join(&self.menu_url, path)
    }

    fn checkout(&self, path: &str) -> Result<Url, ApiError> {
        join(&self.checkout_url, &format!("api/checkout/{}", path))
    }

    fn get_text(&self, url: Url) -> Result<String, ApiError> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        read_body(&url, response)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let body = self.get_text(url.clone())?;
        decode(&url, &body)
    }

    fn post_form(&self, url: Url, fields: &[(&str, String)]) -> Result<ApiReply, ApiError> {
        tracing::debug!("POST {} ({} fields)", url, fields.len());
        let response = self
            .client
            .post(url.clone())
            .form(fields)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        let body = read_body(&url, response)?;
        decode(&url, &body)
    }
}

impl OrderBackend for HttpBackend {
    fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let names: Vec<String> = self.get_json(self.catalog("get_category")?)?;
        Ok(names
            .iter()
            .filter_map(|name| match name.parse::<Category>() {
                Ok(category) => Some(category),
                Err(e) => {
                    tracing::warn!("skipping category: {}", e);
                    None
                }
            })
            .collect())
    }

    fn menu(&self) -> Result<Menu, ApiError> {
        self.get_json(self.catalog("get_menu")?)
    }

    fn options(&self, category: Category) -> Result<OptionSchema, ApiError> {
        // Decoded straight from the body so field order survives.
        self.get_json(self.catalog(&format!("get_{}", category.slug()))?)
    }

    fn closed_dates(&self) -> Result<Vec<NaiveDate>, ApiError> {
        let reply: CloseDates = self.get_json(self.catalog("get_store_close_date")?)?;
        Ok(reply
            .close_dates
            .iter()
            .filter_map(|date| match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(e) => {
                    tracing::warn!("ignoring close date `{}`: {}", date, e);
                    None
                }
            })
            .collect())
    }

    fn send_sms_verification(&self, order: &OrderSubmission) -> Result<ApiReply, ApiError> {
        self.post_form(self.checkout("send_sms_verification")?, &order.form_fields())
    }

    fn verify_sms(&self, order: &OrderSubmission, code: &str) -> Result<ApiReply, ApiError> {
        let mut fields = order.form_fields();
        fields.push(("sms_code", code.to_string()));
        self.post_form(self.checkout("verify_sms")?, &fields)
    }

    fn confirm_payment(
        &self,
        order: &OrderSubmission,
        payment_method_id: &str,
    ) -> Result<ApiReply, ApiError> {
        let mut fields = order.form_fields();
        fields.push(("payment_method_id", payment_method_id.to_string()));
        self.post_form(self.checkout("confirm_payment")?, &fields)
    }

    fn order(&self, id: u64) -> Result<OrderLookup, ApiError> {
        self.get_json(self.checkout(&format!("order/{}", id))?)
    }
}

/// Parse a base URL, making sure relative joins append to its path.
fn base_url(raw: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(raw.trim()).map_err(|_| ApiError::InvalidUrl(raw.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(raw.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn join(base: &Url, path: &str) -> Result<Url, ApiError> {
    base.join(path)
        .map_err(|_| ApiError::InvalidUrl(format!("{}{}", base, path)))
}

fn read_body(url: &Url, response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().map_err(|source| ApiError::Transport {
        url: url.to_string(),
        source,
    })?;
    if !status.is_success() {
        tracing::debug!("{} returned {}", url, status);
        return Err(ApiError::from_status(status.as_u16(), &body));
    }
    Ok(body)
}

fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
