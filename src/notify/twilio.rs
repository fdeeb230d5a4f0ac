// src/notify/twilio.rs
// Twilio REST client (Messages + Calls resources)

use async_trait::async_trait;
use quick_xml::escape::escape;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{Notifier, NotifyError};
use crate::config::TelephonyConfig;

const API_VERSION: &str = "2010-04-01";

pub struct TwilioNotifier {
    client: Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    api_base_url: String,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    message: Option<String>,
}

impl TwilioNotifier {
    /// Returns `None` unless SID, token and sender number are all configured.
    pub fn from_config(config: &TelephonyConfig) -> Result<Option<Self>, NotifyError> {
        let (Some(sid), Some(token), Some(from)) = (
            config.account_sid.as_ref(),
            config.auth_token.as_ref(),
            config.from_number.as_ref(),
        ) else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Some(Self {
            client,
            account_sid: sid.clone(),
            auth_token: token.clone(),
            from_number: from.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }))
    }

    fn resource_url(&self, resource: &str) -> String {
        format!(
            "{}/{}/Accounts/{}/{}.json",
            self.api_base_url, API_VERSION, self.account_sid, resource
        )
    }

    async fn post_form(&self, resource: &str, form: &[(&str, &str)]) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.resource_url(resource))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(form)
            .send()
            .await?;

        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<(), NotifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<TwilioErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or(text);

    Err(NotifyError::Rejected {
        status: status.as_u16(),
        message,
    })
}

/// Wrap a message in TwiML that reads it aloud
pub(crate) fn say_twiml(message: &str) -> String {
    format!(
        r#"<Response><Say voice="alice">{}</Say></Response>"#,
        escape(message)
    )
}

#[async_trait]
impl Notifier for TwilioNotifier {
    fn name(&self) -> &'static str {
        "twilio"
    }

    async fn send_text(&self, to: &str, body: &str) -> Result<(), NotifyError> {
        debug!("Sending alert text to {}", to);
        self.post_form(
            "Messages",
            &[("To", to), ("From", self.from_number.as_str()), ("Body", body)],
        )
        .await
    }

    async fn place_call(&self, to: &str, message: &str) -> Result<(), NotifyError> {
        debug!("Placing alert call to {}", to);
        let twiml = say_twiml(message);
        self.post_form(
            "Calls",
            &[("To", to), ("From", self.from_number.as_str()), ("Twiml", twiml.as_str())],
        )
        .await
    }
}
