//! Weather lookups
//!
//! The reply is a fixed English sentence built from the provider data; it
//! does not go through the generation model, so it is not translated.

use super::Branch;
use crate::agent::{extract_city, IntentLabel};
use crate::conversation::{Conversation, Turn};
use crate::llm::LlmService;
use crate::replies::FailureKind;
use crate::services::{WeatherProvider, WeatherReport};
use async_trait::async_trait;
use std::sync::Arc;

pub struct WeatherBranch {
    router: Arc<dyn LlmService>,
    weather: Arc<dyn WeatherProvider>,
}

impl WeatherBranch {
    pub fn new(router: Arc<dyn LlmService>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self { router, weather }
    }
}

fn format_report(city: &str, report: &WeatherReport) -> String {
    format!(
        "Weather data for {city}: Condition is {}, Temperature is {}°C, Feels like {}°C.",
        report.description, report.temperature, report.feels_like
    )
}

#[async_trait]
impl Branch for WeatherBranch {
    fn label(&self) -> IntentLabel {
        IntentLabel::WeatherQuery
    }

    async fn respond(&self, conversation: &Conversation) -> Turn {
        let city = match extract_city(self.router.as_ref(), conversation).await {
            Ok(city) => city,
            Err(e) => {
                tracing::error!(error = %e, "City extraction failed");
                return FailureKind::Generation.turn();
            }
        };

        match self.weather.current(&city).await {
            Ok(report) => Turn::assistant(format_report(&city, &report))
                .unwrap_or_else(|_| FailureKind::Weather { city: &city }.turn()),
            Err(e) => {
                tracing::error!(city = %city, error = %e, "Weather lookup failed");
                FailureKind::Weather { city: &city }.turn()
            }
        }
    }
}
