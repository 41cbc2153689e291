//! Fetches the current ISS position from the upstream HTTP API.
//!
//! One `GET`, one decode, three extracted fields. Transport failures,
//! non-success statuses and malformed payloads all surface as [`Error`]
//! variants; nothing is retried.

use chrono_tz::Tz;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::LocatorConfig;
use crate::error::{Error, Result};
use crate::reading::{display_value, format_epoch, PositionReading};

/// User agent sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for the ISS position endpoint.
#[derive(Debug)]
pub struct Locator {
    client: reqwest::Client,
    url: String,
    timezone: Option<Tz>,
}

impl Locator {
    /// Create a locator from its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &LocatorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| Error::Fetch {
                url: config.url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            url: config.url.clone(),
            timezone: config.timezone,
        })
    }

    /// The endpoint this locator queries.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and normalize the current position.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a
    /// payload missing the timestamp or either coordinate.
    pub async fn fetch_position(&self) -> Result<PositionReading> {
        debug!("Fetching ISS position from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| self.fetch_error(source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| self.fetch_error(source))?;
        debug!("{} bytes read", body.len());

        let reading = parse_payload(&body, self.timezone)?;

        info!("Timestamp: {}", reading.fetched_at);
        info!("Longitude: {}", display_value(&reading.longitude));
        info!("Latitude: {}", display_value(&reading.latitude));

        Ok(reading)
    }

    fn fetch_error(&self, source: reqwest::Error) -> Error {
        Error::Fetch {
            url: self.url.clone(),
            source,
        }
    }
}

/// Decode an upstream body into a reading.
///
/// Expects `{"timestamp": <epoch>, "iss_position": {"longitude": .., "latitude": ..}}`.
/// Coordinates are passed through as received, `null` included; only an
/// absent key is an error.
///
/// # Errors
///
/// Returns [`Error::PayloadDecode`] if the body is not JSON, and
/// [`Error::PayloadField`] if a required field is absent or malformed.
pub fn parse_payload(body: &[u8], timezone: Option<Tz>) -> Result<PositionReading> {
    let data: Value = serde_json::from_slice(body).map_err(Error::PayloadDecode)?;

    let secs = epoch_seconds(data.get("timestamp"))?;
    let fetched_at = format_epoch(secs, timezone)
        .ok_or_else(|| Error::payload_field("timestamp", format!("{secs} is out of range")))?;

    let position = match data.get("iss_position") {
        Some(Value::Object(map)) => map,
        Some(Value::Null) | None => {
            return Err(Error::payload_field("iss_position", "is missing"));
        }
        Some(_) => return Err(Error::payload_field("iss_position", "is not an object")),
    };

    let longitude = required(position.get("longitude"), "iss_position.longitude")?;
    let latitude = required(position.get("latitude"), "iss_position.latitude")?;

    Ok(PositionReading::new(fetched_at, longitude, latitude))
}

#[allow(clippy::cast_possible_truncation)]
fn epoch_seconds(value: Option<&Value>) -> Result<i64> {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.floor() as i64))
            .ok_or_else(|| Error::payload_field("timestamp", format!("{n} is not an epoch"))),
        Some(Value::Null) | None => Err(Error::payload_field("timestamp", "is missing")),
        Some(other) => Err(Error::payload_field(
            "timestamp",
            format!("is not a number: {other}"),
        )),
    }
}

fn required(value: Option<&Value>, field: &'static str) -> Result<Value> {
    match value {
        None => Err(Error::payload_field(field, "is missing")),
        Some(v) => Ok(v.clone()),
    }
}
