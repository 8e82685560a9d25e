// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather lookup and goal adjustment.
//!
//! Handles:
//! - Realtime weather fetch from the Tomorrow.io API
//! - Conversion of a weather sample to a signed goal adjustment (ml)
//!
//! The adjustment is sampled once per day at record creation; callers absorb
//! lookup failures with a zero-valued `Weather` so goal computation degrades
//! silently instead of failing.

use crate::error::AppError;
use serde::Deserialize;

/// Minimum and maximum goal adjustment in ml.
pub const ADJUSTMENT_FLOOR_ML: i32 = -500;
pub const ADJUSTMENT_CEIL_ML: i32 = 1500;

/// A realtime weather sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Weather {
    /// Relative humidity, 0-100
    pub humidity: f64,
    /// Temperature in °C
    pub temperature: f64,
}

/// Signed daily-goal adjustment in ml for a weather sample.
///
/// Sliding scales: +50 ml per °C above 20, -20 ml per °C below 10,
/// +4 ml per humidity point above 50%, plus a heat-stress term when both
/// temperature and humidity are extreme. Clamped to `[-500, 1500]`.
pub fn goal_adjustment(weather: &Weather) -> i32 {
    let mut adjustment = 0.0;

    if weather.temperature > 20.0 {
        adjustment += (weather.temperature - 20.0) * 50.0;
    } else if weather.temperature < 10.0 {
        adjustment -= (10.0 - weather.temperature) * 20.0;
    }

    if weather.humidity > 50.0 {
        adjustment += (weather.humidity - 50.0) * 4.0;
    }

    if weather.temperature > 28.0 && weather.humidity > 60.0 {
        let heat_stress = (weather.temperature - 28.0) * (weather.humidity - 60.0) / 100.0;
        adjustment += heat_stress * 10.0;
    }

    (adjustment.round() as i32).clamp(ADJUSTMENT_FLOOR_ML, ADJUSTMENT_CEIL_ML)
}

/// Tomorrow.io realtime weather client.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct RealtimeResponse {
    data: RealtimeData,
}

#[derive(Deserialize)]
struct RealtimeData {
    values: RealtimeValues,
}

#[derive(Deserialize)]
struct RealtimeValues {
    humidity: f64,
    temperature: f64,
}

impl WeatherClient {
    /// Create a new client with an API key.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, "https://api.tomorrow.io/v4".to_string())
    }

    /// Create a client against a custom endpoint (tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Fetch the current weather at a coordinate.
    pub async fn realtime(&self, latitude: f64, longitude: f64) -> Result<Weather, AppError> {
        let url = format!("{}/weather/realtime", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("location", format!("{},{}", latitude, longitude)),
                ("apikey", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherApi(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::WeatherApi(format!(
                "Weather API returned {}",
                response.status()
            )));
        }

        let body: RealtimeResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherApi(format!("Invalid weather response: {}", e)))?;

        Ok(Weather {
            humidity: body.data.values.humidity,
            temperature: body.data.values.temperature,
        })
    }
}
