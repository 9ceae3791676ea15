//! Consumption profile request types.
//!
//! A profile query is a batch of `Pod`s, each naming one metering point and
//! the date range to fetch. The portal only accepts energy values, so the
//! request dimension is fixed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Energy branch filter for the consumption profiles endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsumptionBranch {
    #[serde(rename = "STROM")]
    Electricity,
}

impl ConsumptionBranch {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsumptionBranch::Electricity => "STROM",
        }
    }
}

/// Date range of a profile request, both ends as calendar days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// One metering point of a consumption profile request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    pub contract_account_number: String,
    pub energy_community_id: String,
    #[serde(rename = "type")]
    pub profile_type: String,
    pub best_available_granularity: String,
    pub meter_point_administration_number: String,
    pub timerange: TimeRange,
}

impl Pod {
    pub fn new(
        contract_account_number: impl Into<String>,
        energy_community_id: impl Into<String>,
        profile_type: impl Into<String>,
        best_available_granularity: impl Into<String>,
        meter_point_administration_number: impl Into<String>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Self {
        Self {
            contract_account_number: contract_account_number.into(),
            energy_community_id: energy_community_id.into(),
            profile_type: profile_type.into(),
            best_available_granularity: best_available_granularity.into(),
            meter_point_administration_number: meter_point_administration_number.into(),
            timerange: TimeRange { from, to },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Energy,
}

/// Body of `POST consumptions/profile/active`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileRequest<'a> {
    pub pods: &'a [Pod],
    pub dimension: Dimension,
}

impl<'a> ProfileRequest<'a> {
    pub fn new(pods: &'a [Pod]) -> Self {
        Self {
            pods,
            dimension: Dimension::Energy,
        }
    }
}
