use chrono::NaiveDate;
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::deserialize_helper;

/// Delivery status of the upcoming birthday message
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[allow(non_camel_case_types)]
pub enum MessageStatus {
    #[default]
    PENDING,
    SENT,
    FAILED,
    FAILED_PERMANENT,
}

impl MessageStatus {
    pub fn to_bson(&self) -> anyhow::Result<Bson> {
        let bson = mongodb::bson::to_bson(self)?;
        Ok(bson)
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "deserialize_helper")]
    #[serde(default)]
    pub _id: Option<String>,

    pub first_name: String,
    pub last_name: String,
    pub email: String,

    /// calendar date of birth, time of day is ignored
    pub birthday: NaiveDate,

    /// IANA timezone name, e.g. "Australia/Melbourne"
    pub location: String,

    /// epoch seconds of the next 09:00 local birthday occurrence
    pub next_notification: u64,

    pub message_status: MessageStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_ts: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_ts: Option<u64>,
}
