//! Staff Model

use serde::{Deserialize, Serialize};

/// Staff entity (员工)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Staff {
    #[serde(alias = "Staff_ID")]
    pub staff_id: i64,
    #[serde(alias = "Staff_Name")]
    pub name: String,
    #[serde(default, alias = "Staff_Phone")]
    pub phone: Option<String>,
    #[serde(default, alias = "Staff_Status")]
    pub status: Option<String>,
    #[serde(default, alias = "Staff_Email")]
    pub email: Option<String>,
    #[serde(default, alias = "Staff_Sex")]
    pub sex: Option<String>,
    #[serde(default, alias = "Staff_Store")]
    pub store: Option<String>,
    #[serde(default, alias = "Staff_PermissionLevel")]
    pub permission_level: Option<String>,
}

/// Create / update staff payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffInput {
    #[serde(rename = "Staff_Name")]
    pub name: String,
    #[serde(rename = "Staff_Phone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "Staff_Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "Staff_Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "Staff_Sex", skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(rename = "Staff_Store", skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(rename = "Staff_PermissionLevel", skip_serializing_if = "Option::is_none")]
    pub permission_level: Option<String>,
}
