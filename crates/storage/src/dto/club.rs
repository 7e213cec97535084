use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{PaginationParams, default_page, default_page_size};

/// Request payload for creating a new club
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateClubRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Full name must be between 1 and 255 characters"
    ))]
    pub full_name: String,

    #[validate(length(min = 1, max = 100))]
    pub common_name: String,

    #[validate(length(
        min = 2,
        max = 5,
        message = "Short name must be between 2 and 5 characters"
    ))]
    pub short_name: String,

    #[validate(length(min = 1, max = 100))]
    pub country: String,

    #[validate(url)]
    pub logo_url: Option<String>,

    #[validate(length(max = 255))]
    pub stadium: Option<String>,
}

/// Request payload for updating an existing club
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateClubRequest {
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub common_name: Option<String>,

    #[validate(length(min = 2, max = 5))]
    pub short_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub country: Option<String>,

    #[validate(url)]
    pub logo_url: Option<String>,

    #[validate(length(max = 255))]
    pub stadium: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ClubFilter {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub country: Option<String>,
}

impl ClubFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()
    }
}
