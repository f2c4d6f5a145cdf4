use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoleDto {
    User,
    Admin,
}

impl From<entity::user::UserRole> for RoleDto {
    fn from(role: entity::user::UserRole) -> Self {
        match role {
            entity::user::UserRole::User => Self::User,
            entity::user::UserRole::Admin => Self::Admin,
        }
    }
}

/// The signed in user
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role: RoleDto,
    pub email_verified: bool,
    pub created_at: NaiveDateTime,
}

impl From<entity::user::Model> for UserDto {
    fn from(user: entity::user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            image: user.image,
            role: user.role.into(),
            email_verified: user.email_verified_at.is_some(),
            created_at: user.created_at,
        }
    }
}

/// Public profile of another traveller, attached to match results
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TravellerDto {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
}

impl From<entity::user::Model> for TravellerDto {
    fn from(user: entity::user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            image: user.image,
        }
    }
}

/// Ticket owner as shown to admins, includes the email address
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TicketOwnerDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

impl From<entity::user::Model> for TicketOwnerDto {
    fn from(user: entity::user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            image: user.image,
        }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ResendOtpRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
}
