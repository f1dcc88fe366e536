//! Member database model

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub active: bool,
}
