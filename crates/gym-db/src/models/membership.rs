//! Membership database model

use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct MembershipModel {
    pub id: i64,
    pub member_id: i64,
    pub plan_name: String,
    pub status: String,
    pub start_date: NaiveDate,
    pub expiration_date: NaiveDate,
}
