//! A completed transaction: one service rendered and paid for.
//!
//! `customer_name`, `service` and `staff` are denormalized free text rather
//! than foreign keys. Deactivating or renaming a reference row must never
//! retroactively alter what a historical receipt says.
//!
//! `date` is an ISO `YYYY-MM-DD` string; all date filters compare text, which
//! keeps the monthly `..-31` upper bound well-defined for every month.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::payment_method::PaymentMethod;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub date: String,
    pub customer_name: String,
    pub service: Option<String>,
    pub staff: Option<String>,
    pub price: Decimal,
    pub payment_type: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
