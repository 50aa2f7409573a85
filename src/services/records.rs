use crate::db::DatabaseAccess;
use crate::entities::{record, PaymentMethod};
use crate::errors::ServiceError;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{info, instrument};

use super::month_range;

/// Payload for recording a completed transaction.
#[derive(Debug, Clone)]
pub struct CreateRecordInput {
    pub date: String,
    pub customer_name: String,
    pub service: Option<String>,
    pub staff: Option<String>,
    pub price: Decimal,
    pub payment_type: PaymentMethod,
}

/// Service for managing transaction records
#[derive(Clone)]
pub struct RecordService {
    db: DatabaseAccess,
}

impl RecordService {
    pub fn new(db: DatabaseAccess) -> Self {
        Self { db }
    }

    /// Creates a transaction record and returns the stored row.
    #[instrument(skip(self, input))]
    pub async fn create_record(
        &self,
        input: CreateRecordInput,
    ) -> Result<record::Model, ServiceError> {
        let model = record::ActiveModel {
            date: Set(input.date),
            customer_name: Set(input.customer_name),
            service: Set(input.service),
            staff: Set(input.staff),
            price: Set(input.price),
            payment_type: Set(input.payment_type),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let created = self
            .db
            .execute("records.create", move |db| model.insert(db))
            .await?;

        info!(record_id = created.id, "Created record");
        Ok(created)
    }

    /// Lists the records of one calendar day.
    #[instrument(skip(self))]
    pub async fn list_daily(&self, date: &str) -> Result<Vec<record::Model>, ServiceError> {
        let date = date.to_owned();
        self.db
            .execute("records.list_daily", move |db| {
                record::Entity::find()
                    .filter(record::Column::Date.eq(date))
                    .order_by_asc(record::Column::Id)
                    .all(db)
            })
            .await
    }

    /// Lists the records of one calendar month.
    #[instrument(skip(self))]
    pub async fn list_monthly(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<record::Model>, ServiceError> {
        let (start, end) = month_range(year, month);
        self.db
            .execute("records.list_monthly", move |db| {
                record::Entity::find()
                    .filter(record::Column::Date.between(start, end))
                    .order_by_asc(record::Column::Date)
                    .order_by_asc(record::Column::Id)
                    .all(db)
            })
            .await
    }

    /// Hard-deletes a record by id and returns the removed row, or a
    /// not-found outcome when no row matched.
    #[instrument(skip(self))]
    pub async fn delete_record(&self, id: i64) -> Result<record::Model, ServiceError> {
        let deleted = self
            .db
            .transaction::<_, record::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let Some(model) = record::Entity::find_by_id(id).one(txn).await? else {
                        return Err(ServiceError::NotFound(format!(
                            "Record with id {id} not found"
                        )));
                    };
                    record::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(model)
                })
            })
            .await?;

        info!(record_id = deleted.id, "Deleted record");
        Ok(deleted)
    }
}
