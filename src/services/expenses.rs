use crate::db::DatabaseAccess;
use crate::entities::{expense, PaymentMethod};
use crate::errors::ServiceError;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{info, instrument};

use super::month_range;

#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub date: String,
    pub expense_type: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub payment_type: PaymentMethod,
}

/// Service for managing expenses
#[derive(Clone)]
pub struct ExpenseService {
    db: DatabaseAccess,
}

impl ExpenseService {
    pub fn new(db: DatabaseAccess) -> Self {
        Self { db }
    }

    #[instrument(skip(self, input))]
    pub async fn create_expense(
        &self,
        input: CreateExpenseInput,
    ) -> Result<expense::Model, ServiceError> {
        let model = expense::ActiveModel {
            date: Set(input.date),
            expense_type: Set(input.expense_type),
            description: Set(input.description),
            amount: Set(input.amount),
            payment_type: Set(input.payment_type),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let created = self
            .db
            .execute("expenses.create", move |db| model.insert(db))
            .await?;

        info!(expense_id = created.id, "Created expense");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn list_daily(&self, date: &str) -> Result<Vec<expense::Model>, ServiceError> {
        let date = date.to_owned();
        self.db
            .execute("expenses.list_daily", move |db| {
                expense::Entity::find()
                    .filter(expense::Column::Date.eq(date))
                    .order_by_asc(expense::Column::Id)
                    .all(db)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_monthly(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<expense::Model>, ServiceError> {
        let (start, end) = month_range(year, month);
        self.db
            .execute("expenses.list_monthly", move |db| {
                expense::Entity::find()
                    .filter(expense::Column::Date.between(start, end))
                    .order_by_asc(expense::Column::Date)
                    .order_by_asc(expense::Column::Id)
                    .all(db)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_expense(&self, id: i64) -> Result<expense::Model, ServiceError> {
        let deleted = self
            .db
            .transaction::<_, expense::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let Some(model) = expense::Entity::find_by_id(id).one(txn).await? else {
                        return Err(ServiceError::NotFound(format!(
                            "Expense with id {id} not found"
                        )));
                    };
                    expense::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(model)
                })
            })
            .await?;

        info!(expense_id = deleted.id, "Deleted expense");
        Ok(deleted)
    }
}
