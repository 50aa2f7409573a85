use crate::db::DatabaseAccess;
use crate::entities::{customer, record};
use crate::errors::ServiceError;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::Serialize;
use tracing::{info, instrument};

/// Row cap for the records returned alongside a customer.
const CUSTOMER_RECORDS_CAP: u64 = 50;

#[derive(Debug, Clone)]
pub struct CreateCustomerInput {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// A customer together with their most recent transaction records.
#[derive(Debug, Serialize)]
pub struct CustomerDetail {
    pub customer: customer::Model,
    pub records: Vec<record::Model>,
}

/// Service for managing customers
#[derive(Clone)]
pub struct CustomerService {
    db: DatabaseAccess,
}

impl CustomerService {
    pub fn new(db: DatabaseAccess) -> Self {
        Self { db }
    }

    /// Lists all customers ordered by name.
    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<customer::Model>, ServiceError> {
        self.db
            .execute("customers.list", |db| {
                customer::Entity::find()
                    .order_by_asc(customer::Column::Name)
                    .all(db)
            })
            .await
    }

    /// Creates a customer; a name collision yields a domain-level
    /// "already exists" outcome rather than a generic failure.
    #[instrument(skip(self, input))]
    pub async fn create_customer(
        &self,
        input: CreateCustomerInput,
    ) -> Result<customer::Model, ServiceError> {
        let name = input.name.clone();
        let model = customer::ActiveModel {
            name: Set(input.name),
            phone: Set(input.phone),
            email: Set(input.email),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let created = self
            .db
            .execute("customers.create", move |db| model.insert(db))
            .await
            .map_err(|e| e.into_already_exists(format!("Customer '{name}'")))?;

        info!(customer_id = created.id, "Created customer");
        Ok(created)
    }

    /// Fetches a customer and up to 50 of their most recent records. Records
    /// are matched on the denormalized customer name, so this is two
    /// independent reads with no write in between.
    #[instrument(skip(self))]
    pub async fn get_customer_with_records(
        &self,
        id: i64,
    ) -> Result<CustomerDetail, ServiceError> {
        let found = self
            .db
            .execute("customers.get", move |db| {
                customer::Entity::find_by_id(id).one(db)
            })
            .await?;

        let Some(customer) = found else {
            return Err(ServiceError::NotFound(format!(
                "Customer with id {id} not found"
            )));
        };

        let name = customer.name.clone();
        let records = self
            .db
            .execute("customers.recent_records", move |db| {
                record::Entity::find()
                    .filter(record::Column::CustomerName.eq(name))
                    .order_by_desc(record::Column::Date)
                    .order_by_desc(record::Column::Id)
                    .limit(CUSTOMER_RECORDS_CAP)
                    .all(db)
            })
            .await?;

        Ok(CustomerDetail { customer, records })
    }
}
