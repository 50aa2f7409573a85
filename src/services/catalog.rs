//! Reference data shared by the whole salon: offered services, staff members
//! and expense types. All three tables have the same shape and the same
//! soft-delete lifecycle, and "deleting" only deactivates the row so that
//! historical records keep resolving.

use crate::db::DatabaseAccess;
use crate::entities::{expense_type, service_item, staff_member};
use crate::errors::ServiceError;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{info, instrument};

/// Service for managing the reference tables
#[derive(Clone)]
pub struct CatalogService {
    db: DatabaseAccess,
}

impl CatalogService {
    pub fn new(db: DatabaseAccess) -> Self {
        Self { db }
    }

    // ---- services ----

    /// Lists services ordered by name, active rows only unless opted in.
    #[instrument(skip(self))]
    pub async fn list_services(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<service_item::Model>, ServiceError> {
        self.db
            .execute("services.list", move |db| {
                let mut query = service_item::Entity::find();
                if !include_inactive {
                    query = query.filter(service_item::Column::Active.eq(true));
                }
                query.order_by_asc(service_item::Column::Name).all(db)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn create_service(&self, name: String) -> Result<service_item::Model, ServiceError> {
        let display = name.clone();
        let model = service_item::ActiveModel {
            name: Set(name),
            active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let created = self
            .db
            .execute("services.create", move |db| model.insert(db))
            .await
            .map_err(|e| e.into_already_exists(format!("Service '{display}'")))?;

        info!(service_id = created.id, "Created service");
        Ok(created)
    }

    /// Deactivates a service; the row is never physically removed.
    #[instrument(skip(self))]
    pub async fn deactivate_service(&self, id: i64) -> Result<service_item::Model, ServiceError> {
        let updated = self
            .db
            .execute("services.deactivate", move |db| async move {
                let Some(model) = service_item::Entity::find_by_id(id).one(db).await? else {
                    return Ok(None);
                };
                let mut active: service_item::ActiveModel = model.into();
                active.active = Set(false);
                active.update(db).await.map(Some)
            })
            .await?;

        updated.ok_or_else(|| ServiceError::NotFound(format!("Service with id {id} not found")))
    }

    // ---- staff ----

    #[instrument(skip(self))]
    pub async fn list_staff(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<staff_member::Model>, ServiceError> {
        self.db
            .execute("staff.list", move |db| {
                let mut query = staff_member::Entity::find();
                if !include_inactive {
                    query = query.filter(staff_member::Column::Active.eq(true));
                }
                query.order_by_asc(staff_member::Column::Name).all(db)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn create_staff(&self, name: String) -> Result<staff_member::Model, ServiceError> {
        let display = name.clone();
        let model = staff_member::ActiveModel {
            name: Set(name),
            active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let created = self
            .db
            .execute("staff.create", move |db| model.insert(db))
            .await
            .map_err(|e| e.into_already_exists(format!("Staff member '{display}'")))?;

        info!(staff_id = created.id, "Created staff member");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn deactivate_staff(&self, id: i64) -> Result<staff_member::Model, ServiceError> {
        let updated = self
            .db
            .execute("staff.deactivate", move |db| async move {
                let Some(model) = staff_member::Entity::find_by_id(id).one(db).await? else {
                    return Ok(None);
                };
                let mut active: staff_member::ActiveModel = model.into();
                active.active = Set(false);
                active.update(db).await.map(Some)
            })
            .await?;

        updated
            .ok_or_else(|| ServiceError::NotFound(format!("Staff member with id {id} not found")))
    }

    // ---- expense types ----

    /// Expense types are seeded at setup time; listing is the only HTTP
    /// surface they have.
    #[instrument(skip(self))]
    pub async fn list_expense_types(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<expense_type::Model>, ServiceError> {
        self.db
            .execute("expense_types.list", move |db| {
                let mut query = expense_type::Entity::find();
                if !include_inactive {
                    query = query.filter(expense_type::Column::Active.eq(true));
                }
                query.order_by_asc(expense_type::Column::Name).all(db)
            })
            .await
    }
}
