use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

use crate::m20240315_000001_create_salon_tables::{ExpenseTypes, Services, Staff};

const DEFAULT_SERVICES: &[&str] = &["Haircut", "Beard Trim", "Shave", "Hair Color", "Styling"];
const DEFAULT_STAFF: &[&str] = &["Owner"];
const DEFAULT_EXPENSE_TYPES: &[&str] = &["Rent", "Utilities", "Supplies", "Salaries", "Other"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        seed_if_empty(manager, Services::Table, Services::Id, Services::Name, DEFAULT_SERVICES)
            .await?;
        seed_if_empty(manager, Staff::Table, Staff::Id, Staff::Name, DEFAULT_STAFF).await?;
        seed_if_empty(
            manager,
            ExpenseTypes::Table,
            ExpenseTypes::Id,
            ExpenseTypes::Name,
            DEFAULT_EXPENSE_TYPES,
        )
        .await
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // Seed rows are indistinguishable from user data once the tables are in
        // use, so the seed is not reverted.
        Ok(())
    }
}

/// Inserts the default rows only when the table is still empty, so re-running
/// setup against an existing database never duplicates or resurrects rows.
async fn seed_if_empty<T, I, N>(
    manager: &SchemaManager<'_>,
    table: T,
    id_col: I,
    name_col: N,
    names: &[&str],
) -> Result<(), DbErr>
where
    T: Iden + Copy + 'static,
    I: Iden + Copy + 'static,
    N: Iden + Copy + 'static,
{
    let backend = manager.get_database_backend();
    let db = manager.get_connection();

    let count_stmt = Query::select()
        .expr_as(Func::count(Expr::col(id_col)), Alias::new("cnt"))
        .from(table)
        .to_owned();
    let row = db.query_one(backend.build(&count_stmt)).await?;
    let count: i64 = match row {
        Some(row) => row.try_get("", "cnt")?,
        None => 0,
    };
    if count > 0 {
        return Ok(());
    }

    let mut insert = Query::insert().into_table(table).columns([name_col]).to_owned();
    for name in names {
        insert.values_panic([(*name).into()]);
    }
    manager.exec_stmt(insert).await
}
