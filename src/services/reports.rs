//! Aggregate reporting over transaction records and expenses.
//!
//! Every report is a pure function of its date window, computed fresh per
//! call from aggregate SQL. The statements are assembled with the query
//! builder over the entity column enums, so values are always bound as
//! positional parameters. A store error aborts the whole report; partial
//! results are never returned.

use crate::db::DatabaseAccess;
use crate::entities::{expense, record, PaymentMethod};
use crate::errors::ServiceError;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Alias, Expr, Func, Order, Query, SelectStatement};
use sea_orm::{ConnectionTrait, FromQueryResult, Statement};
use serde::Serialize;
use std::collections::HashMap;
use tracing::instrument;

/// One payment-method bucket of a day's money flow.
#[derive(Debug, Serialize)]
pub struct PaymentTypeBreakdown {
    pub payment_type: PaymentMethod,
    pub count: i64,
    pub amount: Decimal,
}

/// Count and amount over every row of one side (income or expenses).
#[derive(Debug, Serialize)]
pub struct MoneyTotal {
    pub count: i64,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CashflowSummary {
    pub by_payment_type: Vec<PaymentTypeBreakdown>,
    pub total: MoneyTotal,
}

/// Income, expenses and net profit of a single day.
#[derive(Debug, Serialize)]
pub struct DailySummary {
    pub date: String,
    pub income: CashflowSummary,
    pub expenses: CashflowSummary,
    pub net_profit: Decimal,
}

/// Per-staff aggregate over a date range, ordered by revenue.
#[derive(Debug, Serialize)]
pub struct StaffPerformance {
    pub staff: String,
    pub service_count: i64,
    pub total_revenue: Decimal,
    pub average_price: Decimal,
    pub services_provided: Vec<String>,
}

/// Per-service aggregate over a date range, ordered by popularity.
#[derive(Debug, Serialize)]
pub struct ServiceAnalysis {
    pub service: String,
    pub service_count: i64,
    pub total_revenue: Decimal,
    pub average_price: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct GroupedMoneyRow {
    payment_type: PaymentMethod,
    count: i64,
    amount: Option<Decimal>,
}

#[derive(Debug, FromQueryResult)]
struct TotalsRow {
    count: i64,
    amount: Option<Decimal>,
}

#[derive(Debug, FromQueryResult)]
struct StaffAggRow {
    staff: String,
    service_count: i64,
    total_revenue: Option<Decimal>,
    average_price: Option<Decimal>,
}

#[derive(Debug, FromQueryResult)]
struct ServiceAggRow {
    service: String,
    service_count: i64,
    total_revenue: Option<Decimal>,
    average_price: Option<Decimal>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
}

#[derive(Debug, FromQueryResult)]
struct StaffServiceRow {
    staff: String,
    service: String,
}

/// Service for generating aggregate reports
#[derive(Clone)]
pub struct ReportService {
    db: DatabaseAccess,
}

impl ReportService {
    pub fn new(db: DatabaseAccess) -> Self {
        Self { db }
    }

    fn build(&self, stmt: &SelectStatement) -> Statement {
        self.db.get_pool().get_database_backend().build(stmt)
    }

    /// Income and expense totals of one day, grouped by payment method, with
    /// the resulting net profit. A day with no activity reports zeros, never
    /// missing fields.
    #[instrument(skip(self))]
    pub async fn daily_summary(&self, date: &str) -> Result<DailySummary, ServiceError> {
        let income_by_type = Query::select()
            .column(record::Column::PaymentType)
            .expr_as(Func::count(Expr::col(record::Column::Id)), Alias::new("count"))
            .expr_as(Func::sum(Expr::col(record::Column::Price)), Alias::new("amount"))
            .from(record::Entity)
            .and_where(Expr::col(record::Column::Date).eq(date))
            .group_by_col(record::Column::PaymentType)
            .to_owned();

        let expenses_by_type = Query::select()
            .column(expense::Column::PaymentType)
            .expr_as(Func::count(Expr::col(expense::Column::Id)), Alias::new("count"))
            .expr_as(Func::sum(Expr::col(expense::Column::Amount)), Alias::new("amount"))
            .from(expense::Entity)
            .and_where(Expr::col(expense::Column::Date).eq(date))
            .group_by_col(expense::Column::PaymentType)
            .to_owned();

        let income_total = Query::select()
            .expr_as(Func::count(Expr::col(record::Column::Id)), Alias::new("count"))
            .expr_as(Func::sum(Expr::col(record::Column::Price)), Alias::new("amount"))
            .from(record::Entity)
            .and_where(Expr::col(record::Column::Date).eq(date))
            .to_owned();

        let expense_total = Query::select()
            .expr_as(Func::count(Expr::col(expense::Column::Id)), Alias::new("count"))
            .expr_as(Func::sum(Expr::col(expense::Column::Amount)), Alias::new("amount"))
            .from(expense::Entity)
            .and_where(Expr::col(expense::Column::Date).eq(date))
            .to_owned();

        let income_rows: Vec<GroupedMoneyRow> = self
            .db
            .fetch_all("reports.daily_income_by_type", self.build(&income_by_type))
            .await?;
        let expense_rows: Vec<GroupedMoneyRow> = self
            .db
            .fetch_all("reports.daily_expenses_by_type", self.build(&expenses_by_type))
            .await?;
        let income_totals: Option<TotalsRow> = self
            .db
            .fetch_one("reports.daily_income_total", self.build(&income_total))
            .await?;
        let expense_totals: Option<TotalsRow> = self
            .db
            .fetch_one("reports.daily_expense_total", self.build(&expense_total))
            .await?;

        let income = summarize(income_rows, income_totals);
        let expenses = summarize(expense_rows, expense_totals);
        let net_profit = income.total.amount - expenses.total.amount;

        Ok(DailySummary {
            date: date.to_string(),
            income,
            expenses,
            net_profit,
        })
    }

    /// Revenue, transaction count, average price and the distinct services
    /// each staff member provided over the inclusive date range, busiest
    /// earners first.
    #[instrument(skip(self))]
    pub async fn staff_performance(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<StaffPerformance>, ServiceError> {
        let aggregates = Query::select()
            .column(record::Column::Staff)
            .expr_as(Func::count(Expr::col(record::Column::Id)), Alias::new("service_count"))
            .expr_as(Func::sum(Expr::col(record::Column::Price)), Alias::new("total_revenue"))
            .expr_as(Func::avg(Expr::col(record::Column::Price)), Alias::new("average_price"))
            .from(record::Entity)
            .and_where(Expr::col(record::Column::Date).between(start_date, end_date))
            .and_where(Expr::col(record::Column::Staff).is_not_null())
            .group_by_col(record::Column::Staff)
            .order_by(Alias::new("total_revenue"), Order::Desc)
            .to_owned();

        let pairs = Query::select()
            .distinct()
            .column(record::Column::Staff)
            .column(record::Column::Service)
            .from(record::Entity)
            .and_where(Expr::col(record::Column::Date).between(start_date, end_date))
            .and_where(Expr::col(record::Column::Staff).is_not_null())
            .and_where(Expr::col(record::Column::Service).is_not_null())
            .to_owned();

        let agg_rows: Vec<StaffAggRow> = self
            .db
            .fetch_all("reports.staff_performance", self.build(&aggregates))
            .await?;
        let pair_rows: Vec<StaffServiceRow> = self
            .db
            .fetch_all("reports.staff_services", self.build(&pairs))
            .await?;

        let mut services_by_staff: HashMap<String, Vec<String>> = HashMap::new();
        for pair in pair_rows {
            services_by_staff.entry(pair.staff).or_default().push(pair.service);
        }

        Ok(agg_rows
            .into_iter()
            .map(|row| StaffPerformance {
                services_provided: services_by_staff.remove(&row.staff).unwrap_or_default(),
                staff: row.staff,
                service_count: row.service_count,
                total_revenue: row.total_revenue.unwrap_or(Decimal::ZERO),
                average_price: row.average_price.unwrap_or(Decimal::ZERO),
            })
            .collect())
    }

    /// Count, revenue and price spread per service over the inclusive date
    /// range, most-requested first.
    #[instrument(skip(self))]
    pub async fn service_analysis(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<ServiceAnalysis>, ServiceError> {
        let aggregates = Query::select()
            .column(record::Column::Service)
            .expr_as(Func::count(Expr::col(record::Column::Id)), Alias::new("service_count"))
            .expr_as(Func::sum(Expr::col(record::Column::Price)), Alias::new("total_revenue"))
            .expr_as(Func::avg(Expr::col(record::Column::Price)), Alias::new("average_price"))
            .expr_as(Func::min(Expr::col(record::Column::Price)), Alias::new("min_price"))
            .expr_as(Func::max(Expr::col(record::Column::Price)), Alias::new("max_price"))
            .from(record::Entity)
            .and_where(Expr::col(record::Column::Date).between(start_date, end_date))
            .and_where(Expr::col(record::Column::Service).is_not_null())
            .group_by_col(record::Column::Service)
            .order_by(Alias::new("service_count"), Order::Desc)
            .to_owned();

        let rows: Vec<ServiceAggRow> = self
            .db
            .fetch_all("reports.service_analysis", self.build(&aggregates))
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ServiceAnalysis {
                service: row.service,
                service_count: row.service_count,
                total_revenue: row.total_revenue.unwrap_or(Decimal::ZERO),
                average_price: row.average_price.unwrap_or(Decimal::ZERO),
                min_price: row.min_price.unwrap_or(Decimal::ZERO),
                max_price: row.max_price.unwrap_or(Decimal::ZERO),
            })
            .collect())
    }
}

/// Folds grouped rows and the ungrouped totals into one summary, coercing
/// absent sums to zero before any arithmetic happens.
fn summarize(rows: Vec<GroupedMoneyRow>, totals: Option<TotalsRow>) -> CashflowSummary {
    CashflowSummary {
        by_payment_type: rows
            .into_iter()
            .map(|row| PaymentTypeBreakdown {
                payment_type: row.payment_type,
                count: row.count,
                amount: row.amount.unwrap_or(Decimal::ZERO),
            })
            .collect(),
        total: match totals {
            Some(t) => MoneyTotal {
                count: t.count,
                amount: t.amount.unwrap_or(Decimal::ZERO),
            },
            None => MoneyTotal {
                count: 0,
                amount: Decimal::ZERO,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_coerces_missing_sums_to_zero() {
        let summary = summarize(Vec::new(), None);
        assert_eq!(summary.total.count, 0);
        assert_eq!(summary.total.amount, Decimal::ZERO);
        assert!(summary.by_payment_type.is_empty());

        let summary = summarize(
            Vec::new(),
            Some(TotalsRow {
                count: 0,
                amount: None,
            }),
        );
        assert_eq!(summary.total.amount, Decimal::ZERO);
    }

    #[test]
    fn summarize_keeps_grouped_amounts() {
        let summary = summarize(
            vec![GroupedMoneyRow {
                payment_type: PaymentMethod::Cash,
                count: 2,
                amount: Some(Decimal::new(15000, 2)),
            }],
            Some(TotalsRow {
                count: 2,
                amount: Some(Decimal::new(15000, 2)),
            }),
        );
        assert_eq!(summary.by_payment_type.len(), 1);
        assert_eq!(summary.by_payment_type[0].count, 2);
        assert_eq!(summary.by_payment_type[0].amount, Decimal::new(15000, 2));
        assert_eq!(summary.total.count, 2);
    }
}
