pub mod catalog;
pub mod customers;
pub mod expenses;
pub mod records;
pub mod reports;

use crate::db::DatabaseAccess;

/// Aggregate of the domain services used by HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub records: records::RecordService,
    pub expenses: expenses::ExpenseService,
    pub customers: customers::CustomerService,
    pub catalog: catalog::CatalogService,
    pub reports: reports::ReportService,
}

impl AppServices {
    pub fn new(db: DatabaseAccess) -> Self {
        Self {
            records: records::RecordService::new(db.clone()),
            expenses: expenses::ExpenseService::new(db.clone()),
            customers: customers::CustomerService::new(db.clone()),
            catalog: catalog::CatalogService::new(db.clone()),
            reports: reports::ReportService::new(db),
        }
    }
}

/// Inclusive month window `[YYYY-MM-01, YYYY-MM-31]`.
///
/// The upper bound is the literal day 31 for every month. Dates are stored as
/// ISO text, so the comparison is lexicographic: months with fewer days are
/// never under-included, and no stored date can exceed day 31. Keep this
/// convention as is; switching to a calendar month-end is a behavior change.
pub(crate) fn month_range(year: i32, month: u32) -> (String, String) {
    (
        format!("{year:04}-{month:02}-01"),
        format!("{year:04}-{month:02}-31"),
    )
}

#[cfg(test)]
mod tests {
    use super::month_range;

    #[test]
    fn month_range_is_zero_padded() {
        let (start, end) = month_range(2024, 3);
        assert_eq!(start, "2024-03-01");
        assert_eq!(end, "2024-03-31");
    }

    #[test]
    fn february_window_covers_every_february_date() {
        let (start, end) = month_range(2024, 2);
        assert_eq!(end, "2024-02-31");
        // Lexicographic comparison over ISO text: the leap day is inside the
        // window even though February has no day 31.
        assert!(start.as_str() <= "2024-02-29" && "2024-02-29" <= end.as_str());
        assert!("2024-03-01" > end.as_str());
    }
}
