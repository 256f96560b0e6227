//! Report and transaction export
//!
//! CSV rows are plain comma joins without quoting, matching the files the
//! frontend download produced. Status and payment labels follow the
//! language setting.

use crate::repository::Repository;
use crate::reports::SalesReport;
use crate::settings::SettingsService;
use crate::storage::CollectionStore;
use shared::error::AppResult;
use shared::models::{Language, Order, OrderStatus, PaymentStatus, Table};

pub const CSV_HEADER: &str = "ID Pesanan,Meja,Total,Status,Pembayaran,Tanggal,Waktu";

/// Display label for an order status
pub fn status_label(status: OrderStatus, language: Language) -> &'static str {
    match language {
        Language::Id => match status {
            OrderStatus::Pending => "Menunggu",
            OrderStatus::Preparing => "Sedang Dibuat",
            OrderStatus::Ready => "Siap",
            OrderStatus::Served => "Diantar",
            OrderStatus::Completed => "Selesai",
            OrderStatus::Cancelled => "Dibatalkan",
        },
        Language::En => match status {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Served => "Served",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        },
    }
}

/// Display label for a payment status
pub fn payment_label(status: PaymentStatus, language: Language) -> &'static str {
    match language {
        Language::Id => match status {
            PaymentStatus::Pending => "Belum Bayar",
            PaymentStatus::Paid => "Sudah Bayar",
            PaymentStatus::Partial => "Sebagian",
        },
        Language::En => match status {
            PaymentStatus::Pending => "Unpaid",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Partial => "Partial",
        },
    }
}

/// Resolve an order's table column: table name, a placeholder when the
/// reference dangles, "Takeaway" when there is none
fn table_label(order: &Order, tables: &[Table], language: Language) -> String {
    match &order.table_id {
        None => "Takeaway".to_string(),
        Some(id) => tables
            .iter()
            .find(|t| &t.id == id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| {
                match language {
                    Language::Id => "Meja tidak ditemukan",
                    Language::En => "Table not found",
                }
                .to_string()
            }),
    }
}

/// One CSV row for an order
fn csv_row(order: &Order, tables: &[Table], language: Language) -> String {
    [
        order.id.clone(),
        table_label(order, tables, language),
        format!("{}", order.total),
        status_label(order.status, language).to_string(),
        payment_label(order.payment_status, language).to_string(),
        order.created_at.format("%d/%m/%Y").to_string(),
        order.created_at.format("%H:%M").to_string(),
    ]
    .join(",")
}

/// Pretty-printed JSON export of a sales report
pub fn report_json(report: &SalesReport) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[derive(Clone)]
pub struct ExportService {
    orders: Repository<Order>,
    tables: Repository<Table>,
    settings: SettingsService,
}

impl ExportService {
    pub fn new(store: CollectionStore) -> Self {
        Self {
            orders: Repository::new(store.clone()),
            tables: Repository::new(store.clone()),
            settings: SettingsService::new(store),
        }
    }

    /// CSV export of the given orders, header included
    pub fn transactions_csv(&self, orders: &[Order]) -> AppResult<String> {
        let tables = self.tables.list()?;
        let language = self.settings.get()?.language;

        let mut out = String::from(CSV_HEADER);
        for order in orders {
            out.push('\n');
            out.push_str(&csv_row(order, &tables, language));
        }
        tracing::info!(rows = orders.len(), "transactions exported");
        Ok(out)
    }

    /// CSV export of every stored order
    pub fn all_transactions_csv(&self) -> AppResult<String> {
        let orders = self.orders.list()?;
        self.transactions_csv(&orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::{AppSettings, Position, TableStatus};

    fn order(id: &str, table_id: Option<&str>, total: f64) -> Order {
        let ts = Utc.with_ymd_and_hms(2026, 8, 25, 14, 5, 0).unwrap();
        Order {
            id: id.to_string(),
            table_id: table_id.map(str::to_string),
            items: vec![],
            status: OrderStatus::Completed,
            subtotal: total,
            tax: 0.0,
            service_charge: 0.0,
            discount: 0.0,
            total,
            created_at: ts,
            updated_at: ts,
            customer_id: None,
            payment_status: PaymentStatus::Paid,
            payment_method: Some("cash".to_string()),
            cashier_id: "u1".to_string(),
        }
    }

    fn table(id: &str, name: &str) -> Table {
        Table {
            id: id.to_string(),
            name: name.to_string(),
            capacity: 4,
            status: TableStatus::Available,
            position: Position::default(),
            current_order: None,
        }
    }

    fn service() -> ExportService {
        ExportService::new(CollectionStore::open_in_memory().unwrap())
    }

    #[test]
    fn test_csv_header_and_row_shape() {
        let tables = vec![table("t1", "Meja 1")];
        let row = csv_row(&order("o1", Some("t1"), 69000.0), &tables, Language::Id);
        assert_eq!(row, "o1,Meja 1,69000,Selesai,Sudah Bayar,25/08/2026,14:05");
        assert_eq!(
            CSV_HEADER,
            "ID Pesanan,Meja,Total,Status,Pembayaran,Tanggal,Waktu"
        );
    }

    #[test]
    fn test_takeaway_and_dangling_table() {
        assert_eq!(
            table_label(&order("o1", None, 0.0), &[], Language::Id),
            "Takeaway"
        );
        assert_eq!(
            table_label(&order("o1", Some("ghost"), 0.0), &[], Language::Id),
            "Meja tidak ditemukan"
        );
        assert_eq!(
            table_label(&order("o1", Some("ghost"), 0.0), &[], Language::En),
            "Table not found"
        );
    }

    #[test]
    fn test_english_labels() {
        assert_eq!(status_label(OrderStatus::Preparing, Language::En), "Preparing");
        assert_eq!(status_label(OrderStatus::Preparing, Language::Id), "Sedang Dibuat");
        assert_eq!(payment_label(PaymentStatus::Pending, Language::En), "Unpaid");
        assert_eq!(payment_label(PaymentStatus::Partial, Language::Id), "Sebagian");
    }

    #[test]
    fn test_transactions_csv_uses_language_setting() {
        let svc = service();
        let mut settings = AppSettings::default();
        settings.language = Language::En;
        svc.settings.save(settings).unwrap();

        let csv = svc.transactions_csv(&[order("o1", None, 1000.0)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].contains(",Completed,Paid,"));
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let svc = service();
        assert_eq!(svc.all_transactions_csv().unwrap(), CSV_HEADER);
    }
}
