//! End-to-end flows through the engine facade against an on-disk database.

use chrono::Utc;
use pos_engine::Pos;
use pos_engine::orders::{Cart, NewOrder, TransactionQuery};
use pos_engine::reports::ReportPeriod;
use shared::error::ErrorCode;
use shared::models::{
    MenuCategoryCreate, MenuItem, MenuItemCreate, OrderStatus, PaymentStatus, StockItemUpsert,
    StockLevel, Table, TableCreate, TableStatus, UserCreate, UserRole,
};

fn open_pos(dir: &tempfile::TempDir) -> Pos {
    Pos::open(dir.path().join("pos.redb")).unwrap()
}

fn seed_table(pos: &Pos, name: &str) -> Table {
    pos.tables()
        .create(TableCreate {
            name: name.to_string(),
            capacity: 4,
            position: None,
        })
        .unwrap()
}

fn seed_item(pos: &Pos, category: &str, name: &str, price: f64, managed: bool) -> MenuItem {
    let cat = pos
        .catalog()
        .categories()
        .unwrap()
        .into_iter()
        .find(|c| c.name == category)
        .unwrap_or_else(|| {
            pos.catalog()
                .create_category(MenuCategoryCreate {
                    name: category.to_string(),
                    description: None,
                })
                .unwrap()
        });
    pos.catalog()
        .create_item(MenuItemCreate {
            name: name.to_string(),
            description: None,
            price,
            category_id: cat.id,
            image: None,
            is_stock_managed: Some(managed),
        })
        .unwrap()
}

fn place_order(pos: &Pos, table_id: Option<&str>, lines: &[(&MenuItem, i32)]) -> shared::models::Order {
    let mut cart = Cart::new();
    for (item, quantity) in lines {
        cart.add_item(item);
        let line_id = cart
            .items()
            .iter()
            .find(|l| l.menu_item_id == item.id)
            .unwrap()
            .id
            .clone();
        cart.update_quantity(&line_id, *quantity);
    }
    pos.orders()
        .create_order(
            cart,
            NewOrder {
                table_id: table_id.map(str::to_string),
                cashier_id: "cashier-1".to_string(),
                ..Default::default()
            },
        )
        .unwrap()
}

fn complete(pos: &Pos, order_id: &str) {
    for status in [
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Completed,
    ] {
        pos.orders().update_status(order_id, status).unwrap();
    }
}

#[test]
fn test_dine_in_order_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let pos = open_pos(&dir);

    let table = seed_table(&pos, "Meja 1");
    let nasi = seed_item(&pos, "Makanan", "Nasi Goreng", 25000.0, false);
    let teh = seed_item(&pos, "Minuman", "Es Teh", 10000.0, false);

    // 2 × 25000 + 1 × 10000 with default 10% tax and 5% service charge
    let order = place_order(&pos, Some(&table.id), &[(&nasi, 2), (&teh, 1)]);
    assert_eq!(order.subtotal, 60000.0);
    assert_eq!(order.tax, 6000.0);
    assert_eq!(order.service_charge, 3000.0);
    assert_eq!(order.total, 69000.0);
    assert_eq!(order.status, OrderStatus::Pending);

    let occupied = pos.tables().get(&table.id).unwrap();
    assert_eq!(occupied.status, TableStatus::Occupied);
    assert_eq!(occupied.current_order.as_deref(), Some(order.id.as_str()));
    assert_eq!(
        pos.orders()
            .order_for_table(&table.id)
            .unwrap()
            .unwrap()
            .id,
        order.id
    );

    pos.orders()
        .set_payment(&order.id, PaymentStatus::Paid, Some("cash".to_string()))
        .unwrap();
    complete(&pos, &order.id);

    let released = pos.tables().get(&table.id).unwrap();
    assert_eq!(released.status, TableStatus::Available);
    assert!(released.current_order.is_none());
    assert!(pos.orders().active().unwrap().is_empty());
    assert_eq!(pos.orders().history().unwrap().len(), 1);
}

#[test]
fn test_orders_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let item_id;
    let order_id;
    {
        let pos = open_pos(&dir);
        let nasi = seed_item(&pos, "Makanan", "Nasi Goreng", 25000.0, false);
        item_id = nasi.id.clone();
        order_id = place_order(&pos, None, &[(&nasi, 1)]).id;
    }

    let pos = open_pos(&dir);
    let order = pos.orders().get(&order_id).unwrap();
    assert_eq!(order.items[0].menu_item_id, item_id);
    assert_eq!(order.status, OrderStatus::Pending);
}

#[test]
fn test_state_machine_rejects_skip_and_terminal() {
    let dir = tempfile::tempdir().unwrap();
    let pos = open_pos(&dir);
    let nasi = seed_item(&pos, "Makanan", "Nasi Goreng", 25000.0, false);
    let order = place_order(&pos, None, &[(&nasi, 1)]);

    let err = pos
        .orders()
        .update_status(&order.id, OrderStatus::Served)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderInvalidTransition);

    pos.orders()
        .update_status(&order.id, OrderStatus::Preparing)
        .unwrap();
    pos.orders().cancel(&order.id).unwrap();

    let err = pos
        .orders()
        .update_status(&order.id, OrderStatus::Ready)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderInvalidTransition);
}

#[test]
fn test_stock_flow_with_levels() {
    let dir = tempfile::tempdir().unwrap();
    let pos = open_pos(&dir);
    let nasi = seed_item(&pos, "Makanan", "Nasi Goreng", 25000.0, true);

    assert_eq!(pos.stock().level(&nasi.id).unwrap(), StockLevel::Unknown);

    pos.stock()
        .upsert(
            &nasi.id,
            StockItemUpsert {
                current_stock: 10,
                min_stock: 5,
                max_stock: 50,
                unit: "porsi".to_string(),
            },
        )
        .unwrap();
    assert_eq!(pos.stock().level(&nasi.id).unwrap(), StockLevel::Normal);

    pos.stock().adjust(&nasi.id, -6).unwrap();
    assert_eq!(pos.stock().level(&nasi.id).unwrap(), StockLevel::Low);
    assert_eq!(pos.stock().low_stock().unwrap().len(), 1);

    // clamp at zero
    let record = pos.stock().adjust(&nasi.id, -100).unwrap();
    assert_eq!(record.current_stock, 0);
    assert_eq!(pos.stock().level(&nasi.id).unwrap(), StockLevel::Out);

    pos.stock().adjust(&nasi.id, 4).unwrap();
    assert_eq!(pos.stock().stock_value().unwrap(), 4.0 * 25000.0);
}

#[test]
fn test_sales_report_over_completed_orders() {
    let dir = tempfile::tempdir().unwrap();
    let pos = open_pos(&dir);
    let nasi = seed_item(&pos, "Makanan", "Nasi Goreng", 25000.0, false);
    let teh = seed_item(&pos, "Minuman", "Es Teh", 10000.0, false);

    let o1 = place_order(&pos, None, &[(&nasi, 2), (&teh, 1)]);
    complete(&pos, &o1.id);
    let o2 = place_order(&pos, None, &[(&teh, 3)]);
    complete(&pos, &o2.id);
    // cancelled orders never count
    let o3 = place_order(&pos, None, &[(&nasi, 5)]);
    pos.orders().cancel(&o3.id).unwrap();

    let today = Utc::now().date_naive();
    let report = pos
        .reports()
        .sales_report(ReportPeriod::single_day(today))
        .unwrap();

    assert_eq!(report.summary.total_orders, 2);
    assert_eq!(report.summary.total_sales, o1.total + o2.total);
    assert_eq!(
        report.summary.average_order_value,
        (o1.total + o2.total) / 2.0
    );
    // takeaway orders collapse to one customer
    assert_eq!(report.summary.total_customers, 1);

    // Es Teh sold 4, Nasi Goreng 2
    assert_eq!(report.top_selling_items[0].name, "Es Teh");
    assert_eq!(report.top_selling_items[0].quantity, 4);
    assert_eq!(report.top_selling_items[1].name, "Nasi Goreng");

    assert_eq!(report.daily_sales.len(), 1);
    assert_eq!(report.daily_sales[0].orders, 2);

    let empty = pos
        .reports()
        .sales_report(ReportPeriod::single_day(today.pred_opt().unwrap()))
        .unwrap();
    assert_eq!(empty.summary.average_order_value, 0.0);
}

#[test]
fn test_transaction_search_and_csv_export() {
    let dir = tempfile::tempdir().unwrap();
    let pos = open_pos(&dir);
    let table = seed_table(&pos, "Meja Depan");
    let nasi = seed_item(&pos, "Makanan", "Nasi Goreng", 25000.0, false);

    let seated = place_order(&pos, Some(&table.id), &[(&nasi, 1)]);
    complete(&pos, &seated.id);
    let takeaway = place_order(&pos, None, &[(&nasi, 2)]);

    let found = pos
        .orders()
        .search(&TransactionQuery {
            term: Some("depan".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, seated.id);

    let csv = pos.export().all_transactions_csv().unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "ID Pesanan,Meja,Total,Status,Pembayaran,Tanggal,Waktu");
    assert!(lines.iter().any(|l| l.contains("Meja Depan") && l.contains("Selesai")));
    assert!(lines.iter().any(|l| l.contains(&takeaway.id) && l.contains("Takeaway")));

    let report = pos
        .reports()
        .sales_report(ReportPeriod::single_day(Utc::now().date_naive()))
        .unwrap();
    let json = pos_engine::export::report_json(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["topSellingItems"].is_array());
}

#[test]
fn test_backup_roundtrip_into_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let pos = open_pos(&dir);
    seed_table(&pos, "Meja 1");
    let nasi = seed_item(&pos, "Makanan", "Nasi Goreng", 25000.0, false);
    let order = place_order(&pos, None, &[(&nasi, 1)]);
    pos.users()
        .create(UserCreate {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            role: UserRole::Admin,
        })
        .unwrap();

    let json = pos.backup().export_backup().unwrap();

    let other_dir = tempfile::tempdir().unwrap();
    let other = open_pos(&other_dir);
    other.backup().restore_backup(&json).unwrap();

    assert_eq!(other.tables().list().unwrap().len(), 1);
    assert_eq!(other.catalog().menu_items().unwrap().len(), 1);
    assert_eq!(other.orders().get(&order.id).unwrap().total, order.total);
    assert_eq!(other.users().list().unwrap().len(), 1);

    // malformed restore leaves everything intact
    let err = other.backup().restore_backup("not json").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);
    assert_eq!(other.tables().list().unwrap().len(), 1);
}

#[test]
fn test_settings_drive_pricing_and_labels() {
    let dir = tempfile::tempdir().unwrap();
    let pos = open_pos(&dir);
    let nasi = seed_item(&pos, "Makanan", "Nasi Goreng", 25000.0, false);

    let mut settings = pos.settings().get().unwrap();
    settings.enable_tax = false;
    settings.enable_service_charge = false;
    pos.settings().save(settings).unwrap();

    let order = place_order(&pos, None, &[(&nasi, 2)]);
    assert_eq!(order.total, 50000.0);

    // existing orders keep their captured totals when rates change later
    let mut settings = pos.settings().get().unwrap();
    settings.enable_tax = true;
    pos.settings().save(settings).unwrap();
    assert_eq!(pos.orders().get(&order.id).unwrap().total, 50000.0);
}

#[test]
fn test_category_cascade_keeps_orders_readable() {
    let dir = tempfile::tempdir().unwrap();
    let pos = open_pos(&dir);
    let nasi = seed_item(&pos, "Makanan", "Nasi Goreng", 25000.0, false);
    let order = place_order(&pos, None, &[(&nasi, 1)]);
    complete(&pos, &order.id);

    let category_id = nasi.category_id.clone();
    pos.catalog().delete_category(&category_id).unwrap();
    assert!(pos.catalog().menu_items().unwrap().is_empty());

    // the order still carries its captured line
    let order = pos.orders().get(&order.id).unwrap();
    assert_eq!(order.items[0].price, 25000.0);

    // deleted menu items drop out of the ranking instead of failing
    let report = pos
        .reports()
        .sales_report(ReportPeriod::single_day(Utc::now().date_naive()))
        .unwrap();
    assert!(report.top_selling_items.is_empty());
    assert_eq!(report.sales_by_category[0].name, "no category");
}
