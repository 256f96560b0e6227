//! Sales reporting
//!
//! Reports are recomputed from the order collection on every call; nothing
//! is cached or stored. Only completed orders inside the inclusive date
//! range count.

use crate::repository::Repository;
use crate::storage::CollectionStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MenuCategory, MenuItem, Order, OrderStatus};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Inclusive calendar-day range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> AppResult<Self> {
        if from > to {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "report period start is after its end",
            ));
        }
        Ok(Self { from, to })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }

    fn label(&self) -> String {
        format!(
            "{} - {}",
            self.from.format("%d %b %Y"),
            self.to.format("%d %b %Y")
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_sales: f64,
    pub total_orders: usize,
    pub total_customers: usize,
    pub average_order_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopSellingItem {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: i32,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    pub name: String,
    pub revenue: f64,
    pub orders: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    /// ISO calendar day, e.g. "2026-08-25"
    pub date: String,
    pub revenue: f64,
    pub orders: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub period: String,
    pub summary: ReportSummary,
    pub top_selling_items: Vec<TopSellingItem>,
    pub sales_by_category: Vec<CategorySales>,
    pub daily_sales: Vec<DailySales>,
}

/// Label used when a line item's category cannot be resolved
const NO_CATEGORY: &str = "no category";

/// Build a sales report from raw collections.
///
/// Pure over its inputs; the service wrapper below loads them from the
/// store.
pub fn build_report(
    orders: &[Order],
    menu_items: &[MenuItem],
    categories: &[MenuCategory],
    period: ReportPeriod,
) -> SalesReport {
    let completed: Vec<&Order> = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
        .filter(|o| period.contains(o.created_at.date_naive()))
        .collect();

    let total_sales: f64 = completed.iter().map(|o| o.total).sum();
    let total_orders = completed.len();
    let average_order_value = if total_orders == 0 {
        0.0
    } else {
        total_sales / total_orders as f64
    };

    // a customer is whoever the order can be attributed to
    let customers: HashSet<&str> = completed
        .iter()
        .map(|o| {
            o.customer_id
                .as_deref()
                .or(o.table_id.as_deref())
                .unwrap_or("takeaway")
        })
        .collect();

    // quantity per menu item, first-seen order preserved for stable ties
    let mut item_order: Vec<String> = Vec::new();
    let mut item_totals: HashMap<String, (i32, f64)> = HashMap::new();
    for order in &completed {
        for line in &order.items {
            let entry = item_totals.entry(line.menu_item_id.clone()).or_insert_with(|| {
                item_order.push(line.menu_item_id.clone());
                (0, 0.0)
            });
            entry.0 += line.quantity;
            entry.1 += line.line_total();
        }
    }
    let mut top_selling_items: Vec<TopSellingItem> = item_order
        .iter()
        .filter_map(|id| {
            // lines whose menu item no longer exists are skipped
            let item = menu_items.iter().find(|m| &m.id == id)?;
            let (quantity, revenue) = item_totals[id];
            Some(TopSellingItem {
                menu_item_id: id.clone(),
                name: item.name.clone(),
                quantity,
                revenue,
            })
        })
        .collect();
    top_selling_items.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    top_selling_items.truncate(10);

    let mut category_order: Vec<String> = Vec::new();
    let mut category_totals: HashMap<String, (f64, HashSet<&str>)> = HashMap::new();
    for order in &completed {
        for line in &order.items {
            let name = menu_items
                .iter()
                .find(|m| m.id == line.menu_item_id)
                .and_then(|m| categories.iter().find(|c| c.id == m.category_id))
                .map(|c| c.name.clone())
                .unwrap_or_else(|| NO_CATEGORY.to_string());
            let entry = category_totals.entry(name.clone()).or_insert_with(|| {
                category_order.push(name);
                (0.0, HashSet::new())
            });
            entry.0 += line.line_total();
            entry.1.insert(order.id.as_str());
        }
    }
    let mut sales_by_category: Vec<CategorySales> = category_order
        .iter()
        .map(|name| {
            let (revenue, orders) = &category_totals[name];
            CategorySales {
                name: name.clone(),
                revenue: *revenue,
                orders: orders.len(),
            }
        })
        .collect();
    sales_by_category.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));

    // BTreeMap keeps days ascending
    let mut per_day: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for order in &completed {
        let entry = per_day.entry(order.created_at.date_naive()).or_default();
        entry.0 += order.total;
        entry.1 += 1;
    }
    let daily_sales = per_day
        .into_iter()
        .map(|(date, (revenue, orders))| DailySales {
            date: date.format("%Y-%m-%d").to_string(),
            revenue,
            orders,
        })
        .collect();

    SalesReport {
        period: period.label(),
        summary: ReportSummary {
            total_sales,
            total_orders,
            total_customers: customers.len(),
            average_order_value,
        },
        top_selling_items,
        sales_by_category,
        daily_sales,
    }
}

#[derive(Clone)]
pub struct ReportService {
    orders: Repository<Order>,
    items: Repository<MenuItem>,
    categories: Repository<MenuCategory>,
}

impl ReportService {
    pub fn new(store: CollectionStore) -> Self {
        Self {
            orders: Repository::new(store.clone()),
            items: Repository::new(store.clone()),
            categories: Repository::new(store),
        }
    }

    pub fn sales_report(&self, period: ReportPeriod) -> AppResult<SalesReport> {
        let orders = self.orders.list()?;
        let items = self.items.list()?;
        let categories = self.categories.list()?;
        Ok(build_report(&orders, &items, &categories, period))
    }
}
