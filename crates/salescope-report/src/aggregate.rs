//! Aggregation of a dataset snapshot into the report's summary views.

use std::collections::{BTreeMap, HashMap};

use salescope_core::Sale;

/// How a view is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

/// One named summary view: category labels mapped to numeric values, in the
/// order they should be drawn.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub title: &'static str,
    pub value_label: &'static str,
    pub kind: ChartKind,
    pub entries: Vec<(String, f64)>,
}

const TOP_N: usize = 5;

/// Build the four report views from a dataset snapshot, in report order.
///
/// An empty dataset yields four empty views; the pipeline downstream still
/// produces a (title-only) document.
pub fn summarize(sales: &[Sale]) -> Vec<SummaryView> {
    vec![
        SummaryView {
            title: "Sales by Customer",
            value_label: "Revenue",
            kind: ChartKind::Bar,
            entries: top_n(sum_by(sales, |s| s.customer_name.clone(), |s| s.total)),
        },
        SummaryView {
            title: "Revenue by Product",
            value_label: "Revenue",
            kind: ChartKind::Bar,
            entries: top_n(sum_by(sales, |s| s.product.clone(), |s| s.total)),
        },
        SummaryView {
            title: "Units Sold by Product",
            value_label: "Units",
            kind: ChartKind::Bar,
            entries: top_n(sum_by(sales, |s| s.product.clone(), |s| f64::from(s.quantity))),
        },
        SummaryView {
            title: "Monthly Sales",
            value_label: "Revenue",
            kind: ChartKind::Line,
            entries: monthly_series(sales),
        },
    ]
}

/// Sum `value` per `key`, preserving first-seen key order.
fn sum_by<K, V>(sales: &[Sale], key: K, value: V) -> Vec<(String, f64)>
where
    K: Fn(&Sale) -> String,
    V: Fn(&Sale) -> f64,
{
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();
    for sale in sales {
        let k = key(sale);
        if !totals.contains_key(&k) {
            order.push(k.clone());
        }
        *totals.entry(k).or_insert(0.0) += value(sale);
    }
    order
        .into_iter()
        .map(|k| {
            let v = totals[&k];
            (k, v)
        })
        .collect()
}

/// Keep the `TOP_N` largest entries, descending. The sort is stable, so
/// equal values keep their first-seen order.
fn top_n(mut entries: Vec<(String, f64)>) -> Vec<(String, f64)> {
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries.truncate(TOP_N);
    entries
}

/// Revenue per calendar month in chronological order — the full series,
/// never truncated.
fn monthly_series(sales: &[Sale]) -> Vec<(String, f64)> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for sale in sales {
        *months
            .entry(sale.sale_date.format("%Y-%m").to_string())
            .or_insert(0.0) += sale.total;
    }
    months.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sale(id: i64, date: (i32, u32, u32), customer: &str, product: &str, quantity: u32, total: f64) -> Sale {
        Sale {
            sale_id: id,
            sale_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            customer_id: id,
            customer_name: customer.to_string(),
            product: product.to_string(),
            quantity,
            unit_price: 1.0,
            total,
        }
    }

    fn view<'a>(views: &'a [SummaryView], title: &str) -> &'a SummaryView {
        views.iter().find(|v| v.title == title).unwrap()
    }

    #[test]
    fn customers_are_summed_and_ordered_descending() {
        let sales = vec![
            sale(1, (2026, 1, 5), "A", "Widget", 1, 100.0),
            sale(2, (2026, 1, 6), "B", "Widget", 1, 50.0),
            sale(3, (2026, 1, 7), "C", "Widget", 1, 150.0),
            sale(4, (2026, 1, 8), "A", "Widget", 1, 25.0),
        ];
        let views = summarize(&sales);
        let by_customer = &view(&views, "Sales by Customer").entries;
        assert_eq!(
            by_customer,
            &vec![
                ("C".to_string(), 150.0),
                ("A".to_string(), 125.0),
                ("B".to_string(), 50.0),
            ]
        );
    }

    #[test]
    fn top_five_keeps_only_the_largest() {
        let sales: Vec<Sale> = (0..7)
            .map(|i| {
                sale(
                    i,
                    (2026, 1, 5),
                    &format!("customer-{i}"),
                    "Widget",
                    1,
                    f64::from(i as u32) * 10.0,
                )
            })
            .collect();
        let views = summarize(&sales);
        let by_customer = &view(&views, "Sales by Customer").entries;

        assert_eq!(by_customer.len(), 5);
        // The 5 highest of 0..=60, descending.
        let values: Vec<f64> = by_customer.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![60.0, 50.0, 40.0, 30.0, 20.0]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let sales = vec![
            sale(1, (2026, 1, 5), "A", "Widget", 1, 50.0),
            sale(2, (2026, 1, 6), "B", "Widget", 1, 50.0),
            sale(3, (2026, 1, 7), "C", "Widget", 1, 50.0),
        ];
        let views = summarize(&sales);
        let names: Vec<&str> = view(&views, "Sales by Customer")
            .entries
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn units_view_sums_quantities() {
        let sales = vec![
            sale(1, (2026, 1, 5), "A", "Widget", 3, 30.0),
            sale(2, (2026, 1, 6), "B", "Widget", 2, 20.0),
            sale(3, (2026, 1, 7), "C", "Gadget", 7, 70.0),
        ];
        let views = summarize(&sales);
        let units = &view(&views, "Units Sold by Product").entries;
        assert_eq!(
            units,
            &vec![("Gadget".to_string(), 7.0), ("Widget".to_string(), 5.0)]
        );
    }

    #[test]
    fn monthly_series_is_chronological_across_years() {
        let sales = vec![
            sale(1, (2026, 1, 10), "A", "Widget", 1, 10.0),
            sale(2, (2025, 12, 2), "A", "Widget", 1, 20.0),
            sale(3, (2025, 11, 20), "A", "Widget", 1, 30.0),
            sale(4, (2026, 1, 28), "A", "Widget", 1, 40.0),
        ];
        let views = summarize(&sales);
        let monthly = &view(&views, "Monthly Sales").entries;
        assert_eq!(
            monthly,
            &vec![
                ("2025-11".to_string(), 30.0),
                ("2025-12".to_string(), 20.0),
                ("2026-01".to_string(), 50.0),
            ]
        );
    }

    #[test]
    fn monthly_series_is_never_truncated() {
        let sales: Vec<Sale> = (1..=7)
            .map(|m| sale(i64::from(m), (2026, m, 1), "A", "Widget", 1, 10.0))
            .collect();
        let views = summarize(&sales);
        assert_eq!(view(&views, "Monthly Sales").entries.len(), 7);
    }

    #[test]
    fn empty_dataset_yields_four_empty_views() {
        let views = summarize(&[]);
        assert_eq!(views.len(), 4);
        assert!(views.iter().all(|v| v.entries.is_empty()));
    }
}
