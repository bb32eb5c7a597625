//! Shopping-list aggregation and document rendering.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Header line of every rendered shopping list.
pub const SHOPPING_LIST_HEADER: &str = "Shopping List";

/// Attachment filename used by the download endpoint.
pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// A product amount. Coming out of storage it is one recipe's ingredient line;
/// after [`aggregate`] it is the total across every planned recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Sum lines that share a product name and measurement unit.
///
/// Same name with a different unit stays a separate line. The result is
/// ordered by name, then unit.
pub fn aggregate<I>(lines: I) -> Vec<ShoppingListItem>
where
    I: IntoIterator<Item = ShoppingListItem>,
{
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for line in lines {
        *totals
            .entry((line.name, line.measurement_unit))
            .or_default() += line.amount;
    }
    totals
        .into_iter()
        .map(|((name, measurement_unit), amount)| ShoppingListItem {
            name,
            measurement_unit,
            amount,
        })
        .collect()
}

/// Render the plain-text shopping list.
///
/// The header comes first, then one `"{name} - {amount} {unit}"` line per item,
/// every line newline-terminated. Items are written in the order given.
pub fn render_shopping_list(items: &[ShoppingListItem]) -> String {
    let mut out = String::with_capacity(SHOPPING_LIST_HEADER.len() + 1 + items.len() * 32);
    out.push_str(SHOPPING_LIST_HEADER);
    out.push('\n');
    for item in items {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{} - {} {}", item.name, item.amount, item.measurement_unit);
    }
    out
}
