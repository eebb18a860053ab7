use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One line in a cart. `food_item` is an owned snapshot of the catalog
/// document and `price` is copied at add-time, so later catalog changes
/// never reprice a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub id: Uuid,
    #[serde(rename = "foodItem")]
    pub food_item: Value,
    pub quantity: u32,
    pub size: String,
    pub price: f64,
}

/// Catalog id embedded in an item snapshot. Documents imported from the
/// seed data carry `_id`, newer ones `id`.
fn snapshot_id(food_item: &Value) -> Option<String> {
    let id = food_item.get("id").or_else(|| food_item.get("_id"))?;
    match id {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Merge an item into the line sequence: a line with the same catalog id
/// and the same size absorbs the quantity, anything else becomes a new
/// line. The existing line's price wins on a merge. A snapshot without a
/// catalog id never merges; it always appends.
pub fn add_line(lines: &mut Vec<CartLine>, food_item: Value, quantity: u32, size: String, price: f64) {
    let incoming_id = snapshot_id(&food_item);
    let existing = match incoming_id {
        Some(ref id) => lines
            .iter_mut()
            .find(|line| snapshot_id(&line.food_item).as_ref() == Some(id) && line.size == size),
        None => None,
    };

    match existing {
        Some(line) => line.quantity += quantity,
        None => lines.push(CartLine {
            id: Uuid::new_v4(),
            food_item,
            quantity,
            size,
            price,
        }),
    }
}

/// Overwrite a line's quantity; zero or negative removes the line so the
/// quantity >= 1 invariant holds. Returns false if the line is absent.
pub fn set_quantity(lines: &mut Vec<CartLine>, line_id: Uuid, quantity: i64) -> bool {
    let Some(index) = lines.iter().position(|line| line.id == line_id) else {
        return false;
    };
    if quantity <= 0 {
        lines.remove(index);
    } else {
        lines[index].quantity = quantity as u32;
    }
    true
}

/// Remove a line by id; removing an absent line is a no-op.
pub fn remove_line(lines: &mut Vec<CartLine>, line_id: Uuid) {
    lines.retain(|line| line.id != line_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pizza() -> Value {
        json!({"id": "pizza-1", "name": "Margherita", "img": "https://img.example/p.png"})
    }

    #[test]
    fn same_item_and_size_merges_into_one_line() {
        let mut lines = Vec::new();
        add_line(&mut lines, pizza(), 1, "M".into(), 199.0);
        add_line(&mut lines, pizza(), 1, "M".into(), 199.0);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].price, 199.0);
    }

    #[test]
    fn new_size_creates_a_distinct_line() {
        let mut lines = Vec::new();
        add_line(&mut lines, pizza(), 1, "M".into(), 199.0);
        add_line(&mut lines, pizza(), 1, "L".into(), 299.0);

        assert_eq!(lines.len(), 2);
        assert_ne!(lines[0].id, lines[1].id);
    }

    #[test]
    fn merge_keeps_the_existing_price() {
        let mut lines = Vec::new();
        add_line(&mut lines, pizza(), 1, "M".into(), 199.0);
        add_line(&mut lines, pizza(), 3, "M".into(), 999.0);

        assert_eq!(lines[0].quantity, 4);
        assert_eq!(lines[0].price, 199.0);
    }

    #[test]
    fn legacy_underscore_id_matches_plain_id() {
        let mut lines = Vec::new();
        add_line(&mut lines, json!({"_id": "pizza-1"}), 1, "M".into(), 199.0);
        add_line(&mut lines, json!({"_id": "pizza-1"}), 2, "M".into(), 199.0);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
    }

    #[test]
    fn snapshots_without_ids_never_merge() {
        let mut lines = Vec::new();
        add_line(&mut lines, json!({"name": "Margherita"}), 1, "M".into(), 199.0);
        add_line(&mut lines, json!({"name": "Farmhouse"}), 1, "M".into(), 249.0);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].quantity, 1);
        assert_eq!(lines[1].quantity, 1);
    }

    #[test]
    fn set_quantity_overwrites_instead_of_adding() {
        let mut lines = Vec::new();
        add_line(&mut lines, pizza(), 5, "M".into(), 199.0);
        let line_id = lines[0].id;

        assert!(set_quantity(&mut lines, line_id, 2));
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn zero_or_negative_quantity_removes_the_line() {
        for qty in [0, -3] {
            let mut lines = Vec::new();
            add_line(&mut lines, pizza(), 2, "M".into(), 199.0);
            let line_id = lines[0].id;

            assert!(set_quantity(&mut lines, line_id, qty));
            assert!(lines.is_empty());
        }
    }

    #[test]
    fn set_quantity_reports_missing_line() {
        let mut lines = Vec::new();
        assert!(!set_quantity(&mut lines, Uuid::new_v4(), 3));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut lines = Vec::new();
        add_line(&mut lines, pizza(), 1, "M".into(), 199.0);
        let line_id = lines[0].id;

        remove_line(&mut lines, line_id);
        remove_line(&mut lines, line_id);
        assert!(lines.is_empty());
    }
}
