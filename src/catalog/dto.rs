use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub success: bool,
    #[serde(rename = "foodItems")]
    pub food_items: Vec<serde_json::Value>,
    #[serde(rename = "foodCategory")]
    pub food_category: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_keys_match_client_contract() {
        let resp = CatalogResponse {
            success: true,
            food_items: vec![json!({"name": "Margherita"})],
            food_category: vec![json!({"CategoryName": "Pizza"})],
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["foodItems"][0]["name"], "Margherita");
        assert_eq!(value["foodCategory"][0]["CategoryName"], "Pizza");
    }
}
