use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Whether an entity came from the store or was built in memory.
///
/// Decides between the insert and update procedure on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    /// Never read from the store; saving inserts it.
    New,
    /// Read from the store; saving overwrites every field.
    Loaded,
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    /// Generated when the request omits it
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[schema(example = "Widget")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    #[schema(example = 9.99)]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    #[schema(example = 1.0)]
    pub delivery_price: Decimal,
}

/// Option (variant) of a product, such as a colour or size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ProductOption {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Owning product; taken from the route, never from the body
    #[serde(skip)]
    pub product_id: Uuid,
    #[schema(example = "Red")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ProductList {
    pub items: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ProductOptionList {
    pub items: Vec<ProductOption>,
}

/// Query parameters for listing products
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Case-sensitive substring of the product name
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_uses_pascal_case() {
        let product = Product {
            id: Uuid::nil(),
            name: "Widget".into(),
            description: None,
            price: Decimal::new(999, 2),
            delivery_price: Decimal::new(100, 2),
        };

        let json = serde_json::to_string(&product).unwrap();
        assert_eq!(
            json,
            r#"{"Id":"00000000-0000-0000-0000-000000000000","Name":"Widget","Description":null,"Price":9.99,"DeliveryPrice":1.00}"#
        );
    }

    #[test]
    fn test_prices_keep_every_digit() {
        let body = r#"{"Name":"Precise","Price":1.0000000000000000001,"DeliveryPrice":12345678901234567.89}"#;
        let product: Product = serde_json::from_str(body).unwrap();

        assert_eq!(product.price, Decimal::from_str_exact("1.0000000000000000001").unwrap());
        assert_eq!(
            product.delivery_price,
            Decimal::from_str_exact("12345678901234567.89").unwrap()
        );

        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains(r#""Price":1.0000000000000000001"#), "{json}");
        assert!(json.contains(r#""DeliveryPrice":12345678901234567.89"#), "{json}");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let product: Product = serde_json::from_value(json!({ "Name": "Widget" })).unwrap();

        assert!(!product.id.is_nil());
        assert_eq!(product.description, None);
        assert_eq!(product.price, Decimal::ZERO);
        assert_eq!(product.delivery_price, Decimal::ZERO);
    }

    #[test]
    fn test_supplied_id_is_kept() {
        let id = Uuid::new_v4();
        let product: Product =
            serde_json::from_value(json!({ "Id": id, "Name": "Widget", "Price": 9.99 })).unwrap();

        assert_eq!(product.id, id);
        assert_eq!(product.price, Decimal::new(999, 2));
    }

    #[test]
    fn test_option_ignores_product_id() {
        let option: ProductOption = serde_json::from_value(json!({
            "Name": "Red",
            "ProductId": Uuid::new_v4(),
        }))
        .unwrap();
        assert!(option.product_id.is_nil());

        let value = serde_json::to_value(&option).unwrap();
        assert!(value.get("ProductId").is_none());
    }

    #[test]
    fn test_list_envelope() {
        let list = ProductOptionList { items: vec![] };
        assert_eq!(serde_json::to_value(&list).unwrap(), json!({ "Items": [] }));
    }
}
