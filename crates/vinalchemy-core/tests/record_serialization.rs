use serde_json::json;
use vinalchemy_core::{Color, Sweetness, WineRecord};

#[test]
fn serializes_record_with_stable_field_names() {
    let record = WineRecord {
        id: 1,
        order_id: "ORD-2025-Q7M2ZP".to_string(),
        order_date: "2025-01-03T10:15:00Z".to_string(),
        reference: "WN-2021-KAK-0001-7QX".to_string(),
        name: None,
        color: Color::Orange,
        country: "Georgia".to_string(),
        region: "Kakheti".to_string(),
        appellation: "Kakheti PDO".to_string(),
        vintage: 2021,
        grapes: vec!["Rkatsiteli".to_string()],
        alcohol_percent: 12.9,
        bottle_size_l: 0.75,
        sweetness: Sweetness::OffDry,
        tannin: 3,
        acidity: 3,
        rating: 88.4,
        price: "23,15€".to_string(),
        price_eur: 23.15,
        producer: "Marani Nikoladze".to_string(),
        stock_quantity: 140,
    };

    let value = serde_json::to_value(&record).expect("serialize record");
    let expected = json!({
        "id": 1,
        "order_id": "ORD-2025-Q7M2ZP",
        "order_date": "2025-01-03T10:15:00Z",
        "reference": "WN-2021-KAK-0001-7QX",
        "name": null,
        "color": "orange",
        "country": "Georgia",
        "region": "Kakheti",
        "appellation": "Kakheti PDO",
        "vintage": 2021,
        "grapes": ["Rkatsiteli"],
        "alcohol_percent": 12.9,
        "bottle_size_l": 0.75,
        "sweetness": "off-dry",
        "tannin": 3,
        "acidity": 3,
        "rating": 88.4,
        "price": "23,15€",
        "price_eur": 23.15,
        "producer": "Marani Nikoladze",
        "stock_quantity": 140
    });
    assert_eq!(value, expected);

    let parsed: WineRecord = serde_json::from_value(value).expect("deserialize record");
    assert_eq!(parsed, record);
}
