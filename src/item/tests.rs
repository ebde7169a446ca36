// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod item_tests {
    use crate::attribute::{AttributeKind, Value};
    use crate::common::Error;
    use crate::item::{FieldValue, Hydrator, Item, ItemHydrator, Row};
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        value.as_object().cloned().expect("row literal")
    }

    #[test]
    fn row_round_trip() {
        let item = Item::new("Books")
            .with("isbn", "978-0441013593")
            .unwrap()
            .with("pages", 412)
            .unwrap()
            .with("subtitle", "")
            .unwrap()
            .with("tags", json!(["scifi", "classic"]))
            .unwrap();
        assert_eq!(item.len(), 4);

        let wire = item.to_row();
        assert!(!wire.contains_key("subtitle"));
        assert_eq!(wire["pages"], json!({"N": "412"}));
        assert_eq!(wire["tags"], json!({"SS": ["classic", "scifi"]}));

        let back = Item::from_row("Books", &wire).unwrap();
        assert_eq!(back.table(), "Books");
        assert_eq!(back.get("isbn").unwrap().kind(), AttributeKind::String);
        assert_eq!(back.field_value("pages"), Some(Value::from(412)));
        assert!(back.field_value("subtitle").is_none());
    }

    #[test]
    fn hydrators() {
        let raw = row(json!({"id": {"N": "3"}, "name": {"S": "three"}}));
        let item = ItemHydrator.hydrate("Numbers", &raw).unwrap();
        assert_eq!(item.get("name").unwrap().to_string(), "three");

        let names = |_: &str, row: &Row| -> Result<String, Error> {
            row.get("name")
                .and_then(|v| v.get("S"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .ok_or_else(|| Error::Response("name".to_string()))
        };
        assert_eq!(names.hydrate("Numbers", &raw).unwrap(), "three");

        let bad = row(json!({"id": {"BOOL": true}}));
        assert!(matches!(
            ItemHydrator.hydrate("Numbers", &bad),
            Err(Error::InvalidKind(_))
        ));
    }

    #[test]
    fn mutation() {
        let mut item = Item::new("T");
        item.set_value("a", 1).unwrap().set_value("b", "x").unwrap();
        assert_eq!(item.iter().map(|(n, _)| n).collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(item.remove("a").is_some());
        assert!(item.get("a").is_none());
        assert!(!item.is_empty());
    }
}
