// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod table_tests {
    use crate::attribute::AttributeKind;
    use crate::common::Error;
    use crate::table::{
        KeySchema, ProvisionedThroughput, TableCollection, TableDescription, TableStatus,
    };
    use serde_json::json;

    #[test]
    fn schema_wire() {
        let schema = KeySchema::hash("id", AttributeKind::String)
            .unwrap()
            .range("created", AttributeKind::Number)
            .unwrap();
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({
                "HashKeyElement": {"AttributeName": "id", "AttributeType": "S"},
                "RangeKeyElement": {"AttributeName": "created", "AttributeType": "N"}
            })
        );
        assert!(matches!(
            KeySchema::hash("tags", AttributeKind::StringSet),
            Err(Error::InvalidKind(_))
        ));

        assert_eq!(
            serde_json::to_value(ProvisionedThroughput::new(5, 10)).unwrap(),
            json!({"ReadCapacityUnits": 5, "WriteCapacityUnits": 10})
        );
    }

    #[test]
    fn description_parsing() {
        let description: TableDescription = serde_json::from_value(json!({
            "CreationDateTime": 1.3e9,
            "ItemCount": 12,
            "KeySchema": {"HashKeyElement": {"AttributeName": "id", "AttributeType": "N"}},
            "ProvisionedThroughput": {
                "LastIncreaseDateTime": 1.31e9,
                "ReadCapacityUnits": 3,
                "WriteCapacityUnits": 1
            },
            "TableName": "Books",
            "TableSizeBytes": 2048,
            "TableStatus": "ACTIVE"
        }))
        .unwrap();
        assert_eq!(description.table_name, "Books");
        assert_eq!(description.table_status, TableStatus::Active);
        assert_eq!(description.item_count, Some(12));
        assert_eq!(
            description.key_schema.unwrap().hash.kind,
            AttributeKind::Number
        );
        assert_eq!(
            description.provisioned_throughput.unwrap().read_capacity_units,
            3
        );

        let creating: TableDescription =
            serde_json::from_value(json!({"TableName": "New", "TableStatus": "CREATING"})).unwrap();
        assert_eq!(creating.table_status.to_string(), "CREATING");
        assert!(creating.key_schema.is_none());
    }

    #[test]
    fn table_collection() {
        let mut tables = TableCollection::new(Some("B".to_string()));
        tables.add("A".to_string());
        tables.add("B".to_string());
        assert!(tables.more());
        assert_eq!(tables.len(), 2);
        assert_eq!(tables.last_evaluated_table_name(), Some("B"));
        assert!(!TableCollection::new(None).more());
    }
}
