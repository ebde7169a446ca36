// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod connection_tests {
    use crate::attribute::{
        Attribute, AttributeKind, AttributeUpdate, ComparisonOperator, Key, Value,
    };
    use crate::collection::NextContext;
    use crate::common::{Error, RemoteError};
    use crate::connection::{Connection, Operation, Response, Transport};
    use crate::context::{
        BatchGetContext, BatchWriteContext, Parameters, PutContext, QueryContext, ReturnValues,
        ScanContext,
    };
    use crate::item::{Item, ItemHydrator, Row};
    use crate::log::{LogLevel, StringLogger};
    use crate::table::{KeySchema, ProvisionedThroughput, TableStatus};
    use async_trait::async_trait;
    use serde_json::{json, Value as Json};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Replays canned responses and records every call.
    #[derive(Default)]
    struct Scripted {
        responses: Mutex<VecDeque<Result<Json, String>>>,
        calls: Mutex<Vec<(Operation, Parameters)>>,
    }

    impl Scripted {
        fn new(responses: impl IntoIterator<Item = Json>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().map(Ok).collect()),
                calls: Mutex::default(),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from([Err(message.to_string())])),
                calls: Mutex::default(),
            }
        }

        fn calls(&self) -> Vec<(Operation, Json)> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(operation, parameters)| (*operation, Json::Object(parameters.clone())))
                .collect()
        }
    }

    #[async_trait]
    impl Transport for Scripted {
        async fn call(
            &self,
            operation: Operation,
            parameters: Parameters,
        ) -> Result<Response, RemoteError> {
            self.calls.lock().unwrap().push((operation, parameters));
            match self.responses.lock().unwrap().pop_front() {
                Some(Ok(Json::Object(response))) => Ok(response),
                Some(Ok(other)) => Err(format!("bad script entry {other}").into()),
                Some(Err(message)) => Err(message.into()),
                None => Err("script exhausted".into()),
            }
        }
    }

    fn scripted(responses: impl IntoIterator<Item = Json>) -> Connection<Scripted> {
        Connection::new(Scripted::new(responses))
    }

    fn title(_table: &str, row: &Row) -> Result<String, Error> {
        row.get("title")
            .and_then(|title| title["S"].as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::String("no title".to_string()))
    }

    #[test]
    fn operation_target() {
        assert_eq!(Operation::BatchWriteItem.target(), "DynamoDB_20111205.BatchWriteItem");
        assert_eq!(Operation::Query.to_string(), "Query");
    }

    #[tokio::test]
    async fn put_sends_item_and_returns_old_attributes() {
        let mut connection = scripted([json!({
            "Attributes": {"title": {"S": "Old"}, "tags": {"SS": ["a", "b"]}},
            "ConsumedCapacityUnits": 1
        })]);
        let item = Item::new("Books")
            .with("isbn", "123")
            .unwrap()
            .with("title", "New")
            .unwrap();
        let context = PutContext::new()
            .expected("title", "Old")
            .unwrap()
            .return_values(ReturnValues::AllOld);

        let old = connection
            .put(&item, Some(&context))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(old["title"].value(), Value::from("Old"));
        assert_eq!(old["tags"].len(), 2);
        assert_eq!(connection.consumed_write_units(Some("Books")), 1.0);

        let calls = connection.transport().calls();
        assert_eq!(calls.len(), 1);
        let (operation, parameters) = &calls[0];
        assert_eq!(*operation, Operation::PutItem);
        assert_eq!(
            *parameters,
            json!({
                "TableName": "Books",
                "Item": {"isbn": {"N": "123"}, "title": {"S": "New"}},
                "Expected": {"title": {"Value": {"S": "Old"}}},
                "ReturnValues": "ALL_OLD"
            })
        );
    }

    #[tokio::test]
    async fn writes_require_a_table() {
        let mut connection = scripted([]);
        let item = Item::new("").with("id", 1).unwrap();
        assert!(matches!(
            connection.put(&item, None).await,
            Err(Error::MissingTable(_))
        ));
        assert!(matches!(
            connection.delete("", &Key::hash(1).unwrap(), None).await,
            Err(Error::MissingTable(_))
        ));
        assert!(connection.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn get_hydrates_or_returns_none() {
        let mut connection = scripted([
            json!({"Item": {"id": {"N": "7"}, "title": {"S": "Dune"}}, "ConsumedCapacityUnits": 0.5}),
            json!({"ConsumedCapacityUnits": 0.5}),
        ]);
        let key = Key::hash(7).unwrap();

        let item = connection
            .get("Books", &key, &ItemHydrator, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item.table(), "Books");
        assert_eq!(item.get("title").unwrap().value(), Value::from("Dune"));

        let missing = connection.get("Books", &key, &title, None).await.unwrap();
        assert!(missing.is_none());
        assert_eq!(connection.consumed_read_units(None), 1.0);

        let calls = connection.transport().calls();
        assert_eq!(calls[0].1["Key"], json!({"HashKeyElement": {"N": "7"}}));
    }

    #[tokio::test]
    async fn update_sends_attribute_updates() {
        let mut connection = scripted([json!({"ConsumedCapacityUnits": 1})]);
        let update = AttributeUpdate::new()
            .put("title", "Dune")
            .unwrap()
            .add("reads", 1)
            .unwrap()
            .delete("draft");

        let old = connection
            .update("Books", &Key::hash_range("a", 2).unwrap(), &update, None)
            .await
            .unwrap();
        assert!(old.is_none());

        let calls = connection.transport().calls();
        let (operation, parameters) = &calls[0];
        assert_eq!(*operation, Operation::UpdateItem);
        assert_eq!(
            parameters["AttributeUpdates"],
            json!({
                "draft": {"Action": "DELETE"},
                "reads": {"Action": "ADD", "Value": {"N": "1"}},
                "title": {"Action": "PUT", "Value": {"S": "Dune"}}
            })
        );
        assert_eq!(
            parameters["Key"],
            json!({"HashKeyElement": {"S": "a"}, "RangeKeyElement": {"N": "2"}})
        );
    }

    #[tokio::test]
    async fn query_paginates_with_next_context() {
        let last_key = json!({"HashKeyElement": {"S": "u1"}, "RangeKeyElement": {"N": "2"}});
        let mut connection = scripted([
            json!({
                "Count": 2,
                "Items": [
                    {"title": {"S": "first"}},
                    {"title": {"S": "second"}}
                ],
                "LastEvaluatedKey": last_key.clone(),
                "ConsumedCapacityUnits": 1
            }),
            json!({
                "Count": 1,
                "Items": [{"title": {"S": "third"}}],
                "ConsumedCapacityUnits": 1
            }),
        ]);
        let hash = Attribute::auto("u1").unwrap();
        let context = QueryContext::with_range_condition(ComparisonOperator::Gt, 0)
            .unwrap()
            .limit(2);

        let mut page = connection
            .query("Posts", &hash, &title, Some(&context))
            .await
            .unwrap();
        assert_eq!(page.items(), ["first", "second"]);
        assert!(page.more());
        assert_eq!(page.next_cursor().unwrap().as_json(), &last_key);

        let next = match page.next_context() {
            Some(NextContext::Query(next)) => next.clone(),
            other => panic!("unexpected next context {other:?}"),
        };
        assert_eq!(next.range(), context.range());
        let rest = connection
            .query("Posts", &hash, &title, Some(&next))
            .await
            .unwrap();
        assert!(!rest.more());
        page.merge(rest);
        assert_eq!(page.count(), 3);
        assert_eq!(connection.consumed_read_units(Some("Posts")), 2.0);

        let calls = connection.transport().calls();
        assert_eq!(calls[0].1["HashKeyValue"], json!({"S": "u1"}));
        assert!(calls[0].1.get("ExclusiveStartKey").is_none());
        assert_eq!(calls[1].1["ExclusiveStartKey"], last_key);
        assert_eq!(calls[1].1["Limit"], json!(2));
    }

    #[tokio::test]
    async fn count_only_query() {
        let mut connection = scripted([json!({"Count": 5, "ConsumedCapacityUnits": 1})]);
        let hash = Attribute::auto(1).unwrap();
        let collection = connection
            .query("Posts", &hash, &ItemHydrator, Some(&QueryContext::new().count(true)))
            .await
            .unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.count(), 5);
        assert_eq!(collection.request_count(), 5);
    }

    #[tokio::test]
    async fn scan_in_steps() {
        let mut connection = scripted([
            json!({
                "Count": 1,
                "ScannedCount": 4,
                "Items": [{"title": {"S": "Dune"}, "year": {"N": "1965"}}],
                "LastEvaluatedKey": {"HashKeyElement": {"N": "4"}},
                "ConsumedCapacityUnits": 2
            }),
            json!({"Count": 0, "ScannedCount": 3, "Items": [], "ConsumedCapacityUnits": 1}),
        ]);
        let context = ScanContext::new()
            .filter("year", ComparisonOperator::Lt, 1970)
            .unwrap();

        let response = connection.scan_response("Books", Some(&context)).await.unwrap();
        let pending = connection
            .scan_collection::<Item>(response, Some(&context))
            .unwrap();
        assert_eq!(pending.request_items().len(), 1);
        assert!(pending.is_empty());
        let page = connection
            .populate_items(pending, "Books", &ItemHydrator)
            .unwrap();
        assert!(page.request_items().is_empty());
        assert_eq!(
            page.first().unwrap().get("year").unwrap().value(),
            Value::from(1965)
        );

        let next = match page.next_context() {
            Some(NextContext::Scan(next)) => next.clone(),
            other => panic!("unexpected next context {other:?}"),
        };
        assert_eq!(next.filters(), context.filters());
        let rest = connection
            .scan("Books", &ItemHydrator, Some(&next))
            .await
            .unwrap();
        assert!(!rest.more());
        assert_eq!(rest.count(), 0);
        assert_eq!(connection.consumed_read_units(Some("Books")), 3.0);

        let calls = connection.transport().calls();
        assert_eq!(
            calls[1].1["ScanFilter"],
            json!({"year": {"ComparisonOperator": "LT", "AttributeValueList": [{"N": "1970"}]}})
        );
        assert_eq!(calls[1].1["ExclusiveStartKey"], json!({"HashKeyElement": {"N": "4"}}));
    }

    #[tokio::test]
    async fn empty_batches_fail_without_calling() {
        let mut connection =
            scripted([]).with_logger(StringLogger::new(false).with_level(LogLevel::Debug));
        assert!(matches!(
            connection.batch_get(&BatchGetContext::new(), &ItemHydrator).await,
            Err(Error::EmptyBatch(_))
        ));
        assert!(matches!(
            connection.batch_write(&BatchWriteContext::new()).await,
            Err(Error::EmptyBatch(_))
        ));
        assert!(connection.transport().calls().is_empty());
        assert!(connection.logger().unwrap().contains_warnings());
    }

    #[tokio::test]
    async fn batch_get_with_unprocessed_keys() {
        let mut connection = scripted([json!({
            "Responses": {
                "Books": {
                    "Items": [{"title": {"S": "Dune"}}, {"title": {"S": "Emma"}}],
                    "ConsumedCapacityUnits": 1
                },
                "Authors": {"Items": [], "ConsumedCapacityUnits": 0.5}
            },
            "UnprocessedKeys": {
                "Books": {
                    "Keys": [{"HashKeyElement": {"N": "3"}}],
                    "AttributesToGet": ["title"]
                }
            }
        })]);
        let mut context = BatchGetContext::new();
        context
            .add_key("Books", Key::hash(1).unwrap())
            .add_key("Books", Key::hash(2).unwrap())
            .add_key("Books", Key::hash(3).unwrap())
            .add_key("Authors", Key::hash("herbert").unwrap());
        context.set_attributes_to_get("Books", &["title"]);

        let result = connection.batch_get(&context, &title).await.unwrap();
        assert_eq!(result.items("Books").unwrap().items(), ["Dune", "Emma"]);
        assert_eq!(result.items("Authors").unwrap().count(), 0);
        assert!(result.more());

        let unprocessed = result.unprocessed_context().unwrap();
        assert_eq!(unprocessed.keys("Books"), [Key::hash(3).unwrap()]);
        assert_eq!(unprocessed.len(), 1);
        assert_eq!(connection.consumed_read_units(Some("Books")), 1.0);
        assert_eq!(connection.consumed_read_units(None), 1.5);

        let calls = connection.transport().calls();
        let (operation, parameters) = &calls[0];
        assert_eq!(*operation, Operation::BatchGetItem);
        assert_eq!(
            parameters["RequestItems"]["Books"]["AttributesToGet"],
            json!(["title"])
        );
    }

    #[tokio::test]
    async fn batch_write_with_unprocessed_items() {
        let mut connection = scripted([json!({
            "Responses": {"Books": {"ConsumedCapacityUnits": 2}},
            "UnprocessedItems": {
                "Books": [
                    {"PutRequest": {"Item": {"id": {"N": "2"}}}},
                    {"DeleteRequest": {"Key": {"HashKeyElement": {"N": "9"}}}}
                ]
            }
        })]);
        let mut context = BatchWriteContext::new();
        context
            .add_item_to_put(Item::new("Books").with("id", 1).unwrap())
            .unwrap()
            .add_item_to_put(Item::new("Books").with("id", 2).unwrap())
            .unwrap()
            .add_key_to_delete("Books", Key::hash(9).unwrap())
            .unwrap();

        let unprocessed = connection.batch_write(&context).await.unwrap().unwrap();
        assert_eq!(unprocessed.len(), 2);
        let mut expected = BatchWriteContext::new();
        expected
            .add_item_to_put(Item::new("Books").with("id", 2).unwrap())
            .unwrap()
            .add_key_to_delete("Books", Key::hash(9).unwrap())
            .unwrap();
        assert_eq!(unprocessed, expected);
        assert_eq!(connection.consumed_write_units(Some("Books")), 2.0);

        let mut fully = scripted([json!({"Responses": {}, "UnprocessedItems": {}})]);
        assert!(fully.batch_write(&context).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn capacity_counters_reset() {
        let mut connection = scripted([
            json!({"ConsumedCapacityUnits": 1}),
            json!({"ConsumedCapacityUnits": 2}),
        ]);
        let key = Key::hash(1).unwrap();
        connection.delete("A", &key, None).await.unwrap();
        connection.delete("B", &key, None).await.unwrap();
        assert_eq!(connection.consumed_write_units(None), 3.0);

        connection.reset_consumed_units(Some("A"));
        assert_eq!(connection.consumed_write_units(Some("A")), 0.0);
        assert_eq!(connection.consumed_write_units(None), 2.0);

        connection.reset_consumed_units(None);
        assert_eq!(connection.consumed_write_units(None), 0.0);
        assert_eq!(connection.consumed_read_units(None), 0.0);
    }

    #[tokio::test]
    async fn remote_failures_are_wrapped() {
        let logger = StringLogger::new(false);
        let mut connection = Connection::new(Scripted::failing("throttled")).with_logger(logger);
        let error = connection
            .get("Books", &Key::hash(1).unwrap(), &ItemHydrator, None)
            .await
            .unwrap_err();
        assert!(matches!(error, Error::Remote(_, _)));
        assert_eq!(error.to_string(), "get_item(t=Books) failed: throttled");
        assert!(connection.logger().unwrap().contains_warnings());
    }

    #[tokio::test]
    async fn table_lifecycle() {
        let mut connection = scripted([
            json!({"TableDescription": {"TableName": "Books", "TableStatus": "CREATING"}}),
            json!({"Table": {"TableName": "Books", "TableStatus": "CREATING"}}),
            json!({"Table": {"TableName": "Books", "TableStatus": "ACTIVE", "ItemCount": 0}}),
            json!({"TableNames": ["Authors", "Books"], "LastEvaluatedTableName": "Books"}),
            json!({"TableDescription": {"TableName": "Books", "TableStatus": "DELETING"}}),
        ])
        .with_table_polling(Duration::ZERO, 5);

        let schema = KeySchema::hash("id", AttributeKind::Number).unwrap();
        let created = connection
            .create_table("Books", &schema, &ProvisionedThroughput::new(5, 5))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.table_status, TableStatus::Creating);

        let active = connection
            .wait_for_table("Books", TableStatus::Active)
            .await
            .unwrap();
        assert_eq!(active.item_count, Some(0));

        let tables = connection.list_tables(Some(2), None).await.unwrap();
        assert_eq!(tables.tables(), ["Authors", "Books"]);
        assert!(tables.more());

        let deleted = connection.delete_table("Books").await.unwrap().unwrap();
        assert_eq!(deleted.table_status, TableStatus::Deleting);

        let calls = connection.transport().calls();
        assert_eq!(
            calls[0].1,
            json!({
                "TableName": "Books",
                "KeySchema": {"HashKeyElement": {"AttributeName": "id", "AttributeType": "N"}},
                "ProvisionedThroughput": {"ReadCapacityUnits": 5, "WriteCapacityUnits": 5}
            })
        );
        assert_eq!(calls[3].0, Operation::ListTables);
        assert_eq!(calls[3].1, json!({"Limit": 2}));
    }

    #[tokio::test]
    async fn wait_for_table_times_out() {
        let creating = json!({"Table": {"TableName": "Books", "TableStatus": "CREATING"}});
        let mut connection = scripted(vec![creating; 3]).with_table_polling(Duration::ZERO, 3);
        assert!(matches!(
            connection.wait_for_table("Books", TableStatus::Active).await,
            Err(Error::Timeout(_))
        ));
        assert_eq!(connection.transport().calls().len(), 3);
    }

    #[tokio::test]
    async fn describe_requires_table() {
        let mut connection = scripted([json!({})]);
        assert!(matches!(
            connection.describe_table("Books").await,
            Err(Error::Response(_))
        ));
    }

    #[tokio::test]
    async fn logger_records_calls() {
        let logger = StringLogger::new(false).with_level(LogLevel::Debug);
        let mut connection = scripted([json!({"ConsumedCapacityUnits": 1})]).with_logger(logger);
        connection
            .delete("Books", &Key::hash(1).unwrap(), None)
            .await
            .unwrap();

        let logger = connection.logger().unwrap();
        let lines = logger.lines();
        assert_eq!(lines[0], "Logger activated");
        assert!(lines.iter().any(|line| line.starts_with("DeleteItem request parameters")));
        assert!(logger
            .lines_at(LogLevel::Info)
            .contains(&"1 consumed write units on table Books".to_string()));
        assert!(!logger.contains_warnings());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn from_config() {
        use crate::common::ConnectionConfig;

        let config = ConnectionConfig::builder()
            .toml_str(
                r#"
                [dynamo]
                log = true
                log_level = "error"
                table_poll_max_attempts = 2
                "#,
            )
            .build()
            .unwrap();
        let connection = Connection::from_config(Scripted::default(), &config).unwrap();
        assert_eq!(connection.logger().unwrap().level(), LogLevel::Error);

        let quiet = ConnectionConfig::builder().toml_str("").build().unwrap();
        let connection = Connection::from_config(Scripted::default(), &quiet).unwrap();
        assert!(connection.logger().is_none());
    }
}
