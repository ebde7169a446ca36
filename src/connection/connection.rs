// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{BatchCollection, CapacityUnits, Operation, Response, Transport};
use crate::attribute::{Attribute, AttributeUpdate, Key};
use crate::collection::{Collection, Cursor, NextContext};
use crate::common::Error;
use crate::context::{
    BatchGetContext, BatchWriteContext, Context, DeleteContext, GetContext, Parameters,
    PutContext, QueryContext, ScanContext, UpdateContext,
};
use crate::item::{Hydrator, Item, Row};
use crate::log::{LogLevel, StringLogger};
use crate::table::{KeySchema, ProvisionedThroughput, TableCollection, TableDescription, TableStatus};
use serde_json::{json, Value as Json};
use std::collections::BTreeMap;
use std::time::Duration;

/// Attributes returned by a put, update or delete.
pub type Attributes = BTreeMap<String, Attribute>;

const DEFAULT_TABLE_POLL_INTERVAL: Duration = Duration::from_secs(3);
const DEFAULT_TABLE_POLL_MAX_ATTEMPTS: u32 = 20;

/// Issues calls through a `Transport`, building parameters from contexts and
/// interpreting responses.  Consumed capacity is counted per connection.
pub struct Connection<T> {
    transport: T,
    logger: Option<StringLogger>,
    capacity: CapacityUnits,
    table_poll_interval: Duration,
    table_poll_max_attempts: u32,
}

impl<T: Transport> Connection<T> {
    /// Create a connection without a logger.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            logger: None,
            capacity: CapacityUnits::default(),
            table_poll_interval: DEFAULT_TABLE_POLL_INTERVAL,
            table_poll_max_attempts: DEFAULT_TABLE_POLL_MAX_ATTEMPTS,
        }
    }

    /// Create a connection from the `[dynamo]` table of `config`.
    ///
    /// ```toml
    /// [dynamo]
    /// log = true
    /// log_level = "DEBUG"
    /// table_poll_interval_secs = 3
    /// table_poll_max_attempts = 20
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_config(transport: T, config: &crate::common::ConnectionConfig) -> Result<Self, Error> {
        let dynamo = config.dynamo();
        let mut connection = Self::new(transport).with_table_polling(
            dynamo
                .table_poll_interval
                .unwrap_or(DEFAULT_TABLE_POLL_INTERVAL),
            dynamo
                .table_poll_max_attempts
                .unwrap_or(DEFAULT_TABLE_POLL_MAX_ATTEMPTS),
        );
        if dynamo.log || config.debug() {
            let level = dynamo.log_level.unwrap_or_default();
            connection.set_logger(StringLogger::new(config.debug()).with_level(level));
        }
        Ok(connection)
    }

    /// Attach a logger.
    pub fn with_logger(mut self, logger: StringLogger) -> Self {
        self.set_logger(logger);
        self
    }

    /// Attach a logger.
    pub fn set_logger(&mut self, logger: StringLogger) {
        self.logger = Some(logger);
        self.log(LogLevel::Info, || "Logger activated".to_string());
    }

    /// The logger, if any.
    pub fn logger(&self) -> Option<&StringLogger> {
        self.logger.as_ref()
    }

    /// Poll interval and attempts used by `wait_for_table`.
    pub fn with_table_polling(mut self, interval: Duration, max_attempts: u32) -> Self {
        self.table_poll_interval = interval;
        self.table_poll_max_attempts = max_attempts.max(1);
        self
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The capacity counters.
    pub fn capacity(&self) -> &CapacityUnits {
        &self.capacity
    }

    /// Read units consumed on `table`, or on all tables.
    pub fn consumed_read_units(&self, table: Option<&str>) -> f64 {
        self.capacity.read(table)
    }

    /// Write units consumed on `table`, or on all tables.
    pub fn consumed_write_units(&self, table: Option<&str>) -> f64 {
        self.capacity.write(table)
    }

    /// Reset the counters of `table`, or of all tables.
    pub fn reset_consumed_units(&mut self, table: Option<&str>) {
        match table {
            Some(table) => self.log(LogLevel::Info, || {
                format!("Reset consumed units counters for table {table}")
            }),
            None => self.log(LogLevel::Info, || {
                "Reset all consumed units counters".to_string()
            }),
        }
        self.capacity.reset(table);
    }

    /// Store `item` in its table.  Returns the old attributes when the
    /// context asks for them.
    pub async fn put(
        &mut self,
        item: &Item,
        context: Option<&PutContext>,
    ) -> Result<Option<Attributes>, Error> {
        let table = item.table();
        self.log(LogLevel::Info, || format!("Put on table {table}"));
        self.require_table(table, "put")?;

        let mut parameters = Parameters::new();
        parameters.insert("TableName".to_string(), Json::from(table));
        parameters.insert("Item".to_string(), Json::Object(item.to_row()));
        if let Some(context) = context {
            context.merge_into(&mut parameters);
        }

        let response = self
            .send(Operation::PutItem, format!("put_item(t={table})"), parameters)
            .await?;
        self.add_consumed_write_units(table, consumed_units(&response));
        populate_attributes(&response)
    }

    /// Delete the item with `key` from `table`.
    pub async fn delete(
        &mut self,
        table: &str,
        key: &Key,
        context: Option<&DeleteContext>,
    ) -> Result<Option<Attributes>, Error> {
        self.log(LogLevel::Info, || format!("Delete on table {table}"));
        self.require_table(table, "delete")?;

        let mut parameters = Parameters::new();
        parameters.insert("TableName".to_string(), Json::from(table));
        parameters.insert("Key".to_string(), key.to_wire());
        if let Some(context) = context {
            context.merge_into(&mut parameters);
        }

        let response = self
            .send(Operation::DeleteItem, format!("delete_item(t={table})"), parameters)
            .await?;
        self.add_consumed_write_units(table, consumed_units(&response));
        populate_attributes(&response)
    }

    /// Read the item with `key` from `table`.
    pub async fn get<I, H: Hydrator<I>>(
        &mut self,
        table: &str,
        key: &Key,
        hydrator: &H,
        context: Option<&GetContext>,
    ) -> Result<Option<I>, Error> {
        self.log(LogLevel::Info, || format!("Get on table {table}"));

        let mut parameters = Parameters::new();
        parameters.insert("TableName".to_string(), Json::from(table));
        parameters.insert("Key".to_string(), key.to_wire());
        if let Some(context) = context {
            context.merge_into(&mut parameters);
        }

        let response = self
            .send(Operation::GetItem, format!("get_item(t={table})"), parameters)
            .await?;
        self.add_consumed_read_units(table, consumed_units(&response));

        match response.get("Item") {
            Some(Json::Object(row)) => Ok(Some(hydrator.hydrate(table, row)?)),
            Some(other) => Err(Error::Response(format!("get_item(t={table}): Item {other}"))),
            None => {
                self.log(LogLevel::Info, || "Item not found".to_string());
                Ok(None)
            }
        }
    }

    /// Apply `update` to the item with `key` in `table`.
    pub async fn update(
        &mut self,
        table: &str,
        key: &Key,
        update: &AttributeUpdate,
        context: Option<&UpdateContext>,
    ) -> Result<Option<Attributes>, Error> {
        self.log(LogLevel::Info, || format!("Update on table {table}"));
        self.require_table(table, "update")?;

        let mut parameters = Parameters::new();
        parameters.insert("TableName".to_string(), Json::from(table));
        parameters.insert("Key".to_string(), key.to_wire());
        parameters.insert("AttributeUpdates".to_string(), update.to_wire());
        if let Some(context) = context {
            context.merge_into(&mut parameters);
        }

        let response = self
            .send(Operation::UpdateItem, format!("update_item(t={table})"), parameters)
            .await?;
        self.add_consumed_write_units(table, consumed_units(&response));
        populate_attributes(&response)
    }

    /// Read the items of `table` whose hash key is `hash`.  When the response
    /// is truncated the collection carries a context for the next page.
    pub async fn query<I, H: Hydrator<I>>(
        &mut self,
        table: &str,
        hash: &Attribute,
        hydrator: &H,
        context: Option<&QueryContext>,
    ) -> Result<Collection<I>, Error> {
        self.log(LogLevel::Info, || format!("Query on table {table}"));

        let mut parameters = Parameters::new();
        parameters.insert("TableName".to_string(), Json::from(table));
        parameters.insert("HashKeyValue".to_string(), hash.to_wire());
        if let Some(context) = context {
            context.merge_into(&mut parameters);
        }

        let mut response = self
            .send(Operation::Query, format!("query(t={table})"), parameters)
            .await?;
        self.add_consumed_read_units(table, consumed_units(&response));

        let next_context = match response.remove("LastEvaluatedKey") {
            Some(last_evaluated_key) => {
                self.log(LogLevel::Info, || "More items to retrieve".to_string());
                let mut next = context.cloned().unwrap_or_default();
                next.collection_mut()
                    .set_exclusive_start_key(Some(Cursor::from(last_evaluated_key)));
                Some(NextContext::Query(next))
            }
            None => None,
        };
        let rows = take_rows(&mut response, "Items")?;
        let items = Collection::new(next_context, response_count(&response, rows.len()), rows);
        self.populate_items(items, table, hydrator)
    }

    /// Read `table` page by page.
    pub async fn scan<I, H: Hydrator<I>>(
        &mut self,
        table: &str,
        hydrator: &H,
        context: Option<&ScanContext>,
    ) -> Result<Collection<I>, Error> {
        let response = self.scan_response(table, context).await?;
        let items = self.scan_collection(response, context)?;
        self.populate_items(items, table, hydrator)
    }

    /// Issue a scan and return the raw response.
    pub async fn scan_response(
        &mut self,
        table: &str,
        context: Option<&ScanContext>,
    ) -> Result<Response, Error> {
        self.log(LogLevel::Info, || format!("Scan on table {table}"));

        let mut parameters = Parameters::new();
        parameters.insert("TableName".to_string(), Json::from(table));
        if let Some(context) = context {
            context.merge_into(&mut parameters);
        }

        let response = self
            .send(Operation::Scan, format!("scan(t={table})"), parameters)
            .await?;
        if let Some(scanned) = response.get("ScannedCount") {
            self.log(LogLevel::Info, || format!("{scanned} scanned items"));
        }
        self.add_consumed_read_units(table, consumed_units(&response));
        Ok(response)
    }

    /// Build an unhydrated collection from a scan response: the rows are
    /// left in `request_items`.
    pub fn scan_collection<I>(
        &self,
        mut response: Response,
        context: Option<&ScanContext>,
    ) -> Result<Collection<I>, Error> {
        let next_context = match response.remove("LastEvaluatedKey") {
            Some(last_evaluated_key) => {
                self.log(LogLevel::Info, || "More items to retrieve".to_string());
                let mut next = context.cloned().unwrap_or_default();
                next.collection_mut()
                    .set_exclusive_start_key(Some(Cursor::from(last_evaluated_key)));
                Some(NextContext::Scan(next))
            }
            None => None,
        };
        let rows = take_rows(&mut response, "Items")?;
        Ok(Collection::new(
            next_context,
            response_count(&response, rows.len()),
            rows,
        ))
    }

    /// Hydrate the pending rows of `items`, read from `table`.
    pub fn populate_items<I, H: Hydrator<I>>(
        &self,
        mut items: Collection<I>,
        table: &str,
        hydrator: &H,
    ) -> Result<Collection<I>, Error> {
        for row in items.take_request_items() {
            items.add(hydrator.hydrate(table, &row)?);
        }
        self.log(LogLevel::Info, || format!("Found {} items", items.count()));
        Ok(items)
    }

    /// Read the keys of `context`.  Keys the call did not process come back
    /// as a context ready to resubmit.
    pub async fn batch_get<I, H: Hydrator<I>>(
        &mut self,
        context: &BatchGetContext,
        hydrator: &H,
    ) -> Result<BatchCollection<I>, Error> {
        self.log(LogLevel::Info, || "BatchGet".to_string());
        if context.is_empty() {
            let message = "batch get context contains no key to get".to_string();
            self.log(LogLevel::Error, || message.clone());
            return Err(Error::EmptyBatch(message));
        }

        let mut response = self
            .send(
                Operation::BatchGetItem,
                "batch_get_item".to_string(),
                context.parameters(),
            )
            .await?;

        let unprocessed = match response.remove("UnprocessedKeys") {
            Some(Json::Object(tables)) if !tables.is_empty() => {
                let mut next = BatchGetContext::new();
                for (table, request) in &tables {
                    for key in request
                        .get("Keys")
                        .and_then(Json::as_array)
                        .map(Vec::as_slice)
                        .unwrap_or_default()
                    {
                        next.add_key(table, Key::from_wire(key)?);
                    }
                    let names = string_list(request.get("AttributesToGet"));
                    if !names.is_empty() {
                        let names: Vec<&str> = names.iter().map(String::as_str).collect();
                        next.set_attributes_to_get(table, &names);
                    }
                }
                self.log(LogLevel::Info, || "More unprocessed keys".to_string());
                Some(next)
            }
            _ => None,
        };

        let mut collection = BatchCollection::new(unprocessed);
        if let Some(Json::Object(responses)) = response.remove("Responses") {
            for (table, mut table_response) in responses {
                self.add_consumed_read_units(
                    &table,
                    table_response
                        .get("ConsumedCapacityUnits")
                        .and_then(units)
                        .unwrap_or(0.0),
                );
                let rows = match table_response.as_object_mut() {
                    Some(table_response) => take_rows(table_response, "Items")?,
                    None => Vec::new(),
                };
                let mut items = Collection::default();
                for row in rows {
                    items.add(hydrator.hydrate(&table, &row)?);
                }
                self.log(LogLevel::Info, || {
                    format!("Found {} items on table {table}", items.count())
                });
                collection.set_items(&table, items);
            }
        }
        Ok(collection)
    }

    /// Put and delete the entries of `context`.  Returns a context holding
    /// the writes the call did not process, if any.
    pub async fn batch_write(
        &mut self,
        context: &BatchWriteContext,
    ) -> Result<Option<BatchWriteContext>, Error> {
        self.log(LogLevel::Info, || "BatchWrite".to_string());
        if context.is_empty() {
            let message = "batch write context contains nothing to write".to_string();
            self.log(LogLevel::Error, || message.clone());
            return Err(Error::EmptyBatch(message));
        }

        let mut response = self
            .send(
                Operation::BatchWriteItem,
                "batch_write_item".to_string(),
                context.parameters(),
            )
            .await?;

        let unprocessed = match response.remove("UnprocessedItems") {
            Some(Json::Object(tables)) if !tables.is_empty() => {
                let mut next = BatchWriteContext::new();
                for (table, requests) in &tables {
                    for request in requests
                        .as_array()
                        .map(Vec::as_slice)
                        .unwrap_or_default()
                    {
                        if let Some(key) = request.pointer("/DeleteRequest/Key") {
                            next.add_key_to_delete(table, Key::from_wire(key)?)?;
                        } else if let Some(Json::Object(row)) = request.pointer("/PutRequest/Item")
                        {
                            next.add_item_to_put(Item::from_row(table, row)?)?;
                        } else {
                            return Err(Error::Response(format!(
                                "batch_write_item: unprocessed request {request}"
                            )));
                        }
                    }
                }
                self.log(LogLevel::Info, || "More unprocessed items".to_string());
                Some(next)
            }
            _ => None,
        };

        if let Some(Json::Object(responses)) = response.remove("Responses") {
            for (table, table_response) in &responses {
                self.add_consumed_write_units(
                    table,
                    table_response
                        .get("ConsumedCapacityUnits")
                        .and_then(units)
                        .unwrap_or(0.0),
                );
            }
        }
        Ok(unprocessed)
    }

    /// Create `table`.
    pub async fn create_table(
        &mut self,
        table: &str,
        key_schema: &KeySchema,
        provisioned_throughput: &ProvisionedThroughput,
    ) -> Result<Option<TableDescription>, Error> {
        self.log(LogLevel::Info, || format!("Create table {table}"));
        let parameters = object(json!({
            "TableName": table,
            "KeySchema": serde_json::to_value(key_schema)?,
            "ProvisionedThroughput": throughput_request(provisioned_throughput),
        }));
        let response = self
            .send(Operation::CreateTable, format!("create_table(t={table})"), parameters)
            .await?;
        table_description(&response, "TableDescription")
    }

    /// Change the throughput of `table`.
    pub async fn update_table(
        &mut self,
        table: &str,
        provisioned_throughput: &ProvisionedThroughput,
    ) -> Result<Option<TableDescription>, Error> {
        self.log(LogLevel::Info, || format!("Update table {table}"));
        let parameters = object(json!({
            "TableName": table,
            "ProvisionedThroughput": throughput_request(provisioned_throughput),
        }));
        let response = self
            .send(Operation::UpdateTable, format!("update_table(t={table})"), parameters)
            .await?;
        table_description(&response, "TableDescription")
    }

    /// Delete `table`.
    pub async fn delete_table(&mut self, table: &str) -> Result<Option<TableDescription>, Error> {
        self.log(LogLevel::Info, || format!("Delete table {table}"));
        let parameters = object(json!({ "TableName": table }));
        let response = self
            .send(Operation::DeleteTable, format!("delete_table(t={table})"), parameters)
            .await?;
        table_description(&response, "TableDescription")
    }

    /// Describe `table`.
    pub async fn describe_table(&mut self, table: &str) -> Result<TableDescription, Error> {
        self.log(LogLevel::Info, || format!("Describe table {table}"));
        let parameters = object(json!({ "TableName": table }));
        let response = self
            .send(Operation::DescribeTable, format!("describe_table(t={table})"), parameters)
            .await?;
        table_description(&response, "Table")?
            .ok_or_else(|| Error::Response(format!("describe_table(t={table}): no Table")))
    }

    /// List table names, at most `limit`, starting after
    /// `exclusive_start_table_name`.
    pub async fn list_tables(
        &mut self,
        limit: Option<u32>,
        exclusive_start_table_name: Option<&str>,
    ) -> Result<TableCollection, Error> {
        self.log(LogLevel::Info, || "List tables".to_string());
        let mut parameters = Parameters::new();
        if let Some(limit) = limit {
            parameters.insert("Limit".to_string(), Json::from(limit));
        }
        if let Some(name) = exclusive_start_table_name {
            parameters.insert("ExclusiveStartTableName".to_string(), Json::from(name));
        }
        let response = self
            .send(Operation::ListTables, "list_tables".to_string(), parameters)
            .await?;

        let mut tables = TableCollection::new(
            response
                .get("LastEvaluatedTableName")
                .and_then(Json::as_str)
                .map(str::to_string),
        );
        for name in string_list(response.get("TableNames")) {
            tables.add(name);
        }
        Ok(tables)
    }

    /// Describe `table` until it reaches `status`, sleeping between polls.
    /// Fails with `Timeout` once the configured attempts are used up.
    pub async fn wait_for_table(
        &mut self,
        table: &str,
        status: TableStatus,
    ) -> Result<TableDescription, Error> {
        for attempt in 1..=self.table_poll_max_attempts {
            let description = self.describe_table(table).await?;
            if description.table_status == status {
                return Ok(description);
            }
            self.log(LogLevel::Info, || {
                format!(
                    "Table status is {}, waiting for {status}",
                    description.table_status
                )
            });
            if attempt < self.table_poll_max_attempts {
                tokio::time::sleep(self.table_poll_interval).await;
            }
        }
        let message = format!(
            "table {table} not {status} after {} attempts",
            self.table_poll_max_attempts
        );
        self.log(LogLevel::Error, || message.clone());
        Err(Error::Timeout(message))
    }

    async fn send(
        &self,
        operation: Operation,
        description: String,
        parameters: Parameters,
    ) -> Result<Response, Error> {
        self.log(LogLevel::Debug, || {
            format!("{operation} request parameters : {}", Json::Object(parameters.clone()))
        });
        let response = match self.transport.call(operation, parameters).await {
            Ok(response) => response,
            Err(e) => {
                self.log(LogLevel::Error, || format!("{description} failed: {e}"));
                return Err(Error::Remote(e, description));
            }
        };
        self.log(LogLevel::Debug, || {
            format!("{operation} request response : {}", Json::Object(response.clone()))
        });
        Ok(response)
    }

    fn require_table(&self, table: &str, call: &str) -> Result<(), Error> {
        if table.is_empty() {
            let message = format!("{call}: no table defined");
            self.log(LogLevel::Error, || message.clone());
            Err(Error::MissingTable(message))
        } else {
            Ok(())
        }
    }

    fn add_consumed_read_units(&mut self, table: &str, units: f64) {
        self.log(LogLevel::Info, || {
            format!("{units} consumed read units on table {table}")
        });
        self.capacity.add_read(table, units);
    }

    fn add_consumed_write_units(&mut self, table: &str, units: f64) {
        self.log(LogLevel::Info, || {
            format!("{units} consumed write units on table {table}")
        });
        self.capacity.add_write(table, units);
    }

    fn log(&self, level: LogLevel, line: impl FnOnce() -> String) {
        if let Some(logger) = &self.logger {
            if logger.enabled(level) {
                logger.log(level, line());
            }
        }
    }
}

fn object(value: Json) -> Parameters {
    match value {
        Json::Object(map) => map,
        _ => Parameters::new(),
    }
}

fn throughput_request(throughput: &ProvisionedThroughput) -> Json {
    json!({
        "ReadCapacityUnits": throughput.read_capacity_units,
        "WriteCapacityUnits": throughput.write_capacity_units,
    })
}

fn units(value: &Json) -> Option<f64> {
    match value {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn consumed_units(response: &Response) -> f64 {
    response
        .get("ConsumedCapacityUnits")
        .and_then(units)
        .unwrap_or(0.0)
}

fn response_count(response: &Response, fallback: usize) -> usize {
    response
        .get("Count")
        .and_then(units)
        .map(|count| count as usize)
        .unwrap_or(fallback)
}

fn string_list(value: Option<&Json>) -> Vec<String> {
    value
        .and_then(Json::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Json::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn take_rows(response: &mut Response, member: &str) -> Result<Vec<Row>, Error> {
    match response.remove(member) {
        None | Some(Json::Null) => Ok(Vec::new()),
        Some(Json::Array(rows)) => rows
            .into_iter()
            .map(|row| match row {
                Json::Object(row) => Ok(row),
                other => Err(Error::Response(format!("{member}: row {other}"))),
            })
            .collect(),
        Some(other) => Err(Error::Response(format!("{member}: {other}"))),
    }
}

fn populate_attributes(response: &Response) -> Result<Option<Attributes>, Error> {
    match response.get("Attributes") {
        Some(Json::Object(attributes)) => attributes
            .iter()
            .map(|(name, wire)| Ok((name.clone(), Attribute::from_wire(wire)?)))
            .collect::<Result<Attributes, Error>>()
            .map(Some),
        _ => Ok(None),
    }
}

fn table_description(response: &Response, member: &str) -> Result<Option<TableDescription>, Error> {
    match response.get(member) {
        Some(description) => Ok(Some(serde_json::from_value(description.clone())?)),
        None => Ok(None),
    }
}
