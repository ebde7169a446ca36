// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use std::collections::HashMap;

/// Consumed read and write capacity units, per table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapacityUnits {
    read: HashMap<String, f64>,
    write: HashMap<String, f64>,
}

impl CapacityUnits {
    /// Account read units to `table`.
    pub fn add_read(&mut self, table: &str, units: f64) {
        *self.read.entry(table.to_string()).or_default() += units;
    }

    /// Account write units to `table`.
    pub fn add_write(&mut self, table: &str, units: f64) {
        *self.write.entry(table.to_string()).or_default() += units;
    }

    /// Read units of `table`, or of all tables.
    pub fn read(&self, table: Option<&str>) -> f64 {
        Self::total(&self.read, table)
    }

    /// Write units of `table`, or of all tables.
    pub fn write(&self, table: Option<&str>) -> f64 {
        Self::total(&self.write, table)
    }

    /// Forget the units of `table`, or of all tables.
    pub fn reset(&mut self, table: Option<&str>) {
        match table {
            Some(table) => {
                self.read.remove(table);
                self.write.remove(table);
            }
            None => {
                self.read.clear();
                self.write.clear();
            }
        }
    }

    fn total(units: &HashMap<String, f64>, table: Option<&str>) -> f64 {
        match table {
            Some(table) => units.get(table).copied().unwrap_or(0.0),
            None => units.values().sum(),
        }
    }
}
