//! Attribute value cells.
//!
//! A [`Value`] is addressed by `(attribute code, locale?, channel?)`. Equality
//! semantics used by the rule engine live in [`crate::compare`], not here.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use attrsync_core::ValueObject;

/// One row of a table-structured value: column code → cell.
pub type TableRow = BTreeMap<String, serde_json::Value>;

/// Value payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ValueData {
    /// Present but carrying no data (what the value builder produces by default).
    Empty,
    Text(String),
    /// Decimal kept in its textual form to avoid float drift.
    Number(String),
    Boolean(bool),
    Date(NaiveDate),
    Option(String),
    Options(Vec<String>),
    Table(Vec<TableRow>),
}

impl ValueData {
    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table(_))
    }
}

/// A value cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    attribute_code: String,
    locale: Option<String>,
    channel: Option<String>,
    data: ValueData,
}

impl ValueObject for Value {}

impl Value {
    pub fn new(
        attribute_code: impl Into<String>,
        locale: Option<&str>,
        channel: Option<&str>,
        data: ValueData,
    ) -> Self {
        Self {
            attribute_code: attribute_code.into(),
            locale: locale.map(str::to_owned),
            channel: channel.map(str::to_owned),
            data,
        }
    }

    /// Shorthand for a value that is neither localized nor scoped.
    pub fn unscoped(attribute_code: impl Into<String>, data: ValueData) -> Self {
        Self::new(attribute_code, None, None, data)
    }

    pub fn attribute_code(&self) -> &str {
        &self.attribute_code
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    pub fn data(&self) -> &ValueData {
        &self.data
    }

    /// Whether this cell sits at the given address.
    pub fn is_at(&self, attribute_code: &str, locale: Option<&str>, channel: Option<&str>) -> bool {
        self.attribute_code == attribute_code && self.locale() == locale && self.channel() == channel
    }
}

/// Builds values; only the attribute code is mandatory.
///
/// `ValueBuilder::new().with_attribute_code("table").build()` yields an
/// unscoped [`ValueData::Empty`] cell.
#[derive(Debug, Clone)]
pub struct ValueBuilder {
    attribute_code: String,
    locale: Option<String>,
    channel: Option<String>,
    data: ValueData,
}

impl Default for ValueBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueBuilder {
    pub fn new() -> Self {
        Self {
            attribute_code: String::new(),
            locale: None,
            channel: None,
            data: ValueData::Empty,
        }
    }

    pub fn with_attribute_code(mut self, code: impl Into<String>) -> Self {
        self.attribute_code = code.into();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_data(mut self, data: ValueData) -> Self {
        self.data = data;
        self
    }

    pub fn build(self) -> Value {
        Value {
            attribute_code: self.attribute_code,
            locale: self.locale,
            channel: self.channel,
            data: self.data,
        }
    }
}

/// Ordered set of value cells, at most one per address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueCollection {
    values: Vec<Value>,
}

impl ValueCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attribute_code: &str, locale: Option<&str>, channel: Option<&str>) -> Option<&Value> {
        self.values.iter().find(|v| v.is_at(attribute_code, locale, channel))
    }

    /// Insert a cell, replacing any cell already at the same address.
    pub fn upsert(&mut self, value: Value) {
        match self
            .values
            .iter_mut()
            .find(|v| v.is_at(&value.attribute_code, value.locale(), value.channel()))
        {
            Some(existing) => *existing = value,
            None => self.values.push(value),
        }
    }

    pub fn remove(&mut self, attribute_code: &str, locale: Option<&str>, channel: Option<&str>) -> Option<Value> {
        let idx = self.values.iter().position(|v| v.is_at(attribute_code, locale, channel))?;
        Some(self.values.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<Value> for ValueCollection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut collection = Self::new();
        for value in iter {
            collection.upsert(value);
        }
        collection
    }
}
