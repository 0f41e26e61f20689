//! Attribute reference data.

use serde::{Deserialize, Serialize};

use crate::value::ValueData;

/// Attribute type, as far as value shapes are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Identifier,
    Text,
    TextArea,
    Number,
    Boolean,
    Date,
    SimpleSelect,
    MultiSelect,
    /// Table-structured attribute (rows of cells), provided by an extension.
    Table,
}

impl AttributeType {
    /// Whether a value of this shape can be stored under an attribute of this type.
    pub fn accepts(self, data: &ValueData) -> bool {
        match (self, data) {
            (_, ValueData::Empty) => true,
            (Self::Identifier | Self::Text | Self::TextArea, ValueData::Text(_)) => true,
            (Self::Number, ValueData::Number(_)) => true,
            (Self::Boolean, ValueData::Boolean(_)) => true,
            (Self::Date, ValueData::Date(_)) => true,
            (Self::SimpleSelect, ValueData::Option(_)) => true,
            (Self::MultiSelect, ValueData::Options(_)) => true,
            (Self::Table, ValueData::Table(_)) => true,
            _ => false,
        }
    }
}

/// Attribute definition: code, type, and whether values vary per channel
/// (`scopable`) and/or per locale (`localizable`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    code: String,
    attribute_type: AttributeType,
    scopable: bool,
    localizable: bool,
}

impl Attribute {
    pub fn new(code: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            code: code.into(),
            attribute_type,
            scopable: false,
            localizable: false,
        }
    }

    pub fn scopable(mut self, scopable: bool) -> Self {
        self.scopable = scopable;
        self
    }

    pub fn localizable(mut self, localizable: bool) -> Self {
        self.localizable = localizable;
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn attribute_type(&self) -> AttributeType {
        self.attribute_type
    }

    pub fn is_scopable(&self) -> bool {
        self.scopable
    }

    pub fn is_localizable(&self) -> bool {
        self.localizable
    }
}
