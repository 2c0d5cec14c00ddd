//! Declarative book schemas, embedded at build time and compiled once at startup.

use crate::error::ConfigError;
use jsonschema::Validator;
use serde_json::Value;

/// Full record, every field required. Used for creation.
pub const BOOK_SCHEMA: &str = include_str!("../schemas/book.json");
/// Same fields minus `isbn`, none required. Used for updates.
pub const BOOK_UPDATE_SCHEMA: &str = include_str!("../schemas/book_update.json");

pub struct BookSchemas {
    create: Validator,
    update: Validator,
}

impl BookSchemas {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(BookSchemas {
            create: compile("book", BOOK_SCHEMA)?,
            update: compile("book_update", BOOK_UPDATE_SCHEMA)?,
        })
    }

    pub fn create(&self) -> &Validator {
        &self.create
    }

    pub fn update(&self) -> &Validator {
        &self.update
    }
}

fn compile(name: &'static str, source: &str) -> Result<Validator, ConfigError> {
    let document: Value = serde_json::from_str(source).map_err(|e| ConfigError::Schema {
        name,
        reason: e.to_string(),
    })?;
    jsonschema::validator_for(&document).map_err(|e| ConfigError::Schema {
        name,
        reason: e.to_string(),
    })
}
