use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use lostfound_core::{Entity, Field, ItemId, ValidationError, ValidationResult};

use crate::status::ItemStatus;

/// Textual date layout used for input and storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated lost-and-found record.
///
/// Values of this type can only be produced by validation ([`Item::new`],
/// [`ItemDraft::validate`]) or by rehydrating a stored row
/// ([`Item::from_stored`]). To change fields, go through [`Item::to_draft`]
/// and validate again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    id: Option<ItemId>,
    name: String,
    category: String,
    date: NaiveDate,
    location: String,
    status: ItemStatus,
    contact_info: String,
}

impl Item {
    /// Validate six raw values against today's date and build a transient item.
    pub fn new(
        name: &str,
        category: &str,
        date: &str,
        location: &str,
        status: &str,
        contact_info: &str,
    ) -> ValidationResult<Self> {
        ItemDraft::new(name, category, date, location, status, contact_info).validate()
    }

    /// Rehydrate a persisted row. Performs no validation.
    pub fn from_stored(
        id: ItemId,
        name: String,
        category: String,
        date: NaiveDate,
        location: String,
        status: ItemStatus,
        contact_info: String,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            category,
            date,
            location,
            status,
            contact_info,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The date in `YYYY-MM-DD` form.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn contact_info(&self) -> &str {
        &self.contact_info
    }

    /// Change the status. Any member of [`ItemStatus`] keeps the record valid.
    pub fn set_status(&mut self, status: ItemStatus) {
        self.status = status;
    }

    /// Record the identifier the store allocated for this item.
    pub fn assign_id(&mut self, id: ItemId) {
        self.id = Some(id);
    }

    /// Raw, editable copy of this record (keeps the id).
    pub fn to_draft(&self) -> ItemDraft {
        ItemDraft {
            id: self.id,
            name: Some(self.name.clone()),
            category: Some(self.category.clone()),
            date: Some(self.date_string()),
            location: Some(self.location.clone()),
            status: Some(self.status.as_str().to_string()),
            contact_info: Some(self.contact_info.clone()),
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> Option<ItemId> {
        self.id
    }
}

/// Unvalidated field values as entered by a user.
///
/// `None` means the value was not supplied at all; it is treated the same as
/// a blank string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub id: Option<ItemId>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub contact_info: Option<String>,
}

impl ItemDraft {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
        location: impl Into<String>,
        status: impl Into<String>,
        contact_info: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            category: Some(category.into()),
            date: Some(date.into()),
            location: Some(location.into()),
            status: Some(status.into()),
            contact_info: Some(contact_info.into()),
        }
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    /// Raw value of one field.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Category => self.category.as_deref(),
            Field::Date => self.date.as_deref(),
            Field::Location => self.location.as_deref(),
            Field::Status => self.status.as_deref(),
            Field::ContactInfo => self.contact_info.as_deref(),
        }
    }

    /// Replace one field's raw value.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Category => &mut self.category,
            Field::Date => &mut self.date,
            Field::Location => &mut self.location,
            Field::Status => &mut self.status,
            Field::ContactInfo => &mut self.contact_info,
        };
        *slot = value;
    }

    /// Validate against the local calendar date.
    pub fn validate(&self) -> ValidationResult<Item> {
        self.validate_on(Local::now().date_naive())
    }

    /// Validate against an explicit "today".
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// required fields (name, category, date, location, status,
    /// contact_info), date format, date not in the future, status literal.
    pub fn validate_on(&self, today: NaiveDate) -> ValidationResult<Item> {
        for field in Field::ALL {
            if self.get(field).is_none_or(|value| value.trim().is_empty()) {
                return Err(ValidationError::empty(field));
            }
        }

        let raw = |field: Field| self.get(field).unwrap_or_default();

        let date = parse_date(raw(Field::Date))?;
        if date > today {
            return Err(ValidationError::FutureDate);
        }
        let status: ItemStatus = raw(Field::Status).parse()?;

        Ok(Item {
            id: self.id,
            name: raw(Field::Name).to_string(),
            category: raw(Field::Category).to_string(),
            date,
            location: raw(Field::Location).to_string(),
            status,
            contact_info: raw(Field::ContactInfo).to_string(),
        })
    }
}

impl From<&Item> for ItemDraft {
    fn from(item: &Item) -> Self {
        item.to_draft()
    }
}

/// Parse a strict `YYYY-MM-DD` date (exactly 4/2/2 digits, real calendar day).
pub fn parse_date(raw: &str) -> ValidationResult<NaiveDate> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(ValidationError::InvalidDateFormat);
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| ValidationError::InvalidDateFormat)
}
