use serde::{Deserialize, Serialize};

/// Placeholder written for any blank field of a captured row
pub const EMPTY_FIELD: &str = "-";

/// One operator-editable field of the pending entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormField {
    LocationDescription,
    Activity,
    Tag,
    Note,
    Issue,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::LocationDescription,
        FormField::Activity,
        FormField::Tag,
        FormField::Note,
        FormField::Issue,
    ];

    /// Column heading used in exported reports
    pub fn column(&self) -> &'static str {
        match self {
            FormField::LocationDescription => "Loc Des",
            FormField::Activity => "Activity",
            FormField::Tag => "Tag",
            FormField::Note => "Note",
            FormField::Issue => "Remark",
        }
    }
}

/// Free-text fields describing the observation about to be captured.
///
/// Nothing on screen edits these yet, so captures normally carry five blanks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEntry {
    pub location_description: String,
    pub activity: String,
    pub tag: String,
    pub note: String,
    pub issue: String,
}

impl PendingEntry {
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::LocationDescription => &self.location_description,
            FormField::Activity => &self.activity,
            FormField::Tag => &self.tag,
            FormField::Note => &self.note,
            FormField::Issue => &self.issue,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        FormField::ALL
            .iter()
            .all(|field| self.get(*field).trim().is_empty())
    }

    /// Field value as written into a log row
    pub fn cell(&self, field: FormField) -> String {
        let value = self.get(field);
        if value.is_empty() {
            EMPTY_FIELD.to_string()
        } else {
            value.to_string()
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::LocationDescription => &mut self.location_description,
            FormField::Activity => &mut self.activity,
            FormField::Tag => &mut self.tag,
            FormField::Note => &mut self.note,
            FormField::Issue => &mut self.issue,
        }
    }
}
