//! Payload schema definitions
//!
//! One declarative field table per resource. Validation runs before the
//! handler body touches the catalog; undeclared fields are ignored.

/// Field types accepted in request payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Any JSON string.
    String,
    /// A non-negative JSON number.
    Float,
    /// A string in `YYYY-MM-DD` form.
    Date,
    /// A JSON array of strings.
    StringList,
}

impl FieldType {
    /// Human-readable type name for error messages.
    pub fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Float => "number",
            FieldType::Date => "date string (YYYY-MM-DD)",
            FieldType::StringList => "array of strings",
        }
    }
}

/// A declared payload field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldDef {
    pub const fn required(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: true,
        }
    }

    pub const fn optional(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: false,
        }
    }
}

/// A resource payload schema: the declared fields and their rules.
#[derive(Debug, Clone, Copy)]
pub struct PayloadSchema {
    pub name: &'static str,
    pub fields: &'static [(&'static str, FieldDef)],
}

/// Book payload: `title` is the only required field. `authors` carries
/// "First Last" display names, `client` a single display name.
pub const BOOK: PayloadSchema = PayloadSchema {
    name: "Book",
    fields: &[
        ("title", FieldDef::required(FieldType::String)),
        ("premiere", FieldDef::optional(FieldType::Date)),
        ("price", FieldDef::optional(FieldType::Float)),
        ("authors", FieldDef::optional(FieldType::StringList)),
        ("client", FieldDef::optional(FieldType::String)),
    ],
};

/// Author payload. `books` carries titles.
pub const AUTHOR: PayloadSchema = PayloadSchema {
    name: "Author",
    fields: &[
        ("first_name", FieldDef::required(FieldType::String)),
        ("last_name", FieldDef::required(FieldType::String)),
        ("birth", FieldDef::optional(FieldType::Date)),
        ("death", FieldDef::optional(FieldType::Date)),
        ("books", FieldDef::optional(FieldType::StringList)),
    ],
};

/// Client payload. `books` carries titles.
pub const CLIENT: PayloadSchema = PayloadSchema {
    name: "Client",
    fields: &[
        ("first_name", FieldDef::required(FieldType::String)),
        ("last_name", FieldDef::required(FieldType::String)),
        ("books", FieldDef::optional(FieldType::StringList)),
    ],
};
