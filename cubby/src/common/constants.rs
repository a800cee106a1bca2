// key derivation constants
pub const MODULE_NAME: &str = "cubby";
pub const COMPONENT_SEPARATOR: &str = "_";
pub const PREFIX_SEPARATOR: &str = "-";
pub const ID_TAG: &str = "id";

// record constants
pub const META_FIELD: &str = "_meta";
pub const TYPE_FIELD: &str = "_type";
pub const RESERVED_FIELDS: [&str; 2] = [META_FIELD, TYPE_FIELD];

// Compile-time assertion for reserved fields count
const _: () = {
    const RESERVED_FIELDS_COUNT: usize = 2;
    const ACTUAL_COUNT: usize = RESERVED_FIELDS.len();
    const _: [(); 1] = [(); (ACTUAL_COUNT == RESERVED_FIELDS_COUNT) as usize];
};

// envelope field names
pub const ENVELOPE_ID: &str = "id";
pub const ENVELOPE_CREATED: &str = "created";
pub const ENVELOPE_SAVED: &str = "saved";

pub const CUBBY_VERSION: &str = env!("CARGO_PKG_VERSION");
