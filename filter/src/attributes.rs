//! Spectrum model attribute catalogue.
//!
//! Attributes can be referred to by their catalogue name (case-insensitive,
//! e.g. `model_name`) or by a literal integer ID (`0x1006e`, `65646`).
//! Resolution always tries the catalogue first.

use std::fmt;

use tracing::trace;

use crate::{Error, Result};

/// Numeric Spectrum attribute identifier.
///
/// Displays in canonical lowercase hex (`0x1006e`); negative IDs render as
/// `-0x…`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttrId(pub i64);

impl fmt::Display for AttrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-{:#x}", self.0.unsigned_abs())
        } else {
            write!(f, "{:#x}", self.0)
        }
    }
}

impl From<u32> for AttrId {
    fn from(id: u32) -> Self {
        Self(i64::from(id))
    }
}

/// Known Spectrum model attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpectrumAttribute {
    CollectionsModelNameString,
    Condition,
    DeviceType,
    IsManaged,
    LastSuccessfulPoll,
    Manufacturer,
    MdlCreatTime,
    ModelClass,
    ModelHandle,
    ModelName,
    ModelTypeHandle,
    ModelTypeName,
    NcmDeviceFamilyIndex,
    NcmPotentialCommModes,
    NcmSelectedCommMode,
    NetworkAddress,
    SerialNumber,
    SysDesc,
    SysLocation,
    TopologyModelNameString,
}

impl SpectrumAttribute {
    /// Every catalogued attribute, in name order.
    pub const ALL: [SpectrumAttribute; 20] = [
        Self::CollectionsModelNameString,
        Self::Condition,
        Self::DeviceType,
        Self::IsManaged,
        Self::LastSuccessfulPoll,
        Self::Manufacturer,
        Self::MdlCreatTime,
        Self::ModelClass,
        Self::ModelHandle,
        Self::ModelName,
        Self::ModelTypeHandle,
        Self::ModelTypeName,
        Self::NcmDeviceFamilyIndex,
        Self::NcmPotentialCommModes,
        Self::NcmSelectedCommMode,
        Self::NetworkAddress,
        Self::SerialNumber,
        Self::SysDesc,
        Self::SysLocation,
        Self::TopologyModelNameString,
    ];

    /// Lowercase catalogue name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::CollectionsModelNameString => "collections_model_name_string",
            Self::Condition => "condition",
            Self::DeviceType => "device_type",
            Self::IsManaged => "is_managed",
            Self::LastSuccessfulPoll => "last_successful_poll",
            Self::Manufacturer => "manufacturer",
            Self::MdlCreatTime => "mdl_creat_time",
            Self::ModelClass => "model_class",
            Self::ModelHandle => "model_handle",
            Self::ModelName => "model_name",
            Self::ModelTypeHandle => "model_type_handle",
            Self::ModelTypeName => "model_type_name",
            Self::NcmDeviceFamilyIndex => "ncm_device_family_index",
            Self::NcmPotentialCommModes => "ncm_potential_comm_modes",
            Self::NcmSelectedCommMode => "ncm_selected_comm_mode",
            Self::NetworkAddress => "network_address",
            Self::SerialNumber => "serial_number",
            Self::SysDesc => "sys_desc",
            Self::SysLocation => "sys_location",
            Self::TopologyModelNameString => "topology_model_name_string",
        }
    }

    pub const fn id(self) -> AttrId {
        let raw: i64 = match self {
            Self::CollectionsModelNameString => 0x12ADB,
            Self::Condition => 0x1000A,
            Self::DeviceType => 0x23000E,
            Self::IsManaged => 0x1295D,
            Self::LastSuccessfulPoll => 0x11620,
            Self::Manufacturer => 0x10032,
            Self::MdlCreatTime => 0x1102A,
            Self::ModelClass => 0x11EE8,
            Self::ModelHandle => 0x129FA,
            Self::ModelName => 0x1006E,
            Self::ModelTypeHandle => 0x10001,
            Self::ModelTypeName => 0x10000,
            Self::NcmDeviceFamilyIndex => 0x12BEF,
            Self::NcmPotentialCommModes => 0x12BEB,
            Self::NcmSelectedCommMode => 0x12BEC,
            Self::NetworkAddress => 0x12D7F,
            Self::SerialNumber => 0x10030,
            Self::SysDesc => 0x10052,
            Self::SysLocation => 0x1102E,
            Self::TopologyModelNameString => 0x129E7,
        };
        AttrId(raw)
    }

    /// Case-insensitive lookup by catalogue name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.name().eq_ignore_ascii_case(name))
    }

    pub fn from_id(id: AttrId) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.id() == id)
    }
}

impl fmt::Display for SpectrumAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.id())
    }
}

/// Attributes requested on every model search unless overridden.
pub const DEFAULT_MODEL_ATTRS: [SpectrumAttribute; 3] = [
    SpectrumAttribute::ModelHandle,
    SpectrumAttribute::ModelName,
    SpectrumAttribute::ModelTypeName,
];

/// Resolves attribute names to IDs and back.
pub trait AttributeResolver {
    fn name_to_id(&self, name: &str) -> Result<AttrId>;

    fn id_to_name(&self, id: AttrId) -> String;
}

/// The built-in Spectrum catalogue with integer-literal fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectrumCatalogue;

impl AttributeResolver for SpectrumCatalogue {
    fn name_to_id(&self, name: &str) -> Result<AttrId> {
        name_to_id(name)
    }

    fn id_to_name(&self, id: AttrId) -> String {
        id_to_name(id)
    }
}

/// Resolve an attribute name (or literal ID) to its numeric ID.
pub fn name_to_id(name: &str) -> Result<AttrId> {
    if let Some(attr) = SpectrumAttribute::from_name(name) {
        return Ok(attr.id());
    }

    match parse_int_literal(name) {
        Some(raw) => {
            trace!(attr = name, id = raw, "attribute resolved as integer literal");
            Ok(AttrId(raw))
        }
        None => Err(Error::UnknownAttribute(name.to_string())),
    }
}

/// Reverse lookup; uncatalogued IDs come back as lowercase hex.
pub fn id_to_name(id: AttrId) -> String {
    match SpectrumAttribute::from_id(id) {
        Some(attr) => attr.name().to_string(),
        None => id.to_string(),
    }
}

/// Reverse lookup for an ID given as text, e.g. the `id` field of a response.
pub fn id_str_to_name(text: &str) -> Result<String> {
    parse_int_literal(text)
        .map(|raw| id_to_name(AttrId(raw)))
        .ok_or_else(|| Error::UnknownAttribute(text.to_string()))
}

/// Normalize names or literal IDs to canonical hex strings.
pub fn normalize_attrs<S: AsRef<str>>(attrs: &[S]) -> Result<Vec<String>> {
    attrs
        .iter()
        .map(|attr| name_to_id(attr.as_ref()).map(|id| id.to_string()))
        .collect()
}

/// Parse an integer literal with optional sign and radix prefix.
///
/// Accepts `0x`/`0o`/`0b` prefixes (any case), `_` between digits, and
/// plain decimal. Decimal literals may not have leading zeros unless the
/// whole literal is zero.
fn parse_int_literal(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, body) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = match body.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("0x") => (16, &body[2..]),
        Some(prefix) if prefix.eq_ignore_ascii_case("0o") => (8, &body[2..]),
        Some(prefix) if prefix.eq_ignore_ascii_case("0b") => (2, &body[2..]),
        _ => (10, body),
    };

    // 0x_1f is valid, _1f is not
    let digits = if radix == 10 {
        digits
    } else {
        digits.strip_prefix('_').unwrap_or(digits)
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return None;
    }

    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if !cleaned.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    if radix == 10 && cleaned.starts_with('0') && cleaned.bytes().any(|b| b != b'0') {
        return None;
    }

    // Wide enough for the magnitude of i64::MIN.
    let magnitude = i128::from_str_radix(&cleaned, radix).ok()?;
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{
        id_str_to_name, id_to_name, name_to_id, normalize_attrs, AttrId, AttributeResolver, SpectrumAttribute,
        SpectrumCatalogue,
    };
    use crate::Error;

    #[test]
    fn test_name_lookup_is_case_insensitive() {
        assert_eq!(name_to_id("model_name").unwrap(), AttrId(0x1006E));
        assert_eq!(name_to_id("MODEL_NAME").unwrap(), AttrId(0x1006E));
        assert_eq!(name_to_id("Device_Type").unwrap(), AttrId(0x23000E));
    }

    #[test]
    fn test_literal_fallback() {
        assert_eq!(name_to_id("0x1006e").unwrap(), AttrId(0x1006E));
        assert_eq!(name_to_id("0X1006E").unwrap(), AttrId(0x1006E));
        assert_eq!(name_to_id("65646").unwrap(), AttrId(65646));
        assert_eq!(name_to_id("0o17").unwrap(), AttrId(0o17));
        assert_eq!(name_to_id("0b101").unwrap(), AttrId(5));
        assert_eq!(name_to_id("1_000").unwrap(), AttrId(1000));
        assert_eq!(name_to_id("0x_ff").unwrap(), AttrId(255));
        assert_eq!(name_to_id("0").unwrap(), AttrId(0));
        assert_eq!(name_to_id("000").unwrap(), AttrId(0));
        assert_eq!(name_to_id("-5").unwrap(), AttrId(-5));
    }

    #[test]
    fn test_literal_range_edges() {
        assert_eq!(name_to_id("-0x8000000000000000").unwrap(), AttrId(i64::MIN));
        assert_eq!(name_to_id("-9223372036854775808").unwrap(), AttrId(i64::MIN));
        assert_eq!(name_to_id("0x7fffffffffffffff").unwrap(), AttrId(i64::MAX));
        assert_eq!(AttrId(i64::MIN).to_string(), "-0x8000000000000000");

        for text in ["0x8000000000000000", "-0x8000000000000001", "0x1_0000_0000_0000_0000_0000_0000_0000_0000"] {
            assert!(
                matches!(name_to_id(text), Err(Error::UnknownAttribute(ref t)) if t == text),
                "{text}"
            );
        }
    }

    #[test]
    fn test_unknown_attribute() {
        for bad in ["not_a_real_attr", "23000e", "0x", "010", "1__0", "_1", "1_", "--5", "0xzz", ""] {
            match name_to_id(bad) {
                Err(Error::UnknownAttribute(token)) => assert_eq!(token, bad),
                other => panic!("expected UnknownAttribute for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_attr_id_display() {
        assert_eq!(AttrId(0x1006E).to_string(), "0x1006e");
        assert_eq!(AttrId(0).to_string(), "0x0");
        assert_eq!(AttrId(-255).to_string(), "-0xff");
        assert_eq!(AttrId::from(0x10000u32).to_string(), "0x10000");
    }

    #[test]
    fn test_id_to_name() {
        assert_eq!(id_to_name(AttrId(0x1006E)), "model_name");
        assert_eq!(id_to_name(AttrId(0xABCDEF)), "0xabcdef");
        assert_eq!(id_str_to_name("0x1000a").unwrap(), "condition");
        assert_eq!(id_str_to_name("0x99").unwrap(), "0x99");
        assert!(id_str_to_name("nope").is_err());
    }

    #[test]
    fn test_catalogue_is_consistent() {
        for attr in SpectrumAttribute::ALL {
            assert_eq!(SpectrumAttribute::from_name(attr.name()), Some(attr));
            assert_eq!(SpectrumAttribute::from_id(attr.id()), Some(attr));
            assert_eq!(id_to_name(attr.id()), attr.name());
        }
    }

    #[test]
    fn test_normalize_attrs() {
        let attrs = normalize_attrs(&["model_handle", "0x10030", "CONDITION"]).unwrap();
        assert_eq!(attrs, vec!["0x129fa", "0x10030", "0x1000a"]);

        assert!(matches!(
            normalize_attrs(&["model_name", "bogus"]),
            Err(Error::UnknownAttribute(ref t)) if t == "bogus"
        ));
    }

    #[test]
    fn test_catalogue_resolver_trait() {
        let resolver = SpectrumCatalogue;
        assert_eq!(resolver.name_to_id("sys_desc").unwrap(), AttrId(0x10052));
        assert_eq!(resolver.id_to_name(AttrId(0x10052)), "sys_desc");
    }

    proptest! {
        #[test]
        fn prop_hex_literal_matches_id(raw in 0i64..=0xFFFF_FFFF) {
            let text = format!("{:#x}", raw);
            prop_assert_eq!(name_to_id(&text).unwrap(), AttrId(raw));
            prop_assert_eq!(name_to_id(&text).unwrap().to_string(), text);
        }

        #[test]
        fn prop_decimal_literal_matches_id(raw in 0i64..=i64::MAX) {
            prop_assert_eq!(name_to_id(&raw.to_string()).unwrap(), AttrId(raw));
        }
    }
}
