//! Delivery information required to ship physical products.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`DeliveryInfo`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryInfoError {
    /// A required field is empty or only whitespace.
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Shipping speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    #[default]
    Standard,
    Express,
}

impl DeliveryMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a delivery mode name is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown delivery mode: {0} (expected standard or express)")]
pub struct UnknownDeliveryMode(pub String);

impl std::str::FromStr for DeliveryMode {
    type Err = UnknownDeliveryMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            _ => Err(UnknownDeliveryMode(s.to_owned())),
        }
    }
}

/// A saved delivery record.
///
/// Name, address and phone are non-empty. The record is only ever replaced
/// as a whole.
///
/// ## Examples
///
/// ```
/// use marketplace_core::{DeliveryInfo, DeliveryMode};
///
/// let info = DeliveryInfo::new("Jean Dupont", "1 Rue X", "0600000000", DeliveryMode::Express);
/// assert!(info.is_ok());
///
/// let missing_phone = DeliveryInfo::new("Jean Dupont", "1 Rue X", "  ", DeliveryMode::Standard);
/// assert!(missing_phone.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DeliveryForm")]
pub struct DeliveryInfo {
    #[serde(rename = "nom")]
    name: String,
    #[serde(rename = "adresse")]
    address: String,
    #[serde(rename = "telephone")]
    phone: String,
    mode: DeliveryMode,
}

impl DeliveryInfo {
    /// Build a delivery record.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryInfoError::MissingField`] naming the first empty
    /// field among name, address and phone.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        mode: DeliveryMode,
    ) -> Result<Self, DeliveryInfoError> {
        Ok(Self {
            name: required("nom", name.into())?,
            address: required("adresse", address.into())?,
            phone: required("telephone", phone.into())?,
            mode,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    #[must_use]
    pub const fn mode(&self) -> DeliveryMode {
        self.mode
    }
}

fn required(field: &'static str, value: String) -> Result<String, DeliveryInfoError> {
    if value.trim().is_empty() {
        return Err(DeliveryInfoError::MissingField(field));
    }
    Ok(value)
}

/// Editable delivery form state.
///
/// Fields hold whatever the user typed; nothing is validated until the form
/// is turned into a [`DeliveryInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeliveryForm {
    #[serde(rename = "nom", default)]
    pub name: String,
    #[serde(rename = "adresse", default)]
    pub address: String,
    #[serde(rename = "telephone", default)]
    pub phone: String,
    #[serde(default)]
    pub mode: DeliveryMode,
}

impl DeliveryForm {
    /// Validate the form into a delivery record.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryInfoError::MissingField`] if a required field is empty.
    pub fn to_info(&self) -> Result<DeliveryInfo, DeliveryInfoError> {
        DeliveryInfo::new(
            self.name.clone(),
            self.address.clone(),
            self.phone.clone(),
            self.mode,
        )
    }
}

impl From<&DeliveryInfo> for DeliveryForm {
    fn from(info: &DeliveryInfo) -> Self {
        Self {
            name: info.name.clone(),
            address: info.address.clone(),
            phone: info.phone.clone(),
            mode: info.mode,
        }
    }
}

impl TryFrom<DeliveryForm> for DeliveryInfo {
    type Error = DeliveryInfoError;

    fn try_from(form: DeliveryForm) -> Result<Self, Self::Error> {
        Self::new(form.name, form.address, form.phone, form.mode)
    }
}
