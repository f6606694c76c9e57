//! Wire models of the REST backend and configuration models.

use serde::{Deserialize, Deserializer};

#[cfg(feature = "client")]
pub mod config;
#[cfg(feature = "client")]
pub mod definition;
pub mod package;

/// Decimal columns are rendered as strings (`"20.00"`) by the backend but
/// plain numbers are accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum Decimal {
    Number(f64),
    Text(String),
}

impl Decimal {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            Decimal::Number(value) => Ok(value),
            Decimal::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|err| E::custom(format!("invalid decimal {text:?}: {err}"))),
        }
    }
}

pub(crate) fn de_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Decimal::deserialize(deserializer)?.into_f64()
}

pub(crate) fn de_opt_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Decimal>::deserialize(deserializer)?
        .map(|decimal| decimal.into_f64::<D::Error>())
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "de_decimal")]
        value: f64,
        #[serde(default, deserialize_with = "de_opt_decimal")]
        optional: Option<f64>,
    }

    #[test]
    fn decimals_accept_strings_and_numbers() {
        let probe: Probe = serde_json::from_value(json!({"value": "12.50"})).unwrap();
        assert_eq!(probe.value, 12.5);
        assert_eq!(probe.optional, None);

        let probe: Probe =
            serde_json::from_value(json!({"value": 7, "optional": "3.00"})).unwrap();
        assert_eq!(probe.value, 7.0);
        assert_eq!(probe.optional, Some(3.0));

        assert!(serde_json::from_value::<Probe>(json!({"value": "abc"})).is_err());
    }
}
