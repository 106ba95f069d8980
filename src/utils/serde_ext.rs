//! Helpers de serialización compartidos por los modelos

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};

/// Instante actual truncado a milisegundos (precisión almacenada)
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Convierte `""` (valor típico de formularios) en `None`
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Timestamps RFC3339 en UTC con milisegundos fijos.
///
/// El ancho fijo hace que el orden lexicográfico coincida con el cronológico,
/// lo que permite ordenar por `createdAt` directamente sobre el documento.
pub mod timestamp {
    use super::*;
    use serde::Serializer;

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_have_fixed_width() {
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let late = early + chrono::Duration::milliseconds(1500);

        assert_eq!(timestamp::format(&early), "2024-01-01T00:00:00.000Z");
        assert!(timestamp::format(&early) < timestamp::format(&late));
    }

    #[test]
    fn now_is_truncated_to_millis() {
        assert_eq!(now().timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
