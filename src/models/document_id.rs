//! Identificador de documento
//!
//! Identificadores de 24 caracteres hexadecimales (12 bytes) con la misma
//! estructura que un ObjectId: timestamp en segundos, 5 bytes aleatorios del
//! proceso y un contador de 3 bytes.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::errors::AppError;

lazy_static! {
    static ref DOCUMENT_ID_RE: Regex = Regex::new("^[0-9a-fA-F]{24}$").unwrap();
    static ref PROCESS_BYTES: [u8; 5] = rand::thread_rng().gen();
    static ref COUNTER: AtomicU32 = AtomicU32::new(rand::thread_rng().gen_range(0..0x00FF_FFFF));
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Generar un identificador nuevo
    pub fn generate() -> Self {
        let seconds = chrono::Utc::now().timestamp() as u32;
        let counter = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00FF_FFFF;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_BYTES);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);

        Self(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// Validar y normalizar un identificador recibido del cliente
    pub fn parse(value: &str) -> Result<Self, AppError> {
        if !DOCUMENT_ID_RE.is_match(value) {
            return Err(AppError::BadRequest(format!("Invalid document ID '{}'", value)));
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    /// Identificador fijo, conocido de antemano
    pub fn well_known(value: &'static str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).map_err(|e| e.to_string())
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}
