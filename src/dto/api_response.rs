use std::str::FromStr;

use serde::Serialize;

use crate::utils::errors::{AppError, AppResult};

/// Tamaño de página por defecto de las tablas
pub const DEFAULT_PAGE_SIZE: usize = 8;
pub const MAX_PAGE_SIZE: usize = 100;

// Response genérica: {success, message, data?, error?}
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
        }
    }
}

/// Resultado de un listado: la página pedida y el total sin paginar
#[derive(Debug)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Ventana de paginación ya resuelta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: usize,
    pub limit: usize,
}

/// Resolver `page` (base 1) y `limit`; sin ninguno de los dos no se pagina
pub fn page_window(page: Option<usize>, limit: Option<usize>) -> AppResult<Option<PageWindow>> {
    if page.is_none() && limit.is_none() {
        return Ok(None);
    }

    let page = page.unwrap_or(1);
    if page == 0 {
        return Err(AppError::BadRequest("page must be 1 or greater".to_string()));
    }
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    Ok(Some(PageWindow {
        skip: (page - 1) * limit,
        limit,
    }))
}

/// Filtro de estado: vacío o `all` significa sin filtro
pub fn status_filter<S>(raw: Option<&str>) -> AppResult<Option<S>>
where
    S: FromStr<Err = String>,
{
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(AppError::BadRequest),
    }
}
