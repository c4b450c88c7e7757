//! Multipart form reading and form-value parsing

use std::collections::HashMap;

use axum::extract::Multipart;
use chrono::{DateTime, NaiveDate};
use http::StatusCode;
use shared::error::{AppError, ErrorCode};

use crate::upload::{UploadRule, UploadedFile};

/// Text fields and file parts of one multipart request
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Buffer the whole form. Parts with a file name are files, the rest text.
    ///
    /// A body over the route limit reports `rule`'s size message.
    pub async fn read(mut multipart: Multipart, rule: &UploadRule) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, rule))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let data = field.bytes().await.map_err(|e| multipart_error(e, rule))?;
                    // An untouched file input arrives as an empty, unnamed part
                    if file_name.is_empty() && data.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name: Some(file_name),
                            data: data.to_vec(),
                        },
                    );
                }
                None => {
                    let text = field.text().await.map_err(|e| multipart_error(e, rule))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// Field value as sent (may be empty)
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Trimmed, non-empty field value
    pub fn text(&self, name: &str) -> Option<&str> {
        self.raw(name).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    #[cfg(test)]
    pub fn from_fields(fields: &[(&str, &str)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: HashMap::new(),
        }
    }
}

fn multipart_error(e: axum::extract::multipart::MultipartError, rule: &UploadRule) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::with_message(ErrorCode::FileTooLarge, rule.too_large_message)
    } else {
        AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
    }
}

/// Integer field read from its leading digits (`"12abc"` is 12).
///
/// `default` when absent, when no digits lead the value, or on overflow.
pub fn int_or(raw: Option<&str>, default: i32) -> i32 {
    let Some(value) = raw.map(str::trim_start) else {
        return default;
    };
    let sign = usize::from(value.starts_with(['+', '-']));
    let digits = value[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return default;
    }
    value[..sign + digits].parse().unwrap_or(default)
}

/// Checkbox-style flag: only the literal `"true"` is true
pub fn flag(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| v.trim() == "true")
}

/// RFC 3339 timestamp or `YYYY-MM-DD` (UTC midnight) as Unix millis
pub fn parse_date(raw: &str) -> Result<i64, AppError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
        .ok_or_else(|| AppError::new(ErrorCode::InvalidDate).with_detail("value", raw))
}
