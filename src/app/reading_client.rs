//! Remote query client for almanac readings.
//!
//! Translates a calendar date into a Vietnamese prompt for the remote AI
//! service and normalizes the outcome into a [`Reading`] or a single
//! [`ReadingError`]. One POST per consultation, no retries, no caching.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Fixed address of the reading service. The payload shape is
/// `{ "prompt": <string> }` and the reply shape is
/// `{ "result": <string>, "used_model": <string> }`.
pub const READING_ENDPOINT: &str = "https://groqprompt.netlify.app/api/ai";

/// User-facing failure message. Every transport or payload problem
/// collapses into this; the technical detail only goes to the log.
const UNREACHABLE_MESSAGE: &str = "Không thể kết nối đến máy chủ AI.";

/// A completed reading for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Markdown (GFM) text of the reading.
    pub text: String,
    /// Label of the model that produced the reading.
    pub model_id: String,
}

/// Single error kind for the whole request path.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingError(String);

impl ReadingError {
    /// Error with a message that is shown verbatim to the user.
    pub fn new(message: impl Into<String>) -> Self {
        ReadingError(message.into())
    }

    fn unreachable() -> Self {
        ReadingError::new(UNREACHABLE_MESSAGE)
    }
}

impl std::fmt::Display for ReadingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ReadingError {}

/// Request payload for the reading service.
#[derive(Debug, Serialize)]
struct ReadingRequest<'a> {
    prompt: &'a str,
}

/// Reply payload from the reading service. Both fields are required;
/// a reply missing either one is treated as malformed.
#[derive(Debug, Deserialize)]
struct ReadingResponse {
    result: String,
    used_model: String,
}

/// HTTP client for the reading service.
pub struct ReadingClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl Default for ReadingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingClient {
    pub fn new() -> Self {
        Self::with_endpoint(READING_ENDPOINT)
    }

    /// Client against a non-default address. Production code always uses
    /// [`READING_ENDPOINT`]; tests point this at an unreachable port.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the consultation prompt for a date.
    ///
    /// The template is constant; the only variable is the date, formatted
    /// zero-padded as DD/MM/YYYY for the Vietnamese audience. The prompt
    /// asks for GFM output: calendar conversion, Tiết khí and Trực, a star
    /// table, an activity checklist, auspicious hours and one closing
    /// sentence.
    pub fn build_prompt(date: NaiveDate) -> String {
        let date_str = date.format("%d/%m/%Y").to_string();
        format!(
            r#"Đóng vai trò là chuyên gia phong thủy. Tra cứu ngày **{date_str} (Dương lịch)** theo Ngọc Hạp Thông Thư.

Yêu cầu output định dạng **Markdown (GFM)**:

### 📅 Thông tin ngày
* <Nội dung chuyển đổi Âm lịch, Can chi>

### 🌟 Tiết khí & Trực
* <Nội dung>

### ⚖️ Phân tích Sao (Cát Tinh - Hung Tinh)
*(Hãy trả về dưới dạng bảng)*
| Loại Sao | Tên Sao | Ảnh hưởng |
| :--- | :--- | :--- |
| **Sao Tốt** | ... | ... |
| **Sao Xấu** | ... | ... |

### 🛠 Khuyến nghị Việc làm
*(Dùng check list)*
- [x] **Nên làm**: ...
- [ ] **Nên kiêng**: ...

### ⏰ Giờ Hoàng Đạo
*(Trả về dạng danh sách hoặc bảng tùy chọn)*

**Lời khuyên:** <Một câu kết luận>"#
        )
    }

    /// Request a reading for `date`.
    ///
    /// Performs exactly one POST and blocks until it resolves; callers on
    /// the UI thread run this on a worker thread. Any transport failure,
    /// non-2xx status or malformed body is normalized into one generic
    /// [`ReadingError`].
    pub fn fetch_reading(&self, date: NaiveDate) -> Result<Reading, ReadingError> {
        let prompt = Self::build_prompt(date);
        info!("Requesting reading for {}", date.format("%d/%m/%Y"));

        let response = self
            .http
            .post(&self.endpoint)
            .json(&ReadingRequest { prompt: &prompt })
            .send()
            .map_err(|e| {
                error!("Reading request failed to send: {}", e);
                ReadingError::unreachable()
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Reading service returned status {}", status);
            return Err(ReadingError::unreachable());
        }

        let body: ReadingResponse = response.json().map_err(|e| {
            error!("Reading service reply was malformed: {}", e);
            ReadingError::unreachable()
        })?;

        info!("Received reading from model {}", body.used_model);
        Ok(Reading {
            text: body.result,
            model_id: body.used_model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prompt_contains_zero_padded_date() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        let prompt = ReadingClient::build_prompt(date);
        assert!(prompt.contains("03/02/2026"));
        // The original calendar system of the date must be spelled out
        assert!(prompt.contains("(Dương lịch)"));
    }

    #[test]
    fn prompt_requests_every_section() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let prompt = ReadingClient::build_prompt(date);
        for section in [
            "Thông tin ngày",
            "Tiết khí & Trực",
            "Phân tích Sao",
            "Khuyến nghị Việc làm",
            "Giờ Hoàng Đạo",
            "Lời khuyên",
        ] {
            assert!(prompt.contains(section), "missing section: {}", section);
        }
        // Table and checklist scaffolding for GFM output
        assert!(prompt.contains("| Loại Sao | Tên Sao | Ảnh hưởng |"));
        assert!(prompt.contains("- [x]"));
        assert!(prompt.contains("- [ ]"));
    }

    #[test]
    fn prompt_only_varies_in_the_date() {
        let a = ReadingClient::build_prompt(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let b = ReadingClient::build_prompt(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
        assert_eq!(
            a.replace("01/01/2026", "<d>"),
            b.replace("02/01/2026", "<d>")
        );
    }

    #[test]
    fn well_formed_reply_parses() {
        let body = r####"{"result": "### Ngày tốt", "used_model": "llama-3.3-70b"}"####;
        let parsed: ReadingResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.result, "### Ngày tốt");
        assert_eq!(parsed.used_model, "llama-3.3-70b");
    }

    #[test]
    fn reply_missing_model_is_malformed() {
        let body = r####"{"result": "### Ngày tốt"}"####;
        assert!(serde_json::from_str::<ReadingResponse>(body).is_err());
    }

    #[test]
    fn reply_missing_result_is_malformed() {
        let body = r#"{"used_model": "llama-3.3-70b"}"#;
        assert!(serde_json::from_str::<ReadingResponse>(body).is_err());
    }

    #[test]
    fn error_displays_user_facing_message() {
        let err = ReadingError::unreachable();
        assert_eq!(err.to_string(), "Không thể kết nối đến máy chủ AI.");
    }

    #[test]
    fn unreachable_endpoint_normalizes_to_reading_error() {
        // Port 1 is never listening; the connection is refused immediately.
        let client = ReadingClient::with_endpoint("http://127.0.0.1:1/api/ai");
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let err = client.fetch_reading(date).unwrap_err();
        assert_eq!(err.to_string(), "Không thể kết nối đến máy chủ AI.");
    }
}
