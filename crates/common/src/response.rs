use serde::{Deserialize, Serialize};

use crate::locale::{Locale, Message};
use crate::pagination::PageResult;

/// Code returned by data-carrying responses.
pub const SUCCESS_CODE: &str = "00000";

/// Uniform result envelope. Business outcomes (including failures) travel
/// through `code`/`msg`; transport-level errors never reach this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Response<T> {
    pub fn data(data: T) -> Self {
        Self {
            code: SUCCESS_CODE.to_string(),
            msg: None,
            data: Some(data),
        }
    }

    pub fn message(message: &Message, locale: Locale) -> Self {
        Self {
            code: message.code.to_string(),
            msg: Some(message.text(locale).to_string()),
            data: None,
        }
    }

    pub fn is(&self, message: &Message) -> bool {
        self.code == message.code
    }
}

impl<T> Response<PageResult<T>> {
    pub fn page(page: PageResult<T>) -> Self {
        Response::data(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK: Message = Message::new("T0001", "成功", "done");

    #[test]
    fn data_response_carries_success_code() {
        let resp = Response::data(vec![1, 2, 3]);
        assert_eq!(resp.code, SUCCESS_CODE);
        assert_eq!(resp.data, Some(vec![1, 2, 3]));
        assert!(resp.msg.is_none());
    }

    #[test]
    fn message_response_localizes() {
        let resp: Response<String> = Response::message(&OK, Locale::ZhCn);
        assert_eq!(resp.code, "T0001");
        assert_eq!(resp.msg.as_deref(), Some("成功"));
        assert!(resp.is(&OK));
    }

    #[test]
    fn serialization_omits_absent_fields() {
        let resp: Response<String> = Response::message(&OK, Locale::En);
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["msg"], "done");
    }
}
