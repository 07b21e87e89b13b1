//! 문자열 처리 유틸리티
//!
//! 폼 입력 정리, 검증 에러 메시지 추출, HTML 이스케이프,
//! 비밀 값 비교 함수를 제공합니다.

use serde::Deserialize;
use validator::ValidationErrors;

/// 공백만 있는 선택 문자열을 `None` 으로 정리합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// serde `deserialize_with` 용: 빈 폼 필드를 `None` 으로 받습니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 검증 에러에서 사용자에게 보여줄 첫 번째 메시지를 꺼냅니다.
///
/// 필드 이름 순으로 정렬해 항상 같은 메시지가 선택되도록 합니다.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "입력값이 올바르지 않습니다".to_string())
}

/// HTML 텍스트/속성 값으로 안전하게 넣을 수 있도록 이스케이프합니다.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 길이 외의 정보가 타이밍으로 새지 않는 바이트 비교
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("Hello".to_string())), Some("Hello".to_string()));
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("".to_string())), None);
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct Form {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            name: Option<String>,
        }

        let form: Form = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        assert_eq!(form.name, None);

        let form: Form = serde_json::from_str(r#"{"name": " Alice "}"#).unwrap();
        assert_eq!(form.name, Some("Alice".to_string()));

        let form: Form = serde_json::from_str("{}").unwrap();
        assert_eq!(form.name, None);
    }

    #[test]
    fn test_first_validation_message() {
        #[derive(Validate)]
        struct Input {
            #[validate(length(min = 1, message = "a는 필수입니다"))]
            a: String,
            #[validate(length(min = 1, message = "b는 필수입니다"))]
            b: String,
        }

        let errors = Input { a: String::new(), b: String::new() }.validate().unwrap_err();
        assert_eq!(first_validation_message(&errors), "a는 필수입니다");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("Tom & Jerry's"), "Tom &amp; Jerry&#x27;s");
        assert_eq!(escape_html("라이언"), "라이언");
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
    }
}
