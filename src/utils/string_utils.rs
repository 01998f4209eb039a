//! 문자열 정리 유틸리티
//!
//! 프로바이더 응답에는 "값 없음"이 `null`, 빈 문자열, 공백 문자열 등으로 섞여 옵니다.
//! 이 모듈의 함수로 모두 `None`으로 맞춥니다.

use serde::Deserialize;

/// 비어 있거나 공백뿐이면 `None`, 아니면 원래 값을 그대로 돌려줍니다.
///
/// 이메일처럼 글자 그대로 비교해야 하는 값에 사용합니다. 앞뒤 공백도 자르지 않습니다.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// 앞뒤 공백을 제거하고, 남는 것이 없으면 `None`을 돌려줍니다.
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

/// 둘 중 처음으로 비어 있지 않은 값을 고릅니다.
pub fn first_non_blank(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    clean_optional_string(primary).or_else(|| clean_optional_string(fallback))
}

/// `#[serde(deserialize_with = "...")]`용. 공백 제거 후 빈 값은 `None`.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// `#[serde(deserialize_with = "...")]`용. 빈 값만 `None`으로 바꾸고 내용은 손대지 않습니다.
pub fn deserialize_non_blank_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(non_blank(opt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank_keeps_value_verbatim() {
        assert_eq!(non_blank(Some("A@X.com".to_string())), Some("A@X.com".to_string()));
        assert_eq!(non_blank(Some(" a@x.com".to_string())), Some(" a@x.com".to_string()));
        assert_eq!(non_blank(Some("".to_string())), None);
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("Hello".to_string())), Some("Hello".to_string()));
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("\t\n".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_first_non_blank() {
        assert_eq!(
            first_non_blank(Some("".to_string()), Some("Fallback".to_string())),
            Some("Fallback".to_string())
        );
        assert_eq!(
            first_non_blank(Some("Primary".to_string()), Some("Fallback".to_string())),
            Some("Primary".to_string())
        );
        assert_eq!(first_non_blank(None, None), None);
    }

    #[test]
    fn test_deserialize_helpers() {
        #[derive(Deserialize)]
        struct Payload {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            name: Option<String>,
            #[serde(default, deserialize_with = "deserialize_non_blank_string")]
            email: Option<String>,
        }

        let parsed: Payload = serde_json::from_str(r#"{"name": "  안녕하세요  ", "email": ""}"#).unwrap();
        assert_eq!(parsed.name, Some("안녕하세요".to_string()));
        assert_eq!(parsed.email, None);

        let parsed: Payload = serde_json::from_str(r#"{"name": null, "email": "Mixed@Case.io"}"#).unwrap();
        assert_eq!(parsed.name, None);
        assert_eq!(parsed.email, Some("Mixed@Case.io".to_string()));

        let parsed: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.name, None);
        assert_eq!(parsed.email, None);
    }
}
