use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

/// 序列化字节为 base64 字符串。
pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&STANDARD.encode(bytes))
}

/// 反序列化 base64 字符串为字节。
pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    STANDARD.decode(encoded.as_bytes()).map_err(D::Error::custom)
}

pub mod option {
    use super::{Deserialize, Deserializer, Serializer, STANDARD};
    use base64::Engine as _;
    use serde::de::Error as _;

    /// 序列化 Option<Vec<u8>> 为 base64 字符串。
    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    /// 反序列化 base64 字符串为 Option<Vec<u8>>。
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|value| STANDARD.decode(value.as_bytes()).map_err(D::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "crate::base64_serde")]
        data: Vec<u8>,
        #[serde(default, with = "crate::base64_serde::option")]
        signature: Option<Vec<u8>>,
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let result = serde_json::from_str::<Wrapper>(r#"{"data": "not base64!"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_field_is_none() {
        let wrapper: Wrapper = serde_json::from_str(r#"{"data": "iVBORw=="}"#).unwrap();
        assert_eq!(wrapper.data, vec![0x89, 0x50, 0x4e, 0x47]);
        assert!(wrapper.signature.is_none());
    }
}
