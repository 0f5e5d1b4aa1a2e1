//! Wire shapes of the list endpoint.

use serde::{Deserialize, Serialize};

/// A record identifier as sent by the server: a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    /// The integer id, if the value is one.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            RawId::Number(n) => Some(*n),
            RawId::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One item record as the server sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "_id")]
    pub id: RawId,
    pub nama_barang: String,
    #[serde(default)]
    pub berat: Option<f64>,
    /// Purity / grade label.
    #[serde(default)]
    pub kadar: Option<String>,
    pub kode_barang: String,
    /// Size label. Carried but not mapped onto dimensions.
    #[serde(default)]
    pub size: Option<serde_json::Value>,
    #[serde(default)]
    pub harga_jual_catalog: Option<f64>,
}

/// Page metadata reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_pages: usize,
    pub page: usize,
    pub total: usize,
    pub limit: usize,
}

/// Body of a successful list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: Vec<RawRecord>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_response() {
        let body = r#"{
            "data": [
                {"_id": "17", "nama_barang": "Cincin Emas", "berat": 3.2, "kadar": "22K",
                 "kode_barang": "CC-017", "size": "12", "harga_jual_catalog": 2500000},
                {"_id": 18, "nama_barang": "Anting", "kode_barang": "AT-018"}
            ],
            "meta": {"totalPages": 4, "page": 1, "total": 37, "limit": 10}
        }"#;

        let response: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].id.to_i64(), Some(17));
        assert_eq!(response.data[1].id.to_i64(), Some(18));
        assert_eq!(response.data[1].berat, None);
        assert_eq!(response.meta.total, 37);
        assert_eq!(response.meta.total_pages, 4);
    }

    #[test]
    fn test_non_numeric_id() {
        assert_eq!(RawId::Text("abc".into()).to_i64(), None);
    }
}
