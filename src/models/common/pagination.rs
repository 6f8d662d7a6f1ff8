use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 分页查询参数，页大小由各接口固定
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
}

// 分页信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PageInfo {
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub total_pages: i64,
    pub total_items: i64,
}

impl PageInfo {
    /// 根据当前页（从 1 开始）与总数计算分页信息
    pub fn new(page: u64, total_items: u64, total_pages: u64) -> Self {
        Self {
            has_previous_page: page > 1,
            has_next_page: page < total_pages,
            total_pages: total_pages as i64,
            total_items: total_items as i64,
        }
    }
}

// 分页列表
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct Paginated<T: TS> {
    pub data: Vec<T>,
    pub page_info: PageInfo,
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            i64::try_from(value).map_err(|_| Error::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

fn default_page() -> i64 {
    1
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl PaginationQuery {
    /// 规范化页码（最小为 1）
    pub fn page(&self) -> u64 {
        self.page.max(1) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_info_edges() {
        let first = PageInfo::new(1, 45, 3);
        assert!(!first.has_previous_page);
        assert!(first.has_next_page);

        let last = PageInfo::new(3, 45, 3);
        assert!(last.has_previous_page);
        assert!(!last.has_next_page);

        let empty = PageInfo::new(1, 0, 0);
        assert!(!empty.has_previous_page);
        assert!(!empty.has_next_page);
    }

    #[test]
    fn test_page_info_serializes_camel_case() {
        let json = serde_json::to_value(PageInfo::new(2, 30, 3)).unwrap();
        assert_eq!(json["hasPreviousPage"], true);
        assert_eq!(json["totalItems"], 30);
    }

    #[test]
    fn test_page_from_string_query() {
        let q: PaginationQuery = serde_json::from_str(r#"{"page":"3"}"#).unwrap();
        assert_eq!(q.page(), 3);
        let q: PaginationQuery = serde_json::from_str(r#"{"page":-4}"#).unwrap();
        assert_eq!(q.page(), 1);
    }
}
