//! Feed Module
//!
//! カタログレコードとコードレコードを製品名で結合し、出力用の製品リストを作ります。

use serde::Serialize;
use std::collections::HashMap;

use crate::records::{CatalogRecord, CodeRecord};

/// 出力1件分の製品
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinedProduct {
    /// カタログ順の連番（1始まり）
    pub product_unique_id: usize,
    pub name: String,
    pub product_url: String,
    pub image_url: String,
    pub description: String,
    /// 一致したレコードのUPCをすべて並べ、その後にGTINをすべて並べたもの
    pub upcs: Vec<String>,
}

/// ワークブックから抽出したカタログとコード
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    pub catalog: Vec<CatalogRecord>,
    pub codes: Vec<CodeRecord>,
}

impl Feed {
    /// カタログとコードを結合した製品リスト
    pub fn products(&self) -> Vec<JoinedProduct> {
        join_products(&self.catalog, &self.codes)
    }
}

/// カタログとコードを製品名の完全一致（大文字小文字を区別、正規化なし）で結合する
///
/// コード列は、一致したレコードの`primary_code`をレコード順にすべて並べたあと、
/// `secondary_code`を同じ順に並べます（交互には並べません）。
/// 一致するコードがない製品も空のコード列で出力されます。
pub fn join_products(catalog: &[CatalogRecord], codes: &[CodeRecord]) -> Vec<JoinedProduct> {
    let mut by_name: HashMap<&str, Vec<&CodeRecord>> = HashMap::new();
    for code in codes {
        by_name
            .entry(code.product_name.as_str())
            .or_default()
            .push(code);
    }

    catalog
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let matches = by_name
                .get(record.name.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            let upcs = matches
                .iter()
                .map(|code| code.primary_code.clone())
                .chain(matches.iter().map(|code| code.secondary_code.clone()))
                .collect();

            JoinedProduct {
                product_unique_id: index + 1,
                name: record.name.clone(),
                product_url: record.product_url.clone(),
                image_url: record.image_url.clone(),
                description: record.description.clone(),
                upcs,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str) -> CatalogRecord {
        CatalogRecord {
            name: name.to_string(),
            product_url: format!("https://example.com/{}", name),
            image_url: format!("https://example.com/{}.png", name),
            description: format!("{} description", name),
        }
    }

    fn code(name: &str, upc: &str, gtin: &str) -> CodeRecord {
        CodeRecord {
            product_name: name.to_string(),
            primary_code: upc.to_string(),
            secondary_code: gtin.to_string(),
        }
    }

    #[test]
    fn test_sequential_ids() {
        let products = join_products(&[product("A"), product("B"), product("C")], &[]);
        let ids: Vec<usize> = products.iter().map(|p| p.product_unique_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_primary_codes_then_secondary_codes() {
        let products = join_products(
            &[product("Widget")],
            &[
                code("Widget", "111", "AAA"),
                code("Other", "999", "ZZZ"),
                code("Widget", "222", "BBB"),
            ],
        );
        assert_eq!(products[0].upcs, vec!["111", "222", "AAA", "BBB"]);
    }

    #[test]
    fn test_no_matching_codes() {
        let products = join_products(&[product("Lonely")], &[code("Widget", "111", "AAA")]);
        assert_eq!(products.len(), 1);
        assert!(products[0].upcs.is_empty());
    }

    #[test]
    fn test_join_is_case_sensitive() {
        let products = join_products(
            &[product("widget")],
            &[code("Widget", "111", "AAA"), code("widget ", "222", "BBB")],
        );
        assert!(products[0].upcs.is_empty());
    }

    #[test]
    fn test_codes_with_unknown_products_are_dropped() {
        let products = join_products(&[], &[code("Widget", "111", "AAA")]);
        assert!(products.is_empty());
    }

    #[test]
    fn test_feed_products() {
        let feed = Feed {
            catalog: vec![product("Widget")],
            codes: vec![code("Widget", "111", "AAA")],
        };
        let products = feed.products();
        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[0].upcs, vec!["111", "AAA"]);
    }
}
