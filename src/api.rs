//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 出力フォーマット
///
/// 結合した製品リストをどの形式で書き出すかを指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputFormat {
    /// XMLフィード（デフォルト）
    ///
    /// # 出力例
    ///
    /// ```xml
    /// <Feed xmlnsxsi="http://www.w3.org/2001/XMLSchema-instance">
    ///   <Products>
    ///     <Product>
    ///       <ProductUniqueID>1</ProductUniqueID>
    ///       <Name>Widget</Name>
    ///       <ProductUrl>https://example.com/widget</ProductUrl>
    ///       <ImageUrl>https://example.com/widget.png</ImageUrl>
    ///       <Description>A widget</Description>
    ///       <UPCs>
    ///         <UPC>111</UPC>
    ///         <UPC>AAA</UPC>
    ///       </UPCs>
    ///     </Product>
    ///   </Products>
    /// </Feed>
    /// ```
    Xml,

    /// JSON形式
    ///
    /// XMLと同じ構造をJSONで出力します。
    ///
    /// # 出力例
    ///
    /// ```json
    /// {
    ///   "products": [
    ///     {
    ///       "product_unique_id": 1,
    ///       "name": "Widget",
    ///       "product_url": "https://example.com/widget",
    ///       "image_url": "https://example.com/widget.png",
    ///       "description": "A widget",
    ///       "upcs": ["111", "AAA"]
    ///     }
    ///   ]
    /// }
    /// ```
    Json,
}
