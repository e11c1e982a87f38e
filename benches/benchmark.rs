//! パフォーマンスベンチマーク
//!
//! このモジュールは、xlsxfeedクレートのパフォーマンスを測定するためのベンチマークを提供します。
//! 入力ワークブックはrust_xlsxwriterでメモリ上に生成するため、外部フィクスチャは不要です。

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::io::Cursor;
use xlsxfeed::{ConverterBuilder, OutputFormat};

/// 製品数を指定してワークブックを生成する
///
/// 各製品につき`codes_per_product`行を書き込みます（カタログ列は同一のため重複除去される）。
fn generate_workbook(products: usize, codes_per_product: usize) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header = ["ProductName", "ProductURL", "ImageURL", "Description"];
    for (col, value) in header.iter().enumerate() {
        worksheet.write_string(0, col as u16, *value)?;
    }
    worksheet.write_string(0, 5, "UPC")?;
    worksheet.write_string(0, 6, "GTIN")?;

    let mut row = 1u32;
    for p in 0..products {
        for c in 0..codes_per_product {
            worksheet.write_string(row, 0, format!("Product {}", p))?;
            worksheet.write_string(row, 1, format!("https://example.com/p/{}", p))?;
            worksheet.write_string(row, 2, format!("https://example.com/p/{}.png", p))?;
            worksheet.write_string(row, 3, format!("Description of product {}", p))?;
            worksheet.write_string(row, 5, format!("{:012}", p * 100 + c))?;
            worksheet.write_string(row, 6, format!(" 0 {:013} ", p * 100 + c))?;
            row += 1;
        }
    }

    workbook.save_to_buffer()
}

/// 製品数に対する変換時間
fn benchmark_convert(c: &mut Criterion) {
    let converter = ConverterBuilder::new().build().unwrap();

    let mut group = c.benchmark_group("convert");
    group.sample_size(10);

    for products in [100usize, 1_000, 10_000] {
        let data = generate_workbook(products, 2).unwrap();
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(products), &data, |b, data| {
            b.iter(|| {
                let input = Cursor::new(black_box(data));
                let mut output = Vec::new();
                converter
                    .convert(black_box(input), black_box(&mut output))
                    .unwrap();
                black_box(output)
            });
        });
    }

    group.finish();
}

/// 出力フォーマットごとの変換時間
fn benchmark_output_formats(c: &mut Criterion) {
    let data = generate_workbook(1_000, 2).unwrap();

    let mut group = c.benchmark_group("output_format");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.sample_size(10);

    for (name, format) in [("xml", OutputFormat::Xml), ("json", OutputFormat::Json)] {
        let converter = ConverterBuilder::new()
            .with_output_format(format)
            .build()
            .unwrap();

        group.bench_function(name, |b| {
            b.iter(|| {
                let input = Cursor::new(black_box(&data));
                let mut output = Vec::new();
                converter
                    .convert(black_box(input), black_box(&mut output))
                    .unwrap();
                black_box(output)
            });
        });
    }

    group.finish();
}

/// 抽出のみ（出力なし）の時間
fn benchmark_extract(c: &mut Criterion) {
    let data = generate_workbook(1_000, 4).unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    c.bench_function("extract_1000_products", |b| {
        b.iter(|| {
            let feed = converter.extract(Cursor::new(black_box(&data))).unwrap();
            black_box(feed.products())
        });
    });
}

criterion_group!(
    benches,
    benchmark_convert,
    benchmark_output_formats,
    benchmark_extract
);
criterion_main!(benches);
