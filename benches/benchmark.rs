//! Performance benchmarks for page-scraper.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A small synthetic page with every content category
//! - Generated pages with growing numbers of tables
//! - JSON and XLSX export of a mid-sized result

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use page_scraper::{export, extract_html, ExportFormat, ScrapeSettings};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Sample Page</title></head>
<body>
    <nav><a href="/">Home</a> <a href="https://example.com/about">About</a></nav>
    <h1>Quarterly Report</h1>
    <h2>Revenue</h2>
    <table>
        <thead><tr><th>Quarter</th><th>Revenue</th><th>Growth</th></tr></thead>
        <tbody>
            <tr><td>Q1</td><td>1,200</td><td>3%</td></tr>
            <tr><td>Q2</td><td>1,350</td><td>12%</td></tr>
            <tr><td colspan="2">Total</td><td>7%</td></tr>
        </tbody>
    </table>
    <h2>Outlook</h2>
    <p>See <a href="https://example.com/outlook">the outlook</a>.</p>
    <img src="/charts/revenue.png"><img src="https://cdn.example.com/logo.svg">
    <footer><small>Copyright 2025</small></footer>
</body>
</html>
"#;

fn all_passes() -> ScrapeSettings {
    ScrapeSettings {
        scrape_tables: true,
        scrape_headlines: true,
        headline_tags: vec!["h1".to_string(), "h2".to_string()],
        scrape_links: true,
        scrape_images: true,
        custom_tag: Some("small".to_string()),
        ..ScrapeSettings::default()
    }
}

fn bench_extract_sample(c: &mut Criterion) {
    let settings = all_passes();
    c.bench_function("extract_sample", |b| {
        b.iter(|| extract_html(black_box(SAMPLE_HTML), black_box(&settings)));
    });
}

fn table_page(tables: usize, rows: usize) -> String {
    let mut html = String::from("<html><body>");
    for t in 0..tables {
        html.push_str("<table><tr><th>id</th><th>name</th><th>value</th></tr>");
        for r in 0..rows {
            html.push_str(&format!("<tr><td>{t}-{r}</td><td>row {r}</td><td>{}</td></tr>", r * 7));
        }
        html.push_str("</table>");
    }
    html.push_str("</body></html>");
    html
}

fn bench_extract_tables(c: &mut Criterion) {
    let settings = ScrapeSettings::default();
    let mut group = c.benchmark_group("tables");

    for tables in [1usize, 10, 50] {
        let html = table_page(tables, 50);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("extract", tables), &html, |b, html| {
            b.iter(|| extract_html(black_box(html), black_box(&settings)));
        });
    }

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let result = extract_html(&table_page(10, 100), &all_passes());

    c.bench_function("export_json", |b| {
        b.iter(|| export(black_box(&result), ExportFormat::Json));
    });
    c.bench_function("export_xlsx", |b| {
        b.iter(|| export(black_box(&result), ExportFormat::Spreadsheet));
    });
}

criterion_group!(benches, bench_extract_sample, bench_extract_tables, bench_export);
criterion_main!(benches);
