//! # SOAP Gateway Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | Envelope decode | < 50µs per request |
//! | Query over 10k rows | < 10ms |
//! | CSV append | < 1ms per row |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dm_01_record_store::{tables, CsvTableStore, InMemoryTableStore, Record, TableStore};
use dm_02_soap_gateway::{decode, encode, ServiceKind, SoapDispatcher};

fn request(method: &str, params: &[(&str, &str)]) -> String {
    let params: String = params
        .iter()
        .map(|(name, value)| format!("<{name}>{value}</{name}>"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body><{method} xmlns="http://webtools.japan.nom">{params}</{method}></soap:Body></soap:Envelope>"#
    )
}

// ============================================================================
// Codec
// ============================================================================

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let body = request(
        "InsertLogonInventory",
        &[
            ("UserId", "jdoe"),
            ("UserDomain", "CORP"),
            ("HostName", "WKS01"),
            ("Domain", "corp.example"),
            ("SiteName", "HQ"),
            ("City", "Tokyo"),
            ("OuMapping", "OU=Workstations,DC=corp"),
        ],
    );
    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("decode_insert_request", |b| {
        b.iter(|| black_box(decode(black_box(body.as_bytes())).is_ok()))
    });

    let fragment = "<Drives>\n            <Drive>\n                <Id>1</Id>\n            </Drive></Drives>";
    group.bench_function("encode_response", |b| {
        b.iter(|| black_box(encode("GetUserDrives", black_box(fragment))))
    });

    group.finish();
}

// ============================================================================
// Query handlers
// ============================================================================

fn bench_drive_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_user_drives");
    group.measurement_time(Duration::from_secs(5));

    for rows in [100usize, 1_000, 10_000] {
        let records: Vec<Record> = (0..rows)
            .map(|i| {
                Record::new()
                    .with("UserId", format!("user{}", i % 50))
                    .with("Drive", "P:")
                    .with("UncPath", format!(r"\\srv\share{i}"))
            })
            .collect();
        let store = Arc::new(InMemoryTableStore::new().with_table(tables::DRIVES, records));
        let dispatcher = SoapDispatcher::new(store);
        let body = request("GetUserDrives", &[("UserId", "USER7")]);

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &body, |b, body| {
            b.iter(|| black_box(dispatcher.handle(ServiceKind::Mapper, body.as_bytes()).is_ok()))
        });
    }

    group.finish();
}

// ============================================================================
// CSV storage
// ============================================================================

fn bench_csv_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv_store");

    let dir = tempfile::TempDir::new().unwrap();
    let store = CsvTableStore::open(dir.path()).unwrap();
    let record = Record::new()
        .with("Timestamp", "2024-01-01 08:00:00")
        .with("UserId", "jdoe")
        .with("HostName", "WKS01")
        .with("UncPath", r"\\srv\share, quoted");

    group.bench_function("append_row", |b| {
        b.iter(|| store.append(tables::INVENTORY_DRIVES, black_box(&record)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_codec, bench_drive_query, bench_csv_append);
criterion_main!(benches);
