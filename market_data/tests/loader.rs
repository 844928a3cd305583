use market_data::{load_csv_series, CsvPriceHistory, PriceHistoryProvider, SeriesError};
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn loads_bare_date_close_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,close").unwrap();
    writeln!(file, "2023-01-02,100.0").unwrap();
    writeln!(file, "2023-01-03,103.5").unwrap();

    let series = load_csv_series(file.path(), "aapl").unwrap();
    assert_eq!(series.ticker(), "AAPL");
    assert_eq!(series.len(), 2);
    assert_eq!(series.last().close, 103.5);
}

#[test]
fn loads_full_ohlcv_csv_using_close_column() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Open,High,Low,Close,Volume").unwrap();
    writeln!(file, "2023-01-02,100.0,105.0,98.0,103.0,1000").unwrap();
    writeln!(file, "2023-01-03,103.0,107.0,101.0,106.0,1200").unwrap();
    writeln!(file, "2023-01-04,106.0,110.0,104.0,108.0,1500").unwrap();

    let series = load_csv_series(file.path(), "AAPL").unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series.closes(), vec![103.0, 106.0, 108.0]);
}

#[test]
fn tolerates_datetime_suffix_in_date_field() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,close").unwrap();
    writeln!(file, "2023-01-02 00:00:00,100.0").unwrap();

    let series = load_csv_series(file.path(), "AAPL").unwrap();
    assert_eq!(series.len(), 1);
}

#[test]
fn rejects_unparseable_rows() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,close").unwrap();
    writeln!(file, "2023-01-02,not-a-price").unwrap();

    let result = load_csv_series(file.path(), "AAPL");
    assert!(matches!(
        result,
        Err(SeriesError::MalformedRecord { line: 2, .. })
    ));
}

#[test]
fn rejects_header_without_close_column() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,volume").unwrap();
    writeln!(file, "2023-01-02,1000").unwrap();

    let result = load_csv_series(file.path(), "AAPL");
    assert!(matches!(
        result,
        Err(SeriesError::MalformedRecord { line: 1, .. })
    ));
}

#[test]
fn directory_provider_resolves_tickers() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("AAPL.csv"),
        "date,close\n2023-01-02,100.0\n2023-01-03,101.0\n",
    )
    .unwrap();

    let provider = CsvPriceHistory::new(dir.path());

    let series = provider.history("aapl").unwrap();
    assert_eq!(series.ticker(), "AAPL");
    assert_eq!(series.len(), 2);

    let missing = provider.history("MSFT");
    assert!(matches!(missing, Err(SeriesError::UnknownTicker(_))));
}
