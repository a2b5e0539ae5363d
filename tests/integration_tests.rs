//! Integration tests for logops
//!
//! These tests verify:
//! - JSON records are valid and carry time, level and message
//! - Printf-style rendering of messages
//! - Context precedence (local > dynamic > static)
//! - Attached errors, structured and plain
//! - Sink write errors reach the caller
//! - Text output and file sinks

use chrono::{DateTime, Local};
use logops::prelude::*;
use serde::ser::{Error as _, Serializer};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use tempfile::TempDir;

fn json_logger() -> (Logger, MemorySink) {
    let sink = MemorySink::new();
    let logger = Logger::with_config(LoggerConfig::json(), sink.clone());
    (logger, sink)
}

fn records(sink: &MemorySink) -> Vec<Value> {
    sink.lines()
        .iter()
        .map(|line| serde_json::from_str(line).expect("each line is one JSON object"))
        .collect()
}

fn single_record(sink: &MemorySink) -> Value {
    let mut all = records(sink);
    assert_eq!(all.len(), 1, "expected exactly one record");
    all.remove(0)
}

struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "life goes on bra!"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct NestedError {
    text: String,
    cause: Option<Box<NestedError>>,
}

impl fmt::Display for NestedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

struct NotJsonable;

impl fmt::Display for NotJsonable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a not JSONable error")
    }
}

impl Serialize for NotJsonable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Err(S::Error::custom("JSON not supported"))
    }
}

#[test]
fn test_record_shape_and_time() {
    let (logger, sink) = json_logger();

    let start = Local::now();
    logger.info("Something").unwrap();
    let end = Local::now();

    let record = single_record(&sink);
    let object = record.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(record["lvl"], "INFO");
    assert_eq!(record["msg"], "Something");

    let time = DateTime::parse_from_rfc3339(record["time"].as_str().unwrap()).unwrap();
    assert!(time >= start && time <= end, "{} not in [{}, {}]", time, start, end);
    assert!(sink.to_string_lossy().ends_with("}\n"));
}

#[test]
fn test_field_order_on_the_wire() {
    let (logger, sink) = json_logger();
    logger.set_context(Context::from([("zone", "z")]));
    let cause = io::Error::new(io::ErrorKind::Other, "boom");

    logger
        .error_with_cause(&cause, &Context::from([("local", "l")]), "done", &[])
        .unwrap();

    let line = &sink.lines()[0];
    let pos = |key: &str| line.find(&format!("\"{}\":", key)).unwrap();
    assert!(pos("time") < pos("lvl"));
    assert!(pos("lvl") < pos("err"));
    assert!(pos("err") < pos("local"));
    assert!(pos("local") < pos("zone"));
    assert!(pos("zone") < pos("msg"));
}

#[test]
fn test_level_names() {
    let (logger, sink) = json_logger();

    logger.debug("d").unwrap();
    logger.info("i").unwrap();
    logger.warn("w").unwrap();
    logger.error("e").unwrap();
    logger.critical("c").unwrap();

    let levels: Vec<_> = records(&sink)
        .iter()
        .map(|r| r["lvl"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(levels, vec!["DEBUG", "INFO", "WARN", "ERROR", "FATAL"]);
}

#[test]
fn test_printf_rendering() {
    let (logger, sink) = json_logger();

    logger
        .infof("%d y %d son %d", &[2.into(), 2.into(), 4.into()])
        .unwrap();
    logger.infof("Something %s", &["extra".into()]).unwrap();
    logger.info("100% literal").unwrap();

    let msgs: Vec<_> = records(&sink)
        .iter()
        .map(|r| r["msg"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(msgs, vec!["2 y 2 son 4", "Something extra", "100% literal"]);
}

#[test]
fn test_local_context() {
    let (logger, sink) = json_logger();
    let local = Context::from([("local", "España y olé")]);

    logger.info_with_context(&local, "Something", &[]).unwrap();

    let record = single_record(&sink);
    assert_eq!(record["local"], "España y olé");
    assert_eq!(record["msg"], "Something");
}

#[test]
fn test_dynamic_context() {
    let (logger, sink) = json_logger();
    logger.set_context_fn(|| Context::from([("func", "func")]));

    logger.info("Something").unwrap();

    assert_eq!(single_record(&sink)["func"], "func");
}

#[test]
fn test_static_context() {
    let (logger, sink) = json_logger();
    logger.set_context(Context::from([("logger", "logger")]));

    logger.info("Something").unwrap();

    assert_eq!(single_record(&sink)["logger"], "logger");
}

#[test]
fn test_context_precedence() {
    let (logger, sink) = json_logger();
    logger.set_context(Context::from([
        ("shared", "logger"),
        ("fromLogger", "logger"),
        ("dynLogger", "logger"),
    ]));
    logger.set_context_fn(|| {
        Context::from([("shared", "func"), ("fromFunc", "func"), ("dynLogger", "func")])
    });
    let local = Context::from([("shared", "local"), ("fromLocal", "local")]);

    logger.info_with_context(&local, "Something", &[]).unwrap();

    let record = single_record(&sink);
    assert_eq!(record["shared"], "local");
    assert_eq!(record["fromLocal"], "local");
    assert_eq!(record["fromFunc"], "func");
    assert_eq!(record["dynLogger"], "func");
    assert_eq!(record["fromLogger"], "logger");
    assert_eq!(sink.to_string_lossy().matches("\"shared\"").count(), 1);
}

#[test]
fn test_contexts_cannot_override_record_keys() {
    let (logger, sink) = json_logger();
    logger.set_context(Context::from([("lvl", "static-lvl"), ("app", "demo")]));
    logger.set_context_fn(|| Context::from([("time", "dyn-time")]));
    let local = Context::from([("msg", "shadow"), ("time", "t")]);

    logger.info_with_context(&local, "real message", &[]).unwrap();

    let out = sink.to_string_lossy();
    for key in ["\"time\":", "\"lvl\":", "\"msg\":"] {
        assert_eq!(out.matches(key).count(), 1, "{} repeated in {}", key, out);
    }
    let record = single_record(&sink);
    assert_eq!(record["lvl"], "INFO");
    assert_eq!(record["msg"], "real message");
    assert_eq!(record["app"], "demo");
    assert!(DateTime::parse_from_rfc3339(record["time"].as_str().unwrap()).is_ok());
}

#[test]
fn test_nested_error_is_embedded() {
    let (logger, sink) = json_logger();
    let err = NestedError {
        text: "1".into(),
        cause: Some(Box::new(NestedError {
            text: "2".into(),
            cause: Some(Box::new(NestedError {
                text: "3".into(),
                cause: None,
            })),
        })),
    };

    logger
        .error_with_cause(&Structured(err), &Context::new(), "Something", &[])
        .unwrap();

    let record = single_record(&sink);
    assert_eq!(record["lvl"], "ERROR");
    assert_eq!(
        record["err"],
        json!({"Text": "1", "Cause": {"Text": "2", "Cause": {"Text": "3", "Cause": null}}})
    );
}

#[test]
fn test_unserializable_error_falls_back() {
    let (logger, sink) = json_logger();

    logger
        .critical_with_cause(&Structured(NotJsonable), &Context::new(), "Something", &[])
        .unwrap();

    let record = single_record(&sink);
    assert_eq!(record["lvl"], "FATAL");
    assert_eq!(record["err"], "a not JSONable error (JSON not supported)");
}

#[test]
fn test_plain_error_with_params() {
    let (logger, sink) = json_logger();
    let cause = io::Error::new(io::ErrorKind::NotFound, "no such table");
    let local = Context::from([("table", "users")]);

    logger
        .error_with_cause(&cause, &local, "query %d failed", &[7.into()])
        .unwrap();

    let record = single_record(&sink);
    assert_eq!(record["err"], "no such table");
    assert_eq!(record["table"], "users");
    assert_eq!(record["msg"], "query 7 failed");
}

#[test]
fn test_write_errors_reach_every_level() {
    let logger = Logger::with_config(LoggerConfig::json(), FailingSink);
    let cause = io::Error::new(io::ErrorKind::Other, "cause");
    let ctx = Context::new();

    let results = vec![
        logger.debug("x"),
        logger.infof("x %d", &[1.into()]),
        logger.warn_with_context(&ctx, "x", &[]),
        logger.error("x"),
        logger.critical("x"),
        logger.error_with_cause(&cause, &ctx, "x", &[]),
        logger.critical_with_cause(&cause, &ctx, "x", &[]),
    ];

    for result in results {
        let err = result.unwrap_err();
        assert_eq!(err.io_error().unwrap().to_string(), "life goes on bra!");
    }
    assert_eq!(logger.metrics().write_errors(), 7);
}

#[test]
fn test_threshold_changes_take_effect() {
    let (logger, sink) = json_logger();

    for level in Level::ALL_LEVELS {
        sink.clear();
        logger.set_level(level);

        logger.debug("d").unwrap();
        logger.info("i").unwrap();
        logger.warn("w").unwrap();
        logger.error("e").unwrap();
        logger.critical("c").unwrap();

        let expected = [Level::Debug, Level::Info, Level::Warn, Level::Error, Level::Critical]
            .iter()
            .filter(|l| level <= **l)
            .count();
        assert_eq!(sink.lines().len(), expected, "threshold {}", level);
    }
}

#[test]
fn test_text_output() {
    let sink = MemorySink::new();
    let logger = Logger::with_config(LoggerConfig::text(), sink.clone());
    logger.set_context(Context::from([("service", "api")]));

    logger
        .warn_with_context(&Context::from([("user", "ana")]), "line one\nline two", &[])
        .unwrap();

    let out = sink.to_string_lossy();
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains(" WARN\t [user=ana] [service=api] line one\\nline two\n"), "got {:?}", out);
    assert!(serde_json::from_str::<Value>(out.trim_end()).is_err());
}

#[test]
fn test_text_output_with_error() {
    let sink = MemorySink::new();
    let logger = Logger::with_config(LoggerConfig::text(), sink.clone());
    let cause = io::Error::new(io::ErrorKind::Other, "boom");

    logger
        .error_with_cause(&cause, &Context::new(), "failed", &[])
        .unwrap();

    let out = sink.to_string_lossy();
    assert!(out.contains("ERROR"));
    assert!(out.contains("boom"));
    assert!(out.trim_end().ends_with("failed"));
}

#[test]
fn test_file_sink_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let sink = FileSink::new(&log_file).expect("Failed to create sink");
    let logger = Logger::with_config(LoggerConfig::json(), sink);
    logger.set_context(Context::from([("app", "demo")]));

    for i in 0..10 {
        logger.infof("record %d", &[i.into()]).unwrap();
    }
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 10);
    for (i, line) in lines.iter().enumerate() {
        let record: Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["msg"], format!("record {}", i));
        assert_eq!(record["app"], "demo");
    }
}

#[test]
fn test_custom_timestamp_format() {
    let sink = MemorySink::new();
    let config = LoggerConfig::json()
        .with_timestamp_format(TimestampFormat::Custom("%Y-%m-%d".to_string()));
    let logger = Logger::with_config(config, sink.clone());

    logger.info("dated").unwrap();

    let record = single_record(&sink);
    let time = record["time"].as_str().unwrap();
    assert_eq!(time.len(), 10);
    assert!(chrono::NaiveDate::parse_from_str(time, "%Y-%m-%d").is_ok());
}

#[test]
fn test_macros_from_outside_the_crate() {
    let (logger, sink) = json_logger();

    logops::info!(logger, "%s has %d items", "cart", 3).unwrap();
    logops::log!(logger, Level::Warn, "plain").unwrap();
    let ctx = logops::context! { "k" => "v" };
    logger.debug_with_context(&ctx, "with ctx", &[]).unwrap();

    let all = records(&sink);
    assert_eq!(all[0]["msg"], "cart has 3 items");
    assert_eq!(all[1]["lvl"], "WARN");
    assert_eq!(all[2]["k"], "v");
}
