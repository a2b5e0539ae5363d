//! Basic logger usage example
//!
//! Logs through an explicit logger and through the process-wide one.
//! Set `LOGOPS_FORMAT=dev` for human-readable lines instead of JSON.
//!
//! Run with: cargo run --example basic_usage

use logops::prelude::*;
use serde::ser::{Error as _, Serializer};
use serde::Serialize;
use std::fmt;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ComplexError {
    text: String,
    cause: Option<Box<ComplexError>>,
}

impl fmt::Display for ComplexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("uno complejito")
    }
}

struct StrangeError;

impl fmt::Display for StrangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a very strange error")
    }
}

impl Serialize for StrangeError {
    fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Err(S::Error::custom("JSON not supported"))
    }
}

fn main() -> Result<()> {
    let logger = Logger::new();

    logger.infof("%d y %d son %d", &[2.into(), 2.into(), 4.into()])?;
    logger.info("y ocho dieciséis")?;
    logger.set_context(Context::from([("prefix", "prefijo")]));
    logger.info_with_context(
        &Context::from([("local", "España y olé")]),
        "%d y %d son %d",
        &[2.into(), 2.into(), 4.into()],
    )?;
    logger.info_with_context(
        &Context::from([("local", r#"{"json":"pompón"}"#)]),
        "y ocho dieciséis",
        &[],
    )?;

    let complex = ComplexError {
        text: "1".into(),
        cause: Some(Box::new(ComplexError {
            text: "2".into(),
            cause: Some(Box::new(ComplexError {
                text: "3".into(),
                cause: None,
            })),
        })),
    };
    logger.error_with_cause(&Structured(complex), &Context::new(), "esta sí que es buena", &[])?;
    logger.error_with_cause(&Structured(StrangeError), &Context::new(), "otro mejor", &[])?;

    println!();
    println!("Con funciones del paquete");

    logops::infof("%d y %d son %d", &[2.into(), 2.into(), 4.into()])?;
    logops::info("y ocho dieciséis")?;
    logops::set_context(Context::from([("prefix", "prefijo")]));
    logops::info_with_context(
        &Context::from([("local", "España y olé")]),
        "%d y %d son %d",
        &[2.into(), 2.into(), 4.into()],
    )?;
    logops::info!(logops::default_logger(), "%s y %d", "macro", 16)?;
    logops::log(LogLine::new(Level::Warn, "%d%% hecho").with_params(&[99.into()]))?;

    Ok(())
}
