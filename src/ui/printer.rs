//! ui::printer
//!
//! Debug rendering of the parsed invocation and the handler it resolves to.

use std::io::{self, Write};

use crate::cli::handler::Handler;
use crate::cli::invocation::ParsedInvocation;
use crate::core::config::PrinterKind;

/// Renders an invocation before it is dispatched.
pub trait InvocationPrinter {
    /// Write the rendering to `out`. `handler` is `None` when the path is
    /// not registered.
    fn render(
        &self,
        invocation: &ParsedInvocation,
        handler: Option<&Handler>,
        out: &mut dyn Write,
    ) -> io::Result<()>;
}

/// Prints nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPrinter;

impl InvocationPrinter for NoopPrinter {
    fn render(
        &self,
        _: &ParsedInvocation,
        _: Option<&Handler>,
        _: &mut dyn Write,
    ) -> io::Result<()> {
        Ok(())
    }
}

/// One line per field, indented under the path.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPrinter;

impl InvocationPrinter for PlainPrinter {
    fn render(
        &self,
        invocation: &ParsedInvocation,
        handler: Option<&Handler>,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(out, "invocation: {}", invocation.path)?;
        for (name, value) in &invocation.fields {
            writeln!(out, "  {name} = {value:?}")?;
        }
        let identifier = handler.map(|h| h.identifier).unwrap_or("<unresolved>");
        writeln!(out, "handler: {identifier}")
    }
}

/// A single JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPrinter;

impl InvocationPrinter for JsonPrinter {
    fn render(
        &self,
        invocation: &ParsedInvocation,
        handler: Option<&Handler>,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let value = serde_json::json!({
            "path": invocation.path,
            "fields": invocation.fields,
            "handler": handler.map(|h| h.identifier),
        });
        serde_json::to_writer(&mut *out, &value)?;
        writeln!(out)
    }
}

/// The printer for a configured kind.
pub fn printer_for(kind: PrinterKind) -> Box<dyn InvocationPrinter> {
    match kind {
        PrinterKind::None => Box::new(NoopPrinter),
        PrinterKind::Plain => Box::new(PlainPrinter),
        PrinterKind::Json => Box::new(JsonPrinter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::handler::{Arguments, Context};
    use crate::core::types::CommandPath;
    use std::collections::BTreeMap;

    fn noop(_: &Context, _: &Arguments) -> anyhow::Result<()> {
        Ok(())
    }

    const LANE_RESERVE: Handler = Handler::new("lane_reserve", "", &["lane"], noop);

    fn invocation() -> ParsedInvocation {
        ParsedInvocation::new(
            CommandPath::new(["lane", "reserve"]).unwrap(),
            BTreeMap::from([("lane".to_string(), "7".to_string())]),
        )
    }

    fn rendered(kind: PrinterKind, handler: Option<&Handler>) -> String {
        let mut out = Vec::new();
        printer_for(kind)
            .render(&invocation(), handler, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn noop_writes_nothing() {
        assert_eq!(rendered(PrinterKind::None, Some(&LANE_RESERVE)), "");
    }

    #[test]
    fn plain_lists_fields_and_handler() {
        assert_eq!(
            rendered(PrinterKind::Plain, Some(&LANE_RESERVE)),
            "invocation: lane reserve\n  COMMAND = \"reserve\"\n  lane = \"7\"\nhandler: lane_reserve\n"
        );
    }

    #[test]
    fn plain_marks_unresolved() {
        assert!(rendered(PrinterKind::Plain, None).ends_with("handler: <unresolved>\n"));
    }

    #[test]
    fn json_is_one_object() {
        let text = rendered(PrinterKind::Json, Some(&LANE_RESERVE));
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["path"], serde_json::json!(["lane", "reserve"]));
        assert_eq!(value["fields"]["lane"], "7");
        assert_eq!(value["handler"], "lane_reserve");
    }
}
