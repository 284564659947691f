use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::case::driver::TestCase;
use crate::foundation::error::FuzzResult;

/// Output format for emitted test cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitFormat {
    /// Two statements for the downstream test template: print the expected
    /// value, then print the target expression's value.
    #[default]
    Template,
    /// One JSON object per line.
    Json,
}

/// Write `case` to `w` in `format`.
pub fn emit_case<W: Write + ?Sized>(
    w: &mut W,
    case: &TestCase,
    format: EmitFormat,
) -> FuzzResult<()> {
    match format {
        EmitFormat::Template => w
            .write_all(template_lines(case).as_bytes())
            .map_err(anyhow::Error::from)?,
        EmitFormat::Json => {
            serde_json::to_writer(&mut *w, case).map_err(anyhow::Error::from)?;
            w.write_all(b"\n").map_err(anyhow::Error::from)?;
        }
    }
    Ok(())
}

/// The template emission for `case`, newline-terminated.
pub fn template_lines(case: &TestCase) -> String {
    format!(
        "    print(\"{} = \")\n    println(unparseInt({}))\n",
        case.expected, case.target
    )
}
