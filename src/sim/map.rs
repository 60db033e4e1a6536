//! Concealment map: the code lines the bug can hide in
//!
//! The editor shows a fixed template of source lines. Each roll decides,
//! per line, whether the clean or the broken variant is shown. Broken lines
//! (syntax errors) conceal the bug.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Kind of syntax error a concealing line carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    MissingSemicolon,
    MissingQuote,
    MissingParen,
    MissingBracket,
    MissingBrace,
    WrongBracket,
}

impl ErrorKind {
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::MissingSemicolon => "Missing semicolon",
            ErrorKind::MissingQuote => "Missing quote",
            ErrorKind::MissingParen => "Missing parenthesis",
            ErrorKind::MissingBracket => "Missing bracket",
            ErrorKind::MissingBrace => "Missing brace",
            ErrorKind::WrongBracket => "Wrong bracket type",
        }
    }
}

/// One line of the template catalog
#[derive(Debug, Clone, Copy)]
pub struct LineTemplate {
    pub clean: &'static str,
    pub error: &'static str,
    /// `None` for lines that can never hide the bug
    pub kind: Option<ErrorKind>,
}

const fn line(clean: &'static str, error: &'static str, kind: ErrorKind) -> LineTemplate {
    LineTemplate {
        clean,
        error,
        kind: Some(kind),
    }
}

const fn plain(text: &'static str) -> LineTemplate {
    LineTemplate {
        clean: text,
        error: text,
        kind: None,
    }
}

/// The editor buffer, top to bottom
pub const TEMPLATES: [LineTemplate; 21] = {
    use ErrorKind::*;
    [
        line("import React from 'react';", "import React from 'react'", MissingSemicolon),
        line("import './App.css';", "import './App.css'", MissingSemicolon),
        line("function App() {", "function App( {", MissingParen),
        line(
            "  const message = 'Hello, VSCode!';",
            "  const message = 'Hello, VSCode!",
            MissingQuote,
        ),
        line("  const count = 42;", "  const count = 42", MissingSemicolon),
        line("  return (", "  return [", WrongBracket),
        line("    <div className=\"app\">", "    <div className=\"app>", MissingQuote),
        line("      <h1>{message}</h1>", "      <h1>{message}</h1", MissingBracket),
        line("      <p>Count: {count}</p>", "      <p>Count: {count</p>", MissingBrace),
        line(
            "      <button onClick={() => console.log('clicked')}>",
            "      <button onClick={) => console.log('clicked')}>",
            MissingParen,
        ),
        plain("        Click me!"),
        line("      </button>", "      </button", MissingBracket),
        line("    </div>", "    </div", MissingBracket),
        line("  );", "  )", MissingSemicolon),
        plain("}"),
        plain(""),
        line("export default App;", "export default App", MissingSemicolon),
        plain(""),
        plain("// More sample code..."),
        line("const handleClick = () => {", "const handleClick = ( => {", MissingParen),
        line(
            "  console.log('Button clicked!');",
            "  console.log('Button clicked!')",
            MissingSemicolon,
        ),
    ]
};

/// A single line slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConcealmentCell {
    /// 1-based, contiguous
    pub index: u32,
    /// Present exactly when the line conceals
    pub error_kind: Option<ErrorKind>,
}

impl ConcealmentCell {
    pub fn conceals(&self) -> bool {
        self.error_kind.is_some()
    }

    /// Text the editor shows for this line
    pub fn text(&self) -> &'static str {
        let template = (self.index as usize)
            .checked_sub(1)
            .and_then(|i| TEMPLATES.get(i));
        let Some(template) = template else {
            return "";
        };
        if self.conceals() {
            template.error
        } else {
            template.clean
        }
    }
}

/// Ordered list of lines, indices `1..=N`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ConcealmentMap {
    cells: Vec<ConcealmentCell>,
}

impl ConcealmentMap {
    /// Roll every template line independently
    pub fn generate<R: Rng>(rng: &mut R, concealment_chance: f64) -> Self {
        let cells = TEMPLATES
            .iter()
            .enumerate()
            .map(|(i, template)| {
                let roll = rng.random::<f64>();
                let error_kind = template.kind.filter(|_| roll < concealment_chance);
                ConcealmentCell {
                    index: i as u32 + 1,
                    error_kind,
                }
            })
            .collect();
        Self { cells }
    }

    /// Build a map from explicit per-line flags (line 1 first)
    pub fn from_flags(flags: &[bool]) -> Self {
        let cells = flags
            .iter()
            .enumerate()
            .map(|(i, &conceals)| {
                let index = i as u32 + 1;
                let kind = TEMPLATES
                    .get(i)
                    .and_then(|t| t.kind)
                    .unwrap_or(ErrorKind::MissingSemicolon);
                ConcealmentCell {
                    index,
                    error_kind: conceals.then_some(kind),
                }
            })
            .collect();
        Self { cells }
    }

    /// Clear each concealing line with probability `clear_chance`
    ///
    /// Returns how many lines were cleaned.
    pub fn reduce_concealment<R: Rng>(&mut self, rng: &mut R, clear_chance: f64) -> usize {
        let mut cleared = 0;
        for cell in self.cells.iter_mut().filter(|c| c.conceals()) {
            if rng.random::<f64>() < clear_chance {
                cell.error_kind = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Number of lines (N)
    pub fn len(&self) -> u32 {
        self.cells.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at a 1-based line, `None` when out of range
    pub fn cell(&self, line: u32) -> Option<&ConcealmentCell> {
        let idx = (line as usize).checked_sub(1)?;
        self.cells.get(idx)
    }

    /// Whether `line` hides the bug; lines outside the map never do
    pub fn conceals_at(&self, line: u32) -> bool {
        self.cell(line).is_some_and(ConcealmentCell::conceals)
    }

    pub fn cells(&self) -> &[ConcealmentCell] {
        &self.cells
    }

    pub fn concealing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.conceals()).count()
    }
}
