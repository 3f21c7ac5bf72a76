//! JSON input documents.
//!
//! ```json
//! {
//!   "indeterminates": ["x", "y"],
//!   "matrix": [["1", "x*y"], ["x*y", "1"]]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SigResult;
use crate::poly::{check_square, parse, PolynomialMatrix};

/// The raw contents of an input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDocument {
    /// Indeterminate names, in coordinate order.
    pub indeterminates: Vec<String>,
    /// Square matrix of polynomial expressions.
    pub matrix: Vec<Vec<String>>,
}

impl InputDocument {
    /// Read and deserialize a document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SigError::Io`] if the file cannot be read and
    /// [`crate::SigError::Json`] if it is not a valid document.
    pub fn from_path(path: &Path) -> SigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Deserialize a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SigError::Json`] if the text is not a valid document.
    pub fn from_json_str(text: &str) -> SigResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate the shape and parse every entry.
    ///
    /// # Errors
    ///
    /// Returns the shape errors of [`PolynomialMatrix::new`] and
    /// [`crate::SigError::Parse`] for the first entry that fails to parse.
    pub fn into_problem(self) -> SigResult<PolynomialMatrix> {
        check_square(&self.matrix)?;
        let entries = self
            .matrix
            .iter()
            .map(|row| {
                row.iter()
                    .map(|expr| parse(expr, &self.indeterminates))
                    .collect::<SigResult<Vec<_>>>()
            })
            .collect::<SigResult<Vec<_>>>()?;
        PolynomialMatrix::new(self.indeterminates, entries)
    }
}
