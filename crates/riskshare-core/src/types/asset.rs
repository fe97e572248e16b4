//! Asset identifiers and the ordered asset index.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{RiskShareError, RiskShareResult};

/// A ticker or other identifier for a single asset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A stable ordered list of assets.
///
/// Every vector and matrix in the numeric core is positioned by this index.
/// The symbol lookup table exists for the boundary only and is never
/// consulted inside a computation.
///
/// # Example
///
/// ```rust
/// use riskshare_core::types::AssetIndex;
///
/// let index = AssetIndex::new(["AAPL", "MSFT", "TLT"]).unwrap();
/// assert_eq!(index.len(), 3);
/// assert_eq!(index.position("MSFT"), Some(1));
/// assert_eq!(index.symbol(2).unwrap().as_str(), "TLT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetIndex {
    symbols: Vec<Symbol>,
    positions: HashMap<Symbol, usize>,
}

impl AssetIndex {
    /// Builds an index from symbols in the order given.
    ///
    /// # Errors
    ///
    /// Returns `RiskShareError::DuplicateSymbol` if a symbol repeats.
    pub fn new<I, S>(symbols: I) -> RiskShareResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let symbols: Vec<Symbol> = symbols.into_iter().map(Into::into).collect();
        let mut positions = HashMap::with_capacity(symbols.len());

        for (i, symbol) in symbols.iter().enumerate() {
            if positions.insert(symbol.clone(), i).is_some() {
                return Err(RiskShareError::DuplicateSymbol {
                    symbol: symbol.to_string(),
                });
            }
        }

        Ok(Self { symbols, positions })
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the index holds no assets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Position of a symbol, if present.
    #[must_use]
    pub fn position(&self, symbol: &str) -> Option<usize> {
        self.positions.get(&Symbol::new(symbol)).copied()
    }

    /// Position of a symbol, failing with `UnknownSymbol` when absent.
    pub fn require(&self, symbol: &Symbol) -> RiskShareResult<usize> {
        self.positions
            .get(symbol)
            .copied()
            .ok_or_else(|| RiskShareError::UnknownSymbol {
                symbol: symbol.to_string(),
            })
    }

    /// Symbol at a position.
    #[must_use]
    pub fn symbol(&self, position: usize) -> Option<&Symbol> {
        self.symbols.get(position)
    }

    /// All symbols in index order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Arranges keyed values into index order.
    ///
    /// Every indexed symbol must appear exactly once in `values` and no
    /// foreign symbol may appear.
    ///
    /// # Errors
    ///
    /// * `UnknownSymbol` if `values` names a symbol outside the index
    /// * `DuplicateSymbol` if a symbol appears twice
    /// * `MissingSymbol` if an indexed symbol has no entry
    pub fn arrange<T: Clone>(&self, values: &[(Symbol, T)]) -> RiskShareResult<Vec<T>> {
        let mut slots: Vec<Option<T>> = vec![None; self.len()];

        for (symbol, value) in values {
            let i = self.require(symbol)?;
            if slots[i].is_some() {
                return Err(RiskShareError::DuplicateSymbol {
                    symbol: symbol.to_string(),
                });
            }
            slots[i] = Some(value.clone());
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.ok_or_else(|| RiskShareError::MissingSymbol {
                    symbol: self.symbols[i].to_string(),
                })
            })
            .collect()
    }
}
