// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The platform loader refused the file: missing, not a dynamic module,
    /// or one of its dependencies could not be resolved.
    #[error("failed to load '{name}': {message}")]
    Load { name: String, message: String },

    #[error("symbol '{name}' not found: {message}")]
    SymbolNotFound { name: String, message: String },

    /// The symbol exists but its address is null, so it cannot be called.
    #[error("symbol '{name}' resolved to a null address")]
    NullSymbol { name: String },

    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("symbol '{name}' requested as a {size}-byte type, expected a function pointer")]
    IncompatibleSymbolType { name: String, size: usize },

    #[error("failed to release '{name}': {message}")]
    Release { name: String, message: String },

    #[error("buffer lengths differ: x has {x} elements, y has {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("buffer length {0} does not fit in a C int")]
    LengthOverflow(usize),

    #[error("DlOpen error: {0}")]
    DlOpen(#[from] dlopen2::Error),
}

impl Error {
    /// True for failures of the platform loader to open a library.
    pub fn is_load(&self) -> bool {
        matches!(self, Error::Load { .. })
    }

    /// True when a symbol is absent from the library's export table.
    pub fn is_symbol_not_found(&self) -> bool {
        matches!(self, Error::SymbolNotFound { .. })
    }
}
