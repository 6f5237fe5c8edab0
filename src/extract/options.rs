//! Extraction options and configuration.

/// Options for extracting contents from a page source.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// File name of the document, used for the password and extension checks
    pub document_name: Option<String>,

    /// Password overriding the one embedded in the document name
    pub password: Option<String>,

    /// Reject document names without a `.pdf` extension
    pub require_pdf_extension: bool,

    /// Fail with [`Error::NoContent`](crate::Error::NoContent) instead of
    /// returning an empty container
    pub require_content: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document name. Enables the `.pdf` extension check.
    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = Some(name.into());
        self.require_pdf_extension = true;
        self
    }

    /// Set an explicit password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Enable or disable the `.pdf` extension check.
    pub fn with_pdf_extension_check(mut self, require: bool) -> Self {
        self.require_pdf_extension = require;
        self
    }

    /// Treat a document without text as an error.
    pub fn require_content(mut self) -> Self {
        self.require_content = true;
        self
    }
}
