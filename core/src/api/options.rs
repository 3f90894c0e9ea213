//! Configuration options for a validator.

/// Configuration options for a [`Validator`](super::Validator).
///
/// # Example
///
/// ```
/// use fieldcheck_core::api::ValidatorOptions;
///
/// let options = ValidatorOptions::default().with_separator("; ");
/// assert_eq!(options.tag_name, "vd");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Tag under which field annotations are read.
    ///
    /// Default: `"vd"`
    pub tag_name: String,

    /// Text placed between messages when several fields fail.
    ///
    /// Default: `"\t"`
    pub separator: String,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            tag_name: "vd".to_string(),
            separator: "\t".to_string(),
        }
    }
}

impl ValidatorOptions {
    pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = tag_name.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}
