/// File that passed type and size validation.
#[derive(Debug)]
pub struct ValidatedFile {
    pub data: Vec<u8>,
    pub original_filename: String,
    /// Declared content type, or the octet-stream fallback
    pub content_type: String,
    /// Lowercased last dot-segment of the original filename
    pub extension: String,
}
