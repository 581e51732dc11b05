/// Errors that can occur while reading a DAT file.
#[derive(Debug, thiserror::Error)]
pub enum DatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid DAT file: {0}")]
    InvalidDat(String),
}

impl DatError {
    pub fn invalid_dat(msg: impl Into<String>) -> Self {
        Self::InvalidDat(msg.into())
    }
}

/// Fatal errors building the identity catalog. Any of these aborts the whole run.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Naming catalog is empty: no records to correlate against")]
    Empty,

    #[error("Failed to load naming catalog: {0}")]
    Load(#[from] DatError),
}
