use rend_cache_domain::{DescriptorError, DescriptorId, ServiceDescriptor};

/// How the wire parser should treat its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Single descriptor fetched by a client.
    Client,
    /// Possibly several concatenated descriptors uploaded to a directory;
    /// the parser reports where the next record starts.
    Directory,
}

/// One descriptor record extracted from a text buffer.
#[derive(Debug, Clone)]
pub struct ParsedRecord {
    pub descriptor: ServiceDescriptor,
    /// Descriptor id embedded in (and signed by) the record.
    pub descriptor_id: DescriptorId,
    /// Raw introduction-point section, possibly still encrypted.
    pub intro_payload: Option<Vec<u8>>,
    /// Byte length of this record's encoded text, counted from the start of the input.
    pub consumed_len: usize,
    /// Offset of the next concatenated record relative to the start of the
    /// input. Only reported in [`ParseMode::Directory`].
    pub next_offset: Option<usize>,
}

/// Wire-format descriptor parser.
///
/// The parser owns signature verification; anything it returns is treated as
/// a well-formed, authentic record.
pub trait DescriptorParser: Send + Sync {
    fn parse(&self, input: &str, mode: ParseMode) -> Result<ParsedRecord, DescriptorError>;
}
