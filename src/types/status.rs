/// Body returned by the writer's own REST status endpoint.
///
/// Only `status` is read, anything else the writer reports is ignored.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WriterStatus {
    pub status: String,
}

impl WriterStatus {
    /// State the writer reports once it is streaming frames to disk
    pub const RECEIVING: &'static str = "receiving";

    #[must_use]
    pub fn is_receiving(&self) -> bool {
        self.status == Self::RECEIVING
    }
}
