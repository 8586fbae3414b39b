//! Seam to the binary chunk encoder.
//!
//! The byte format of `.ghuser` documents is owned by the host's own
//! serialization library. This crate only hands it a finished
//! [`ChunkNode`] tree; see [`external::ExternalCodec`] for the process
//! bridge used by the CLI.

pub mod external;

pub use external::{CODEC_EXECUTABLE, ExternalCodec};

use crate::chunk::{ChunkNode, USER_OBJECT};
use crate::error::Result;

/// Encodes a chunk tree into host bytes.
#[allow(async_fn_in_trait)]
pub trait ChunkCodec {
    /// Encodes `chunk` and everything below it.
    async fn encode(&self, chunk: &ChunkNode) -> Result<Vec<u8>>;
}

/// Encodes a built user-object tree in the layout the host reads.
///
/// The host stores the script body as an opaque `Object` byte array on the
/// root rather than as a child chunk, so the body is detached, encoded on
/// its own and attached as bytes before the root is encoded.
pub async fn encode_user_object<C: ChunkCodec>(codec: &C, mut root: ChunkNode) -> Result<Vec<u8>> {
    if let Some(body) = root.take_chunk(USER_OBJECT) {
        let body_bytes = codec.encode(&body).await?;
        log::debug!("encoded script body: {} bytes", body_bytes.len());
        root.set_byte_array("Object", body_bytes);
    }
    codec.encode(&root).await
}
