//! Program image format
//!
//! A UM-32 program image is a headerless sequence of 32-bit words stored
//! big-endian on disk. The image becomes the initial contents of array 0.

use crate::error::SpecError;
use crate::Platter;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Initial contents of the program array (array 0)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramImage {
    words: Vec<Platter>,
}

impl ProgramImage {
    /// Build an image from raw bytes.
    ///
    /// The length must be a multiple of 4; each 4-byte group is one
    /// big-endian platter. No instruction validation happens here -
    /// arbitrary words are permitted and illegal operators surface at
    /// execution time.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SpecError> {
        if bytes.len() % 4 != 0 {
            return Err(SpecError::MalformedImage { len: bytes.len() });
        }

        let words = bytes
            .chunks_exact(4)
            .map(|chunk| Platter::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(ProgramImage { words })
    }

    /// Read an image to the end of a byte stream.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, SpecError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Build an image directly from words (tooling and tests).
    pub fn from_words(words: Vec<Platter>) -> Self {
        ProgramImage { words }
    }

    /// Serialize back to the on-disk big-endian format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.words.len() * 4);
        for word in &self.words {
            bytes.extend_from_slice(&word.to_be_bytes());
        }
        bytes
    }

    pub fn words(&self) -> &[Platter] {
        &self.words
    }

    pub fn into_words(self) -> Vec<Platter> {
        self.words
    }

    /// Number of platters in the image
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// SHA-256 of the serialized image, for identifying loaded programs
    /// in diagnostics.
    pub fn digest(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        for word in &self.words {
            hasher.update(word.to_be_bytes());
        }
        hasher.finalize().into()
    }
}
