// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Universal Payload info header, stored in the `.upld_info` ELF section.
//!
//! The record is little-endian with no padding between fields. It is
//! serialized field by field at fixed offsets, so the in-memory layout of
//! [`PayloadInfoHeader`] never leaks into the file.

use crate::error::HeaderError;

// --- Header constants ---

pub const UPLD_INFO_MAGIC: [u8; 4] = *b"PLDH";

/// Spec revision 0.7, BCD encoded.
pub const DEFAULT_SPEC_REVISION: u16 = 0x0070;

/// `0x0000010105` as written in the build script default.
pub const DEFAULT_REVISION: u32 = 0x0001_0105;

pub const DEFAULT_PRODUCER_ID: &str = "INTEL";
pub const DEFAULT_IMAGE_ID: &str = "UEFI";

/// Attribute bit 0: payload was built with the DEBUG target.
pub const ATTRIBUTE_DEBUG: u32 = 1 << 0;

pub const ID_LEN: usize = 16;

// --- Field offsets ---

const OFF_IDENTIFIER: usize = 0;
const OFF_HEADER_LENGTH: usize = 4;
const OFF_SPEC_REVISION: usize = 8;
const OFF_RESERVED: usize = 10;
const OFF_REVISION: usize = 12;
const OFF_ATTRIBUTE: usize = 16;
const OFF_CAPABILITY: usize = 20;
const OFF_PRODUCER_ID: usize = 24;
const OFF_IMAGE_ID: usize = 40;

// --- PayloadInfoHeader (packed, 56 bytes) ---

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayloadInfoHeader {
    pub identifier: [u8; 4],     // "PLDH"
    pub header_length: u32,      // always SIZE
    pub spec_revision: u16,      // BCD, major << 8 | minor
    pub reserved: u16,           // zero
    pub revision: u32,           // payload binary revision
    pub attribute: u32,          // bit 0 = debug build
    pub capability: u32,         // reserved
    pub producer_id: [u8; ID_LEN], // null-padded ASCII
    pub image_id: [u8; ID_LEN],    // null-padded ASCII
}

impl PayloadInfoHeader {
    /// Serialized size in bytes.
    pub const SIZE: usize = OFF_IMAGE_ID + ID_LEN;

    /// Build a header from validated build parameters.
    pub fn new(
        spec_revision: u16,
        revision: u32,
        producer_id: &str,
        image_id: &str,
        debug: bool,
    ) -> Self {
        let mut hdr = Self {
            spec_revision,
            revision,
            ..Self::default()
        };
        hdr.set_producer_id(producer_id);
        hdr.set_image_id(image_id);
        if debug {
            hdr.attribute |= ATTRIBUTE_DEBUG;
        }
        hdr
    }

    /// Set the producer id, truncating to 16 bytes.
    pub fn set_producer_id(&mut self, id: &str) {
        self.producer_id = fixed_id(id);
    }

    /// Set the image id, truncating to 16 bytes.
    pub fn set_image_id(&mut self, id: &str) {
        self.image_id = fixed_id(id);
    }

    pub fn is_debug(&self) -> bool {
        self.attribute & ATTRIBUTE_DEBUG != 0
    }

    /// Serialize to the on-disk layout.
    ///
    /// `HeaderLength` is always written as [`Self::SIZE`], whatever the
    /// `header_length` field holds.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[OFF_IDENTIFIER..OFF_HEADER_LENGTH].copy_from_slice(&self.identifier);
        buf[OFF_HEADER_LENGTH..OFF_SPEC_REVISION]
            .copy_from_slice(&(Self::SIZE as u32).to_le_bytes());
        buf[OFF_SPEC_REVISION..OFF_RESERVED].copy_from_slice(&self.spec_revision.to_le_bytes());
        buf[OFF_RESERVED..OFF_REVISION].copy_from_slice(&self.reserved.to_le_bytes());
        buf[OFF_REVISION..OFF_ATTRIBUTE].copy_from_slice(&self.revision.to_le_bytes());
        buf[OFF_ATTRIBUTE..OFF_CAPABILITY].copy_from_slice(&self.attribute.to_le_bytes());
        buf[OFF_CAPABILITY..OFF_PRODUCER_ID].copy_from_slice(&self.capability.to_le_bytes());
        buf[OFF_PRODUCER_ID..OFF_IMAGE_ID].copy_from_slice(&self.producer_id);
        buf[OFF_IMAGE_ID..Self::SIZE].copy_from_slice(&self.image_id);
        buf
    }

    /// Decode a serialized header, e.g. one read back from the info file.
    pub fn parse(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() < Self::SIZE {
            return Err(HeaderError::TooShort(bytes.len()));
        }

        let identifier: [u8; 4] = field(bytes, OFF_IDENTIFIER);
        if identifier != UPLD_INFO_MAGIC {
            return Err(HeaderError::BadMagic(identifier));
        }

        let header_length = u32::from_le_bytes(field(bytes, OFF_HEADER_LENGTH));
        if header_length != Self::SIZE as u32 {
            return Err(HeaderError::LengthMismatch(header_length, Self::SIZE as u32));
        }

        Ok(Self {
            identifier,
            header_length,
            spec_revision: u16::from_le_bytes(field(bytes, OFF_SPEC_REVISION)),
            reserved: u16::from_le_bytes(field(bytes, OFF_RESERVED)),
            revision: u32::from_le_bytes(field(bytes, OFF_REVISION)),
            attribute: u32::from_le_bytes(field(bytes, OFF_ATTRIBUTE)),
            capability: u32::from_le_bytes(field(bytes, OFF_CAPABILITY)),
            producer_id: field(bytes, OFF_PRODUCER_ID),
            image_id: field(bytes, OFF_IMAGE_ID),
        })
    }
}

impl Default for PayloadInfoHeader {
    fn default() -> Self {
        Self {
            identifier: UPLD_INFO_MAGIC,
            header_length: Self::SIZE as u32,
            spec_revision: DEFAULT_SPEC_REVISION,
            reserved: 0,
            revision: DEFAULT_REVISION,
            attribute: 0,
            capability: 0,
            producer_id: fixed_id(DEFAULT_PRODUCER_ID),
            image_id: fixed_id(DEFAULT_IMAGE_ID),
        }
    }
}

// Compile-time size check
const _: () = assert!(PayloadInfoHeader::SIZE == 56);

// --- Internal helpers ---

fn fixed_id(id: &str) -> [u8; ID_LEN] {
    let mut out = [0u8; ID_LEN];
    let src = id.as_bytes();
    let n = src.len().min(ID_LEN);
    out[..n].copy_from_slice(&src[..n]);
    out
}

fn field<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}
