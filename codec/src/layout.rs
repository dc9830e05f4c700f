//! Field layout tables and the generic encode / decode pair

use crate::error::{CodecError, Result};
use crate::U256;

/// Wei per Gwei — the unit scale of the coarse summary price fields
pub const GWEI: u128 = 1_000_000_000;

/// One fixed-width field within a packed word
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    /// bit offset of the least significant bit
    pub offset: u32,
    /// width in bits, at most 128
    pub width: u32,
    /// unit scale: the stored value is `field value / scale` (truncating)
    pub scale: u128,
}

/// A packed word format: contiguous, non-overlapping fields, listed
/// most-significant first
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

/// Payload attached to an asset transfer that lists it on the auction.
/// Prices are in wei.
pub const TRANSFER_PAYLOAD: Layout = Layout {
    name: "transfer-payload",
    fields: &[
        FieldDef { name: "asset_id", offset: 224, width: 32, scale: 1 },
        FieldDef { name: "t0", offset: 192, width: 32, scale: 1 },
        FieldDef { name: "t1", offset: 160, width: 32, scale: 1 },
        FieldDef { name: "start_price", offset: 80, width: 80, scale: 1 },
        FieldDef { name: "end_price", offset: 0, width: 80, scale: 1 },
    ],
};

/// Persisted auction summary, 160 bits used. Prices are scaled down to
/// Gwei so they fit the narrow 32-bit fields.
pub const AUCTION_SUMMARY: Layout = Layout {
    name: "auction-summary",
    fields: &[
        FieldDef { name: "t0", offset: 128, width: 32, scale: 1 },
        FieldDef { name: "t1", offset: 96, width: 32, scale: 1 },
        FieldDef { name: "start_price", offset: 64, width: 32, scale: GWEI },
        FieldDef { name: "end_price", offset: 32, width: 32, scale: GWEI },
        FieldDef { name: "current_price", offset: 0, width: 32, scale: GWEI },
    ],
};

impl Layout {
    /// Pack `values` (one per field, in table order) into a word.
    ///
    /// Each value is first scaled down by its field's unit scale
    /// (truncating division), then rejected if the scaled form does not
    /// fit the declared bit width — never silently truncated.
    pub fn encode(&self, values: &[u128]) -> Result<U256> {
        if values.len() != self.fields.len() {
            return Err(CodecError::FieldCount {
                layout: self.name,
                expected: self.fields.len(),
                got: values.len(),
            });
        }
        let mut word = U256::zero();
        for (field, &value) in self.fields.iter().zip(values) {
            let stored = value / field.scale;
            if field.width < 128 && stored >> field.width != 0 {
                return Err(CodecError::FieldOverflow {
                    layout: self.name,
                    field: field.name,
                    width: field.width,
                });
            }
            word = word | (U256::from(stored) << field.offset);
        }
        Ok(word)
    }

    /// Unpack a word into one value per field, in table order, scaling
    /// each field back up to its caller-facing unit.
    ///
    /// Total: any bit pattern decodes, hostile or legacy. Validating the
    /// extracted values is the caller's responsibility.
    pub fn decode(&self, word: U256) -> Vec<u128> {
        self.fields
            .iter()
            .map(|field| {
                let mask = (U256::one() << field.width) - U256::one();
                let raw = ((word >> field.offset) & mask).low_u128();
                raw * field.scale
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_payload_round_trip() {
        let fields = [
            17u128,                      // asset_id
            1548979200,                  // t0
            1550707200,                  // t1
            1_000_000_000_000_000_000,   // 1 ether
            1_000_000_000_000_000,       // 1 finney
        ];
        let word = TRANSFER_PAYLOAD.encode(&fields).unwrap();
        assert_eq!(TRANSFER_PAYLOAD.decode(word), fields.to_vec());
    }

    #[test]
    fn test_transfer_payload_bit_positions() {
        // the word must match the hand-assembled reference layout:
        // asset_id << 224 | t0 << 192 | t1 << 160 | p0 << 80 | p1
        let fields = [17u128, 100, 200, 300, 400];
        let word = TRANSFER_PAYLOAD.encode(&fields).unwrap();

        let expected = (U256::from(17u64) << 224)
            | (U256::from(100u64) << 192)
            | (U256::from(200u64) << 160)
            | (U256::from(300u64) << 80)
            | U256::from(400u64);
        assert_eq!(word, expected);
    }

    #[test]
    fn test_encode_rejects_at_exact_width_boundary() {
        // 2^32 - 1 fits a 32-bit field, 2^32 does not
        assert!(TRANSFER_PAYLOAD.encode(&[(1 << 32) - 1, 0, 0, 0, 0]).is_ok());
        assert_eq!(
            TRANSFER_PAYLOAD.encode(&[1 << 32, 0, 0, 0, 0]),
            Err(CodecError::FieldOverflow {
                layout: "transfer-payload",
                field: "asset_id",
                width: 32,
            })
        );

        // same at the 80-bit price boundary
        assert!(TRANSFER_PAYLOAD.encode(&[0, 0, 0, (1 << 80) - 1, 0]).is_ok());
        assert!(TRANSFER_PAYLOAD.encode(&[0, 0, 0, 1 << 80, 0]).is_err());
    }

    #[test]
    fn test_encode_checks_field_count() {
        assert_eq!(
            TRANSFER_PAYLOAD.encode(&[1, 2, 3]),
            Err(CodecError::FieldCount {
                layout: "transfer-payload",
                expected: 5,
                got: 3,
            })
        );
    }

    #[test]
    fn test_decode_is_total() {
        // arbitrary garbage decodes without trapping
        let garbage = U256::MAX;
        let fields = TRANSFER_PAYLOAD.decode(garbage);
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0], (1 << 32) - 1);
        assert_eq!(fields[3], (1 << 80) - 1);

        assert_eq!(TRANSFER_PAYLOAD.decode(U256::zero()), vec![0; 5]);
    }

    #[test]
    fn test_summary_scales_to_gwei() {
        let wei = [
            1548979200u128,
            1550707200,
            1_000_000_000_000_000_000, // 1 ether
            1_000_000_000_000_000,     // 1 finney
            500_000_000_000_000_000,
        ];
        let word = AUCTION_SUMMARY.encode(&wei).unwrap();

        // stored values are Gwei
        let expected = (U256::from(1548979200u64) << 128)
            | (U256::from(1550707200u64) << 96)
            | (U256::from(1_000_000_000u64) << 64)
            | (U256::from(1_000_000u64) << 32)
            | U256::from(500_000_000u64);
        assert_eq!(word, expected);

        // exact multiples of the scale round-trip losslessly
        assert_eq!(AUCTION_SUMMARY.decode(word), wei.to_vec());
    }

    #[test]
    fn test_summary_scale_truncates() {
        // a sub-Gwei remainder is truncated, not rounded
        let wei = [0u128, 1, 1_999_999_999, 0, 0];
        let word = AUCTION_SUMMARY.encode(&wei).unwrap();
        assert_eq!(AUCTION_SUMMARY.decode(word)[2], 1_000_000_000);
    }

    #[test]
    fn test_summary_rejects_oversized_price() {
        // 2^32 Gwei no longer fits the 32-bit field
        let too_big = (1u128 << 32) * GWEI;
        assert!(AUCTION_SUMMARY.encode(&[0, 0, too_big, 0, 0]).is_err());
        assert!(AUCTION_SUMMARY.encode(&[0, 0, too_big - GWEI, 0, 0]).is_ok());
    }
}
