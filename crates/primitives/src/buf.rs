use bitcoin::{BlockHash, TxMerkleNode, Txid, hashes::sha256d};

/// A 32-byte buffer, stored in raw digest byte order.
///
/// This is the hash type used throughout the merkle and auxpow code. It converts
/// losslessly to and from the `bitcoin` hash newtypes, which keep the same internal
/// byte order but print in reverse.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Buf32(pub [u8; 32]);

impl_buf_core!(Buf32, 32);
impl_buf_fmt!(Buf32, 32);
impl_buf_borsh!(Buf32, 32);
impl_buf_arbitrary!(Buf32, 32);
impl_buf_serde!(Buf32, 32);
impl_buf_bitcoin_hash!(Buf32, BlockHash, TxMerkleNode, Txid, sha256d::Hash);

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_zero_and_default() {
        assert!(Buf32::zero().is_zero());
        assert_eq!(Buf32::default(), Buf32::zero());
        assert!(!Buf32::from([1; 32]).is_zero());
    }

    #[test]
    fn test_try_from_slice() {
        let bytes = [7u8; 32];
        assert_eq!(Buf32::try_from(&bytes[..]).unwrap(), Buf32::new(bytes));
        assert!(Buf32::try_from(&bytes[..31]).is_err());
    }

    #[test]
    fn test_reversed_matches_bitcoin_display_order() {
        let hash = BlockHash::from_str(
            "000000000000000000024bead8df69990852c202db0e0097c1a12ea637d7e96d",
        )
        .unwrap();
        let buf = Buf32::from(hash);

        // Raw order is the reverse of the displayed hex.
        assert_eq!(
            hex::encode(buf.reversed().as_slice()),
            "000000000000000000024bead8df69990852c202db0e0097c1a12ea637d7e96d"
        );
        assert_eq!(BlockHash::from(buf), hash);
    }

    #[test]
    fn test_fmt() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        bytes[31] = 0xcd;
        let buf = Buf32::from(bytes);

        assert_eq!(format!("{buf}"), "ab0000..0000cd");
        assert_eq!(format!("{buf:?}").len(), 64);
    }

    #[test]
    fn test_serde_hex() {
        let buf = Buf32::from([0x11; 32]);
        let json = serde_json::to_string(&buf).unwrap();
        assert_eq!(json, format!("\"{}\"", "11".repeat(32)));

        let back: Buf32 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, buf);

        let prefixed: Buf32 = serde_json::from_str(&format!("\"0x{}\"", "11".repeat(32))).unwrap();
        assert_eq!(prefixed, buf);

        assert!(serde_json::from_str::<Buf32>("\"1111\"").is_err());
    }

    #[test]
    fn test_borsh_is_raw_bytes() {
        let buf = Buf32::from([0x42; 32]);
        let encoded = borsh::to_vec(&buf).unwrap();
        assert_eq!(encoded, vec![0x42; 32]);
        assert_eq!(borsh::from_slice::<Buf32>(&encoded).unwrap(), buf);
    }
}
